#![allow(dead_code)]

use jsonrules::{path, Expression, PreOperation};
use proptest::prelude::*;
use serde_json::{json, Value};

// --- Fixed document schema ---
// user.age    : integer (0..=120)
// user.status : string, one of {"active", "inactive", "suspended"}
// user.email  : "<name>@<domain>", domain one of DOMAINS
// user.tags   : array, subset of TAGS
// user.region : string, one of REGIONS, sometimes absent

const STATUSES: &[&str] = &["active", "inactive", "suspended"];
const DOMAINS: &[&str] = &["example.com", "corp.io", "mail.org"];
const TAGS: &[&str] = &["admin", "beta", "staff", "trial"];
const REGIONS: &[&str] = &["us-east", "us-west", "eu", "ap"];

/// Generate a document that aligns with the fixed schema.
pub fn arb_document() -> impl Strategy<Value = Value> {
    (
        0_i64..=120,
        prop::sample::select(STATUSES),
        "[a-z]{1,6}",
        prop::sample::select(DOMAINS),
        prop::sample::subsequence(TAGS, 0..=TAGS.len()),
        prop::option::of(prop::sample::select(REGIONS)),
    )
        .prop_map(|(age, status, name, domain, tags, region)| {
            let mut user = json!({
                "age": age,
                "status": status,
                "email": format!("{name}@{domain}"),
                "tags": tags,
            });
            if let Some(region) = region {
                user["region"] = json!(region);
            }
            json!({ "user": user })
        })
}

/// Generate a leaf expression over a random field of the schema.
///
/// Every leaf evaluates without a fault against documents from
/// [`arb_document`]: the only path that can be missing is `user.region`,
/// and its leaves absorb the miss.
pub fn arb_leaf_expr() -> impl Strategy<Value = Expression> {
    prop_oneof![
        // user.age comparisons
        (0_i64..=120, 0_u8..7).prop_map(|(val, op)| {
            let p = path("$.user.age");
            let built = match op {
                0 => p.equals(val),
                1 => p.not_equals(val),
                2 => p.greater_than(val),
                3 => p.greater_than_equals(val),
                4 => p.less_than(val),
                5 => p.less_than_equals(val),
                _ => p.between(val, val + 10),
            };
            built.unwrap()
        }),
        // user.status membership
        (prop::sample::subsequence(STATUSES, 1..=2), any::<bool>()).prop_map(|(vals, is_in)| {
            if is_in {
                path("$.user.status").in_values(vals).unwrap()
            } else {
                path("$.user.status").not_in(vals).unwrap()
            }
        }),
        // user.status text checks
        (prop::sample::select(STATUSES), any::<bool>()).prop_map(|(val, ignore_case)| {
            path("$.user.status")
                .starts_with(&val[..3].to_uppercase(), ignore_case)
                .unwrap()
        }),
        // user.email domain via pre-operation
        (prop::sample::select(DOMAINS), any::<bool>()).prop_map(|(domain, eq)| {
            let p = path("$.user.email").preoperation(PreOperation::sub_str_after("@"));
            let built = if eq { p.equals(domain) } else { p.not_equals(domain) };
            built.unwrap()
        }),
        // user.tags set checks
        (prop::sample::subsequence(TAGS, 1..=3), any::<bool>()).prop_map(|(tags, all)| {
            if all {
                path("$.user.tags").contains_all(tags).unwrap()
            } else {
                path("$.user.tags").contains_any(tags).unwrap()
            }
        }),
        // user.region, possibly absent
        (prop::sample::select(REGIONS), 0_u8..4).prop_map(|(region, op)| {
            let p = path("$.user.region");
            let built = match op {
                0 => p.equals(region),
                1 => p.not_equals(region),
                2 => p.exists(),
                _ => p.not_exists(),
            };
            built.unwrap()
        }),
        Just(path("$.user.tags").not_empty().unwrap()),
    ]
}

/// Generate a composite expression tree (and, or, not of leaves), bounded depth.
pub fn arb_expr(max_depth: u32) -> impl Strategy<Value = Expression> {
    arb_leaf_expr().prop_recursive(max_depth, 24, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..=3)
                .prop_map(|children| Expression::and(children).unwrap()),
            prop::collection::vec(inner.clone(), 1..=3)
                .prop_map(|children| Expression::or(children).unwrap()),
            inner.prop_map(|e| Expression::not(e).unwrap()),
        ]
    })
}
