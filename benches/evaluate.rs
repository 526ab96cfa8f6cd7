use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonrules::{path, Expression, PreOperation, Rule};
use serde_json::{json, Map, Value};

/// Build a rule with `n` leaves (each comparing a unique field) ANDed
/// together, and a document on which every leaf holds.
fn build_rule(n: usize) -> (Rule, Value) {
    let mut fields = Map::new();
    let mut leaves = Vec::with_capacity(n);

    for i in 0..n {
        let name = format!("f{i}");
        leaves.push(
            path(&format!("$.{name}"))
                .greater_than_equals(1)
                .unwrap(),
        );
        fields.insert(name, json!(10));
    }

    let rule = Rule::new(Expression::and(leaves).unwrap());
    (rule, Value::Object(fields))
}

/// Canonical JSON text of a rule mixing every family.
fn mixed_rule_json() -> String {
    Rule::new(
        Expression::and([
            path("$.user.email")
                .preoperation(PreOperation::sub_str_after("@"))
                .in_values(["example.com", "corp.io"])
                .unwrap(),
            path("$.user.tags").contains_any(["beta", "staff"]).unwrap(),
            Expression::not(path("$.user.banned").equals(true).unwrap()).unwrap(),
            path("$.user.name").starts_with("a", true).unwrap(),
            path("$.user.age").between(17, 66).unwrap(),
            path("$.user.phone").not_exists().unwrap(),
        ])
        .unwrap(),
    )
    .representation()
}

fn mixed_document() -> Value {
    json!({"user": {
        "email": "ann@example.com",
        "tags": ["beta"],
        "banned": false,
        "name": "Ann",
        "age": 30
    }})
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_eval");

    for &n in &[5, 20, 50] {
        let (rule, doc) = build_rule(n);
        group.bench_function(&format!("{n}_leaves"), |b| {
            b.iter(|| rule.matches(black_box(&doc)));
        });
    }

    let rule = Rule::create(&mixed_rule_json()).unwrap();
    let doc = mixed_document();
    group.bench_function("mixed_families", |b| {
        b.iter(|| rule.matches(black_box(&doc)));
    });

    group.finish();
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");

    for &n in &[5, 20, 50] {
        let text = build_rule(n).0.representation();
        group.bench_function(&format!("{n}_leaves"), |b| {
            b.iter(|| Rule::create(black_box(&text)).unwrap());
        });
    }

    let text = mixed_rule_json();
    group.bench_function("mixed_families", |b| {
        b.iter(|| Rule::create(black_box(&text)).unwrap());
    });

    group.finish();
}

fn bench_representation(c: &mut Criterion) {
    let mut group = c.benchmark_group("representation");

    for &n in &[5, 20, 50] {
        let (rule, _) = build_rule(n);
        group.bench_function(&format!("{n}_leaves"), |b| {
            b.iter(|| black_box(&rule).representation());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_create, bench_representation);
criterion_main!(benches);
