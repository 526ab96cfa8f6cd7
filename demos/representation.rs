use jsonrules::{path, Expression, PreOperation, Rule};

fn main() {
    let either = Expression::or([
        path("$.value")
            .preoperation(PreOperation::sub_str_after("H"))
            .not_equals_path("$.value")
            .expect("valid rule"),
        path("$.tags").contains_any(["a", "b"]).expect("valid rule"),
        path("$.missing")
            .propagate_missing()
            .empty()
            .expect("valid rule"),
    ])
    .expect("valid rule");
    let rule = Rule::new(Expression::not(either).expect("valid rule"));

    let repr = rule.representation();
    println!("{repr}");

    let rebuilt = Rule::create(&repr).expect("canonical form parses");
    assert_eq!(rebuilt, rule);
    assert_eq!(rebuilt.representation(), repr);

    let pretty = serde_json::to_string_pretty(&rule).expect("rule serializes");
    println!("{pretty}");
}
