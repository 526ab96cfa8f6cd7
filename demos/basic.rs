use jsonrules::Rule;
use serde_json::json;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jsonrules=debug".into()),
        )
        .init();

    // Define a rule as JSON
    let rule = Rule::create(
        r#"{
            "type": "and",
            "children": [
                {"type": "greater_than_equals", "path": "$.user.age", "value": 18},
                {"type": "equals", "path": "$.user.status", "value": "active"},
                {
                    "type": "in",
                    "path": "$.user.email",
                    "preoperation": {"operation": "sub_str_after", "delimiter": "@"},
                    "values": ["example.com", "corp.io"]
                }
            ]
        }"#,
    )
    .expect("failed to parse rule");

    println!("{rule}");

    // Evaluate against a document
    let doc = json!({
        "user": {"age": 25, "status": "active", "email": "ann@example.com"}
    });

    match rule.matches(&doc) {
        Ok(true) => println!("Result: match"),
        Ok(false) => println!("Result: no match"),
        Err(err) => println!("Evaluation failed: {err}"),
    }
}
