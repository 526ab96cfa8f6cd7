use std::sync::Arc;
use std::thread;

use jsonrules::{path, Expression, Rule};
use serde_json::json;

fn main() {
    let rule = Arc::new(Rule::new(
        Expression::and([
            path("$.user.age")
                .greater_than_equals(18)
                .expect("valid rule"),
            path("$.user.status").equals("active").expect("valid rule"),
        ])
        .expect("valid rule"),
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rule = Arc::clone(&rule);
            thread::spawn(move || {
                let doc = json!({"user": {"age": 16 + i, "status": "active"}});
                let result = rule.matches(&doc);
                println!("Thread {i}: {result:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
