use std::sync::Arc;
use std::thread;

use jsonrules::{path, Expression, PreOperation, Rule};
use serde_json::json;

#[test]
fn evaluate_across_threads() {
    let rule = Arc::new(Rule::new(
        Expression::and([
            path("$.user.age").greater_than_equals(18).unwrap(),
            path("$.user.status").in_values(["active", "trial"]).unwrap(),
            Expression::not(path("$.user.banned").equals(true).unwrap()).unwrap(),
            path("$.user.email")
                .preoperation(PreOperation::sub_str_after("@"))
                .not_in(["blocked.example"])
                .unwrap(),
        ])
        .unwrap(),
    ));

    let mut handles = vec![];

    // Thread 1: adult, active, not banned -> match
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || {
        let doc = json!({"user": {
            "age": 25, "status": "active", "banned": false, "email": "ann@example.com"
        }});
        r.matches(&doc).unwrap()
    }));

    // Thread 2: banned user -> no match
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || {
        let doc = json!({"user": {
            "age": 30, "status": "active", "banned": true, "email": "bo@example.com"
        }});
        r.matches(&doc).unwrap()
    }));

    // Thread 3: underage -> no match
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || {
        let doc = json!({"user": {
            "age": 15, "status": "trial", "email": "cy@example.com"
        }});
        r.matches(&doc).unwrap()
    }));

    // Thread 4: blocked domain -> no match
    let r = Arc::clone(&rule);
    handles.push(thread::spawn(move || {
        let doc = json!({"user": {
            "age": 40, "status": "trial", "email": "di@blocked.example"
        }});
        r.matches(&doc).unwrap()
    }));

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, false, false, false]);
}

#[test]
fn many_threads_same_document() {
    let rule = Arc::new(
        Rule::create(r#"{"type":"contains_any","path":"$.tags","values":["a","z"]}"#).unwrap(),
    );
    let doc = Arc::new(json!({"tags": ["x", "y", "z"]}));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let rule = Arc::clone(&rule);
            let doc = Arc::clone(&doc);
            thread::spawn(move || (0..100).all(|_| rule.matches(&doc).unwrap()))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn rule_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Rule>();
    assert_send_sync::<Expression>();
}
