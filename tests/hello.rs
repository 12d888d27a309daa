#[test]
fn test_hello_lambda() {
    let test_data = include_str!("./hello.json");
    let responses =
        hello_tenant_lambda::exec_test::<hello_tenant_lambda::HelloHandler>(test_data)
            .expect("Unable to execute lambda");
    assert_eq!(responses.len(), 2);

    let first = &responses[0];
    assert_eq!(first.status_code, 200);
    assert!(first.body.contains(r#""message":"hello world""#));
    assert!(first.body.contains(r#""tenantId":"tenant-42""#));
    assert!(first.body.contains(r#""invocationCount":1"#));

    let second = &responses[1];
    assert_eq!(second.status_code, 200);
    assert!(second.body.contains(r#""message":"hello world""#));
    assert!(!second.body.contains("tenantId"));
    assert!(second.body.contains(r#""invocationCount":2"#));
}
