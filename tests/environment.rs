use hello_tenant_lambda::gateway::Response;

fn body_json(response: &Response) -> serde_json::Value {
    serde_json::from_str(&response.body).expect("Unable to deserialize response body")
}

fn environment_id(response: &Response) -> String {
    body_json(response)["executionEnvironmentId"]
        .as_str()
        .expect("Missing executionEnvironmentId")
        .to_owned()
}

#[test]
fn test_environment_reuse_and_isolation() {
    let test_data = include_str!("./environment.json");
    // Each exec_test call models one execution environment lifetime
    let first = hello_tenant_lambda::exec_test::<hello_tenant_lambda::HelloHandler>(test_data)
        .expect("Unable to execute lambda");
    let second = hello_tenant_lambda::exec_test::<hello_tenant_lambda::HelloHandler>(test_data)
        .expect("Unable to execute lambda");

    for responses in [&first, &second] {
        assert_eq!(responses.len(), 3);
        for (i, response) in responses.iter().enumerate() {
            assert_eq!(response.status_code, 200);
            let body = body_json(response);
            assert_eq!(body["invocationCount"].as_u64(), Some(i as u64 + 1));
            assert_eq!(environment_id(response), environment_id(&responses[0]));
        }
    }

    assert_ne!(environment_id(&first[0]), environment_id(&second[0]));
}
