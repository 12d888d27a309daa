use hello_tenant_lambda::gateway::{Event, InvocationContext, Response};
use hello_tenant_lambda::{Environment, Handler};

struct FailingHandler;

#[async_trait::async_trait]
impl Handler for FailingHandler {
    async fn setup() -> anyhow::Result<()> {
        Ok(())
    }

    async fn handle<'a>(
        _environment: &'a Environment,
        _event: Event,
        _context: &'a InvocationContext,
    ) -> anyhow::Result<Response> {
        anyhow::bail!("induced failure")
    }
}

#[test]
fn test_handler_failure_is_contained() {
    let responses =
        hello_tenant_lambda::exec_test::<FailingHandler>(r#"{"invocations":[{"event":{}}]}"#)
            .expect("Unable to execute lambda");
    assert_eq!(responses.len(), 1);
    assert_eq!(
        responses[0],
        Response {
            status_code: 500,
            body: r#"{"message":"some error happened"}"#.to_owned(),
        }
    );
}

#[test]
fn test_malformed_event_is_contained() {
    let responses = hello_tenant_lambda::exec_test::<hello_tenant_lambda::HelloHandler>(
        r#"{"invocations":[{"event":"not an object"}]}"#,
    )
    .expect("Unable to execute lambda");
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].status_code, 500);
    assert_eq!(responses[0].body, r#"{"message":"some error happened"}"#);
}
