//! The hello world handler shipped by this crate.

use crate::gateway::{Event, InvocationContext, Response};
use crate::Environment;

/// Success response body.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Greeting<'a> {
    message: &'static str,
    /// Omitted from the JSON when no tenant id was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant_id: Option<&'a str>,
    execution_environment_id: &'a str,
    invocation_count: u64,
}

/// Handler returning a greeting together with the tenant id of
/// the caller and diagnostics about the execution environment
/// serving the request.
#[derive(Clone, Copy, Debug)]
pub struct HelloHandler;

#[async_trait::async_trait]
impl crate::Handler for HelloHandler {
    async fn setup() -> anyhow::Result<()> {
        // Init fails when a logger is already registered, which
        // happens with multiple test environments in one process.
        if simple_logger::SimpleLogger::new()
            .with_level(log::LevelFilter::Info)
            .init()
            .is_err()
        {
            log::debug!("Logger already initialized");
        }
        Ok(())
    }

    async fn handle<'a>(
        environment: &'a Environment,
        event: Event,
        context: &'a InvocationContext,
    ) -> anyhow::Result<Response> {
        let invocation_count = environment.record_invocation();
        let tenant_id = context.tenant_id.as_deref();

        log::info!("Event: {:?}", event);
        log::info!("Context: {:?}", context);
        log::info!("Tenant ID: {:?}", tenant_id);
        log::info!("Execution Environment ID: {}", environment.id());
        log::info!("Invocation Count: {}", invocation_count);

        Response::ok(&Greeting {
            message: "hello world",
            tenant_id,
            execution_environment_id: environment.id(),
            invocation_count,
        })
    }
}
