//! This crate implements a tenant-aware hello world lambda
//! for an API Gateway proxy integration. Next to the greeting
//! it returns diagnostics about the execution environment
//! serving the request, which makes environment reuse by the
//! lambda platform observable from the outside.
//!
//! # Execution environments
//!
//! AWS Lambda keeps execution environments alive between
//! invocations to avoid cold starts. State created at startup
//! is therefore shared by every invocation served by the same
//! environment, while separate environments never share
//! anything. This crate models that split explicitly with the
//! [`Environment`] type: it is constructed exactly once when
//! the runtime starts and passed by reference into every
//! invocation. It carries a random identifier, stable for the
//! environment's lifetime, and an invocation counter which
//! starts at zero and is never reset. Neither value is durable;
//! both are lost when the platform tears the environment down.
//!
//! The counter is atomic. Most deployment configurations never
//! run two invocations in one environment at the same time, but
//! that exclusivity is a platform detail, not a guarantee the
//! increment should depend on.
//!
//! # Handlers
//!
//! The lambda logic lives behind the [`Handler`] trait, which is
//! used either in the [`exec`] or [`exec_tokio`] function:
//!
//! ```no_run
//! struct Greeter;
//!
//! #[async_trait::async_trait]
//! impl hello_tenant_lambda::Handler for Greeter {
//!     async fn setup() -> anyhow::Result<()> {
//!         // Setup logging to make sure that errors are printed
//!         Ok(())
//!     }
//!
//!     async fn handle<'a>(
//!         environment: &'a hello_tenant_lambda::Environment,
//!         event: hello_tenant_lambda::gateway::Event,
//!         context: &'a hello_tenant_lambda::gateway::InvocationContext,
//!     ) -> anyhow::Result<hello_tenant_lambda::gateway::Response> {
//!         let count = environment.record_invocation();
//!         hello_tenant_lambda::gateway::Response::ok(&serde_json::json!({
//!             "count": count,
//!         }))
//!     }
//! }
//!
//! pub fn main() -> anyhow::Result<()> {
//!     hello_tenant_lambda::exec_tokio::<Greeter>()
//! }
//! ```
//!
//! The shipped implementation is [`HelloHandler`], wired up by
//! the `bootstrap` binary.
//!
//! # Failure containment
//!
//! A handler returns `anyhow::Result<Response>` and may fail at
//! any point. The invocation boundary catches every error,
//! writes it to the log and answers with a fixed `500` response
//! whose body never carries error details. Callers can not
//! observe an unhandled failure, and the environment keeps
//! running.
//!
//! # Local testing
//!
//! [`exec_test`] runs a sequence of invocations against one
//! fresh environment without a lambda runtime, returning the
//! responses for assertions. See the tests of this crate for
//! usage.

#![warn(
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    non_ascii_idents,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unstable_features,
    unused_crate_dependencies,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    variant_size_differences
)]
#![warn(
    clippy::correctness,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cargo,
    clippy::nursery
)]
#![allow(clippy::multiple_crate_versions, clippy::future_not_send)]

pub mod gateway;
mod hello;

pub use hello::HelloHandler;

use gateway::{Event, InvocationContext, Response};

/// State owned by one execution environment, created once at
/// runtime startup and shared by every invocation the
/// environment serves.
///
/// The identifier is generated at construction and stays stable
/// until the platform discards the environment. It legitimately
/// repeats across requests when the platform reuses the
/// environment, and differs between environments running in
/// parallel.
#[derive(Debug)]
pub struct Environment {
    id: String,
    invocations: std::sync::atomic::AtomicU64,
}

impl Environment {
    /// Creates a fresh environment with a random identifier and
    /// an invocation count of zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            invocations: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Identifier of this environment, stable for its lifetime.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Counts one invocation and returns the new total. The
    /// first invocation of an environment returns `1`.
    ///
    /// The counter guards no other state, so relaxed ordering
    /// is sufficient even with concurrent invocations.
    pub fn record_invocation(&self) -> u64 {
        self.invocations
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            + 1
    }

    /// Number of invocations recorded so far.
    #[must_use]
    pub fn invocations(&self) -> u64 {
        self.invocations.load(std::sync::atomic::Ordering::Relaxed)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Defines the logic which is executed every time the lambda
/// is invoked.
///
/// Implementations do not hold instance state. Everything that
/// must survive between invocations belongs into the
/// [`Environment`] handed to [`Handler::handle`], everything
/// else is per-invocation.
#[async_trait::async_trait]
pub trait Handler {
    /// Invoked only once before lambda runtime start. Does not get
    /// called on each lambda invocation. Can be used to setup
    /// logging and other global services, but should be short as
    /// it delays lambda startup.
    async fn setup() -> anyhow::Result<()>;

    /// Invoked for every lambda invocation. Data in `environment`
    /// is persisted between invocations as long as they are
    /// running in the same execution environment.
    ///
    /// More Info: <https://docs.aws.amazon.com/lambda/latest/dg/runtimes-context.html>
    async fn handle<'a>(
        environment: &'a Environment,
        event: Event,
        context: &'a InvocationContext,
    ) -> anyhow::Result<Response>;
}

/// Lambda entrypoint. This function sets up a multi-thread
/// tokio runtime and executes [`exec`]. If you already have
/// your own runtime, use the [`exec`] function.
pub fn exec_tokio<Run: Handler>() -> anyhow::Result<()> {
    use anyhow::Context;
    use tokio::runtime::Builder;

    Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Unable to build tokio runtime")?
        .block_on(exec::<Run>())
}

/// Lambda entrypoint. This function requires a running tokio
/// runtime. Alternatively use [`exec_tokio`] which creates one.
///
/// The [`Environment`] is constructed here, before the first
/// invocation, and lives until the runtime shuts down.
pub async fn exec<Run: Handler>() -> anyhow::Result<()> {
    use lambda_runtime::{service_fn, LambdaEvent};

    Run::setup().await?;
    log::info!("Starting lambda runtime");
    let environment = Environment::new();
    let environment_ref = &environment;
    lambda_runtime::run(service_fn(
        move |request: LambdaEvent<serde_json::Value>| async move {
            let context = InvocationContext::from(&request.context);
            Ok::<_, lambda_runtime::Error>(
                invoke::<Run>(environment_ref, request.payload, &context).await,
            )
        },
    ))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

/// Boundary around one invocation. Whatever fails inside,
/// including deserializing the raw payload, is logged and
/// mapped to the fixed error response. This function never
/// returns an error.
async fn invoke<Run: Handler>(
    environment: &Environment,
    payload: serde_json::Value,
    context: &InvocationContext,
) -> Response {
    use anyhow::Context;

    let res = match serde_json::from_value::<Event>(payload)
        .context("Unable to deserialize invocation event")
    {
        Ok(event) => Run::handle(environment, event, context).await,
        Err(err) => Err(err),
    };
    log::info!("Completed lambda invocation");
    match res {
        Ok(response) => response,
        Err(err) => {
            log::error!("{:?}", err);
            Response::internal_error()
        }
    }
}

/// `TestData` which can be used to test lambda invocations
/// locally in combination with [`exec_test`].
#[derive(serde::Deserialize, Clone, Debug)]
pub struct TestData {
    invocations: Vec<TestInvocation>,
}

/// A single test invocation consisting of the raw event payload
/// and an optional invocation context.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct TestInvocation {
    event: serde_json::Value,
    #[serde(default)]
    context: InvocationContext,
}

/// Lambda entrypoint for testing one or multiple invocations
/// locally, without a lambda runtime.
///
/// All invocations of one call run against the same fresh
/// [`Environment`], so a call models one execution environment
/// lifetime. Responses are returned in invocation order for
/// assertions.
pub fn exec_test<Run: Handler>(test_data: &str) -> anyhow::Result<Vec<Response>> {
    use anyhow::Context;
    use tokio::runtime::Builder;

    Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Unable to build tokio runtime")?
        .block_on(async {
            Run::setup().await?;
            log::info!("Starting lambda test runtime");
            let test_data: TestData =
                serde_json::from_str(test_data).context("Unable to deserialize test_data")?;
            let environment = Environment::new();
            let mut responses = Vec::with_capacity(test_data.invocations.len());
            for (i, invocation) in test_data.invocations.into_iter().enumerate() {
                log::info!("Invocation: {}", i);
                let response =
                    invoke::<Run>(&environment, invocation.event, &invocation.context).await;
                log::info!("{:?}", response);
                responses.push(response);
            }
            Ok(responses)
        })
}
