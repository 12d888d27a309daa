//! Lambda entrypoint binary. Named `bootstrap` as required for
//! custom runtime deployments.

fn main() -> anyhow::Result<()> {
    hello_tenant_lambda::exec_tokio::<hello_tenant_lambda::HelloHandler>()
}
