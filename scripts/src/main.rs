use clap::Parser;
use relay::{errors::ScriptError, registry::ContractRegistry};
use scripts::{cli::Cli, commands::ScriptContext, utils::setup_client};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let client = setup_client(&cli.priv_key, &cli.rpc_url).await?;
    let registry = ContractRegistry::load(&cli.config_path)?;
    let mode = cli.call_mode();

    let ctx = ScriptContext {
        client,
        registry,
        mode,
    };

    cli.command.run(&ctx).await
}
