use colored::Colorize as _;
use rollup_deployer_cli::{deploy::deploy, env_var::EnvVar, error::CliError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();
    dotenvy::dotenv().ok();

    if let Err(e) = main_process().await {
        eprintln!("{}", e.to_string().red());
        std::process::exit(1);
    }
    Ok(())
}

async fn main_process() -> Result<(), CliError> {
    let env = envy::from_env::<EnvVar>()?;
    deploy(&env).await?;
    Ok(())
}
