use clap::Parser;
use log::*;

use relnotes::{
    Result,
    cli::{Args, Command},
    config::{Config, Inputs, Settings},
    forge::{github::Github, manager::ForgeManager},
    logging::{self, LogConfig},
    orchestrator::Orchestrator,
    validator::validate_inputs,
};

async fn run(args: &Args) -> Result<()> {
    let config = Config::load(&args.config).await?;
    let inputs = Inputs::resolve(args, &config);

    validate_inputs(&inputs).await?;

    let settings = Settings::from_inputs(&inputs, &config)?;

    if settings.dry_run {
        warn!("dry run enabled: no files or releases will be written");
    }

    let remote = args.get_remote(settings.dry_run)?;
    info!("repository: {}", remote.path());

    let forge = ForgeManager::new(Box::new(Github::new(remote)?), settings.retry);
    let orchestrator = Orchestrator::new(settings, forge);

    let outputs = match args.command() {
        Command::Generate => orchestrator.generate().await?,
        Command::UpdateRelease => orchestrator.update_release().await?,
    };

    outputs.report().await
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    logging::init(&LogConfig::from_flags(args.debug))?;

    if let Err(err) = run(&args).await {
        error!("{err}");
        return Err(err);
    }

    Ok(())
}
