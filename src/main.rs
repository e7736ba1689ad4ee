use std::process::ExitCode;

use clap::Parser;
use codecards::{
    composer::{
        build_all,
        check_all,
        compiler_for,
    },
    BuildConfig,
    CardError,
};
use tracing::{
    error,
    info,
};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{
    Cli,
    Commands,
};

fn run(cli: &Cli) -> Result<(), CardError> {
    let config = BuildConfig::load(&cli.root, cli.config.as_deref())?;
    let compiler = compiler_for(&config);

    match cli.command {
        Commands::Build => {
            build_all(&config, compiler.as_ref())?;
        }
        Commands::Check => {
            for document in check_all(&config, compiler.as_ref())? {
                info!(
                    "{} side OK ({} bytes) -> {}",
                    document.side,
                    document.content.len(),
                    document.output_path.display()
                );
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
