use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    let cli = otw_archive::cli::Cli::parse();
    otw_archive::logging::init(cli.verbose).context("init logging")?;
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        otw_archive::cli::Command::Ping => {
            otw_archive::commands::ping(cli.archive)
                .await
                .context("ping")?;
        }
        otw_archive::cli::Command::Listing(args) => {
            otw_archive::commands::listing(cli.archive, args)
                .await
                .context("listing")?;
        }
        otw_archive::cli::Command::Work(args) => {
            otw_archive::commands::work(cli.archive, args)
                .await
                .context("work")?;
        }
    }

    Ok(())
}
