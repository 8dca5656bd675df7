use clap::Parser;
use pololu_tic::{ControllerConfig, TicCmd, TicController};
use tracing_subscriber::EnvFilter;

/// Moves a Tic up one increment, back down, then starts it running forward
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Actually run ticcmd instead of only logging the commands
    #[arg(long)]
    live: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let runner = TicCmd::default().with_dry_run(!args.live);
    let mut controller = TicController::new(runner, ControllerConfig::default())?;

    controller.move_up()?;
    println!("{}", controller.position());

    controller.move_down()?;
    println!("{}", controller.position());

    controller.move_up_continuous()?;
    Ok(())
}
