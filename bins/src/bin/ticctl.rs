use clap::{Parser, Subcommand, ValueEnum};
use pololu_tic::{ControllerConfig, HomeDirection, StepSize, TicCmd, TicController};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Drive a Pololu Tic stepper controller through `ticcmd`
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML file with controller settings; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the ticcmd executable
    #[arg(long, default_value = "ticcmd")]
    program: PathBuf,

    /// Serial number of the Tic to address
    #[arg(short, long)]
    serial: Option<String>,

    /// Log the commands without running ticcmd
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Move up by the configured move size
    Up {
        #[arg(short, long, default_value_t = 1)]
        repeat: u32,
    },
    /// Move down by the configured move size
    Down {
        #[arg(short, long, default_value_t = 1)]
        repeat: u32,
    },
    /// Move to an absolute position
    Move {
        #[arg(allow_negative_numbers = true)]
        position: i32,
    },
    /// Run continuously at the default velocity, or at the given one
    Run {
        #[arg(value_enum)]
        direction: Direction,
        #[arg(long)]
        velocity: Option<i32>,
    },
    /// Change the step size
    Step {
        #[arg(value_enum)]
        change: StepChange,
    },
    /// Start the homing procedure
    Home {
        #[arg(value_enum, default_value_t = Direction::Up)]
        direction: Direction,
    },
    /// Stop abruptly and hold
    Halt,
    /// Reload settings from non-volatile memory
    Reset,
    /// Print the full status dump
    Status,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StepChange {
    Finer,
    Coarser,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => ControllerConfig::load(path)?,
        None => ControllerConfig::default(),
    };
    let mut runner = TicCmd::new(&args.program).with_dry_run(args.dry_run);
    if let Some(serial) = args.serial {
        runner = runner.with_serial(serial);
    }
    let mut controller = TicController::new(runner, config)?;

    match args.action {
        Action::Up { repeat } => {
            for _ in 0..repeat {
                if controller.move_up()?.is_none() {
                    info!("upper bound reached");
                    break;
                }
            }
            println!("{}", controller.position());
        }
        Action::Down { repeat } => {
            for _ in 0..repeat {
                if controller.move_down()?.is_none() {
                    info!("lower bound reached");
                    break;
                }
            }
            println!("{}", controller.position());
        }
        Action::Move { position } => {
            if controller.move_to(position)?.is_none() {
                anyhow::bail!(
                    "position {position} is outside ({}, {})",
                    config.min_position,
                    config.max_position
                );
            }
        }
        Action::Run {
            direction,
            velocity,
        } => {
            let velocity = velocity.unwrap_or(config.velocity);
            match direction {
                Direction::Up => controller.move_continuous(velocity)?,
                Direction::Down => controller.move_continuous(velocity.saturating_neg())?,
            };
        }
        Action::Step { change } => {
            let sent = match change {
                StepChange::Finer => controller.increase_step_size()?,
                StepChange::Coarser => controller.decrease_step_size()?,
            };
            if sent.is_none() {
                info!("step size left at {:?}", controller.step_size());
            }
            print_step_size(controller.step_size());
        }
        Action::Home { direction } => {
            let direction = match direction {
                Direction::Up => HomeDirection::Forward,
                Direction::Down => HomeDirection::Reverse,
            };
            controller.device_mut().home(direction)?;
        }
        Action::Halt => {
            controller.device_mut().halt_and_hold()?;
        }
        Action::Reset => {
            controller.device_mut().reset()?;
        }
        Action::Status => {
            let output = controller.status()?;
            print!("{}", String::from_utf8_lossy(&output));
        }
    }
    Ok(())
}

fn print_step_size(size: StepSize) {
    println!("{size:?} (1/{})", size.microsteps());
}

fn setup_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
