//! Convenience wrapper for driving a Pololu Tic stepper motor controller
//! through the `ticcmd` command line tool.

mod commands;
mod config;
mod controller;
mod device;
mod guard;
mod runner;
mod step;

pub use crate::commands::HomeDirection;
pub use crate::config::ControllerConfig;
pub use crate::controller::TicController;
pub use crate::device::TicDevice;
pub use crate::guard::{with_power_up_safe_start, PowerUpSafeStart};
pub use crate::runner::{CommandRunner, ExternalToolError, Output, TicCmd};
pub use crate::step::StepSize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("external tool error: {0}")]
    ExternalTool(#[from] ExternalToolError),
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("min_position {min} must be lower than max_position {max}")]
    InvalidBounds { min: i32, max: i32 },
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
