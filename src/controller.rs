use tracing::debug;

use crate::config::ControllerConfig;
use crate::device::TicDevice;
use crate::guard::with_power_up_safe_start;
use crate::runner::{CommandRunner, Output};
use crate::step::StepSize;
use crate::Result;

/// Tracks the commanded position and step size of one Tic and wraps each
/// motion command in the power-up / safe-start bracket.
///
/// Requests outside the configured bounds are ignored: they return
/// `Ok(None)`, leave the state alone and send nothing.
#[derive(Debug)]
pub struct TicController<R> {
    device: TicDevice<R>,
    config: ControllerConfig,
    position: i32,
    step_size: StepSize,
}

impl<R: CommandRunner> TicController<R> {
    pub fn new(runner: R, config: ControllerConfig) -> Result<TicController<R>> {
        config.validate()?;
        Ok(TicController {
            device: TicDevice::new(runner),
            config,
            position: 0,
            step_size: config.step_size,
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Last commanded position. Not read back from the hardware.
    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn step_size(&self) -> StepSize {
        self.step_size
    }

    pub fn device(&self) -> &TicDevice<R> {
        &self.device
    }

    /// Direct access for housekeeping commands (homing, halts, limits).
    pub fn device_mut(&mut self) -> &mut TicDevice<R> {
        &mut self.device
    }

    pub fn move_up(&mut self) -> Result<Option<Output>> {
        match self.position.checked_add(self.config.move_size) {
            Some(new_position) => self.move_to(new_position),
            None => {
                debug!(position = self.position, "move up would overflow, ignoring");
                Ok(None)
            }
        }
    }

    pub fn move_down(&mut self) -> Result<Option<Output>> {
        match self.position.checked_sub(self.config.move_size) {
            Some(new_position) => self.move_to(new_position),
            None => {
                debug!(position = self.position, "move down would overflow, ignoring");
                Ok(None)
            }
        }
    }

    /// Commands an absolute position if it lies strictly inside the bounds.
    ///
    /// The stored position is updated before the command is sent, so a
    /// failing tool leaves it at the requested value.
    pub fn move_to(&mut self, new_position: i32) -> Result<Option<Output>> {
        if !self.config.in_bounds(new_position) {
            debug!(
                new_position,
                min = self.config.min_position,
                max = self.config.max_position,
                "position out of bounds, ignoring"
            );
            return Ok(None);
        }
        self.position = new_position;
        self.bracketed(|device| device.set_target_position(new_position))
            .map(Some)
    }

    pub fn move_up_continuous(&mut self) -> Result<Output> {
        self.move_continuous(self.config.velocity)
    }

    pub fn move_down_continuous(&mut self) -> Result<Output> {
        self.move_continuous(self.config.velocity.saturating_neg())
    }

    /// Starts moving at `velocity` microsteps per 10,000 s. The value is
    /// passed through unchecked.
    pub fn move_continuous(&mut self, velocity: i32) -> Result<Output> {
        self.bracketed(|device| device.set_target_velocity(velocity))
    }

    pub fn increase_step_size(&mut self) -> Result<Option<Output>> {
        match self.step_size.finer() {
            Some(size) => self.set_step_size(size),
            None => Ok(None),
        }
    }

    pub fn decrease_step_size(&mut self) -> Result<Option<Output>> {
        match self.step_size.coarser() {
            Some(size) => self.set_step_size(size),
            None => Ok(None),
        }
    }

    /// Only sizes strictly between [`StepSize::MIN`] and [`StepSize::MAX`]
    /// are accepted; full and 1/256 stepping cannot be selected here.
    pub fn set_step_size(&mut self, size: StepSize) -> Result<Option<Output>> {
        if !(StepSize::MIN < size && size < StepSize::MAX) {
            debug!(?size, "step size out of range, ignoring");
            return Ok(None);
        }
        self.step_size = size;
        self.device.set_step_mode(size.ordinal()).map(Some)
    }

    /// Raw `--status --full` output from the tool.
    pub fn status(&mut self) -> Result<Output> {
        self.device.get_data()
    }

    fn bracketed<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut TicDevice<R>) -> Result<T>,
    {
        with_power_up_safe_start(
            &mut self.device,
            self.config.power_up_down,
            self.config.safe_start,
            f,
        )
    }
}
