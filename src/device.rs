use crate::commands::{
    encode_command, Command, Deenergize, Energize, EnterSafeStart, ExitSafeStart, GetStatus,
    HaltAndHold, HaltAndSetPosition, Home, HomeDirection, Reset, ResetCommandTimeout,
    SetMaxAccel, SetMaxDecel, SetMaxSpeed, SetStartingSpeed, SetStepMode, SetTargetPosition,
    SetTargetVelocity,
};
use crate::runner::{CommandRunner, Output};
use crate::Result;

/// Low-level access to a single Tic. Every method issues exactly one
/// `ticcmd` invocation and hands back whatever the tool printed.
#[derive(Debug)]
pub struct TicDevice<R> {
    runner: R,
}

impl<R: CommandRunner> TicDevice<R> {
    pub fn new(runner: R) -> TicDevice<R> {
        TicDevice { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Enables the stepper driver, clearing the "intentionally de-energized" error.
    pub fn energize(&mut self) -> Result<Output> {
        self.send(&Energize)
    }

    /// Disables the stepper driver. The Tic marks its position as uncertain.
    pub fn deenergize(&mut self) -> Result<Output> {
        self.send(&Deenergize)
    }

    /// Clears the safe start violation for 200 ms.
    pub fn exit_safe_start(&mut self) -> Result<Output> {
        self.send(&ExitSafeStart)
    }

    pub fn enter_safe_start(&mut self) -> Result<Output> {
        self.send(&EnterSafeStart)
    }

    /// Absolute target position, in microsteps.
    pub fn set_target_position(&mut self, position: i32) -> Result<Output> {
        self.send(&SetTargetPosition { position })
    }

    /// Target velocity in microsteps per 10,000 s.
    pub fn set_target_velocity(&mut self, velocity: i32) -> Result<Output> {
        self.send(&SetTargetVelocity { velocity })
    }

    /// Stops abruptly, ignoring the deceleration limit, and redefines the
    /// current position.
    pub fn halt_and_set_position(&mut self, position: i32) -> Result<Output> {
        self.send(&HaltAndSetPosition { position })
    }

    pub fn halt_and_hold(&mut self) -> Result<Output> {
        self.send(&HaltAndHold)
    }

    pub fn home(&mut self, direction: HomeDirection) -> Result<Output> {
        self.send(&Home { direction })
    }

    pub fn reset_command_timeout(&mut self) -> Result<Output> {
        self.send(&ResetCommandTimeout)
    }

    /// Reloads settings from non-volatile memory and halts the motor.
    pub fn reset(&mut self) -> Result<Output> {
        self.send(&Reset)
    }

    pub fn set_max_velocity(&mut self, velocity: u32) -> Result<Output> {
        self.send(&SetMaxSpeed { speed: velocity })
    }

    pub fn set_starting_velocity(&mut self, velocity: u32) -> Result<Output> {
        self.send(&SetStartingSpeed { speed: velocity })
    }

    pub fn set_max_acceleration(&mut self, accel: u32) -> Result<Output> {
        self.send(&SetMaxAccel { accel })
    }

    pub fn set_max_deceleration(&mut self, decel: u32) -> Result<Output> {
        self.send(&SetMaxDecel { decel })
    }

    /// No range check here; callers decide which ordinals are acceptable.
    pub fn set_step_mode(&mut self, mode: u8) -> Result<Output> {
        self.send(&SetStepMode { mode })
    }

    /// Raw `--status --full` dump.
    pub fn get_data(&mut self) -> Result<Output> {
        self.send(&GetStatus)
    }

    fn send<C: Command>(&mut self, cmd: &C) -> Result<Output> {
        let args = encode_command(cmd);
        let output = self.runner.run(&args)?;
        Ok(output)
    }
}
