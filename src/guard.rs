//! Power-up / safe-start bracket around motion commands.
//!
//! On entry the driver is energized and safe start is exited (each only if
//! enabled). When the bracket ends, whether normally, through an error, or
//! through a panic unwinding past it, safe start is re-entered and then the
//! driver de-energized, in exactly the reverse order.

use std::ops::{Deref, DerefMut};
use tracing::warn;

use crate::device::TicDevice;
use crate::runner::CommandRunner;
use crate::{Error, Result};

pub struct PowerUpSafeStart<'a, R: CommandRunner> {
    device: &'a mut TicDevice<R>,
    energized: bool,
    safe_start_cleared: bool,
}

impl<'a, R: CommandRunner> PowerUpSafeStart<'a, R> {
    /// Each cleanup step is armed before its entry command goes out, so a
    /// failed entry still gets undone when the guard drops. This is stricter
    /// than a plain enter/exit pair, where a failing entry skips the exit
    /// entirely: a failed `--exit-safe-start` here is still followed by
    /// `--enter-safe-start` and `--deenergize`.
    pub fn enter(
        device: &'a mut TicDevice<R>,
        energize: bool,
        safe_start: bool,
    ) -> Result<PowerUpSafeStart<'a, R>> {
        let mut guard = PowerUpSafeStart {
            device,
            energized: false,
            safe_start_cleared: false,
        };
        if energize {
            guard.energized = true;
            guard.device.energize()?;
        }
        if safe_start {
            guard.safe_start_cleared = true;
            guard.device.exit_safe_start()?;
        }
        Ok(guard)
    }

    /// Runs the exit sequence now and reports the first failure. Dropping
    /// the guard does the same but can only log.
    pub fn release(mut self) -> Result {
        self.exit()
    }

    fn exit(&mut self) -> Result {
        let mut first_error: Option<Error> = None;
        if std::mem::take(&mut self.safe_start_cleared) {
            if let Err(e) = self.device.enter_safe_start() {
                first_error.get_or_insert(e);
            }
        }
        if std::mem::take(&mut self.energized) {
            if let Err(e) = self.device.deenergize() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<R: CommandRunner> Deref for PowerUpSafeStart<'_, R> {
    type Target = TicDevice<R>;

    fn deref(&self) -> &Self::Target {
        self.device
    }
}

impl<R: CommandRunner> DerefMut for PowerUpSafeStart<'_, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.device
    }
}

impl<R: CommandRunner> Drop for PowerUpSafeStart<'_, R> {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            warn!("failed to restore safe start / power state: {e}");
        }
    }
}

/// Runs `f` inside a [`PowerUpSafeStart`] bracket.
///
/// An error from `f` wins over an error from the exit sequence; the latter
/// is only returned when `f` succeeded.
pub fn with_power_up_safe_start<R, T, F>(
    device: &mut TicDevice<R>,
    energize: bool,
    safe_start: bool,
    f: F,
) -> Result<T>
where
    R: CommandRunner,
    F: FnOnce(&mut TicDevice<R>) -> Result<T>,
{
    let mut guard = PowerUpSafeStart::enter(device, energize, safe_start)?;
    let result = f(&mut *guard);
    let released = guard.release();
    match (result, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(cleanup)) => Err(cleanup),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup)) => {
            warn!("cleanup after failed command also failed: {cleanup}");
            Err(e)
        }
    }
}
