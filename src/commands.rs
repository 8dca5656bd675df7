//! One struct per `ticcmd` operation. Each command knows its flag and how
//! to format its arguments; nothing here talks to the tool itself.

pub trait Command {
    fn flag(&self) -> &'static str;

    fn args(&self) -> Vec<String> {
        Vec::new()
    }
}

macro_rules! plain_flag {
    ($flag:literal) => {
        fn flag(&self) -> &'static str {
            $flag
        }
    };
}

macro_rules! valued_flag {
    ($flag:literal, $field:ident) => {
        plain_flag!($flag);

        fn args(&self) -> Vec<String> {
            vec![self.$field.to_string()]
        }
    };
}

/// Flattens a command into the argument list handed to the tool.
pub fn encode_command<C: Command + ?Sized>(cmd: &C) -> Vec<String> {
    let mut encoded = vec![cmd.flag().to_string()];
    encoded.extend(cmd.args());
    encoded
}

pub struct Energize;
impl Command for Energize {
    plain_flag!("--energize");
}

pub struct Deenergize;
impl Command for Deenergize {
    plain_flag!("--deenergize");
}

pub struct ExitSafeStart;
impl Command for ExitSafeStart {
    plain_flag!("--exit-safe-start");
}

pub struct EnterSafeStart;
impl Command for EnterSafeStart {
    plain_flag!("--enter-safe-start");
}

/// Target position in microsteps.
pub struct SetTargetPosition {
    pub position: i32,
}
impl Command for SetTargetPosition {
    valued_flag!("--position", position);
}

/// Target velocity in microsteps per 10,000 s. Negative values run in reverse.
pub struct SetTargetVelocity {
    pub velocity: i32,
}
impl Command for SetTargetVelocity {
    valued_flag!("--velocity", velocity);
}

pub struct HaltAndSetPosition {
    pub position: i32,
}
impl Command for HaltAndSetPosition {
    valued_flag!("--halt-and-set-position", position);
}

pub struct HaltAndHold;
impl Command for HaltAndHold {
    plain_flag!("--halt-and-hold");
}

/// Direction used by the homing procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeDirection {
    Forward,
    Reverse,
}

impl HomeDirection {
    fn token(&self) -> &'static str {
        match self {
            HomeDirection::Forward => "fwd",
            HomeDirection::Reverse => "rev",
        }
    }
}

pub struct Home {
    pub direction: HomeDirection,
}
impl Command for Home {
    plain_flag!("--home");

    fn args(&self) -> Vec<String> {
        vec![self.direction.token().to_string()]
    }
}

pub struct ResetCommandTimeout;
impl Command for ResetCommandTimeout {
    plain_flag!("--reset-command-timeout");
}

pub struct Reset;
impl Command for Reset {
    plain_flag!("--reset");
}

pub struct SetMaxSpeed {
    pub speed: u32,
}
impl Command for SetMaxSpeed {
    valued_flag!("--max-speed", speed);
}

pub struct SetStartingSpeed {
    pub speed: u32,
}
impl Command for SetStartingSpeed {
    valued_flag!("--starting-speed", speed);
}

pub struct SetMaxAccel {
    pub accel: u32,
}
impl Command for SetMaxAccel {
    valued_flag!("--max-accel", accel);
}

/// Uses ticcmd's own `--max-decel` flag. Sending `--max-accel` here would
/// change the acceleration limit and leave deceleration untouched.
pub struct SetMaxDecel {
    pub decel: u32,
}
impl Command for SetMaxDecel {
    valued_flag!("--max-decel", decel);
}

/// Step mode as the ordinal of a [`crate::StepSize`].
pub struct SetStepMode {
    pub mode: u8,
}
impl Command for SetStepMode {
    valued_flag!("--step-mode", mode);
}

pub struct GetStatus;
impl Command for GetStatus {
    plain_flag!("--status");

    fn args(&self) -> Vec<String> {
        vec!["--full".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_commands_have_no_arguments() {
        assert_eq!(encode_command(&Energize), ["--energize"]);
        assert_eq!(encode_command(&HaltAndHold), ["--halt-and-hold"]);
        assert_eq!(
            encode_command(&ResetCommandTimeout),
            ["--reset-command-timeout"]
        );
    }

    #[test]
    fn numeric_arguments_are_decimal() {
        assert_eq!(
            encode_command(&SetTargetVelocity { velocity: -10000 }),
            ["--velocity", "-10000"]
        );
        assert_eq!(
            encode_command(&SetMaxSpeed { speed: 500_000_000 }),
            ["--max-speed", "500000000"]
        );
        assert_eq!(
            encode_command(&SetStepMode { mode: 3 }),
            ["--step-mode", "3"]
        );
    }

    #[test]
    fn deceleration_has_its_own_flag() {
        assert_eq!(
            encode_command(&SetMaxDecel { decel: 200 }),
            ["--max-decel", "200"]
        );
    }

    #[test]
    fn home_direction_tokens() {
        let fwd = Home {
            direction: HomeDirection::Forward,
        };
        let rev = Home {
            direction: HomeDirection::Reverse,
        };
        assert_eq!(encode_command(&fwd), ["--home", "fwd"]);
        assert_eq!(encode_command(&rev), ["--home", "rev"]);
    }

    #[test]
    fn status_requests_full_dump() {
        assert_eq!(encode_command(&GetStatus), ["--status", "--full"]);
    }
}
