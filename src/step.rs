use serde::{Deserialize, Serialize};

/// Microstepping granularity, from full steps down to 1/256.
///
/// The discriminant is the ordinal sent to the Tic with `--step-mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum StepSize {
    Full = 0,
    Half = 1,
    Quarter = 2,
    Eighth = 3,
    Sixteenth = 4,
    ThirtySecond = 5,
    SixtyFourth = 6,
    OneTwentyEighth = 7,
    TwoFiftySixth = 8,
}

impl StepSize {
    pub const MIN: StepSize = StepSize::Full;
    pub const MAX: StepSize = StepSize::TwoFiftySixth;

    pub const ALL: [StepSize; 9] = [
        StepSize::Full,
        StepSize::Half,
        StepSize::Quarter,
        StepSize::Eighth,
        StepSize::Sixteenth,
        StepSize::ThirtySecond,
        StepSize::SixtyFourth,
        StepSize::OneTwentyEighth,
        StepSize::TwoFiftySixth,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// `None` for anything outside `0..=8`.
    pub fn from_ordinal(ordinal: i32) -> Option<StepSize> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Microsteps per full step.
    pub fn microsteps(self) -> u16 {
        1 << self.ordinal()
    }

    /// The next finer step size, if any.
    pub fn finer(self) -> Option<StepSize> {
        Self::from_ordinal(i32::from(self.ordinal()) + 1)
    }

    /// The next coarser step size, if any.
    pub fn coarser(self) -> Option<StepSize> {
        Self::from_ordinal(i32::from(self.ordinal()) - 1)
    }
}
