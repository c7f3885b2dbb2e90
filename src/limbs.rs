//! Limb registry — static servo calibration tables.
//!
//! Each limb is a PCA9685 channel plus three pulse widths in PWM ticks.
//! Primary limbs are the leg-lift joints; secondary limbs are the mid-joints
//! that swing horizontally.  `primary[i]` and `secondary[i]` belong to the
//! same leg, and the index parity decides which half of the tripod the leg
//! walks with.
//!
//! Tables are immutable statics; nothing here mutates at runtime.

use crate::drivers::pca9685::{Channel, PwmCommand};

/// Legs on the robot (one primary and one secondary joint each).
pub const LIMB_COUNT: usize = 6;

/// Base servo travel limits, trimmed per joint below.
const SERVO_MAX: u16 = 475;
const SERVO_MIN: u16 = 100;
const TRIM: u16 = 30;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimbRole {
    /// Leg-lift joint (vertical).
    Primary,
    /// Mid joint (horizontal swing).
    Secondary,
}

/// Named servo positions within a joint's calibrated range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    /// Upper end of travel.  For a secondary joint this is full extension.
    Raised,
    Lowered,
    /// Resting mid position.
    Neutral,
}

/// Calibrated OFF-tick values for one joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseBounds {
    pub raised: u16,
    pub lowered: u16,
    pub neutral: u16,
}

impl PulseBounds {
    pub const fn ticks(&self, pose: Pose) -> u16 {
        match pose {
            Pose::Raised => self.raised,
            Pose::Lowered => self.lowered,
            Pose::Neutral => self.neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimbEntry {
    pub channel: Channel,
    pub bounds: PulseBounds,
}

impl LimbEntry {
    const fn new(channel: u8, raised: u16, lowered: u16, neutral: u16) -> Self {
        Self {
            channel: Channel::new(channel),
            bounds: PulseBounds {
                raised,
                lowered,
                neutral,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Reference calibration
// ---------------------------------------------------------------------------

pub static PRIMARY_LIMBS: [LimbEntry; LIMB_COUNT] = [
    LimbEntry::new(1, SERVO_MAX, SERVO_MIN - TRIM, 185),
    LimbEntry::new(4, SERVO_MAX + TRIM, SERVO_MIN, 300),
    LimbEntry::new(5, SERVO_MAX, SERVO_MIN - TRIM, 200),
    LimbEntry::new(7, SERVO_MAX, SERVO_MIN, 200),
    LimbEntry::new(15, SERVO_MAX + TRIM, SERVO_MIN, 310),
    LimbEntry::new(11, SERVO_MAX + TRIM, SERVO_MIN, 220),
];

pub static SECONDARY_LIMBS: [LimbEntry; LIMB_COUNT] = [
    LimbEntry::new(2, 300, 0, 220),
    LimbEntry::new(3, 270, 0, 220),
    LimbEntry::new(6, 270, 0, 220),
    LimbEntry::new(8, 270, 0, 120),
    LimbEntry::new(10, 250, 0, 280),
    LimbEntry::new(12, 110, 0, 180),
];

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Read-only view over a pair of calibration tables.
///
/// Indices are positions within a role's table.  An index `>= LIMB_COUNT`
/// is a programming error and panics.
#[derive(Debug, Clone, Copy)]
pub struct LimbRegistry {
    primary: &'static [LimbEntry; LIMB_COUNT],
    secondary: &'static [LimbEntry; LIMB_COUNT],
}

impl LimbRegistry {
    pub const fn new(
        primary: &'static [LimbEntry; LIMB_COUNT],
        secondary: &'static [LimbEntry; LIMB_COUNT],
    ) -> Self {
        Self { primary, secondary }
    }

    /// Registry over the robot's calibrated tables.
    pub fn reference() -> Self {
        Self::new(&PRIMARY_LIMBS, &SECONDARY_LIMBS)
    }

    pub fn table(&self, role: LimbRole) -> &'static [LimbEntry; LIMB_COUNT] {
        match role {
            LimbRole::Primary => self.primary,
            LimbRole::Secondary => self.secondary,
        }
    }

    pub fn len(&self, role: LimbRole) -> usize {
        self.table(role).len()
    }

    pub fn is_empty(&self, role: LimbRole) -> bool {
        self.table(role).is_empty()
    }

    #[track_caller]
    pub fn entry(&self, role: LimbRole, index: usize) -> &'static LimbEntry {
        &self.table(role)[index]
    }

    #[track_caller]
    pub fn channel_of(&self, role: LimbRole, index: usize) -> Channel {
        self.entry(role, index).channel
    }

    #[track_caller]
    pub fn raised(&self, role: LimbRole, index: usize) -> u16 {
        self.entry(role, index).bounds.raised
    }

    #[track_caller]
    pub fn lowered(&self, role: LimbRole, index: usize) -> u16 {
        self.entry(role, index).bounds.lowered
    }

    #[track_caller]
    pub fn neutral(&self, role: LimbRole, index: usize) -> u16 {
        self.entry(role, index).bounds.neutral
    }

    /// The PWM command that puts a joint into `pose`.
    #[track_caller]
    pub fn command(&self, role: LimbRole, index: usize, pose: Pose) -> PwmCommand {
        let entry = self.entry(role, index);
        PwmCommand::pulse(entry.channel, entry.bounds.ticks(pose))
    }
}

impl Default for LimbRegistry {
    fn default() -> Self {
        Self::reference()
    }
}
