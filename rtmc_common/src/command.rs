//! The command record: the raw wire struct the supervisor writes.
//!
//! This is deliberately a flat, `#[repr(C)]` struct mirroring what a real
//! shared-memory layout would carry — one field per possible command
//! payload, discriminated by `kind`. The dispatcher decodes it into a
//! tagged union (`rtmc_core::decode::Command`) before acting on it; this
//! struct itself stays a plain data carrier with no decoding logic.

use serde::{Deserialize, Serialize};

use crate::bracket::BracketHeader;
use crate::pose::Pose;

/// Raw wire discriminant for [`CommandRecord::kind`]. Values with no
/// matching variant here are a framing error, decoded as `UNKNOWN_COMMAND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum CommandKind {
    Abort = 0,
    Free = 1,
    Coord = 2,
    Teleop = 3,
    SetNumAxes = 4,
    SetWorldHome = 5,
    SetJointHome = 6,
    SetHomeOffset = 7,
    SetPositionLimits = 8,
    SetMaxFerror = 9,
    SetMinFerror = 10,
    OverrideLimits = 11,
    JogCont = 12,
    JogIncr = 13,
    JogAbs = 14,
    SetLine = 15,
    SetCircle = 16,
    Probe = 17,
    SetVel = 18,
    SetVelLimit = 19,
    SetAxisVelLimit = 20,
    SetHomingVel = 21,
    SetAcc = 22,
    Pause = 23,
    Resume = 24,
    Step = 25,
    Scale = 26,
    Enable = 27,
    Disable = 28,
    ActivateAxis = 29,
    DeactivateAxis = 30,
    EnableAmplifier = 31,
    DisableAmplifier = 32,
    OpenLog = 33,
    StartLog = 34,
    StopLog = 35,
    CloseLog = 36,
    Home = 37,
    EnableWatchdog = 38,
    DisableWatchdog = 39,
    ClearProbeFlags = 40,
    SetTeleopVector = 41,
    SetDebug = 42,
}

impl CommandKind {
    #[inline]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Abort),
            1 => Some(Self::Free),
            2 => Some(Self::Coord),
            3 => Some(Self::Teleop),
            4 => Some(Self::SetNumAxes),
            5 => Some(Self::SetWorldHome),
            6 => Some(Self::SetJointHome),
            7 => Some(Self::SetHomeOffset),
            8 => Some(Self::SetPositionLimits),
            9 => Some(Self::SetMaxFerror),
            10 => Some(Self::SetMinFerror),
            11 => Some(Self::OverrideLimits),
            12 => Some(Self::JogCont),
            13 => Some(Self::JogIncr),
            14 => Some(Self::JogAbs),
            15 => Some(Self::SetLine),
            16 => Some(Self::SetCircle),
            17 => Some(Self::Probe),
            18 => Some(Self::SetVel),
            19 => Some(Self::SetVelLimit),
            20 => Some(Self::SetAxisVelLimit),
            21 => Some(Self::SetHomingVel),
            22 => Some(Self::SetAcc),
            23 => Some(Self::Pause),
            24 => Some(Self::Resume),
            25 => Some(Self::Step),
            26 => Some(Self::Scale),
            27 => Some(Self::Enable),
            28 => Some(Self::Disable),
            29 => Some(Self::ActivateAxis),
            30 => Some(Self::DeactivateAxis),
            31 => Some(Self::EnableAmplifier),
            32 => Some(Self::DisableAmplifier),
            33 => Some(Self::OpenLog),
            34 => Some(Self::StartLog),
            35 => Some(Self::StopLog),
            36 => Some(Self::CloseLog),
            37 => Some(Self::Home),
            38 => Some(Self::EnableWatchdog),
            39 => Some(Self::DisableWatchdog),
            40 => Some(Self::ClearProbeFlags),
            41 => Some(Self::SetTeleopVector),
            42 => Some(Self::SetDebug),
            _ => None,
        }
    }
}

/// Termination condition for a coordinated segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TermCond {
    /// Come to a full stop before the next segment.
    Stop = 0,
    /// Blend into the next segment.
    Blend = 1,
}

impl TermCond {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Stop),
            1 => Some(Self::Blend),
            _ => None,
        }
    }
}

impl Default for TermCond {
    fn default() -> Self {
        Self::Stop
    }
}

/// Which stream `OPEN_LOG`/`START_LOG` address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LogType {
    Command = 0,
    Position = 1,
    /// Special position-voltage variant: `START_LOG` does not arm it directly.
    PositionVoltage = 2,
    FollowingError = 3,
}

impl LogType {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Command),
            1 => Some(Self::Position),
            2 => Some(Self::PositionVoltage),
            3 => Some(Self::FollowingError),
            _ => None,
        }
    }
}

/// How `OPEN_LOG` decides when to auto-start: immediately, or once a
/// chosen variable crosses a delta threshold from its snapshot value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LogTriggerType {
    Manual = 0,
    Delta = 1,
}

impl LogTriggerType {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Manual),
            1 => Some(Self::Delta),
            _ => None,
        }
    }
}

/// The raw wire command record: one field per possible payload, a
/// sequence number, and the bracket header.
#[derive(Debug)]
#[repr(C)]
pub struct CommandRecord {
    pub header: BracketHeader,
    /// Monotonically increasing; a repeat of the last-seen value is a no-op.
    pub seq: u64,
    pub kind: u32,
    pub axis: i32,
    pub pose: Pose,
    pub center: Pose,
    pub normal: Pose,
    pub turn: i32,
    pub id: i32,
    pub vel: f64,
    pub acc: f64,
    pub min_limit: f64,
    pub max_limit: f64,
    pub max_ferror: f64,
    pub min_ferror: f64,
    pub scale: f64,
    pub offset: f64,
    pub term_cond: u8,
    pub log_type: u8,
    pub log_size: u32,
    pub log_skip: u32,
    pub log_trigger_type: u8,
    pub log_trigger_variable: u8,
    pub log_trigger_threshold: f64,
    pub watchdog_wait: f64,
    pub debug_level: u32,
}

impl Default for CommandRecord {
    fn default() -> Self {
        Self {
            header: BracketHeader::new(),
            seq: 0,
            kind: 0,
            axis: -1,
            pose: Pose::ZERO,
            center: Pose::ZERO,
            normal: Pose::ZERO,
            turn: 0,
            id: 0,
            vel: 0.0,
            acc: 0.0,
            min_limit: 0.0,
            max_limit: 0.0,
            max_ferror: 0.0,
            min_ferror: 0.0,
            scale: 0.0,
            offset: 0.0,
            term_cond: TermCond::Stop as u8,
            log_type: LogType::Command as u8,
            log_size: 0,
            log_skip: 0,
            log_trigger_type: LogTriggerType::Manual as u8,
            log_trigger_variable: 0,
            log_trigger_threshold: 0.0,
            watchdog_wait: 0.0,
            debug_level: 0,
        }
    }
}
