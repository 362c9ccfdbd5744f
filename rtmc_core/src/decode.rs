//! Decoding the raw wire [`CommandRecord`] into a tagged union.
//!
//! The dispatcher never matches on the raw `u32` kind directly. Decoding
//! happens once per cycle, up front; everything downstream matches on
//! [`Command`], an exhaustive enum the compiler can check. A raw `kind`
//! that fails to decode is the only path that reaches `UNKNOWN_COMMAND` —
//! every decoded variant is handled by name.

use rtmc_common::command::{CommandKind, CommandRecord, LogTriggerType, LogType, TermCond};
use rtmc_common::pose::Pose;

/// One decoded command, carrying only the fields its kind actually uses.
/// `axis` fields are left as the raw signed wire value; range/validity
/// checks belong to the dispatcher, not here, since out-of-range axes are
/// a per-command no-op rather than a decode failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Abort { axis: i32 },
    Free,
    Coord,
    Teleop,
    SetNumAxes { count: i32 },
    SetWorldHome { pose: Pose },
    SetJointHome { axis: i32, offset: f64 },
    SetHomeOffset { axis: i32, offset: f64 },
    SetPositionLimits { axis: i32, min: f64, max: f64 },
    SetMaxFerror { axis: i32, value: f64 },
    SetMinFerror { axis: i32, value: f64 },
    OverrideLimits { axis: i32 },
    JogCont { axis: i32, vel: f64 },
    JogIncr { axis: i32, vel: f64, offset: f64 },
    JogAbs { axis: i32, vel: f64, offset: f64 },
    SetLine { id: i32, target: Pose, term_cond: TermCond },
    SetCircle {
        id: i32,
        end: Pose,
        center: Pose,
        normal: Pose,
        turn: i32,
        term_cond: TermCond,
    },
    Probe { id: i32, target: Pose, term_cond: TermCond },
    SetVel { vel: f64 },
    SetVelLimit { limit: f64 },
    SetAxisVelLimit { axis: i32, limit: f64 },
    SetHomingVel { axis: i32, vel: f64 },
    SetAcc { acc: f64 },
    Pause,
    Resume,
    Step,
    Scale { scale: f64 },
    Enable,
    Disable,
    ActivateAxis { axis: i32 },
    DeactivateAxis { axis: i32 },
    EnableAmplifier { axis: i32 },
    DisableAmplifier { axis: i32 },
    OpenLog {
        axis: i32,
        log_type: LogType,
        size: u32,
        skip: u32,
        trigger_type: LogTriggerType,
        trigger_variable: u8,
        trigger_threshold: f64,
    },
    StartLog,
    StopLog,
    CloseLog,
    Home { axis: i32 },
    EnableWatchdog { wait: f64 },
    DisableWatchdog { wait: f64 },
    ClearProbeFlags,
    SetTeleopVector { vector: Pose },
    SetDebug { level: u32 },
}

/// Decode a raw command record. `None` means the wire `kind` has no
/// matching variant — a framing error, reported as `UNKNOWN_COMMAND`.
pub fn decode_command(raw: &CommandRecord) -> Option<Command> {
    let kind = CommandKind::from_u32(raw.kind)?;

    Some(match kind {
        CommandKind::Abort => Command::Abort { axis: raw.axis },
        CommandKind::Free => Command::Free,
        CommandKind::Coord => Command::Coord,
        CommandKind::Teleop => Command::Teleop,
        CommandKind::SetNumAxes => Command::SetNumAxes { count: raw.axis },
        CommandKind::SetWorldHome => Command::SetWorldHome { pose: raw.pose },
        CommandKind::SetJointHome => Command::SetJointHome {
            axis: raw.axis,
            offset: raw.offset,
        },
        CommandKind::SetHomeOffset => Command::SetHomeOffset {
            axis: raw.axis,
            offset: raw.offset,
        },
        CommandKind::SetPositionLimits => Command::SetPositionLimits {
            axis: raw.axis,
            min: raw.min_limit,
            max: raw.max_limit,
        },
        CommandKind::SetMaxFerror => Command::SetMaxFerror {
            axis: raw.axis,
            value: raw.max_ferror,
        },
        CommandKind::SetMinFerror => Command::SetMinFerror {
            axis: raw.axis,
            value: raw.min_ferror,
        },
        CommandKind::OverrideLimits => Command::OverrideLimits { axis: raw.axis },
        CommandKind::JogCont => Command::JogCont {
            axis: raw.axis,
            vel: raw.vel,
        },
        CommandKind::JogIncr => Command::JogIncr {
            axis: raw.axis,
            vel: raw.vel,
            offset: raw.offset,
        },
        CommandKind::JogAbs => Command::JogAbs {
            axis: raw.axis,
            vel: raw.vel,
            offset: raw.offset,
        },
        CommandKind::SetLine => Command::SetLine {
            id: raw.id,
            target: raw.pose,
            term_cond: TermCond::from_u8(raw.term_cond).unwrap_or_default(),
        },
        CommandKind::SetCircle => Command::SetCircle {
            id: raw.id,
            end: raw.pose,
            center: raw.center,
            normal: raw.normal,
            turn: raw.turn,
            term_cond: TermCond::from_u8(raw.term_cond).unwrap_or_default(),
        },
        CommandKind::Probe => Command::Probe {
            id: raw.id,
            target: raw.pose,
            term_cond: TermCond::from_u8(raw.term_cond).unwrap_or_default(),
        },
        CommandKind::SetVel => Command::SetVel { vel: raw.vel },
        CommandKind::SetVelLimit => Command::SetVelLimit { limit: raw.vel },
        CommandKind::SetAxisVelLimit => Command::SetAxisVelLimit {
            axis: raw.axis,
            limit: raw.vel,
        },
        CommandKind::SetHomingVel => Command::SetHomingVel {
            axis: raw.axis,
            vel: raw.vel,
        },
        CommandKind::SetAcc => Command::SetAcc { acc: raw.acc },
        CommandKind::Pause => Command::Pause,
        CommandKind::Resume => Command::Resume,
        CommandKind::Step => Command::Step,
        CommandKind::Scale => Command::Scale { scale: raw.scale },
        CommandKind::Enable => Command::Enable,
        CommandKind::Disable => Command::Disable,
        CommandKind::ActivateAxis => Command::ActivateAxis { axis: raw.axis },
        CommandKind::DeactivateAxis => Command::DeactivateAxis { axis: raw.axis },
        CommandKind::EnableAmplifier => Command::EnableAmplifier { axis: raw.axis },
        CommandKind::DisableAmplifier => Command::DisableAmplifier { axis: raw.axis },
        CommandKind::OpenLog => Command::OpenLog {
            axis: raw.axis,
            log_type: LogType::from_u8(raw.log_type).unwrap_or(LogType::Command),
            size: raw.log_size,
            skip: raw.log_skip,
            trigger_type: LogTriggerType::from_u8(raw.log_trigger_type).unwrap_or_default(),
            trigger_variable: raw.log_trigger_variable,
            trigger_threshold: raw.log_trigger_threshold,
        },
        CommandKind::StartLog => Command::StartLog,
        CommandKind::StopLog => Command::StopLog,
        CommandKind::CloseLog => Command::CloseLog,
        CommandKind::Home => Command::Home { axis: raw.axis },
        CommandKind::EnableWatchdog => Command::EnableWatchdog {
            wait: raw.watchdog_wait,
        },
        CommandKind::DisableWatchdog => Command::DisableWatchdog {
            wait: raw.watchdog_wait,
        },
        CommandKind::ClearProbeFlags => Command::ClearProbeFlags,
        CommandKind::SetTeleopVector => Command::SetTeleopVector { vector: raw.pose },
        CommandKind::SetDebug => Command::SetDebug {
            level: raw.debug_level,
        },
    })
}
