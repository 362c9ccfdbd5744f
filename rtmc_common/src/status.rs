//! The status record: runtime measurements the supervisor reads.

use crate::bracket::BracketHeader;
use crate::consts::MAX_AXIS;
use crate::flags::AxisFlags;
use crate::mode::MotionMode;
use crate::result::CommandResult;

/// Per-joint numeric state: commanded position, previous position, raw
/// output, following error, and the per-axis velocity cap/overrun
/// threshold set by `SET_AXIS_VEL_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct AxisStatus {
    pub flags: AxisFlags,
    pub cmd_pos: f64,
    pub prev_pos: f64,
    pub raw_output: f64,
    pub ferror: f64,
    /// Per-axis velocity cap from `SET_AXIS_VEL_LIMIT`.
    pub vel_limit: f64,
    /// `10 * vel_limit`, an overrun threshold consumed by the cyclic executor.
    pub big_vel: f64,
}

/// The status record body: current mode/enable, in-position, motion-error,
/// probe state, override flag, paused/stepping, velocity/acceleration
/// scalers, last command echo and result, current motion id, and per-axis
/// state. Core writes, supervisor reads.
#[derive(Debug)]
#[repr(C)]
pub struct StatusRecord {
    pub header: BracketHeader,
    pub mode: MotionMode,
    pub enabled: bool,
    pub in_position: bool,
    pub motion_error: bool,
    pub probe_tripped: bool,
    pub probing: bool,
    pub override_limits: bool,
    pub paused: bool,
    pub stepping: bool,
    pub vel: f64,
    pub vel_limit: f64,
    pub acc: f64,
    /// Speed override applied to all queues, mirrored per axis (`SCALE`).
    pub scale: f64,
    /// Raw wire command-kind tag of the last processed command (echo).
    pub last_cmd_kind: u32,
    /// Sequence number of the last processed command (echo, used for dedup).
    pub last_cmd_seq: u64,
    pub result: CommandResult,
    /// Id of the currently active coordinated motion segment.
    pub id: i32,
    pub axes: [AxisStatus; MAX_AXIS],
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self {
            header: BracketHeader::new(),
            mode: MotionMode::default(),
            enabled: false,
            in_position: true,
            motion_error: false,
            probe_tripped: false,
            probing: false,
            override_limits: false,
            paused: false,
            stepping: false,
            vel: 0.0,
            vel_limit: 0.0,
            acc: 0.0,
            scale: 1.0,
            last_cmd_kind: 0,
            last_cmd_seq: 0,
            result: CommandResult::default(),
            id: 0,
            axes: [AxisStatus::default(); MAX_AXIS],
        }
    }
}

impl StatusRecord {
    /// `true` iff every active axis is homed — gates entry into COORD/TELEOP
    /// under non-identity kinematics.
    pub fn all_active_axes_homed(&self) -> bool {
        self.axes
            .iter()
            .filter(|a| a.flags.contains(AxisFlags::ACTIVE))
            .all(|a| a.flags.contains(AxisFlags::HOMED))
    }

    /// `true` iff no active axis has any limit bit set.
    pub fn limits_clear(&self) -> bool {
        self.axes
            .iter()
            .filter(|a| a.flags.contains(AxisFlags::ACTIVE))
            .all(|a| !a.flags.any_limit_tripped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_starts_enabled_false_and_scale_one() {
        let s = StatusRecord::default();
        assert!(!s.enabled);
        assert_eq!(s.scale, 1.0);
        assert!(s.result.is_ok());
    }

    #[test]
    fn all_active_axes_homed_ignores_inactive_axes() {
        let mut s = StatusRecord::default();
        s.axes[0].flags = AxisFlags::ACTIVE | AxisFlags::HOMED;
        // axes[1..] remain inactive and unhomed.
        assert!(s.all_active_axes_homed());

        s.axes[1].flags = AxisFlags::ACTIVE;
        assert!(!s.all_active_axes_homed());
    }

    #[test]
    fn limits_clear_false_when_active_axis_has_limit_flag() {
        let mut s = StatusRecord::default();
        s.axes[3].flags = AxisFlags::ACTIVE | AxisFlags::PSL;
        assert!(!s.limits_clear());
    }

    #[test]
    fn limits_clear_ignores_inactive_axis_limit_flags() {
        let mut s = StatusRecord::default();
        s.axes[3].flags = AxisFlags::PSL; // not ACTIVE
        assert!(s.limits_clear());
    }
}
