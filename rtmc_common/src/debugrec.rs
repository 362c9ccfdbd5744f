//! The debug record: scratch/diagnostic state, core-writes/supervisor-reads.

use crate::bracket::BracketHeader;
use crate::consts::MAX_AXIS;
use crate::pose::Pose;

/// Per-joint homing phase. `0` means not homing; `1` is the first homing
/// phase raised by the `HOME` command (further phases belong to the
/// cyclic executor, out of scope here).
pub type HomingPhase = u8;

/// The debug record body: split-read counter, per-axis homing phase, a
/// queue-state echo, the teleop desired-velocity vector, a free-mode
/// scratch pose, per-axis home position, previous joint positions,
/// step-resume id, watchdog state, and the `allHomed` cache.
#[derive(Debug)]
#[repr(C)]
pub struct DebugRecord {
    pub header: BracketHeader,
    /// Incremented every time a torn read aborts a dispatch cycle.
    pub split_count: u64,
    pub homing_phase: [HomingPhase; MAX_AXIS],
    /// Echo of the coordinated queue's current state (planner-opaque).
    pub queue_state_echo: u32,
    pub teleop_target_vel: Pose,
    /// Free-mode jog target scratch; joints 0..6 also mirror into the
    /// named `x,y,z,a,b,c` components (see [`Pose::component_mut`]).
    pub free_pose: Pose,
    pub joint_targets: [f64; MAX_AXIS],
    /// Per-axis home position set by `SET_JOINT_HOME` — distinct from
    /// `ConfigRecord::axes[_].home_offset`, which `SET_HOME_OFFSET` writes.
    /// These are two separate slots with overlapping meaning; do not merge.
    pub joint_home: [f64; MAX_AXIS],
    pub prev_joint_pos: [f64; MAX_AXIS],
    /// Id of the coordinated segment active when `STEP` was issued.
    pub step_resume_id: i32,
    pub watchdog_enabled: bool,
    pub watchdog_wait: f64,
    /// Cached `all_active_axes_homed()` result for the cyclic executor.
    pub all_homed: bool,
}

impl Default for DebugRecord {
    fn default() -> Self {
        Self {
            header: BracketHeader::new(),
            split_count: 0,
            homing_phase: [0; MAX_AXIS],
            queue_state_echo: 0,
            teleop_target_vel: Pose::ZERO,
            free_pose: Pose::ZERO,
            joint_targets: [0.0; MAX_AXIS],
            joint_home: [0.0; MAX_AXIS],
            prev_joint_pos: [0.0; MAX_AXIS],
            step_resume_id: 0,
            watchdog_enabled: false,
            watchdog_wait: 0.0,
            all_homed: false,
        }
    }
}

impl DebugRecord {
    /// Write a free-mode jog target for `axis`, mirroring into the named
    /// pose components when `axis < 6`.
    pub fn set_joint_target(&mut self, axis: usize, target: f64) {
        self.joint_targets[axis] = target;
        if let Some(slot) = self.free_pose.component_mut(axis) {
            *slot = target;
        }
    }
}
