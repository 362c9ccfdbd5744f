//! Validation predicates gating motion commands.
//!
//! Soft limits are workspace bounds expressed per joint after the inverse
//! transform, so they are re-evaluated per target rather than per Cartesian
//! coordinate.

use rtmc_common::configrec::ConfigRecord;
use rtmc_common::consts::MAX_AXIS;
use rtmc_common::flags::AxisFlags;
use rtmc_common::kinematics::{KinematicsFlags, KinematicsSolver};
use rtmc_common::pose::Pose;
use rtmc_common::status::StatusRecord;

/// `true` iff no active joint has any of PSL, NSL, PHL, NHL set. Gates
/// entry of any new coordinated segment.
pub fn limits_clear(status: &StatusRecord) -> bool {
    status.limits_clear()
}

/// `true` iff jogging `axis` at `vel` is permitted given its current limit
/// flags. `override_limits` bypasses every check. An out-of-range axis is
/// never permitted — callers still owe the caller a no-op, not an error,
/// per the dispatcher's axis-index convention.
pub fn jog_permitted(status: &StatusRecord, axis: usize, vel: f64) -> bool {
    if status.override_limits {
        return true;
    }
    if axis >= MAX_AXIS {
        return false;
    }
    let flags = status.axes[axis].flags;
    if vel > 0.0 && (flags.contains(AxisFlags::PSL) || flags.contains(AxisFlags::PHL)) {
        return false;
    }
    if vel < 0.0 && (flags.contains(AxisFlags::NSL) || flags.contains(AxisFlags::NHL)) {
        return false;
    }
    true
}

/// Run inverse kinematics on `pose` and check every active joint's target
/// against its configured travel limits. Inactive joints are ignored.
pub fn pose_in_range(
    kinematics: &dyn KinematicsSolver,
    config: &ConfigRecord,
    status: &StatusRecord,
    pose: &Pose,
) -> bool {
    let mut joints = [0.0; MAX_AXIS];
    let mut fflags = KinematicsFlags::default();
    kinematics.inverse(pose, &mut joints, KinematicsFlags::default(), &mut fflags);

    for axis in 0..MAX_AXIS {
        if !status.axes[axis].flags.contains(AxisFlags::ACTIVE) {
            continue;
        }
        let limits = &config.axes[axis];
        if joints[axis] < limits.min_limit || joints[axis] > limits.max_limit {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtmc_common::mode::KinematicsType;

    struct IdentityKinematics;
    impl KinematicsSolver for IdentityKinematics {
        fn kinematics_type(&self) -> KinematicsType {
            KinematicsType::Identity
        }
        fn inverse(
            &self,
            pose: &Pose,
            joints: &mut [f64; MAX_AXIS],
            _iflags: KinematicsFlags,
            _fflags: &mut KinematicsFlags,
        ) {
            joints[0] = pose.x;
            joints[1] = pose.y;
            joints[2] = pose.z;
        }
    }

    #[test]
    fn jog_permitted_blocks_positive_vel_into_positive_soft_limit() {
        let mut status = StatusRecord::default();
        status.axes[0].flags = AxisFlags::ACTIVE | AxisFlags::PSL;
        assert!(!jog_permitted(&status, 0, 1.0));
        assert!(jog_permitted(&status, 0, -1.0)); // away from the tripped side
    }

    #[test]
    fn jog_permitted_override_bypasses_every_check() {
        let mut status = StatusRecord::default();
        status.axes[0].flags = AxisFlags::ACTIVE | AxisFlags::PSL | AxisFlags::PHL;
        status.override_limits = true;
        assert!(jog_permitted(&status, 0, 1.0));
    }

    #[test]
    fn jog_permitted_false_for_out_of_range_axis() {
        let status = StatusRecord::default();
        assert!(!jog_permitted(&status, MAX_AXIS, 1.0));
    }

    #[test]
    fn pose_in_range_ignores_inactive_joints() {
        let mut config = ConfigRecord::default();
        config.axes[0].min_limit = -10.0;
        config.axes[0].max_limit = 10.0;
        let mut status = StatusRecord::default();
        status.axes[0].flags = AxisFlags::ACTIVE;
        // joint 1 would be out of range but is inactive, so it's ignored.
        config.axes[1].min_limit = -1.0;
        config.axes[1].max_limit = 1.0;

        let pose = Pose::new(5.0, 50.0, 0.0, 0.0, 0.0, 0.0);
        assert!(pose_in_range(&IdentityKinematics, &config, &status, &pose));
    }

    #[test]
    fn pose_in_range_false_when_active_joint_exceeds_limit() {
        let mut config = ConfigRecord::default();
        config.axes[0].min_limit = -10.0;
        config.axes[0].max_limit = 10.0;
        let mut status = StatusRecord::default();
        status.axes[0].flags = AxisFlags::ACTIVE;

        let pose = Pose::new(15.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(!pose_in_range(&IdentityKinematics, &config, &status, &pose));
    }
}
