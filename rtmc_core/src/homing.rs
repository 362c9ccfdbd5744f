//! Home-state invalidation.
//!
//! An inverse-only machine cannot reconstruct Cartesian position from
//! joint positions, so any joint motion after a coordinated move may have
//! invalidated the homed reference on an unknown set of joints.

use rtmc_common::consts::MAX_AXIS;
use rtmc_common::debugrec::DebugRecord;
use rtmc_common::flags::AxisFlags;
use rtmc_common::mode::KinematicsType;
use rtmc_common::status::StatusRecord;

/// Called after any free-mode motion of `axis`. No-op unless `kinematics_type`
/// is inverse-only. If `rehome_all` is set, every joint's `HOMED` flag
/// clears; otherwise only `axis`. The cached `all_homed` flag on the debug
/// record is cleared either way.
pub fn clear_homes(
    status: &mut StatusRecord,
    debug: &mut DebugRecord,
    axis: usize,
    kinematics_type: KinematicsType,
    rehome_all: bool,
) {
    if !kinematics_type.is_inverse_only() {
        return;
    }

    if rehome_all {
        for a in status.axes.iter_mut() {
            a.flags.remove(AxisFlags::HOMED);
        }
    } else if axis < MAX_AXIS {
        status.axes[axis].flags.remove(AxisFlags::HOMED);
    }
    debug.all_homed = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_when_kinematics_not_inverse_only() {
        let mut status = StatusRecord::default();
        status.axes[0].flags = AxisFlags::ACTIVE | AxisFlags::HOMED;
        let mut debug = DebugRecord::default();
        debug.all_homed = true;

        clear_homes(&mut status, &mut debug, 0, KinematicsType::Identity, false);

        assert!(status.axes[0].flags.contains(AxisFlags::HOMED));
        assert!(debug.all_homed);
    }

    #[test]
    fn clears_only_the_named_axis_without_rehome_all() {
        let mut status = StatusRecord::default();
        status.axes[0].flags = AxisFlags::HOMED;
        status.axes[1].flags = AxisFlags::HOMED;
        let mut debug = DebugRecord::default();

        clear_homes(&mut status, &mut debug, 0, KinematicsType::InverseOnly, false);

        assert!(!status.axes[0].flags.contains(AxisFlags::HOMED));
        assert!(status.axes[1].flags.contains(AxisFlags::HOMED));
        assert!(!debug.all_homed);
    }

    #[test]
    fn clears_every_axis_with_rehome_all() {
        let mut status = StatusRecord::default();
        status.axes[0].flags = AxisFlags::HOMED;
        status.axes[5].flags = AxisFlags::HOMED;
        let mut debug = DebugRecord::default();

        clear_homes(&mut status, &mut debug, 0, KinematicsType::InverseOnly, true);

        assert!(status.axes.iter().all(|a| !a.flags.contains(AxisFlags::HOMED)));
    }
}
