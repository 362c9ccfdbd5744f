//! The kinematics contract (consumed, never implemented here).
//!
//! Forward/inverse transforms between Cartesian pose and per-joint
//! position are opaque to the dispatcher; it only needs `inverse()` to
//! validate a target against per-joint travel limits, and
//! `kinematics_type()` to decide which preconditions gate mode changes
//! and home invalidation.

use crate::consts::MAX_AXIS;
use crate::mode::KinematicsType;
use crate::pose::Pose;

/// Flags passed to and returned from `inverse()`, mirroring the
/// `iflags`/`fflags` out-parameters of a real kinematics module (e.g. a
/// preferred solution branch for a redundant arm). Opaque to the
/// dispatcher; it only threads them through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KinematicsFlags(pub u32);

pub trait KinematicsSolver {
    /// `IDENTITY`, `FORWARD_ONLY`, `INVERSE_ONLY`, or `BOTH`.
    fn kinematics_type(&self) -> KinematicsType;

    /// Cartesian → joint. Writes one value per joint into `joints`;
    /// joints beyond the machine's active count may be left untouched.
    fn inverse(
        &self,
        pose: &Pose,
        joints: &mut [f64; MAX_AXIS],
        iflags: KinematicsFlags,
        fflags: &mut KinematicsFlags,
    );
}
