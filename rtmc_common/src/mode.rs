//! Motion mode and kinematics type enums.

use serde::{Deserialize, Serialize};

/// The machine's current motion mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MotionMode {
    /// Independent per-joint motion; each joint has its own planner.
    Free = 0,
    /// Motion expressed in Cartesian workspace through the shared coord queue.
    Coord = 1,
    /// Continuous Cartesian velocity command, re-integrated each cycle.
    Teleop = 2,
}

impl MotionMode {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Free),
            1 => Some(Self::Coord),
            2 => Some(Self::Teleop),
            _ => None,
        }
    }
}

impl Default for MotionMode {
    fn default() -> Self {
        Self::Free
    }
}

/// What the kinematics solver can do for this machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KinematicsType {
    /// Joint space and Cartesian space coincide; no transform needed.
    Identity = 0,
    /// Joint → Cartesian is known; Cartesian → joint is not.
    ForwardOnly = 1,
    /// Cartesian → joint is known; joint → Cartesian is not.
    InverseOnly = 2,
    /// Both directions are known.
    Both = 3,
}

impl KinematicsType {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Identity),
            1 => Some(Self::ForwardOnly),
            2 => Some(Self::InverseOnly),
            3 => Some(Self::Both),
            _ => None,
        }
    }

    /// Entry into COORD/TELEOP requires all-axes-homed unless this is `Identity`.
    #[inline]
    pub const fn requires_homing_for_coordinated_motion(&self) -> bool {
        !matches!(self, Self::Identity)
    }

    /// An inverse-only machine cannot reconstruct Cartesian position from
    /// joint positions, so home invalidation must be conservative.
    #[inline]
    pub const fn is_inverse_only(&self) -> bool {
        matches!(self, Self::InverseOnly)
    }
}

impl Default for KinematicsType {
    fn default() -> Self {
        Self::Identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_mode_roundtrip() {
        for v in 0..=2u8 {
            let m = MotionMode::from_u8(v).unwrap();
            assert_eq!(m as u8, v);
        }
        assert!(MotionMode::from_u8(3).is_none());
    }

    #[test]
    fn kinematics_type_roundtrip() {
        for v in 0..=3u8 {
            let k = KinematicsType::from_u8(v).unwrap();
            assert_eq!(k as u8, v);
        }
        assert!(KinematicsType::from_u8(4).is_none());
    }

    #[test]
    fn only_identity_skips_homing_requirement() {
        assert!(!KinematicsType::Identity.requires_homing_for_coordinated_motion());
        assert!(KinematicsType::ForwardOnly.requires_homing_for_coordinated_motion());
        assert!(KinematicsType::InverseOnly.requires_homing_for_coordinated_motion());
        assert!(KinematicsType::Both.requires_homing_for_coordinated_motion());
    }

    #[test]
    fn only_inverse_only_is_inverse_only() {
        assert!(KinematicsType::InverseOnly.is_inverse_only());
        assert!(!KinematicsType::Both.is_inverse_only());
        assert!(!KinematicsType::Identity.is_inverse_only());
        assert!(!KinematicsType::ForwardOnly.is_inverse_only());
    }
}
