//! Per-axis status bits.

use bitflags::bitflags;

bitflags! {
    /// Independent per-joint booleans tracked by the status record.
    ///
    /// Invariant: `HOMED` implies the joint's position is meaningful in
    /// workspace coordinates; see [`crate::mode::KinematicsType::InverseOnly`]
    /// for the case where that invariant needs active maintenance.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AxisFlags: u8 {
        /// Joint is part of the active machine (`ACTIVATE_AXIS`/`DEACTIVATE_AXIS`).
        const ACTIVE  = 0b0000_0001;
        /// Joint's reference position is known.
        const HOMED   = 0b0000_0010;
        /// Homing sequence in progress on this joint.
        const HOMING  = 0b0000_0100;
        /// Joint-local error latched (cleared by `OVERRIDE_LIMITS` or `ABORT`).
        const ERROR   = 0b0000_1000;
        /// Positive soft limit tripped.
        const PSL     = 0b0001_0000;
        /// Negative soft limit tripped.
        const NSL     = 0b0010_0000;
        /// Positive hard limit tripped.
        const PHL     = 0b0100_0000;
        /// Negative hard limit tripped.
        const NHL     = 0b1000_0000;
    }
}

impl AxisFlags {
    /// Mask of the four limit bits, used by [`crate::AxisFlags::any_limit_tripped`].
    pub const LIMIT_MASK: Self = Self::from_bits_truncate(
        Self::PSL.bits() | Self::NSL.bits() | Self::PHL.bits() | Self::NHL.bits(),
    );

    /// `true` if any of PSL/NSL/PHL/NHL is set.
    #[inline]
    pub const fn any_limit_tripped(&self) -> bool {
        self.intersects(Self::LIMIT_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(AxisFlags::default().is_empty());
    }

    #[test]
    fn limit_mask_covers_all_four_limit_bits() {
        let all_limits = AxisFlags::PSL | AxisFlags::NSL | AxisFlags::PHL | AxisFlags::NHL;
        assert_eq!(AxisFlags::LIMIT_MASK, all_limits);
    }

    #[test]
    fn any_limit_tripped_false_when_only_active_and_homed() {
        let f = AxisFlags::ACTIVE | AxisFlags::HOMED;
        assert!(!f.any_limit_tripped());
    }

    #[test]
    fn any_limit_tripped_true_for_single_limit_bit() {
        assert!((AxisFlags::ACTIVE | AxisFlags::PSL).any_limit_tripped());
        assert!((AxisFlags::ACTIVE | AxisFlags::NHL).any_limit_tripped());
    }
}
