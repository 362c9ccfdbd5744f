//! Cartesian pose / 6-vector type.

use serde::{Deserialize, Serialize};

/// A 3D translation plus three orientation scalars.
///
/// Used both as a Cartesian point (`SET_LINE`, `SET_WORLD_HOME`, probe
/// targets) and as a velocity 6-vector (teleop desired velocity, free-mode
/// scratch pose).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Pose {
    pub const ZERO: Pose = Pose {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        a: 0.0,
        b: 0.0,
        c: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64, a: f64, b: f64, c: f64) -> Self {
        Self { x, y, z, a, b, c }
    }

    /// `max(|translation|, a, b, c)` — the magnitude used by the teleop
    /// velocity scaler. Orientation components are compared signed, not
    /// by absolute value; deliberately not a full 6-vector norm.
    pub fn teleop_magnitude(&self) -> f64 {
        let tran = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        tran.max(self.a).max(self.b).max(self.c)
    }

    /// Scale every component by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
            a: self.a * factor,
            b: self.b * factor,
            c: self.c * factor,
        }
    }

    /// Map a joint index (0..6) onto this pose's named components
    /// (x,y,z,a,b,c), mirroring how free-mode jog targets for the first
    /// six joints are exposed under the legacy `tran.x`-style names.
    /// `None` for joints beyond the sixth (no named slot exists).
    pub fn component_mut(&mut self, joint: usize) -> Option<&mut f64> {
        match joint {
            0 => Some(&mut self.x),
            1 => Some(&mut self.y),
            2 => Some(&mut self.z),
            3 => Some(&mut self.a),
            4 => Some(&mut self.b),
            5 => Some(&mut self.c),
            _ => None,
        }
    }

    pub fn component(&self, joint: usize) -> Option<f64> {
        match joint {
            0 => Some(self.x),
            1 => Some(self.y),
            2 => Some(self.z),
            3 => Some(self.a),
            4 => Some(self.b),
            5 => Some(self.c),
            _ => None,
        }
    }
}
