//! TOML machine-configuration loader.
//!
//! Parses a static description of axis travel/velocity/ferror limits and
//! kinematics type at process start, validates it, and builds the initial
//! [`ConfigRecord`]. This is the one piece of ambient, non-realtime
//! configuration this crate owns; nothing here runs on the dispatch path.

use std::path::Path;

use rtmc_common::configrec::{AxisConfig, ConfigRecord};
use rtmc_common::consts::MAX_AXIS;
use rtmc_common::mode::KinematicsType;
use serde::Deserialize;
use tracing::{error, info};

use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
struct MachineToml {
    axis_count: u8,
    vel_limit: f64,
    acc: f64,
    #[serde(default)]
    kinematics_type: u8,
    axis: Vec<AxisToml>,
}

#[derive(Debug, Deserialize)]
struct AxisToml {
    min_limit: f64,
    max_limit: f64,
    max_vel: f64,
    homing_vel: f64,
    max_ferror: f64,
    min_ferror: f64,
    #[serde(default)]
    home_offset: f64,
}

/// The validated result of loading a machine configuration file: the
/// initial config record plus the kinematics type the demonstration binary
/// should wire up (the kinematics solver itself is supplied separately).
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: ConfigRecord,
    pub kinematics_type: KinematicsType,
}

/// Load and validate a machine configuration file from disk.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let toml_body = std::fs::read_to_string(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to read machine config");
        ConfigError::Io(format!("failed to read {}: {e}", path.display()))
    })?;
    load_config_from_str(&toml_body)
}

/// Parse and validate a machine configuration already read into memory.
/// Exposed separately so tests don't need a file on disk.
pub fn load_config_from_str(toml_body: &str) -> Result<LoadedConfig, ConfigError> {
    let parsed: MachineToml = toml::from_str(toml_body).map_err(|e| {
        error!(error = %e, "failed to parse machine config");
        ConfigError::Parse(e.to_string())
    })?;

    validate(&parsed).map_err(|e| {
        error!(error = %e, "machine config failed validation");
        e
    })?;

    let kinematics_type = KinematicsType::from_u8(parsed.kinematics_type).ok_or_else(|| {
        ConfigError::Validation(format!(
            "kinematics_type {} is not a recognized variant",
            parsed.kinematics_type
        ))
    })?;

    let mut axes = [AxisConfig::default(); MAX_AXIS];
    for (i, a) in parsed.axis.iter().enumerate() {
        axes[i] = AxisConfig {
            min_limit: a.min_limit,
            max_limit: a.max_limit,
            max_vel: a.max_vel,
            homing_vel: a.homing_vel,
            max_ferror: a.max_ferror,
            min_ferror: a.min_ferror,
            home_offset: a.home_offset,
        };
    }

    let config = ConfigRecord {
        axes,
        vel_limit: parsed.vel_limit,
        acc: parsed.acc,
        axis_count: parsed.axis_count,
        ..ConfigRecord::default()
    };

    info!(axis_count = parsed.axis_count, "machine config loaded");

    Ok(LoadedConfig {
        config,
        kinematics_type,
    })
}

fn validate(parsed: &MachineToml) -> Result<(), ConfigError> {
    if parsed.axis_count < 1 || parsed.axis_count as usize > MAX_AXIS {
        return Err(ConfigError::Validation(format!(
            "axis_count {} outside 1..={MAX_AXIS}",
            parsed.axis_count
        )));
    }
    if parsed.axis.len() != parsed.axis_count as usize {
        return Err(ConfigError::Validation(format!(
            "axis_count is {} but {} [[axis]] entries were given",
            parsed.axis_count,
            parsed.axis.len()
        )));
    }
    if parsed.vel_limit < 0.0 {
        return Err(ConfigError::Validation(
            "vel_limit must be non-negative".into(),
        ));
    }
    if parsed.acc < 0.0 {
        return Err(ConfigError::Validation("acc must be non-negative".into()));
    }
    for (i, axis) in parsed.axis.iter().enumerate() {
        if !(axis.min_limit < axis.max_limit) {
            return Err(ConfigError::Validation(format!(
                "axis {i}: min_limit must be < max_limit"
            )));
        }
        if axis.max_vel < 0.0 || axis.homing_vel < 0.0 {
            return Err(ConfigError::Validation(format!(
                "axis {i}: max_vel/homing_vel must be non-negative"
            )));
        }
        if axis.max_ferror < 0.0 || axis.min_ferror < 0.0 {
            return Err(ConfigError::Validation(format!(
                "axis {i}: max_ferror/min_ferror must be non-negative"
            )));
        }
    }
    Ok(())
}
