//! Shared data model for the motion controller command core.
//!
//! This crate defines the wire-level records exchanged between the
//! non-realtime supervisor and the realtime command dispatcher (see
//! [`rtmc_core`](https://docs.rs/rtmc_core)), plus the small set of
//! contracts the dispatcher consumes but never implements: the
//! trajectory planner, the kinematics solver, the log sink and the
//! error reporter.
//!
//! # Module Structure
//!
//! - [`consts`] - compile-time machine size limits
//! - [`bracket`] - the head/tail torn-read guard
//! - [`pose`] - the Cartesian pose / 6-vector type
//! - [`flags`] - per-axis status bits
//! - [`mode`] - motion mode and kinematics type enums
//! - [`result`] - the command result taxonomy
//! - [`command`] - the command record and its tagged command kinds
//! - [`status`] - the status record
//! - [`debugrec`] - the debug record
//! - [`configrec`] - the configuration record
//! - [`planner`] - the trajectory planner contract
//! - [`kinematics`] - the kinematics contract
//! - [`logging`] - the data-logging contract
//! - [`error_reporter`] - the error reporter contract

pub mod bracket;
pub mod command;
pub mod configrec;
pub mod consts;
pub mod debugrec;
pub mod error_reporter;
pub mod flags;
pub mod kinematics;
pub mod logging;
pub mod mode;
pub mod planner;
pub mod pose;
pub mod result;
pub mod status;

pub use bracket::{BracketHeader, TornRead};
pub use command::{CommandKind, CommandRecord};
pub use configrec::{AxisConfig, ConfigRecord};
pub use consts::MAX_AXIS;
pub use debugrec::DebugRecord;
pub use flags::AxisFlags;
pub use mode::{KinematicsType, MotionMode};
pub use pose::Pose;
pub use result::CommandResult;
pub use status::{AxisStatus, StatusRecord};
