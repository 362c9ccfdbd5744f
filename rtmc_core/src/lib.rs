//! Command dispatcher for a realtime multi-axis motion controller.
//!
//! This crate owns the part of the control core that turns one supervisor
//! command per cycle into mutations of the published status/debug/config
//! records. It never touches hardware, never runs a trajectory planner or
//! kinematics solver itself (see [`rtmc_common::planner`] and
//! [`rtmc_common::kinematics`] for those contracts), and never blocks: one
//! call to [`dispatch::dispatch_cycle`] per realtime period, zero heap
//! allocation on that path.
//!
//! ## Module Structure
//!
//! - [`config`] - TOML machine-configuration loader (process start, not the hot path)
//! - [`controller`] - the aggregate owning the three published records plus dispatcher state
//! - [`decode`] - raw wire command → tagged [`decode::Command`] union
//! - [`validation`] - soft-limit and jog-permission predicates
//! - [`homing`] - home-state invalidation on inverse-only kinematics
//! - [`dispatch`] - the per-cycle dispatch algorithm and per-command semantics
//! - [`error`] - Rust-level error types (config loading, realtime setup)
//! - [`rt`] - realtime scheduling setup for the demonstration binary

pub mod config;
pub mod controller;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod homing;
pub mod rt;
pub mod validation;

pub use controller::Controller;
pub use dispatch::{dispatch_cycle, DispatchOutcome};
