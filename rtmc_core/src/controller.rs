//! The controller aggregate: every piece of state the dispatcher owns.
//!
//! The original dispatcher scattered this across file-scope mutables
//! (`worldHome`, `logSkip`, `logStartTime`, `loggingAxis`, `fflags`,
//! `iflags`, `rehome_all`, `num_axes`). Here they all live on one struct
//! the dispatcher borrows mutably for the duration of a cycle.

use rtmc_common::command::{CommandRecord, LogTriggerType, LogType};
use rtmc_common::configrec::ConfigRecord;
use rtmc_common::consts::{MAX_AXIS, NUM_QUEUES};
use rtmc_common::debugrec::DebugRecord;
use rtmc_common::error_reporter::ErrorReporter;
use rtmc_common::kinematics::KinematicsSolver;
use rtmc_common::logging::LogSink;
use rtmc_common::planner::TrajectoryQueue;
use rtmc_common::pose::Pose;
use rtmc_common::status::StatusRecord;

/// Armed state of the supervisor-facing data logger. Distinct from the
/// structured `tracing` logging this crate also emits.
#[derive(Debug)]
pub(crate) struct LoggingState {
    pub armed: bool,
    pub log_type: LogType,
    pub size: u32,
    pub skip: u32,
    pub trigger_type: LogTriggerType,
    pub trigger_variable: u8,
    pub trigger_threshold: f64,
    /// The trigger variable's value as of the cycle `OPEN_LOG` was
    /// processed, not the cycle logging starts.
    pub trigger_snapshot: f64,
    /// Axis the log is scoped to, for axis-scoped log types.
    pub axis: Option<usize>,
    pub start_cycle: u64,
}

impl Default for LoggingState {
    fn default() -> Self {
        Self {
            armed: false,
            log_type: LogType::Command,
            size: 0,
            skip: 0,
            trigger_type: LogTriggerType::Manual,
            trigger_variable: 0,
            trigger_threshold: 0.0,
            trigger_snapshot: 0.0,
            axis: None,
            start_cycle: 0,
        }
    }
}

/// Owns the three published records plus every piece of dispatcher-only
/// state, and the handles to the contracts it drives (planner queues,
/// kinematics solver, log sink, error reporter).
pub struct Controller {
    pub command: CommandRecord,
    pub status: StatusRecord,
    pub config: ConfigRecord,
    pub debug: DebugRecord,

    queues: Vec<Box<dyn TrajectoryQueue>>,
    kinematics: Box<dyn KinematicsSolver>,
    log_sink: Option<Box<dyn LogSink>>,
    reporter: Box<dyn ErrorReporter>,

    pub(crate) world_home: Pose,
    /// Raised whenever a coordinated, teleop, or probe motion was enqueued
    /// since the last home; gates whether the next free-mode home
    /// invalidation clears one axis or every axis.
    pub(crate) rehome_all: bool,
    pub(crate) coordinating: bool,
    pub(crate) teleoperating: bool,
    /// Deferred enable/disable latch; the actual transition happens on the
    /// cyclic executor's next cycle, same as mode changes.
    pub(crate) enabling: Option<bool>,
    pub(crate) num_axes: u8,
    pub(crate) cycle: u64,
    pub(crate) logging: LoggingState,
}

impl Controller {
    pub fn new(
        config: ConfigRecord,
        queues: Vec<Box<dyn TrajectoryQueue>>,
        kinematics: Box<dyn KinematicsSolver>,
        reporter: Box<dyn ErrorReporter>,
        log_sink: Option<Box<dyn LogSink>>,
    ) -> Self {
        assert_eq!(queues.len(), NUM_QUEUES, "expected one queue per joint plus the coordinated queue");
        let num_axes = config.axis_count;
        Self {
            command: CommandRecord::default(),
            status: StatusRecord::default(),
            config,
            debug: DebugRecord::default(),
            queues,
            kinematics,
            log_sink,
            reporter,
            world_home: Pose::ZERO,
            rehome_all: false,
            coordinating: false,
            teleoperating: false,
            enabling: None,
            num_axes,
            cycle: 0,
            logging: LoggingState::default(),
        }
    }

    pub(crate) fn queue(&mut self, index: usize) -> &mut dyn TrajectoryQueue {
        self.queues[index].as_mut()
    }

    pub(crate) fn queues_mut(&mut self) -> &mut [Box<dyn TrajectoryQueue>] {
        &mut self.queues
    }

    pub(crate) fn kinematics(&self) -> &dyn KinematicsSolver {
        self.kinematics.as_ref()
    }

    pub(crate) fn reporter(&mut self) -> &mut dyn ErrorReporter {
        self.reporter.as_mut()
    }

    pub(crate) fn log_sink_mut(&mut self) -> Option<&mut dyn LogSink> {
        self.log_sink.as_deref_mut()
    }

    /// `0 <= axis < MAX_AXIS`, the index-validity convention for all
    /// per-axis commands (as opposed to `SET_NUM_AXES`'s `1..=MAX_AXIS`).
    pub(crate) fn axis_in_range(axis: i32) -> Option<usize> {
        if axis >= 0 && (axis as usize) < MAX_AXIS {
            Some(axis as usize)
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::*;

    #[test]
    fn new_controller_mirrors_config_axis_count() {
        let controller = new_test_controller();
        assert_eq!(controller.num_axes, MAX_AXIS as u8);
    }

    #[test]
    fn axis_in_range_rejects_negative_and_overflowing_indices() {
        assert_eq!(Controller::axis_in_range(-1), None);
        assert_eq!(Controller::axis_in_range(MAX_AXIS as i32), None);
        assert_eq!(Controller::axis_in_range(0), Some(0));
        assert_eq!(Controller::axis_in_range(MAX_AXIS as i32 - 1), Some(MAX_AXIS - 1));
    }
}
