//! Command dispatcher demonstration binary.
//!
//! Loads a machine configuration, wires a [`Controller`] with built-in
//! pass-through implementations of the planner/kinematics/logging
//! contracts, and runs [`dispatch_cycle`] at a fixed period. The actual
//! supervisor transport (shared memory, a socket, whatever carries the
//! command/status/debug records in production) is out of scope here —
//! this binary exists to prove the dispatcher runs end to end against a
//! real configuration file.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use rtmc_common::command::TermCond;
use rtmc_common::consts::{MAX_AXIS, NUM_QUEUES};
use rtmc_common::kinematics::{KinematicsFlags, KinematicsSolver};
use rtmc_common::mode::KinematicsType;
use rtmc_common::planner::{PlannerRejected, TrajectoryQueue};
use rtmc_common::pose::Pose;
use rtmc_common::error_reporter::ErrorReporter;
use tracing::{info, warn};

use rtmc_core::config::load_config;
use rtmc_core::controller::Controller;
use rtmc_core::dispatch::dispatch_cycle;
use rtmc_core::rt::rt_setup;

#[derive(Parser, Debug)]
#[command(about = "Realtime motion-controller command dispatcher")]
struct Args {
    /// Path to the machine configuration TOML file.
    #[arg(long)]
    config: PathBuf,

    /// Number of dispatch cycles to run before exiting.
    #[arg(long, default_value_t = 5_000)]
    cycles: u64,

    /// CPU core to pin the dispatch loop to. Only takes effect when this
    /// binary is built with the `rt` feature.
    #[arg(long, default_value_t = 0)]
    cpu_core: usize,

    /// SCHED_FIFO priority to request for the dispatch loop. Only takes
    /// effect when this binary is built with the `rt` feature.
    #[arg(long, default_value_t = 80)]
    rt_priority: i32,
}

/// A queue with no planner behind it: every enqueue succeeds and is
/// discarded. Stands in for the real trajectory planner, which is out of
/// scope for this crate.
#[derive(Default)]
struct NullQueue;

impl TrajectoryQueue for NullQueue {
    fn set_id(&mut self, _id: i32) {}
    fn set_vmax(&mut self, _v: f64) {}
    fn set_vlimit(&mut self, _v: f64) {}
    fn set_amax(&mut self, _a: f64) {}
    fn set_vscale(&mut self, _s: f64) {}
    fn set_term_cond(&mut self, _c: TermCond) {}
    fn add_line(&mut self, _target: Pose) -> Result<(), PlannerRejected> {
        Ok(())
    }
    fn add_circle(&mut self, _end: Pose, _center: Pose, _normal: Pose, _turn: i32) -> Result<(), PlannerRejected> {
        Ok(())
    }
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    fn abort(&mut self) {}
}

/// Drives the kinematics contract off the machine config's declared type.
/// Under `Identity` it passes the Cartesian pose straight through to the
/// joints; any other declared type is not implemented by this
/// demonstration and falls back to the same pass-through, which is only
/// correct for `Identity` machines.
struct ConfiguredKinematics {
    kinematics_type: KinematicsType,
}

impl KinematicsSolver for ConfiguredKinematics {
    fn kinematics_type(&self) -> KinematicsType {
        self.kinematics_type
    }

    fn inverse(
        &self,
        pose: &Pose,
        joints: &mut [f64; MAX_AXIS],
        _iflags: KinematicsFlags,
        _fflags: &mut KinematicsFlags,
    ) {
        for (axis, joint) in joints.iter_mut().enumerate() {
            *joint = pose.component(axis).unwrap_or(0.0);
        }
    }
}

struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&mut self, message: &str) {
        warn!(target: "rtmc_core::dispatch", "{message}");
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let loaded = match load_config(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if loaded.kinematics_type != KinematicsType::Identity {
        warn!(
            kinematics_type = ?loaded.kinematics_type,
            "demonstration binary only implements identity kinematics; joint targets will not reflect a real transform"
        );
    }

    if let Err(e) = rt_setup(args.cpu_core, args.rt_priority) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let queues: Vec<Box<dyn TrajectoryQueue>> =
        (0..NUM_QUEUES).map(|_| Box::new(NullQueue) as Box<dyn TrajectoryQueue>).collect();

    let mut controller = Controller::new(
        loaded.config,
        queues,
        Box::new(ConfiguredKinematics { kinematics_type: loaded.kinematics_type }),
        Box::new(TracingReporter),
        None,
    );

    info!(cycles = args.cycles, "starting command dispatcher");

    for cycle in 0..args.cycles {
        let outcome = dispatch_cycle(&mut controller);
        if cycle % 1000 == 0 {
            info!(
                cycle,
                ?outcome,
                result = ?controller.status.result,
                split_count = controller.debug.split_count,
                "dispatch heartbeat"
            );
        }
        thread::sleep(Duration::from_millis(1));
    }
}
