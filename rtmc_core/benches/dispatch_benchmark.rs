//! Dispatch benchmark — measure one `dispatch_cycle` call under a stream
//! of distinct commands, across varying numbers of active axes.
//!
//! A realtime dispatcher has no slack: this exists to keep an eye on
//! per-cycle cost as command handling grows, not to gate a release.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use rtmc_common::command::{CommandKind, TermCond};
use rtmc_common::configrec::ConfigRecord;
use rtmc_common::consts::{MAX_AXIS, NUM_QUEUES};
use rtmc_common::error_reporter::ErrorReporter;
use rtmc_common::flags::AxisFlags;
use rtmc_common::kinematics::{KinematicsFlags, KinematicsSolver};
use rtmc_common::mode::KinematicsType;
use rtmc_common::planner::{PlannerRejected, TrajectoryQueue};
use rtmc_common::pose::Pose;

use rtmc_core::controller::Controller;
use rtmc_core::dispatch::dispatch_cycle;

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

struct IdentityKinematics;

impl KinematicsSolver for IdentityKinematics {
    fn kinematics_type(&self) -> KinematicsType {
        KinematicsType::Identity
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

struct SilentReporter;

impl ErrorReporter for SilentReporter {
    fn report(&mut self, _message: &str) {}
}

fn build_controller(active_axes: usize) -> Controller {
    let mut config = ConfigRecord::default();
    for axis in config.axes.iter_mut() {
        axis.min_limit = -100.0;
        axis.max_limit = 100.0;
        axis.max_vel = 10.0;
        axis.homing_vel = 1.0;
    }
    config.vel_limit = 10.0;
    config.acc = 50.0;

    let queues: Vec<Box<dyn TrajectoryQueue>> =
        (0..NUM_QUEUES).map(|_| Box::new(NullQueue) as Box<dyn TrajectoryQueue>).collect();

    let mut controller = Controller::new(
        config,
        queues,
        Box::new(IdentityKinematics),
        Box::new(SilentReporter),
        None,
    );

    for axis in controller.status.axes.iter_mut().take(active_axes) {
        axis.flags |= AxisFlags::ACTIVE;
    }
    controller.status.enabled = true;
    controller
}

/// Alternate a couple of cheap arms (SET_VEL, JOG_CONT) so the benchmark
/// reflects real command mix rather than one repeated branch.
fn issue_next_command(controller: &mut Controller, seq: u64) {
    controller.command.seq = seq;
    if seq % 2 == 0 {
        controller.command.kind = CommandKind::SetVel as u32;
        controller.command.vel = (seq % 10) as f64;
    } else {
        controller.command.kind = CommandKind::JogCont as u32;
        controller.command.axis = (seq % MAX_AXIS as u64) as i32;
        controller.command.vel = 1.0;
    }
    controller.command.header.publish();
}

fn bench_dispatch_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_cycle");

    for &axes in &[1usize, 4, MAX_AXIS] {
        group.bench_with_input(BenchmarkId::from_parameter(axes), &axes, |b, &axes| {
            let mut controller = build_controller(axes);
            let mut seq = 0u64;
            b.iter(|| {
                seq += 1;
                issue_next_command(&mut controller, seq);
                dispatch_cycle(&mut controller)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch_cycle);
criterion_main!(benches);
