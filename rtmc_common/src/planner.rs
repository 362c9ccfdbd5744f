//! The trajectory planner contract (consumed, never implemented here).
//!
//! N+1 opaque queues: one per joint (free-mode) plus one coordinated
//! queue. The dispatcher only ever calls the methods below; queue
//! internals, and the cyclic executor that steps them, are out of scope.

use crate::command::TermCond;
use crate::pose::Pose;

/// A planner refused a well-formed request (queue full, segment invalid
/// for the planner's internal state, etc). Maps to `CommandResult::BadExec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerRejected;

/// One trajectory queue: either a single joint's free-mode queue, or the
/// shared coordinated queue. Implementations are assumed internally
/// consistent within a cycle; the dispatcher never blocks on one.
pub trait TrajectoryQueue {
    fn set_id(&mut self, id: i32);
    fn set_vmax(&mut self, v: f64);
    fn set_vlimit(&mut self, v: f64);
    fn set_amax(&mut self, a: f64);
    fn set_vscale(&mut self, s: f64);
    fn set_term_cond(&mut self, c: TermCond);
    fn add_line(&mut self, target: Pose) -> Result<(), PlannerRejected>;
    fn add_circle(
        &mut self,
        end: Pose,
        center: Pose,
        normal: Pose,
        turn: i32,
    ) -> Result<(), PlannerRejected>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn abort(&mut self);
}
