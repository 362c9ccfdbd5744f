//! The per-cycle command dispatcher.
//!
//! Reads one pending command from the command record (if any is new),
//! validates it, mutates controller state, and publishes the result. Called
//! once per realtime cycle; nothing here blocks, allocates on the hot path,
//! or suspends. The wall-clock period belongs to the cyclic executor, not
//! this routine — no arm here is time-dependent.

use rtmc_common::command::LogTriggerType;
use rtmc_common::consts::{COORD_QUEUE, MAX_AXIS, MAX_LOG_SIZE};
use rtmc_common::flags::AxisFlags;
use rtmc_common::logging::LogEntry;
use rtmc_common::mode::MotionMode;
use rtmc_common::pose::Pose;
use rtmc_common::result::CommandResult;
use tracing::{debug, warn};

use crate::controller::Controller;
use crate::decode::{decode_command, Command};
use crate::homing::clear_homes;
use crate::validation::{jog_permitted, pose_in_range};

/// What happened when [`dispatch_cycle`] ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A new command was decoded and applied; `status`/`debug` were published.
    Processed,
    /// `command.seq` matched the last-seen sequence; nothing changed.
    Duplicate,
    /// The command record's bracket was unsettled; the cycle was skipped.
    TornRead,
}

/// Run one dispatch cycle against `controller`.
pub fn dispatch_cycle(controller: &mut Controller) -> DispatchOutcome {
    controller.cycle += 1;

    let sampled_head = controller.command.header.sample_head();
    let kind_raw = controller.command.kind;
    let seq = controller.command.seq;
    let decoded = decode_command(&controller.command);

    if controller.command.header.check(sampled_head).is_err() {
        controller.debug.split_count += 1;
        warn!(cycle = controller.cycle, "torn read on command record");
        return DispatchOutcome::TornRead;
    }

    if seq == controller.status.last_cmd_seq {
        return DispatchOutcome::Duplicate;
    }

    controller.status.header.begin_write();
    controller.debug.header.begin_write();
    let config_head_before = controller.config.header.sample_head();

    controller.status.last_cmd_kind = kind_raw;
    controller.status.last_cmd_seq = seq;
    controller.status.result = CommandResult::Ok;

    if controller.logging.armed && controller.logging.log_type == rtmc_common::command::LogType::Command {
        let cycle = controller.cycle;
        if let Some(sink) = controller.log_sink_mut() {
            sink.log_add(LogEntry::Command { kind: kind_raw, seq, cycle });
        }
    }

    match decoded {
        Some(cmd) => apply_command(controller, cmd),
        None => {
            controller.status.result = CommandResult::UnknownCommand;
            controller
                .reporter()
                .report(&format!("unknown command kind {kind_raw}"));
        }
    }

    debug!(
        cycle = controller.cycle,
        kind = kind_raw,
        seq,
        result = ?controller.status.result,
        "dispatched command"
    );

    controller.status.header.publish();
    controller.debug.header.publish();
    if controller.config.header.sample_head() != config_head_before {
        controller.config.header.publish();
    }

    DispatchOutcome::Processed
}

fn jog_preconditions_ok(controller: &Controller) -> bool {
    controller.status.mode == MotionMode::Free && controller.status.in_position && controller.status.enabled
}

fn apply_jog_target(controller: &mut Controller, axis: usize, vel: f64, target: f64) {
    controller.queue(axis).set_vmax(vel.abs());
    let mut pose = Pose::ZERO;
    if let Some(slot) = pose.component_mut(axis) {
        *slot = target;
    }
    let _ = controller.queue(axis).add_line(pose);
    controller.debug.set_joint_target(axis, target);
    controller.status.axes[axis].flags.remove(AxisFlags::ERROR);

    let kinematics_type = controller.kinematics().kinematics_type();
    let rehome_all = controller.rehome_all;
    clear_homes(
        &mut controller.status,
        &mut controller.debug,
        axis,
        kinematics_type,
        rehome_all,
    );
}

/// Snapshot the value a `Delta`-triggered log compares against. `0` reads
/// the scoped axis's commanded position, `1` its following error; anything
/// else reads `0.0` (no variable of that index is defined).
fn snapshot_trigger_variable(controller: &Controller, variable: u8, axis: Option<usize>) -> f64 {
    let Some(axis) = axis else { return 0.0 };
    match variable {
        0 => controller.status.axes[axis].cmd_pos,
        1 => controller.status.axes[axis].ferror,
        _ => 0.0,
    }
}

fn apply_command(controller: &mut Controller, cmd: Command) {
    match cmd {
        Command::Abort { axis } => {
            if controller.status.mode == MotionMode::Teleop {
                controller.debug.teleop_target_vel = Pose::ZERO;
            } else if controller.status.mode == MotionMode::Coord {
                controller.queue(COORD_QUEUE).abort();
                controller.status.motion_error = true;
            } else if let Some(a) = Controller::axis_in_range(axis) {
                controller.queue(a).abort();
                controller.status.axes[a].flags.remove(AxisFlags::HOMING);
                controller.status.axes[a].flags.remove(AxisFlags::ERROR);
            }
        }

        Command::Free => {
            controller.coordinating = false;
            controller.teleoperating = false;
        }

        Command::Coord => {
            let kinematics_type = controller.kinematics().kinematics_type();
            if kinematics_type.requires_homing_for_coordinated_motion()
                && !controller.status.all_active_axes_homed()
            {
                controller.status.result = CommandResult::InvalidCommand;
            } else {
                controller.coordinating = true;
                controller.teleoperating = false;
            }
        }

        Command::Teleop => {
            let kinematics_type = controller.kinematics().kinematics_type();
            if kinematics_type.requires_homing_for_coordinated_motion()
                && !controller.status.all_active_axes_homed()
            {
                controller.status.result = CommandResult::InvalidCommand;
            } else {
                controller.teleoperating = true;
                controller.coordinating = false;
            }
        }

        Command::SetNumAxes { count } => {
            if count >= 1 && (count as usize) <= MAX_AXIS {
                controller.num_axes = count as u8;
                controller.config.header.begin_write();
                controller.config.axis_count = count as u8;
                controller.config.mark_changed();
            }
        }

        Command::SetWorldHome { pose } => {
            controller.world_home = pose;
        }

        Command::SetJointHome { axis, offset } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                controller.debug.joint_home[a] = offset;
            }
        }

        Command::SetHomeOffset { axis, offset } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                controller.config.header.begin_write();
                controller.config.axes[a].home_offset = offset;
                controller.config.mark_changed();
            }
        }

        Command::SetPositionLimits { axis, min, max } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                controller.config.header.begin_write();
                controller.config.axes[a].min_limit = min;
                controller.config.axes[a].max_limit = max;
                controller.config.mark_changed();
            }
        }

        Command::SetMaxFerror { axis, value } => {
            if value >= 0.0 {
                if let Some(a) = Controller::axis_in_range(axis) {
                    controller.config.header.begin_write();
                    controller.config.axes[a].max_ferror = value;
                    controller.config.mark_changed();
                }
            }
        }

        Command::SetMinFerror { axis, value } => {
            if value >= 0.0 {
                if let Some(a) = Controller::axis_in_range(axis) {
                    controller.config.header.begin_write();
                    controller.config.axes[a].min_ferror = value;
                    controller.config.mark_changed();
                }
            }
        }

        Command::OverrideLimits { axis } => {
            controller.status.override_limits = axis >= 0;
            for a in controller.status.axes.iter_mut() {
                a.flags.remove(AxisFlags::ERROR);
            }
        }

        Command::JogCont { axis, vel } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                if !jog_preconditions_ok(controller) {
                    controller.status.result = CommandResult::InvalidCommand;
                    controller.status.axes[a].flags.insert(AxisFlags::ERROR);
                } else if !jog_permitted(&controller.status, a, vel) {
                    controller.status.result = CommandResult::InvalidParams;
                    controller.status.axes[a].flags.insert(AxisFlags::ERROR);
                } else {
                    let homed = controller.status.axes[a].flags.contains(AxisFlags::HOMED);
                    let limits = controller.config.axes[a];
                    let current = controller.status.axes[a].cmd_pos;
                    let target = if vel > 0.0 {
                        if homed { limits.max_limit } else { current + limits.axrange() }
                    } else if vel < 0.0 {
                        if homed { limits.min_limit } else { current - limits.axrange() }
                    } else {
                        current
                    };
                    apply_jog_target(controller, a, vel, target);
                }
            }
        }

        Command::JogIncr { axis, vel, offset } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                if !jog_preconditions_ok(controller) {
                    controller.status.result = CommandResult::InvalidCommand;
                    controller.status.axes[a].flags.insert(AxisFlags::ERROR);
                } else if !jog_permitted(&controller.status, a, vel) {
                    controller.status.result = CommandResult::InvalidParams;
                    controller.status.axes[a].flags.insert(AxisFlags::ERROR);
                } else {
                    let homed = controller.status.axes[a].flags.contains(AxisFlags::HOMED);
                    let limits = controller.config.axes[a];
                    let current = controller.status.axes[a].cmd_pos;
                    let mut target = if vel < 0.0 { current - offset } else { current + offset };
                    if homed {
                        target = target.clamp(limits.min_limit, limits.max_limit);
                    }
                    apply_jog_target(controller, a, vel, target);
                }
            }
        }

        Command::JogAbs { axis, vel, offset } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                if !jog_preconditions_ok(controller) {
                    controller.status.result = CommandResult::InvalidCommand;
                    controller.status.axes[a].flags.insert(AxisFlags::ERROR);
                } else if !jog_permitted(&controller.status, a, vel) {
                    controller.status.result = CommandResult::InvalidParams;
                    controller.status.axes[a].flags.insert(AxisFlags::ERROR);
                } else {
                    let homed = controller.status.axes[a].flags.contains(AxisFlags::HOMED);
                    let limits = controller.config.axes[a];
                    let target = if homed {
                        offset.clamp(limits.min_limit, limits.max_limit)
                    } else {
                        offset
                    };
                    apply_jog_target(controller, a, vel, target);
                }
            }
        }

        Command::SetLine { id, target, term_cond } => {
            dispatch_coordinated_motion(controller, id, term_cond, |c| {
                c.queue(COORD_QUEUE).add_line(target)
            }, target);
        }

        Command::SetCircle { id, end, center, normal, turn, term_cond } => {
            dispatch_coordinated_motion(
                controller,
                id,
                term_cond,
                |c| c.queue(COORD_QUEUE).add_circle(end, center, normal, turn),
                end,
            );
        }

        Command::Probe { id, target, term_cond } => {
            dispatch_coordinated_motion(controller, id, term_cond, |c| {
                c.queue(COORD_QUEUE).add_line(target)
            }, target);
            if controller.status.result.is_ok() {
                controller.status.probe_tripped = false;
                controller.status.probing = true;
            }
        }

        Command::SetVel { vel } => {
            controller.status.vel = vel;
            for q in controller.queues_mut() {
                q.set_vmax(vel);
            }
        }

        Command::SetVelLimit { limit } => {
            controller.status.vel_limit = limit;
            controller.queue(COORD_QUEUE).set_vlimit(limit);
        }

        Command::SetAxisVelLimit { axis, limit } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                controller.status.axes[a].vel_limit = limit;
                controller.status.axes[a].big_vel = limit * 10.0;
            }
        }

        Command::SetHomingVel { axis, vel } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                controller.config.header.begin_write();
                controller.config.axes[a].homing_vel = vel;
                controller.config.mark_changed();
            }
        }

        Command::SetAcc { acc } => {
            controller.status.acc = acc;
            for q in controller.queues_mut() {
                q.set_amax(acc);
            }
        }

        Command::Pause => {
            controller.status.paused = true;
            for q in controller.queues_mut() {
                q.pause();
            }
        }

        Command::Resume => {
            controller.status.paused = false;
            for q in controller.queues_mut() {
                q.resume();
            }
        }

        Command::Step => {
            controller.debug.step_resume_id = controller.status.id;
            controller.status.stepping = true;
            controller.status.paused = false;
            for q in controller.queues_mut() {
                q.resume();
            }
        }

        Command::Scale { scale } => {
            let s = scale.max(0.0);
            controller.status.scale = s;
            for q in controller.queues_mut() {
                q.set_vscale(s);
            }
        }

        Command::Enable => {
            controller.enabling = Some(true);
        }

        Command::Disable => {
            controller.enabling = Some(false);
            if controller.kinematics().kinematics_type().is_inverse_only() {
                controller.coordinating = false;
                controller.teleoperating = false;
            }
        }

        Command::ActivateAxis { axis } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                controller.status.axes[a].flags.insert(AxisFlags::ACTIVE);
            }
        }

        Command::DeactivateAxis { axis } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                controller.status.axes[a].flags.remove(AxisFlags::ACTIVE);
            }
        }

        // Hardware amplifier enable lines live below this layer; recorded
        // here only as a no-op so the wire protocol stays uniform.
        Command::EnableAmplifier { .. } | Command::DisableAmplifier { .. } => {}

        Command::OpenLog {
            axis,
            log_type,
            size,
            skip,
            trigger_type,
            trigger_variable,
            trigger_threshold,
        } => {
            if size <= MAX_LOG_SIZE {
                let axis_scoped = !matches!(log_type, rtmc_common::command::LogType::Command);
                let resolved_axis = Controller::axis_in_range(axis);
                if !axis_scoped || resolved_axis.is_some() {
                    if let Some(sink) = controller.log_sink_mut() {
                        sink.log_init(log_type, size);
                    }
                    controller.logging.log_type = log_type;
                    controller.logging.size = size;
                    controller.logging.skip = skip;
                    controller.logging.trigger_type = trigger_type;
                    controller.logging.trigger_variable = trigger_variable;
                    controller.logging.trigger_threshold = trigger_threshold;
                    controller.logging.axis = if axis_scoped { resolved_axis } else { None };
                    controller.logging.armed = false;
                    if trigger_type == LogTriggerType::Delta {
                        controller.logging.trigger_snapshot = snapshot_trigger_variable(
                            controller,
                            trigger_variable,
                            controller.logging.axis,
                        );
                    }
                }
            }
        }

        Command::StartLog => {
            if controller.logging.log_type != rtmc_common::command::LogType::PositionVoltage {
                controller.logging.armed = true;
                controller.logging.start_cycle = controller.cycle;
            }
        }

        Command::StopLog => {
            controller.logging.armed = false;
        }

        Command::CloseLog => {
            controller.logging = Default::default();
        }

        Command::Home { axis } => {
            if let Some(a) = Controller::axis_in_range(axis) {
                if controller.status.mode != MotionMode::Free || !controller.status.enabled {
                    controller.status.result = CommandResult::InvalidCommand;
                } else {
                    let homing_vel = controller.config.axes[a].homing_vel;
                    let axrange = controller.config.axes[a].axrange();
                    let sign = if homing_vel >= 0.0 { 1.0 } else { -1.0 };
                    let target = controller.status.axes[a].cmd_pos + sign * 2.0 * axrange;

                    controller.queue(a).set_vmax(homing_vel.abs());
                    let mut pose = Pose::ZERO;
                    if let Some(slot) = pose.component_mut(a) {
                        *slot = target;
                    }
                    let _ = controller.queue(a).add_line(pose);
                    controller.debug.set_joint_target(a, target);
                    controller.debug.homing_phase[a] = 1;
                    controller.status.axes[a].flags.insert(AxisFlags::HOMING);
                    controller.status.axes[a].flags.remove(AxisFlags::HOMED);
                }
            }
        }

        Command::EnableWatchdog { wait } => {
            controller.debug.watchdog_enabled = true;
            controller.debug.watchdog_wait = wait.max(0.0);
        }

        Command::DisableWatchdog { wait } => {
            controller.debug.watchdog_enabled = false;
            controller.debug.watchdog_wait = wait.max(0.0);
        }

        Command::ClearProbeFlags => {
            controller.status.probe_tripped = false;
            controller.status.probing = true;
        }

        Command::SetTeleopVector { vector } => {
            if controller.status.mode != MotionMode::Teleop || !controller.status.enabled {
                controller.status.result = CommandResult::InvalidCommand;
            } else {
                let magnitude = vector.teleop_magnitude();
                let limit = controller.config.vel_limit;
                let scaled = if magnitude > limit && magnitude > 0.0 {
                    vector.scaled(limit / magnitude)
                } else {
                    vector
                };
                controller.debug.teleop_target_vel = scaled;
                controller.rehome_all = true;
            }
        }

        Command::SetDebug { level } => {
            controller.config.header.begin_write();
            controller.config.debug_level = level;
            controller.config.mark_changed();
        }
    }
}

/// Shared gate for `SET_LINE`/`SET_CIRCLE`/`PROBE`: mode/enable check,
/// range/limit check, then the caller's own enqueue call. `target` is the
/// pose `pose_in_range` validates against (the circle's end pose for
/// `SET_CIRCLE`).
fn dispatch_coordinated_motion(
    controller: &mut Controller,
    id: i32,
    term_cond: rtmc_common::command::TermCond,
    enqueue: impl FnOnce(&mut Controller) -> Result<(), rtmc_common::planner::PlannerRejected>,
    target: Pose,
) {
    if controller.status.mode != MotionMode::Coord || !controller.status.enabled {
        controller.status.result = CommandResult::InvalidCommand;
        controller.status.motion_error = true;
        return;
    }

    let in_range = pose_in_range(controller.kinematics(), &controller.config, &controller.status, &target);
    if !in_range || !controller.status.limits_clear() {
        controller.status.result = CommandResult::InvalidParams;
        controller.status.motion_error = true;
        controller.queue(COORD_QUEUE).abort();
        return;
    }

    controller.queue(COORD_QUEUE).set_id(id);
    controller.queue(COORD_QUEUE).set_term_cond(term_cond);
    if enqueue(controller).is_err() {
        controller.status.result = CommandResult::BadExec;
        controller.status.motion_error = true;
        controller.queue(COORD_QUEUE).abort();
        return;
    }

    controller.rehome_all = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fakes::{new_test_controller, FakeQueue};
    use rtmc_common::command::CommandKind;
    use rtmc_common::consts::COORD_QUEUE;

    fn issue(controller: &mut Controller, kind: CommandKind, seq: u64, f: impl FnOnce(&mut rtmc_common::command::CommandRecord)) {
        controller.command.kind = kind as u32;
        controller.command.seq = seq;
        f(&mut controller.command);
        controller.command.header.publish();
    }

    #[test]
    fn duplicate_sequence_is_a_no_op() {
        let mut controller = new_test_controller();
        issue(&mut controller, CommandKind::SetVel, 1, |c| c.vel = 3.0);
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.vel, 3.0);

        issue(&mut controller, CommandKind::SetVel, 1, |c| c.vel = 99.0);
        let outcome = dispatch_cycle(&mut controller);
        assert_eq!(outcome, DispatchOutcome::Duplicate);
        assert_eq!(controller.status.vel, 3.0);
    }

    #[test]
    fn unknown_kind_sets_unknown_command_result() {
        let mut controller = new_test_controller();
        issue(&mut controller, CommandKind::Abort, 1, |c| c.kind = 12345);
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.result, CommandResult::UnknownCommand);
    }

    // Scenario 1 (spec concrete scenario 1): unhomed JOG_CONT targets current + AXRANGE.
    #[test]
    fn jog_cont_unhomed_targets_current_plus_axrange() {
        let mut controller = new_test_controller();
        issue(&mut controller, CommandKind::JogCont, 1, |c| {
            c.axis = 0;
            c.vel = 1.0;
        });
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.result, CommandResult::Ok);
        assert_eq!(controller.debug.free_pose.x, 20.0); // current 0 + AXRANGE 20
    }

    // Scenario 2: homed JOG_CONT targets max_limit.
    #[test]
    fn jog_cont_homed_targets_max_limit() {
        let mut controller = new_test_controller();
        controller.status.axes[0].flags.insert(AxisFlags::HOMED);
        issue(&mut controller, CommandKind::JogCont, 1, |c| {
            c.axis = 0;
            c.vel = 1.0;
        });
        dispatch_cycle(&mut controller);
        assert_eq!(controller.debug.free_pose.x, 10.0);
    }

    // Scenario 3: SET_LINE within range under identity kinematics succeeds.
    #[test]
    fn set_line_within_range_succeeds_and_sets_rehome_all() {
        let mut controller = new_test_controller();
        controller.status.mode = MotionMode::Coord;
        issue(&mut controller, CommandKind::SetLine, 1, |c| {
            c.pose = Pose::new(5.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        });
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.result, CommandResult::Ok);
        assert!(controller.rehome_all);
    }

    // Scenario 4: SET_LINE out of range aborts the coord queue and sets MOTION_ERROR.
    #[test]
    fn set_line_out_of_range_aborts_and_sets_motion_error() {
        let mut controller = new_test_controller();
        controller.status.mode = MotionMode::Coord;
        issue(&mut controller, CommandKind::SetLine, 1, |c| {
            c.pose = Pose::new(15.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        });
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.result, CommandResult::InvalidParams);
        assert!(controller.status.motion_error);
    }

    // Scenario 5: negative SET_MAX_FERROR is a silent no-op.
    #[test]
    fn set_max_ferror_negative_is_silent_no_op() {
        let mut controller = new_test_controller();
        let before = controller.config.axes[2].max_ferror;
        issue(&mut controller, CommandKind::SetMaxFerror, 1, |c| {
            c.axis = 2;
            c.max_ferror = -0.1;
        });
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.result, CommandResult::Ok);
        assert_eq!(controller.config.axes[2].max_ferror, before);
    }

    // Scenario 6: teleop vector scaling.
    #[test]
    fn teleop_vector_scales_down_to_vel_limit() {
        let mut controller = new_test_controller();
        controller.status.mode = MotionMode::Teleop;
        controller.config.vel_limit = 2.5;
        issue(&mut controller, CommandKind::SetTeleopVector, 1, |c| {
            c.pose = Pose::new(3.0, 4.0, 0.0, 0.0, 0.0, 0.0);
        });
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.result, CommandResult::Ok);
        let v = controller.debug.teleop_target_vel;
        assert!((v.x - 1.5).abs() < 1e-9);
        assert!((v.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn abort_in_coord_mode_empties_queue_and_raises_motion_error() {
        let mut controller = new_test_controller();
        controller.status.mode = MotionMode::Coord;
        issue(&mut controller, CommandKind::Abort, 1, |_| {});
        dispatch_cycle(&mut controller);
        assert!(controller.status.motion_error);
    }

    #[test]
    fn torn_command_read_increments_split_count_and_skips() {
        let mut controller = new_test_controller();
        controller.command.header.begin_write(); // leave it unsettled
        let outcome = dispatch_cycle(&mut controller);
        assert_eq!(outcome, DispatchOutcome::TornRead);
        assert_eq!(controller.debug.split_count, 1);
    }

    #[test]
    fn home_offset_and_joint_home_write_distinct_slots() {
        let mut controller = new_test_controller();
        issue(&mut controller, CommandKind::SetHomeOffset, 1, |c| {
            c.axis = 0;
            c.offset = 1.5;
        });
        dispatch_cycle(&mut controller);
        issue(&mut controller, CommandKind::SetJointHome, 2, |c| {
            c.axis = 0;
            c.offset = 9.0;
        });
        dispatch_cycle(&mut controller);

        assert_eq!(controller.config.axes[0].home_offset, 1.5);
        assert_eq!(controller.debug.joint_home[0], 9.0);
    }

    #[test]
    fn scale_clamps_negative_to_zero_and_propagates_to_every_queue() {
        let mut controller = new_test_controller();
        issue(&mut controller, CommandKind::Scale, 1, |c| c.scale = -5.0);
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.scale, 0.0);
    }

    #[test]
    fn home_requires_free_mode_and_enabled() {
        let mut controller = new_test_controller();
        controller.status.enabled = false;
        issue(&mut controller, CommandKind::Home, 1, |c| c.axis = 0);
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.result, CommandResult::InvalidCommand);
    }

    #[test]
    fn enable_watchdog_clamps_negative_wait_to_zero() {
        let mut controller = new_test_controller();
        issue(&mut controller, CommandKind::EnableWatchdog, 1, |c| {
            c.watchdog_wait = -3.0;
        });
        dispatch_cycle(&mut controller);
        assert!(controller.debug.watchdog_enabled);
        assert_eq!(controller.debug.watchdog_wait, 0.0);
    }

    #[test]
    fn step_latches_current_id_into_debug_record() {
        let mut controller = new_test_controller();
        controller.status.id = 42;
        issue(&mut controller, CommandKind::Step, 1, |_| {});
        dispatch_cycle(&mut controller);
        assert_eq!(controller.debug.step_resume_id, 42);
        assert!(controller.status.stepping);
    }

    #[test]
    fn coord_refuses_entry_without_homing_under_inverse_only_kinematics() {
        use crate::controller::fakes::RecordingReporter;
        use rtmc_common::configrec::ConfigRecord;
        use rtmc_common::consts::NUM_QUEUES;
        use rtmc_common::kinematics::{KinematicsFlags, KinematicsSolver};
        use rtmc_common::mode::KinematicsType;

        struct InverseOnly;
        impl KinematicsSolver for InverseOnly {
            fn kinematics_type(&self) -> KinematicsType {
                KinematicsType::InverseOnly
            }
            fn inverse(&self, _pose: &Pose, _joints: &mut [f64; MAX_AXIS], _iflags: KinematicsFlags, _fflags: &mut KinematicsFlags) {}
        }

        let mut config = ConfigRecord::default();
        for axis in config.axes.iter_mut() {
            axis.min_limit = -10.0;
            axis.max_limit = 10.0;
        }
        let queues: Vec<Box<dyn rtmc_common::planner::TrajectoryQueue>> =
            (0..NUM_QUEUES).map(|_| Box::new(FakeQueue::default()) as Box<dyn rtmc_common::planner::TrajectoryQueue>).collect();
        let mut controller = Controller::new(config, queues, Box::new(InverseOnly), Box::new(RecordingReporter::default()), None);
        controller.status.axes[0].flags.insert(AxisFlags::ACTIVE);
        controller.status.enabled = true;

        issue(&mut controller, CommandKind::Coord, 1, |_| {});
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.result, CommandResult::InvalidCommand);
        assert!(!controller.coordinating);

        controller.status.axes[0].flags.insert(AxisFlags::HOMED);
        issue(&mut controller, CommandKind::Coord, 2, |_| {});
        dispatch_cycle(&mut controller);
        assert_eq!(controller.status.result, CommandResult::Ok);
        assert!(controller.coordinating);
    }

    #[test]
    fn fake_queue_abort_clears_pending_segments() {
        let mut queue = FakeQueue::default();
        queue.lines.push(Pose::ZERO);
        rtmc_common::planner::TrajectoryQueue::abort(&mut queue);
        assert!(queue.lines.is_empty());
        assert_eq!(queue.aborted_count, 1);
    }

    #[test]
    fn coord_queue_index_is_max_axis() {
        assert_eq!(COORD_QUEUE, MAX_AXIS);
    }
}
