use bevy::prelude::*;

use super::config::MovementParams;
use super::input::{FrameInput, JumpPressed, JumpReleased, MoveInput, RunInput};
use super::state::*;

/// Vertical speed a character leaves the apex hang with
pub const APEX_EXIT_SPEED: f32 = -0.5;

/// Upper bound on vertical speed regardless of tuning
pub const MAX_RISE_SPEED: f32 = 50.0;

/// Which admission rule fired a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// From the ground or within coyote time, costs 1 credit
    Ground,
    /// Another jump during a jump arc, costs 1 credit
    Multi,
    /// First jump after walking off a ledge past coyote time, costs 2 credits
    Air,
}

impl JumpKind {
    pub fn cost(self) -> u8 {
        match self {
            JumpKind::Ground | JumpKind::Multi => 1,
            JumpKind::Air => 2,
        }
    }
}

/// 0.0 at `a`, 1.0 at `b`, clamped
fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

impl CharacterBody {
    /// Decays the jump buffer and coyote timers by one frame.
    pub fn count_timers(&mut self, params: &MovementParams, dt: f32) {
        self.jump_buffer.timer = (self.jump_buffer.timer - dt).max(0.0);

        if self.contacts.grounded {
            self.coyote.timer = params.stats().jump_coyote_time;
        } else {
            self.coyote.timer = (self.coyote.timer - dt).max(0.0);
        }
    }

    /// Applies this frame's press/release edges.
    pub fn handle_jump_edges(&mut self, pressed: bool, released: bool, params: &MovementParams) {
        if pressed {
            self.jump_buffer.timer = params.stats().jump_buffer_time;
            self.jump_buffer.released_during_buffer = false;
        }

        if !released {
            return;
        }

        if self.jump_buffer.is_pending() {
            self.jump_buffer.released_during_buffer = true;
        }

        match self.phase {
            JumpPhase::ApexHang { .. } => {
                // Past the threshold: skip the smooth cancel
                self.velocity.y = 0.0;
                self.phase = JumpPhase::FastFalling {
                    elapsed: params.stats().time_for_upwards_cancel,
                    release_speed: 0.0,
                };
            }
            JumpPhase::Rising if self.velocity.y > 0.0 => {
                self.phase = JumpPhase::FastFalling {
                    elapsed: 0.0,
                    release_speed: self.velocity.y,
                };
            }
            _ => {}
        }
    }

    /// Fires a buffered jump if any admission rule allows it.
    ///
    /// Rules are tried in order: ground (or coyote), multi-jump during a
    /// jump arc, air jump from a fall. The multi and air rules both admit
    /// while `jumps_used < number_of_jumps_allowed`.
    pub fn admit_jump(&mut self, params: &MovementParams) -> Option<JumpKind> {
        if !self.jump_buffer.is_pending() {
            return None;
        }

        let allowed = params.stats().number_of_jumps_allowed;
        let has_credit = self.jumps_used < allowed;

        let kind = if !self.is_jumping() && (self.contacts.grounded || self.coyote.timer > 0.0) {
            JumpKind::Ground
        } else if self.is_jumping() && has_credit {
            JumpKind::Multi
        } else if self.is_falling() && has_credit {
            JumpKind::Air
        } else {
            return None;
        };

        self.initiate_jump(kind.cost(), params);

        if kind == JumpKind::Ground && self.jump_buffer.released_during_buffer {
            // Tap jump: cut straight away for a short hop
            self.phase = JumpPhase::FastFalling {
                elapsed: 0.0,
                release_speed: self.velocity.y,
            };
        }

        debug!(
            "{:?} jump: jumps_used={}/{}, velocity={}",
            kind, self.jumps_used, allowed, self.velocity.y
        );

        Some(kind)
    }

    fn initiate_jump(&mut self, cost: u8, params: &MovementParams) {
        self.phase = JumpPhase::Rising;
        self.jump_buffer.timer = 0.0;
        self.jumps_used = self.jumps_used.saturating_add(cost);
        self.velocity.y = params.initial_jump_velocity();
    }

    fn land(&mut self) {
        debug!(
            "Landed: jumps_used={} reset, impact={}",
            self.jumps_used, self.velocity.y
        );
        self.phase = JumpPhase::Grounded;
        self.jumps_used = 0;
    }

    /// Advances vertical motion by one fixed tick.
    ///
    /// Expects `contacts` to hold this tick's probe results.
    pub fn integrate_vertical(&mut self, params: &MovementParams, dt: f32) {
        let stats = params.stats();
        let cancel_window = stats.time_for_upwards_cancel;
        let gravity = params.gravity();
        let release_gravity = gravity * stats.gravity_on_release_multiplier;

        if (self.is_jumping() || self.is_falling())
            && self.contacts.grounded
            && self.velocity.y <= 0.0
        {
            self.land();
        }

        if self.contacts.bumped_head && self.is_jumping() {
            let already_cut = matches!(
                self.phase,
                JumpPhase::FastFalling { elapsed, .. } if elapsed >= cancel_window
            );
            if !already_cut {
                debug!("Head bump at velocity={}", self.velocity.y);
                self.phase = JumpPhase::FastFalling {
                    elapsed: cancel_window,
                    release_speed: 0.0,
                };
                self.velocity.y = self.velocity.y.min(0.0);
            }
        }

        let mut vy = self.velocity.y;

        self.phase = match self.phase {
            JumpPhase::Rising if vy >= 0.0 => {
                let apex = inverse_lerp(params.initial_jump_velocity(), 0.0, vy);
                if apex > stats.apex_threshold {
                    vy = 0.0;
                    JumpPhase::ApexHang { elapsed: 0.0 }
                } else {
                    vy += gravity * dt;
                    JumpPhase::Rising
                }
            }
            JumpPhase::Rising => {
                vy += release_gravity * dt;
                JumpPhase::Rising
            }
            JumpPhase::ApexHang { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed < stats.apex_hang_time {
                    vy = 0.0;
                    JumpPhase::ApexHang { elapsed }
                } else {
                    vy = APEX_EXIT_SPEED;
                    JumpPhase::FastFalling {
                        elapsed: cancel_window,
                        release_speed: 0.0,
                    }
                }
            }
            JumpPhase::FastFalling {
                elapsed,
                release_speed,
            } => {
                if elapsed >= cancel_window {
                    vy += release_gravity * dt;
                } else {
                    let t = elapsed / cancel_window;
                    vy = release_speed + (0.0 - release_speed) * t;
                }
                JumpPhase::FastFalling {
                    elapsed: elapsed + dt,
                    release_speed,
                }
            }
            JumpPhase::Grounded if self.contacts.grounded => {
                // Settle onto the floor without accumulating
                vy = gravity * dt;
                JumpPhase::Grounded
            }
            JumpPhase::Grounded | JumpPhase::Falling => {
                vy += gravity * dt;
                JumpPhase::Falling
            }
        };

        self.velocity.y = vy.clamp(-stats.max_fall_speed, MAX_RISE_SPEED);
    }
}

/// Samples latched jump edges once per rendered frame
pub fn sample_jump_input(
    mut query: Query<(
        &MoveInput,
        &RunInput,
        &MovementParams,
        &mut JumpPressed,
        &mut JumpReleased,
        &mut CharacterBody,
    )>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (move_input, run_input, params, mut pressed, mut released, mut body) in &mut query {
        let input = FrameInput {
            movement: move_input.0,
            run_held: run_input.0,
            jump_pressed: pressed.0,
            jump_released: released.0,
        };
        body.on_frame(&input, params, dt);

        pressed.0 = false;
        released.0 = false;
    }
}

/// Runs the vertical state machine for one fixed tick
pub fn integrate_vertical_motion(
    mut query: Query<(&MovementParams, &mut CharacterBody)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (params, mut body) in &mut query {
        body.integrate_vertical(params, dt);
    }
}
