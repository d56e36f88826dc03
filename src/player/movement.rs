use avian2d::prelude::*;
use bevy::prelude::*;

use super::config::MovementParams;
use super::input::{MoveInput, RunInput};
use super::state::*;
use crate::physics::{AvianCaster, CharacterShape, ShapeCaster, detect_contacts};

impl CharacterBody {
    /// Flips facing only when the input points the other way.
    pub fn turn_check(&mut self, move_input: Vec2) {
        match self.facing {
            Facing::Right if move_input.x < 0.0 => self.facing = Facing::Left,
            Facing::Left if move_input.x > 0.0 => self.facing = Facing::Right,
            _ => {}
        }
    }

    /// Moves horizontal velocity toward the input target by one fixed tick.
    ///
    /// Uses a clamped lerp, so the velocity never passes the target.
    pub fn apply_horizontal(
        &mut self,
        move_input: Vec2,
        run_held: bool,
        params: &MovementParams,
        dt: f32,
    ) {
        let stats = params.stats();
        let grounded = self.contacts.grounded;

        let (target, rate) = if move_input != Vec2::ZERO {
            self.turn_check(move_input);

            let max_speed = if run_held {
                stats.max_run_speed
            } else {
                stats.max_walk_speed
            };
            let accel = if grounded {
                stats.ground_acceleration
            } else {
                stats.air_acceleration
            };
            (move_input.x * max_speed, accel)
        } else {
            let decel = if grounded {
                stats.ground_deceleration
            } else {
                stats.air_deceleration
            };
            (0.0, decel)
        };

        let t = (rate * dt).clamp(0.0, 1.0);
        self.velocity.x += (target - self.velocity.x) * t;
    }

    /// Refreshes position and contacts for this tick.
    pub fn update_contacts(
        &mut self,
        position: Vec2,
        shape: &CharacterShape,
        params: &MovementParams,
        caster: &impl ShapeCaster,
    ) {
        self.position = position;
        self.contacts = detect_contacts(position, shape, params.stats(), caster);
    }
}

/// Probes ground and ceiling via box casts
pub fn update_contacts(
    spatial_query: SpatialQuery,
    mut query: Query<(
        &Transform,
        &CharacterShape,
        &MovementParams,
        &mut CharacterBody,
    )>,
) {
    let caster = AvianCaster::new(&spatial_query);

    for (transform, shape, params, mut body) in &mut query {
        let was_grounded = body.contacts.grounded;
        body.update_contacts(transform.translation.truncate(), shape, params, &caster);

        if was_grounded != body.contacts.grounded {
            trace!("Grounded changed: {}", body.contacts.grounded);
        }
    }
}

/// Applies horizontal locomotion
pub fn integrate_horizontal_motion(
    mut query: Query<(&MoveInput, &RunInput, &MovementParams, &mut CharacterBody)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (input, run, params, mut body) in &mut query {
        body.apply_horizontal(input.0, run.0, params, dt);
    }
}

/// Writes the finished body velocity into Avian's LinearVelocity
pub fn apply_velocity(mut query: Query<(&CharacterBody, &mut LinearVelocity), With<Player>>) {
    for (body, mut lin_vel) in &mut query {
        lin_vel.0 = body.velocity;
    }
}
