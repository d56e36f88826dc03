//! Entry points for hosts that drive a [`CharacterBody`] without the ECS
//! schedule. The plugin's systems call the same stages in the same order.

use bevy::prelude::*;

use super::config::MovementParams;
use super::input::FrameInput;
use super::jump::JumpKind;
use super::state::CharacterBody;
use crate::physics::{CharacterShape, ShapeCaster};

impl CharacterBody {
    /// Per rendered frame: decay timers, apply edges, try to jump.
    pub fn on_frame(
        &mut self,
        input: &FrameInput,
        params: &MovementParams,
        dt: f32,
    ) -> Option<JumpKind> {
        self.count_timers(params, dt);
        self.handle_jump_edges(input.jump_pressed, input.jump_released, params);
        self.admit_jump(params)
    }

    /// Per fixed step: contacts, then vertical, then horizontal.
    ///
    /// Returns the velocity to hand to the physics body.
    pub fn on_fixed_tick(
        &mut self,
        input: &FrameInput,
        params: &MovementParams,
        shape: &CharacterShape,
        caster: &impl ShapeCaster,
        dt: f32,
    ) -> Vec2 {
        self.update_contacts(self.position, shape, params, caster);
        self.integrate_vertical(params, dt);
        self.apply_horizontal(input.movement, input.run_held, params, dt);
        self.velocity
    }
}
