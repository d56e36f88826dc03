use bevy::ecs::observer::On;
use bevy::prelude::{Component, Deref, DerefMut, EntityEvent, Query, Vec2};
use bevy_enhanced_input::prelude::*;

/// Move left/right (and up/down, which only counts as "input present")
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct MoveAction;

/// Jump action
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct JumpAction;

/// Run modifier (hold)
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct RunAction;

/// Stores the current movement input vector
#[derive(Component, Default, Deref, DerefMut)]
pub struct MoveInput(pub Vec2);

/// Stores whether run is held
#[derive(Component, Default, Deref, DerefMut)]
pub struct RunInput(pub bool);

/// Latched until the frame sampler consumes it
#[derive(Component, Default)]
pub struct JumpPressed(pub bool);

/// Latched until the frame sampler consumes it
#[derive(Component, Default)]
pub struct JumpReleased(pub bool);

/// Everything the movement core reads from input in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub movement: Vec2,
    pub run_held: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
}

/// System to handle move input via observer
pub fn handle_move_input(trigger: On<Fire<MoveAction>>, mut query: Query<&mut MoveInput>) {
    if let Ok(mut move_input) = query.get_mut(trigger.event_target()) {
        move_input.0 = trigger.value;
    }
}

/// Clear move input when all movement keys are released
pub fn handle_move_end(trigger: On<Complete<MoveAction>>, mut query: Query<&mut MoveInput>) {
    if let Ok(mut move_input) = query.get_mut(trigger.event_target()) {
        move_input.0 = Vec2::ZERO;
    }
}

/// Handle run start
pub fn handle_run_start(trigger: On<Start<RunAction>>, mut query: Query<&mut RunInput>) {
    if let Ok(mut run) = query.get_mut(trigger.event_target()) {
        run.0 = true;
    }
}

/// Handle run end
pub fn handle_run_end(trigger: On<Complete<RunAction>>, mut query: Query<&mut RunInput>) {
    if let Ok(mut run) = query.get_mut(trigger.event_target()) {
        run.0 = false;
    }
}

/// Handle jump press
pub fn handle_jump_start(trigger: On<Start<JumpAction>>, mut query: Query<&mut JumpPressed>) {
    if let Ok(mut jump) = query.get_mut(trigger.event_target()) {
        jump.0 = true;
    }
}

/// Handle jump release
pub fn handle_jump_end(trigger: On<Complete<JumpAction>>, mut query: Query<&mut JumpReleased>) {
    if let Ok(mut released) = query.get_mut(trigger.event_target()) {
        released.0 = true;
    }
}
