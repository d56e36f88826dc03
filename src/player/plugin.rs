use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::config::*;
use super::input::{
    handle_jump_end, handle_jump_start, handle_move_end, handle_move_input, handle_run_end,
    handle_run_start, JumpAction, JumpPressed, JumpReleased, MoveAction, MoveInput, RunAction,
    RunInput,
};
use super::jump::*;
use super::messages::*;
use super::movement::*;
use super::presentation::*;
use super::state::*;
use crate::physics::{CharacterShape, GameLayer};

/// System sets of the per-frame and per-tick movement passes
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementSystems {
    /// Per rendered frame: jump edges, timers, admission
    SampleInput,
    /// Per rendered frame: snapshot, messages, sprite
    Present,
    /// Per fixed tick: contacts, vertical, horizontal, velocity sink
    Simulate,
}

/// Plugin for the 2D platformer character controller
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EnhancedInputPlugin);

        // Register input context for player
        app.add_input_context::<Player>();

        app.add_message::<MovementMessage>();
        app.add_message::<ReloadMovementStats>();

        // Input observers
        app.add_observer(handle_move_input);
        app.add_observer(handle_move_end);
        app.add_observer(handle_run_start);
        app.add_observer(handle_run_end);
        app.add_observer(handle_jump_start);
        app.add_observer(handle_jump_end);

        // Edges are sampled every frame so short taps are never dropped
        app.add_systems(
            Update,
            (
                reload_movement_stats,
                sample_jump_input.in_set(MovementSystems::SampleInput),
                (
                    publish_motion_snapshot,
                    emit_movement_messages,
                    sync_sprite_facing,
                )
                    .chain()
                    .in_set(MovementSystems::Present),
            )
                .chain(),
        );

        // Fixed update systems for physics
        app.add_systems(
            FixedUpdate,
            (
                update_contacts,
                integrate_vertical_motion,
                integrate_horizontal_motion,
                apply_velocity,
            )
                .chain()
                .in_set(MovementSystems::Simulate),
        );
    }
}

/// Spawns a player body with input bindings, physics and movement state.
///
/// Returns the player entity.
pub fn spawn_player(
    commands: &mut Commands,
    params: MovementParams,
    shape: CharacterShape,
    position: Vec2,
) -> Entity {
    info!(
        "Spawning player at {}: gravity={}, initial_jump_velocity={}, jumps={}",
        position,
        params.gravity(),
        params.initial_jump_velocity(),
        params.stats().number_of_jumps_allowed
    );

    commands
        .spawn((
            Player,
            params,
            shape,
            CharacterBody::at(position),
            MotionSnapshot::default(),
            MotionTracker::default(),
        ))
        .insert((
            // Input state
            MoveInput::default(),
            RunInput::default(),
            JumpPressed::default(),
            JumpReleased::default(),
        ))
        .insert((
            // Physics - Dynamic body with locked rotation, let Avian handle collisions
            RigidBody::Dynamic,
            Collider::rectangle(shape.body_size.x, shape.body_size.y),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Trigger]),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            TranslationInterpolation,
            Friction::new(0.0),    // No friction - we handle movement ourselves
            Restitution::new(0.0), // No bounce
            GravityScale(0.0),     // We handle gravity ourselves for more control
        ))
        .insert((
            // Rendering
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(shape.body_size),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
        ))
        .insert(
            // Input bindings
            actions!(Player[
                (
                    Action::<MoveAction>::new(),
                    bindings![
                        KeyCode::KeyD,
                        (KeyCode::KeyA, Negate::all()),
                        KeyCode::ArrowRight,
                        (KeyCode::ArrowLeft, Negate::all()),
                        (KeyCode::KeyW, SwizzleAxis::YXZ),
                        (KeyCode::KeyS, SwizzleAxis::YXZ, Negate::all()),
                    ],
                ),
                (
                    Action::<JumpAction>::new(),
                    bindings![KeyCode::Space, GamepadButton::South],
                ),
                (
                    Action::<RunAction>::new(),
                    bindings![KeyCode::ShiftLeft, GamepadButton::LeftTrigger],
                ),
            ]),
        )
        .id()
}
