use bevy::prelude::*;

use super::state::*;

/// Movement transitions emitted for presentation consumers.
///
/// Subscribe with `MessageReader<MovementMessage>` to trigger animation,
/// sound or particles.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum MovementMessage {
    Jumped { entity: Entity, jumps_used: u8 },
    Landed { entity: Entity, impact_speed: f32 },
    ApexReached { entity: Entity },
    HeadBumped { entity: Entity },
}

/// Previous-frame state for edge detection in message emission.
#[derive(Component, Default)]
pub struct MotionTracker {
    pub was_grounded: bool,
    pub was_jumping: bool,
    pub was_past_apex: bool,
    pub was_bumping_head: bool,
    pub last_jumps_used: u8,
    pub last_vertical_velocity: f32,
}

/// Compares each body against its `MotionTracker` and emits
/// `MovementMessage`s for state transitions.
pub fn emit_movement_messages(
    mut query: Query<(Entity, &CharacterBody, &mut MotionTracker)>,
    mut writer: MessageWriter<MovementMessage>,
) {
    for (entity, body, mut tracker) in &mut query {
        let airborne_before = tracker.was_jumping || !tracker.was_grounded;

        // --- Jumped ---
        if body.jumps_used > tracker.last_jumps_used {
            writer.write(MovementMessage::Jumped {
                entity,
                jumps_used: body.jumps_used,
            });
        }

        // --- Landed ---
        if body.phase == JumpPhase::Grounded && body.is_grounded() && airborne_before {
            let impact_speed = (-tracker.last_vertical_velocity).max(0.0);
            writer.write(MovementMessage::Landed {
                entity,
                impact_speed,
            });
        }

        // --- Apex ---
        let past_apex = body.phase.is_past_apex_threshold();
        if past_apex && !tracker.was_past_apex {
            writer.write(MovementMessage::ApexReached { entity });
        }

        // --- Head bump ---
        if body.contacts.bumped_head && !tracker.was_bumping_head && tracker.was_jumping {
            writer.write(MovementMessage::HeadBumped { entity });
        }

        tracker.was_grounded = body.is_grounded();
        tracker.was_jumping = body.is_jumping();
        tracker.was_past_apex = past_apex;
        tracker.was_bumping_head = body.contacts.bumped_head;
        tracker.last_jumps_used = body.jumps_used;
        tracker.last_vertical_velocity = body.velocity.y;
    }
}
