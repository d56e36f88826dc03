use bevy::prelude::*;

use crate::physics::Contacts;

/// Marker component for the player entity (also used as input context)
#[derive(Component, Default)]
pub struct Player;

/// Horizontal facing of a character
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1.0 for right, -1.0 for left
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Vertical phase of a character.
///
/// `Rising`, `ApexHang` and `FastFalling` all belong to a jump that started
/// from an admitted press and stay in effect until landing. `Falling` is only
/// entered by leaving the ground without jumping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum JumpPhase {
    #[default]
    Grounded,
    /// Ascending (or descending past the apex without a cut)
    Rising,
    /// Holding zero vertical speed at the top of the arc
    ApexHang { elapsed: f32 },
    /// Jump was cut by a release, a head bump or the end of the apex hang
    FastFalling { elapsed: f32, release_speed: f32 },
    /// Walked off a ledge
    Falling,
}

impl JumpPhase {
    pub fn is_jumping(self) -> bool {
        matches!(
            self,
            JumpPhase::Rising | JumpPhase::ApexHang { .. } | JumpPhase::FastFalling { .. }
        )
    }

    pub fn is_falling(self) -> bool {
        matches!(self, JumpPhase::Falling)
    }

    pub fn is_fast_falling(self) -> bool {
        matches!(self, JumpPhase::FastFalling { .. })
    }

    pub fn is_past_apex_threshold(self) -> bool {
        matches!(self, JumpPhase::ApexHang { .. })
    }
}

/// Jump buffer tracking
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpBuffer {
    /// Seconds the last press stays armed for
    pub timer: f32,
    /// The press was released before the buffered jump fired
    pub released_during_buffer: bool,
}

impl JumpBuffer {
    pub fn is_pending(&self) -> bool {
        self.timer > 0.0
    }
}

/// Coyote time tracking
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoyoteTime {
    /// Seconds of grace left after leaving the ground
    pub timer: f32,
}

/// Movement state of one character.
///
/// Only the character's own driver systems write to this; everything else
/// reads [`MotionSnapshot`].
#[derive(Component, Debug, Clone, Default)]
pub struct CharacterBody {
    pub position: Vec2,
    pub facing: Facing,
    /// x = horizontal, y = vertical
    pub velocity: Vec2,
    pub contacts: Contacts,
    pub phase: JumpPhase,
    pub jump_buffer: JumpBuffer,
    pub coyote: CoyoteTime,
    pub jumps_used: u8,
}

impl CharacterBody {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..default()
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.contacts.grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.phase.is_jumping()
    }

    pub fn is_falling(&self) -> bool {
        self.phase.is_falling()
    }

    pub fn is_fast_falling(&self) -> bool {
        self.phase.is_fast_falling()
    }

    pub fn horizontal_speed(&self) -> f32 {
        let speed = self.velocity.x.abs();
        if speed > 0.001 { speed } else { 0.0 }
    }

    pub fn snapshot(&self) -> MotionSnapshot {
        MotionSnapshot {
            grounded: self.is_grounded(),
            falling: self.is_falling(),
            jumping: self.is_jumping(),
            horizontal_speed: self.horizontal_speed(),
            position: self.position,
            facing: self.facing,
        }
    }
}

/// Read-only view of a character for animation and camera consumers
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionSnapshot {
    pub grounded: bool,
    pub falling: bool,
    pub jumping: bool,
    pub horizontal_speed: f32,
    pub position: Vec2,
    pub facing: Facing,
}
