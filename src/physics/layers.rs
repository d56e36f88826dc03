use avian2d::prelude::*;

/// Collision layers for the physics simulation
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Player character
    Player,
    /// Walkable geometry; the only layer the contact probes hit
    Ground,
    /// Triggers and sensors
    Trigger,
}
