mod config;
mod driver;
pub mod input;
mod jump;
mod messages;
mod movement;
mod plugin;
mod presentation;
mod state;


pub use config::*;
pub use input::{FrameInput, JumpPressed, JumpReleased, MoveInput, RunInput};
pub use jump::{JumpKind, APEX_EXIT_SPEED, MAX_RISE_SPEED};
pub use messages::{MotionTracker, MovementMessage};
pub use plugin::{spawn_player, MovementSystems, PlayerPlugin};
pub use state::*;
