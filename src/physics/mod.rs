mod contact;
mod layers;
mod plugin;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use contact::*;
pub use layers::GameLayer;
pub use plugin::PhysicsPlugin;
