//! Physics world interface and the built-in world used by scenes

pub mod physics_world;
pub mod simple_world;

pub use physics_world::*;
pub use simple_world::SimplePhysicsWorld;
