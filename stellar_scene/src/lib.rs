/*!
# Stellar Scene

Scene core of the Stellar 3D engine.

A [`Scene`](stellar::scene::Scene) owns cameras, entities, lights, particle
systems and sprites, the resources they share, and the physics worlds they are
bound into. Each frame the application calls `update`, `pre_draw`, `draw` and
`post_draw`; drawing goes through the
[`GraphicsDevice`](stellar::graphics::GraphicsDevice) trait so any backend can
sit underneath.

## Architecture

- **Camera**: projection, view matrix, frustum culling tests
- **Actors**: shared `ActorBase` plus entity, light, particles and sprite kinds
- **Scene**: ordered actor lists, visibility queues, forward light-pass draw
- **Loading**: packages through a `PakReader`, third-party files through a
  `SceneImporter` (glTF built in)
- **Physics**: `PhysicsWorld` trait with a simple built-in world
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod math;
pub mod camera;
pub mod graphics_device;
pub mod physics;
pub mod resource;
pub mod actor;
pub mod package;
pub mod import;
pub mod scene;

// Main stellar namespace module
pub mod stellar {
    // Error types
    pub use crate::error::{Error, ErrorCode, Result};

    // Engine facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod config {
        pub use crate::config::*;
    }

    pub mod math {
        pub use crate::math::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    // Device trait and shader parameter block
    pub mod graphics {
        pub use crate::graphics_device::*;
    }

    pub mod physics {
        pub use crate::physics::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod actor {
        pub use crate::actor::*;
    }

    pub mod package {
        pub use crate::package::*;
    }

    pub mod import {
        pub use crate::import::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
