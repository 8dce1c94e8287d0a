//! Resource module - shared assets referenced by actors
//!
//! Textures, materials, models, scripts and armatures are shared through
//! `Arc`. A scene's [`ResourceCache`] holds the loading reference; actors hold
//! further clones. An asset is freed when the last `Arc` is dropped.

mod armature;
mod cache;
mod material;
mod model;
mod script;
mod texture;

use std::sync::atomic::{AtomicU64, Ordering};

pub use armature::{Armature, Bone};
pub use cache::ResourceCache;
pub use material::{Material, MaterialDesc};
pub use model::{Model, ModelArea, ModelDesc};
pub use script::Script;
pub use texture::{Texture, TextureDesc};

static NEXT_RESOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique resource identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u64);

impl ResourceId {
    pub fn next() -> Self {
        Self(NEXT_RESOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Named, identified asset
pub trait Resource {
    fn id(&self) -> ResourceId;

    fn name(&self) -> &str;
}
