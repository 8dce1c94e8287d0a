//! Render configuration consumed by the draw pass
//!
//! Engine-wide switches the draw routine depends on. A `RenderConfig` is
//! passed into `Scene::pre_draw` / `Scene::draw` on every frame.

use winit::dpi::PhysicalSize;
use crate::graphics_device::{GpuTextureId, RenderTargetId};

/// Window size used when no window has reported its size yet
pub const DEFAULT_WINDOW_SIZE: PhysicalSize<u32> = PhysicalSize::new(1024, 768);

/// Default shadow map edge length in texels
pub const DEFAULT_SHADOW_MAP_SIZE: u32 = 1024;

/// Per-frame render configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Issue occlusion queries after the depth pre-pass and skip hidden entities
    pub occlusion_culling: bool,
    /// Edge length of the square spot-light shadow map
    pub shadow_map_size: u32,
    /// Current window size, used by cameras whose viewport or ortho extents are unset
    pub window_size: PhysicalSize<u32>,
    /// Render target the spot-light shadow pass renders into
    pub shadow_target: RenderTargetId,
    /// Depth texture attached to `shadow_target`, sampled by the lighting pass
    pub shadow_map: GpuTextureId,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            occlusion_culling: false,
            shadow_map_size: DEFAULT_SHADOW_MAP_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
            shadow_target: RenderTargetId(0),
            shadow_map: GpuTextureId(0),
        }
    }
}

impl RenderConfig {
    pub fn with_occlusion_culling(mut self, enabled: bool) -> Self {
        self.occlusion_culling = enabled;
        self
    }

    pub fn with_shadow_map_size(mut self, size: u32) -> Self {
        self.shadow_map_size = size;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = PhysicalSize::new(width, height);
        self
    }

    pub fn with_shadow_target(mut self, target: RenderTargetId, shadow_map: GpuTextureId) -> Self {
        self.shadow_target = target;
        self.shadow_map = shadow_map;
        self
    }
}
