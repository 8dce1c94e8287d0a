/// GraphicsDevice trait - immediate-mode rendering interface consumed by the scene
///
/// The scene never touches buffers, shaders or pipelines directly. It sets a
/// shader-parameter block, then issues draw calls; the backend is free to map
/// that onto whatever API it wraps.

use glam::Vec3;
use crate::error::Result;
use crate::actor::ActorId;
use crate::graphics_device::ShaderParams;

/// Render target handle owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(pub u32);

/// GPU texture handle owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuTextureId(pub u32);

/// Occlusion query handle owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryId(pub u32);

/// 2D rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// What a draw call contributes to the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// Depth only (pre-pass and shadow maps)
    Depth,
    /// Material ambient term
    Ambient,
    /// Unlit material contribution (light maps)
    WithoutLighting,
    /// One light's contribution
    WithLighting,
    /// Particle billboards
    Particles,
}

/// Vertex-indexed geometry for one draw call
///
/// Vertex streams are flat `f32` slices (xyz for positions and normals,
/// uv for texture coordinates). `indices` address those streams.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    /// Actor that issued the call
    pub owner: ActorId,
    pub mode: DrawMode,
    pub vertices: &'a [f32],
    pub normals: &'a [f32],
    pub tex_coords: &'a [f32],
    pub indices: &'a [u32],
}

impl DrawCall<'_> {
    /// Number of triangles referenced by `indices`
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Immediate-mode graphics device
///
/// Draw calls use the shader parameters from the most recent
/// `set_shader_params` call.
pub trait GraphicsDevice {
    /// Set the viewport rectangle
    fn set_viewport(&mut self, viewport: Rect2D) -> Result<()>;

    /// Currently bound render target (`None` = default framebuffer)
    fn render_target(&self) -> Option<RenderTargetId>;

    /// Bind a render target, or the default framebuffer with `None`
    fn set_render_target(&mut self, target: Option<RenderTargetId>) -> Result<()>;

    /// Clear the depth attachment of the bound target
    fn clear_depth_buffer(&mut self, depth: f32) -> Result<()>;

    /// Upload the shader-parameter block used by subsequent draws
    fn set_shader_params(&mut self, params: &ShaderParams) -> Result<()>;

    /// Draw vertex-indexed triangles
    fn draw(&mut self, call: &DrawCall<'_>) -> Result<()>;

    /// Draw a solid box (occlusion proxies, debug gizmos)
    fn draw_bounding_box(&mut self, min: Vec3, max: Vec3) -> Result<()>;

    /// Draw a line list (pairs of points)
    fn draw_lines(&mut self, vertices: &[Vec3]) -> Result<()>;

    /// Allocate an occlusion query
    fn create_query(&mut self) -> Result<QueryId>;

    /// Start counting samples for `query`
    fn begin_query(&mut self, query: QueryId) -> Result<()>;

    /// Stop counting samples for the open query
    fn end_query(&mut self) -> Result<()>;

    /// Samples that passed the depth test for `query`
    fn query_result(&mut self, query: QueryId) -> Result<u32>;
}
