/// Shader-parameter block and fixed-function render state
///
/// Each draw stage resets the block with `ShaderParams::default()` and then
/// overrides only what it needs, so no stage inherits blend or depth state
/// from the one before it.

use bitflags::bitflags;
use glam::{Mat4, Vec3, Vec4};
use crate::actor::LightType;
use crate::graphics_device::GpuTextureId;

/// Texture slots in the parameter block
pub const MAX_TEXTURES: usize = 8;

/// Slot reserved for the shadow map during lighting
pub const SHADOW_MAP_SLOT: usize = MAX_TEXTURES - 1;

// ===== RENDER STATE =====

/// Comparison operator for depth testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

/// Framebuffer blending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    None,
    Transparent,
    Add,
    Multiply,
}

bitflags! {
    /// Framebuffer channels written by a draw
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WriteMask: u8 {
        const COLOR = 1 << 0;
        const ALPHA = 1 << 1;
    }
}

/// Fixed-function state for a draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub depth_test: bool,
    pub depth_write: bool,
    pub depth_func: CompareOp,
    pub write_mask: WriteMask,
    pub blend_mode: BlendMode,
    pub cull_face: bool,
    /// Constant polygon offset
    pub offset_bias: f32,
    /// Slope-scaled polygon offset
    pub offset_scale: f32,
    pub line_width: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            depth_test: true,
            depth_write: true,
            depth_func: CompareOp::Less,
            write_mask: WriteMask::COLOR | WriteMask::ALPHA,
            blend_mode: BlendMode::None,
            cull_face: true,
            offset_bias: 0.0,
            offset_scale: 0.0,
            line_width: 1.0,
        }
    }
}

impl RenderParams {
    pub fn color_write(&self) -> bool {
        self.write_mask.contains(WriteMask::COLOR)
    }

    pub fn alpha_write(&self) -> bool {
        self.write_mask.contains(WriteMask::ALPHA)
    }
}

// ===== TEXTURES =====

/// How a bound texture is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    ColorMap,
    NormalMap,
    HeightMap,
    SpecularMap,
    LightMap,
    ShadowMap,
}

/// Texture-coordinate generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureProjection {
    None,
    /// Coordinates come from `TextureParams::matrix` applied to view-space position
    Shadow,
}

/// One texture slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureParams {
    pub kind: TextureKind,
    pub texture: Option<GpuTextureId>,
    pub projection: TextureProjection,
    pub matrix: Mat4,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            kind: TextureKind::ColorMap,
            texture: None,
            projection: TextureProjection::None,
            matrix: Mat4::IDENTITY,
        }
    }
}

// ===== MATERIAL / LIGHT =====

/// Material constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub diffuse_color: Vec4,
    pub specular_color: Vec4,
    pub ambient_color: Vec4,
    pub specular_power: f32,
    /// False for unlit draws
    pub lighting: bool,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            diffuse_color: Vec4::ONE,
            specular_color: Vec4::new(0.25, 0.25, 0.25, 1.0),
            ambient_color: Vec4::ZERO,
            specular_power: 32.0,
            lighting: true,
        }
    }
}

/// The light a lighting draw is evaluated for, in view space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    pub light_type: LightType,
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Vec4,
    pub distance: f32,
    pub fade_speed: f32,
    /// Cosine of the inner cone half angle
    pub inner_cone_cos: f32,
    /// Cosine of the outer cone half angle
    pub outer_cone_cos: f32,
}

// ===== SHADER PARAMS =====

/// Everything a draw call reads besides its geometry
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderParams {
    pub render: RenderParams,
    pub projection_matrix: Mat4,
    /// Object-to-view transform of the current draw
    pub modelview_matrix: Mat4,
    /// World-to-view transform of the current camera
    pub camera_matrix: Mat4,
    pub camera_position: Vec3,
    pub clip_start: f32,
    pub clip_end: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub material: MaterialParams,
    pub textures: [TextureParams; MAX_TEXTURES],
    pub light: Option<LightParams>,
    /// Scene ambient term, set for the ambient pass only
    pub ambient_color: Vec4,
    /// Flat color for gizmos and bounding boxes
    pub color: Vec4,
}

impl Default for ShaderParams {
    fn default() -> Self {
        Self {
            render: RenderParams::default(),
            projection_matrix: Mat4::IDENTITY,
            modelview_matrix: Mat4::IDENTITY,
            camera_matrix: Mat4::IDENTITY,
            camera_position: Vec3::ZERO,
            clip_start: 0.0,
            clip_end: 0.0,
            viewport_width: 0,
            viewport_height: 0,
            material: MaterialParams::default(),
            textures: [TextureParams::default(); MAX_TEXTURES],
            light: None,
            ambient_color: Vec4::ZERO,
            color: Vec4::ONE,
        }
    }
}

impl ShaderParams {
    /// Reset every field to its baseline
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clear the material texture slots, leaving the shadow slot alone
    pub fn clear_material_textures(&mut self) {
        for slot in &mut self.textures[..SHADOW_MAP_SLOT] {
            *slot = TextureParams::default();
        }
    }
}

#[cfg(test)]
#[path = "shader_params_tests.rs"]
mod tests;
