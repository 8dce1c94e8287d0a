//! Debug gizmo drawing shared by the actor kinds

use glam::{Mat4, Vec3, Vec4};
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, ShaderParams, BlendMode};
use crate::math::AABB;

/// Gizmo color of unselected actors
pub const GIZMO_COLOR: Vec4 = Vec4::new(0.2, 0.6, 0.2, 1.0);

/// Gizmo line color of selected actors
pub const SELECTED_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

pub(crate) fn line_color(selected: bool) -> Vec4 {
    if selected { SELECTED_COLOR } else { GIZMO_COLOR }
}

/// Three axis-aligned segments of half length `extent` through the origin
pub(crate) fn axis_lines(extent: f32) -> [Vec3; 6] {
    [
        Vec3::new(-extent, 0.0, 0.0), Vec3::new(extent, 0.0, 0.0),
        Vec3::new(0.0, -extent, 0.0), Vec3::new(0.0, extent, 0.0),
        Vec3::new(0.0, 0.0, -extent), Vec3::new(0.0, 0.0, extent),
    ]
}

/// Draw a box and a line list in the local space given by `world`.
///
/// Expects `params` to hold the active camera with the stage baseline.
pub(crate) fn draw_gizmo(
    params: &mut ShaderParams,
    device: &mut dyn GraphicsDevice,
    world: Mat4,
    bounds: Option<&AABB>,
    lines: &[Vec3],
    selected: bool,
) -> Result<()> {
    params.modelview_matrix = params.camera_matrix * world;
    params.render.blend_mode = BlendMode::Add;
    params.render.depth_test = false;
    params.render.depth_write = false;

    if let Some(bounds) = bounds {
        params.color = GIZMO_COLOR;
        device.set_shader_params(params)?;
        device.draw_bounding_box(bounds.min, bounds.max)?;
    }

    if !lines.is_empty() {
        params.color = line_color(selected);
        device.set_shader_params(params)?;
        device.draw_lines(lines)?;
    }

    Ok(())
}
