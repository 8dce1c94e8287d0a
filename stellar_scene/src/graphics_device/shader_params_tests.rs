use glam::Mat4;
use super::*;

// ============================================================================
// Tests: defaults
// ============================================================================

#[test]
fn test_render_params_default_baseline() {
    let rp = RenderParams::default();
    assert!(rp.depth_test);
    assert!(rp.depth_write);
    assert_eq!(rp.depth_func, CompareOp::Less);
    assert!(rp.color_write());
    assert!(rp.alpha_write());
    assert_eq!(rp.blend_mode, BlendMode::None);
    assert!(rp.cull_face);
    assert_eq!(rp.offset_bias, 0.0);
    assert_eq!(rp.offset_scale, 0.0);
}

#[test]
fn test_write_mask_flags() {
    let mut rp = RenderParams::default();
    rp.write_mask = WriteMask::empty();
    assert!(!rp.color_write());
    assert!(!rp.alpha_write());

    rp.write_mask = WriteMask::ALPHA;
    assert!(!rp.color_write());
    assert!(rp.alpha_write());
}

#[test]
fn test_shader_params_default_has_no_light() {
    let params = ShaderParams::default();
    assert!(params.light.is_none());
    assert_eq!(params.textures.len(), MAX_TEXTURES);
    assert!(params.textures.iter().all(|t| t.texture.is_none()));
}

// ============================================================================
// Tests: reset
// ============================================================================

#[test]
fn test_reset_restores_baseline() {
    let mut params = ShaderParams::default();
    params.render.blend_mode = BlendMode::Add;
    params.render.depth_func = CompareOp::Equal;
    params.render.offset_bias = 2.0;
    params.projection_matrix = Mat4::from_scale(glam::Vec3::splat(2.0));

    params.reset();

    assert_eq!(params, ShaderParams::default());
}

#[test]
fn test_clear_material_textures_keeps_shadow_slot() {
    let mut params = ShaderParams::default();
    params.textures[0].texture = Some(GpuTextureId(3));
    params.textures[SHADOW_MAP_SLOT].texture = Some(GpuTextureId(9));
    params.textures[SHADOW_MAP_SLOT].kind = TextureKind::ShadowMap;

    params.clear_material_textures();

    assert!(params.textures[0].texture.is_none());
    assert_eq!(params.textures[SHADOW_MAP_SLOT].texture, Some(GpuTextureId(9)));
}
