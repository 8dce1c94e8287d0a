/// GltfImporter - glTF 2.0 (.gltf / .glb) decoder built on the `gltf` crate
///
/// Node transforms are baked into world space while the hierarchy is kept.
/// Every glTF primitive becomes one `ImportedMesh`; primitives without a
/// material share a trailing default material.

use std::path::{Path, PathBuf};
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use gltf::camera::Projection;
use gltf::khr_lights_punctual::Kind;
use gltf::mesh::Mode;
use crate::error::{Error, Result};
use super::{
    ImportedCamera, ImportedLight, ImportedLightKind, ImportedMaterial, ImportedMesh,
    ImportedNode, ImportedScene, SceneImporter,
};

/// Used when a camera leaves its far plane open
const DEFAULT_CLIP_FAR: f32 = 1000.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct GltfImporter;

impl GltfImporter {
    pub fn new() -> Self {
        Self
    }
}

impl SceneImporter for GltfImporter {
    fn supports_extension(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("gltf") || extension.eq_ignore_ascii_case("glb")
    }

    fn import(&self, path: &Path) -> Result<ImportedScene> {
        let (document, buffers, _images) = gltf::import(path).map_err(|e| match e {
            gltf::Error::Io(err) => Error::CantOpenFile(format!("{}: {}", path.display(), err)),
            other => Error::InvalidFile(format!("{}: {}", path.display(), other)),
        })?;

        let mut out = ImportedScene::default();

        for material in document.materials() {
            out.materials.push(convert_material(&material));
        }
        let default_material = out.materials.len();
        out.materials.push(ImportedMaterial::new("default"));

        // glTF mesh index -> imported mesh indices (one per primitive)
        let mut mesh_map = Vec::with_capacity(document.meshes().len());
        for mesh in document.meshes() {
            let mut ids = Vec::new();
            for primitive in mesh.primitives() {
                ids.push(out.meshes.len());
                out.meshes.push(convert_primitive(&primitive, &buffers, default_material));
            }
            mesh_map.push(ids);
        }

        let scene = document.default_scene().or_else(|| document.scenes().next());
        if let Some(scene) = scene {
            for node in scene.nodes() {
                let root = convert_node(&node, Mat4::IDENTITY, &mesh_map, &mut out);
                out.roots.push(root);
            }
        }

        crate::engine_debug!("stellar::GltfImporter",
            "Imported '{}': {} meshes, {} cameras, {} lights",
            path.display(), out.meshes.len(), out.cameras.len(), out.lights.len());

        Ok(out)
    }
}

// ===== NODES =====

fn convert_node(
    node: &gltf::Node,
    parent: Mat4,
    mesh_map: &[Vec<usize>],
    out: &mut ImportedScene,
) -> ImportedNode {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    let (_scale, orientation, position) = world.to_scale_rotation_translation();

    let name = node.name().map(str::to_string)
        .unwrap_or_else(|| format!("node_{}", node.index()));

    let mut imported = ImportedNode::new(&name);
    imported.position = position;
    imported.orientation = orientation;
    if let Some(mesh) = node.mesh() {
        if let Some(ids) = mesh_map.get(mesh.index()) {
            imported.meshes = ids.clone();
        }
    }

    if let Some(camera) = node.camera() {
        match camera.projection() {
            Projection::Perspective(p) => out.cameras.push(ImportedCamera {
                name: camera.name().unwrap_or(&name).to_string(),
                position,
                orientation,
                fov: p.yfov(),
                clip_near: p.znear(),
                clip_far: p.zfar().unwrap_or(DEFAULT_CLIP_FAR),
            }),
            Projection::Orthographic(_) => {
                crate::engine_warn!("stellar::GltfImporter",
                    "Skipping orthographic camera on node '{}'", name);
            }
        }
    }

    if let Some(light) = node.light() {
        out.lights.push(convert_light(&light, &name, position, orientation));
    }

    for child in node.children() {
        imported.children.push(convert_node(&child, world, mesh_map, out));
    }

    imported
}

fn convert_light(
    light: &gltf::khr_lights_punctual::Light,
    node_name: &str,
    position: Vec3,
    orientation: Quat,
) -> ImportedLight {
    let (kind, inner_cone, outer_cone) = match light.kind() {
        Kind::Directional => (ImportedLightKind::Directional, 0.0, 0.0),
        Kind::Point => (ImportedLightKind::Point, 0.0, 0.0),
        Kind::Spot { inner_cone_angle, outer_cone_angle } => {
            (ImportedLightKind::Spot, inner_cone_angle, outer_cone_angle)
        }
    };

    // glTF only gives a cutoff range; spread it over both terms
    let attenuation = light.range().filter(|r| *r > 0.0).map(|r| 1.0 / r).unwrap_or(0.0);

    ImportedLight {
        name: light.name().unwrap_or(node_name).to_string(),
        kind,
        position,
        direction: orientation * Vec3::NEG_Z,
        color: Vec3::from_array(light.color()),
        inner_cone,
        outer_cone,
        attenuation_linear: attenuation,
        attenuation_quadratic: attenuation,
    }
}

// ===== MESHES =====

fn convert_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    default_material: usize,
) -> ImportedMesh {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

    let positions: Vec<Vec3> = reader.read_positions()
        .map(|iter| iter.map(Vec3::from_array).collect())
        .unwrap_or_default();
    let normals: Vec<Vec3> = reader.read_normals()
        .map(|iter| iter.map(Vec3::from_array).collect())
        .unwrap_or_default();
    let tex_coords: Option<Vec<Vec2>> = reader.read_tex_coords(0)
        .map(|tc| tc.into_f32().map(Vec2::from_array).collect());
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    ImportedMesh {
        positions,
        normals,
        tex_coords,
        faces: faces_for_mode(primitive.mode(), &indices),
        material: primitive.material().index().unwrap_or(default_material),
    }
}

/// Split an index stream into polygons. Strips and fans are triangulated;
/// line and point primitives keep their arity.
fn faces_for_mode(mode: Mode, indices: &[u32]) -> Vec<Vec<u32>> {
    match mode {
        Mode::Triangles => indices.chunks(3).map(<[u32]>::to_vec).collect(),
        Mode::TriangleStrip => (2..indices.len())
            .map(|i| {
                if i % 2 == 0 {
                    vec![indices[i - 2], indices[i - 1], indices[i]]
                } else {
                    vec![indices[i - 1], indices[i - 2], indices[i]]
                }
            })
            .collect(),
        Mode::TriangleFan => (2..indices.len())
            .map(|i| vec![indices[0], indices[i - 1], indices[i]])
            .collect(),
        Mode::Lines => indices.chunks(2).map(<[u32]>::to_vec).collect(),
        Mode::LineStrip | Mode::LineLoop => indices.windows(2).map(<[u32]>::to_vec).collect(),
        Mode::Points => indices.iter().map(|&i| vec![i]).collect(),
    }
}

// ===== MATERIALS =====

fn convert_material(material: &gltf::Material) -> ImportedMaterial {
    let name = material.name().map(str::to_string)
        .unwrap_or_else(|| format!("material_{}", material.index().unwrap_or(0)));
    let pbr = material.pbr_metallic_roughness();

    let mut imported = ImportedMaterial::new(&name);
    imported.diffuse_color = Some(Vec4::from_array(pbr.base_color_factor()));
    imported.shininess = Some(((1.0 - pbr.roughness_factor()) * 128.0).max(1.0));
    imported.diffuse_texture = pbr.base_color_texture()
        .and_then(|info| texture_path(&info.texture()));
    imported.normal_texture = material.normal_texture()
        .and_then(|info| texture_path(&info.texture()));
    imported.light_texture = material.occlusion_texture()
        .and_then(|info| texture_path(&info.texture()));
    imported
}

/// External image URI; embedded images are not carried over
fn texture_path(texture: &gltf::Texture) -> Option<PathBuf> {
    match texture.source().source() {
        gltf::image::Source::Uri { uri, .. } if !uri.starts_with("data:") => Some(PathBuf::from(uri)),
        _ => None,
    }
}
