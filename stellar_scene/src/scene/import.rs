/// Imported-scene builder - flattens an `ImportedScene` into scene actors
///
/// Nodes are visited depth-first. Each node with usable geometry becomes one
/// entity and one model with an area and a material per mesh. A node whose
/// meshes were all skipped adds nothing, but its children are still visited.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use glam::{Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;
use crate::actor::{Entity, Light, LightType, SceneActor};
use crate::camera::Camera;
use crate::engine::Engine;
use crate::error::Error;
use crate::import::{
    ImportedCamera, ImportedLight, ImportedLightKind, ImportedMaterial, ImportedNode,
    ImportedScene, SceneImporter,
};
use crate::resource::{Material, MaterialDesc, Model, ModelDesc, Texture};
use super::Scene;

const SOURCE: &str = "stellar::Scene";

/// Falloff distance given to imported lights; attenuation drives their reach
const IMPORTED_LIGHT_DISTANCE: f32 = 0.0001;

impl Scene {
    /// Build a scene from an importer's output.
    ///
    /// Texture paths are resolved against the directory of `path` and
    /// loaded through `importer`. Non-triangular faces are reported and
    /// skipped.
    pub fn from_imported(path: &Path, imported: &ImportedScene, importer: &dyn SceneImporter) -> Scene {
        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("scene");
        let mut scene = Scene::new(name);
        scene.set_file_path(path);

        let mut builder = ImportBuilder {
            scene: &mut scene,
            imported,
            importer,
            base_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            textures: FxHashMap::default(),
        };
        for root in &imported.roots {
            builder.add_node(root);
        }
        for camera in &imported.cameras {
            builder.add_camera(camera);
        }
        for light in &imported.lights {
            builder.add_light(light);
        }

        crate::engine_info!(SOURCE, "Imported scene '{}': {} entities, {} cameras, {} lights",
            scene.name(), scene.entity_count(), scene.camera_count(), scene.light_count());
        scene
    }
}

struct ImportBuilder<'a> {
    scene: &'a mut Scene,
    imported: &'a ImportedScene,
    importer: &'a dyn SceneImporter,
    base_dir: PathBuf,
    /// Resolved path -> loaded texture, so shared files load once
    textures: FxHashMap<PathBuf, Option<Arc<Texture>>>,
}

impl ImportBuilder<'_> {
    fn add_node(&mut self, node: &ImportedNode) {
        self.add_node_entity(node);
        for child in &node.children {
            self.add_node(child);
        }
    }

    fn add_node_entity(&mut self, node: &ImportedNode) {
        let imported = self.imported;
        let meshes: Vec<_> = node.meshes.iter()
            .filter_map(|&index| imported.meshes.get(index))
            .filter(|mesh| mesh.positions.len() >= 3 && !mesh.faces.is_empty())
            .collect();
        let with_tex_coords = meshes.iter().any(|mesh| mesh.tex_coords.is_some());

        let mut desc = ModelDesc { name: node.name.clone(), ..Default::default() };
        let mut materials = Vec::with_capacity(meshes.len());

        for mesh in meshes {
            let offset = desc.vertices.len() as u32;
            let count = mesh.positions.len();
            desc.vertices.extend_from_slice(&mesh.positions);

            if mesh.normals.len() == count {
                desc.normals.extend_from_slice(&mesh.normals);
            } else {
                desc.normals.resize(desc.vertices.len(), Vec3::ZERO);
            }
            if with_tex_coords {
                match &mesh.tex_coords {
                    Some(tex_coords) if tex_coords.len() == count => {
                        desc.tex_coords.extend_from_slice(tex_coords);
                    }
                    _ => desc.tex_coords.resize(desc.vertices.len(), Vec2::ZERO),
                }
            }

            let mut area = Vec::with_capacity(mesh.faces.len() * 3);
            for face in &mesh.faces {
                if face.len() != 3 {
                    Engine::report(SOURCE, Error::InvalidMesh(format!(
                        "Node '{}': skipping face with {} vertices", node.name, face.len())));
                    continue;
                }
                area.extend(face.iter().map(|index| index + offset));
            }
            desc.areas.push(area);

            let material = imported.materials.get(mesh.material);
            materials.push(self.build_material(&node.name, material));
        }

        let index_count: usize = desc.areas.iter().map(Vec::len).sum();
        if desc.vertices.len() <= 2 || index_count <= 2 {
            return;
        }

        let model = match Model::from_desc(desc) {
            Ok(model) => Arc::new(model),
            Err(err) => {
                Engine::report(SOURCE, err);
                return;
            }
        };
        self.scene.add_model(Arc::clone(&model));

        let mut entity = Entity::new(&node.name);
        entity.base_mut().set_position(node.position);
        entity.base_mut().set_orientation(node.orientation);
        entity.set_model(Some(model));
        for material in materials {
            entity.add_material(material);
        }
        self.scene.add_entity(entity);
    }

    fn build_material(&mut self, node_name: &str, source: Option<&ImportedMaterial>) -> Arc<Material> {
        let Some(source) = source else {
            let material = Arc::new(Material::new(node_name));
            self.scene.add_material(Arc::clone(&material));
            return material;
        };

        let mut desc = MaterialDesc { name: source.name.clone(), ..Default::default() };
        if let Some(color) = source.diffuse_color {
            desc.diffuse_color = color;
        }
        if let Some(color) = source.specular_color {
            desc.specular_color = color;
        }
        if let Some(color) = source.ambient_color {
            desc.ambient_color = color;
        }
        if let Some(shininess) = source.shininess {
            desc.specular_power = shininess * source.shininess_strength.unwrap_or(1.0);
        }
        desc.diffuse_map = self.texture(source.diffuse_texture.as_deref());
        desc.specular_map = self.texture(source.specular_texture.as_deref());
        desc.normal_map = self.texture(source.normal_texture.as_deref());
        desc.light_map = self.texture(source.light_texture.as_deref());
        desc.height_map = self.texture(source.height_texture.as_deref());

        let material = Arc::new(Material::from_desc(desc));
        self.scene.add_material(Arc::clone(&material));
        material
    }

    fn texture(&mut self, relative: Option<&Path>) -> Option<Arc<Texture>> {
        let path = self.base_dir.join(relative?);
        if let Some(cached) = self.textures.get(&path) {
            return cached.clone();
        }

        let texture = self.importer.load_texture(&path).map(Arc::new);
        match &texture {
            Some(texture) => {
                self.scene.add_texture(Arc::clone(texture));
            }
            None => {
                crate::engine_warn!(SOURCE, "Texture '{}' could not be loaded", path.display());
            }
        }
        self.textures.insert(path, texture.clone());
        texture
    }

    fn add_camera(&mut self, source: &ImportedCamera) {
        let mut camera = Camera::new(&source.name);
        camera.set_perspective(source.fov.to_degrees(), -1.0, source.clip_near, source.clip_far);
        camera.base_mut().set_position(source.position);
        camera.base_mut().set_orientation(source.orientation);
        self.scene.add_camera(camera);
    }

    fn add_light(&mut self, source: &ImportedLight) {
        let light_type = match source.kind {
            ImportedLightKind::Directional => LightType::Sun,
            ImportedLightKind::Point => LightType::Point,
            ImportedLightKind::Spot => LightType::Spot,
        };

        let mut light = Light::new(&source.name, light_type);
        light.set_color(Vec4::new(source.color.x, source.color.y, source.color.z, 1.0));
        light.set_cone(
            source.inner_cone.to_degrees(),
            (source.outer_cone - source.inner_cone).to_degrees(),
        );
        light.set_distance(IMPORTED_LIGHT_DISTANCE);
        light.set_fade_speed((source.attenuation_linear + source.attenuation_quadratic) * 0.5);
        light.base_mut().set_position(source.position);
        light.base_mut().set_direction(source.direction);
        self.scene.add_light(light);
    }
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
