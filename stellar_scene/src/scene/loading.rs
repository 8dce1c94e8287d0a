/// Scene loading - extension dispatch, package scenes and get-or-load lookups
///
/// Every failure here is returned to the caller and also recorded in the
/// engine's last-error slot.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::import::{GltfImporter, SceneImporter};
use crate::package::{Package, PakReader, ResourceKind};
use crate::resource::{Armature, Material, Model, Script, Texture};
use super::{ActorKey, CameraKey, EntityKey, LightKey, ParticlesKey, Scene, SpriteKey};

const SOURCE: &str = "stellar::SceneLoader";

/// Picks the decoder for a scene file from its extension
///
/// `.pak` files go to the package reader; anything else goes to the first
/// registered importer claiming the extension.
pub struct SceneLoader {
    pak_reader: Option<Arc<dyn PakReader>>,
    importers: Vec<Box<dyn SceneImporter>>,
}

impl SceneLoader {
    /// Loader with the glTF importer and no package reader
    pub fn new() -> Self {
        Self {
            pak_reader: None,
            importers: vec![Box::new(GltfImporter::new())],
        }
    }

    pub fn with_pak_reader(mut self, reader: Arc<dyn PakReader>) -> Self {
        self.pak_reader = Some(reader);
        self
    }

    /// Register another importer, consulted after the existing ones
    pub fn with_importer(mut self, importer: Box<dyn SceneImporter>) -> Self {
        self.importers.push(importer);
        self
    }

    pub fn pak_reader(&self) -> Option<&Arc<dyn PakReader>> {
        self.pak_reader.as_ref()
    }

    pub fn importer_count(&self) -> usize {
        self.importers.len()
    }

    /// Load the scene stored at `path`
    pub fn load(&self, path: &Path) -> Result<Scene> {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return Err(Engine::report(SOURCE, Error::CantOpenFile(
                format!("'{}' has no extension", path.display()))));
        };

        if extension.eq_ignore_ascii_case("pak") {
            let Some(reader) = &self.pak_reader else {
                return Err(Engine::report(SOURCE, Error::InvalidFile(
                    format!("no package reader registered for '{}'", path.display()))));
            };
            return Scene::from_package(path, Arc::clone(reader));
        }

        let Some(importer) = self.importers.iter().find(|i| i.supports_extension(extension)) else {
            return Err(Engine::report(SOURCE, Error::InvalidFile(
                format!("unsupported scene format '.{}' for '{}'", extension, path.display()))));
        };

        let imported = importer.import(path).map_err(|e| Engine::report(SOURCE, e))?;
        Ok(Scene::from_imported(path, &imported, &**importer))
    }
}

impl Default for SceneLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Load a scene file through `loader`
    pub fn create_from_file(path: &Path, loader: &SceneLoader) -> Result<Scene> {
        loader.load(path)
    }

    /// Open a package and load its scene.
    ///
    /// Applies the scene settings entry when present, then loads every
    /// camera, entity, light, particle system and sprite entry in index
    /// order. The package stays attached for later `get_or_load_*` calls.
    pub fn from_package(path: &Path, reader: Arc<dyn PakReader>) -> Result<Scene> {
        let package = Arc::new(Package::open(path, reader).map_err(|e| Engine::report(SOURCE, e))?);

        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("scene");
        let mut scene = Scene::new(name);
        scene.set_file_path(path);
        scene.package = Some(Arc::clone(&package));

        if let Some(entry) = package.indices_of(ResourceKind::SceneSettings).next() {
            let settings = package
                .open_at(entry.offset)
                .and_then(|mut input| package.reader().read_scene_settings(&mut *input))
                .map_err(|e| Engine::report(SOURCE, e))?;
            scene.set_ambient_color(settings.ambient_color);
            scene.set_gravity(settings.gravity);
            scene.set_physics_enabled(settings.physics);
            scene.set_run_scripts(settings.run_scripts);
        }

        for entry in package.indices() {
            match entry.kind {
                ResourceKind::Camera => {
                    scene.get_or_load_camera(&entry.name)?;
                }
                ResourceKind::Entity => {
                    scene.get_or_load_entity(&entry.name)?;
                }
                ResourceKind::Light => {
                    scene.get_or_load_light(&entry.name)?;
                }
                ResourceKind::Particles => {
                    scene.get_or_load_particle_system(&entry.name)?;
                }
                ResourceKind::Sprite => {
                    scene.get_or_load_sprite(&entry.name)?;
                }
                _ => {}
            }
        }

        crate::engine_info!(SOURCE, "Loaded scene '{}' from '{}': {} cameras, {} entities, {} lights",
            scene.name(), path.display(), scene.camera_count(), scene.entity_count(), scene.light_count());
        Ok(scene)
    }

    // ===== GET OR LOAD: RESOURCES =====

    /// Cached texture, or the package entry decoded and cached.
    ///
    /// `Ok(None)` when neither the cache nor the package has it.
    pub fn get_or_load_texture(&mut self, name: &str) -> Result<Option<Arc<Texture>>> {
        if let Some(texture) = self.textures.get(name) {
            return Ok(Some(texture));
        }
        let loaded = self.load_entry(name, ResourceKind::Texture,
            |reader, input, _| reader.read_texture(input))?;
        Ok(loaded.map(|texture| {
            let texture = Arc::new(texture);
            self.textures.insert(Arc::clone(&texture));
            texture
        }))
    }

    pub fn get_or_load_material(&mut self, name: &str) -> Result<Option<Arc<Material>>> {
        if let Some(material) = self.materials.get(name) {
            return Ok(Some(material));
        }
        let loaded = self.load_entry(name, ResourceKind::Material,
            |reader, input, scene| reader.read_material(input, scene))?;
        Ok(loaded.map(|material| {
            let material = Arc::new(material);
            self.materials.insert(Arc::clone(&material));
            material
        }))
    }

    pub fn get_or_load_model(&mut self, name: &str) -> Result<Option<Arc<Model>>> {
        if let Some(model) = self.models.get(name) {
            return Ok(Some(model));
        }
        let loaded = self.load_entry(name, ResourceKind::Model,
            |reader, input, _| reader.read_model(input))?;
        Ok(loaded.map(|model| {
            let model = Arc::new(model);
            self.models.insert(Arc::clone(&model));
            model
        }))
    }

    pub fn get_or_load_script(&mut self, name: &str) -> Result<Option<Arc<Script>>> {
        if let Some(script) = self.scripts.get(name) {
            return Ok(Some(script));
        }
        let loaded = self.load_entry(name, ResourceKind::Script,
            |reader, input, _| reader.read_script(input))?;
        Ok(loaded.map(|script| {
            let script = Arc::new(script);
            self.scripts.insert(Arc::clone(&script));
            script
        }))
    }

    pub fn get_or_load_armature(&mut self, name: &str) -> Result<Option<Arc<Armature>>> {
        if let Some(armature) = self.armatures.get(name) {
            return Ok(Some(armature));
        }
        let loaded = self.load_entry(name, ResourceKind::Armature,
            |reader, input, _| reader.read_armature(input))?;
        Ok(loaded.map(|armature| {
            let armature = Arc::new(armature);
            self.armatures.insert(Arc::clone(&armature));
            armature
        }))
    }

    // ===== GET OR LOAD: ACTORS =====

    /// Scene camera, or the package entry decoded and added
    pub fn get_or_load_camera(&mut self, name: &str) -> Result<Option<CameraKey>> {
        if let Some(key) = self.cameras.find(name) {
            return Ok(Some(key));
        }
        let loaded = self.load_entry(name, ResourceKind::Camera,
            |reader, input, scene| reader.read_camera(input, scene))?;
        Ok(loaded.map(|camera| self.add_camera(camera)))
    }

    pub fn get_or_load_entity(&mut self, name: &str) -> Result<Option<EntityKey>> {
        if let Some(key) = self.entities.find(name) {
            return Ok(Some(key));
        }
        let loaded = self.load_entry(name, ResourceKind::Entity,
            |reader, input, scene| reader.read_entity(input, scene))?;
        Ok(loaded.map(|entity| self.add_entity(entity)))
    }

    pub fn get_or_load_light(&mut self, name: &str) -> Result<Option<LightKey>> {
        if let Some(key) = self.lights.find(name) {
            return Ok(Some(key));
        }
        let loaded = self.load_entry(name, ResourceKind::Light,
            |reader, input, scene| reader.read_light(input, scene))?;
        Ok(loaded.map(|light| self.add_light(light)))
    }

    pub fn get_or_load_particle_system(&mut self, name: &str) -> Result<Option<ParticlesKey>> {
        if let Some(key) = self.particles.find(name) {
            return Ok(Some(key));
        }
        let loaded = self.load_entry(name, ResourceKind::Particles,
            |reader, input, scene| reader.read_particles(input, scene))?;
        Ok(loaded.map(|particles| self.add_particle_system(particles)))
    }

    pub fn get_or_load_sprite(&mut self, name: &str) -> Result<Option<SpriteKey>> {
        if let Some(key) = self.sprites.find(name) {
            return Ok(Some(key));
        }
        let loaded = self.load_entry(name, ResourceKind::Sprite,
            |reader, input, scene| reader.read_sprite(input, scene))?;
        Ok(loaded.map(|sprite| self.add_sprite(sprite)))
    }

    /// First of camera, entity, light, particle system and sprite found
    /// under `name`, in the scene or in the package
    pub fn get_or_load_actor(&mut self, name: &str) -> Result<Option<ActorKey>> {
        if let Some(key) = self.get_or_load_camera(name)? {
            return Ok(Some(ActorKey::Camera(key)));
        }
        if let Some(key) = self.get_or_load_entity(name)? {
            return Ok(Some(ActorKey::Entity(key)));
        }
        if let Some(key) = self.get_or_load_light(name)? {
            return Ok(Some(ActorKey::Light(key)));
        }
        if let Some(key) = self.get_or_load_particle_system(name)? {
            return Ok(Some(ActorKey::Particles(key)));
        }
        Ok(self.get_or_load_sprite(name)?.map(ActorKey::Sprite))
    }

    /// Seek to the package entry `(name, kind)` and decode it with `read`.
    ///
    /// `Ok(None)` when there is no package or no such entry.
    fn load_entry<T>(
        &mut self,
        name: &str,
        kind: ResourceKind,
        read: impl FnOnce(&dyn PakReader, &mut dyn Read, &mut Scene) -> Result<T>,
    ) -> Result<Option<T>> {
        let Some(package) = self.package.clone() else {
            return Ok(None);
        };
        let Some(entry) = package.index(name, kind) else {
            return Ok(None);
        };

        crate::engine_trace!(SOURCE, "Loading {:?} '{}' at offset {}", kind, name, entry.offset);
        let reader = package.reader();
        package
            .open_at(entry.offset)
            .and_then(|mut input| read(reader.as_ref(), &mut *input, self))
            .map(Some)
            .map_err(|e| Engine::report(SOURCE, e))
    }
}

#[cfg(test)]
#[path = "loading_tests.rs"]
mod tests;
