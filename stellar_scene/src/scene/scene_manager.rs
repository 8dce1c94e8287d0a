/// Central scene manager for the engine.
///
/// Manages named scenes. Several scenes can be alive at once (a level and
/// an editor preview, say); each is shared behind its own mutex.

use std::path::Path;
use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;
use crate::engine::Engine;
use crate::error::Result;
use crate::engine_bail;
use super::{Scene, SceneLoader};

pub struct SceneManager {
    scenes: FxHashMap<String, Arc<Mutex<Scene>>>,
}

impl SceneManager {
    /// Create a new empty scene manager
    pub fn new() -> Self {
        Self {
            scenes: FxHashMap::default(),
        }
    }

    /// Create a new empty named scene
    ///
    /// # Errors
    ///
    /// Returns an error if a scene with the same name already exists.
    pub fn create_scene(&mut self, name: &str) -> Result<Arc<Mutex<Scene>>> {
        self.insert_scene(Scene::new(name))
    }

    /// Take ownership of a scene built elsewhere, keyed by its name
    ///
    /// # Errors
    ///
    /// Returns an error if a scene with the same name already exists.
    pub fn insert_scene(&mut self, scene: Scene) -> Result<Arc<Mutex<Scene>>> {
        if self.scenes.contains_key(scene.name()) {
            engine_bail!("stellar::SceneManager",
                "Scene '{}' already exists", scene.name());
        }

        let name = scene.name().to_string();
        let scene = Arc::new(Mutex::new(scene));
        self.scenes.insert(name, Arc::clone(&scene));
        Ok(scene)
    }

    /// Load a scene file through `loader` and register it under its name
    ///
    /// # Errors
    ///
    /// Returns the loading error, or an error if the name is taken.
    pub fn load_scene(&mut self, path: &Path, loader: &SceneLoader) -> Result<Arc<Mutex<Scene>>> {
        let scene = loader.load(path)?;
        self.insert_scene(scene).map_err(|e| Engine::report("stellar::SceneManager", e))
    }

    /// Get a scene by name
    pub fn scene(&self, name: &str) -> Option<Arc<Mutex<Scene>>> {
        self.scenes.get(name).cloned()
    }

    /// Remove a scene by name
    ///
    /// Returns the removed scene, or None if not found. Other holders of the
    /// scene keep it alive.
    pub fn remove_scene(&mut self, name: &str) -> Option<Arc<Mutex<Scene>>> {
        self.scenes.remove(name)
    }

    /// Get the number of scenes
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Get all scene names
    pub fn scene_names(&self) -> Vec<&str> {
        self.scenes.keys().map(|k| k.as_str()).collect()
    }

    /// Remove all scenes
    pub fn clear(&mut self) {
        self.scenes.clear();
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_manager_tests.rs"]
mod tests;
