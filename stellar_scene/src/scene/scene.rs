/// Scene - ordered actor lists, resource caches and the two physics worlds
///
/// Adding an actor binds its bodies and joints into the scene's worlds and
/// sets its scene back-reference; taking it out undoes both. Actor keys stay
/// valid until the actor is removed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use glam::{Vec3, Vec4};
use rustc_hash::FxHashSet;
use crate::actor::{ActorBase, ActorId, Entity, Light, Particles, SceneActor, SceneId, Sprite};
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::graphics_device::ShaderParams;
use crate::package::Package;
use crate::physics::{Collision, JointDesc, PhysicsWorld, SimplePhysicsWorld};
use crate::resource::{
    Armature, Material, Model, Resource, ResourceCache, ResourceId, Script, Texture,
};
use super::{
    forward_up, ActorKey, ActorList, AudioListener, CameraKey, EntityKey, LightKey,
    ParticlesKey, SceneObject, ScriptHost, SpriteKey, VisibilityQueue,
};

/// Per-kind lookup and removal, all backed by one `ActorList` field
macro_rules! actor_accessors {
    (
        $list:ident, $key:ty, $actor:ty,
        count: $count:ident, get: $get:ident, get_mut: $get_mut:ident,
        by_name: $by_name:ident, by_index: $by_index:ident, iter: $iter:ident,
        take: $take:ident, remove: $remove:ident,
        remove_by_name: $remove_by_name:ident, remove_by_index: $remove_by_index:ident
    ) => {
        pub fn $count(&self) -> usize {
            self.$list.len()
        }

        pub fn $get(&self, key: $key) -> Option<&$actor> {
            self.$list.get(key)
        }

        pub fn $get_mut(&mut self, key: $key) -> Option<&mut $actor> {
            self.$list.get_mut(key)
        }

        /// First match in insertion order
        pub fn $by_name(&self, name: &str) -> Option<$key> {
            self.$list.find(name)
        }

        pub fn $by_index(&self, index: usize) -> Option<$key> {
            self.$list.key_at(index)
        }

        pub fn $iter(&self) -> impl Iterator<Item = ($key, &$actor)> {
            self.$list.iter()
        }

        /// Take the actor out and drop it; false when it is not in this scene
        pub fn $remove(&mut self, key: $key) -> bool {
            self.$take(key).is_some()
        }

        pub fn $remove_by_name(&mut self, name: &str) -> bool {
            match self.$by_name(name) {
                Some(key) => self.$remove(key),
                None => false,
            }
        }

        pub fn $remove_by_index(&mut self, index: usize) -> bool {
            match self.$by_index(index) {
                Some(key) => self.$remove(key),
                None => false,
            }
        }
    };
}

pub struct Scene {
    pub(super) id: SceneId,
    name: String,
    file_path: Option<PathBuf>,

    pub(super) cameras: ActorList<CameraKey, Camera>,
    pub(super) entities: ActorList<EntityKey, Entity>,
    pub(super) lights: ActorList<LightKey, Light>,
    pub(super) particles: ActorList<ParticlesKey, Particles>,
    pub(super) sprites: ActorList<SpriteKey, Sprite>,

    pub(super) textures: ResourceCache<Texture>,
    pub(super) materials: ResourceCache<Material>,
    pub(super) models: ResourceCache<Model>,
    pub(super) scripts: ResourceCache<Script>,
    pub(super) armatures: ResourceCache<Armature>,

    /// Simulation world
    pub(super) world: Box<dyn PhysicsWorld>,
    /// Never-simulated world holding picking probes
    pub(super) debug_world: Box<dyn PhysicsWorld>,

    pub(super) active_camera: Option<CameraKey>,
    ambient_color: Vec4,
    physics: bool,
    run_scripts: bool,

    pub(super) entity_queue: VisibilityQueue<EntityKey>,
    pub(super) sprite_queue: VisibilityQueue<SpriteKey>,
    pub(super) shader_params: ShaderParams,

    pub(super) package: Option<Arc<Package>>,
    script_host: Option<Box<dyn ScriptHost>>,
    listener: Option<Box<dyn AudioListener>>,
}

impl Scene {
    /// Create an empty scene backed by two `SimplePhysicsWorld`s
    pub fn new(name: &str) -> Self {
        Self::with_worlds(
            name,
            Box::new(SimplePhysicsWorld::new()),
            Box::new(SimplePhysicsWorld::new()),
        )
    }

    /// Create an empty scene on caller-provided physics worlds
    pub fn with_worlds(
        name: &str,
        world: Box<dyn PhysicsWorld>,
        debug_world: Box<dyn PhysicsWorld>,
    ) -> Self {
        crate::engine_debug!("stellar::Scene", "Creating scene '{}'", name);

        Self {
            id: SceneId::next(),
            name: name.to_string(),
            file_path: None,
            cameras: ActorList::new(),
            entities: ActorList::new(),
            lights: ActorList::new(),
            particles: ActorList::new(),
            sprites: ActorList::new(),
            textures: ResourceCache::new(),
            materials: ResourceCache::new(),
            models: ResourceCache::new(),
            scripts: ResourceCache::new(),
            armatures: ResourceCache::new(),
            world,
            debug_world,
            active_camera: None,
            ambient_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            physics: true,
            run_scripts: true,
            entity_queue: VisibilityQueue::new(),
            sprite_queue: VisibilityQueue::new(),
            shader_params: ShaderParams::default(),
            package: None,
            script_host: None,
            listener: None,
        }
    }

    // ===== PROPERTIES =====

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// File the scene was loaded from
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub(crate) fn set_file_path(&mut self, path: &Path) {
        self.file_path = Some(path.to_path_buf());
    }

    pub fn ambient_color(&self) -> Vec4 {
        self.ambient_color
    }

    pub fn set_ambient_color(&mut self, color: Vec4) {
        self.ambient_color = color;
    }

    pub fn gravity(&self) -> Vec3 {
        self.world.gravity()
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.world.set_gravity(gravity);
    }

    /// Whether `update` steps the simulation world
    pub fn physics_enabled(&self) -> bool {
        self.physics
    }

    pub fn set_physics_enabled(&mut self, enabled: bool) {
        self.physics = enabled;
    }

    pub fn run_scripts(&self) -> bool {
        self.run_scripts
    }

    pub fn set_run_scripts(&mut self, enabled: bool) {
        self.run_scripts = enabled;
    }

    pub fn world(&self) -> &dyn PhysicsWorld {
        self.world.as_ref()
    }

    pub fn debug_world(&self) -> &dyn PhysicsWorld {
        self.debug_world.as_ref()
    }

    /// Package consulted by the `get_or_load_*` family
    pub fn package(&self) -> Option<&Arc<Package>> {
        self.package.as_ref()
    }

    pub fn set_package(&mut self, package: Option<Arc<Package>>) {
        self.package = package;
    }

    pub fn set_script_host(&mut self, host: Option<Box<dyn ScriptHost>>) {
        self.script_host = host;
    }

    pub fn set_audio_listener(&mut self, listener: Option<Box<dyn AudioListener>>) {
        self.listener = listener;
    }

    /// Parameter block as left by the last draw
    pub fn shader_params(&self) -> &ShaderParams {
        &self.shader_params
    }

    /// Entities that survived culling in the last draw
    pub fn entity_queue(&self) -> &VisibilityQueue<EntityKey> {
        &self.entity_queue
    }

    /// Sprites that survived culling in the last draw
    pub fn sprite_queue(&self) -> &VisibilityQueue<SpriteKey> {
        &self.sprite_queue
    }

    // ===== CAMERAS =====

    /// Add a camera; the first camera added becomes the active one
    pub fn add_camera(&mut self, mut camera: Camera) -> CameraKey {
        self.bind(&mut camera);
        let key = self.cameras.insert(camera);
        if self.active_camera.is_none() {
            self.active_camera = Some(key);
        }
        key
    }

    /// Remove a camera and hand it back unbound.
    ///
    /// Removing the active camera activates whichever camera is now first.
    pub fn take_camera(&mut self, key: CameraKey) -> Option<Camera> {
        let mut camera = self.cameras.remove(key)?;
        self.unbind(&mut camera);
        if self.active_camera == Some(key) {
            self.active_camera = self.cameras.key_at(0);
        }
        Some(camera)
    }

    actor_accessors!(cameras, CameraKey, Camera,
        count: camera_count, get: camera, get_mut: camera_mut,
        by_name: camera_by_name, by_index: camera_by_index, iter: cameras,
        take: take_camera, remove: remove_camera,
        remove_by_name: remove_camera_by_name, remove_by_index: remove_camera_by_index);

    pub fn active_camera(&self) -> Option<CameraKey> {
        self.active_camera
    }

    /// Make `key` the active camera; false when it is not in this scene
    pub fn set_active_camera(&mut self, key: CameraKey) -> bool {
        if !self.cameras.contains(key) {
            return false;
        }
        self.active_camera = Some(key);
        true
    }

    // ===== ENTITIES =====

    pub fn add_entity(&mut self, mut entity: Entity) -> EntityKey {
        self.bind(&mut entity);
        self.entities.insert(entity)
    }

    pub fn take_entity(&mut self, key: EntityKey) -> Option<Entity> {
        let mut entity = self.entities.remove(key)?;
        self.unbind(&mut entity);
        Some(entity)
    }

    actor_accessors!(entities, EntityKey, Entity,
        count: entity_count, get: entity, get_mut: entity_mut,
        by_name: entity_by_name, by_index: entity_by_index, iter: entities,
        take: take_entity, remove: remove_entity,
        remove_by_name: remove_entity_by_name, remove_by_index: remove_entity_by_index);

    // ===== LIGHTS =====

    pub fn add_light(&mut self, mut light: Light) -> LightKey {
        self.bind(&mut light);
        self.lights.insert(light)
    }

    pub fn take_light(&mut self, key: LightKey) -> Option<Light> {
        let mut light = self.lights.remove(key)?;
        self.unbind(&mut light);
        Some(light)
    }

    actor_accessors!(lights, LightKey, Light,
        count: light_count, get: light, get_mut: light_mut,
        by_name: light_by_name, by_index: light_by_index, iter: lights,
        take: take_light, remove: remove_light,
        remove_by_name: remove_light_by_name, remove_by_index: remove_light_by_index);

    // ===== PARTICLE SYSTEMS =====

    pub fn add_particle_system(&mut self, mut particles: Particles) -> ParticlesKey {
        self.bind(&mut particles);
        self.particles.insert(particles)
    }

    pub fn take_particle_system(&mut self, key: ParticlesKey) -> Option<Particles> {
        let mut particles = self.particles.remove(key)?;
        self.unbind(&mut particles);
        Some(particles)
    }

    actor_accessors!(particles, ParticlesKey, Particles,
        count: particle_system_count, get: particle_system, get_mut: particle_system_mut,
        by_name: particle_system_by_name, by_index: particle_system_by_index,
        iter: particle_systems,
        take: take_particle_system, remove: remove_particle_system,
        remove_by_name: remove_particle_system_by_name,
        remove_by_index: remove_particle_system_by_index);

    // ===== SPRITES =====

    pub fn add_sprite(&mut self, mut sprite: Sprite) -> SpriteKey {
        self.bind(&mut sprite);
        self.sprites.insert(sprite)
    }

    pub fn take_sprite(&mut self, key: SpriteKey) -> Option<Sprite> {
        let mut sprite = self.sprites.remove(key)?;
        self.unbind(&mut sprite);
        Some(sprite)
    }

    actor_accessors!(sprites, SpriteKey, Sprite,
        count: sprite_count, get: sprite, get_mut: sprite_mut,
        by_name: sprite_by_name, by_index: sprite_by_index, iter: sprites,
        take: take_sprite, remove: remove_sprite,
        remove_by_name: remove_sprite_by_name, remove_by_index: remove_sprite_by_index);

    // ===== ANY ACTOR =====

    /// Search cameras, entities, lights, armatures, particle systems and
    /// sprites for `name`, in that order
    pub fn get_actor_by_name(&self, name: &str) -> Option<SceneObject> {
        if let Some(key) = self.cameras.find(name) {
            return Some(SceneObject::Actor(ActorKey::Camera(key)));
        }
        if let Some(key) = self.entities.find(name) {
            return Some(SceneObject::Actor(ActorKey::Entity(key)));
        }
        if let Some(key) = self.lights.find(name) {
            return Some(SceneObject::Actor(ActorKey::Light(key)));
        }
        if let Some(armature) = self.armatures.get(name) {
            return Some(SceneObject::Armature(armature));
        }
        if let Some(key) = self.particles.find(name) {
            return Some(SceneObject::Actor(ActorKey::Particles(key)));
        }
        self.sprites.find(name).map(|key| SceneObject::Actor(ActorKey::Sprite(key)))
    }

    /// Key of the actor with the given id, e.g. from a ray-cast hit
    pub fn actor_by_id(&self, id: ActorId) -> Option<ActorKey> {
        let cameras = self.cameras.iter().map(|(k, a)| (ActorKey::Camera(k), a.id()));
        let entities = self.entities.iter().map(|(k, a)| (ActorKey::Entity(k), a.id()));
        let lights = self.lights.iter().map(|(k, a)| (ActorKey::Light(k), a.id()));
        let particles = self.particles.iter().map(|(k, a)| (ActorKey::Particles(k), a.id()));
        let sprites = self.sprites.iter().map(|(k, a)| (ActorKey::Sprite(k), a.id()));

        cameras.chain(entities).chain(lights).chain(particles).chain(sprites)
            .find(|(_, actor)| *actor == id)
            .map(|(key, _)| key)
    }

    pub fn contains_actor(&self, key: ActorKey) -> bool {
        self.actor_base(key).is_some()
    }

    /// Remove any actor; false when it is not in this scene
    pub fn remove_actor(&mut self, key: ActorKey) -> bool {
        match key {
            ActorKey::Camera(k) => self.remove_camera(k),
            ActorKey::Entity(k) => self.remove_entity(k),
            ActorKey::Light(k) => self.remove_light(k),
            ActorKey::Particles(k) => self.remove_particle_system(k),
            ActorKey::Sprite(k) => self.remove_sprite(k),
        }
    }

    pub fn actor_base(&self, key: ActorKey) -> Option<&ActorBase> {
        match key {
            ActorKey::Camera(k) => self.cameras.get(k).map(SceneActor::base),
            ActorKey::Entity(k) => self.entities.get(k).map(SceneActor::base),
            ActorKey::Light(k) => self.lights.get(k).map(SceneActor::base),
            ActorKey::Particles(k) => self.particles.get(k).map(SceneActor::base),
            ActorKey::Sprite(k) => self.sprites.get(k).map(SceneActor::base),
        }
    }

    pub fn actor_base_mut(&mut self, key: ActorKey) -> Option<&mut ActorBase> {
        match key {
            ActorKey::Camera(k) => self.cameras.get_mut(k).map(SceneActor::base_mut),
            ActorKey::Entity(k) => self.entities.get_mut(k).map(SceneActor::base_mut),
            ActorKey::Light(k) => self.lights.get_mut(k).map(SceneActor::base_mut),
            ActorKey::Particles(k) => self.particles.get_mut(k).map(SceneActor::base_mut),
            ActorKey::Sprite(k) => self.sprites.get_mut(k).map(SceneActor::base_mut),
        }
    }

    /// Attach a joint to an actor already in this scene.
    ///
    /// Returns false when the actor is unknown or the world refused the
    /// joint; a refused joint is still kept on the actor.
    pub fn add_joint(&mut self, key: ActorKey, desc: JointDesc) -> bool {
        let world = &mut *self.world;
        let base = match key {
            ActorKey::Camera(k) => self.cameras.get_mut(k).map(SceneActor::base_mut),
            ActorKey::Entity(k) => self.entities.get_mut(k).map(SceneActor::base_mut),
            ActorKey::Light(k) => self.lights.get_mut(k).map(SceneActor::base_mut),
            ActorKey::Particles(k) => self.particles.get_mut(k).map(SceneActor::base_mut),
            ActorKey::Sprite(k) => self.sprites.get_mut(k).map(SceneActor::base_mut),
        };
        match base {
            Some(base) => base.add_bound_joint(desc, world),
            None => false,
        }
    }

    fn bind<A: SceneActor>(&mut self, actor: &mut A) {
        actor.base_mut().attach(self.id, &mut *self.world, &mut *self.debug_world);
        crate::engine_debug!("stellar::Scene", "Scene '{}': added {:?} '{}'",
            self.name, actor.kind(), actor.name());
    }

    fn unbind<A: SceneActor>(&mut self, actor: &mut A) {
        actor.base_mut().detach(&mut *self.world, &mut *self.debug_world);
        crate::engine_debug!("stellar::Scene", "Scene '{}': removed {:?} '{}'",
            self.name, actor.kind(), actor.name());
    }

    // ===== RESOURCES =====

    pub fn textures(&self) -> &ResourceCache<Texture> {
        &self.textures
    }

    pub fn materials(&self) -> &ResourceCache<Material> {
        &self.materials
    }

    pub fn models(&self) -> &ResourceCache<Model> {
        &self.models
    }

    pub fn scripts(&self) -> &ResourceCache<Script> {
        &self.scripts
    }

    pub fn armatures(&self) -> &ResourceCache<Armature> {
        &self.armatures
    }

    /// Register a texture; false if this instance is already cached
    pub fn add_texture(&mut self, texture: Arc<Texture>) -> bool {
        self.textures.insert(texture)
    }

    pub fn add_material(&mut self, material: Arc<Material>) -> bool {
        self.materials.insert(material)
    }

    pub fn add_model(&mut self, model: Arc<Model>) -> bool {
        self.models.insert(model)
    }

    pub fn add_script(&mut self, script: Arc<Script>) -> bool {
        self.scripts.insert(script)
    }

    pub fn add_armature(&mut self, armature: Arc<Armature>) -> bool {
        self.armatures.insert(armature)
    }

    pub fn armature_count(&self) -> usize {
        self.armatures.len()
    }

    /// Drop cached resources nothing else holds.
    ///
    /// Returns how many were released.
    pub fn purge_unused_resources(&mut self) -> usize {
        // Materials first: they hold texture references
        self.materials.purge_unused()
            + self.models.purge_unused()
            + self.textures.purge_unused()
            + self.scripts.purge_unused()
            + self.armatures.purge_unused()
    }

    /// Scripts attached to any actor, first-seen order
    pub fn scene_scripts(&self) -> Vec<Arc<Script>> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for base in self.all_bases() {
            if let Some(script) = base.script() {
                push_unique(&mut out, &mut seen, script);
            }
        }
        out
    }

    /// Materials used by entities and sprites, first-seen order
    pub fn scene_materials(&self) -> Vec<Arc<Material>> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for entity in self.entities.values() {
            for material in entity.materials() {
                push_unique(&mut out, &mut seen, material);
            }
        }
        for material in self.sprites.values().filter_map(Sprite::material) {
            push_unique(&mut out, &mut seen, material);
        }
        out
    }

    /// Textures of entity materials, then particle textures, then sprite materials
    pub fn scene_textures(&self) -> Vec<Arc<Texture>> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for material in self.entities.values().flat_map(Entity::materials) {
            for texture in material.textures() {
                push_unique(&mut out, &mut seen, texture);
            }
        }
        for texture in self.particles.values().filter_map(Particles::texture) {
            push_unique(&mut out, &mut seen, texture);
        }
        for material in self.sprites.values().filter_map(Sprite::material) {
            for texture in material.textures() {
                push_unique(&mut out, &mut seen, texture);
            }
        }
        out
    }

    /// Models of entities and particle systems, first-seen order
    pub fn scene_models(&self) -> Vec<Arc<Model>> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        let models = self.entities.values().filter_map(Entity::model)
            .chain(self.particles.values().filter_map(Particles::model));
        for model in models {
            push_unique(&mut out, &mut seen, model);
        }
        out
    }

    fn all_bases(&self) -> impl Iterator<Item = &ActorBase> {
        self.cameras.values().map(SceneActor::base)
            .chain(self.entities.values().map(SceneActor::base))
            .chain(self.lights.values().map(SceneActor::base))
            .chain(self.particles.values().map(SceneActor::base))
            .chain(self.sprites.values().map(SceneActor::base))
    }

    // ===== PHYSICS QUERIES =====

    /// Nearest simulated body hit along `start..end`
    pub fn ray_cast(&self, start: Vec3, end: Vec3) -> Option<Collision> {
        self.world.ray_cast(start, end)
    }

    pub fn ray_cast_all(&self, start: Vec3, end: Vec3) -> Vec<Collision> {
        self.world.ray_cast_all(start, end)
    }

    /// Nearest picking probe hit along `start..end`.
    ///
    /// Probes replaced by model or scale changes are rebound first.
    pub fn debug_ray_cast(&mut self, start: Vec3, end: Vec3) -> Option<Collision> {
        self.sync_probes();
        self.debug_world.ray_cast(start, end)
    }

    pub fn debug_ray_cast_all(&mut self, start: Vec3, end: Vec3) -> Vec<Collision> {
        self.sync_probes();
        self.debug_world.ray_cast_all(start, end)
    }

    fn sync_probes(&mut self) {
        let debug_world = &mut *self.debug_world;
        let bases = self.cameras.values_mut().map(SceneActor::base_mut)
            .chain(self.entities.values_mut().map(SceneActor::base_mut))
            .chain(self.lights.values_mut().map(SceneActor::base_mut))
            .chain(self.particles.values_mut().map(SceneActor::base_mut))
            .chain(self.sprites.values_mut().map(SceneActor::base_mut));
        for base in bases {
            base.sync_probe(debug_world);
        }
    }

    // ===== FRAME =====

    /// Step physics, feed the audio listener, tick every actor, then run scripts
    pub fn update(&mut self, dt: f32) {
        if dt > 0.0 {
            if self.physics {
                self.world.step(dt);
            }
            self.debug_world.step(dt);
        }

        let camera = self.active_camera.and_then(|key| self.cameras.get(key));
        if let (Some(listener), Some(camera)) = (self.listener.as_mut(), camera) {
            let base = camera.base();
            let (forward, up) = forward_up(base.orientation());
            listener.set_position(base.position());
            listener.set_orientation(forward, up);
        }

        let world = &mut *self.world;
        let debug_world = &mut *self.debug_world;
        for camera in self.cameras.values_mut() {
            camera.update();
            camera.base_mut().sync_physics(world, debug_world);
        }
        for entity in self.entities.values_mut() {
            entity.base_mut().sync_physics(world, debug_world);
        }
        for light in self.lights.values_mut() {
            light.base_mut().sync_physics(world, debug_world);
        }
        for particles in self.particles.values_mut() {
            particles.update(dt);
            particles.base_mut().sync_physics(world, debug_world);
        }
        for sprite in self.sprites.values_mut() {
            sprite.base_mut().sync_physics(world, debug_world);
        }

        if self.run_scripts {
            self.run_actor_scripts();
        }
    }

    fn run_actor_scripts(&mut self) {
        let Some(host) = self.script_host.as_mut() else {
            return;
        };
        let bases = self.cameras.values().map(SceneActor::base)
            .chain(self.entities.values().map(SceneActor::base))
            .chain(self.lights.values().map(SceneActor::base))
            .chain(self.particles.values().map(SceneActor::base))
            .chain(self.sprites.values().map(SceneActor::base));

        for base in bases {
            let Some(script) = base.script() else {
                continue;
            };
            if let Err(err) = host.run(script, base.id(), base.name()) {
                crate::engine_warn!("stellar::Scene", "Script '{}' on '{}' failed: {}",
                    script.name(), base.name(), err);
            }
        }
    }

    /// Refresh cameras, shadow cameras, sprite billboards and particle bounds.
    ///
    /// Must run before `draw` in every frame.
    pub fn pre_draw(&mut self, config: &RenderConfig) {
        for camera in self.cameras.values_mut() {
            camera.set_window_size(config.window_size);
            camera.update();
            camera.pre_draw();
        }

        let size = config.shadow_map_size as i32;
        for light in self.lights.values_mut() {
            if let Some(shadow) = light.shadow_camera_mut() {
                shadow.set_viewport(0, 0, size, size);
            }
            light.pre_draw();
        }

        if let Some(camera) = self.active_camera.and_then(|key| self.cameras.get(key)) {
            for sprite in self.sprites.values_mut() {
                sprite.pre_draw(camera);
            }
            for particles in self.particles.values_mut() {
                particles.pre_draw(camera);
            }
        }
    }

    /// Clear the per-frame `moved` flags
    pub fn post_draw(&mut self) {
        for camera in self.cameras.values_mut() {
            camera.base_mut().clear_moved();
        }
        for entity in self.entities.values_mut() {
            entity.base_mut().clear_moved();
        }
        for light in self.lights.values_mut() {
            light.base_mut().clear_moved();
        }
        for particles in self.particles.values_mut() {
            particles.base_mut().clear_moved();
        }
        for sprite in self.sprites.values_mut() {
            sprite.base_mut().clear_moved();
        }
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("file_path", &self.file_path)
            .field("cameras", &self.cameras.len())
            .field("entities", &self.entities.len())
            .field("lights", &self.lights.len())
            .field("particles", &self.particles.len())
            .field("sprites", &self.sprites.len())
            .field("active_camera", &self.active_camera)
            .finish()
    }
}

fn push_unique<T: Resource>(out: &mut Vec<Arc<T>>, seen: &mut FxHashSet<ResourceId>, item: &Arc<T>) {
    if seen.insert(item.id()) {
        out.push(Arc::clone(item));
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
