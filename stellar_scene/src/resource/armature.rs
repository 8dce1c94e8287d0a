/// Armature resource - a named bone hierarchy in rest pose

use glam::{Quat, Vec3};
use super::{Resource, ResourceId};

#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone, `None` for roots
    pub parent: Option<usize>,
    pub position: Vec3,
    pub orientation: Quat,
}

#[derive(Debug)]
pub struct Armature {
    id: ResourceId,
    name: String,
    bones: Vec<Bone>,
}

impl Armature {
    pub fn new(name: &str, bones: Vec<Bone>) -> Self {
        Self { id: ResourceId::next(), name: name.to_string(), bones }
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.name == name)
    }
}

impl Resource for Armature {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
