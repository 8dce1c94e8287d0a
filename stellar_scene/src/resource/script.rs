/// Script resource - source text run by the scene's script host

use std::path::{Path, PathBuf};
use super::{Resource, ResourceId};

#[derive(Debug)]
pub struct Script {
    id: ResourceId,
    name: String,
    text: String,
    file_path: Option<PathBuf>,
}

impl Script {
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            id: ResourceId::next(),
            name: name.to_string(),
            text: text.to_string(),
            file_path: None,
        }
    }

    pub fn with_file_path(mut self, path: &Path) -> Self {
        self.file_path = Some(path.to_path_buf());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

impl Resource for Script {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
