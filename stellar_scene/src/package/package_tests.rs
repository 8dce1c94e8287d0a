use std::io::Write;
use super::*;

struct IndexOnlyReader {
    indices: Vec<PakIndex>,
}

impl PakReader for IndexOnlyReader {
    fn read_index(&self, _path: &Path) -> Result<Vec<PakIndex>> {
        Ok(self.indices.clone())
    }
}

struct FailingReader;

impl PakReader for FailingReader {
    fn read_index(&self, path: &Path) -> Result<Vec<PakIndex>> {
        Err(Error::CorruptPackage(path.display().to_string()))
    }
}

fn entry(name: &str, kind: ResourceKind, offset: u64) -> PakIndex {
    PakIndex { name: name.to_string(), kind, offset }
}

fn sample_package() -> Package {
    let reader = IndexOnlyReader {
        indices: vec![
            entry("brick", ResourceKind::Texture, 16),
            entry("brick", ResourceKind::Material, 64),
            entry("cam", ResourceKind::Camera, 128),
            entry("wall", ResourceKind::Entity, 256),
            entry("floor", ResourceKind::Entity, 512),
        ],
    };
    Package::open(Path::new("level.pak"), Arc::new(reader)).unwrap()
}

// ============================================================================
// Tests: index
// ============================================================================

#[test]
fn test_open_reads_index() {
    let package = sample_package();
    assert_eq!(package.file_path(), Path::new("level.pak"));
    assert_eq!(package.indices().len(), 5);
}

#[test]
fn test_index_lookup_matches_name_and_kind() {
    let package = sample_package();
    assert_eq!(package.index("brick", ResourceKind::Material).unwrap().offset, 64);
    assert_eq!(package.index("brick", ResourceKind::Texture).unwrap().offset, 16);
    assert!(package.index("brick", ResourceKind::Model).is_none());
    assert!(package.index("missing", ResourceKind::Texture).is_none());
}

#[test]
fn test_indices_of_keeps_file_order() {
    let package = sample_package();
    let names: Vec<&str> = package.indices_of(ResourceKind::Entity).map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["wall", "floor"]);
}

#[test]
fn test_open_propagates_reader_error() {
    let err = Package::open(Path::new("bad.pak"), Arc::new(FailingReader)).unwrap_err();
    assert_eq!(err.code(), crate::error::ErrorCode::CorruptPackage);
}

// ============================================================================
// Tests: default stream handling
// ============================================================================

#[test]
fn test_default_open_at_seeks_to_offset() {
    let path = std::env::temp_dir().join(format!("stellar_pak_{}.bin", std::process::id()));
    {
        let mut file = File::create(&path).unwrap();
        file.write_all(b"headerPAYLOAD").unwrap();
    }

    let package = Package::open(&path, Arc::new(IndexOnlyReader { indices: Vec::new() })).unwrap();
    let mut input = package.open_at(6).unwrap();
    let mut text = String::new();
    input.read_to_string(&mut text).unwrap();
    assert_eq!(text, "PAYLOAD");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_default_open_at_missing_file() {
    let package = sample_package();
    let err = package.open_at(0).err().unwrap();
    assert_eq!(err.code(), crate::error::ErrorCode::CantOpenFile);
}

#[test]
fn test_unsupported_entry_kinds_are_errors() {
    let reader = IndexOnlyReader { indices: Vec::new() };
    let err = reader.read_texture(&mut std::io::empty()).unwrap_err();
    assert_eq!(err.code(), crate::error::ErrorCode::InvalidResource);
    assert!(reader.read_scene_settings(&mut std::io::empty()).is_err());
}
