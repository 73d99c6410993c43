//! Byte acquisition for referenced documents.
//!
//! The assembler never touches storage itself. Whatever a map references by
//! path is fetched through a [`ResourceReader`], so tests can hand in fixtures
//! and the Bevy loader can hand in bytes it already pulled from the asset
//! server.

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Fetches the bytes behind a path written in a document.
pub trait ResourceReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<F> ResourceReader for F
where
    F: Fn(&Path) -> io::Result<Vec<u8>>,
{
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self(path)
    }
}

/// Reads files relative to a base directory, usually the map's own directory.
#[derive(Debug, Clone, Default)]
pub struct FilesystemReader {
    base_dir: PathBuf,
}

impl FilesystemReader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The path that `relative` resolves to. See [`clean_path`].
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        clean_path(&self.base_dir.join(relative))
    }
}

/// Fold `.` and `name/..` out of `path` without touching the filesystem.
///
/// A `..` with no preceding name stays in place, so the result names the same
/// file as `path` (`../a/../b` becomes `../b`, never `b`).
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

impl ResourceReader for FilesystemReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }
}

/// In-memory documents keyed by the path the map uses for them.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn with(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl ResourceReader for MemoryReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not loaded", path.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reader_hit_and_miss() {
        let reader = MemoryReader::new().with("tiles.tsx", "<tileset/>");

        assert_eq!(reader.read(Path::new("tiles.tsx")).unwrap(), b"<tileset/>");
        let err = reader.read(Path::new("other.tsx")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_filesystem_reader_normalizes() {
        let reader = FilesystemReader::new("assets/maps");

        assert_eq!(
            reader.resolve(Path::new("../tilesets/./dungeon.tsx")),
            PathBuf::from("assets/tilesets/dungeon.tsx")
        );
    }

    #[test]
    fn test_filesystem_reader_keeps_unfoldable_parents() {
        let here = FilesystemReader::new("");
        assert_eq!(
            here.resolve(Path::new("../shared/t.tsx")),
            PathBuf::from("../shared/t.tsx")
        );

        let maps = FilesystemReader::new("maps");
        assert_eq!(maps.resolve(Path::new("../../x.tsx")), PathBuf::from("../x.tsx"));
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(clean_path(Path::new("../a/../b")), PathBuf::from("../b"));
        assert_eq!(clean_path(Path::new("a/../../..")), PathBuf::from("../.."));
        assert_eq!(clean_path(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_filesystem_reader_climbs_above_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("maps/shared")).unwrap();
        std::fs::create_dir_all(dir.path().join("shared")).unwrap();
        std::fs::write(dir.path().join("shared/t.tsx"), "real").unwrap();
        std::fs::write(dir.path().join("maps/shared/t.tsx"), "decoy").unwrap();

        let reader = FilesystemReader::new(dir.path().join("maps"));
        assert_eq!(reader.read(Path::new("../shared/t.tsx")).unwrap(), b"real");
    }

    #[test]
    fn test_closure_reader() {
        let reader = |path: &Path| -> io::Result<Vec<u8>> {
            Ok(path.to_string_lossy().into_owned().into_bytes())
        };

        assert_eq!(reader.read(Path::new("a.tsx")).unwrap(), b"a.tsx");
    }
}
