//! Two-layer resource storage
//!
//! Bundled content lives in a read-only base root; anything the user
//! imports or edits lives in a writable overlay root with the same layout.
//! The overlay always wins on read and is the only layer ever written.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid resource type: {0}")]
    InvalidResourceType(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),
}

pub type Result<T> = std::result::Result<T, ResourceError>;

/// A directory entry as seen by a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Which layer a located file came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    User,
    Base,
}

/// Capability set shared by both storage layers. Paths are relative to the
/// store root.
pub trait ResourceStore {
    fn root(&self) -> &Path;

    fn exists(&self, rel: &Path) -> bool {
        self.root().join(rel).is_file()
    }

    /// Entries directly under `rel`. A missing directory lists as empty.
    fn list(&self, rel: &Path) -> Result<Vec<StoreEntry>>;

    fn read(&self, rel: &Path) -> Result<String>;

    /// Replace the file at `rel` with `content`, creating parent directories
    fn write(&self, rel: &Path, content: &str) -> Result<()>;
}

/// A store backed by a plain directory tree
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
    writable: bool,
}

impl DirStore {
    pub fn writable(root: PathBuf) -> Self {
        Self { root, writable: true }
    }

    pub fn read_only(root: PathBuf) -> Self {
        Self { root, writable: false }
    }

    pub fn path(&self, rel: &Path) -> PathBuf {
        self.root.join(rel)
    }

    /// Create an empty file at `rel` (and its parents) unless one exists
    pub fn touch(&self, rel: &Path) -> Result<PathBuf> {
        self.ensure_writable(rel)?;
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            fs::File::create(&path)?;
            log::info!("Created empty resource file {:?}", path);
        }
        Ok(path)
    }

    pub fn remove(&self, rel: &Path) -> Result<()> {
        self.ensure_writable(rel)?;
        fs::remove_file(self.path(rel))?;
        Ok(())
    }

    pub fn has_dir(&self, rel: &Path) -> bool {
        self.path(rel).is_dir()
    }

    /// Remove the empty directory at `rel`
    pub fn remove_dir(&self, rel: &Path) -> Result<()> {
        self.ensure_writable(rel)?;
        fs::remove_dir(self.path(rel))?;
        Ok(())
    }

    fn ensure_writable(&self, rel: &Path) -> Result<()> {
        if self.writable {
            Ok(())
        } else {
            Err(ResourceError::Conflict(format!(
                "{} is in the read-only base layer",
                rel.display()
            )))
        }
    }
}

impl ResourceStore for DirStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list(&self, rel: &Path) -> Result<Vec<StoreEntry>> {
        let dir = self.path(rel);
        let read_dir = match fs::read_dir(&dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            entries.push(StoreEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        Ok(entries)
    }

    fn read(&self, rel: &Path) -> Result<String> {
        Ok(fs::read_to_string(self.path(rel))?)
    }

    fn write(&self, rel: &Path, content: &str) -> Result<()> {
        self.ensure_writable(rel)?;
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_atomic(&path, content)?;
        Ok(())
    }
}

/// Write through a sibling temp file and rename over the target, so a failed
/// write leaves the previous content in place
pub(crate) fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, content)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

/// The user overlay stacked over the base layer
#[derive(Debug, Clone)]
pub struct LayeredStore {
    user: DirStore,
    base: DirStore,
}

impl LayeredStore {
    pub fn new(user: DirStore, base: DirStore) -> Self {
        Self { user, base }
    }

    pub fn user(&self) -> &DirStore {
        &self.user
    }

    pub fn base(&self) -> &DirStore {
        &self.base
    }

    /// Layers in read priority order
    pub fn layers(&self) -> [(Layer, &DirStore); 2] {
        [(Layer::User, &self.user), (Layer::Base, &self.base)]
    }

    pub fn layer(&self, layer: Layer) -> &DirStore {
        match layer {
            Layer::User => &self.user,
            Layer::Base => &self.base,
        }
    }

    /// First existing file among `candidates`, each candidate tried against
    /// the user layer before the base layer
    pub fn find<'a>(&self, candidates: &'a [PathBuf]) -> Option<(Layer, &'a Path)> {
        for rel in candidates {
            for (layer, store) in self.layers() {
                if store.exists(rel) {
                    return Some((layer, rel.as_path()));
                }
            }
        }
        None
    }

    /// Write always lands in the user layer
    pub fn write(&self, rel: &Path, content: &str) -> Result<()> {
        self.user.write(rel, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (LayeredStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LayeredStore::new(
            DirStore::writable(temp_dir.path().join("user")),
            DirStore::read_only(temp_dir.path().join("base")),
        );
        (store, temp_dir)
    }

    #[test]
    fn test_find_prefers_user_layer() {
        let (store, _temp) = create_test_store();
        let rel = PathBuf::from("english/words/default/verbs.txt");

        fs::create_dir_all(store.base().path(&rel).parent().unwrap()).unwrap();
        fs::write(store.base().path(&rel), "base").unwrap();

        let candidates = [rel.clone()];
        let (layer, found) = store.find(&candidates).unwrap();
        assert_eq!(layer, Layer::Base);
        assert_eq!(found, rel.as_path());

        store.write(&rel, "user").unwrap();
        let (layer, found) = store.find(&candidates).unwrap();
        assert_eq!(layer, Layer::User);
        assert_eq!(store.layer(layer).read(found).unwrap(), "user");
        assert_eq!(fs::read_to_string(store.base().path(&rel)).unwrap(), "base");
    }

    #[test]
    fn test_base_layer_rejects_writes() {
        let (store, _temp) = create_test_store();
        let rel = PathBuf::from("a.txt");

        let err = store.base().write(&rel, "x").unwrap_err();
        assert!(matches!(err, ResourceError::Conflict(_)));
        assert!(!store.base().path(&rel).exists());
    }

    #[test]
    fn test_base_layer_rejects_removal() {
        let (store, _temp) = create_test_store();
        let rel = PathBuf::from("english/words/default/a.txt");
        fs::create_dir_all(store.base().path(&rel).parent().unwrap()).unwrap();
        fs::write(store.base().path(&rel), "a").unwrap();

        assert!(matches!(store.base().remove(&rel), Err(ResourceError::Conflict(_))));
        let dir = Path::new("english/words/default");
        assert!(matches!(store.base().remove_dir(dir), Err(ResourceError::Conflict(_))));
        assert!(store.base().exists(&rel));

        store.write(&rel, "b").unwrap();
        store.user().remove(&rel).unwrap();
        store.user().remove_dir(dir).unwrap();
        assert!(!store.user().has_dir(dir));
        assert!(store.base().has_dir(dir));
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.user().list(Path::new("nope")).unwrap().is_empty());
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let (store, _temp) = create_test_store();
        let rel = PathBuf::from("english/words/default/a.txt");

        store.write(&rel, "one\n").unwrap();
        store.write(&rel, "two\n").unwrap();

        assert_eq!(store.user().read(&rel).unwrap(), "two\n");
        let names: Vec<String> = store
            .user()
            .list(Path::new("english/words/default"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.txt".to_string()]);
    }
}
