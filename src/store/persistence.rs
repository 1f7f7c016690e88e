use log::{debug, trace};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::error::StoreError;

/// Hierarchical JSON store addressed by slash-separated paths such as
/// `users/u1/stats/daily_standard/games`.
pub trait Persistence {
    fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;

    fn set(&mut self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Appends `value` under a fresh child key of `path` and returns the key.
    fn push(&mut self, path: &str, value: Value) -> Result<String, StoreError>;
}

fn segments(path: &str) -> Result<Vec<&str>, StoreError> {
    let parts: Vec<&str> = path.split('/').collect();
    if parts.iter().any(|part| part.is_empty()) {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(parts)
}

#[derive(Debug, Clone)]
pub struct MemoryPersistence {
    root: Value,
}

impl Default for MemoryPersistence {
    fn default() -> Self {
        MemoryPersistence {
            root: Value::Object(Map::new()),
        }
    }
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(root: Value) -> Self {
        MemoryPersistence { root }
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    fn object_at_mut(&mut self, path: &str, parts: &[&str]) -> Result<&mut Map<String, Value>, StoreError> {
        let mut node = &mut self.root;
        for part in parts {
            let object = node
                .as_object_mut()
                .ok_or_else(|| StoreError::NotAnObject(path.to_string()))?;
            node = object
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        node.as_object_mut()
            .ok_or_else(|| StoreError::NotAnObject(path.to_string()))
    }
}

impl Persistence for MemoryPersistence {
    fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let mut node = &self.root;
        for part in segments(path)? {
            match node.get(part) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(Some(node.clone()))
    }

    fn set(&mut self, path: &str, value: Value) -> Result<(), StoreError> {
        let parts = segments(path)?;
        let (leaf, parents) = parts
            .split_last()
            .ok_or_else(|| StoreError::InvalidPath(path.to_string()))?;
        self.object_at_mut(path, parents)?
            .insert(leaf.to_string(), value);
        Ok(())
    }

    fn push(&mut self, path: &str, value: Value) -> Result<String, StoreError> {
        let parts = segments(path)?;
        let key = Uuid::new_v4().simple().to_string();
        self.object_at_mut(path, &parts)?.insert(key.clone(), value);
        trace!(target: "persistence", "Pushed {} under {}", key, path);
        Ok(key)
    }
}

/// A `MemoryPersistence` mirrored to one JSON file, rewritten on every
/// mutation.
#[derive(Debug)]
pub struct FilePersistence {
    path: PathBuf,
    tree: MemoryPersistence,
    pretty: bool,
}

impl FilePersistence {
    pub fn open(path: impl AsRef<Path>, pretty: bool) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let tree = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
            if contents.trim().is_empty() {
                MemoryPersistence::new()
            } else {
                MemoryPersistence::from_value(serde_json::from_str(&contents)?)
            }
        } else {
            MemoryPersistence::new()
        };
        debug!(target: "persistence", "Opened store at {}", path.display());
        Ok(FilePersistence { path, tree, pretty })
    }

    fn flush(&self, tree: &MemoryPersistence) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }
        let contents = if self.pretty {
            serde_json::to_string_pretty(tree.as_value())?
        } else {
            serde_json::to_string(tree.as_value())?
        };
        fs::write(&self.path, contents).map_err(|e| StoreError::io(&self.path, e))
    }

    /// Applies `change` to a copy of the tree and keeps it only once the
    /// copy is on disk.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryPersistence) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut next = self.tree.clone();
        let out = change(&mut next)?;
        self.flush(&next)?;
        self.tree = next;
        Ok(out)
    }
}

impl Persistence for FilePersistence {
    fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        self.tree.get(path)
    }

    fn set(&mut self, path: &str, value: Value) -> Result<(), StoreError> {
        self.commit(|tree| tree.set(path, value))
    }

    fn push(&mut self, path: &str, value: Value) -> Result<String, StoreError> {
        self.commit(|tree| tree.push(path, value))
    }
}
