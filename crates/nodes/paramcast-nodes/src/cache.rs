//! Keyed resource cache handed to nodes that load external data.
//!
//! The cache is an explicit collaborator owned by the caller, so its lifetime
//! and sharing are decided outside the node.

use anyhow::Context;
use hashbrown::HashMap;
use log::debug;

pub trait ResourceCache<V> {
    fn get(&self, key: &str) -> Option<&V>;
    fn insert(&mut self, key: String, value: V);
}

/// Unbounded in-memory cache.
#[derive(Debug, Clone)]
pub struct MemoryCache<V> {
    entries: HashMap<String, V>,
}

impl<V> Default for MemoryCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> MemoryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> ResourceCache<V> for MemoryCache<V> {
    fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    fn insert(&mut self, key: String, value: V) {
        self.entries.insert(key, value);
    }
}

/// Return the cached value for `key`, loading and storing it on a miss.
/// Failed loads are not cached.
pub fn get_or_load<V, C, F>(cache: &mut C, key: &str, load: F) -> anyhow::Result<V>
where
    V: Clone,
    C: ResourceCache<V> + ?Sized,
    F: FnOnce(&str) -> anyhow::Result<V>,
{
    if let Some(hit) = cache.get(key) {
        return Ok(hit.clone());
    }
    debug!("cache miss for '{key}'");
    let value = load(key).with_context(|| format!("loading resource '{key}'"))?;
    cache.insert(key.to_string(), value.clone());
    Ok(value)
}
