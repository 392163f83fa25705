//! Key-value storage handed to application modules, and the copy-on-write
//! overlay used to run their callbacks speculatively.

use std::collections::BTreeMap;

/// Minimal byte-oriented store an application module reads and writes.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    fn delete(&mut self, key: &[u8]);

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
}

impl KvStore for BTreeMap<Vec<u8>, Vec<u8>> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        BTreeMap::get(self, key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.remove(key);
    }
}

/// A write-buffering overlay over a parent store.
///
/// Reads fall through to the parent unless the key was touched in the
/// overlay. Nothing reaches the parent until [`CacheKvStore::write`] is
/// called; dropping the overlay discards every pending write.
pub struct CacheKvStore<'a> {
    parent: &'a mut dyn KvStore,
    // `None` marks a pending deletion
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> CacheKvStore<'a> {
    pub fn new(parent: &'a mut dyn KvStore) -> Self {
        Self {
            parent,
            pending: BTreeMap::new(),
        }
    }

    /// Number of keys written or deleted in the overlay.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Flushes the pending writes into the parent store.
    pub fn write(self) {
        let Self { parent, pending } = self;
        for (key, value) in pending {
            match value {
                Some(value) => parent.set(key, value),
                None => parent.delete(&key),
            }
        }
    }

    /// Drops the pending writes, leaving the parent untouched.
    pub fn discard(self) {}
}

impl KvStore for CacheKvStore<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(value) => value.clone(),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.pending.insert(key, Some(value));
    }

    fn delete(&mut self, key: &[u8]) {
        self.pending.insert(key.to_vec(), None);
    }
}
