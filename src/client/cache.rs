use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Entity type a cached query depends on. Mutations invalidate by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Users,
    Teams,
    Projects,
    Tasks,
}

/// Identity of one cached query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Users,
    Teams,
    Projects,
    Project(i32),
    Tasks { project_id: i32 },
    Task(i32),
}

impl QueryKey {
    pub fn tag(&self) -> Tag {
        match self {
            QueryKey::Users => Tag::Users,
            QueryKey::Teams => Tag::Teams,
            QueryKey::Projects | QueryKey::Project(_) => Tag::Projects,
            QueryKey::Tasks { .. } | QueryKey::Task(_) => Tag::Tasks,
        }
    }
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Arc<dyn Any + Send + Sync>>,
    /// Bumped on every invalidation of the tag.
    generations: HashMap<Tag, u64>,
}

/// Tagged store of query results.
///
/// A fetch reads [`generation`](Self::generation) before going to the
/// backend and stores its result with
/// [`insert_if_current`](Self::insert_if_current). If the tag was invalidated
/// while the fetch was in flight the result is dropped, so an acknowledged
/// write is never shadowed by a read that started before it.
#[derive(Default)]
pub struct QueryCache {
    inner: Mutex<Inner>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.lock()
            .entries
            .get(key)
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    pub fn generation(&self, tag: Tag) -> u64 {
        self.lock().generations.get(&tag).copied().unwrap_or(0)
    }

    /// Store `value` unless `key`'s tag has been invalidated since `generation`
    /// was read. Returns whether the value was stored.
    pub fn insert_if_current<T: Send + Sync + 'static>(
        &self,
        key: QueryKey,
        value: T,
        generation: u64,
    ) -> bool {
        let mut inner = self.lock();
        let current = inner.generations.get(&key.tag()).copied().unwrap_or(0);
        if current != generation {
            return false;
        }
        inner.entries.insert(key, Arc::new(value));
        true
    }

    /// Drop every entry tagged `tag`. Returns how many entries were removed.
    pub fn invalidate(&self, tag: Tag) -> usize {
        let mut inner = self.lock();
        *inner.generations.entry(tag).or_insert(0) += 1;
        let before = inner.entries.len();
        inner.entries.retain(|key, _| key.tag() != tag);
        before - inner.entries.len()
    }
}
