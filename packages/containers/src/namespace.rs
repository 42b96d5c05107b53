//! Namespaced construction of container adapters.

use bytes::Bytes;
use keyspace_command::Commands;

use crate::key::DELIMITER;
use crate::{Counter, Error, KeyNamer, List, Map, Queue, Set, SortedSet};

/// Constructs container adapters under one namespace.
///
/// A namespace carries a [`KeyNamer`] and hands out adapters whose full
/// keys are already resolved, so application code deals in logical names
/// only. The client handle is passed per adapter; a cloneable client (or
/// `&mut dyn Commands`) serves any number of them.
///
/// # Example
///
/// ```rust
/// use keyspace_containers::Namespace;
/// use keyspace_memory::MemoryStore;
///
/// let ns = Namespace::with_prefix("staging");
/// let jobs = ns.list("jobs", MemoryStore::new());
/// assert_eq!(jobs.key(), "staging:jobs");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Namespace {
    namer: KeyNamer,
}

impl Namespace {
    /// A namespace that leaves logical names unprefixed.
    pub fn new() -> Self {
        Self {
            namer: KeyNamer::bare(),
        }
    }

    /// A namespace prefixing every key with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            namer: KeyNamer::prefixed(prefix),
        }
    }

    /// The underlying namer, for building compound keys by hand.
    pub fn namer(&self) -> &KeyNamer {
        &self.namer
    }

    pub fn list<C: Commands>(&self, name: &str, client: C) -> List<C> {
        List::new(self.namer.resolve(name), client)
    }

    pub fn list_with_initial<C: Commands>(
        &self,
        name: &str,
        client: C,
        initial: impl IntoIterator<Item = Bytes>,
    ) -> Result<List<C>, Error> {
        List::with_initial(self.namer.resolve(name), client, initial)
    }

    pub fn set<C: Commands>(&self, name: &str, client: C) -> Set<C> {
        Set::new(self.namer.resolve(name), client)
    }

    pub fn set_with_initial<C: Commands>(
        &self,
        name: &str,
        client: C,
        initial: impl IntoIterator<Item = Bytes>,
    ) -> Result<Set<C>, Error> {
        Set::with_initial(self.namer.resolve(name), client, initial)
    }

    pub fn sorted_set<C: Commands>(&self, name: &str, client: C) -> SortedSet<C> {
        SortedSet::new(self.namer.resolve(name), client)
    }

    pub fn sorted_set_with_initial<C: Commands>(
        &self,
        name: &str,
        client: C,
        initial: impl IntoIterator<Item = (Bytes, f64)>,
    ) -> Result<SortedSet<C>, Error> {
        SortedSet::with_initial(self.namer.resolve(name), client, initial)
    }

    pub fn map<C: Commands>(&self, name: &str, client: C) -> Map<C> {
        Map::new(self.namer.resolve(name), client)
    }

    pub fn map_with_initial<C: Commands>(
        &self,
        name: &str,
        client: C,
        initial: &[(String, Bytes)],
    ) -> Result<Map<C>, Error> {
        Map::with_initial(self.namer.resolve(name), client, initial)
    }

    pub fn queue<C: Commands>(&self, name: &str, client: C, maxsize: u64) -> Queue<C> {
        Queue::fifo(self.namer.resolve(name), client, maxsize)
    }

    pub fn lifo_queue<C: Commands>(&self, name: &str, client: C, maxsize: u64) -> Queue<C> {
        Queue::lifo(self.namer.resolve(name), client, maxsize)
    }

    pub fn counter<C: Commands>(&self, name: &str, client: C) -> Counter<C> {
        Counter::new(self.namer.resolve(name), client)
    }

    /// Allocate the next unique id for `name`: `"{name}:{n}"`, where `n`
    /// comes from atomically incrementing the counter at `"ids:{name}"`.
    pub fn next_id<C: Commands>(&self, name: &str, client: &mut C) -> Result<String, Error> {
        let counter_key = self.namer.resolve(&format!("ids{}{}", DELIMITER, name));
        let n = client.incr_by(&counter_key, 1)?;
        Ok(format!("{}{}{}", name, DELIMITER, n))
    }
}
