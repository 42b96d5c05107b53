//! The set adapter and its remote/local algebra.

use std::collections::HashSet;

use bytes::Bytes;
use keyspace_command::Commands;

use crate::Error;

/// One operand of a set-algebra operation.
///
/// Algebra methods on [`Set`] accept either another remote set (by full
/// key, so the store computes the operation server-side) or a plain local
/// set (computed client-side after fetching this set's membership). The
/// operand kind is resolved once per call.
pub enum Operand<'a> {
    /// Another remote set, by full key.
    Remote(&'a str),
    /// A local in-memory set.
    Local(&'a HashSet<Bytes>),
}

impl<'a, C: Commands> From<&'a Set<C>> for Operand<'a> {
    fn from(set: &'a Set<C>) -> Self {
        Operand::Remote(set.key())
    }
}

impl<'a> From<&'a HashSet<Bytes>> for Operand<'a> {
    fn from(set: &'a HashSet<Bytes>) -> Self {
        Operand::Local(set)
    }
}

/// A remote-backed set of unique members.
///
/// # Example
///
/// ```rust
/// use keyspace_containers::Set;
/// use keyspace_memory::MemoryStore;
/// use bytes::Bytes;
///
/// let mut tags = Set::new("tags", MemoryStore::new());
/// tags.add(Bytes::from_static(b"rust")).unwrap();
/// assert!(tags.contains(b"rust").unwrap());
/// ```
pub struct Set<C> {
    key: String,
    client: C,
}

impl<C: Commands> Set<C> {
    /// Wrap the set at `key`.
    pub fn new(key: impl Into<String>, client: C) -> Self {
        Self {
            key: key.into(),
            client,
        }
    }

    /// Wrap the set at `key` and add each member of `initial`, one
    /// command per member.
    pub fn with_initial(
        key: impl Into<String>,
        client: C,
        initial: impl IntoIterator<Item = Bytes>,
    ) -> Result<Self, Error> {
        let mut set = Self::new(key, client);
        for member in initial {
            set.add(member)?;
        }
        Ok(set)
    }

    /// The full store key this adapter addresses.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Membership test.
    pub fn contains(&mut self, member: &[u8]) -> Result<bool, Error> {
        Ok(self.client.sismember(&self.key, member)?)
    }

    /// Number of members.
    pub fn len(&mut self) -> Result<u64, Error> {
        Ok(self.client.scard(&self.key)?)
    }

    pub fn is_empty(&mut self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    /// Add a member. No effect if it is already present.
    pub fn add(&mut self, member: Bytes) -> Result<bool, Error> {
        Ok(self.client.sadd(&self.key, member)?)
    }

    /// Remove a member; it must be present.
    pub fn remove(&mut self, member: &[u8]) -> Result<(), Error> {
        if !self.client.srem(&self.key, member)? {
            return Err(Error::NotFound(
                String::from_utf8_lossy(member).into_owned(),
            ));
        }
        Ok(())
    }

    /// Remove and return an arbitrary member.
    ///
    /// Fails with [`Error::Empty`] if the set has none, signaled by the
    /// remote call returning no member.
    pub fn pop(&mut self) -> Result<Bytes, Error> {
        self.client.spop(&self.key)?.ok_or(Error::Empty)
    }

    /// All members, materialized locally.
    pub fn members(&mut self) -> Result<HashSet<Bytes>, Error> {
        Ok(self.client.smembers(&self.key)?)
    }

    /// Union with another set, as a new local set.
    pub fn union<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<HashSet<Bytes>, Error> {
        match other.into() {
            Operand::Remote(other_key) => Ok(self.client.sunion(&[&self.key, other_key])?),
            Operand::Local(other) => {
                let mut result = self.members()?;
                result.extend(other.iter().cloned());
                Ok(result)
            }
        }
    }

    /// Intersection with another set, as a new local set.
    pub fn intersection<'a>(
        &mut self,
        other: impl Into<Operand<'a>>,
    ) -> Result<HashSet<Bytes>, Error> {
        match other.into() {
            Operand::Remote(other_key) => Ok(self.client.sinter(&[&self.key, other_key])?),
            Operand::Local(other) => {
                let mut result = self.members()?;
                result.retain(|m| other.contains(m));
                Ok(result)
            }
        }
    }

    /// Members of this set in none of `others`, as a new local set.
    ///
    /// Remote operands go into a single store-side diff; local operands
    /// are then subtracted from that result.
    pub fn difference(&mut self, others: &[Operand<'_>]) -> Result<HashSet<Bytes>, Error> {
        let mut keys: Vec<&str> = vec![&self.key];
        let mut locals: Vec<&HashSet<Bytes>> = Vec::new();
        for other in others {
            match other {
                Operand::Remote(key) => keys.push(key),
                Operand::Local(set) => locals.push(set),
            }
        }
        let mut result = self.client.sdiff(&keys)?;
        for local in locals {
            result.retain(|m| !local.contains(m));
        }
        Ok(result)
    }

    /// Union in place. A remote operand overwrites this set with the
    /// store-side union, atomically; a local operand adds members one
    /// command at a time.
    pub fn update<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<(), Error> {
        match other.into() {
            Operand::Remote(other_key) => {
                self.client
                    .sunionstore(&self.key, &[&self.key, other_key])?;
                Ok(())
            }
            Operand::Local(other) => {
                for member in other {
                    self.client.sadd(&self.key, member.clone())?;
                }
                Ok(())
            }
        }
    }

    /// Overwrite this set with its store-side intersection against the
    /// remote set at `other_key`.
    pub fn intersection_update(&mut self, other_key: &str) -> Result<(), Error> {
        self.client
            .sinterstore(&self.key, &[&self.key, other_key])?;
        Ok(())
    }

    /// Overwrite this set with its store-side difference against the
    /// remote set at `other_key`.
    pub fn difference_update(&mut self, other_key: &str) -> Result<(), Error> {
        self.client
            .sdiffstore(&self.key, &[&self.key, other_key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyspace_memory::MemoryStore;

    fn b(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    fn remote(store: &MemoryStore, key: &str, members: &[&str]) -> Set<MemoryStore> {
        Set::with_initial(key, store.clone(), members.iter().map(|m| b(m))).unwrap()
    }

    fn local(members: &[&str]) -> HashSet<Bytes> {
        members.iter().map(|m| b(m)).collect()
    }

    #[test]
    fn membership_basics() {
        let mut set = remote(&MemoryStore::new(), "s", &["x"]);
        assert!(set.contains(b"x").unwrap());
        assert!(!set.contains(b"y").unwrap());
        assert_eq!(set.len().unwrap(), 1);

        set.remove(b"x").unwrap();
        assert!(matches!(set.remove(b"x"), Err(Error::NotFound(_))));
        assert!(matches!(set.pop(), Err(Error::Empty)));
    }

    #[test]
    fn pop_returns_a_member() {
        let mut set = remote(&MemoryStore::new(), "s", &["only"]);
        assert_eq!(set.pop().unwrap(), b("only"));
    }

    #[test]
    fn remote_algebra() {
        let store = MemoryStore::new();
        let mut s1 = remote(&store, "s1", &["a", "b", "c"]);
        let s2 = remote(&store, "s2", &["b", "c", "d"]);

        assert_eq!(s1.union(&s2).unwrap(), local(&["a", "b", "c", "d"]));
        assert_eq!(s1.intersection(&s2).unwrap(), local(&["b", "c"]));
        assert_eq!(
            s1.difference(&[Operand::from(&s2)]).unwrap(),
            local(&["a"])
        );
    }

    #[test]
    fn local_algebra_matches_remote() {
        let store = MemoryStore::new();
        let mut s1 = remote(&store, "s1", &["a", "b", "c"]);
        let other = local(&["b", "c", "d"]);

        assert_eq!(s1.union(&other).unwrap(), local(&["a", "b", "c", "d"]));
        assert_eq!(s1.intersection(&other).unwrap(), local(&["b", "c"]));
        assert_eq!(
            s1.difference(&[Operand::Local(&other)]).unwrap(),
            local(&["a"])
        );
    }

    #[test]
    fn difference_partitions_mixed_operands() {
        let store = MemoryStore::new();
        let mut s1 = remote(&store, "s1", &["a", "b", "c", "d"]);
        let s2 = remote(&store, "s2", &["b"]);
        let loc = local(&["c"]);

        let result = s1
            .difference(&[Operand::from(&s2), Operand::Local(&loc)])
            .unwrap();
        assert_eq!(result, local(&["a", "d"]));
    }

    #[test]
    fn in_place_updates() {
        let store = MemoryStore::new();
        let mut s1 = remote(&store, "s1", &["a", "b"]);
        let s2 = remote(&store, "s2", &["b", "c"]);

        s1.update(&s2).unwrap();
        assert_eq!(s1.members().unwrap(), local(&["a", "b", "c"]));

        s1.intersection_update(s2.key()).unwrap();
        assert_eq!(s1.members().unwrap(), local(&["b", "c"]));

        s1.difference_update(s2.key()).unwrap();
        assert!(s1.is_empty().unwrap());
    }

    #[test]
    fn local_update_adds_each_member() {
        let store = MemoryStore::new();
        let mut s1 = remote(&store, "s1", &["a"]);
        s1.update(&local(&["b", "c"])).unwrap();
        assert_eq!(s1.len().unwrap(), 3);
    }
}
