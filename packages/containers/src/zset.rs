//! The remote sorted-set adapter.

use bytes::Bytes;
use keyspace_command::Commands;

use crate::scored::{ItemsView, ScoredSet};
use crate::Error;

/// A remote-backed sorted set: members ordered by `(score, member)`
/// ascending.
///
/// # Example
///
/// ```rust
/// use keyspace_containers::{ScoredSet, SortedSet};
/// use keyspace_memory::MemoryStore;
/// use bytes::Bytes;
///
/// let mut board = SortedSet::new("scores", MemoryStore::new());
/// board.add(Bytes::from_static(b"alice"), 12.0).unwrap();
/// board.add(Bytes::from_static(b"bob"), 7.0).unwrap();
/// assert_eq!(board.rank(b"alice").unwrap(), Some(1));
/// ```
pub struct SortedSet<C> {
    key: String,
    client: C,
}

impl<C: Commands> SortedSet<C> {
    /// Wrap the sorted set at `key`.
    pub fn new(key: impl Into<String>, client: C) -> Self {
        Self {
            key: key.into(),
            client,
        }
    }

    /// Wrap the sorted set at `key` and seed it with `(member, score)`
    /// pairs in one bulk command.
    pub fn with_initial(
        key: impl Into<String>,
        client: C,
        initial: impl IntoIterator<Item = (Bytes, f64)>,
    ) -> Result<Self, Error> {
        let mut zset = Self::new(key, client);
        zset.update(initial)?;
        Ok(zset)
    }

    /// The full store key this adapter addresses.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Insert or rescore every pair in one bulk command.
    pub fn update(
        &mut self,
        pairs: impl IntoIterator<Item = (Bytes, f64)>,
    ) -> Result<(), Error> {
        let pairs: Vec<(Bytes, f64)> = pairs.into_iter().collect();
        if !pairs.is_empty() {
            self.client.zadd_many(&self.key, &pairs)?;
        }
        Ok(())
    }

    /// A read-only slicing/iteration view of this set.
    pub fn view(&mut self) -> ItemsView<'_, Self> {
        ItemsView::new(self)
    }
}

impl<C: Commands> ScoredSet for SortedSet<C> {
    fn add(&mut self, member: Bytes, score: f64) -> Result<bool, Error> {
        Ok(self.client.zadd(&self.key, member, score)?)
    }

    fn remove(&mut self, member: &[u8]) -> Result<(), Error> {
        // zero-affected-count is how the store signals absence
        if !self.client.zrem(&self.key, member)? {
            return Err(Error::NotFound(
                String::from_utf8_lossy(member).into_owned(),
            ));
        }
        Ok(())
    }

    fn discard(&mut self, member: &[u8]) -> Result<(), Error> {
        self.client.zrem(&self.key, member)?;
        Ok(())
    }

    fn increment(&mut self, member: Bytes, amount: f64) -> Result<f64, Error> {
        Ok(self.client.zincrby(&self.key, member, amount)?)
    }

    fn rank(&mut self, member: &[u8]) -> Result<Option<u64>, Error> {
        Ok(self.client.zrank(&self.key, member)?)
    }

    fn revrank(&mut self, member: &[u8]) -> Result<Option<u64>, Error> {
        Ok(self.client.zrevrank(&self.key, member)?)
    }

    fn score(&mut self, member: &[u8]) -> Result<Option<f64>, Error> {
        Ok(self.client.zscore(&self.key, member)?)
    }

    fn range_by_score(&mut self, min: f64, max: f64) -> Result<Vec<Bytes>, Error> {
        Ok(self
            .client
            .zrangebyscore(&self.key, min, max)?
            .into_iter()
            .map(|(member, _)| member)
            .collect())
    }

    fn items(&mut self, start: i64, stop: i64, desc: bool) -> Result<Vec<(Bytes, f64)>, Error> {
        Ok(if desc {
            self.client.zrevrange(&self.key, start, stop)?
        } else {
            self.client.zrange(&self.key, start, stop)?
        })
    }

    fn len(&mut self) -> Result<u64, Error> {
        Ok(self.client.zcard(&self.key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyspace_memory::MemoryStore;

    fn b(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    fn seeded(pairs: &[(&str, f64)]) -> SortedSet<MemoryStore> {
        SortedSet::with_initial(
            "z",
            MemoryStore::new(),
            pairs.iter().map(|(m, s)| (b(m), *s)),
        )
        .unwrap()
    }

    #[test]
    fn members_come_back_in_score_order() {
        let mut zset = seeded(&[("c", 3.0), ("a", 1.0), ("b", 2.0)]);
        assert_eq!(zset.members().unwrap(), vec![b("a"), b("b"), b("c")]);
    }

    #[test]
    fn rank_and_revrank() {
        let mut zset = seeded(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        assert_eq!(zset.rank(b"b").unwrap(), Some(1));
        assert_eq!(zset.revrank(b"b").unwrap(), Some(1));
        assert_eq!(zset.rank(b"nope").unwrap(), None);
    }

    #[test]
    fn remove_vs_discard() {
        let mut zset = seeded(&[("a", 1.0)]);
        zset.discard(b"missing").unwrap();
        assert!(matches!(zset.remove(b"missing"), Err(Error::NotFound(_))));
        zset.remove(b"a").unwrap();
        assert!(zset.is_empty().unwrap());
    }

    #[test]
    fn increment_inserts_or_bumps() {
        let mut zset = seeded(&[("a", 1.0)]);
        assert_eq!(zset.increment(b("a"), 2.5).unwrap(), 3.5);
        assert_eq!(zset.increment(b("fresh"), 4.0).unwrap(), 4.0);
    }

    #[test]
    fn view_slices_and_reverses() {
        let mut zset = seeded(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        let mut view = zset.view();
        assert_eq!(
            view.slice(0, 2).unwrap(),
            vec![(b("a"), 1.0), (b("b"), 2.0)]
        );
        assert_eq!(view.get(1).unwrap(), Some((b("b"), 2.0)));
        assert_eq!(view.get(9).unwrap(), None);
        assert_eq!(
            view.rev().unwrap(),
            vec![(b("c"), 3.0), (b("b"), 2.0), (b("a"), 1.0)]
        );
    }
}
