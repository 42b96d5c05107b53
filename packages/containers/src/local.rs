//! The local reference sorted set.

use std::collections::HashMap;

use bytes::Bytes;
use keyspace_command::resolve_range;

use crate::scored::{ItemsView, ScoredSet};
use crate::Error;

/// An in-memory sorted set with the same operation surface as the remote
/// adapter.
///
/// This is the correctness oracle: no store traffic, the simplest
/// implementation that honors the `(score, member)` ordering, used to
/// cross-check the remote adapter and to run sorted-set algorithms
/// locally. Rank is position in the sorted order; `range_by_score` is a
/// pair of binary searches over the sorted score sequence.
///
/// # Example
///
/// ```rust
/// use keyspace_containers::{LocalSortedSet, ScoredSet};
/// use bytes::Bytes;
///
/// let mut zset = LocalSortedSet::new();
/// zset.add(Bytes::from_static(b"a"), 2.0).unwrap();
/// zset.add(Bytes::from_static(b"b"), 1.0).unwrap();
/// assert_eq!(zset.rank(b"a").unwrap(), Some(1));
/// ```
#[derive(Default)]
pub struct LocalSortedSet {
    scores: HashMap<Bytes, f64>,
}

impl LocalSortedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(member, score)` pairs. Later pairs win on duplicate
    /// members, as repeated `add` calls would.
    pub fn with_initial(initial: impl IntoIterator<Item = (Bytes, f64)>) -> Self {
        Self {
            scores: initial.into_iter().collect(),
        }
    }

    /// A read-only slicing/iteration view.
    pub fn view(&mut self) -> ItemsView<'_, Self> {
        ItemsView::new(self)
    }

    /// All pairs ascending by `(score, member)`.
    fn sorted_pairs(&self) -> Vec<(Bytes, f64)> {
        let mut pairs: Vec<(Bytes, f64)> =
            self.scores.iter().map(|(m, s)| (m.clone(), *s)).collect();
        pairs.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        pairs
    }
}

impl ScoredSet for LocalSortedSet {
    fn add(&mut self, member: Bytes, score: f64) -> Result<bool, Error> {
        Ok(self.scores.insert(member, score).is_none())
    }

    fn remove(&mut self, member: &[u8]) -> Result<(), Error> {
        if self.scores.remove(member).is_none() {
            return Err(Error::NotFound(
                String::from_utf8_lossy(member).into_owned(),
            ));
        }
        Ok(())
    }

    fn discard(&mut self, member: &[u8]) -> Result<(), Error> {
        self.scores.remove(member);
        Ok(())
    }

    fn increment(&mut self, member: Bytes, amount: f64) -> Result<f64, Error> {
        let score = self.scores.entry(member).or_insert(0.0);
        *score += amount;
        Ok(*score)
    }

    fn rank(&mut self, member: &[u8]) -> Result<Option<u64>, Error> {
        Ok(self
            .sorted_pairs()
            .iter()
            .position(|(m, _)| m.as_ref() == member)
            .map(|i| i as u64))
    }

    fn revrank(&mut self, member: &[u8]) -> Result<Option<u64>, Error> {
        let count = self.scores.len() as u64;
        Ok(self.rank(member)?.map(|rank| count - rank - 1))
    }

    fn score(&mut self, member: &[u8]) -> Result<Option<f64>, Error> {
        Ok(self.scores.get(member).copied())
    }

    fn range_by_score(&mut self, min: f64, max: f64) -> Result<Vec<Bytes>, Error> {
        let pairs = self.sorted_pairs();
        let scores: Vec<f64> = pairs.iter().map(|(_, score)| *score).collect();
        // leftmost insertion point for min, then rightmost for max,
        // searching only at or after the min boundary
        let start = scores.partition_point(|score| *score < min);
        let end = start + scores[start..].partition_point(|score| *score <= max);
        Ok(pairs[start..end]
            .iter()
            .map(|(member, _)| member.clone())
            .collect())
    }

    fn items(&mut self, start: i64, stop: i64, desc: bool) -> Result<Vec<(Bytes, f64)>, Error> {
        let mut pairs = self.sorted_pairs();
        if desc {
            pairs.reverse();
        }
        Ok(match resolve_range(pairs.len(), start, stop) {
            Some((begin, end)) => pairs[begin..end].to_vec(),
            None => Vec::new(),
        })
    }

    fn len(&mut self) -> Result<u64, Error> {
        Ok(self.scores.len() as u64)
    }
}
