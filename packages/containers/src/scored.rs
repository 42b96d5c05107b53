//! The operation surface shared by remote and local sorted sets.

use bytes::Bytes;

use crate::Error;

/// A score-ordered mapping from member to `f64` score.
///
/// Both the remote adapter ([`SortedSet`](crate::SortedSet)) and the local
/// reference implementation ([`LocalSortedSet`](crate::LocalSortedSet))
/// implement this trait, so algorithms and tests can run against either
/// and check them against each other. Ordering is ascending by
/// `(score, member)` everywhere.
pub trait ScoredSet {
    /// Insert a member or update its score; `true` if newly inserted.
    fn add(&mut self, member: Bytes, score: f64) -> Result<bool, Error>;

    /// Remove a member; fails with [`Error::NotFound`] if absent.
    fn remove(&mut self, member: &[u8]) -> Result<(), Error>;

    /// Remove a member if present; no error if absent.
    fn discard(&mut self, member: &[u8]) -> Result<(), Error>;

    /// Add `amount` to a member's score (inserting at `amount` if absent);
    /// returns the new score.
    fn increment(&mut self, member: Bytes, amount: f64) -> Result<f64, Error>;

    /// Zero-based position in ascending order, `None` if absent.
    fn rank(&mut self, member: &[u8]) -> Result<Option<u64>, Error>;

    /// Zero-based position in descending order: `len - rank - 1`.
    fn revrank(&mut self, member: &[u8]) -> Result<Option<u64>, Error>;

    /// The member's score, `None` if absent.
    fn score(&mut self, member: &[u8]) -> Result<Option<f64>, Error>;

    /// Members whose score lies in the inclusive `[min, max]`, ascending
    /// by `(score, member)`.
    fn range_by_score(&mut self, min: f64, max: f64) -> Result<Vec<Bytes>, Error>;

    /// `(member, score)` pairs in the inclusive rank range `[start, stop]`
    /// (store index conventions), descending when `desc` is set.
    fn items(&mut self, start: i64, stop: i64, desc: bool) -> Result<Vec<(Bytes, f64)>, Error>;

    /// Number of members.
    fn len(&mut self) -> Result<u64, Error>;

    fn is_empty(&mut self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    /// All members in ascending `(score, member)` order.
    fn members(&mut self) -> Result<Vec<Bytes>, Error> {
        Ok(self
            .items(0, -1, false)?
            .into_iter()
            .map(|(member, _)| member)
            .collect())
    }
}

/// A read-only view over any [`ScoredSet`]: slicing, reverse iteration,
/// single-index access. All bounds re-derive through
/// [`items`](ScoredSet::items) on every call, so the view always reflects
/// the current contents.
pub struct ItemsView<'a, S: ScoredSet> {
    inner: &'a mut S,
}

impl<'a, S: ScoredSet> ItemsView<'a, S> {
    pub fn new(inner: &'a mut S) -> Self {
        Self { inner }
    }

    /// Pairs in `[start, stop)`, local stop-exclusive convention.
    pub fn slice(&mut self, start: i64, stop: i64) -> Result<Vec<(Bytes, f64)>, Error> {
        self.inner.items(start, stop - 1, false)
    }

    /// Every pair, ascending.
    pub fn all(&mut self) -> Result<Vec<(Bytes, f64)>, Error> {
        self.inner.items(0, -1, false)
    }

    /// Every pair, descending.
    pub fn rev(&mut self) -> Result<Vec<(Bytes, f64)>, Error> {
        self.inner.items(0, -1, true)
    }

    /// The pair at one index, `None` if out of range.
    pub fn get(&mut self, index: i64) -> Result<Option<(Bytes, f64)>, Error> {
        Ok(self.inner.items(index, index, false)?.into_iter().next())
    }
}
