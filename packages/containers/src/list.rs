//! The list adapter.

use std::time::Duration;

use bytes::Bytes;
use keyspace_command::{CommandError, Commands};

use crate::Error;

/// A remote-backed list.
///
/// Indices are zero-based; negative indices count from the tail, as the
/// store defines them. Range arguments use the local stop-exclusive
/// convention and are translated to the store's inclusive stops before the
/// command is issued.
///
/// `extend` and `extend_left` issue one push per element - they are not
/// atomic, and concurrent readers can observe a partially extended list.
///
/// # Example
///
/// ```rust
/// use keyspace_containers::List;
/// use keyspace_memory::MemoryStore;
/// use bytes::Bytes;
///
/// let mut list = List::new("jobs", MemoryStore::new());
/// list.append(Bytes::from_static(b"a")).unwrap();
/// list.append(Bytes::from_static(b"b")).unwrap();
/// assert_eq!(list.get(-1).unwrap(), Bytes::from_static(b"b"));
/// ```
pub struct List<C> {
    key: String,
    client: C,
}

impl<C: Commands> List<C> {
    /// Wrap the list at `key`.
    pub fn new(key: impl Into<String>, client: C) -> Self {
        Self {
            key: key.into(),
            client,
        }
    }

    /// Wrap the list at `key` and append each element of `initial` to it.
    pub fn with_initial(
        key: impl Into<String>,
        client: C,
        initial: impl IntoIterator<Item = Bytes>,
    ) -> Result<Self, Error> {
        let mut list = Self::new(key, client);
        list.extend(initial)?;
        Ok(list)
    }

    /// The full store key this adapter addresses.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Element at `index`.
    ///
    /// Fails with [`Error::NotFound`] if the store reports no element
    /// there. An empty value stored at a valid index is indistinguishable
    /// from absence under this policy; callers storing empty values should
    /// use [`range`](List::range) instead.
    pub fn get(&mut self, index: i64) -> Result<Bytes, Error> {
        match self.client.lindex(&self.key, index)? {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::NotFound(format!("list index {}", index))),
        }
    }

    /// Overwrite the element at `index`.
    ///
    /// Fails with [`Error::InvalidArgument`] if the store rejects the
    /// index; other store failures propagate unchanged.
    pub fn set(&mut self, index: i64, value: Bytes) -> Result<(), Error> {
        self.client
            .lset(&self.key, index, value)
            .map_err(|err| match err {
                CommandError::Response { ref message } if message.contains("index out of range") => {
                    Error::InvalidArgument(format!("assignment index {} out of range", index))
                }
                other => Error::Command(other),
            })
    }

    /// Number of elements.
    pub fn len(&mut self) -> Result<u64, Error> {
        Ok(self.client.llen(&self.key)?)
    }

    pub fn is_empty(&mut self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    /// Elements in `[start, stop)`.
    ///
    /// Translated to the store's inclusive stop by subtracting one, so a
    /// negative `stop` addresses from the tail the way the store's own
    /// indices do.
    pub fn range(&mut self, start: i64, stop: i64) -> Result<Vec<Bytes>, Error> {
        Ok(self.client.lrange(&self.key, start, stop - 1)?)
    }

    /// The whole list, materialized.
    pub fn to_vec(&mut self) -> Result<Vec<Bytes>, Error> {
        Ok(self.client.lrange(&self.key, 0, -1)?)
    }

    /// Add `value` at the tail; returns the new length.
    pub fn append(&mut self, value: Bytes) -> Result<u64, Error> {
        Ok(self.client.rpush(&self.key, value)?)
    }

    /// Add `value` at the head; returns the new length.
    pub fn append_left(&mut self, value: Bytes) -> Result<u64, Error> {
        Ok(self.client.lpush(&self.key, value)?)
    }

    /// Drop everything outside `[start, stop)`. Same stop translation as
    /// [`range`](List::range).
    pub fn trim(&mut self, start: i64, stop: i64) -> Result<(), Error> {
        Ok(self.client.ltrim(&self.key, start, stop - 1)?)
    }

    /// Remove and return the tail element, or `None` if the list is empty.
    pub fn pop(&mut self) -> Result<Option<Bytes>, Error> {
        Ok(self.client.rpop(&self.key)?)
    }

    /// Remove and return the head element, or `None` if the list is empty.
    pub fn pop_left(&mut self) -> Result<Option<Bytes>, Error> {
        Ok(self.client.lpop(&self.key)?)
    }

    /// Like [`pop`](List::pop), but wait for an element to arrive.
    /// `None` timeout waits indefinitely; otherwise `Ok(None)` on expiry.
    pub fn pop_blocking(&mut self, timeout: Option<Duration>) -> Result<Option<Bytes>, Error> {
        Ok(self.client.brpop(&self.key, timeout)?)
    }

    /// Like [`pop_left`](List::pop_left), but wait for an element.
    pub fn pop_left_blocking(&mut self, timeout: Option<Duration>) -> Result<Option<Bytes>, Error> {
        Ok(self.client.blpop(&self.key, timeout)?)
    }

    /// Remove up to `count` occurrences of `value` (head to tail); returns
    /// how many went. Fails with [`Error::NotFound`] if none did.
    pub fn remove(&mut self, value: &[u8], count: u64) -> Result<u64, Error> {
        let removed = self.client.lrem(&self.key, count, value)?;
        if removed == 0 {
            return Err(Error::NotFound("value not in list".to_string()));
        }
        Ok(removed)
    }

    /// Append each element of `iterable`, one push per element.
    pub fn extend(&mut self, iterable: impl IntoIterator<Item = Bytes>) -> Result<(), Error> {
        for value in iterable {
            self.append(value)?;
        }
        Ok(())
    }

    /// Push each element of `iterable` onto the head, one push per element.
    pub fn extend_left(&mut self, iterable: impl IntoIterator<Item = Bytes>) -> Result<(), Error> {
        for value in iterable {
            self.append_left(value)?;
        }
        Ok(())
    }
}
