//! The atomic counter adapter.

use bytes::Bytes;
use keyspace_command::Commands;

use crate::Error;

/// A remote-backed integer.
///
/// `increment` and `decrement` are single store commands, so they are
/// atomic; `multiply_by` is read-compute-write and is not. A key that has
/// never been set reads as 0, the same base the store's own increment
/// uses.
///
/// # Example
///
/// ```rust
/// use keyspace_containers::Counter;
/// use keyspace_memory::MemoryStore;
///
/// let mut hits = Counter::new("hits", MemoryStore::new());
/// assert_eq!(hits.increment(1).unwrap(), 1);
/// assert_eq!(hits.increment(4).unwrap(), 5);
/// assert_eq!(hits.value().unwrap(), 5);
/// ```
pub struct Counter<C> {
    key: String,
    client: C,
}

impl<C: Commands> Counter<C> {
    /// Wrap the integer at `key`.
    pub fn new(key: impl Into<String>, client: C) -> Self {
        Self {
            key: key.into(),
            client,
        }
    }

    /// The full store key this adapter addresses.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value; 0 if the key is unset.
    ///
    /// Fails with [`Error::InvalidArgument`] if the stored value is not
    /// an integer.
    pub fn value(&mut self) -> Result<i64, Error> {
        match self.client.get(&self.key)? {
            None => Ok(0),
            Some(raw) => parse_int(&self.key, &raw),
        }
    }

    /// Overwrite the value.
    pub fn set(&mut self, value: i64) -> Result<(), Error> {
        Ok(self.client.set(&self.key, value.to_string().into())?)
    }

    /// Atomically add `delta`; returns the new value.
    pub fn increment(&mut self, delta: i64) -> Result<i64, Error> {
        Ok(self.client.incr_by(&self.key, delta)?)
    }

    /// Atomically subtract `delta`; returns the new value.
    pub fn decrement(&mut self, delta: i64) -> Result<i64, Error> {
        Ok(self.client.decr_by(&self.key, delta)?)
    }

    /// Multiply by `factor`; returns the new value.
    ///
    /// Read-compute-write: a concurrent increment between the read and
    /// the write is lost.
    pub fn multiply_by(&mut self, factor: i64) -> Result<i64, Error> {
        let product = self.value()?.checked_mul(factor).ok_or_else(|| {
            Error::InvalidArgument(format!("multiplying '{}' overflows", self.key))
        })?;
        self.set(product)?;
        Ok(product)
    }
}

fn parse_int(key: &str, raw: &Bytes) -> Result<i64, Error> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| Error::InvalidArgument(format!("value at '{}' is not an integer", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyspace_memory::MemoryStore;

    #[test]
    fn unset_counter_reads_zero() {
        let mut counter = Counter::new("c", MemoryStore::new());
        assert_eq!(counter.value().unwrap(), 0);
    }

    #[test]
    fn arithmetic() {
        let mut counter = Counter::new("c", MemoryStore::new());
        assert_eq!(counter.increment(10).unwrap(), 10);
        assert_eq!(counter.decrement(3).unwrap(), 7);
        assert_eq!(counter.multiply_by(3).unwrap(), 21);
        assert_eq!(counter.value().unwrap(), 21);
    }

    #[test]
    fn set_overwrites() {
        let mut counter = Counter::new("c", MemoryStore::new());
        counter.set(-5).unwrap();
        assert_eq!(counter.value().unwrap(), -5);
    }

    #[test]
    fn multiply_overflow_is_invalid() {
        let mut counter = Counter::new("c", MemoryStore::new());
        counter.set(i64::MAX).unwrap();
        assert!(matches!(
            counter.multiply_by(2),
            Err(Error::InvalidArgument(_))
        ));
        // the stored value is untouched on failure
        assert_eq!(counter.value().unwrap(), i64::MAX);
    }

    #[test]
    fn non_integer_value_is_invalid() {
        let store = MemoryStore::new();
        let mut client = store.clone();
        client.set("c", Bytes::from_static(b"not a number")).unwrap();
        let mut counter = Counter::new("c", store);
        assert!(matches!(counter.value(), Err(Error::InvalidArgument(_))));
    }
}
