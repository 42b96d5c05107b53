//! The hash-map adapter.

use bytes::Bytes;
use keyspace_command::Commands;

use crate::Error;

/// The default-lookup hook a [`Map`] may carry.
///
/// Invoked by [`Map::get`] when a field is absent, instead of failing.
/// It fires only when no explicit default is in play: [`Map::get_or`]
/// never consults it.
pub type OnMissing = Box<dyn Fn(&str) -> Bytes + Send + Sync>;

/// A remote-backed mapping from field name to value.
///
/// # Example
///
/// ```rust
/// use keyspace_containers::Map;
/// use keyspace_memory::MemoryStore;
/// use bytes::Bytes;
///
/// let mut config = Map::new("config", MemoryStore::new());
/// config.set("mode", Bytes::from_static(b"fast")).unwrap();
/// assert_eq!(config.get("mode").unwrap(), Bytes::from_static(b"fast"));
/// ```
pub struct Map<C> {
    key: String,
    client: C,
    on_missing: Option<OnMissing>,
}

impl<C: Commands> Map<C> {
    /// Wrap the hash at `key`.
    pub fn new(key: impl Into<String>, client: C) -> Self {
        Self {
            key: key.into(),
            client,
            on_missing: None,
        }
    }

    /// Wrap the hash at `key` and set all of `initial` in one bulk
    /// command.
    pub fn with_initial(
        key: impl Into<String>,
        client: C,
        initial: &[(String, Bytes)],
    ) -> Result<Self, Error> {
        let mut map = Self::new(key, client);
        map.update(initial)?;
        Ok(map)
    }

    /// Install a default-lookup hook, consumed at construction time.
    pub fn on_missing(mut self, hook: impl Fn(&str) -> Bytes + Send + Sync + 'static) -> Self {
        self.on_missing = Some(Box::new(hook));
        self
    }

    /// The full store key this adapter addresses.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value at `field`.
    ///
    /// On a miss, the default-lookup hook answers if one is installed;
    /// otherwise this fails with [`Error::NotFound`].
    pub fn get(&mut self, field: &str) -> Result<Bytes, Error> {
        match self.client.hget(&self.key, field)? {
            Some(value) => Ok(value),
            None => match &self.on_missing {
                Some(hook) => Ok(hook(field)),
                None => Err(Error::NotFound(field.to_string())),
            },
        }
    }

    /// Value at `field`, or `default` on a miss. Never fails on absence
    /// and never consults the hook.
    pub fn get_or(&mut self, field: &str, default: Bytes) -> Result<Bytes, Error> {
        Ok(self.client.hget(&self.key, field)?.unwrap_or(default))
    }

    /// Set `field`; returns `true` if the field was newly created.
    pub fn set(&mut self, field: &str, value: Bytes) -> Result<bool, Error> {
        Ok(self.client.hset(&self.key, field, value)?)
    }

    /// Delete `field`; it must be present.
    pub fn delete(&mut self, field: &str) -> Result<(), Error> {
        if !self.client.hdel(&self.key, field)? {
            return Err(Error::NotFound(field.to_string()));
        }
        Ok(())
    }

    /// Field presence test.
    pub fn contains(&mut self, field: &str) -> Result<bool, Error> {
        Ok(self.client.hexists(&self.key, field)?)
    }

    /// Number of fields.
    pub fn len(&mut self) -> Result<u64, Error> {
        Ok(self.client.hlen(&self.key)?)
    }

    pub fn is_empty(&mut self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    /// All field names.
    pub fn keys(&mut self) -> Result<Vec<String>, Error> {
        Ok(self.client.hkeys(&self.key)?)
    }

    /// All values.
    pub fn values(&mut self) -> Result<Vec<Bytes>, Error> {
        Ok(self.client.hvals(&self.key)?)
    }

    /// All `(field, value)` pairs, materialized.
    pub fn items(&mut self) -> Result<Vec<(String, Bytes)>, Error> {
        Ok(self.client.hgetall(&self.key)?.into_iter().collect())
    }

    /// Value at `field` if present; otherwise store `default` there and
    /// return it.
    pub fn set_default(&mut self, field: &str, default: Bytes) -> Result<Bytes, Error> {
        match self.client.hget(&self.key, field)? {
            Some(value) => Ok(value),
            None => {
                self.client.hset(&self.key, field, default.clone())?;
                Ok(default)
            }
        }
    }

    /// Remove `field` and return its value.
    ///
    /// The lookup goes through [`get`](Map::get), so an installed hook
    /// answers for absent fields. A delete that races with another writer
    /// and finds nothing is ignored - the previously-read value is
    /// already in hand.
    pub fn pop(&mut self, field: &str) -> Result<Bytes, Error> {
        let value = self.get(field)?;
        let _ = self.client.hdel(&self.key, field)?;
        Ok(value)
    }

    /// Remove `field` and return its value, or `default` if absent.
    pub fn pop_or(&mut self, field: &str, default: Bytes) -> Result<Bytes, Error> {
        match self.client.hget(&self.key, field)? {
            Some(value) => {
                let _ = self.client.hdel(&self.key, field)?;
                Ok(value)
            }
            None => Ok(default),
        }
    }

    /// Set every pair of `entries` in one bulk command.
    pub fn update(&mut self, entries: &[(String, Bytes)]) -> Result<(), Error> {
        Ok(self.client.hmset(&self.key, entries)?)
    }
}
