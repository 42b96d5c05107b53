//! The primitive command set of the remote store.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use bytes::Bytes;

use crate::CommandError;

/// One client connection to the remote store.
///
/// Each method is one primitive command: the store executes it atomically
/// and in arrival order. Values are opaque `Bytes` - encoding and decoding
/// happen in whatever layer sits above the client. Hash fields are strings,
/// sorted-set scores are `f64`.
///
/// Index arguments follow the store's conventions: zero-based, negative
/// counts from the tail, range stops inclusive. See [`resolve_index`] and
/// [`resolve_range`](crate::resolve_range) for the exact rules.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Commands>`, and blanket
/// impls cover `&mut T` and `Box<T>`.
///
/// [`resolve_index`]: crate::resolve_index
pub trait Commands: Send + Sync {
    // String / counter commands

    /// Read the string value at `key`. `Ok(None)` if the key is unset.
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, CommandError>;

    /// Set the string value at `key`, creating or overwriting it.
    fn set(&mut self, key: &str, value: Bytes) -> Result<(), CommandError>;

    /// Add `delta` to the integer at `key` and return the new value.
    ///
    /// An unset key counts as 0. Fails with `CommandError::Response` if the
    /// value is not an integer.
    fn incr_by(&mut self, key: &str, delta: i64) -> Result<i64, CommandError>;

    /// Subtract `delta` from the integer at `key` and return the new value.
    fn decr_by(&mut self, key: &str, delta: i64) -> Result<i64, CommandError>;

    // List commands

    /// Push a value onto the head of the list; returns the new length.
    fn lpush(&mut self, key: &str, value: Bytes) -> Result<u64, CommandError>;

    /// Push a value onto the tail of the list; returns the new length.
    fn rpush(&mut self, key: &str, value: Bytes) -> Result<u64, CommandError>;

    /// Read the element at `index`. `Ok(None)` if the index is out of range.
    fn lindex(&mut self, key: &str, index: i64) -> Result<Option<Bytes>, CommandError>;

    /// Overwrite the element at `index`.
    ///
    /// Fails with `CommandError::Response` carrying the condition text
    /// `"index out of range"` if the index does not address an element.
    fn lset(&mut self, key: &str, index: i64, value: Bytes) -> Result<(), CommandError>;

    /// Number of elements in the list (0 for an unset key).
    fn llen(&mut self, key: &str) -> Result<u64, CommandError>;

    /// Elements in the inclusive range `[start, stop]`.
    fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>, CommandError>;

    /// Drop every element outside the inclusive range `[start, stop]`.
    fn ltrim(&mut self, key: &str, start: i64, stop: i64) -> Result<(), CommandError>;

    /// Remove up to `count` head-to-tail occurrences of `value` (`count`
    /// of 0 removes all). Returns how many were removed.
    fn lrem(&mut self, key: &str, count: u64, value: &[u8]) -> Result<u64, CommandError>;

    /// Pop from the head. `Ok(None)` if the list is empty.
    fn lpop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError>;

    /// Pop from the tail. `Ok(None)` if the list is empty.
    fn rpop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError>;

    /// Pop from the head, blocking until an element arrives.
    ///
    /// With `timeout` of `None` the call waits indefinitely; otherwise it
    /// waits at most `timeout` and returns `Ok(None)` on expiry.
    fn blpop(&mut self, key: &str, timeout: Option<Duration>)
        -> Result<Option<Bytes>, CommandError>;

    /// Pop from the tail, blocking until an element arrives.
    fn brpop(&mut self, key: &str, timeout: Option<Duration>)
        -> Result<Option<Bytes>, CommandError>;

    // Set commands

    /// Add a member; returns `true` if it was not already present.
    fn sadd(&mut self, key: &str, member: Bytes) -> Result<bool, CommandError>;

    /// Remove a member; returns `true` if it was present.
    fn srem(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError>;

    /// Remove and return an arbitrary member. `Ok(None)` if the set is empty.
    fn spop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError>;

    /// All members of the set.
    fn smembers(&mut self, key: &str) -> Result<HashSet<Bytes>, CommandError>;

    /// Membership test.
    fn sismember(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError>;

    /// Number of members (0 for an unset key).
    fn scard(&mut self, key: &str) -> Result<u64, CommandError>;

    /// Union of the sets at `keys`.
    fn sunion(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError>;

    /// Store the union of `keys` at `dest`; returns the result cardinality.
    fn sunionstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError>;

    /// Intersection of the sets at `keys`.
    fn sinter(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError>;

    /// Store the intersection of `keys` at `dest`; returns the result
    /// cardinality.
    fn sinterstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError>;

    /// Members of the first set at `keys` that appear in none of the rest.
    fn sdiff(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError>;

    /// Store the difference of `keys` at `dest`; returns the result
    /// cardinality.
    fn sdiffstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError>;

    // Hash commands

    /// Read one field. `Ok(None)` if the field is absent.
    fn hget(&mut self, key: &str, field: &str) -> Result<Option<Bytes>, CommandError>;

    /// Set one field; returns `true` if the field was newly created.
    fn hset(&mut self, key: &str, field: &str, value: Bytes) -> Result<bool, CommandError>;

    /// Delete one field; returns `true` if it existed.
    fn hdel(&mut self, key: &str, field: &str) -> Result<bool, CommandError>;

    /// Field existence test.
    fn hexists(&mut self, key: &str, field: &str) -> Result<bool, CommandError>;

    /// Number of fields (0 for an unset key).
    fn hlen(&mut self, key: &str) -> Result<u64, CommandError>;

    /// All field names.
    fn hkeys(&mut self, key: &str) -> Result<Vec<String>, CommandError>;

    /// All field values.
    fn hvals(&mut self, key: &str) -> Result<Vec<Bytes>, CommandError>;

    /// The whole hash.
    fn hgetall(&mut self, key: &str) -> Result<HashMap<String, Bytes>, CommandError>;

    /// Set many fields in one command.
    fn hmset(&mut self, key: &str, entries: &[(String, Bytes)]) -> Result<(), CommandError>;

    // Sorted-set commands

    /// Insert a member or update its score; returns `true` if the member
    /// was newly inserted.
    fn zadd(&mut self, key: &str, member: Bytes, score: f64) -> Result<bool, CommandError>;

    /// Insert or update many `(member, score)` pairs in one command;
    /// returns how many members were newly inserted.
    fn zadd_many(&mut self, key: &str, pairs: &[(Bytes, f64)]) -> Result<u64, CommandError>;

    /// Remove a member; returns `true` if it was present.
    fn zrem(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError>;

    /// `(member, score)` pairs in the inclusive rank range `[start, stop]`,
    /// ascending by `(score, member)`.
    fn zrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError>;

    /// Like [`zrange`](Commands::zrange) but descending.
    fn zrevrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError>;

    /// Pairs whose score lies in the inclusive `[min, max]`, ascending.
    fn zrangebyscore(
        &mut self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError>;

    /// Score of a member. `Ok(None)` if absent.
    fn zscore(&mut self, key: &str, member: &[u8]) -> Result<Option<f64>, CommandError>;

    /// Zero-based ascending rank of a member. `Ok(None)` if absent.
    fn zrank(&mut self, key: &str, member: &[u8]) -> Result<Option<u64>, CommandError>;

    /// Zero-based descending rank of a member. `Ok(None)` if absent.
    fn zrevrank(&mut self, key: &str, member: &[u8]) -> Result<Option<u64>, CommandError>;

    /// Add `delta` to a member's score (inserting at `delta` if absent)
    /// and return the new score.
    fn zincrby(&mut self, key: &str, member: Bytes, delta: f64) -> Result<f64, CommandError>;

    /// Number of members (0 for an unset key).
    fn zcard(&mut self, key: &str) -> Result<u64, CommandError>;
}

// Blanket implementations so adapters can borrow a shared client as
// `&mut dyn Commands` or own one as `Box<dyn Commands>`.

impl<T: Commands + ?Sized> Commands for &mut T {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        (*self).get(key)
    }
    fn set(&mut self, key: &str, value: Bytes) -> Result<(), CommandError> {
        (*self).set(key, value)
    }
    fn incr_by(&mut self, key: &str, delta: i64) -> Result<i64, CommandError> {
        (*self).incr_by(key, delta)
    }
    fn decr_by(&mut self, key: &str, delta: i64) -> Result<i64, CommandError> {
        (*self).decr_by(key, delta)
    }
    fn lpush(&mut self, key: &str, value: Bytes) -> Result<u64, CommandError> {
        (*self).lpush(key, value)
    }
    fn rpush(&mut self, key: &str, value: Bytes) -> Result<u64, CommandError> {
        (*self).rpush(key, value)
    }
    fn lindex(&mut self, key: &str, index: i64) -> Result<Option<Bytes>, CommandError> {
        (*self).lindex(key, index)
    }
    fn lset(&mut self, key: &str, index: i64, value: Bytes) -> Result<(), CommandError> {
        (*self).lset(key, index, value)
    }
    fn llen(&mut self, key: &str) -> Result<u64, CommandError> {
        (*self).llen(key)
    }
    fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>, CommandError> {
        (*self).lrange(key, start, stop)
    }
    fn ltrim(&mut self, key: &str, start: i64, stop: i64) -> Result<(), CommandError> {
        (*self).ltrim(key, start, stop)
    }
    fn lrem(&mut self, key: &str, count: u64, value: &[u8]) -> Result<u64, CommandError> {
        (*self).lrem(key, count, value)
    }
    fn lpop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        (*self).lpop(key)
    }
    fn rpop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        (*self).rpop(key)
    }
    fn blpop(
        &mut self,
        key: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<Bytes>, CommandError> {
        (*self).blpop(key, timeout)
    }
    fn brpop(
        &mut self,
        key: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<Bytes>, CommandError> {
        (*self).brpop(key, timeout)
    }
    fn sadd(&mut self, key: &str, member: Bytes) -> Result<bool, CommandError> {
        (*self).sadd(key, member)
    }
    fn srem(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError> {
        (*self).srem(key, member)
    }
    fn spop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        (*self).spop(key)
    }
    fn smembers(&mut self, key: &str) -> Result<HashSet<Bytes>, CommandError> {
        (*self).smembers(key)
    }
    fn sismember(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError> {
        (*self).sismember(key, member)
    }
    fn scard(&mut self, key: &str) -> Result<u64, CommandError> {
        (*self).scard(key)
    }
    fn sunion(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError> {
        (*self).sunion(keys)
    }
    fn sunionstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError> {
        (*self).sunionstore(dest, keys)
    }
    fn sinter(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError> {
        (*self).sinter(keys)
    }
    fn sinterstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError> {
        (*self).sinterstore(dest, keys)
    }
    fn sdiff(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError> {
        (*self).sdiff(keys)
    }
    fn sdiffstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError> {
        (*self).sdiffstore(dest, keys)
    }
    fn hget(&mut self, key: &str, field: &str) -> Result<Option<Bytes>, CommandError> {
        (*self).hget(key, field)
    }
    fn hset(&mut self, key: &str, field: &str, value: Bytes) -> Result<bool, CommandError> {
        (*self).hset(key, field, value)
    }
    fn hdel(&mut self, key: &str, field: &str) -> Result<bool, CommandError> {
        (*self).hdel(key, field)
    }
    fn hexists(&mut self, key: &str, field: &str) -> Result<bool, CommandError> {
        (*self).hexists(key, field)
    }
    fn hlen(&mut self, key: &str) -> Result<u64, CommandError> {
        (*self).hlen(key)
    }
    fn hkeys(&mut self, key: &str) -> Result<Vec<String>, CommandError> {
        (*self).hkeys(key)
    }
    fn hvals(&mut self, key: &str) -> Result<Vec<Bytes>, CommandError> {
        (*self).hvals(key)
    }
    fn hgetall(&mut self, key: &str) -> Result<HashMap<String, Bytes>, CommandError> {
        (*self).hgetall(key)
    }
    fn hmset(&mut self, key: &str, entries: &[(String, Bytes)]) -> Result<(), CommandError> {
        (*self).hmset(key, entries)
    }
    fn zadd(&mut self, key: &str, member: Bytes, score: f64) -> Result<bool, CommandError> {
        (*self).zadd(key, member, score)
    }
    fn zadd_many(&mut self, key: &str, pairs: &[(Bytes, f64)]) -> Result<u64, CommandError> {
        (*self).zadd_many(key, pairs)
    }
    fn zrem(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError> {
        (*self).zrem(key, member)
    }
    fn zrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError> {
        (*self).zrange(key, start, stop)
    }
    fn zrevrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError> {
        (*self).zrevrange(key, start, stop)
    }
    fn zrangebyscore(
        &mut self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError> {
        (*self).zrangebyscore(key, min, max)
    }
    fn zscore(&mut self, key: &str, member: &[u8]) -> Result<Option<f64>, CommandError> {
        (*self).zscore(key, member)
    }
    fn zrank(&mut self, key: &str, member: &[u8]) -> Result<Option<u64>, CommandError> {
        (*self).zrank(key, member)
    }
    fn zrevrank(&mut self, key: &str, member: &[u8]) -> Result<Option<u64>, CommandError> {
        (*self).zrevrank(key, member)
    }
    fn zincrby(&mut self, key: &str, member: Bytes, delta: f64) -> Result<f64, CommandError> {
        (*self).zincrby(key, member, delta)
    }
    fn zcard(&mut self, key: &str) -> Result<u64, CommandError> {
        (*self).zcard(key)
    }
}

impl<T: Commands + ?Sized> Commands for Box<T> {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        (**self).get(key)
    }
    fn set(&mut self, key: &str, value: Bytes) -> Result<(), CommandError> {
        (**self).set(key, value)
    }
    fn incr_by(&mut self, key: &str, delta: i64) -> Result<i64, CommandError> {
        (**self).incr_by(key, delta)
    }
    fn decr_by(&mut self, key: &str, delta: i64) -> Result<i64, CommandError> {
        (**self).decr_by(key, delta)
    }
    fn lpush(&mut self, key: &str, value: Bytes) -> Result<u64, CommandError> {
        (**self).lpush(key, value)
    }
    fn rpush(&mut self, key: &str, value: Bytes) -> Result<u64, CommandError> {
        (**self).rpush(key, value)
    }
    fn lindex(&mut self, key: &str, index: i64) -> Result<Option<Bytes>, CommandError> {
        (**self).lindex(key, index)
    }
    fn lset(&mut self, key: &str, index: i64, value: Bytes) -> Result<(), CommandError> {
        (**self).lset(key, index, value)
    }
    fn llen(&mut self, key: &str) -> Result<u64, CommandError> {
        (**self).llen(key)
    }
    fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>, CommandError> {
        (**self).lrange(key, start, stop)
    }
    fn ltrim(&mut self, key: &str, start: i64, stop: i64) -> Result<(), CommandError> {
        (**self).ltrim(key, start, stop)
    }
    fn lrem(&mut self, key: &str, count: u64, value: &[u8]) -> Result<u64, CommandError> {
        (**self).lrem(key, count, value)
    }
    fn lpop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        (**self).lpop(key)
    }
    fn rpop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        (**self).rpop(key)
    }
    fn blpop(
        &mut self,
        key: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<Bytes>, CommandError> {
        (**self).blpop(key, timeout)
    }
    fn brpop(
        &mut self,
        key: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<Bytes>, CommandError> {
        (**self).brpop(key, timeout)
    }
    fn sadd(&mut self, key: &str, member: Bytes) -> Result<bool, CommandError> {
        (**self).sadd(key, member)
    }
    fn srem(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError> {
        (**self).srem(key, member)
    }
    fn spop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        (**self).spop(key)
    }
    fn smembers(&mut self, key: &str) -> Result<HashSet<Bytes>, CommandError> {
        (**self).smembers(key)
    }
    fn sismember(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError> {
        (**self).sismember(key, member)
    }
    fn scard(&mut self, key: &str) -> Result<u64, CommandError> {
        (**self).scard(key)
    }
    fn sunion(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError> {
        (**self).sunion(keys)
    }
    fn sunionstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError> {
        (**self).sunionstore(dest, keys)
    }
    fn sinter(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError> {
        (**self).sinter(keys)
    }
    fn sinterstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError> {
        (**self).sinterstore(dest, keys)
    }
    fn sdiff(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError> {
        (**self).sdiff(keys)
    }
    fn sdiffstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError> {
        (**self).sdiffstore(dest, keys)
    }
    fn hget(&mut self, key: &str, field: &str) -> Result<Option<Bytes>, CommandError> {
        (**self).hget(key, field)
    }
    fn hset(&mut self, key: &str, field: &str, value: Bytes) -> Result<bool, CommandError> {
        (**self).hset(key, field, value)
    }
    fn hdel(&mut self, key: &str, field: &str) -> Result<bool, CommandError> {
        (**self).hdel(key, field)
    }
    fn hexists(&mut self, key: &str, field: &str) -> Result<bool, CommandError> {
        (**self).hexists(key, field)
    }
    fn hlen(&mut self, key: &str) -> Result<u64, CommandError> {
        (**self).hlen(key)
    }
    fn hkeys(&mut self, key: &str) -> Result<Vec<String>, CommandError> {
        (**self).hkeys(key)
    }
    fn hvals(&mut self, key: &str) -> Result<Vec<Bytes>, CommandError> {
        (**self).hvals(key)
    }
    fn hgetall(&mut self, key: &str) -> Result<HashMap<String, Bytes>, CommandError> {
        (**self).hgetall(key)
    }
    fn hmset(&mut self, key: &str, entries: &[(String, Bytes)]) -> Result<(), CommandError> {
        (**self).hmset(key, entries)
    }
    fn zadd(&mut self, key: &str, member: Bytes, score: f64) -> Result<bool, CommandError> {
        (**self).zadd(key, member, score)
    }
    fn zadd_many(&mut self, key: &str, pairs: &[(Bytes, f64)]) -> Result<u64, CommandError> {
        (**self).zadd_many(key, pairs)
    }
    fn zrem(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError> {
        (**self).zrem(key, member)
    }
    fn zrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError> {
        (**self).zrange(key, start, stop)
    }
    fn zrevrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError> {
        (**self).zrevrange(key, start, stop)
    }
    fn zrangebyscore(
        &mut self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError> {
        (**self).zrangebyscore(key, min, max)
    }
    fn zscore(&mut self, key: &str, member: &[u8]) -> Result<Option<f64>, CommandError> {
        (**self).zscore(key, member)
    }
    fn zrank(&mut self, key: &str, member: &[u8]) -> Result<Option<u64>, CommandError> {
        (**self).zrank(key, member)
    }
    fn zrevrank(&mut self, key: &str, member: &[u8]) -> Result<Option<u64>, CommandError> {
        (**self).zrevrank(key, member)
    }
    fn zincrby(&mut self, key: &str, member: Bytes, delta: f64) -> Result<f64, CommandError> {
        (**self).zincrby(key, member, delta)
    }
    fn zcard(&mut self, key: &str) -> Result<u64, CommandError> {
        (**self).zcard(key)
    }
}
