//! The in-memory store.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use bytes::Bytes;
use keyspace_command::{resolve_index, resolve_range, CommandError, Commands};

/// One stored value. Each key holds exactly one kind at a time.
enum Entry {
    Str(Bytes),
    List(VecDeque<Bytes>),
    Set(HashSet<Bytes>),
    Hash(HashMap<String, Bytes>),
    ZSet(HashMap<Bytes, f64>),
}

struct Shared {
    entries: Mutex<HashMap<String, Entry>>,
    // Signalled on every list push so blocked pops can re-check.
    arrivals: Condvar,
}

/// An in-memory implementation of the full primitive command set.
///
/// Plays the role a local server would: one keyspace of typed entries,
/// commands applied atomically under a single lock, blocking pops that
/// actually block. Clones share the same keyspace, so a producer thread
/// and a consumer thread can each hold their own handle.
///
/// # Example
///
/// ```rust
/// use keyspace_memory::MemoryStore;
/// use keyspace_command::Commands;
/// use bytes::Bytes;
///
/// let mut store = MemoryStore::new();
/// store.rpush("jobs", Bytes::from_static(b"a")).unwrap();
/// assert_eq!(store.lpop("jobs").unwrap(), Some(Bytes::from_static(b"a")));
/// ```
#[derive(Clone)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                entries: Mutex::new(HashMap::new()),
                arrivals: Condvar::new(),
            }),
        }
    }

    /// Number of keys currently set.
    pub fn key_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // A panic while holding the lock leaves plain data behind, never a
        // broken invariant, so poisoning is recoverable here.
        self.shared
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn wrong_type(key: &str) -> CommandError {
    CommandError::WrongType {
        key: key.to_string(),
    }
}

fn response(message: &str) -> CommandError {
    CommandError::Response {
        message: message.to_string(),
    }
}

// Read-side accessors: absent keys read as empty, never created.

fn read_list<'a>(
    entries: &'a HashMap<String, Entry>,
    key: &str,
) -> Result<Option<&'a VecDeque<Bytes>>, CommandError> {
    match entries.get(key) {
        None => Ok(None),
        Some(Entry::List(list)) => Ok(Some(list)),
        Some(_) => Err(wrong_type(key)),
    }
}

fn read_set<'a>(
    entries: &'a HashMap<String, Entry>,
    key: &str,
) -> Result<Option<&'a HashSet<Bytes>>, CommandError> {
    match entries.get(key) {
        None => Ok(None),
        Some(Entry::Set(set)) => Ok(Some(set)),
        Some(_) => Err(wrong_type(key)),
    }
}

fn read_hash<'a>(
    entries: &'a HashMap<String, Entry>,
    key: &str,
) -> Result<Option<&'a HashMap<String, Bytes>>, CommandError> {
    match entries.get(key) {
        None => Ok(None),
        Some(Entry::Hash(hash)) => Ok(Some(hash)),
        Some(_) => Err(wrong_type(key)),
    }
}

fn read_zset<'a>(
    entries: &'a HashMap<String, Entry>,
    key: &str,
) -> Result<Option<&'a HashMap<Bytes, f64>>, CommandError> {
    match entries.get(key) {
        None => Ok(None),
        Some(Entry::ZSet(zset)) => Ok(Some(zset)),
        Some(_) => Err(wrong_type(key)),
    }
}

// Write-side accessors: absent keys are created empty with the right kind.

fn write_list<'a>(
    entries: &'a mut HashMap<String, Entry>,
    key: &str,
) -> Result<&'a mut VecDeque<Bytes>, CommandError> {
    match entries
        .entry(key.to_string())
        .or_insert_with(|| Entry::List(VecDeque::new()))
    {
        Entry::List(list) => Ok(list),
        _ => Err(wrong_type(key)),
    }
}

fn write_set<'a>(
    entries: &'a mut HashMap<String, Entry>,
    key: &str,
) -> Result<&'a mut HashSet<Bytes>, CommandError> {
    match entries
        .entry(key.to_string())
        .or_insert_with(|| Entry::Set(HashSet::new()))
    {
        Entry::Set(set) => Ok(set),
        _ => Err(wrong_type(key)),
    }
}

fn write_hash<'a>(
    entries: &'a mut HashMap<String, Entry>,
    key: &str,
) -> Result<&'a mut HashMap<String, Bytes>, CommandError> {
    match entries
        .entry(key.to_string())
        .or_insert_with(|| Entry::Hash(HashMap::new()))
    {
        Entry::Hash(hash) => Ok(hash),
        _ => Err(wrong_type(key)),
    }
}

fn write_zset<'a>(
    entries: &'a mut HashMap<String, Entry>,
    key: &str,
) -> Result<&'a mut HashMap<Bytes, f64>, CommandError> {
    match entries
        .entry(key.to_string())
        .or_insert_with(|| Entry::ZSet(HashMap::new()))
    {
        Entry::ZSet(zset) => Ok(zset),
        _ => Err(wrong_type(key)),
    }
}

/// Empty collections do not exist: a key whose last element was removed is
/// unset, exactly as the remote store behaves.
fn drop_if_empty(entries: &mut HashMap<String, Entry>, key: &str) {
    let empty = match entries.get(key) {
        Some(Entry::List(list)) => list.is_empty(),
        Some(Entry::Set(set)) => set.is_empty(),
        Some(Entry::Hash(hash)) => hash.is_empty(),
        Some(Entry::ZSet(zset)) => zset.is_empty(),
        _ => false,
    };
    if empty {
        entries.remove(key);
    }
}

fn parse_int(key: &str, value: &Bytes) -> Result<i64, CommandError> {
    std::str::from_utf8(value)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| response(&format!("value at '{}' is not an integer", key)))
}

/// `(member, score)` pairs ascending by `(score, member)`.
fn sorted_pairs(zset: &HashMap<Bytes, f64>) -> Vec<(Bytes, f64)> {
    let mut pairs: Vec<(Bytes, f64)> = zset.iter().map(|(m, s)| (m.clone(), *s)).collect();
    pairs.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

fn gather_sets(
    entries: &HashMap<String, Entry>,
    keys: &[&str],
) -> Result<Vec<HashSet<Bytes>>, CommandError> {
    keys.iter()
        .map(|key| Ok(read_set(entries, key)?.cloned().unwrap_or_default()))
        .collect()
}

fn store_set_result(entries: &mut HashMap<String, Entry>, dest: &str, result: HashSet<Bytes>) {
    if result.is_empty() {
        entries.remove(dest);
    } else {
        entries.insert(dest.to_string(), Entry::Set(result));
    }
}

impl MemoryStore {
    fn incr(&mut self, key: &str, delta: i64) -> Result<i64, CommandError> {
        let mut entries = self.lock();
        let current = match entries.get(key) {
            None => 0,
            Some(Entry::Str(value)) => parse_int(key, value)?,
            Some(_) => return Err(wrong_type(key)),
        };
        let next = current
            .checked_add(delta)
            .ok_or_else(|| response("increment or decrement would overflow"))?;
        entries.insert(key.to_string(), Entry::Str(next.to_string().into()));
        Ok(next)
    }

    fn blocking_pop(
        &mut self,
        key: &str,
        timeout: Option<Duration>,
        from_head: bool,
    ) -> Result<Option<Bytes>, CommandError> {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut entries = self.lock();
        loop {
            match entries.get_mut(key) {
                Some(Entry::List(list)) => {
                    let popped = if from_head {
                        list.pop_front()
                    } else {
                        list.pop_back()
                    };
                    if let Some(value) = popped {
                        drop_if_empty(&mut entries, key);
                        return Ok(Some(value));
                    }
                }
                Some(_) => return Err(wrong_type(key)),
                None => {}
            }
            entries = match deadline {
                None => self
                    .shared
                    .arrivals
                    .wait(entries)
                    .unwrap_or_else(|poisoned| poisoned.into_inner()),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        log::debug!("blocking pop on '{}' timed out", key);
                        return Ok(None);
                    }
                    self.shared
                        .arrivals
                        .wait_timeout(entries, deadline - now)
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .0
                }
            };
        }
    }
}

impl Commands for MemoryStore {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        match self.lock().get(key) {
            None => Ok(None),
            Some(Entry::Str(value)) => Ok(Some(value.clone())),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn set(&mut self, key: &str, value: Bytes) -> Result<(), CommandError> {
        self.lock().insert(key.to_string(), Entry::Str(value));
        Ok(())
    }

    fn incr_by(&mut self, key: &str, delta: i64) -> Result<i64, CommandError> {
        self.incr(key, delta)
    }

    fn decr_by(&mut self, key: &str, delta: i64) -> Result<i64, CommandError> {
        let delta = delta
            .checked_neg()
            .ok_or_else(|| response("increment or decrement would overflow"))?;
        self.incr(key, delta)
    }

    fn lpush(&mut self, key: &str, value: Bytes) -> Result<u64, CommandError> {
        let mut entries = self.lock();
        let list = write_list(&mut entries, key)?;
        list.push_front(value);
        let len = list.len() as u64;
        drop(entries);
        self.shared.arrivals.notify_all();
        Ok(len)
    }

    fn rpush(&mut self, key: &str, value: Bytes) -> Result<u64, CommandError> {
        let mut entries = self.lock();
        let list = write_list(&mut entries, key)?;
        list.push_back(value);
        let len = list.len() as u64;
        drop(entries);
        self.shared.arrivals.notify_all();
        Ok(len)
    }

    fn lindex(&mut self, key: &str, index: i64) -> Result<Option<Bytes>, CommandError> {
        let entries = self.lock();
        let Some(list) = read_list(&entries, key)? else {
            return Ok(None);
        };
        Ok(resolve_index(list.len(), index).and_then(|i| list.get(i).cloned()))
    }

    fn lset(&mut self, key: &str, index: i64, value: Bytes) -> Result<(), CommandError> {
        let mut entries = self.lock();
        if read_list(&entries, key)?.is_none() {
            return Err(response("no such key"));
        }
        let list = write_list(&mut entries, key)?;
        match resolve_index(list.len(), index) {
            Some(i) => {
                list[i] = value;
                Ok(())
            }
            None => Err(response("index out of range")),
        }
    }

    fn llen(&mut self, key: &str) -> Result<u64, CommandError> {
        let entries = self.lock();
        Ok(read_list(&entries, key)?.map_or(0, |l| l.len() as u64))
    }

    fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>, CommandError> {
        let entries = self.lock();
        let Some(list) = read_list(&entries, key)? else {
            return Ok(Vec::new());
        };
        Ok(match resolve_range(list.len(), start, stop) {
            Some((begin, end)) => list.iter().skip(begin).take(end - begin).cloned().collect(),
            None => Vec::new(),
        })
    }

    fn ltrim(&mut self, key: &str, start: i64, stop: i64) -> Result<(), CommandError> {
        let mut entries = self.lock();
        if read_list(&entries, key)?.is_none() {
            return Ok(());
        }
        let list = write_list(&mut entries, key)?;
        match resolve_range(list.len(), start, stop) {
            Some((begin, end)) => {
                list.truncate(end);
                list.drain(..begin);
            }
            None => list.clear(),
        }
        drop_if_empty(&mut entries, key);
        Ok(())
    }

    fn lrem(&mut self, key: &str, count: u64, value: &[u8]) -> Result<u64, CommandError> {
        let mut entries = self.lock();
        if read_list(&entries, key)?.is_none() {
            return Ok(0);
        }
        let list = write_list(&mut entries, key)?;
        let budget = if count == 0 { u64::MAX } else { count };
        let mut removed = 0;
        list.retain(|item| {
            if removed < budget && item.as_ref() == value {
                removed += 1;
                false
            } else {
                true
            }
        });
        drop_if_empty(&mut entries, key);
        Ok(removed)
    }

    fn lpop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        let mut entries = self.lock();
        if read_list(&entries, key)?.is_none() {
            return Ok(None);
        }
        let popped = write_list(&mut entries, key)?.pop_front();
        drop_if_empty(&mut entries, key);
        Ok(popped)
    }

    fn rpop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        let mut entries = self.lock();
        if read_list(&entries, key)?.is_none() {
            return Ok(None);
        }
        let popped = write_list(&mut entries, key)?.pop_back();
        drop_if_empty(&mut entries, key);
        Ok(popped)
    }

    fn blpop(
        &mut self,
        key: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<Bytes>, CommandError> {
        self.blocking_pop(key, timeout, true)
    }

    fn brpop(
        &mut self,
        key: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<Bytes>, CommandError> {
        self.blocking_pop(key, timeout, false)
    }

    fn sadd(&mut self, key: &str, member: Bytes) -> Result<bool, CommandError> {
        let mut entries = self.lock();
        Ok(write_set(&mut entries, key)?.insert(member))
    }

    fn srem(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError> {
        let mut entries = self.lock();
        if read_set(&entries, key)?.is_none() {
            return Ok(false);
        }
        let removed = write_set(&mut entries, key)?.remove(member);
        drop_if_empty(&mut entries, key);
        Ok(removed)
    }

    fn spop(&mut self, key: &str) -> Result<Option<Bytes>, CommandError> {
        let mut entries = self.lock();
        if read_set(&entries, key)?.is_none() {
            return Ok(None);
        }
        let set = write_set(&mut entries, key)?;
        let member = set.iter().next().cloned();
        if let Some(member) = &member {
            set.remove(member);
        }
        drop_if_empty(&mut entries, key);
        Ok(member)
    }

    fn smembers(&mut self, key: &str) -> Result<HashSet<Bytes>, CommandError> {
        let entries = self.lock();
        Ok(read_set(&entries, key)?.cloned().unwrap_or_default())
    }

    fn sismember(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError> {
        let entries = self.lock();
        Ok(read_set(&entries, key)?.is_some_and(|s| s.contains(member)))
    }

    fn scard(&mut self, key: &str) -> Result<u64, CommandError> {
        let entries = self.lock();
        Ok(read_set(&entries, key)?.map_or(0, |s| s.len() as u64))
    }

    fn sunion(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError> {
        let entries = self.lock();
        let mut result = HashSet::new();
        for set in gather_sets(&entries, keys)? {
            result.extend(set);
        }
        Ok(result)
    }

    fn sunionstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError> {
        let mut entries = self.lock();
        let mut result = HashSet::new();
        for set in gather_sets(&entries, keys)? {
            result.extend(set);
        }
        let cardinality = result.len() as u64;
        store_set_result(&mut entries, dest, result);
        Ok(cardinality)
    }

    fn sinter(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError> {
        let entries = self.lock();
        let mut sets = gather_sets(&entries, keys)?.into_iter();
        let mut result = sets.next().unwrap_or_default();
        for set in sets {
            result.retain(|m| set.contains(m));
        }
        Ok(result)
    }

    fn sinterstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError> {
        let mut entries = self.lock();
        let mut sets = gather_sets(&entries, keys)?.into_iter();
        let mut result = sets.next().unwrap_or_default();
        for set in sets {
            result.retain(|m| set.contains(m));
        }
        let cardinality = result.len() as u64;
        store_set_result(&mut entries, dest, result);
        Ok(cardinality)
    }

    fn sdiff(&mut self, keys: &[&str]) -> Result<HashSet<Bytes>, CommandError> {
        let entries = self.lock();
        let mut sets = gather_sets(&entries, keys)?.into_iter();
        let mut result = sets.next().unwrap_or_default();
        for set in sets {
            result.retain(|m| !set.contains(m));
        }
        Ok(result)
    }

    fn sdiffstore(&mut self, dest: &str, keys: &[&str]) -> Result<u64, CommandError> {
        let mut entries = self.lock();
        let mut sets = gather_sets(&entries, keys)?.into_iter();
        let mut result = sets.next().unwrap_or_default();
        for set in sets {
            result.retain(|m| !set.contains(m));
        }
        let cardinality = result.len() as u64;
        store_set_result(&mut entries, dest, result);
        Ok(cardinality)
    }

    fn hget(&mut self, key: &str, field: &str) -> Result<Option<Bytes>, CommandError> {
        let entries = self.lock();
        Ok(read_hash(&entries, key)?.and_then(|h| h.get(field).cloned()))
    }

    fn hset(&mut self, key: &str, field: &str, value: Bytes) -> Result<bool, CommandError> {
        let mut entries = self.lock();
        Ok(write_hash(&mut entries, key)?
            .insert(field.to_string(), value)
            .is_none())
    }

    fn hdel(&mut self, key: &str, field: &str) -> Result<bool, CommandError> {
        let mut entries = self.lock();
        if read_hash(&entries, key)?.is_none() {
            return Ok(false);
        }
        let removed = write_hash(&mut entries, key)?.remove(field).is_some();
        drop_if_empty(&mut entries, key);
        Ok(removed)
    }

    fn hexists(&mut self, key: &str, field: &str) -> Result<bool, CommandError> {
        let entries = self.lock();
        Ok(read_hash(&entries, key)?.is_some_and(|h| h.contains_key(field)))
    }

    fn hlen(&mut self, key: &str) -> Result<u64, CommandError> {
        let entries = self.lock();
        Ok(read_hash(&entries, key)?.map_or(0, |h| h.len() as u64))
    }

    fn hkeys(&mut self, key: &str) -> Result<Vec<String>, CommandError> {
        let entries = self.lock();
        Ok(read_hash(&entries, key)?.map_or_else(Vec::new, |h| h.keys().cloned().collect()))
    }

    fn hvals(&mut self, key: &str) -> Result<Vec<Bytes>, CommandError> {
        let entries = self.lock();
        Ok(read_hash(&entries, key)?.map_or_else(Vec::new, |h| h.values().cloned().collect()))
    }

    fn hgetall(&mut self, key: &str) -> Result<HashMap<String, Bytes>, CommandError> {
        let entries = self.lock();
        Ok(read_hash(&entries, key)?.cloned().unwrap_or_default())
    }

    fn hmset(&mut self, key: &str, fields: &[(String, Bytes)]) -> Result<(), CommandError> {
        let mut entries = self.lock();
        let hash = write_hash(&mut entries, key)?;
        for (field, value) in fields {
            hash.insert(field.clone(), value.clone());
        }
        drop_if_empty(&mut entries, key);
        Ok(())
    }

    fn zadd(&mut self, key: &str, member: Bytes, score: f64) -> Result<bool, CommandError> {
        let mut entries = self.lock();
        Ok(write_zset(&mut entries, key)?.insert(member, score).is_none())
    }

    fn zadd_many(&mut self, key: &str, pairs: &[(Bytes, f64)]) -> Result<u64, CommandError> {
        let mut entries = self.lock();
        let zset = write_zset(&mut entries, key)?;
        let mut added = 0;
        for (member, score) in pairs {
            if zset.insert(member.clone(), *score).is_none() {
                added += 1;
            }
        }
        drop_if_empty(&mut entries, key);
        Ok(added)
    }

    fn zrem(&mut self, key: &str, member: &[u8]) -> Result<bool, CommandError> {
        let mut entries = self.lock();
        if read_zset(&entries, key)?.is_none() {
            return Ok(false);
        }
        let removed = write_zset(&mut entries, key)?.remove(member).is_some();
        drop_if_empty(&mut entries, key);
        Ok(removed)
    }

    fn zrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError> {
        let entries = self.lock();
        let Some(zset) = read_zset(&entries, key)? else {
            return Ok(Vec::new());
        };
        let pairs = sorted_pairs(zset);
        Ok(match resolve_range(pairs.len(), start, stop) {
            Some((begin, end)) => pairs[begin..end].to_vec(),
            None => Vec::new(),
        })
    }

    fn zrevrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError> {
        let entries = self.lock();
        let Some(zset) = read_zset(&entries, key)? else {
            return Ok(Vec::new());
        };
        let mut pairs = sorted_pairs(zset);
        pairs.reverse();
        Ok(match resolve_range(pairs.len(), start, stop) {
            Some((begin, end)) => pairs[begin..end].to_vec(),
            None => Vec::new(),
        })
    }

    fn zrangebyscore(
        &mut self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<Vec<(Bytes, f64)>, CommandError> {
        let entries = self.lock();
        let Some(zset) = read_zset(&entries, key)? else {
            return Ok(Vec::new());
        };
        Ok(sorted_pairs(zset)
            .into_iter()
            .filter(|(_, score)| *score >= min && *score <= max)
            .collect())
    }

    fn zscore(&mut self, key: &str, member: &[u8]) -> Result<Option<f64>, CommandError> {
        let entries = self.lock();
        Ok(read_zset(&entries, key)?.and_then(|z| z.get(member).copied()))
    }

    fn zrank(&mut self, key: &str, member: &[u8]) -> Result<Option<u64>, CommandError> {
        let entries = self.lock();
        let Some(zset) = read_zset(&entries, key)? else {
            return Ok(None);
        };
        Ok(sorted_pairs(zset)
            .iter()
            .position(|(m, _)| m.as_ref() == member)
            .map(|i| i as u64))
    }

    fn zrevrank(&mut self, key: &str, member: &[u8]) -> Result<Option<u64>, CommandError> {
        let entries = self.lock();
        let Some(zset) = read_zset(&entries, key)? else {
            return Ok(None);
        };
        let pairs = sorted_pairs(zset);
        Ok(pairs
            .iter()
            .position(|(m, _)| m.as_ref() == member)
            .map(|i| (pairs.len() - i - 1) as u64))
    }

    fn zincrby(&mut self, key: &str, member: Bytes, delta: f64) -> Result<f64, CommandError> {
        let mut entries = self.lock();
        let zset = write_zset(&mut entries, key)?;
        let score = zset.entry(member).or_insert(0.0);
        *score += delta;
        Ok(*score)
    }

    fn zcard(&mut self, key: &str) -> Result<u64, CommandError> {
        let entries = self.lock();
        Ok(read_zset(&entries, key)?.map_or(0, |z| z.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    #[test]
    fn strings_and_counters() {
        let mut store = MemoryStore::new();
        store.set("greeting", b("hello")).unwrap();
        assert_eq!(store.get("greeting").unwrap(), Some(b("hello")));
        assert_eq!(store.get("missing").unwrap(), None);

        assert_eq!(store.incr_by("hits", 1).unwrap(), 1);
        assert_eq!(store.incr_by("hits", 5).unwrap(), 6);
        assert_eq!(store.decr_by("hits", 2).unwrap(), 4);
    }

    #[test]
    fn incr_rejects_non_integers() {
        let mut store = MemoryStore::new();
        store.set("greeting", b("hello")).unwrap();
        assert!(matches!(
            store.incr_by("greeting", 1),
            Err(CommandError::Response { .. })
        ));
    }

    #[test]
    fn incr_rejects_overflow() {
        let mut store = MemoryStore::new();
        store.set("hits", b(&i64::MAX.to_string())).unwrap();
        assert!(matches!(
            store.incr_by("hits", 1),
            Err(CommandError::Response { .. })
        ));
        // value survives the failed increment
        assert_eq!(store.incr_by("hits", 0).unwrap(), i64::MAX);

        store.set("floor", b(&i64::MIN.to_string())).unwrap();
        assert!(matches!(
            store.decr_by("floor", 1),
            Err(CommandError::Response { .. })
        ));
        assert!(matches!(
            store.decr_by("hits", i64::MIN),
            Err(CommandError::Response { .. })
        ));
    }

    #[test]
    fn list_push_pop_both_ends() {
        let mut store = MemoryStore::new();
        store.rpush("l", b("b")).unwrap();
        store.rpush("l", b("c")).unwrap();
        assert_eq!(store.lpush("l", b("a")).unwrap(), 3);

        assert_eq!(store.lindex("l", 0).unwrap(), Some(b("a")));
        assert_eq!(store.lindex("l", -1).unwrap(), Some(b("c")));
        assert_eq!(store.lindex("l", 5).unwrap(), None);

        assert_eq!(store.lpop("l").unwrap(), Some(b("a")));
        assert_eq!(store.rpop("l").unwrap(), Some(b("c")));
        assert_eq!(store.rpop("l").unwrap(), Some(b("b")));
        assert_eq!(store.rpop("l").unwrap(), None);
        // key is unset once emptied
        assert_eq!(store.key_count(), 0);
    }

    #[test]
    fn lrange_and_ltrim_are_inclusive() {
        let mut store = MemoryStore::new();
        for item in ["a", "b", "c", "d"] {
            store.rpush("l", b(item)).unwrap();
        }
        assert_eq!(store.lrange("l", 0, -1).unwrap().len(), 4);
        assert_eq!(store.lrange("l", 1, 2).unwrap(), vec![b("b"), b("c")]);
        assert_eq!(store.lrange("l", 4, 9).unwrap(), Vec::<Bytes>::new());

        store.ltrim("l", 1, 2).unwrap();
        assert_eq!(store.lrange("l", 0, -1).unwrap(), vec![b("b"), b("c")]);
    }

    #[test]
    fn lset_reports_conditions() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.lset("l", 0, b("x")),
            Err(CommandError::Response { message }) if message.contains("no such key")
        ));
        store.rpush("l", b("a")).unwrap();
        store.lset("l", 0, b("x")).unwrap();
        assert_eq!(store.lindex("l", 0).unwrap(), Some(b("x")));
        assert!(matches!(
            store.lset("l", 3, b("y")),
            Err(CommandError::Response { message }) if message.contains("index out of range")
        ));
    }

    #[test]
    fn lrem_counts() {
        let mut store = MemoryStore::new();
        for item in ["a", "b", "a", "a"] {
            store.rpush("l", b(item)).unwrap();
        }
        assert_eq!(store.lrem("l", 2, b"a".as_ref()).unwrap(), 2);
        assert_eq!(store.lrange("l", 0, -1).unwrap(), vec![b("b"), b("a")]);
        assert_eq!(store.lrem("l", 0, b"a".as_ref()).unwrap(), 1);
        assert_eq!(store.lrem("l", 1, b"z".as_ref()).unwrap(), 0);
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let mut store = MemoryStore::new();
        store.rpush("l", b("a")).unwrap();
        assert!(matches!(store.get("l"), Err(CommandError::WrongType { .. })));
        assert!(matches!(
            store.sadd("l", b("a")),
            Err(CommandError::WrongType { .. })
        ));
    }

    #[test]
    fn set_commands() {
        let mut store = MemoryStore::new();
        assert!(store.sadd("s", b("x")).unwrap());
        assert!(!store.sadd("s", b("x")).unwrap());
        assert!(store.sismember("s", b"x".as_ref()).unwrap());
        assert_eq!(store.scard("s").unwrap(), 1);
        assert!(store.srem("s", b"x".as_ref()).unwrap());
        assert!(!store.srem("s", b"x".as_ref()).unwrap());
        assert_eq!(store.spop("s").unwrap(), None);
    }

    #[test]
    fn set_algebra() {
        let mut store = MemoryStore::new();
        for m in ["a", "b", "c"] {
            store.sadd("s1", b(m)).unwrap();
        }
        for m in ["b", "c", "d"] {
            store.sadd("s2", b(m)).unwrap();
        }
        assert_eq!(store.sunion(&["s1", "s2"]).unwrap().len(), 4);
        assert_eq!(store.sinter(&["s1", "s2"]).unwrap().len(), 2);
        let diff = store.sdiff(&["s1", "s2"]).unwrap();
        assert_eq!(diff, HashSet::from([b("a")]));

        assert_eq!(store.sinterstore("dest", &["s1", "s2"]).unwrap(), 2);
        assert_eq!(store.smembers("dest").unwrap().len(), 2);
        // storing an empty result unsets the destination
        assert_eq!(store.sdiffstore("dest", &["s1", "s1"]).unwrap(), 0);
        assert_eq!(store.scard("dest").unwrap(), 0);
    }

    #[test]
    fn hash_commands() {
        let mut store = MemoryStore::new();
        assert!(store.hset("h", "name", b("alice")).unwrap());
        assert!(!store.hset("h", "name", b("bob")).unwrap());
        assert_eq!(store.hget("h", "name").unwrap(), Some(b("bob")));
        assert!(store.hexists("h", "name").unwrap());
        assert_eq!(store.hlen("h").unwrap(), 1);

        store.hmset(
            "h",
            &[
                ("a".to_string(), b("1")),
                ("b".to_string(), b("2")),
            ],
        )
        .unwrap();
        assert_eq!(store.hlen("h").unwrap(), 3);
        assert_eq!(store.hkeys("h").unwrap().len(), 3);
        assert_eq!(store.hvals("h").unwrap().len(), 3);
        assert_eq!(store.hgetall("h").unwrap().len(), 3);

        assert!(store.hdel("h", "name").unwrap());
        assert!(!store.hdel("h", "name").unwrap());
    }

    #[test]
    fn zset_ordering_is_score_then_member() {
        let mut store = MemoryStore::new();
        store.zadd("z", b("banana"), 2.0).unwrap();
        store.zadd("z", b("apple"), 2.0).unwrap();
        store.zadd("z", b("cherry"), 1.0).unwrap();

        let members: Vec<Bytes> = store
            .zrange("z", 0, -1)
            .unwrap()
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(members, vec![b("cherry"), b("apple"), b("banana")]);

        assert_eq!(store.zrank("z", b"apple".as_ref()).unwrap(), Some(1));
        assert_eq!(store.zrevrank("z", b"apple".as_ref()).unwrap(), Some(1));
        assert_eq!(store.zscore("z", b"cherry".as_ref()).unwrap(), Some(1.0));
        assert_eq!(store.zscore("z", b"mango".as_ref()).unwrap(), None);
    }

    #[test]
    fn zset_score_ranges() {
        let mut store = MemoryStore::new();
        for (m, s) in [("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)] {
            store.zadd("z", b(m), s).unwrap();
        }
        let hits: Vec<Bytes> = store
            .zrangebyscore("z", 2.0, 3.0)
            .unwrap()
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(hits, vec![b("b"), b("c")]);

        assert_eq!(store.zincrby("z", b("a"), 10.0).unwrap(), 11.0);
        assert_eq!(store.zrank("z", b"a".as_ref()).unwrap(), Some(3));
    }

    #[test]
    fn zrevrange_reverses() {
        let mut store = MemoryStore::new();
        for (m, s) in [("a", 1.0), ("b", 2.0), ("c", 3.0)] {
            store.zadd("z", b(m), s).unwrap();
        }
        let members: Vec<Bytes> = store
            .zrevrange("z", 0, 1)
            .unwrap()
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(members, vec![b("c"), b("b")]);
    }

    #[test]
    fn blocking_pop_times_out() {
        let mut store = MemoryStore::new();
        let started = Instant::now();
        let result = store
            .brpop("empty", Some(Duration::from_millis(50)))
            .unwrap();
        assert_eq!(result, None);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn blocking_pop_wakes_on_push() {
        let store = MemoryStore::new();
        let mut producer = store.clone();
        let mut consumer = store.clone();

        let handle = std::thread::spawn(move || {
            consumer.brpop("q", Some(Duration::from_secs(5))).unwrap()
        });
        std::thread::sleep(Duration::from_millis(20));
        producer.lpush("q", b("job")).unwrap();

        assert_eq!(handle.join().unwrap(), Some(b("job")));
    }

    #[test]
    fn clones_share_one_keyspace() {
        let store = MemoryStore::new();
        let mut a = store.clone();
        let mut b2 = store.clone();
        a.set("k", b("v")).unwrap();
        assert_eq!(b2.get("k").unwrap(), Some(b("v")));
    }
}
