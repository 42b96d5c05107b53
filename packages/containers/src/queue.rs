//! Blocking FIFO/LIFO queues over a list.

use std::time::Duration;

use bytes::Bytes;
use keyspace_command::Commands;

use crate::{Error, List};

/// Which end of the list supplies the pop.
///
/// Both disciplines push onto the head; they differ only in which end the
/// (blocking) pop drains. FIFO pops the tail, LIFO pops the head.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Discipline {
    Fifo,
    Lifo,
}

/// A queue over a remote-backed list, with blocking-with-timeout pops.
///
/// `maxsize` of 0 means unbounded. The capacity and emptiness checks are
/// advisory: they read the current length and act on it without any
/// atomicity against concurrent producers or consumers, so `put` can
/// still race past a `full()` that just returned false. Callers needing
/// strict bounds must coordinate outside this layer.
///
/// # Example
///
/// ```rust
/// use keyspace_containers::Queue;
/// use keyspace_memory::MemoryStore;
/// use bytes::Bytes;
///
/// let mut queue = Queue::fifo("jobs", MemoryStore::new(), 0);
/// queue.put(Bytes::from_static(b"first")).unwrap();
/// queue.put(Bytes::from_static(b"second")).unwrap();
/// assert_eq!(queue.get_nowait().unwrap(), Bytes::from_static(b"first"));
/// ```
pub struct Queue<C> {
    list: List<C>,
    maxsize: u64,
    discipline: Discipline,
}

impl<C: Commands> Queue<C> {
    /// A first-in-first-out queue over the list at `key`.
    pub fn fifo(key: impl Into<String>, client: C, maxsize: u64) -> Self {
        Self {
            list: List::new(key, client),
            maxsize,
            discipline: Discipline::Fifo,
        }
    }

    /// A last-in-first-out queue over the list at `key`.
    pub fn lifo(key: impl Into<String>, client: C, maxsize: u64) -> Self {
        Self {
            list: List::new(key, client),
            maxsize,
            discipline: Discipline::Lifo,
        }
    }

    /// Like [`fifo`](Queue::fifo), seeding the underlying list with
    /// `initial` (appended at the tail, one push per element, the
    /// capacity check not applied).
    pub fn fifo_with_initial(
        key: impl Into<String>,
        client: C,
        initial: impl IntoIterator<Item = Bytes>,
        maxsize: u64,
    ) -> Result<Self, Error> {
        let mut queue = Self::fifo(key, client, maxsize);
        queue.list.extend(initial)?;
        Ok(queue)
    }

    /// Like [`lifo`](Queue::lifo), seeding the underlying list.
    pub fn lifo_with_initial(
        key: impl Into<String>,
        client: C,
        initial: impl IntoIterator<Item = Bytes>,
        maxsize: u64,
    ) -> Result<Self, Error> {
        let mut queue = Self::lifo(key, client, maxsize);
        queue.list.extend(initial)?;
        Ok(queue)
    }

    /// The full store key this queue addresses.
    pub fn key(&self) -> &str {
        self.list.key()
    }

    /// Advisory: the queue currently has no elements. Not reliable under
    /// concurrent mutation.
    pub fn is_empty(&mut self) -> Result<bool, Error> {
        Ok(self.qsize()? == 0)
    }

    /// Advisory: the queue currently holds `maxsize` or more elements.
    /// Always false when unbounded. Not reliable under concurrent
    /// mutation.
    pub fn is_full(&mut self) -> Result<bool, Error> {
        Ok(self.maxsize != 0 && self.qsize()? >= self.maxsize)
    }

    /// Add an item.
    ///
    /// Fails with [`Error::QueueFull`] if the advisory capacity check
    /// reports full right now; a consumer may already have made room by
    /// the time the push would land, and no retry happens.
    pub fn put(&mut self, item: Bytes) -> Result<(), Error> {
        if self.is_full()? {
            return Err(Error::QueueFull);
        }
        self.list.append_left(item)?;
        Ok(())
    }

    /// Remove and return an item, waiting indefinitely for one to arrive.
    pub fn get(&mut self) -> Result<Bytes, Error> {
        self.blocking_pop(None)?.ok_or(Error::QueueEmpty)
    }

    /// Remove and return an item, waiting at most `timeout`.
    ///
    /// Fails with [`Error::QueueEmpty`] once the wait expires. This is a
    /// single wait on the store's blocking pop, not a retry loop.
    pub fn get_timeout(&mut self, timeout: Duration) -> Result<Bytes, Error> {
        match self.blocking_pop(Some(timeout))? {
            Some(item) => Ok(item),
            None => {
                log::debug!("queue '{}' stayed empty for {:?}", self.key(), timeout);
                Err(Error::QueueEmpty)
            }
        }
    }

    /// Remove and return an item without waiting; fails with
    /// [`Error::QueueEmpty`] if none is immediately available.
    pub fn get_nowait(&mut self) -> Result<Bytes, Error> {
        let item = match self.discipline {
            Discipline::Fifo => self.list.pop()?,
            Discipline::Lifo => self.list.pop_left()?,
        };
        item.ok_or(Error::QueueEmpty)
    }

    /// Current element count. Advisory, like the checks built on it.
    pub fn qsize(&mut self) -> Result<u64, Error> {
        self.list.len()
    }

    fn blocking_pop(&mut self, timeout: Option<Duration>) -> Result<Option<Bytes>, Error> {
        match self.discipline {
            Discipline::Fifo => self.list.pop_blocking(timeout),
            Discipline::Lifo => self.list.pop_left_blocking(timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyspace_memory::MemoryStore;

    fn b(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    #[test]
    fn fifo_orders_first_in_first_out() {
        let mut queue = Queue::fifo("q", MemoryStore::new(), 0);
        for item in ["1", "2", "3"] {
            queue.put(b(item)).unwrap();
        }
        assert_eq!(queue.get_nowait().unwrap(), b("1"));
        assert_eq!(queue.get_nowait().unwrap(), b("2"));
        assert_eq!(queue.get_nowait().unwrap(), b("3"));
    }

    #[test]
    fn lifo_orders_last_in_first_out() {
        let mut queue = Queue::lifo("q", MemoryStore::new(), 0);
        for item in ["1", "2", "3"] {
            queue.put(b(item)).unwrap();
        }
        assert_eq!(queue.get_nowait().unwrap(), b("3"));
        assert_eq!(queue.get_nowait().unwrap(), b("2"));
        assert_eq!(queue.get_nowait().unwrap(), b("1"));
    }

    #[test]
    fn get_nowait_on_empty_queue() {
        let mut queue = Queue::fifo("q", MemoryStore::new(), 0);
        assert!(matches!(queue.get_nowait(), Err(Error::QueueEmpty)));
    }

    #[test]
    fn capacity_is_advisory_but_enforced_at_put() {
        let mut queue = Queue::fifo("q", MemoryStore::new(), 2);
        assert!(!queue.is_full().unwrap());
        queue.put(b("a")).unwrap();
        assert!(!queue.is_full().unwrap());
        queue.put(b("b")).unwrap();
        assert!(queue.is_full().unwrap());
        assert!(matches!(queue.put(b("c")), Err(Error::QueueFull)));
        assert_eq!(queue.qsize().unwrap(), 2);
    }

    #[test]
    fn unbounded_queue_is_never_full() {
        let mut queue = Queue::fifo("q", MemoryStore::new(), 0);
        for i in 0..100 {
            queue.put(b(&i.to_string())).unwrap();
        }
        assert!(!queue.is_full().unwrap());
    }

    #[test]
    fn timed_get_expires_close_to_the_timeout() {
        use std::time::Instant;

        let mut queue = Queue::fifo("q", MemoryStore::new(), 0);
        let started = Instant::now();
        let result = queue.get_timeout(Duration::from_millis(80));
        let elapsed = started.elapsed();

        assert!(matches!(result, Err(Error::QueueEmpty)));
        assert!(elapsed >= Duration::from_millis(80));
        assert!(elapsed < Duration::from_secs(2));
    }

    #[test]
    fn blocked_get_wakes_when_a_producer_puts() {
        let store = MemoryStore::new();
        let mut consumer = Queue::fifo("q", store.clone(), 0);
        let mut producer = Queue::fifo("q", store, 0);

        let handle = std::thread::spawn(move || {
            consumer.get_timeout(Duration::from_secs(5)).unwrap()
        });
        std::thread::sleep(Duration::from_millis(20));
        producer.put(b("wake")).unwrap();

        assert_eq!(handle.join().unwrap(), b("wake"));
    }

    #[test]
    fn seeding_bypasses_the_capacity_check() {
        let mut queue = Queue::fifo_with_initial(
            "q",
            MemoryStore::new(),
            [b("a"), b("b"), b("c")],
            2,
        )
        .unwrap();
        assert_eq!(queue.qsize().unwrap(), 3);
        assert!(queue.is_full().unwrap());
    }
}
