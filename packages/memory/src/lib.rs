//! In-memory keyspace store.
//!
//! A complete, thread-safe implementation of the primitive command set
//! with no server behind it. It exists for the same reasons an in-memory
//! store usually does: unit tests, examples, and local development where
//! spinning up the real store is not worth it.
//!
//! Clones of a [`MemoryStore`] share one keyspace, which makes the
//! blocking list pops (`blpop`/`brpop`) genuinely blocking: a consumer
//! thread parks on a condition variable until a producer thread pushes.
//!
//! # Example
//!
//! ```rust
//! use keyspace_memory::MemoryStore;
//! use keyspace_command::Commands;
//! use bytes::Bytes;
//!
//! let store = MemoryStore::new();
//! let mut producer = store.clone();
//! let mut consumer = store.clone();
//!
//! producer.rpush("jobs", Bytes::from_static(b"deploy")).unwrap();
//! assert_eq!(consumer.llen("jobs").unwrap(), 1);
//! ```

mod store;

pub use store::MemoryStore;
