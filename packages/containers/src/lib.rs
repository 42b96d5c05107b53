//! keyspace containers: native container semantics over a remote store.
//!
//! Each adapter wraps one full store key and a client handle, and speaks
//! the language of the matching in-process container:
//! - `List`: index access, slicing, pushes and pops at both ends
//! - `Set`: membership plus remote/local union, intersection, difference
//! - `SortedSet` / `LocalSortedSet`: score-ordered members behind the
//!   shared `ScoredSet` surface, with `LocalSortedSet` as the in-memory
//!   reference
//! - `Map`: field/value access with defaults and an optional missing-key
//!   hook
//! - `Queue`: FIFO/LIFO with blocking-with-timeout pops
//! - `Counter`: an atomic remote integer
//!
//! Every operation is one or more primitive commands through a
//! [`Commands`] client; recognized store conditions are translated into
//! the [`Error`] taxonomy and everything else propagates verbatim. Only
//! the operations documented as single commands are atomic - `extend`,
//! the queue's advisory `is_full`/`is_empty`, and other composites can
//! interleave with concurrent writers, by contract.
//!
//! # Example
//!
//! ```rust
//! use keyspace_containers::Namespace;
//! use keyspace_memory::MemoryStore;
//! use bytes::Bytes;
//!
//! let ns = Namespace::with_prefix("demo");
//! let store = MemoryStore::new();
//!
//! let mut queue = ns.queue("jobs", store.clone(), 0);
//! queue.put(Bytes::from_static(b"build")).unwrap();
//! assert_eq!(queue.get_nowait().unwrap(), Bytes::from_static(b"build"));
//! ```

pub use bytes::Bytes;

mod counter;
mod error;
mod key;
mod list;
mod local;
mod map;
mod namespace;
mod queue;
mod scored;
mod set;
mod zset;

pub use counter::Counter;
pub use error::Error;
pub use key::{KeyNamer, DELIMITER};
pub use list::List;
pub use local::LocalSortedSet;
pub use map::{Map, OnMissing};
pub use namespace::Namespace;
pub use queue::Queue;
pub use scored::{ItemsView, ScoredSet};
pub use set::{Operand, Set};
pub use zset::SortedSet;

// Re-export the command boundary for convenience
pub use keyspace_command::{CommandError, Commands};
