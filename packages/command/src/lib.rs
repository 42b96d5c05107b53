//! keyspace command layer: the store client boundary.
//!
//! This crate defines what a connection to the remote store can do,
//! without saying anything about how the wire works:
//! - `Commands`: the primitive command set, one method per command
//! - `CommandError`: transport failures and server rejections
//! - `resolve_index` / `resolve_range`: the store's index semantics
//!
//! Everything above this layer (containers, queues, namespacing) talks to
//! the store exclusively through [`Commands`]. Everything below it
//! (sockets, pooling, auth) is someone else's problem.
//!
//! # Example
//!
//! ```rust
//! use keyspace_command::{Commands, CommandError};
//!
//! fn enqueue(client: &mut dyn Commands, job: &[u8]) -> Result<u64, CommandError> {
//!     client.lpush("jobs", bytes::Bytes::copy_from_slice(job))
//! }
//! ```

pub use bytes::Bytes;

mod commands;
mod error;
mod range;

pub use commands::Commands;
pub use error::CommandError;
pub use range::{resolve_index, resolve_range};
