//! # Pipewell
//!
//! Point-free composition helpers for `Option`, `Result` and futures of
//! `Result`.
//!
//! The heart of the crate is the **chain builder**: start from an empty
//! [`Record`], add one named field per step, and let the first failure stop the
//! chain. The same four operations (`start`, `bind`, `tap`, `bind_to`) work for
//! every flavor:
//!
//! - **Optional**: absence short-circuits ([`option`]).
//! - **Result**: the first error short-circuits ([`result`]).
//! - **Deferred result**: any `Future<Output = Result<_, _>>` ([`task`]), with
//!   [`Fields`] and [`task::sequence_array`] for concurrent resolution.
//!
//! Around it sit small curried helpers for vectors ([`array`]), booleans
//! ([`boolean`]) and predicates ([`predicate`]), meant to be fed through
//! [`Pipe::pipe`].
//!
//! ## Quick Example
//!
//! ```rust
//! use pipewell::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! enum SignupError {
//!     Empty(&'static str),
//!     TooYoung(u8),
//! }
//!
//! fn non_empty(field: &'static str, value: &str) -> Result<String, SignupError> {
//!     if value.is_empty() {
//!         Err(SignupError::Empty(field))
//!     } else {
//!         Ok(value.to_string())
//!     }
//! }
//!
//! let signup = pipewell::result::start()
//!     .bind("name", |_| non_empty("name", "ada"))
//!     .bind("age", |_| Ok(36_u8))
//!     .tap(|r| match r.get::<u8>("age") {
//!         Some(age) if *age < 18 => Err(SignupError::TooYoung(*age)),
//!         _ => Ok(()),
//!     });
//!
//! let record = signup.unwrap();
//! assert_eq!(record.get::<String>("name").unwrap(), "ada");
//!
//! let rejected = pipewell::result::start()
//!     .bind("name", |_| non_empty("name", ""))
//!     .bind("age", |_| Ok(36_u8));
//! assert_eq!(rejected.unwrap_err(), SignupError::Empty("name"));
//! ```
//!
//! ## Features
//!
//! - `tracing`: debug/trace events for overwritten fields and skipped steps.
//! - `serde`: `Serialize`/`Deserialize` for [`array::Partition`].
//! - `proptest`: record strategies in [`testing`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod array;
pub mod boolean;
pub mod chain;
pub mod fields;
pub mod option;
pub mod pipe;
pub mod predicate;
pub mod record;
pub mod result;
pub mod task;
pub mod testing;

// Re-exports
pub use chain::{Chain, ChainExt};
pub use fields::Fields;
pub use pipe::Pipe;
pub use predicate::{Predicate, PredicateExt};
pub use record::{FieldName, Record, RecordError};
pub use task::{RecordTaskExt, TaskExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chain::{Chain, ChainExt};
    pub use crate::fields::Fields;
    pub use crate::pipe::Pipe;
    pub use crate::predicate::{Predicate, PredicateExt};
    pub use crate::record::{Record, RecordError};
    pub use crate::task::{RecordTaskExt, TaskExt};
}
