//! Testing utilities for code built on pipewell.
//!
//! This module provides assertion macros for records, a call counter for
//! checking which steps of a chain actually ran, and property-based testing
//! support.
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use pipewell::{assert_field, assert_fields, record};
//!
//! let user = record! { "id" => 7_u32, "name" => "ada" };
//! assert_field!(user, "id", 7_u32);
//! assert_fields!(user, ["id", "name"]);
//! ```
//!
//! ## Counting calls
//!
//! ```rust
//! use pipewell::prelude::*;
//! use pipewell::testing::CallCounter;
//!
//! let counter = CallCounter::new();
//! let seen = counter.clone();
//!
//! let result = None::<Record>.bind("a", move |_| {
//!     seen.hit();
//!     Some(1)
//! });
//!
//! assert!(result.is_none());
//! assert_eq!(counter.count(), 0);
//! ```

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::record::{Record, RecordError};

/// Shared counter of how often a step was invoked.
///
/// Clones share the same count, so a clone can be moved into a closure while
/// the original stays with the test.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call.
    pub fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of calls recorded so far, across all clones.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Assert that a record holds `expected` under `name`.
///
/// This macro will panic if the field is missing, holds another type, or
/// holds a different value.
///
/// # Example
///
/// ```rust
/// use pipewell::{assert_field, Record};
///
/// let record = Record::new().with("total", 12_i64);
/// assert_field!(record, "total", 12_i64);
/// ```
#[macro_export]
macro_rules! assert_field {
    ($record:expr, $name:expr, $expected:expr) => {{
        let expected = $expected;
        match $crate::testing::field_like(&$record, $name, &expected) {
            Ok(actual) => {
                assert_eq!(*actual, expected, "field `{}` has an unexpected value", $name);
            }
            Err(error) => {
                panic!("Expected field, got error: {}", error);
            }
        }
    }};
}

/// Assert that a record has exactly the given field names, in order.
///
/// # Example
///
/// ```rust
/// use pipewell::{assert_fields, record};
///
/// let record = record! { "a" => 1, "b" => 2 };
/// assert_fields!(record, ["a", "b"]);
/// ```
#[macro_export]
macro_rules! assert_fields {
    ($record:expr, [$($name:expr),* $(,)?]) => {{
        let expected: ::std::vec::Vec<&str> = ::std::vec![$($name),*];
        let actual: ::std::vec::Vec<&str> = $record.names().collect();
        assert_eq!(actual, expected, "record fields differ");
    }};
}

#[doc(hidden)]
pub fn field_like<'r, T: Any>(
    record: &'r Record,
    name: &str,
    _like: &T,
) -> Result<&'r T, RecordError> {
    record.try_get(name)
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// Strategy for records of up to `max_fields` `i64` fields with short
/// lowercase names.
///
/// Generated names may repeat, which exercises overwriting.
#[cfg(feature = "proptest")]
pub fn arb_record(max_fields: usize) -> impl Strategy<Value = Record> {
    proptest::collection::vec(("[a-e]", any::<i64>()), 0..=max_fields).prop_map(|pairs| {
        pairs
            .into_iter()
            .fold(Record::new(), |record, (name, value)| record.with(name, value))
    })
}
