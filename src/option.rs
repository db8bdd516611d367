//! Point-free helpers for `Option`.
//!
//! Each helper takes its configuration first and returns a function expecting
//! the `Option` last, for use with [`Pipe::pipe`](crate::pipe::Pipe::pipe).
//!
//! ```rust
//! use pipewell::prelude::*;
//! use pipewell::option;
//!
//! let label = Some(3)
//!     .pipe(option::map(|n| n * 2))
//!     .pipe(option::fold(|| "none".to_string(), |n| format!("got {}", n)));
//!
//! assert_eq!(label, "got 6");
//! ```

use std::any::Any;

use crate::chain::ChainExt;
use crate::predicate::Predicate;
use crate::record::{FieldName, Record};

/// The `Do` starting point: a present, empty record.
pub fn start() -> Option<Record> {
    Some(Record::new())
}

/// Add field `name` to a present record; see [`ChainExt::bind`].
///
/// # Example
///
/// ```rust
/// use pipewell::prelude::*;
/// use pipewell::option;
///
/// let user = option::start()
///     .pipe(option::bind("id", |_| Some(1_u32)))
///     .pipe(option::bind("name", |_| Some("ada")));
///
/// assert_eq!(user.unwrap().len(), 2);
/// ```
pub fn bind<K, V, F>(name: K, f: F) -> impl FnOnce(Option<Record>) -> Option<Record>
where
    K: Into<FieldName>,
    V: Any + Send + Sync,
    F: FnOnce(&Record) -> Option<V>,
{
    move |option| option.bind(name, f)
}

/// Transform a present value.
pub fn map<A, B, F>(f: F) -> impl FnOnce(Option<A>) -> Option<B>
where
    F: FnOnce(A) -> B,
{
    move |option| option.map(f)
}

/// Chain to another `Option` computed from a present value.
pub fn flat_map<A, B, F>(f: F) -> impl FnOnce(Option<A>) -> Option<B>
where
    F: FnOnce(A) -> Option<B>,
{
    move |option| option.and_then(f)
}

/// Collapse to a single value, handling both cases.
pub fn fold<A, R, N, S>(on_none: N, on_some: S) -> impl FnOnce(Option<A>) -> R
where
    N: FnOnce() -> R,
    S: FnOnce(A) -> R,
{
    move |option| match option {
        Some(value) => on_some(value),
        None => on_none(),
    }
}

/// Extract the value, computing a fallback when absent.
pub fn get_or_else<A, F>(fallback: F) -> impl FnOnce(Option<A>) -> A
where
    F: FnOnce() -> A,
{
    move |option| option.unwrap_or_else(fallback)
}

/// Keep a present value, otherwise try the fallback.
pub fn or_else<A, F>(fallback: F) -> impl FnOnce(Option<A>) -> Option<A>
where
    F: FnOnce() -> Option<A>,
{
    move |option| option.or_else(fallback)
}

/// Build a function that keeps values satisfying `predicate`.
///
/// # Example
///
/// ```rust
/// use pipewell::option;
///
/// let positive = option::from_predicate(|n: &i32| *n > 0);
/// assert_eq!(positive(5), Some(5));
/// assert_eq!(positive(-1), None);
/// ```
pub fn from_predicate<A, P>(predicate: P) -> impl Fn(A) -> Option<A>
where
    P: Predicate<A>,
{
    move |value| predicate.check(&value).then_some(value)
}

/// Turn absence into the error produced by `get_error`.
pub fn to_result<A, E, F>(get_error: F) -> impl FnOnce(Option<A>) -> Result<A, E>
where
    F: FnOnce() -> E,
{
    move |option| option.ok_or_else(get_error)
}
