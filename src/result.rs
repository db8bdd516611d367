//! Point-free helpers for `Result`.
//!
//! The record-chain helpers (`start`, `bind`, `bind_widen`, `tap`, `bind_to`)
//! short-circuit on the first `Err`. The rest are curried adapters over the
//! standard `Result` methods.
//!
//! ```rust
//! use pipewell::prelude::*;
//! use pipewell::result;
//!
//! fn non_empty(s: &str) -> Result<String, String> {
//!     if s.is_empty() { Err("empty".to_string()) } else { Ok(s.to_string()) }
//! }
//!
//! let signup = result::start()
//!     .pipe(result::bind("email", |_| non_empty("a@b.c")))
//!     .pipe(result::bind("name", |_| non_empty("")))
//!     .pipe(result::map(|r: Record| r.len()));
//!
//! assert_eq!(signup, Err("empty".to_string()));
//! ```

use std::any::Any;

use crate::chain::ChainExt;
use crate::predicate::Predicate;
use crate::record::{FieldName, Record};

/// The `Do` starting point: a successful, empty record.
pub fn start<E>() -> Result<Record, E> {
    Ok(Record::new())
}

/// Add field `name` to a successful record; see [`ChainExt::bind`].
pub fn bind<K, V, E, F>(name: K, f: F) -> impl FnOnce(Result<Record, E>) -> Result<Record, E>
where
    K: Into<FieldName>,
    V: Any + Send + Sync,
    F: FnOnce(&Record) -> Result<V, E>,
{
    move |result| result.bind(name, f)
}

/// Add field `name` from a step whose error converts into the chain's error.
///
/// # Example
///
/// ```rust
/// use pipewell::prelude::*;
/// use pipewell::result;
///
/// #[derive(Debug, PartialEq)]
/// struct AppError(String);
///
/// impl From<std::num::ParseIntError> for AppError {
///     fn from(e: std::num::ParseIntError) -> Self {
///         AppError(e.to_string())
///     }
/// }
///
/// let parsed = result::start::<AppError>()
///     .pipe(result::bind_widen("n", |_| "x".parse::<i32>()));
///
/// assert!(matches!(parsed, Err(AppError(_))));
/// ```
pub fn bind_widen<K, V, E, F2, F>(
    name: K,
    f: F,
) -> impl FnOnce(Result<Record, E>) -> Result<Record, E>
where
    K: Into<FieldName>,
    V: Any + Send + Sync,
    F2: Into<E>,
    F: FnOnce(&Record) -> Result<V, F2>,
{
    move |result| result.bind_widen(name, f)
}

/// Run a fallible side effect on the success value, keeping the value.
pub fn tap<A, B, E, F>(f: F) -> impl FnOnce(Result<A, E>) -> Result<A, E>
where
    F: FnOnce(&A) -> Result<B, E>,
{
    move |result| result.tap(f)
}

/// Start a record holding the success value under `name`.
pub fn bind_to<A, E, K>(name: K) -> impl FnOnce(Result<A, E>) -> Result<Record, E>
where
    A: Any + Send + Sync,
    K: Into<FieldName>,
{
    move |result| result.bind_to(name)
}

/// Transform the success value.
pub fn map<A, B, E, F>(f: F) -> impl FnOnce(Result<A, E>) -> Result<B, E>
where
    F: FnOnce(A) -> B,
{
    move |result| result.map(f)
}

/// Transform the error value.
pub fn map_err<A, E, E2, F>(f: F) -> impl FnOnce(Result<A, E>) -> Result<A, E2>
where
    F: FnOnce(E) -> E2,
{
    move |result| result.map_err(f)
}

/// Chain to another `Result` computed from the success value.
pub fn flat_map<A, B, E, F>(f: F) -> impl FnOnce(Result<A, E>) -> Result<B, E>
where
    F: FnOnce(A) -> Result<B, E>,
{
    move |result| result.and_then(f)
}

/// Collapse to a single value, handling both cases.
pub fn fold<A, E, R, L, S>(on_err: L, on_ok: S) -> impl FnOnce(Result<A, E>) -> R
where
    L: FnOnce(E) -> R,
    S: FnOnce(A) -> R,
{
    move |result| match result {
        Ok(value) => on_ok(value),
        Err(error) => on_err(error),
    }
}

/// Extract the success value, computing a fallback on error.
pub fn get_or_else<A, E, F>(fallback: F) -> impl FnOnce(Result<A, E>) -> A
where
    F: FnOnce() -> A,
{
    move |result| result.unwrap_or_else(|_| fallback())
}

/// Recover from an error with another `Result`.
pub fn or_else<A, E, E2, F>(fallback: F) -> impl FnOnce(Result<A, E>) -> Result<A, E2>
where
    F: FnOnce(E) -> Result<A, E2>,
{
    move |result| result.or_else(fallback)
}

/// Turn an absent `Option` into the error produced by `get_error`.
pub fn from_option<A, E, F>(get_error: F) -> impl FnOnce(Option<A>) -> Result<A, E>
where
    F: FnOnce() -> E,
{
    move |option| option.ok_or_else(get_error)
}

/// Build a function that accepts values satisfying `predicate`.
pub fn from_predicate<A, E, P, F>(predicate: P, fallback: F) -> impl FnOnce(A) -> Result<A, E>
where
    P: Predicate<A>,
    F: FnOnce() -> E,
{
    move |value| {
        if predicate.check(&value) {
            Ok(value)
        } else {
            Err(fallback())
        }
    }
}

/// Fail a success value that does not satisfy `predicate`.
///
/// # Example
///
/// ```rust
/// use pipewell::prelude::*;
/// use pipewell::result;
///
/// let adult = |age: u8| {
///     Ok::<_, String>(age)
///         .pipe(result::filter_or_else(|a: &u8| *a >= 18, |a| format!("{} is too young", a)))
/// };
///
/// assert_eq!(adult(30), Ok(30));
/// assert_eq!(adult(12), Err("12 is too young".to_string()));
/// ```
pub fn filter_or_else<A, E, P, F>(
    predicate: P,
    fallback: F,
) -> impl FnOnce(Result<A, E>) -> Result<A, E>
where
    P: Predicate<A>,
    F: FnOnce(&A) -> E,
{
    move |result| {
        result.and_then(|value| {
            if predicate.check(&value) {
                Ok(value)
            } else {
                Err(fallback(&value))
            }
        })
    }
}

/// Collect results in order, returning the first error if any.
pub fn sequence<A, E, I>(results: I) -> Result<Vec<A>, E>
where
    I: IntoIterator<Item = Result<A, E>>,
{
    results.into_iter().collect()
}

/// Discard the success value.
pub fn as_unit<A, E>(result: Result<A, E>) -> Result<(), E> {
    result.map(|_| ())
}
