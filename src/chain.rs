//! Short-circuiting record chains over `Option` and `Result`.
//!
//! The [`Chain`] trait captures what `Option` and `Result` have in common: a
//! container is either a success carrying an `Output`, or a failure carrying a
//! `Failure` (`()` for `Option`, the error for `Result`). [`ChainExt`] builds the
//! record-accumulating combinators once on top of it, so both flavors get
//! exactly the same `bind`, `tap` and `bind_to` semantics.
//!
//! # Example
//!
//! ```rust
//! use pipewell::prelude::*;
//!
//! fn parse_port(raw: &str) -> Result<u16, String> {
//!     raw.parse().map_err(|_| format!("bad port: {}", raw))
//! }
//!
//! let config = pipewell::result::start::<String>()
//!     .bind("host", |_| Ok("localhost".to_string()))
//!     .bind("port", |_| parse_port("8080"))
//!     .bind("url", |r| {
//!         Ok(format!(
//!             "http://{}:{}",
//!             r.get::<String>("host").unwrap(),
//!             r.get::<u16>("port").unwrap()
//!         ))
//!     })
//!     .unwrap();
//!
//! assert_eq!(config.get::<String>("url").unwrap(), "http://localhost:8080");
//! ```
//!
//! A failing step stops the chain; later steps never run:
//!
//! ```rust
//! use pipewell::prelude::*;
//!
//! let mut later_ran = false;
//! let result = pipewell::option::start()
//!     .bind("a", |_| Some(1))
//!     .bind("b", |_| None::<i32>)
//!     .bind("c", |_| {
//!         later_ran = true;
//!         Some(3)
//!     });
//!
//! assert!(result.is_none());
//! assert!(!later_ran);
//! ```

use std::any::Any;

use crate::record::{FieldName, Record};

/// A container that is either a success or a short-circuiting failure.
///
/// Implemented for `Option<T>` (absence is the failure, carrying `()`) and
/// `Result<T, E>`. `With<U>` is the same container holding a `U` instead,
/// keeping the failure type.
pub trait Chain: Sized {
    /// The success payload.
    type Output;

    /// The failure payload.
    type Failure;

    /// This container re-wrapped around another success type.
    type With<U>: Chain<Output = U, Failure = Self::Failure>;

    /// Wrap a success value.
    fn succeed(value: Self::Output) -> Self;

    /// Wrap a failure.
    fn fail(failure: Self::Failure) -> Self;

    /// Split into the standard success/failure representation.
    fn into_result(self) -> Result<Self::Output, Self::Failure>;
}

impl<T> Chain for Option<T> {
    type Output = T;
    type Failure = ();
    type With<U> = Option<U>;

    #[inline]
    fn succeed(value: T) -> Self {
        Some(value)
    }

    #[inline]
    fn fail(_: ()) -> Self {
        None
    }

    #[inline]
    fn into_result(self) -> Result<T, ()> {
        self.ok_or(())
    }
}

impl<T, E> Chain for Result<T, E> {
    type Output = T;
    type Failure = E;
    type With<U> = Result<U, E>;

    #[inline]
    fn succeed(value: T) -> Self {
        Ok(value)
    }

    #[inline]
    fn fail(failure: E) -> Self {
        Err(failure)
    }

    #[inline]
    fn into_result(self) -> Result<T, E> {
        self
    }
}

/// Record-building combinators available on every [`Chain`].
///
/// Automatically implemented for all `Chain` types.
pub trait ChainExt: Chain {
    /// Add field `name`, computed from the record built so far.
    ///
    /// If `self` already failed, `f` is not called and the failure is returned
    /// unchanged. If `f` fails, its failure becomes the chain's failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipewell::prelude::*;
    ///
    /// let chain = pipewell::option::start()
    ///     .bind("x", |_| Some(2))
    ///     .bind("y", |r| r.get::<i32>("x").map(|x| x * 10));
    ///
    /// assert_eq!(chain.unwrap().get::<i32>("y"), Some(&20));
    /// ```
    fn bind<K, V, G, F>(self, name: K, f: F) -> Self
    where
        Self: Chain<Output = Record>,
        K: Into<FieldName>,
        V: Any + Send + Sync,
        G: Chain<Output = V, Failure = Self::Failure>,
        F: FnOnce(&Record) -> G,
    {
        self.bind_widen(name, f)
    }

    /// Like [`bind`](ChainExt::bind), but the step may fail with any error
    /// that converts into the chain's failure type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipewell::prelude::*;
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum AppError {
    ///     Parse(std::num::ParseIntError),
    /// }
    ///
    /// impl From<std::num::ParseIntError> for AppError {
    ///     fn from(e: std::num::ParseIntError) -> Self {
    ///         AppError::Parse(e)
    ///     }
    /// }
    ///
    /// let chain = pipewell::result::start::<AppError>()
    ///     .bind_widen("n", |_| "12".parse::<i32>());
    ///
    /// assert_eq!(chain.unwrap().get::<i32>("n"), Some(&12));
    /// ```
    fn bind_widen<K, V, G, F>(self, name: K, f: F) -> Self
    where
        Self: Chain<Output = Record>,
        K: Into<FieldName>,
        V: Any + Send + Sync,
        G: Chain<Output = V>,
        G::Failure: Into<Self::Failure>,
        F: FnOnce(&Record) -> G,
    {
        let name = name.into();
        let record = match self.into_result() {
            Ok(record) => record,
            Err(failure) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(field = %name, "chain already failed; skipping step");
                return Self::fail(failure);
            }
        };

        match f(&record).into_result() {
            Ok(value) => Self::succeed(record.with(name, value)),
            Err(failure) => Self::fail(failure.into()),
        }
    }

    /// Run a side effect on the success value, keeping the value.
    ///
    /// A failing side effect fails the chain; a succeeding one is discarded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipewell::prelude::*;
    ///
    /// let audited = Ok::<_, String>(5).tap(|n| {
    ///     if *n > 3 { Ok(()) } else { Err("too small".to_string()) }
    /// });
    /// assert_eq!(audited, Ok(5));
    ///
    /// let rejected = Ok::<_, String>(1).tap(|n| {
    ///     if *n > 3 { Ok(()) } else { Err("too small".to_string()) }
    /// });
    /// assert_eq!(rejected, Err("too small".to_string()));
    /// ```
    fn tap<G, F>(self, f: F) -> Self
    where
        G: Chain<Failure = Self::Failure>,
        F: FnOnce(&Self::Output) -> G,
    {
        match self.into_result() {
            Ok(value) => match f(&value).into_result() {
                Ok(_) => Self::succeed(value),
                Err(failure) => Self::fail(failure),
            },
            Err(failure) => Self::fail(failure),
        }
    }

    /// Start a record from the success value, stored under `name`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipewell::prelude::*;
    ///
    /// let record = Some(3_u8).bind_to("count").unwrap();
    /// assert_eq!(record.get::<u8>("count"), Some(&3));
    /// ```
    fn bind_to<K>(self, name: K) -> Self::With<Record>
    where
        K: Into<FieldName>,
        Self::Output: Any + Send + Sync,
    {
        match self.into_result() {
            Ok(value) => <Self::With<Record>>::succeed(Record::new().with(name, value)),
            Err(failure) => <Self::With<Record>>::fail(failure),
        }
    }
}

impl<C: Chain> ChainExt for C {}

/// Point-free form of [`ChainExt::bind`].
///
/// # Example
///
/// ```rust
/// use pipewell::prelude::*;
///
/// use pipewell::chain;
///
/// let fields = pipewell::option::start()
///     .pipe(chain::bind("a", |_| Some(1)))
///     .pipe(chain::bind("b", |_| Some(2)));
///
/// assert_eq!(fields.map(|r| r.len()), Some(2));
/// ```
pub fn bind<C, K, V, G, F>(name: K, f: F) -> impl FnOnce(C) -> C
where
    C: Chain<Output = Record>,
    K: Into<FieldName>,
    V: Any + Send + Sync,
    G: Chain<Output = V, Failure = C::Failure>,
    F: FnOnce(&Record) -> G,
{
    move |chain| chain.bind(name, f)
}

/// Point-free form of [`ChainExt::bind_widen`].
pub fn bind_widen<C, K, V, G, F>(name: K, f: F) -> impl FnOnce(C) -> C
where
    C: Chain<Output = Record>,
    K: Into<FieldName>,
    V: Any + Send + Sync,
    G: Chain<Output = V>,
    G::Failure: Into<C::Failure>,
    F: FnOnce(&Record) -> G,
{
    move |chain| chain.bind_widen(name, f)
}

/// Point-free form of [`ChainExt::tap`].
pub fn tap<C, G, F>(f: F) -> impl FnOnce(C) -> C
where
    C: Chain,
    G: Chain<Failure = C::Failure>,
    F: FnOnce(&C::Output) -> G,
{
    move |chain| chain.tap(f)
}

/// Point-free form of [`ChainExt::bind_to`].
pub fn bind_to<C, K>(name: K) -> impl FnOnce(C) -> C::With<Record>
where
    C: Chain,
    C::Output: Any + Send + Sync,
    K: Into<FieldName>,
{
    move |chain| chain.bind_to(name)
}


#[cfg(all(test, feature = "tracing"))]
mod tracing_tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn skipped_step_is_logged() {
        let result = None::<Record>.bind("late", |_| Some(1));
        assert!(result.is_none());
        assert!(logs_contain("chain already failed; skipping step"));
        assert!(logs_contain("late"));
    }
}
