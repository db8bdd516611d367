//! Pipe-style application for point-free helpers.
//!
//! The helpers in this crate are curried: `option::map(f)` returns a function
//! that still needs its container. [`Pipe::pipe`] feeds a value into such a
//! function so pipelines read top to bottom.
//!
//! ```rust
//! use pipewell::prelude::*;
//! use pipewell::{array, option};
//!
//! let first_even_doubled = vec![3, 5, 8, 10]
//!     .pipe(array::find_first(|n: &i32| n % 2 == 0))
//!     .pipe(option::map(|n| n * 2));
//!
//! assert_eq!(first_even_doubled, Some(16));
//! ```

/// Extension trait providing `pipe` on every sized value.
///
/// Automatically implemented for all types.
pub trait Pipe: Sized {
    /// Apply `f` to `self`.
    #[inline]
    fn pipe<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
