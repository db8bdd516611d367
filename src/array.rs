//! Point-free helpers for `Vec`.
//!
//! Helpers that need configuration return a function taking the vector;
//! helpers that need none (`compact`, `head`, `last`, `size`, ...) take the
//! vector directly, so both shapes slot into [`Pipe::pipe`](crate::pipe::Pipe::pipe).
//!
//! ```rust
//! use pipewell::prelude::*;
//! use pipewell::array;
//!
//! let batches = vec!["1", "x", "3", "4", "y"]
//!     .pipe(array::filter_map(|s: &str| s.parse::<u32>().ok()))
//!     .pipe(array::chunks_of(2));
//!
//! assert_eq!(batches, vec![vec![1, 3], vec![4]]);
//! ```

/// Items that failed (`left`) and passed (`right`) a test.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition<A> {
    /// Items for which the test returned `false`.
    pub left: Vec<A>,
    /// Items for which the test returned `true`.
    pub right: Vec<A>,
}

/// Transform every item.
pub fn map<A, B, F>(f: F) -> impl FnOnce(Vec<A>) -> Vec<B>
where
    F: FnMut(A) -> B,
{
    move |items| items.into_iter().map(f).collect()
}

/// Transform every item, also passing its index.
pub fn map_with_index<A, B, F>(mut f: F) -> impl FnOnce(Vec<A>) -> Vec<B>
where
    F: FnMut(usize, A) -> B,
{
    move |items| {
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| f(index, item))
            .collect()
    }
}

/// Returns `true` if every item satisfies `f`. Vacuously true when empty.
pub fn every<A, F>(f: F) -> impl FnOnce(Vec<A>) -> bool
where
    F: FnMut(&A) -> bool,
{
    move |items| items.iter().all(f)
}

/// Returns `true` if any item satisfies `f`.
pub fn some<A, F>(f: F) -> impl FnOnce(Vec<A>) -> bool
where
    F: FnMut(&A) -> bool,
{
    move |items| items.iter().any(f)
}

/// Keep the items satisfying `f`.
pub fn filter<A, F>(mut f: F) -> impl FnOnce(Vec<A>) -> Vec<A>
where
    F: FnMut(&A) -> bool,
{
    move |items| items.into_iter().filter(|item| f(item)).collect()
}

/// Transform items, dropping those mapped to `None`.
pub fn filter_map<A, B, F>(f: F) -> impl FnOnce(Vec<A>) -> Vec<B>
where
    F: FnMut(A) -> Option<B>,
{
    move |items| items.into_iter().filter_map(f).collect()
}

/// The first item satisfying `f`.
pub fn find_first<A, F>(mut f: F) -> impl FnOnce(Vec<A>) -> Option<A>
where
    F: FnMut(&A) -> bool,
{
    move |items| items.into_iter().find(|item| f(item))
}

/// Add `item` at the end.
pub fn append<A>(item: A) -> impl FnOnce(Vec<A>) -> Vec<A> {
    move |mut items| {
        items.push(item);
        items
    }
}

/// Keep the present values, dropping every `None`.
pub fn compact<A>(items: Vec<Option<A>>) -> Vec<A> {
    items.into_iter().flatten().collect()
}

/// Split into consecutive chunks of `size` items; the last may be shorter.
///
/// A `size` of zero puts every item into a single chunk.
///
/// # Example
///
/// ```rust
/// use pipewell::array;
///
/// assert_eq!(array::chunks_of(2)(vec![1, 2, 3]), vec![vec![1, 2], vec![3]]);
/// assert_eq!(array::chunks_of(2)(Vec::<i32>::new()), Vec::<Vec<i32>>::new());
/// ```
pub fn chunks_of<A>(size: usize) -> impl FnOnce(Vec<A>) -> Vec<Vec<A>> {
    move |items| {
        if items.is_empty() {
            return Vec::new();
        }
        let size = if size == 0 { items.len() } else { size };

        let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
        let mut items = items.into_iter().peekable();
        while items.peek().is_some() {
            chunks.push(items.by_ref().take(size).collect());
        }
        chunks
    }
}

/// The first item, if any.
pub fn head<A>(items: Vec<A>) -> Option<A> {
    items.into_iter().next()
}

/// The last item, if any.
pub fn last<A>(mut items: Vec<A>) -> Option<A> {
    items.pop()
}

/// Returns `true` if there are no items.
pub fn is_empty<A>(items: &[A]) -> bool {
    items.is_empty()
}

/// Returns `true` if there is at least one item.
pub fn is_non_empty<A>(items: &[A]) -> bool {
    !items.is_empty()
}

/// Split items by `f`, keeping their relative order in each half.
///
/// # Example
///
/// ```rust
/// use pipewell::array::{self, Partition};
///
/// let split = array::partition(|n: &i32| *n >= 0)(vec![3, -1, 0, -7]);
/// assert_eq!(split, Partition { left: vec![-1, -7], right: vec![3, 0] });
/// ```
pub fn partition<A, F>(mut f: F) -> impl FnOnce(Vec<A>) -> Partition<A>
where
    F: FnMut(&A) -> bool,
{
    move |items| {
        let (right, left) = items.into_iter().partition(|item| f(item));
        Partition { left, right }
    }
}

/// Fold items into an accumulator, starting from `initial`.
pub fn reduce<A, R, F>(initial: R, f: F) -> impl FnOnce(Vec<A>) -> R
where
    F: FnMut(R, A) -> R,
{
    move |items| items.into_iter().fold(initial, f)
}

/// Number of items.
pub fn size<A>(items: &[A]) -> usize {
    items.len()
}
