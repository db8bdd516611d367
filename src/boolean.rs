//! Point-free folding of `bool`.

/// Choose between two lazily computed values.
///
/// # Example
///
/// ```rust
/// use pipewell::prelude::*;
/// use pipewell::boolean;
///
/// let word = (3 > 2).pipe(boolean::fold(|| "no", || "yes"));
/// assert_eq!(word, "yes");
/// ```
pub fn fold<R, F, T>(on_false: F, on_true: T) -> impl FnOnce(bool) -> R
where
    F: FnOnce() -> R,
    T: FnOnce() -> R,
{
    move |flag| if flag { on_true() } else { on_false() }
}
