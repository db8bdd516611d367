//! Predicate algebra: negation, conjunction and disjunction of tests.
//!
//! Any `Fn(&T) -> bool` closure is a [`Predicate<T>`]. Predicates compose
//! either by method ([`PredicateExt`]) or point-free, where the predicate being
//! extended comes last:
//!
//! ```rust
//! use pipewell::prelude::*;
//! use pipewell::predicate;
//!
//! let positive = |n: &i32| *n > 0;
//! let even = |n: &i32| n % 2 == 0;
//!
//! let positive_even = positive.pipe(predicate::and(even));
//! assert!(positive_even.check(&4));
//! assert!(!positive_even.check(&3));
//! assert!(!positive_even.check(&-2));
//! ```

use std::fmt;

/// A reusable yes/no test over values of type `T`.
///
/// Closures taking `&T` and returning `bool` are predicates already, so most
/// callers never implement this trait by hand. Predicates are `Send + Sync`
/// so they can be shared with task helpers such as
/// [`task::filter_or_else`](crate::task::filter_or_else).
///
/// # Example
///
/// ```rust
/// use pipewell::predicate::Predicate;
///
/// struct MaxLen(usize);
///
/// impl Predicate<str> for MaxLen {
///     fn check(&self, value: &str) -> bool {
///         value.len() <= self.0
///     }
/// }
///
/// assert!(MaxLen(3).check("abc"));
/// assert!(!MaxLen(3).check("abcd"));
/// ```
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Returns `true` if `value` passes the test.
    fn check(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

/// A type-erased predicate, for collections of mixed predicates.
pub type BoxedPredicate<T> = Box<dyn Predicate<T>>;

/// Method-style composition, available on every [`Predicate`].
///
/// ```rust
/// use pipewell::prelude::*;
///
/// let in_stock = |qty: &u32| *qty > 0;
/// let bulk = |qty: &u32| *qty >= 100;
///
/// let retail = in_stock.and(bulk.not());
/// assert!(retail.check(&5));
/// assert!(!retail.check(&0));
/// assert!(!retail.check(&250));
/// ```
pub trait PredicateExt<T: ?Sized>: Predicate<T> + Sized {
    /// Passes when `self` and `other` both pass; `other` is skipped when
    /// `self` fails.
    fn and<P: Predicate<T>>(self, other: P) -> And<Self, P> {
        And(self, other)
    }

    /// Passes when either passes; `other` is skipped when `self` passes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipewell::prelude::*;
    ///
    /// let reserved = (|name: &str| name.starts_with('_')).or(|name: &str| name == "self");
    /// assert!(reserved.check("_tmp"));
    /// assert!(reserved.check("self"));
    /// assert!(!reserved.check("user"));
    /// ```
    fn or<P: Predicate<T>>(self, other: P) -> Or<Self, P> {
        Or(self, other)
    }

    /// Passes exactly when `self` fails.
    fn not(self) -> Not<Self> {
        Not(self)
    }

    /// Erase the predicate's type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipewell::predicate::{every_predicates, BoxedPredicate, PredicateExt, Predicate};
    ///
    /// let rules: Vec<BoxedPredicate<str>> = vec![
    ///     (|s: &str| !s.is_empty()).boxed(),
    ///     (|s: &str| s.is_ascii()).boxed(),
    /// ];
    /// let valid = every_predicates(rules);
    ///
    /// assert!(valid.check("ok"));
    /// assert!(!valid.check(""));
    /// ```
    fn boxed(self) -> BoxedPredicate<T>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<T: ?Sized, P: Predicate<T>> PredicateExt<T> for P {}

/// Conjunction built by [`PredicateExt::and`] or [`and`].
#[derive(Clone, Copy, Debug)]
pub struct And<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for And<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) && self.1.check(value)
    }
}

/// Disjunction built by [`PredicateExt::or`] or [`or`].
#[derive(Clone, Copy, Debug)]
pub struct Or<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for Or<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) || self.1.check(value)
    }
}

/// Negation built by [`PredicateExt::not`] or [`not`].
#[derive(Clone, Copy, Debug)]
pub struct Not<P>(pub P);

impl<T: ?Sized, P: Predicate<T>> Predicate<T> for Not<P> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        !self.0.check(value)
    }
}

/// Negate `predicate`.
pub fn not<P>(predicate: P) -> Not<P> {
    Not(predicate)
}

/// Point-free conjunction: `and(second)(first)` holds when both hold.
///
/// `first` is evaluated before `second`.
pub fn and<P1, P2>(second: P2) -> impl FnOnce(P1) -> And<P1, P2> {
    move |first| And(first, second)
}

/// Point-free disjunction: `or(second)(first)` holds when either holds.
///
/// `first` is evaluated before `second`.
pub fn or<P1, P2>(second: P2) -> impl FnOnce(P1) -> Or<P1, P2> {
    move |first| Or(first, second)
}

/// Holds when every predicate in the list holds.
pub struct AllOf<T: ?Sized>(Vec<BoxedPredicate<T>>);

impl<T: ?Sized> Predicate<T> for AllOf<T> {
    fn check(&self, value: &T) -> bool {
        self.0.iter().all(|p| p.check(value))
    }
}

impl<T: ?Sized> fmt::Debug for AllOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllOf")
            .field("predicates", &self.0.len())
            .finish()
    }
}

/// Holds when at least one predicate in the list holds.
pub struct AnyOf<T: ?Sized>(Vec<BoxedPredicate<T>>);

impl<T: ?Sized> Predicate<T> for AnyOf<T> {
    fn check(&self, value: &T) -> bool {
        self.0.iter().any(|p| p.check(value))
    }
}

impl<T: ?Sized> fmt::Debug for AnyOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyOf")
            .field("predicates", &self.0.len())
            .finish()
    }
}

/// Combine predicates so that all must hold. An empty list always holds.
pub fn every_predicates<T: ?Sized>(predicates: Vec<BoxedPredicate<T>>) -> AllOf<T> {
    AllOf(predicates)
}

/// Combine predicates so that one must hold. An empty list never holds.
pub fn some_predicates<T: ?Sized>(predicates: Vec<BoxedPredicate<T>>) -> AnyOf<T> {
    AnyOf(predicates)
}
