//! Helpers for deferred results: futures that settle to a `Result`.
//!
//! Any `Future<Output = Result<A, E>>` is a task. The record-chain helpers
//! mirror the synchronous ones in [`result`](crate::result), with one
//! difference in scheduling:
//!
//! - [`bind`] runs its step only after the incoming task settled successfully,
//!   so steps run strictly one after another.
//! - [`ap_s`], [`Fields`] and [`sequence_array`] poll their computations
//!   concurrently and wait for all of them.
//!
//! Helpers cannot return a closure producing a future, so every helper takes
//! the task it operates on as its **last** argument. The [`TaskExt`] and
//! [`RecordTaskExt`] traits offer the same operations as methods.
//!
//! # Example
//!
//! ```rust
//! use pipewell::prelude::*;
//!
//! async fn load_user(id: u32) -> Result<String, String> {
//!     Ok(format!("user-{}", id))
//! }
//!
//! async fn load_orders(user: String) -> Result<Vec<u32>, String> {
//!     Ok(if user == "user-7" { vec![1, 2] } else { vec![] })
//! }
//!
//! # tokio_test::block_on(async {
//! let summary = pipewell::task::start::<String>()
//!     .bind("user", |_| load_user(7))
//!     .bind("orders", |r| load_orders(r.get::<String>("user").unwrap().clone()))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(summary.get::<Vec<u32>>("orders"), Some(&vec![1, 2]));
//! # });
//! ```

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::future::{self, Ready};
use futures::{FutureExt, TryFutureExt};

use crate::fields::Fields;
use crate::predicate::Predicate;
use crate::record::{FieldName, Record};

/// Payload of a panic caught by [`try_catch`].
pub type PanicPayload = Box<dyn Any + Send>;

// ========== Constructors ==========

/// A task that has already succeeded with `value`.
pub fn right<A, E>(value: A) -> Ready<Result<A, E>> {
    future::ready(Ok(value))
}

/// A task that has already failed with `error`.
pub fn left<A, E>(error: E) -> Ready<Result<A, E>> {
    future::ready(Err(error))
}

/// A task that has already settled to `result`.
pub fn from_result<A, E>(result: Result<A, E>) -> Ready<Result<A, E>> {
    future::ready(result)
}

/// A settled task from an `Option`, using `get_error` when it is absent.
pub fn from_option<A, E, F>(get_error: F, option: Option<A>) -> Ready<Result<A, E>>
where
    F: FnOnce() -> E,
{
    future::ready(option.ok_or_else(get_error))
}

/// A settled task that accepts `value` only if it satisfies `predicate`.
pub fn from_predicate<A, E, P, F>(predicate: P, fallback: F, value: A) -> Ready<Result<A, E>>
where
    P: Predicate<A>,
    F: FnOnce() -> E,
{
    if predicate.check(&value) {
        future::ready(Ok(value))
    } else {
        future::ready(Err(fallback()))
    }
}

/// Run a computation, turning a panic while creating or polling it into
/// an error built by `map_error`.
///
/// # Example
///
/// ```rust
/// use pipewell::task;
///
/// async fn flaky() -> u32 {
///     panic!("lost connection")
/// }
///
/// # tokio_test::block_on(async {
/// let result = task::try_catch(flaky, |payload| {
///     task::panic_message(&payload).unwrap_or("unknown").to_string()
/// })
/// .await;
///
/// assert_eq!(result, Err("lost connection".to_string()));
/// # });
/// ```
pub fn try_catch<A, E, Mk, Fut, M>(
    make: Mk,
    map_error: M,
) -> impl Future<Output = Result<A, E>> + Send
where
    Mk: FnOnce() -> Fut + Send,
    Fut: Future<Output = A> + Send,
    M: FnOnce(PanicPayload) -> E + Send,
{
    AssertUnwindSafe(async move { make().await })
        .catch_unwind()
        .map(|outcome| outcome.map_err(map_error))
}

/// The message of a panic payload, when it carries one.
pub fn panic_message(payload: &PanicPayload) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

// ========== Record chains ==========

/// The `Do` starting point: a settled, successful, empty record.
pub fn start<E>() -> Ready<Result<Record, E>> {
    future::ready(Ok(Record::new()))
}

/// Add field `name` once `task` succeeded, computing it from the record.
///
/// `f` is not called when `task` fails. The step's task is awaited before
/// the returned task settles.
pub fn bind<T, E, K, V, F, Fut>(
    name: K,
    f: F,
    task: T,
) -> impl Future<Output = Result<Record, E>> + Send
where
    T: Future<Output = Result<Record, E>> + Send,
    E: Send,
    K: Into<FieldName>,
    V: Any + Send + Sync,
    F: FnOnce(&Record) -> Fut + Send,
    Fut: Future<Output = Result<V, E>> + Send,
{
    bind_widen(name, f, task)
}

/// Like [`bind`], but the step may fail with any error converting into `E`.
pub fn bind_widen<T, E, E2, K, V, F, Fut>(
    name: K,
    f: F,
    task: T,
) -> impl Future<Output = Result<Record, E>> + Send
where
    T: Future<Output = Result<Record, E>> + Send,
    E: Send,
    E2: Into<E>,
    K: Into<FieldName>,
    V: Any + Send + Sync,
    F: FnOnce(&Record) -> Fut + Send,
    Fut: Future<Output = Result<V, E2>> + Send,
{
    let name = name.into();
    async move {
        let record = match task.await {
            Ok(record) => record,
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(field = %name, "task chain already failed; skipping step");
                return Err(error);
            }
        };

        let step = f(&record);
        match step.await {
            Ok(value) => Ok(record.with(name, value)),
            Err(error) => Err(error.into()),
        }
    }
}

/// Add field `name` from a computation that runs concurrently with `task`.
///
/// Both are polled together; the result is available once both settled.
/// A failure of `task` wins over a failure of `computation`.
#[deprecated(
    since = "0.1.0",
    note = "use `Fields` to resolve independent fields concurrently"
)]
pub fn ap_s<'a, T, E, K, V, Fut>(
    name: K,
    computation: Fut,
    task: T,
) -> impl Future<Output = Result<Record, E>> + Send + 'a
where
    T: Future<Output = Result<Record, E>> + Send + 'a,
    E: Send + 'a,
    K: Into<FieldName>,
    V: Any + Send + Sync,
    Fut: Future<Output = Result<V, E>> + Send + 'a,
{
    Fields::new().field(name, computation).merge_into(task)
}

/// Start a record holding the success value under `name`.
pub fn bind_to<T, A, E, K>(name: K, task: T) -> impl Future<Output = Result<Record, E>> + Send
where
    T: Future<Output = Result<A, E>> + Send,
    A: Any + Send + Sync,
    K: Into<FieldName>,
{
    let name = name.into();
    task.map_ok(move |value| Record::new().with(name, value))
}

/// Run a fallible async side effect on the success value, keeping the value.
///
/// A failing side effect fails the task; its success value is discarded.
pub fn tap<T, A, B, E, F, Fut>(f: F, task: T) -> impl Future<Output = Result<A, E>> + Send
where
    T: Future<Output = Result<A, E>> + Send,
    A: Send,
    E: Send,
    F: FnOnce(&A) -> Fut + Send,
    Fut: Future<Output = Result<B, E>> + Send,
{
    async move {
        let value = task.await?;
        let effect = f(&value);
        effect.await?;
        Ok::<_, E>(value)
    }
}

/// Run a fallible async side effect on `value`, then succeed with `value`.
pub fn as_side_effect<A, B, E, F, Fut>(
    f: F,
    value: A,
) -> impl Future<Output = Result<A, E>> + Send
where
    A: Send,
    E: Send,
    F: FnOnce(&A) -> Fut + Send,
    Fut: Future<Output = Result<B, E>> + Send,
{
    tap(f, future::ready(Ok(value)))
}

/// Settle every task concurrently; succeed with all values in input order,
/// or fail with the first failure in input order.
///
/// All tasks run to completion even when one fails early.
pub fn sequence_array<I, T, A, E>(tasks: I) -> impl Future<Output = Result<Vec<A>, E>> + Send
where
    I: IntoIterator<Item = T>,
    T: Future<Output = Result<A, E>> + Send,
    A: Send,
    E: Send,
{
    future::join_all(tasks).map(|results| results.into_iter().collect::<Result<Vec<A>, E>>())
}

// ========== Transformations ==========

/// Transform the success value.
pub fn map<T, A, B, E, F>(f: F, task: T) -> impl Future<Output = Result<B, E>> + Send
where
    T: Future<Output = Result<A, E>> + Send,
    F: FnOnce(A) -> B + Send,
{
    task.map_ok(f)
}

/// Transform the error value.
pub fn map_left<T, A, E, E2, F>(f: F, task: T) -> impl Future<Output = Result<A, E2>> + Send
where
    T: Future<Output = Result<A, E>> + Send,
    F: FnOnce(E) -> E2 + Send,
{
    task.map_err(f)
}

/// Chain to another task computed from the success value.
pub fn flat_map<T, A, B, E, F, Fut>(f: F, task: T) -> impl Future<Output = Result<B, E>> + Send
where
    T: Future<Output = Result<A, E>> + Send,
    F: FnOnce(A) -> Fut + Send,
    Fut: Future<Output = Result<B, E>> + Send,
{
    task.and_then(f)
}

/// Chain to a synchronous `Result` computed from the success value.
pub fn chain_result<T, A, B, E, F>(
    f: F,
    task: T,
) -> impl Future<Output = Result<B, E>> + Send
where
    T: Future<Output = Result<A, E>> + Send,
    F: FnOnce(A) -> Result<B, E> + Send,
{
    task.map(|result| result.and_then(f))
}

/// Fail a success value that does not satisfy `predicate`.
pub fn filter_or_else<T, A, E, P, F>(
    predicate: P,
    fallback: F,
    task: T,
) -> impl Future<Output = Result<A, E>> + Send
where
    T: Future<Output = Result<A, E>> + Send,
    P: Predicate<A>,
    F: FnOnce(&A) -> E + Send,
{
    task.map(move |result| {
        result.and_then(|value| {
            if predicate.check(&value) {
                Ok(value)
            } else {
                Err(fallback(&value))
            }
        })
    })
}

/// Discard the success value.
pub fn as_unit<T, A, E>(task: T) -> impl Future<Output = Result<(), E>> + Send
where
    T: Future<Output = Result<A, E>> + Send,
{
    task.map_ok(|_| ())
}

// ========== Eliminators ==========

/// Collapse to a single value with an async handler for each case.
pub fn fold<T, A, E, R, L, S, FutL, FutR>(
    on_left: L,
    on_right: S,
    task: T,
) -> impl Future<Output = R> + Send
where
    T: Future<Output = Result<A, E>> + Send,
    A: Send,
    E: Send,
    L: FnOnce(E) -> FutL + Send,
    S: FnOnce(A) -> FutR + Send,
    FutL: Future<Output = R> + Send,
    FutR: Future<Output = R> + Send,
{
    async move {
        match task.await {
            Ok(value) => on_right(value).await,
            Err(error) => on_left(error).await,
        }
    }
}

/// Extract the success value, awaiting `fallback` on failure.
pub fn get_or_else<T, A, E, F, Fut>(fallback: F, task: T) -> impl Future<Output = A> + Send
where
    T: Future<Output = Result<A, E>> + Send,
    A: Send,
    E: Send,
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = A> + Send,
{
    async move {
        match task.await {
            Ok(value) => value,
            Err(_) => fallback().await,
        }
    }
}

/// Recover from a failure with another task.
pub fn or_else<T, A, E, E2, F, Fut>(
    fallback: F,
    task: T,
) -> impl Future<Output = Result<A, E2>> + Send
where
    T: Future<Output = Result<A, E>> + Send,
    F: FnOnce(E) -> Fut + Send,
    Fut: Future<Output = Result<A, E2>> + Send,
{
    task.or_else(fallback)
}

// ========== Method syntax ==========

/// Chain helpers available as methods on every task.
///
/// Automatically implemented for all `Future<Output = Result<A, E>> + Send`.
pub trait TaskExt<A, E>: Future<Output = Result<A, E>> + Send + Sized {
    /// See [`tap`].
    fn tap<B, F, Fut>(self, f: F) -> impl Future<Output = Result<A, E>> + Send
    where
        A: Send,
        E: Send,
        F: FnOnce(&A) -> Fut + Send,
        Fut: Future<Output = Result<B, E>> + Send,
    {
        tap(f, self)
    }

    /// See [`bind_to`].
    fn bind_to<K>(self, name: K) -> impl Future<Output = Result<Record, E>> + Send
    where
        A: Any + Send + Sync,
        K: Into<FieldName>,
    {
        bind_to(name, self)
    }
}

impl<T, A, E> TaskExt<A, E> for T where T: Future<Output = Result<A, E>> + Send {}

/// Record-building methods on tasks producing a [`Record`].
///
/// Automatically implemented for all `Future<Output = Result<Record, E>> + Send`.
pub trait RecordTaskExt<E>: Future<Output = Result<Record, E>> + Send + Sized {
    /// See [`bind`].
    fn bind<K, V, F, Fut>(
        self,
        name: K,
        f: F,
    ) -> impl Future<Output = Result<Record, E>> + Send
    where
        E: Send,
        K: Into<FieldName>,
        V: Any + Send + Sync,
        F: FnOnce(&Record) -> Fut + Send,
        Fut: Future<Output = Result<V, E>> + Send,
    {
        bind(name, f, self)
    }

    /// See [`bind_widen`].
    fn bind_widen<E2, K, V, F, Fut>(
        self,
        name: K,
        f: F,
    ) -> impl Future<Output = Result<Record, E>> + Send
    where
        E: Send,
        E2: Into<E>,
        K: Into<FieldName>,
        V: Any + Send + Sync,
        F: FnOnce(&Record) -> Fut + Send,
        Fut: Future<Output = Result<V, E2>> + Send,
    {
        bind_widen(name, f, self)
    }

    /// See [`ap_s`].
    #[deprecated(
        since = "0.1.0",
        note = "use `Fields::merge_into` to resolve independent fields concurrently"
    )]
    #[allow(deprecated)]
    fn ap_s<'a, K, V, Fut>(
        self,
        name: K,
        computation: Fut,
    ) -> impl Future<Output = Result<Record, E>> + Send + 'a
    where
        Self: 'a,
        E: Send + 'a,
        K: Into<FieldName>,
        V: Any + Send + Sync,
        Fut: Future<Output = Result<V, E>> + Send + 'a,
    {
        ap_s(name, computation, self)
    }
}

impl<T, E> RecordTaskExt<E> for T where T: Future<Output = Result<Record, E>> + Send {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CallCounter;
    use std::sync::Arc;
    use std::time::Duration;

    async fn after<T>(ms: u64, value: T) -> Result<T, String> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(value)
    }

    async fn fail_after<T>(ms: u64, error: &str) -> Result<T, String> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Err(error.to_string())
    }

    #[tokio::test]
    async fn constructors_settle_immediately() {
        assert_eq!(right::<_, ()>(1).await, Ok(1));
        assert_eq!(left::<i32, _>("e").await, Err("e"));
        assert_eq!(from_result::<_, ()>(Ok(2)).await, Ok(2));
        assert_eq!(from_option(|| "none", Some(3)).await, Ok(3));
        assert_eq!(from_option(|| "none", None::<i32>).await, Err("none"));
        assert_eq!(from_predicate(|n: &i32| *n > 0, || "neg", 4).await, Ok(4));
        assert_eq!(from_predicate(|n: &i32| *n > 0, || "neg", -4).await, Err("neg"));
    }

    #[tokio::test]
    async fn bind_runs_steps_in_order() {
        let record = bind(
            "b",
            |r| {
                let a = *r.get::<i32>("a").unwrap();
                after(1, a * 2)
            },
            bind("a", |_| after(5, 21), start()),
        )
        .await
        .unwrap();

        assert_eq!(record.get::<i32>("b"), Some(&42));
    }

    #[tokio::test]
    async fn bind_skips_step_after_failure() {
        let counter = CallCounter::new();
        let step_counter = counter.clone();
        let result = bind(
            "b",
            move |_| {
                step_counter.hit();
                after(1, 2)
            },
            bind("a", |_| fail_after::<i32>(1, "a failed"), start()),
        )
        .await;

        assert_eq!(result.unwrap_err(), "a failed");
        assert_eq!(counter.count(), 0);
    }

    #[tokio::test]
    async fn bind_widen_converts_step_error() {
        #[derive(Debug, PartialEq)]
        struct Wide(String);

        impl From<String> for Wide {
            fn from(s: String) -> Self {
                Wide(s)
            }
        }

        let result = start::<Wide>()
            .bind_widen("a", |_| fail_after::<i32>(1, "narrow"))
            .await;
        assert_eq!(result.unwrap_err(), Wide("narrow".to_string()));
    }

    #[tokio::test]
    #[allow(deprecated)]
    async fn ap_s_merges_concurrent_field() {
        let record = start::<String>()
            .bind("a", |_| after(1, 1))
            .ap_s("b", after(1, 2))
            .await
            .unwrap();

        assert_eq!(record.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn bind_to_and_tap() {
        let record = right::<_, String>(5_u8).bind_to("n").await.unwrap();
        assert_eq!(record.get::<u8>("n"), Some(&5));

        let kept = right::<_, String>(5).tap(|_| after(1, "ignored")).await;
        assert_eq!(kept, Ok(5));

        let failed = right::<i32, String>(5)
            .tap(|_| fail_after::<()>(1, "side effect failed"))
            .await;
        assert_eq!(failed, Err("side effect failed".to_string()));
    }

    #[tokio::test]
    async fn as_side_effect_returns_input() {
        let counter = CallCounter::new();
        let effect_counter = counter.clone();
        let value = as_side_effect(
            move |n: &i32| {
                effect_counter.hit();
                right::<_, String>(*n * 100)
            },
            7,
        )
        .await;

        assert_eq!(value, Ok(7));
        assert_eq!(counter.count(), 1);
    }

    #[tokio::test]
    async fn sequence_array_keeps_input_order() {
        let values = sequence_array(vec![after(30, 1), after(1, 2), after(10, 3)]).await;
        assert_eq!(values, Ok(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn sequence_array_reports_first_failure_in_order() {
        let tasks = vec![
            after(1, 1).boxed(),
            fail_after(30, "second").boxed(),
            fail_after(1, "third").boxed(),
        ];
        assert_eq!(sequence_array(tasks).await, Err("second".to_string()));
    }

    #[tokio::test]
    async fn transformations() {
        assert_eq!(map(|n: i32| n + 1, right::<_, ()>(1)).await, Ok(2));
        assert_eq!(map_left(|e: &str| e.len(), left::<i32, _>("four")).await, Err(4));
        assert_eq!(
            flat_map(|n: i32| right::<_, ()>(n * 3), right::<_, ()>(2)).await,
            Ok(6)
        );
        assert_eq!(
            chain_result(|n: i32| if n > 0 { Ok(n) } else { Err("neg") }, right(-1)).await,
            Err("neg")
        );
        assert_eq!(as_unit(right::<_, ()>("x")).await, Ok(()));
    }

    #[tokio::test]
    async fn filter_or_else_checks_success_only() {
        let rejected = filter_or_else(
            |n: &i32| *n % 2 == 0,
            |n| format!("{} is odd", n),
            right::<_, String>(3),
        )
        .await;
        assert_eq!(rejected, Err("3 is odd".to_string()));

        let accepted = filter_or_else(
            |n: &i32| *n % 2 == 0,
            |n| format!("{} is odd", n),
            right::<_, String>(4),
        )
        .await;
        assert_eq!(accepted, Ok(4));
    }

    #[tokio::test]
    async fn eliminators() {
        let folded = fold(
            |e: String| async move { format!("error: {}", e) },
            |n: i32| async move { format!("value: {}", n) },
            right::<_, String>(1),
        )
        .await;
        assert_eq!(folded, "value: 1");

        assert_eq!(get_or_else(|| async { 0 }, left::<i32, _>("e")).await, 0);
        assert_eq!(get_or_else(|| async { 0 }, right::<_, ()>(9)).await, 9);

        let recovered = or_else(|_: &str| right::<_, ()>(5), left::<i32, _>("e")).await;
        assert_eq!(recovered, Ok(5));
    }

    #[tokio::test]
    async fn eliminators_run_on_spawned_tasks() {
        let folded = tokio::spawn(fold(
            |e: String| async move { e.len() },
            |n: usize| async move { n * 2 },
            after(5, 21_usize),
        ));
        let fallback = tokio::spawn(get_or_else(
            || async { "fallback".to_string() },
            fail_after::<String>(5, "missing"),
        ));

        assert_eq!(folded.await.unwrap(), 42);
        assert_eq!(fallback.await.unwrap(), "fallback");
    }

    #[tokio::test]
    #[allow(deprecated)]
    async fn ap_s_runs_alongside_incoming_task() {
        // The incoming task and the new field wait for each other.
        let barrier = Arc::new(tokio::sync::Barrier::new(2));
        let incoming = {
            let barrier = Arc::clone(&barrier);
            async move {
                barrier.wait().await;
                Ok::<_, String>(Record::new().with("a", 1))
            }
        };
        let field = {
            let barrier = Arc::clone(&barrier);
            async move {
                barrier.wait().await;
                Ok::<_, String>(2)
            }
        };

        let record = tokio::time::timeout(Duration::from_secs(5), ap_s("b", field, incoming))
            .await
            .expect("ap_s polled its inputs one after another")
            .unwrap();
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn sequence_array_starts_every_task() {
        let barrier = Arc::new(tokio::sync::Barrier::new(3));
        let tasks = (1..=3).map(|n| {
            let barrier = Arc::clone(&barrier);
            async move {
                barrier.wait().await;
                Ok::<_, String>(n)
            }
        });

        let values = tokio::time::timeout(Duration::from_secs(5), sequence_array(tasks))
            .await
            .expect("sequence_array awaited its tasks one at a time");
        assert_eq!(values, Ok(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn sequence_array_reports_middle_failure() {
        let values = sequence_array(vec![
            from_result(Ok(1)),
            from_result(Err("e")),
            from_result(Ok(3)),
        ])
        .await;
        assert_eq!(values, Err("e"));
    }

    #[tokio::test]
    async fn try_catch_maps_panics() {
        async fn explode() -> i32 {
            panic!("boom")
        }

        let caught = try_catch(explode, |p| panic_message(&p).map(str::to_string)).await;
        assert_eq!(caught, Err(Some("boom".to_string())));

        let fine = try_catch(|| async { 3 }, |_| ()).await;
        assert_eq!(fine, Ok(3));
    }

    #[test]
    fn panic_message_reads_strings() {
        let static_str: PanicPayload = Box::new("static");
        let owned: PanicPayload = Box::new(String::from("owned"));
        let other: PanicPayload = Box::new(42);

        assert_eq!(panic_message(&static_str), Some("static"));
        assert_eq!(panic_message(&owned), Some("owned"));
        assert_eq!(panic_message(&other), None);
    }
}
