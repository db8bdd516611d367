//! Resolve a labeled set of independent async computations at once.
//!
//! [`Fields`] collects named computations that do not depend on each other,
//! polls all of them concurrently, and merges the successful values into a
//! [`Record`] in the order the fields were declared. Completion order never
//! affects which value lands in which field.
//!
//! Every computation runs to completion even when another one fails; the
//! reported failure is the first one in declaration order.
//!
//! # Example
//!
//! ```rust
//! use pipewell::Fields;
//!
//! # tokio_test::block_on(async {
//! let profile = Fields::new()
//!     .field("user", async { Ok::<_, String>("ada".to_string()) })
//!     .field("posts", async { Ok(3_usize) })
//!     .resolve()
//!     .await
//!     .unwrap();
//!
//! assert_eq!(profile.get::<String>("user").unwrap(), "ada");
//! assert_eq!(profile.get::<usize>("posts"), Some(&3));
//! # });
//! ```

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture};
use futures::{FutureExt, TryFutureExt};

use crate::record::{FieldName, FieldValue, Record};

/// A pending set of named, independent computations.
pub struct Fields<'a, E> {
    pending: Vec<(FieldName, BoxFuture<'a, Result<FieldValue, E>>)>,
}

impl<'a, E: Send + 'a> Fields<'a, E> {
    /// Create an empty set.
    pub fn new() -> Self {
        Fields {
            pending: Vec::new(),
        }
    }

    /// Add a computation whose success value is stored under `name`.
    ///
    /// Nothing runs until the set is resolved.
    pub fn field<K, V, Fut>(mut self, name: K, computation: Fut) -> Self
    where
        K: Into<FieldName>,
        V: Any + Send + Sync,
        Fut: Future<Output = Result<V, E>> + Send + 'a,
    {
        let value = computation
            .map_ok(|value| Arc::new(value) as FieldValue)
            .boxed();
        self.pending.push((name.into(), value));
        self
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no field was declared.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Run every computation concurrently and collect the values into a new
    /// record.
    pub async fn resolve(self) -> Result<Record, E> {
        self.merge_into(future::ready(Ok(Record::new()))).await
    }

    /// Run every computation concurrently with `input`, then add the values
    /// to the record `input` produces.
    ///
    /// A failure of `input` wins over any field failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipewell::{task, Fields};
    ///
    /// # tokio_test::block_on(async {
    /// let base = task::start::<String>();
    /// let record = Fields::new()
    ///     .field("a", async { Ok(1) })
    ///     .merge_into(base)
    ///     .await
    ///     .unwrap();
    ///
    /// assert_eq!(record.get::<i32>("a"), Some(&1));
    /// # });
    /// ```
    pub async fn merge_into<I>(self, input: I) -> Result<Record, E>
    where
        I: Future<Output = Result<Record, E>>,
    {
        let (record, values) = futures::join!(input, self.settle());
        let record = record?;

        values
            .into_iter()
            .try_fold(record, |record, (name, value)| {
                value.map(|value| record.with_value(name, value))
            })
    }

    async fn settle(self) -> Vec<(FieldName, Result<FieldValue, E>)> {
        let (names, pending): (Vec<_>, Vec<_>) = self.pending.into_iter().unzip();

        #[cfg(feature = "tracing")]
        tracing::trace!(fields = names.len(), "resolving fields concurrently");

        let values = future::join_all(pending).await;
        names.into_iter().zip(values).collect()
    }
}

impl<'a, E: Send + 'a> Default for Fields<'a, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Fields<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fields")
            .field(
                "pending",
                &self.pending.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    async fn empty_set_resolves_to_empty_record() {
        let record = Fields::<String>::new().resolve().await.unwrap();
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn keeps_declaration_order_regardless_of_completion() {
        let record = Fields::new()
            .field("slow", after(30, "slow"))
            .field("fast", after(1, "fast"))
            .resolve()
            .await
            .unwrap();

        assert_eq!(record.names().collect::<Vec<_>>(), vec!["slow", "fast"]);
        assert_eq!(record.get::<&str>("slow"), Some(&"slow"));
        assert_eq!(record.get::<&str>("fast"), Some(&"fast"));
    }

    #[tokio::test]
    async fn runs_fields_concurrently() {
        // Each field waits for the other; sequential polling would never finish.
        let barrier = tokio::sync::Barrier::new(2);
        let fields = Fields::<String>::new()
            .field("a", async {
                barrier.wait().await;
                Ok(1)
            })
            .field("b", async {
                barrier.wait().await;
                Ok(2)
            });

        let record = tokio::time::timeout(Duration::from_secs(5), fields.resolve())
            .await
            .expect("fields did not run concurrently")
            .unwrap();
        assert_eq!(record.len(), 2);
    }

    #[tokio::test]
    async fn merge_into_polls_input_alongside_fields() {
        let barrier = tokio::sync::Barrier::new(2);
        let input = async {
            barrier.wait().await;
            Ok::<_, String>(Record::new().with("base", 0))
        };
        let merged = Fields::new()
            .field("extra", async {
                barrier.wait().await;
                Ok(1)
            })
            .merge_into(input);

        let record = tokio::time::timeout(Duration::from_secs(5), merged)
            .await
            .expect("input and fields did not run concurrently")
            .unwrap();
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["base", "extra"]);
    }

    #[tokio::test]
    async fn reports_first_declared_failure() {
        let result = Fields::new()
            .field("a", after(1, 1))
            .field("b", fail_after::<i32>(20, "b failed"))
            .field("c", fail_after::<i32>(1, "c failed"))
            .resolve()
            .await;

        assert_eq!(result.unwrap_err(), "b failed");
    }

    #[tokio::test]
    async fn input_failure_wins() {
        let result = Fields::new()
            .field("a", fail_after::<i32>(1, "field"))
            .merge_into(async { Err::<Record, _>("input".to_string()) })
            .await;

        assert_eq!(result.unwrap_err(), "input");
    }

    #[tokio::test]
    async fn merge_into_overwrites_duplicate_names() {
        let input = async { Ok::<_, String>(Record::new().with("a", 1).with("b", 2)) };
        let record = Fields::new()
            .field("a", after(1, 10))
            .merge_into(input)
            .await
            .unwrap();

        assert_eq!(record.get::<i32>("a"), Some(&10));
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn debug_lists_pending_names() {
        let fields = Fields::<()>::new()
            .field("x", async { Ok(1) })
            .field("y", async { Ok(2) });
        assert_eq!(fields.len(), 2);
        assert_eq!(format!("{:?}", fields), r#"Fields { pending: ["x", "y"] }"#);
    }
}
