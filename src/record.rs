//! Immutable records assembled one named field at a time.
//!
//! A [`Record`] is what a chain produces: an insertion-ordered mapping from a
//! field name to a value of any `'static` type. Every step of a chain takes the
//! record built so far and returns a new one with one more field, so a record
//! handed to a step can never change behind its back.
//!
//! Values are stored type-erased and shared, which keeps cloning a record cheap
//! (one reference count per field) no matter what the fields hold. Reading a
//! field back names the type you expect:
//!
//! ```rust
//! use pipewell::Record;
//!
//! let record = Record::new()
//!     .with("id", 7_u64)
//!     .with("name", "ada".to_string());
//!
//! assert_eq!(record.get::<u64>("id"), Some(&7));
//! assert_eq!(record.get::<String>("name").map(String::as_str), Some("ada"));
//! assert_eq!(record.get::<i32>("id"), None); // wrong type
//! assert_eq!(record.names().collect::<Vec<_>>(), vec!["id", "name"]);
//! ```
//!
//! # Duplicate names
//!
//! Adding a field whose name is already present replaces the earlier value and
//! keeps the original position. Nothing is reported to the caller; with the
//! `tracing` feature enabled the overwrite is logged at debug level.
//!
//! ```rust
//! use pipewell::record;
//!
//! let record = record! { "a" => 1, "b" => 2, "a" => 3 };
//! assert_eq!(record.get::<i32>("a"), Some(&3));
//! assert_eq!(record.names().collect::<Vec<_>>(), vec!["a", "b"]);
//! ```

use std::any::{type_name, Any};
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Name of a record field.
pub type FieldName = Cow<'static, str>;

/// Type-erased, shared field value.
pub(crate) type FieldValue = Arc<dyn Any + Send + Sync>;

/// An immutable, insertion-ordered collection of named values.
///
/// See the [module documentation](self) for an overview.
#[derive(Clone, Default)]
pub struct Record {
    fields: Vec<(FieldName, FieldValue)>,
}

impl Record {
    /// Create a record with no fields.
    ///
    /// This is the value every chain starts from.
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Return this record with `name` set to `value`.
    ///
    /// An existing field with the same name is overwritten in place.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipewell::Record;
    ///
    /// let base = Record::new().with("x", 1);
    /// let extended = base.clone().with("y", 2);
    ///
    /// assert_eq!(base.len(), 1);
    /// assert_eq!(extended.len(), 2);
    /// ```
    pub fn with<K, V>(self, name: K, value: V) -> Self
    where
        K: Into<FieldName>,
        V: Any + Send + Sync,
    {
        self.with_value(name.into(), Arc::new(value))
    }

    pub(crate) fn with_value(mut self, name: FieldName, value: FieldValue) -> Self {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(field = %name, "overwriting record field");
                slot.1 = value;
            }
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Return this record with every field of `other` added, in order.
    ///
    /// Fields of `other` win over fields of `self` with the same name.
    pub fn merge(self, other: Record) -> Self {
        other
            .fields
            .into_iter()
            .fold(self, |record, (name, value)| record.with_value(name, value))
    }

    /// Borrow the value of field `name` if it exists and holds a `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.try_get(name).ok()
    }

    /// Borrow the value of field `name`, explaining why it is unavailable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipewell::{Record, RecordError};
    ///
    /// let record = Record::new().with("age", 42_u8);
    ///
    /// assert_eq!(record.try_get::<u8>("age"), Ok(&42));
    /// assert_eq!(
    ///     record.try_get::<u8>("name"),
    ///     Err(RecordError::Missing { name: "name".to_string() })
    /// );
    /// assert!(matches!(
    ///     record.try_get::<String>("age"),
    ///     Err(RecordError::TypeMismatch { .. })
    /// ));
    /// ```
    pub fn try_get<T: Any>(&self, name: &str) -> Result<&T, RecordError> {
        let (_, value) = self
            .fields
            .iter()
            .find(|(existing, _)| existing == name)
            .ok_or_else(|| RecordError::Missing {
                name: name.to_string(),
            })?;

        let value: &(dyn Any + Send + Sync) = &**value;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| RecordError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Returns `true` if a field called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(existing, _)| existing == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|(name, _)| name.as_ref())
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("fields", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Why a field could not be read from a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// No field with this name exists.
    Missing {
        /// The requested field name.
        name: String,
    },
    /// The field exists but holds a value of another type.
    TypeMismatch {
        /// The requested field name.
        name: String,
        /// Name of the type the caller asked for.
        expected: &'static str,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Missing { name } => write!(f, "record has no field `{}`", name),
            RecordError::TypeMismatch { name, expected } => {
                write!(f, "record field `{}` does not hold a `{}`", name, expected)
            }
        }
    }
}

impl StdError for RecordError {}

/// Build a [`Record`] from `name => value` pairs.
///
/// # Example
///
/// ```rust
/// use pipewell::record;
///
/// let empty = record! {};
/// assert!(empty.is_empty());
///
/// let user = record! { "id" => 1_u32, "admin" => false };
/// assert_eq!(user.get::<bool>("admin"), Some(&false));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::Record::new()$(.with($name, $value))+
    };
}
