//! Bidirectional JSON binders.
//!
//! A binder converts between a native value and a [`serde_json::Value`] in both directions.
//! Loading and saving are separate operations of [`JsonBinder`], each with their own contract.
//!
//! A *discarded* JSON value represents an absent (unspecified) value, such as an object member that is not present.
//! It is `None` as the input of [`JsonBinder::load`] and as the output of [`JsonBinder::save`].

mod array;
mod error;
mod integer;
mod member;

pub use array::Array;
pub use error::{JsonBindingError, JsonBindingErrorKind};
pub use integer::Integer;
pub use member::{Member, Optional};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// A bidirectional binder between a native value of type `T` and JSON.
pub trait JsonBinder<T: ?Sized> {
    /// Load `obj` from the JSON value `j`, which is `None` if discarded.
    ///
    /// # Errors
    /// Returns a [`JsonBindingError`] if `j` is not a valid JSON representation of `T`.
    /// `obj` may be partially modified on error.
    fn load(&self, obj: &mut T, j: Option<&Value>) -> Result<(), JsonBindingError>;

    /// Save `obj` as JSON, returning `None` if the JSON value is discarded.
    ///
    /// # Errors
    /// Returns a [`JsonBindingError`] if `obj` cannot be represented as JSON.
    fn save(&self, obj: &T) -> Result<Option<Value>, JsonBindingError>;
}

impl<T: ?Sized, B: JsonBinder<T> + ?Sized> JsonBinder<T> for &B {
    fn load(&self, obj: &mut T, j: Option<&Value>) -> Result<(), JsonBindingError> {
        (**self).load(obj, j)
    }

    fn save(&self, obj: &T) -> Result<Option<Value>, JsonBindingError> {
        (**self).save(obj)
    }
}

/// The default binder, converting any [`serde`] serializable and deserializable type.
///
/// A discarded JSON value is not accepted when loading.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultBinder;

impl<T: Serialize + DeserializeOwned> JsonBinder<T> for DefaultBinder {
    fn load(&self, obj: &mut T, j: Option<&Value>) -> Result<(), JsonBindingError> {
        let expected = || format!("value of type {}", std::any::type_name::<T>());
        let value = j.ok_or_else(|| JsonBindingError::type_mismatch(expected(), None))?;
        *obj = T::deserialize(value)
            .map_err(|_| JsonBindingError::type_mismatch(expected(), Some(value)))?;
        Ok(())
    }

    fn save(&self, obj: &T) -> Result<Option<Value>, JsonBindingError> {
        serde_json::to_value(obj).map(Some).map_err(|err| {
            JsonBindingError::TypeMismatch {
                expected: "value representable as JSON".to_string(),
                received: err.to_string(),
            }
        })
    }
}
