use serde_json::Value;

use super::{JsonBinder, JsonBindingError};

/// A binder between a JSON array and a [`Vec`].
///
/// When loading, the `set_size` callback is given the length of the JSON array.
/// It must validate the length and resize the vector to it, and then each element is loaded by the element binder.
/// When saving, each element is saved by the element binder. A discarded element is saved as `null`.
///
/// Errors from the element binder are annotated with the element position.
#[derive(Clone, Debug)]
pub struct Array<R, B> {
    set_size: R,
    element_binder: B,
}

impl<R, B> Array<R, B> {
    /// Create a new array binder.
    pub const fn new(set_size: R, element_binder: B) -> Self {
        Self {
            set_size,
            element_binder,
        }
    }
}

impl<T, R, B> JsonBinder<Vec<T>> for Array<R, B>
where
    R: Fn(&mut Vec<T>, usize) -> Result<(), JsonBindingError>,
    B: JsonBinder<T>,
{
    fn load(&self, obj: &mut Vec<T>, j: Option<&Value>) -> Result<(), JsonBindingError> {
        let Some(Value::Array(elements)) = j else {
            return Err(JsonBindingError::type_mismatch("array", j));
        };
        (self.set_size)(obj, elements.len())?;
        for (index, (element, j_element)) in obj.iter_mut().zip(elements).enumerate() {
            self.element_binder
                .load(element, Some(j_element))
                .map_err(|err| err.at_index(index))?;
        }
        Ok(())
    }

    fn save(&self, obj: &Vec<T>) -> Result<Option<Value>, JsonBindingError> {
        let elements = obj
            .iter()
            .enumerate()
            .map(|(index, element)| {
                self.element_binder
                    .save(element)
                    .map(|j| j.unwrap_or(Value::Null))
                    .map_err(|err| err.at_index(index))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Value::Array(elements)))
    }
}
