use serde_json::{Number, Value};

use super::{JsonBinder, JsonBindingError};
use crate::Index;

/// A binder for integers in the inclusive range `[min, max]`.
///
/// JSON numbers with an integral value (e.g. `2.0`) are accepted when loading.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Integer {
    min: Index,
    max: Index,
}

impl Integer {
    /// Create a new integer binder accepting values in `[min, max]`.
    #[must_use]
    pub const fn new(min: Index, max: Index) -> Self {
        Self { min, max }
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> Index {
        self.min
    }

    /// Returns the inclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> Index {
        self.max
    }

    fn expected(&self) -> String {
        format!("integer in the range [{}, {}]", self.min, self.max)
    }
}

/// An integral JSON number, which may not be representable as an [`Index`].
enum Integral<'a> {
    Index(Index),
    Unrepresentable(&'a Number),
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn as_integral(value: &Value) -> Option<Integral<'_>> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(value) = number.as_i64() {
        Some(Integral::Index(value))
    } else if number.is_u64() {
        Some(Integral::Unrepresentable(number))
    } else {
        let value = number.as_f64()?;
        if value.fract() != 0.0 {
            None
        } else if value >= Index::MIN as f64 && value < Index::MAX as f64 {
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
            Some(Integral::Index(value as Index))
        } else {
            Some(Integral::Unrepresentable(number))
        }
    }
}

impl JsonBinder<Index> for Integer {
    fn load(&self, obj: &mut Index, j: Option<&Value>) -> Result<(), JsonBindingError> {
        let out_of_range = |value: Number| JsonBindingError::IntegerOutOfRange {
            value,
            min: self.min,
            max: self.max,
        };
        match j.and_then(as_integral) {
            Some(Integral::Index(value)) if value < self.min || value > self.max => {
                Err(out_of_range(value.into()))
            }
            Some(Integral::Index(value)) => {
                *obj = value;
                Ok(())
            }
            Some(Integral::Unrepresentable(number)) => Err(out_of_range(number.clone())),
            None => Err(JsonBindingError::type_mismatch(self.expected(), j)),
        }
    }

    fn save(&self, obj: &Index) -> Result<Option<Value>, JsonBindingError> {
        Ok(Some(Value::from(*obj)))
    }
}
