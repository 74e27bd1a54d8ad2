//! JSON binders for arrays indexed by dimension.
//!
//! The length of a dimension-indexed array is limited by [`MAX_RANK`](crate::MAX_RANK) and, when loading, is unified across fields by a shared [`RankConstraint`].
//!
//! ### Example
//! ```rust
//! # use serde_json::json;
//! # use zarrs_json_binding::{
//! #     dimension_indexed::{DimensionLabelVector, ShapeVector},
//! #     json_binding::JsonBinder,
//! #     rank::RankConstraint,
//! # };
//! let rank = RankConstraint::new();
//! let mut shape = vec![];
//! let mut labels = vec![];
//! ShapeVector::new(Some(&rank)).load(&mut shape, Some(&json!([2, 3, 4])))?;
//! DimensionLabelVector::new(Some(&rank)).load(&mut labels, None)?;
//! assert_eq!(rank.get(), Some(3));
//! assert_eq!(labels, vec![""; 3]);
//! # Ok::<_, zarrs_json_binding::json_binding::JsonBindingError>(())
//! ```

use itertools::Itertools;
use serde_json::Value;

use crate::{
    config::global_config,
    json_binding::{Array, DefaultBinder, Integer, JsonBinder, JsonBindingError},
    rank::{validate_rank, RankConstraint},
    Index,
};

/// A binder for a dimension-indexed [`Vec`] with elements bound by `B`.
///
/// When loading and `rank` is not [`None`], the array length must equal the rank if it is fixed, otherwise the rank is fixed to the array length.
/// The rank is ignored when saving.
#[derive(Clone, Debug)]
pub struct DimensionIndexedVector<'a, B = DefaultBinder> {
    rank: Option<&'a RankConstraint>,
    element_binder: B,
}

impl<'a, B> DimensionIndexedVector<'a, B> {
    /// Create a new dimension-indexed vector binder.
    pub const fn new(rank: Option<&'a RankConstraint>, element_binder: B) -> Self {
        Self {
            rank,
            element_binder,
        }
    }
}

fn skip_resize<T>(_: &mut Vec<T>, _: usize) -> Result<(), JsonBindingError> {
    Ok(())
}

impl<T: Default, B: JsonBinder<T>> JsonBinder<Vec<T>> for DimensionIndexedVector<'_, B> {
    fn load(&self, obj: &mut Vec<T>, j: Option<&Value>) -> Result<(), JsonBindingError> {
        let rank = self.rank;
        Array::new(
            |obj: &mut Vec<T>, size: usize| -> Result<(), JsonBindingError> {
                match rank {
                    Some(rank) => rank.constrain(size)?,
                    None => validate_rank(size)?,
                }
                obj.resize_with(size, T::default);
                Ok(())
            },
            &self.element_binder,
        )
        .load(obj, j)
    }

    fn save(&self, obj: &Vec<T>) -> Result<Option<Value>, JsonBindingError> {
        Array::new(skip_resize::<T>, &self.element_binder).save(obj)
    }
}

/// A binder for a dimension-indexed shape, where each element is an integer in `[0, max_size]`.
#[derive(Clone, Debug)]
pub struct ShapeVector<'a>(DimensionIndexedVector<'a, Integer>);

impl<'a> ShapeVector<'a> {
    /// Create a new shape binder with the [shape max size](crate::config::Config#shape-max-size) of the global configuration.
    ///
    /// # Panics
    /// Panics if the global configuration lock has been poisoned.
    #[must_use]
    pub fn new(rank: Option<&'a RankConstraint>) -> Self {
        Self::with_max_size(rank, global_config().shape_max_size())
    }

    /// Create a new shape binder with elements in `[0, max_size]`.
    #[must_use]
    pub const fn with_max_size(rank: Option<&'a RankConstraint>, max_size: Index) -> Self {
        Self(DimensionIndexedVector::new(rank, Integer::new(0, max_size)))
    }
}

impl JsonBinder<Vec<Index>> for ShapeVector<'_> {
    fn load(&self, obj: &mut Vec<Index>, j: Option<&Value>) -> Result<(), JsonBindingError> {
        self.0.load(obj, j)
    }

    fn save(&self, obj: &Vec<Index>) -> Result<Option<Value>, JsonBindingError> {
        self.0.save(obj)
    }
}

/// A binder for a dimension-indexed chunk shape, where each element is an integer in `[1, max_size]`.
///
/// Unlike an array extent, a chunk extent cannot be zero.
#[derive(Clone, Debug)]
pub struct ChunkShapeVector<'a>(DimensionIndexedVector<'a, Integer>);

impl<'a> ChunkShapeVector<'a> {
    /// Create a new chunk shape binder with the [chunk shape max size](crate::config::Config#chunk-shape-max-size) of the global configuration.
    ///
    /// # Panics
    /// Panics if the global configuration lock has been poisoned.
    #[must_use]
    pub fn new(rank: Option<&'a RankConstraint>) -> Self {
        Self::with_max_size(rank, global_config().chunk_shape_max_size())
    }

    /// Create a new chunk shape binder with elements in `[1, max_size]`.
    #[must_use]
    pub const fn with_max_size(rank: Option<&'a RankConstraint>, max_size: Index) -> Self {
        Self(DimensionIndexedVector::new(rank, Integer::new(1, max_size)))
    }
}

impl JsonBinder<Vec<Index>> for ChunkShapeVector<'_> {
    fn load(&self, obj: &mut Vec<Index>, j: Option<&Value>) -> Result<(), JsonBindingError> {
        self.0.load(obj, j)
    }

    fn save(&self, obj: &Vec<Index>) -> Result<Option<Value>, JsonBindingError> {
        self.0.save(obj)
    }
}

/// A binder for dimension labels, where each label is empty or a unique non-empty string.
///
/// When loading with a fixed rank, a discarded JSON value loads `rank` empty labels.
/// When saving, a discarded JSON value is returned if all labels are empty.
#[derive(Clone, Debug)]
pub struct DimensionLabelVector<'a> {
    rank: Option<&'a RankConstraint>,
}

impl<'a> DimensionLabelVector<'a> {
    /// Create a new dimension label binder.
    #[must_use]
    pub const fn new(rank: Option<&'a RankConstraint>) -> Self {
        Self { rank }
    }
}

impl JsonBinder<Vec<String>> for DimensionLabelVector<'_> {
    fn load(&self, obj: &mut Vec<String>, j: Option<&Value>) -> Result<(), JsonBindingError> {
        match (self.rank.and_then(RankConstraint::get), j) {
            (Some(rank), None) => {
                tracing::debug!(rank, "dimension labels unspecified, using empty labels");
                obj.clear();
                obj.resize(rank, String::new());
            }
            _ => DimensionIndexedVector::new(self.rank, DefaultBinder).load(obj, j)?,
        }
        validate_labels_are_unique(obj.as_slice())
    }

    fn save(&self, obj: &Vec<String>) -> Result<Option<Value>, JsonBindingError> {
        if obj.iter().all(String::is_empty) {
            tracing::debug!("dimension labels are all empty, omitting");
            return Ok(None);
        }
        DimensionIndexedVector::new(None, DefaultBinder).save(obj)
    }
}

/// Validate that each non-empty label in `labels` is unique.
///
/// # Errors
/// Returns [`JsonBindingError::DuplicateLabel`] with the first repeated label.
pub fn validate_labels_are_unique<S: AsRef<str>>(labels: &[S]) -> Result<(), JsonBindingError> {
    match labels
        .iter()
        .map(AsRef::as_ref)
        .filter(|label| !label.is_empty())
        .duplicates()
        .next()
    {
        Some(label) => Err(JsonBindingError::DuplicateLabel(label.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{json_binding::JsonBindingErrorKind, DEFAULT_MAX_SIZE, MAX_RANK};

    #[test]
    fn dimension_indexed_vector_fixes_rank() {
        for size in 0..=MAX_RANK {
            let rank = RankConstraint::new();
            let mut v: Vec<u32> = vec![];
            let j = Value::Array(vec![json!(1); size]);
            DimensionIndexedVector::new(Some(&rank), DefaultBinder)
                .load(&mut v, Some(&j))
                .unwrap();
            assert_eq!(v.len(), size);
            assert_eq!(rank.get(), Some(size));
        }
    }

    #[test]
    fn dimension_indexed_vector_length_mismatch() {
        for (size1, size2) in [(0, 1), (3, 2), (2, 3)] {
            let rank = RankConstraint::new();
            let binder = DimensionIndexedVector::new(Some(&rank), DefaultBinder);
            let mut a: Vec<u32> = vec![];
            let mut b: Vec<u32> = vec![];
            binder
                .load(&mut a, Some(&Value::Array(vec![json!(1); size1])))
                .unwrap();
            let err = binder
                .load(&mut b, Some(&Value::Array(vec![json!(1); size2])))
                .unwrap_err();
            assert_eq!(
                err,
                JsonBindingError::LengthMismatch {
                    expected: size1,
                    actual: size2
                }
            );
        }
    }

    #[test]
    fn dimension_indexed_vector_max_rank() {
        let mut v: Vec<u32> = vec![];
        let j = Value::Array(vec![json!(1); MAX_RANK + 1]);
        let err = DimensionIndexedVector::new(None, DefaultBinder)
            .load(&mut v, Some(&j))
            .unwrap_err();
        assert_eq!(err, JsonBindingError::RankOutOfRange(MAX_RANK + 1));

        let rank = RankConstraint::new();
        assert!(DimensionIndexedVector::new(Some(&rank), DefaultBinder)
            .load(&mut v, Some(&j))
            .is_err());
        assert!(!rank.is_fixed());
    }

    #[test]
    fn dimension_indexed_vector_type_mismatch() {
        let rank = RankConstraint::new();
        let mut v: Vec<u32> = vec![];
        let binder = DimensionIndexedVector::new(Some(&rank), DefaultBinder);
        for j in [json!(1), json!("a"), json!({"a": [1]})] {
            let err = binder.load(&mut v, Some(&j)).unwrap_err();
            assert_eq!(err.kind(), JsonBindingErrorKind::TypeMismatch);
        }
        assert!(!rank.is_fixed());
    }

    #[test]
    fn dimension_indexed_vector_save_ignores_rank() {
        let rank = RankConstraint::fixed(1).unwrap();
        let v: Vec<u32> = vec![1, 2, 3];
        let j = DimensionIndexedVector::new(Some(&rank), DefaultBinder)
            .save(&v)
            .unwrap();
        assert_eq!(j, Some(json!([1, 2, 3])));
    }

    #[test]
    fn shape_vector_bounds() {
        let mut shape = vec![];
        let binder = ShapeVector::with_max_size(None, 10);
        binder
            .load(&mut shape, Some(&json!([0, 10, 5])))
            .unwrap();
        assert_eq!(shape, vec![0, 10, 5]);
        for (j, index, value) in [(json!([1, 11]), 1, 11i64), (json!([-1]), 0, -1)] {
            let err = binder.load(&mut shape, Some(&j)).unwrap_err();
            assert_eq!(err.kind(), JsonBindingErrorKind::OutOfRange);
            assert_eq!(err.index(), Some(index));
            assert_eq!(
                err.root_cause(),
                &JsonBindingError::IntegerOutOfRange {
                    value: value.into(),
                    min: 0,
                    max: 10
                }
            );
        }
    }

    #[test]
    fn shape_vector_default_max_size() {
        let mut shape = vec![];
        let binder = ShapeVector::with_max_size(None, DEFAULT_MAX_SIZE);
        binder
            .load(&mut shape, Some(&json!([DEFAULT_MAX_SIZE])))
            .unwrap();
        assert!(binder
            .load(&mut shape, Some(&json!([Index::MAX])))
            .is_err());
    }

    #[test]
    fn chunk_shape_vector_bounds() {
        let mut chunk_shape = vec![];
        let binder = ChunkShapeVector::with_max_size(None, 10);
        binder.load(&mut chunk_shape, Some(&json!([1]))).unwrap();
        assert_eq!(chunk_shape, vec![1]);
        let err = binder.load(&mut chunk_shape, Some(&json!([0]))).unwrap_err();
        assert_eq!(err.kind(), JsonBindingErrorKind::OutOfRange);
        let err = binder.load(&mut chunk_shape, Some(&json!([11]))).unwrap_err();
        assert_eq!(err.kind(), JsonBindingErrorKind::OutOfRange);
    }

    #[test]
    fn dimension_labels_omitted_with_fixed_rank() {
        let rank = RankConstraint::fixed(3).unwrap();
        let mut labels = vec!["a".to_string()];
        DimensionLabelVector::new(Some(&rank))
            .load(&mut labels, None)
            .unwrap();
        assert_eq!(labels, vec![""; 3]);
    }

    #[test]
    fn dimension_labels_omitted_without_rank() {
        let mut labels = vec![];
        let err = DimensionLabelVector::new(None)
            .load(&mut labels, None)
            .unwrap_err();
        assert_eq!(err.kind(), JsonBindingErrorKind::TypeMismatch);

        let rank = RankConstraint::new();
        let err = DimensionLabelVector::new(Some(&rank))
            .load(&mut labels, None)
            .unwrap_err();
        assert_eq!(err.kind(), JsonBindingErrorKind::TypeMismatch);
    }

    #[test]
    fn dimension_labels_unique() {
        let mut labels = vec![];
        let binder = DimensionLabelVector::new(None);
        binder.load(&mut labels, Some(&json!(["x", ""]))).unwrap();
        assert_eq!(labels, vec!["x", ""]);
        binder.load(&mut labels, Some(&json!(["", ""]))).unwrap();
        let err = binder
            .load(&mut labels, Some(&json!(["x", "x"])))
            .unwrap_err();
        assert_eq!(err, JsonBindingError::DuplicateLabel("x".to_string()));
        assert_eq!(err.to_string(), r#"Dimension label "x" not unique"#);
    }

    #[test]
    fn dimension_labels_rank() {
        let rank = RankConstraint::fixed(2).unwrap();
        let mut labels = vec![];
        let err = DimensionLabelVector::new(Some(&rank))
            .load(&mut labels, Some(&json!(["x", "y", "z"])))
            .unwrap_err();
        assert_eq!(err.kind(), JsonBindingErrorKind::LengthMismatch);

        let rank = RankConstraint::new();
        DimensionLabelVector::new(Some(&rank))
            .load(&mut labels, Some(&json!(["x", "y", "z"])))
            .unwrap();
        assert_eq!(rank.get(), Some(3));
    }

    #[test]
    fn dimension_labels_element_type() {
        let mut labels = vec![];
        let err = DimensionLabelVector::new(None)
            .load(&mut labels, Some(&json!(["x", 1])))
            .unwrap_err();
        assert_eq!(err.kind(), JsonBindingErrorKind::TypeMismatch);
        assert_eq!(err.index(), Some(1));
    }

    #[test]
    fn dimension_labels_save() {
        let binder = DimensionLabelVector::new(None);
        assert_eq!(binder.save(&vec![String::new(); 3]).unwrap(), None);
        assert_eq!(binder.save(&vec![]).unwrap(), None);
        assert_eq!(
            binder
                .save(&vec!["x".to_string(), String::new()])
                .unwrap(),
            Some(json!(["x", ""]))
        );
    }

    #[test]
    fn labels_are_unique() {
        assert!(validate_labels_are_unique::<&str>(&[]).is_ok());
        assert!(validate_labels_are_unique(&["", "", "a", "b"]).is_ok());
        assert_eq!(
            validate_labels_are_unique(&["a", "b", "", "b", "a"]),
            Err(JsonBindingError::DuplicateLabel("b".to_string()))
        );
    }
}
