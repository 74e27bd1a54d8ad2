//! Array schema metadata.
//!
//! An example `JSON` document for an array schema:
//! ```json
//! {
//!     "shape": [10000, 1000],
//!     "chunk_shape": [1000, 100],
//!     "labels": ["rows", "columns"]
//! }
//! ```
//!
//! `chunk_shape` is optional and `labels` may be omitted if all labels are empty.
//! Any other members are preserved as additional fields.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    dimension_indexed::{ChunkShapeVector, DimensionLabelVector, ShapeVector},
    json_binding::{JsonBindingError, Member, Optional},
    rank::RankConstraint,
    Index,
};

const SHAPE: &str = "shape";
const CHUNK_SHAPE: &str = "chunk_shape";
const LABELS: &str = "labels";
const MEMBERS: [&str; 3] = [SHAPE, CHUNK_SHAPE, LABELS];

/// Array schema metadata.
///
/// All dimension-indexed fields share a single rank, fixed by `shape`.
#[derive(Clone, Eq, PartialEq, Debug, Default, Display)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct ArraySchemaMetadata {
    /// The extent of each dimension.
    pub shape: Vec<Index>,
    /// The chunk extent of each dimension.
    pub chunk_shape: Option<Vec<Index>>,
    /// The label of each dimension. An empty label is unspecified.
    pub labels: Vec<String>,
    /// Additional fields.
    pub additional_fields: Map<String, Value>,
}

impl ArraySchemaMetadata {
    /// Create new array schema metadata with no chunk shape and empty labels.
    #[must_use]
    pub fn new(shape: Vec<Index>) -> Self {
        let labels = vec![String::new(); shape.len()];
        Self {
            shape,
            chunk_shape: None,
            labels,
            additional_fields: Map::new(),
        }
    }

    /// Set the chunk shape.
    #[must_use]
    pub fn with_chunk_shape(mut self, chunk_shape: Vec<Index>) -> Self {
        self.chunk_shape = Some(chunk_shape);
        self
    }

    /// Set the dimension labels.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the additional fields.
    ///
    /// Additional fields named `shape`, `chunk_shape` or `labels` are ignored when saving.
    #[must_use]
    pub fn with_additional_fields(mut self, additional_fields: Map<String, Value>) -> Self {
        self.additional_fields = additional_fields;
        self
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Load array schema metadata from JSON.
    ///
    /// Members are bound in the order `shape`, `chunk_shape`, `labels`, so the rank is fixed by `shape`.
    ///
    /// # Errors
    /// Returns a [`JsonBindingError`] if `value` is not a JSON object or any member is invalid.
    pub fn from_json(value: &Value) -> Result<Self, JsonBindingError> {
        let object = value
            .as_object()
            .ok_or_else(|| JsonBindingError::type_mismatch("object", Some(value)))?;

        let rank = RankConstraint::new();
        let mut metadata = Self::default();
        Member::new(SHAPE, ShapeVector::new(Some(&rank))).load(&mut metadata.shape, object)?;
        Member::new(CHUNK_SHAPE, Optional(ChunkShapeVector::new(Some(&rank))))
            .load(&mut metadata.chunk_shape, object)?;
        Member::new(LABELS, DimensionLabelVector::new(Some(&rank)))
            .load(&mut metadata.labels, object)?;
        metadata.additional_fields = object
            .iter()
            .filter(|(name, _)| !MEMBERS.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Ok(metadata)
    }

    /// Save array schema metadata as JSON.
    ///
    /// # Errors
    /// Returns a [`JsonBindingError`] if a field cannot be represented as JSON.
    pub fn to_json(&self) -> Result<Value, JsonBindingError> {
        let mut object = Map::new();
        Member::new(SHAPE, ShapeVector::new(None)).save(&self.shape, &mut object)?;
        Member::new(CHUNK_SHAPE, Optional(ChunkShapeVector::new(None)))
            .save(&self.chunk_shape, &mut object)?;
        Member::new(LABELS, DimensionLabelVector::new(None)).save(&self.labels, &mut object)?;
        object.extend(
            self.additional_fields
                .iter()
                .filter(|(name, _)| !MEMBERS.contains(&name.as_str()))
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        Ok(Value::Object(object))
    }

    /// Serialize the metadata as a pretty-printed String of JSON.
    #[must_use]
    pub fn to_string_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl TryFrom<&str> for ArraySchemaMetadata {
    type Error = serde_json::Error;

    fn try_from(metadata_json: &str) -> Result<Self, Self::Error> {
        serde_json::from_str::<Self>(metadata_json)
    }
}

impl Serialize for ArraySchemaMetadata {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self.to_json() {
            Ok(value) => value.serialize(s),
            Err(err) => Err(serde::ser::Error::custom(err)),
        }
    }
}

impl<'de> Deserialize<'de> for ArraySchemaMetadata {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}
