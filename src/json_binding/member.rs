use serde_json::{Map, Value};

use super::{JsonBinder, JsonBindingError};

/// A binder for a named member of a JSON object.
///
/// An absent member is passed to the inner binder as a discarded value, and a discarded save result omits the member.
/// Errors are annotated with the member name.
#[derive(Clone, Debug)]
pub struct Member<'n, B> {
    name: &'n str,
    binder: B,
}

impl<'n, B> Member<'n, B> {
    /// Create a new member binder for the member `name`.
    pub const fn new(name: &'n str, binder: B) -> Self {
        Self { name, binder }
    }

    /// Returns the member name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name
    }

    /// Load `obj` from the member of `object`.
    ///
    /// # Errors
    /// Returns a [`JsonBindingError::Member`] if the inner binder fails.
    pub fn load<T: ?Sized>(
        &self,
        obj: &mut T,
        object: &Map<String, Value>,
    ) -> Result<(), JsonBindingError>
    where
        B: JsonBinder<T>,
    {
        self.binder
            .load(obj, object.get(self.name))
            .map_err(|err| err.at_member(self.name))
    }

    /// Save `obj` as the member of `object`.
    ///
    /// # Errors
    /// Returns a [`JsonBindingError::Member`] if the inner binder fails.
    pub fn save<T: ?Sized>(
        &self,
        obj: &T,
        object: &mut Map<String, Value>,
    ) -> Result<(), JsonBindingError>
    where
        B: JsonBinder<T>,
    {
        if let Some(value) = self
            .binder
            .save(obj)
            .map_err(|err| err.at_member(self.name))?
        {
            object.insert(self.name.to_string(), value);
        }
        Ok(())
    }
}

/// A binder for an [`Option`], where [`None`] corresponds to a discarded JSON value.
#[derive(Clone, Debug)]
pub struct Optional<B>(pub B);

impl<T: Default, B: JsonBinder<T>> JsonBinder<Option<T>> for Optional<B> {
    fn load(&self, obj: &mut Option<T>, j: Option<&Value>) -> Result<(), JsonBindingError> {
        if j.is_none() {
            *obj = None;
            return Ok(());
        }
        let mut value = T::default();
        self.0.load(&mut value, j)?;
        *obj = Some(value);
        Ok(())
    }

    fn save(&self, obj: &Option<T>) -> Result<Option<Value>, JsonBindingError> {
        match obj {
            Some(value) => self.0.save(value),
            None => Ok(None),
        }
    }
}
