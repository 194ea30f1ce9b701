// ABOUTME: Typed access to the JSON arguments of a requested field
// ABOUTME: Missing, null, and wrong-typed values become INVALID_ARGUMENT failures

use super::failure::{FieldFailure, FieldResult};
use serde_json::{Map, Value};

/// Arguments of one field
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    field: &'a str,
    values: &'a Map<String, Value>,
}

impl<'a> Arguments<'a> {
    /// Wrap the raw argument map of `field`
    #[must_use]
    pub const fn new(field: &'a str, values: &'a Map<String, Value>) -> Self {
        Self { field, values }
    }

    /// Reject arguments the field does not declare
    ///
    /// # Errors
    ///
    /// Returns an `INVALID_ARGUMENT` failure naming the first unknown argument
    pub fn check_known(&self, accepted: &[&str]) -> FieldResult<()> {
        match self.values.keys().find(|k| !accepted.contains(&k.as_str())) {
            Some(unknown) => Err(FieldFailure::invalid_argument(format!(
                "Unknown argument '{unknown}' on field '{}'",
                self.field
            ))),
            None => Ok(()),
        }
    }

    /// A string argument that must be present and non-null
    ///
    /// # Errors
    ///
    /// Returns an `INVALID_ARGUMENT` failure if absent, null, or not a string
    pub fn required_str(&self, name: &str) -> FieldResult<&'a str> {
        self.optional_str(name)?.ok_or_else(|| {
            FieldFailure::invalid_argument(format!(
                "Field '{}' argument '{name}' of type 'String!' is required",
                self.field
            ))
        })
    }

    /// A string argument where absent and null both mean "not supplied"
    ///
    /// # Errors
    ///
    /// Returns an `INVALID_ARGUMENT` failure if present but not a string
    pub fn optional_str(&self, name: &str) -> FieldResult<Option<&'a str>> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.wrong_type(name, "String", other)),
        }
    }

    /// A list of strings that must be present
    ///
    /// # Errors
    ///
    /// Returns an `INVALID_ARGUMENT` failure if absent, not a list, or any
    /// element is not a string
    pub fn required_str_list(&self, name: &str) -> FieldResult<Vec<&'a str>> {
        match self.values.get(name) {
            None | Some(Value::Null) => Err(FieldFailure::invalid_argument(format!(
                "Field '{}' argument '{name}' of type '[ID]!' is required",
                self.field
            ))),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| self.wrong_type(name, "[ID]", item))
                })
                .collect(),
            Some(other) => Err(self.wrong_type(name, "[ID]", other)),
        }
    }

    fn wrong_type(&self, name: &str, expected: &str, found: &Value) -> FieldFailure {
        FieldFailure::invalid_argument(format!(
            "Field '{}' argument '{name}' expected {expected}, found {found}",
            self.field
        ))
    }
}
