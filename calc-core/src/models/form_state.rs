use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;
use tracing::trace;

use super::calculator::CalculatorKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("'{field}' is not a field of {kind}; expected one of: {expected}")]
    UnknownField {
        kind: CalculatorKind,
        field: String,
        expected: String,
    },

    #[error("expected name=value, got '{0}'")]
    MalformedAssignment(String),
}

/// Raw, text-typed input values for one calculator page.
///
/// Every field of the page is present from construction onwards, so the
/// serialized payload always carries the full key set. Values are sent as
/// typed; nothing is parsed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    kind: CalculatorKind,
    values: HashMap<&'static str, String>,
}

impl FormState {
    pub fn with_defaults(kind: CalculatorKind) -> Self {
        let values = kind
            .fields()
            .iter()
            .map(|f| (f.name, f.default.to_string()))
            .collect();
        Self { kind, values }
    }

    pub fn kind(&self) -> CalculatorKind {
        self.kind
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replaces the value of `name`, leaving every other field untouched.
    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let spec = self
            .kind
            .field(name)
            .ok_or_else(|| FormError::UnknownField {
                kind: self.kind,
                field: name.to_string(),
                expected: self
                    .kind
                    .fields()
                    .iter()
                    .map(|f| f.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
        let value = value.into();
        trace!(page = self.kind.slug(), field = spec.name, %value, "field edited");
        self.values.insert(spec.name, value);
        Ok(())
    }

    /// Applies a `name=value` assignment, as given on the command line.
    pub fn apply_assignment(
        &mut self,
        assignment: &str,
    ) -> Result<(), FormError> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| FormError::MalformedAssignment(assignment.to_string()))?;
        self.set_field(name.trim(), value.trim())
    }

    pub fn reset(&mut self) {
        *self = Self::with_defaults(self.kind);
    }

    /// Field name and current value, in page order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.kind
            .fields()
            .iter()
            .map(|f| (f.name, self.get(f.name).unwrap_or_default()))
    }
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for FormState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{name:<20} {value}")?;
        }
        Ok(())
    }
}
