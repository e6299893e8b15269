// Field filtering for generic records

use crate::record::IndexValue;
use std::collections::HashMap;

/// Equality constraint on one indexed field
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field name to filter on
    pub field: String,
    /// Value the field must equal
    pub value: IndexValue,
}

impl Filter {
    pub fn equals(field: impl Into<String>, value: IndexValue) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }

    /// Check a record's indexed fields against this filter
    ///
    /// A record without the field never matches, and values of different
    /// types are never equal.
    pub fn matches(&self, fields: &HashMap<String, IndexValue>) -> bool {
        fields.get(&self.field) == Some(&self.value)
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.field, self.value)
    }
}

/// One filter dimension on a list screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterChoice {
    /// No constraint on this field
    #[default]
    All,
    Is(IndexValue),
}

impl FilterChoice {
    pub fn is_all(&self) -> bool {
        matches!(self, FilterChoice::All)
    }
}

impl From<Option<IndexValue>> for FilterChoice {
    fn from(value: Option<IndexValue>) -> Self {
        value.map_or(FilterChoice::All, FilterChoice::Is)
    }
}
