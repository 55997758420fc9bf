//! Synchronization scopes.

use std::fmt;

/// Sentinel entity type used by [`SyncScope::all`].
pub const ALL_ENTITY_TYPE: &str = "*";

/// A field/value pair restricting a scope to a subset of an entity type.
///
/// Used for partial replication, e.g. only the rows owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyncFilter {
    /// Field name the filter applies to.
    pub field: String,
    /// Value the field must match.
    pub value: String,
}

impl SyncFilter {
    /// Create a new filter.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for SyncFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

/// Identifies a unit of synchronization.
///
/// `entity_type` maps to a table or collection name. Two scopes are equal
/// only when both the entity type and the filter are equal, so a filtered
/// scope and the unfiltered scope of the same entity type are tracked
/// independently.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyncScope {
    entity_type: String,
    filter: Option<SyncFilter>,
}

impl SyncScope {
    /// Create an unfiltered scope for an entity type.
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            filter: None,
        }
    }

    /// Create a scope restricted by a filter.
    pub fn filtered(entity_type: impl Into<String>, filter: SyncFilter) -> Self {
        Self {
            entity_type: entity_type.into(),
            filter: Some(filter),
        }
    }

    /// The scope meaning "everything".
    pub fn all() -> Self {
        Self::new(ALL_ENTITY_TYPE)
    }

    /// Scope for a label received from the outside world.
    ///
    /// Blank labels and the sentinel resolve to [`SyncScope::all`].
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") | Some(ALL_ENTITY_TYPE) => Self::all(),
            Some(entity_type) => Self::new(entity_type),
        }
    }

    /// The entity type label.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// The filter, if any.
    pub fn filter(&self) -> Option<&SyncFilter> {
        self.filter.as_ref()
    }

    /// Whether this is the "everything" scope.
    pub fn is_all(&self) -> bool {
        self.filter.is_none() && self.entity_type == ALL_ENTITY_TYPE
    }
}

impl fmt::Display for SyncScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filter {
            Some(filter) => write!(f, "{}[{}]", self.entity_type, filter),
            None => write!(f, "{}", self.entity_type),
        }
    }
}

impl fmt::Debug for SyncScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SyncScope({})", self)
    }
}
