use serde::{Deserialize, Serialize};

pub type EntityId = u32;

/// Conventional display label for an id: `Tenant_007`
pub fn tenant_label(id: EntityId) -> String {
    format!("Tenant_{:03}", id)
}

/// A tenant profile.
///
/// Values are stored positionally, aligned with the attribute order of the
/// schema the entity was built against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    id: EntityId,
    label: String,
    values: Box<[f64]>,
}

impl Entity {
    #[inline]
    #[must_use]
    pub fn new(id: EntityId, label: impl Into<String>, values: impl Into<Box<[f64]>>) -> Self {
        Self {
            id,
            label: label.into(),
            values: values.into(),
        }
    }

    /// Create an entity labelled with [`tenant_label`]
    #[inline]
    #[must_use]
    pub fn with_default_label(id: EntityId, values: impl Into<Box<[f64]>>) -> Self {
        Self::new(id, tenant_label(id), values)
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.values.len()
    }
}
