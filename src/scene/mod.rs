pub mod batch;
pub mod environment;

use slotmap::{SlotMap, new_key_type};

use crate::model::ModelInstance;

pub use batch::{DrawCommand, SceneBatch};
pub use environment::Environment;

new_key_type! {
    /// Stable key of one model instance within a [`Scene`].
    pub struct ModelKey;
}

/// Container of live model instances.
///
/// Pure data layer: stores instances under stable keys and hands the
/// set to [`SceneBatch::build`] for ordering. Holds no GPU state and no
/// cross-frame caches.
#[derive(Debug, Default)]
pub struct Scene {
    pub models: SlotMap<ModelKey, ModelInstance>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_model(&mut self, instance: ModelInstance) -> ModelKey {
        self.models.insert(instance)
    }

    pub fn remove_model(&mut self, key: ModelKey) -> Option<ModelInstance> {
        self.models.remove(key)
    }

    #[must_use]
    pub fn model(&self, key: ModelKey) -> Option<&ModelInstance> {
        self.models.get(key)
    }

    #[must_use]
    pub fn model_mut(&mut self, key: ModelKey) -> Option<&mut ModelInstance> {
        self.models.get_mut(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
