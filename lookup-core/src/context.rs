//! Explicit inspection context
//!
//! Everything a build or search pass needs from its surroundings travels in
//! an `InspectionContext`: the descriptor map, and the document or session
//! the inspected values belong to.

use std::sync::Arc;

use crate::descriptors::DescriptorMap;
use crate::snoopable::SnoopableObject;
use crate::types::Value;

#[derive(Debug, Clone)]
pub struct InspectionContext {
    name: String,
    document: Option<Value>,
    descriptors: Arc<DescriptorMap>,
}

impl InspectionContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document: None,
            descriptors: Arc::new(DescriptorMap::new()),
        }
    }

    pub fn with_document(mut self, document: Value) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_descriptors(mut self, descriptors: DescriptorMap) -> Self {
        self.descriptors = Arc::new(descriptors);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The active document, if the caller supplied one
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    pub fn descriptors(&self) -> &DescriptorMap {
        &self.descriptors
    }

    /// Wrap a value for inspection in this context
    pub fn snoop(&self, value: Value) -> Arc<SnoopableObject> {
        Arc::new(SnoopableObject::new(self, value))
    }
}
