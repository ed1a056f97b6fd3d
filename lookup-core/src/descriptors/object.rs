//! Fallback descriptors for host objects and collections

use super::TypeDescriptor;
use crate::types::Value;

/// Default strategy for a host object with no registered descriptor
pub struct ObjectDescriptor {
    type_name: String,
}

impl ObjectDescriptor {
    pub fn new(value: &Value) -> Self {
        Self {
            type_name: value.type_name(),
        }
    }
}

impl TypeDescriptor for ObjectDescriptor {
    fn type_name(&self) -> String {
        self.type_name.clone()
    }

    fn label(&self) -> String {
        self.type_name.clone()
    }
}

/// Strategy for lists and collection-shaped host objects
pub struct EnumerableDescriptor {
    type_name: String,
    count: usize,
}

impl EnumerableDescriptor {
    pub fn new(value: &Value) -> Self {
        Self {
            type_name: value.type_name(),
            count: value.items().map_or(0, |items| items.len()),
        }
    }
}

impl TypeDescriptor for EnumerableDescriptor {
    fn type_name(&self) -> String {
        self.type_name.clone()
    }

    fn label(&self) -> String {
        match self.count {
            0 => format!("{} (empty)", self.type_name),
            1 => format!("{} (1 item)", self.type_name),
            n => format!("{} ({} items)", self.type_name, n),
        }
    }
}
