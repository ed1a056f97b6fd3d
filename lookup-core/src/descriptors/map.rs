//! Type-to-descriptor selection

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{
    BoolDescriptor, EnumerableDescriptor, FloatDescriptor, IntegerDescriptor, NullDescriptor,
    ObjectDescriptor, StringDescriptor, TypeDescriptor,
};
use crate::types::Value;

/// Factory building the strategy for one value
pub type DescriptorFactory = Arc<dyn Fn(&Value) -> Box<dyn TypeDescriptor> + Send + Sync>;

/// Registry of descriptor strategies keyed by host type name.
///
/// Lookup walks the value's type hierarchy, most-derived first, so a
/// descriptor registered for a base type also covers its subtypes unless a
/// subtype has its own.
#[derive(Clone, Default)]
pub struct DescriptorMap {
    factories: HashMap<String, DescriptorFactory>,
}

impl DescriptorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one for `type_name`
    pub fn register<F>(&mut self, type_name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Value) -> Box<dyn TypeDescriptor> + Send + Sync + 'static,
    {
        self.factories.insert(type_name.into(), Arc::new(factory));
        self
    }

    pub fn with<F>(mut self, type_name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Value) -> Box<dyn TypeDescriptor> + Send + Sync + 'static,
    {
        self.register(type_name, factory);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Pick the strategy for `value`, falling back to a built-in by shape
    pub fn find_descriptor(&self, value: &Value) -> Box<dyn TypeDescriptor> {
        match value {
            Value::Null => Box::new(NullDescriptor),
            Value::Bool(v) => Box::new(BoolDescriptor(*v)),
            Value::Int(v) => Box::new(IntegerDescriptor(*v)),
            Value::Float(v) => Box::new(FloatDescriptor(*v)),
            Value::String(v) => Box::new(StringDescriptor(v.clone())),
            Value::List(_) => Box::new(EnumerableDescriptor::new(value)),
            Value::Object(object) => {
                let type_info = object.type_info();
                let registered = type_info
                    .ancestors()
                    .find_map(|ty| self.factories.get(ty.name()));
                match registered {
                    Some(factory) => factory(value),
                    None if object.items().is_some() => Box::new(EnumerableDescriptor::new(value)),
                    None => Box::new(ObjectDescriptor::new(value)),
                }
            }
        }
    }
}

impl fmt::Debug for DescriptorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&String> = self.factories.keys().collect();
        types.sort();
        f.debug_struct("DescriptorMap").field("types", &types).finish()
    }
}
