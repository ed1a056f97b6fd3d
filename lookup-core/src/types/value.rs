//! Opaque values handed to the inspection core

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::reflect::TypeInfo;

/// Shared reference to a live host object
pub type ObjectRef = Arc<dyn HostObject>;

/// A live object owned by the host API.
///
/// The core never looks inside a host object directly; it only reads the
/// runtime `TypeInfo` and calls the member accessors declared there.
pub trait HostObject: Send + Sync {
    /// Runtime type of this object
    fn type_info(&self) -> Arc<TypeInfo>;

    /// Used by member accessors to downcast back to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Elements of the object when it is a collection
    fn items(&self) -> Option<Vec<Value>> {
        None
    }
}

/// Any value the core can describe
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Object(ObjectRef),
}

impl Value {
    /// Wrap a host object
    pub fn object<T: HostObject + 'static>(object: T) -> Self {
        Value::Object(Arc::new(object))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for a list, or a collection-shaped host object, with no elements
    pub fn is_empty_collection(&self) -> bool {
        match self {
            Value::List(items) => items.is_empty(),
            Value::Object(object) => object.items().is_some_and(|items| items.is_empty()),
            _ => false,
        }
    }

    /// Elements of a collection value, `None` for scalars and plain objects
    pub fn items(&self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items.clone()),
            Value::Object(object) => object.items(),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Downcast a host object value to its concrete type
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.as_object()?.as_any().downcast_ref::<T>()
    }

    /// Runtime type name used when no declared type is known
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "Null".to_string(),
            Value::Bool(_) => "Boolean".to_string(),
            Value::Int(_) => "Int64".to_string(),
            Value::Float(_) => "Double".to_string(),
            Value::String(_) => "String".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Object(object) => object.type_info().name().to_string(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(value) => write!(f, "Bool({})", value),
            Value::Int(value) => write!(f, "Int({})", value),
            Value::Float(value) => write!(f, "Float({})", value),
            Value::String(value) => write!(f, "String({:?})", value),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Object(object) => write!(f, "Object({})", object.type_info().name()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
