//! Host model shared by the unit tests: an `Element` base type with `Wall`
//! and `Door` subtypes, one Rust struct behind all three.

use std::any::Any;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::context::InspectionContext;
use crate::descriptors::{DescriptorMap, TypeDescriptor};
use crate::extensions::{DescriptorExtension, ExtensionManager};
use crate::reflect::{MemberInfo, MemberKind, ParameterInfo, TypeInfo};
use crate::resolver::DescriptorResolver;
use crate::types::{HostObject, MemberError, Value, VariantSet};

static NEXT_ID: AtomicI64 = AtomicI64::new(1000);

pub(crate) struct Element {
    pub id: i64,
    pub name: String,
    pub width: f64,
    type_info: Arc<TypeInfo>,
}

impl HostObject for Element {
    fn type_info(&self) -> Arc<TypeInfo> {
        Arc::clone(&self.type_info)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub(crate) fn element_type() -> Arc<TypeInfo> {
    TypeInfo::builder("Element")
        .field("mark", "String", |_: &Element| Ok(Value::from("M-1")))
        .property("Id", "Int64", |e: &Element| Ok(Value::Int(e.id)))
        .property("Name", "String", |e: &Element| Ok(Value::from(e.name.as_str())))
        .property("Category", "String", |_: &Element| Ok(Value::from("Generic")))
        .property("Location", "Location", |_: &Element| {
            Err(MemberError::invocation("element has no location"))
        })
        .property("Panics", "Int64", |_: &Element| -> Result<Value, MemberError> {
            panic!("accessor panicked")
        })
        .member(
            MemberInfo::new("Secret", MemberKind::Property)
                .private()
                .returns("Int32")
                .with_invoker(|_, _| Ok(Value::Int(1))),
        )
        .static_property("InvalidId", "Int64", || Ok(Value::Int(-1)))
        .method("Flip", None, |_: &Element| Ok(Value::Null))
        .method_with(
            "GetBoundingBox",
            "BoundingBoxXYZ",
            &[("view", "View")],
            |_: &Element, _| Ok(Value::Null),
        )
        .member(
            MemberInfo::new("get_Name", MemberKind::Method)
                .special_name()
                .returns("String")
                .with_invoker(|_, _| Ok(Value::from("hidden"))),
        )
        .event("Changed", "EventHandler")
        .build()
}

pub(crate) fn wall_type() -> Arc<TypeInfo> {
    TypeInfo::builder("Wall")
        .base(element_type())
        .property("Category", "String", |_: &Element| Ok(Value::from("Walls")))
        .property("Width", "Double", |e: &Element| Ok(Value::Float(e.width)))
        .property("Orientation", "XYZ", |_: &Element| Ok(Value::from("0,1,0")))
        .method_with("GetLayer", "String", &[("index", "Int32")], |_: &Element, _| {
            Ok(Value::Null)
        })
        .build()
}

pub(crate) fn door_type() -> Arc<TypeInfo> {
    TypeInfo::builder("Door")
        .base(element_type())
        .property("Width", "Double", |e: &Element| Ok(Value::Float(e.width)))
        .build()
}

fn element(name: &str, width: f64, type_info: Arc<TypeInfo>) -> Value {
    Value::object(Element {
        id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        name: name.to_string(),
        width,
        type_info,
    })
}

pub(crate) fn wall(name: &str, width: f64) -> Value {
    element(name, width, wall_type())
}

pub(crate) fn door(name: &str) -> Value {
    element(name, 0.9, door_type())
}

/// Names an element after its `Name`
pub(crate) struct ElementDescriptor {
    name: Option<String>,
    type_name: String,
}

impl ElementDescriptor {
    pub fn new(value: &Value) -> Self {
        Self {
            name: value.downcast_ref::<Element>().map(|e| e.name.clone()),
            type_name: value.type_name(),
        }
    }
}

impl TypeDescriptor for ElementDescriptor {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn type_name(&self) -> String {
        self.type_name.clone()
    }

    fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.type_name.clone())
    }
}

/// Wall strategy with a resolver and extensions
pub(crate) struct WallDescriptor {
    element: ElementDescriptor,
    width: f64,
}

impl WallDescriptor {
    pub fn new(value: &Value) -> Self {
        Self {
            element: ElementDescriptor::new(value),
            width: value.downcast_ref::<Element>().map_or(0.0, |e| e.width),
        }
    }
}

impl TypeDescriptor for WallDescriptor {
    fn name(&self) -> Option<String> {
        self.element.name()
    }

    fn type_name(&self) -> String {
        self.element.type_name()
    }

    fn label(&self) -> String {
        self.element.label()
    }

    fn resolver(&self) -> Option<&dyn DescriptorResolver> {
        Some(self)
    }

    fn extension(&self) -> Option<&dyn DescriptorExtension> {
        Some(self)
    }
}

impl DescriptorResolver for WallDescriptor {
    fn resolve(
        &self,
        _context: &InspectionContext,
        target: &str,
        _parameters: &[ParameterInfo],
    ) -> Result<VariantSet, MemberError> {
        match target {
            "GetLayer" => Ok(VariantSet::with_capacity(2)
                .add_described("Brick", "Exterior")
                .add_described("Gypsum", "Interior")),
            "Orientation" => Err(MemberError::host("orientation unavailable")),
            _ => Ok(VariantSet::empty()),
        }
    }
}

impl DescriptorExtension for WallDescriptor {
    fn register_extensions(&self, manager: &mut ExtensionManager<'_>) {
        let width = self.width;
        manager
            .register("Host", |_| Err(MemberError::host("wall is not hosted")))
            .register("Area", move |_| Ok(Value::Float(width * 3.0)));
    }
}

pub(crate) fn fixture_map() -> DescriptorMap {
    DescriptorMap::new()
        .with("Element", |value| Box::new(ElementDescriptor::new(value)))
        .with("Wall", |value| Box::new(WallDescriptor::new(value)))
}

pub(crate) fn fixture_context() -> InspectionContext {
    InspectionContext::new("fixture").with_descriptors(fixture_map())
}
