//! Synthetic host objects for the lookup benchmarks

use std::any::Any;
use std::sync::Arc;

use lookup_core::{HostObject, InspectionContext, MemberError, SnoopableObject, TypeInfo, Value};

pub struct Sample {
    index: i64,
    name: String,
    type_info: Arc<TypeInfo>,
}

impl HostObject for Sample {
    fn type_info(&self) -> Arc<TypeInfo> {
        Arc::clone(&self.type_info)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type with `properties` readable properties, one failing property, a
/// parameterized method and a nested list
pub fn sample_type(properties: usize) -> Arc<TypeInfo> {
    let base = TypeInfo::builder("SampleBase")
        .property("Name", "String", |s: &Sample| Ok(Value::from(s.name.as_str())))
        .property("Broken", "String", |_: &Sample| {
            Err(MemberError::invocation("not available"))
        })
        .build();

    let mut builder = TypeInfo::builder("Sample").base(base);
    for i in 0..properties {
        let factor = i as i64;
        builder = builder.property(&format!("Property{:03}", i), "Int64", move |s: &Sample| {
            Ok(Value::from(s.index * factor))
        });
    }
    builder
        .property("Children", "List", |s: &Sample| {
            Ok(Value::from((0..5).map(|i| Value::from(s.index + i)).collect::<Vec<_>>()))
        })
        .method_with("Lookup", "String", &[("key", "String")], |_: &Sample, _| {
            Ok(Value::Null)
        })
        .build()
}

/// `count` samples sharing one type
pub fn samples(count: usize, properties: usize) -> Vec<Value> {
    let type_info = sample_type(properties);
    (0..count)
        .map(|i| {
            Value::object(Sample {
                index: i as i64,
                name: format!("Sample_{}", i),
                type_info: Arc::clone(&type_info),
            })
        })
        .collect()
}

pub fn snoop_all(context: &InspectionContext, values: Vec<Value>) -> Vec<Arc<SnoopableObject>> {
    values.into_iter().map(|v| context.snoop(v)).collect()
}
