//! JSON object graphs as host objects
//!
//! Any JSON object is a host object. Reserved keys:
//! - `$type`: runtime type name (default `Object`)
//! - `$base`: base type name
//! - `$methods`: name -> result; `null` declares a void method and
//!   `{"$throws": "message"}` a method that fails when invoked
//! - `$events`: list of event names
//! - `$variants`: member name -> list of `{"value", "description"}`,
//!   answered through the resolver instead of reflection
//!
//! Every other key becomes a property.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use lookup_core::{
    DescriptorExtension, DescriptorMap, DescriptorResolver, ExtensionManager, HostObject,
    InspectionContext, MemberError, MemberInfo, MemberKind, ParameterInfo, TypeDescriptor,
    TypeInfo, Value, VariantSet,
};
use serde_json::{Map, Value as Json};

/// Root type every JSON object derives from
pub const JSON_ROOT_TYPE: &str = "JsonObject";

pub struct JsonObject {
    fields: Map<String, Json>,
    type_info: Arc<TypeInfo>,
}

impl JsonObject {
    pub fn new(fields: Map<String, Json>) -> Self {
        let type_info = type_info_for(&fields);
        Self { fields, type_info }
    }

    pub fn get(&self, key: &str) -> Option<&Json> {
        self.fields.get(key)
    }

    /// Non-reserved keys
    pub fn property_count(&self) -> usize {
        self.fields.keys().filter(|k| !k.starts_with('$')).count()
    }
}

impl HostObject for JsonObject {
    fn type_info(&self) -> Arc<TypeInfo> {
        Arc::clone(&self.type_info)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn type_info_for(fields: &Map<String, Json>) -> Arc<TypeInfo> {
    let root = TypeInfo::builder(JSON_ROOT_TYPE).build();
    let base = match fields.get("$base").and_then(Json::as_str) {
        Some(name) => TypeInfo::builder(name).base(root).build(),
        None => root,
    };
    let type_name = fields.get("$type").and_then(Json::as_str).unwrap_or("Object");
    let mut builder = TypeInfo::builder(type_name).base(base);

    for (key, value) in fields.iter().filter(|(k, _)| !k.starts_with('$')) {
        let name = key.clone();
        builder = builder.property(key, json_type_name(value), move |object: &JsonObject| {
            Ok(object.get(&name).map(to_value).unwrap_or(Value::Null))
        });
    }

    if let Some(methods) = fields.get("$methods").and_then(Json::as_object) {
        for (name, result) in methods {
            builder = builder.member(method_member(name, result));
        }
    }

    if let Some(events) = fields.get("$events").and_then(Json::as_array) {
        for event in events.iter().filter_map(Json::as_str) {
            builder = builder.event(event, "EventHandler");
        }
    }

    builder.build()
}

fn method_member(name: &str, result: &Json) -> MemberInfo {
    let member = MemberInfo::new(name, MemberKind::Method);
    if result.is_null() {
        return member.with_invoker(|_, _| Ok(Value::Null));
    }
    let result = result.clone();
    member
        .returns(json_type_name(&result))
        .with_invoker(move |_, _| match result.get("$throws").and_then(Json::as_str) {
            Some(message) => Err(MemberError::invocation(message)),
            None => Ok(to_value(&result)),
        })
}

fn json_type_name(value: &Json) -> &str {
    match value {
        Json::Null => "Object",
        Json::Bool(_) => "Boolean",
        Json::Number(n) if n.is_i64() => "Int64",
        Json::Number(_) => "Double",
        Json::String(_) => "String",
        Json::Array(_) => "List",
        Json::Object(map) => map.get("$type").and_then(Json::as_str).unwrap_or("Object"),
    }
}

/// Convert JSON into a core value, objects becoming host objects
pub fn to_value(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::List(items.iter().map(to_value).collect()),
        Json::Object(map) => Value::object(JsonObject::new(map.clone())),
    }
}

/// Load a JSON file as a host value
pub fn load_graph(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read object graph: {}", path.display()))?;
    let json: Json = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse object graph: {}", path.display()))?;
    Ok(to_value(&json))
}

/// Descriptor strategy for JSON host objects
pub struct JsonDescriptor {
    name: Option<String>,
    type_name: String,
    variants: Option<Map<String, Json>>,
    property_count: usize,
}

impl JsonDescriptor {
    pub fn new(value: &Value) -> Self {
        let object = value.downcast_ref::<JsonObject>();
        let name = object
            .and_then(|o| o.get("Name").or_else(|| o.get("name")))
            .and_then(Json::as_str)
            .map(str::to_string);
        let variants = object
            .and_then(|o| o.get("$variants"))
            .and_then(Json::as_object)
            .cloned();
        Self {
            name,
            type_name: value.type_name(),
            variants,
            property_count: object.map_or(0, JsonObject::property_count),
        }
    }
}

impl TypeDescriptor for JsonDescriptor {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn type_name(&self) -> String {
        self.type_name.clone()
    }

    fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.type_name.clone())
    }

    fn resolver(&self) -> Option<&dyn DescriptorResolver> {
        self.variants.as_ref().map(|_| self as &dyn DescriptorResolver)
    }

    fn extension(&self) -> Option<&dyn DescriptorExtension> {
        Some(self)
    }
}

impl DescriptorResolver for JsonDescriptor {
    fn resolve(
        &self,
        _context: &InspectionContext,
        target: &str,
        _parameters: &[ParameterInfo],
    ) -> Result<VariantSet, MemberError> {
        let Some(candidates) = self
            .variants
            .as_ref()
            .and_then(|v| v.get(target))
            .and_then(Json::as_array)
        else {
            return Ok(VariantSet::empty());
        };

        let mut variants = VariantSet::with_capacity(candidates.len());
        for candidate in candidates {
            let value = to_value(candidate.get("value").unwrap_or(&Json::Null));
            match candidate.get("description").and_then(Json::as_str) {
                Some(description) => variants.push_described(value, description),
                None => variants.push(value),
            };
        }
        Ok(variants)
    }
}

impl DescriptorExtension for JsonDescriptor {
    fn register_extensions(&self, manager: &mut ExtensionManager<'_>) {
        let count = self.property_count;
        manager.register("PropertyCount", move |_| Ok(Value::from(count)));
    }
}

/// Descriptor map covering every JSON host object
pub fn descriptor_map() -> DescriptorMap {
    DescriptorMap::new().with(JSON_ROOT_TYPE, |value| Box::new(JsonDescriptor::new(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookup_core::{build_descriptors, BuilderFlag, BuilderSettings, Descriptor};
    use serde_json::json;

    fn context() -> InspectionContext {
        InspectionContext::new("test").with_descriptors(descriptor_map())
    }

    fn build(json: Json, settings: BuilderSettings) -> Vec<Descriptor> {
        let context = context();
        let object = context.snoop(to_value(&json));
        build_descriptors(&context, &settings, &object)
    }

    #[test]
    fn test_json_types_and_hierarchy() {
        let value = to_value(&json!({"$type": "Wall", "$base": "Element", "Name": "North"}));
        let type_info = value.as_object().unwrap().type_info();
        let names: Vec<&str> = type_info.ancestors().map(TypeInfo::name).collect();
        assert_eq!(names, vec!["Wall", "Element", JSON_ROOT_TYPE]);

        let descriptor = descriptor_map().find_descriptor(&value);
        assert_eq!(descriptor.label(), "North");
        assert_eq!(descriptor.type_name(), "Wall");
    }

    #[test]
    fn test_properties_methods_and_failures() {
        let descriptors = build(
            json!({
                "$type": "Room",
                "Name": "Lobby",
                "Area": 42.5,
                "$methods": {
                    "GetLevel": "Level 1",
                    "Regenerate": null,
                    "GetPhase": {"$throws": "phase not loaded"}
                }
            }),
            BuilderSettings::default(),
        );

        let get = |name: &str| descriptors.iter().find(|d| d.name() == Some(name));
        assert_eq!(get("Area").unwrap().label(), "42.5");
        assert_eq!(get("GetLevel").unwrap().label(), "Level 1");
        assert!(get("GetPhase").unwrap().is_failed());
        assert!(get("Regenerate").is_none());
    }

    #[test]
    fn test_variants_from_json() {
        let descriptors = build(
            json!({
                "$type": "Wall",
                "$methods": {"GetMaterial": "unused"},
                "$variants": {
                    "GetMaterial": [
                        {"value": "Brick", "description": "Exterior"},
                        {"value": null, "description": "dropped"},
                        {"value": "Gypsum"}
                    ]
                }
            }),
            BuilderSettings::default(),
        );
        let materials: Vec<_> = descriptors
            .iter()
            .filter(|d| d.name() == Some("GetMaterial"))
            .map(|d| (d.label(), d.description()))
            .collect();
        assert_eq!(materials, vec![("Brick", Some("Exterior")), ("Gypsum", None)]);
    }

    #[test]
    fn test_property_count_extension() {
        let descriptors = build(
            json!({"$type": "Door", "Name": "Front", "Width": 0.9}),
            BuilderSettings::default().with(BuilderFlag::IncludeExtensions),
        );
        let count = descriptors
            .iter()
            .find(|d| d.name() == Some("PropertyCount"))
            .unwrap();
        assert_eq!(count.label(), "2");
    }

    #[test]
    fn test_load_graph_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        std::fs::write(&path, r#"[{"$type": "Wall"}, {"$type": "Door"}]"#).unwrap();

        let value = load_graph(&path).unwrap();
        assert_eq!(value.items().unwrap().len(), 2);

        let missing = load_graph(&dir.path().join("missing.json"));
        assert!(missing.is_err());
    }
}
