//! Text rendering of descriptor trees

use std::fmt::Write;
use std::sync::Arc;

use anyhow::{bail, Result};
use lookup_core::{BuilderSettings, Descriptor, DescriptorKind, InspectionContext, SnoopableObject};

const INDENT: usize = 2;

/// Follow member names from `root`, one per dot-separated segment
///
/// List elements are named `[index]`, so `Rooms.[0].Name` reaches the first
/// room's name.
pub fn navigate(
    context: &InspectionContext,
    settings: &BuilderSettings,
    root: Arc<SnoopableObject>,
    path: &str,
) -> Result<Arc<SnoopableObject>> {
    let mut current = root;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let members = current.members(context, settings);
        let next = members
            .iter()
            .find(|d| d.name() == Some(segment))
            .and_then(Descriptor::object)
            .cloned();
        match next {
            Some(object) => current = object,
            None => bail!("No member '{}' on {}", segment, current.label()),
        }
    }
    Ok(current)
}

/// Render `object` and its members down to `depth` levels
pub fn render_tree(
    context: &InspectionContext,
    settings: &BuilderSettings,
    object: &SnoopableObject,
    depth: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", object.label(), object.type_name());
    render_members(context, settings, object, depth, INDENT, &mut out);
    out
}

fn render_members(
    context: &InspectionContext,
    settings: &BuilderSettings,
    object: &SnoopableObject,
    depth: usize,
    indent: usize,
    out: &mut String,
) {
    if depth == 0 || !object.is_expandable() {
        return;
    }
    for descriptor in object.members(context, settings).iter() {
        let _ = writeln!(out, "{:indent$}{}", "", format_descriptor(descriptor), indent = indent);
        if let Some(child) = descriptor.object() {
            render_members(context, settings, child, depth - 1, indent + INDENT, out);
        }
    }
}

/// One line for a descriptor
pub fn format_descriptor(descriptor: &Descriptor) -> String {
    let name = descriptor.name().unwrap_or_default();
    let mut line = match descriptor.kind() {
        DescriptorKind::Separator => return format!("-- {} --", descriptor.label()),
        DescriptorKind::Value => {
            format!("{}: {} [{}]", name, descriptor.label(), descriptor.type_name())
        }
        DescriptorKind::Unsupported(_) => format!("{}: <{}>", name, descriptor.label()),
        DescriptorKind::Failed(_) => format!("{}: ! {}", name, descriptor.label()),
    };
    if let Some(description) = descriptor.description() {
        let _ = write!(line, " - {}", description);
    }
    if let Some(timing) = descriptor.timing() {
        let _ = write!(line, " ({:?})", timing);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{descriptor_map, to_value};
    use serde_json::json;

    fn context() -> InspectionContext {
        InspectionContext::new("render").with_descriptors(descriptor_map())
    }

    fn building() -> serde_json::Value {
        json!({
            "$type": "Building",
            "Name": "Office",
            "Rooms": [
                {"$type": "Room", "Name": "Lobby", "Area": 40},
                {"$type": "Room", "Name": "Kitchen", "Area": 12}
            ],
            "$methods": {"GetPhase": {"$throws": "phase not loaded"}}
        })
    }

    #[test]
    fn test_render_tree_with_depth() {
        let context = context();
        let settings = BuilderSettings::default();
        let root = context.snoop(to_value(&building()));

        let shallow = render_tree(&context, &settings, &root, 1);
        assert!(shallow.starts_with("Office (Building)\n"));
        assert!(shallow.contains("  -- Properties --"));
        assert!(shallow.contains("  Rooms: List (2 items) [List]"));
        assert!(shallow.contains("  GetPhase: ! "));
        assert!(!shallow.contains("Lobby"));

        let deep = render_tree(&context, &settings, &root, 2);
        assert!(deep.contains("    [0]: Lobby [Room]"));
    }

    #[test]
    fn test_navigate_path() {
        let context = context();
        let settings = BuilderSettings::default();
        let root = context.snoop(to_value(&building()));

        let kitchen = navigate(&context, &settings, Arc::clone(&root), "Rooms.[1]").unwrap();
        assert_eq!(kitchen.label(), "Kitchen");

        let area = navigate(&context, &settings, Arc::clone(&root), "Rooms.[0].Area").unwrap();
        assert_eq!(area.label(), "40");

        assert!(navigate(&context, &settings, root, "Rooms.Missing").is_err());
    }

    #[test]
    fn test_format_separator() {
        let line = format_descriptor(&Descriptor::separator(lookup_core::MemberCategory::Fields));
        assert_eq!(line, "-- Fields --");
    }
}
