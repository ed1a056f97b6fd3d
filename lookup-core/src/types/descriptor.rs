//! Descriptor nodes produced by a build pass

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::{MemberError, UnsupportedReason};
use crate::reflect::MemberKind;
use crate::snoopable::SnoopableObject;

/// Output group of a build pass, in the order groups are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberCategory {
    Items,
    Fields,
    Properties,
    Methods,
    Events,
    Extensions,
}

impl MemberCategory {
    pub const ALL: [MemberCategory; 6] = [
        MemberCategory::Items,
        MemberCategory::Fields,
        MemberCategory::Properties,
        MemberCategory::Methods,
        MemberCategory::Events,
        MemberCategory::Extensions,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            MemberCategory::Items => "Items",
            MemberCategory::Fields => "Fields",
            MemberCategory::Properties => "Properties",
            MemberCategory::Methods => "Methods",
            MemberCategory::Events => "Events",
            MemberCategory::Extensions => "Extensions",
        }
    }
}

impl From<MemberKind> for MemberCategory {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Field => MemberCategory::Fields,
            MemberKind::Property => MemberCategory::Properties,
            MemberKind::Method => MemberCategory::Methods,
            MemberKind::Event => MemberCategory::Events,
        }
    }
}

/// What a descriptor node stands for
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptorKind {
    /// An evaluated value
    Value,
    /// Group header preceding a non-empty category
    Separator,
    /// Member skipped by policy but shown because unsupported members are included
    Unsupported(UnsupportedReason),
    /// Member whose evaluation failed
    Failed(MemberError),
}

/// One inspectable fact about an object.
///
/// Immutable once built. Descriptors order by ordinal comparison of their
/// label and nothing else.
#[derive(Clone)]
pub struct Descriptor {
    name: Option<String>,
    type_name: String,
    label: String,
    description: Option<String>,
    category: Option<MemberCategory>,
    kind: DescriptorKind,
    object: Option<Arc<SnoopableObject>>,
    timing: Option<Duration>,
}

impl Descriptor {
    /// Describe an evaluated member value
    pub fn value(
        name: impl Into<String>,
        type_name: impl Into<String>,
        object: Arc<SnoopableObject>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            type_name: type_name.into(),
            label: object.label(),
            description: None,
            category: None,
            kind: DescriptorKind::Value,
            object: Some(object),
            timing: None,
        }
    }

    pub fn separator(category: MemberCategory) -> Self {
        Self {
            name: None,
            type_name: String::new(),
            label: category.title().to_string(),
            description: None,
            category: Some(category),
            kind: DescriptorKind::Separator,
            object: None,
            timing: None,
        }
    }

    pub fn unsupported(
        name: impl Into<String>,
        type_name: impl Into<String>,
        reason: UnsupportedReason,
    ) -> Self {
        Self {
            name: Some(name.into()),
            type_name: type_name.into(),
            label: reason.to_string(),
            description: None,
            category: None,
            kind: DescriptorKind::Unsupported(reason),
            object: None,
            timing: None,
        }
    }

    pub fn failed(name: impl Into<String>, type_name: impl Into<String>, error: MemberError) -> Self {
        Self {
            name: Some(name.into()),
            type_name: type_name.into(),
            label: error.to_string(),
            description: None,
            category: None,
            kind: DescriptorKind::Failed(error),
            object: None,
            timing: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_category(mut self, category: MemberCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_timing(mut self, timing: Option<Duration>) -> Self {
        self.timing = timing;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Disambiguation text when a member produced several variants
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> Option<MemberCategory> {
        self.category
    }

    pub fn kind(&self) -> &DescriptorKind {
        &self.kind
    }

    /// The described value, when it can be inspected further
    pub fn object(&self) -> Option<&Arc<SnoopableObject>> {
        self.object.as_ref()
    }

    pub fn timing(&self) -> Option<Duration> {
        self.timing
    }

    pub fn error(&self) -> Option<&MemberError> {
        match &self.kind {
            DescriptorKind::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self.kind, DescriptorKind::Separator)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.kind, DescriptorKind::Failed(_))
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for Descriptor {}

impl PartialOrd for Descriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Descriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label.cmp(&other.label)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("label", &self.label)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("kind", &self.kind)
            .field("timing", &self.timing)
            .finish()
    }
}
