//! Lookup Core Library
//!
//! Runtime object inspection for host APIs:
//! - Host reflection surface (types, members, accessors)
//! - Descriptor model and per-type descriptor strategies
//! - Resolver and extension protocols for members reflection cannot answer
//! - The descriptor builder that walks an object's members
//! - Search over inspected objects and their members

pub mod builder;
pub mod context;
pub mod descriptors;
pub mod extensions;
pub mod reflect;
pub mod resolver;
pub mod search;
pub mod snoopable;
pub mod types;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use builder::{build_descriptors, build_static_descriptors, DescriptorBuilder};
pub use context::InspectionContext;
pub use descriptors::{DescriptorMap, TypeDescriptor};
pub use extensions::{DescriptorExtension, ExtensionManager, ExtensionResult};
pub use reflect::{MemberInfo, MemberKind, ParameterInfo, TypeInfo, TypeInfoBuilder, Visibility};
pub use resolver::DescriptorResolver;
pub use search::{search, search_members, search_objects, SearchOption, SearchRequest, SearchResults};
pub use snoopable::{MemberCache, SnoopableObject};
pub use types::{
    BuilderFlag, BuilderSettings, Descriptor, DescriptorKind, HostObject, MemberCategory,
    MemberError, ObjectRef, SettingsError, UnsupportedReason, Value, Variant, VariantError,
    VariantSet,
};
