//! Per-value descriptor strategies
//!
//! A `TypeDescriptor` decides how one value is named and labelled, and may
//! opt in to the resolver and extension capabilities. `DescriptorMap` picks
//! the strategy for a value.

mod map;
mod object;
mod primitives;

pub use map::*;
pub use object::*;
pub use primitives::*;

use crate::extensions::DescriptorExtension;
use crate::resolver::DescriptorResolver;

/// Strategy describing a single value.
///
/// Capabilities are opt-in: the defaults return `None`, so a plain
/// descriptor only supplies a label.
pub trait TypeDescriptor: Send + Sync {
    /// Display name of the value itself (an element name, not a member name)
    fn name(&self) -> Option<String> {
        None
    }

    /// Type name shown for the value
    fn type_name(&self) -> String;

    /// Human readable rendering of the value
    fn label(&self) -> String;

    /// Whether the builder should walk this value's members
    fn expandable(&self) -> bool {
        true
    }

    fn resolver(&self) -> Option<&dyn DescriptorResolver> {
        None
    }

    fn extension(&self) -> Option<&dyn DescriptorExtension> {
        None
    }
}
