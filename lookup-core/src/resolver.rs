//! Custom member resolution
//!
//! Host APIs are full of members plain reflection cannot evaluate: methods
//! that need an argument, overloads with several meaningful answers, values
//! that depend on the active document. A descriptor that knows the type can
//! answer those members itself by implementing `DescriptorResolver`.

use crate::context::InspectionContext;
use crate::reflect::ParameterInfo;
use crate::types::{MemberError, VariantSet};

/// Supplies custom answers for named members.
///
/// Return `VariantSet::empty()` for members outside the resolver's domain;
/// the builder then evaluates the member by reflection. Errors are reserved
/// for genuine failures and are shown on the member they belong to.
pub trait DescriptorResolver {
    fn resolve(
        &self,
        context: &InspectionContext,
        target: &str,
        parameters: &[ParameterInfo],
    ) -> Result<VariantSet, MemberError>;
}
