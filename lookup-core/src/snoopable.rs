//! A described value and its lazily built member list

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::builder::DescriptorBuilder;
use crate::context::InspectionContext;
use crate::descriptors::TypeDescriptor;
use crate::types::{BuilderSettings, Descriptor, Value};

/// State of the member cache
#[derive(Debug, Clone, Default)]
pub enum MemberCache {
    #[default]
    Uncomputed,
    Computed(Arc<[Descriptor]>),
    /// Invalidated; the next request rebuilds
    Stale,
}

/// A value paired with the descriptor strategy chosen for it.
///
/// Members are built on first request and cached. The cache lock is held
/// for the whole build, so concurrent first requests are serialized and the
/// build runs once.
pub struct SnoopableObject {
    value: Value,
    descriptor: Box<dyn TypeDescriptor>,
    cache: Mutex<MemberCache>,
}

impl SnoopableObject {
    pub fn new(context: &InspectionContext, value: Value) -> Self {
        let descriptor = context.descriptors().find_descriptor(&value);
        Self::with_descriptor(value, descriptor)
    }

    /// Pair a value with an explicitly chosen strategy
    pub fn with_descriptor(value: Value, descriptor: Box<dyn TypeDescriptor>) -> Self {
        Self {
            value,
            descriptor,
            cache: Mutex::new(MemberCache::Uncomputed),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn descriptor(&self) -> &dyn TypeDescriptor {
        self.descriptor.as_ref()
    }

    pub fn name(&self) -> Option<String> {
        self.descriptor.name()
    }

    pub fn type_name(&self) -> String {
        self.descriptor.type_name()
    }

    pub fn label(&self) -> String {
        self.descriptor.label()
    }

    pub fn is_expandable(&self) -> bool {
        self.descriptor.expandable()
    }

    /// Members of this value, built once and reused
    pub fn members(&self, context: &InspectionContext, settings: &BuilderSettings) -> Arc<[Descriptor]> {
        let mut cache = self.cache.lock();
        if let MemberCache::Computed(members) = &*cache {
            tracing::trace!("Member cache hit for {}", self.label());
            return Arc::clone(members);
        }
        let members = self.build(context, settings);
        *cache = MemberCache::Computed(Arc::clone(&members));
        members
    }

    /// Rebuild the members, overwriting any cached list
    pub fn refresh_members(
        &self,
        context: &InspectionContext,
        settings: &BuilderSettings,
    ) -> Arc<[Descriptor]> {
        let mut cache = self.cache.lock();
        tracing::debug!("Refreshing members of {}", self.label());
        let members = self.build(context, settings);
        *cache = MemberCache::Computed(Arc::clone(&members));
        members
    }

    /// Mark the cached members stale
    pub fn invalidate(&self) {
        let mut cache = self.cache.lock();
        if matches!(*cache, MemberCache::Computed(_)) {
            *cache = MemberCache::Stale;
        }
    }

    pub fn cache_state(&self) -> MemberCache {
        self.cache.lock().clone()
    }

    fn build(&self, context: &InspectionContext, settings: &BuilderSettings) -> Arc<[Descriptor]> {
        if !self.descriptor.expandable() {
            return Arc::from(Vec::new());
        }
        DescriptorBuilder::new(context, settings)
            .build(self)
            .into()
    }
}

impl fmt::Debug for SnoopableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnoopableObject")
            .field("value", &self.value)
            .field("label", &self.label())
            .finish()
    }
}
