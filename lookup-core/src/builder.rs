//! Descriptor builder
//!
//! Walks a value's type hierarchy and turns every included member into one
//! or more descriptors. Output is grouped by category (items, fields,
//! properties, methods, events, extensions), each non-empty group preceded
//! by a separator, members sorted by name within a group.
//!
//! A member that fails to resolve or invoke becomes a failure descriptor;
//! it never aborts the pass.

use std::collections::{BTreeMap, HashSet};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::context::InspectionContext;
use crate::extensions::{DescriptorExtension, ExtensionManager};
use crate::reflect::{MemberInfo, MemberKind, TypeInfo};
use crate::resolver::DescriptorResolver;
use crate::snoopable::SnoopableObject;
use crate::types::{
    guarded, BuilderSettings, Descriptor, MemberCategory, MemberError, ObjectRef,
    UnsupportedReason, Value, VariantSet,
};

/// One build pass over one value
pub struct DescriptorBuilder<'a> {
    context: &'a InspectionContext,
    settings: &'a BuilderSettings,
    groups: BTreeMap<MemberCategory, Vec<Descriptor>>,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new(context: &'a InspectionContext, settings: &'a BuilderSettings) -> Self {
        Self {
            context,
            settings,
            groups: BTreeMap::new(),
        }
    }

    /// Build the member list of a described value
    pub fn build(mut self, object: &SnoopableObject) -> Vec<Descriptor> {
        let value = object.value();
        let descriptor = object.descriptor();

        if let Some(items) = value.items() {
            self.add_items(items);
        }

        if let Value::Object(target) = value {
            let type_info = target.type_info();
            self.add_members(Some(target), &type_info, descriptor.resolver());
        }

        if self.settings.include_extensions {
            if let Some(extension) = descriptor.extension() {
                self.add_extensions(extension);
            }
        }

        self.finish()
    }

    /// Build the static members of a type, with no instance to read from
    pub fn build_static(mut self, type_info: &TypeInfo) -> Vec<Descriptor> {
        self.add_members(None, type_info, None);
        self.finish()
    }

    fn add_items(&mut self, items: Vec<Value>) {
        let descriptors = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| self.describe(format!("[{}]", index), None, item))
            .collect::<Vec<_>>();
        self.push(MemberCategory::Items, descriptors);
    }

    fn add_members(
        &mut self,
        target: Option<&ObjectRef>,
        type_info: &TypeInfo,
        resolver: Option<&dyn DescriptorResolver>,
    ) {
        // Keyed by name alone: a derived member hides any base member of
        // the same name, whatever its kind
        let mut seen: HashSet<String> = HashSet::new();

        for ty in type_info.ancestors() {
            // Overloads: the one with the fewest parameters is seen first
            let mut members: Vec<&MemberInfo> = ty.members().iter().collect();
            members.sort_by(|a, b| {
                (a.kind(), a.name(), a.arity()).cmp(&(b.kind(), b.name(), b.arity()))
            });

            for member in members {
                if member.is_special_name() || !self.is_included(member, target.is_some()) {
                    continue;
                }
                if !seen.insert(member.name().to_string()) {
                    continue;
                }
                let descriptors = self.evaluate(target, member, resolver);
                self.push(member.kind().into(), descriptors);
            }
        }
    }

    fn is_included(&self, member: &MemberInfo, has_target: bool) -> bool {
        if !has_target && !member.is_static() {
            return false;
        }
        if has_target && member.is_static() && !self.settings.include_static {
            return false;
        }
        if !member.is_public() && !self.settings.include_private {
            return false;
        }
        match member.kind() {
            MemberKind::Field => self.settings.include_fields,
            MemberKind::Event => self.settings.include_events,
            MemberKind::Property | MemberKind::Method => true,
        }
    }

    fn evaluate(
        &self,
        target: Option<&ObjectRef>,
        member: &MemberInfo,
        resolver: Option<&dyn DescriptorResolver>,
    ) -> Vec<Descriptor> {
        let start = Instant::now();
        let declared_type = member.return_type().unwrap_or("Void");

        if member.kind() == MemberKind::Event {
            return vec![self.describe(member.name(), Some("Event"), Value::from(declared_type))];
        }

        if let Some(resolver) = resolver {
            let resolved = guarded(|| resolver.resolve(self.context, member.name(), member.parameters()));
            match resolved {
                Ok(variants) if !variants.is_empty() => {
                    return self.expand_variants(member, variants, start.elapsed());
                }
                Ok(_) => {}
                Err(err) => return vec![self.failure(member, err, start.elapsed())],
            }
        }

        if member.returns_void() {
            return self.unsupported(member, UnsupportedReason::NoReturnValue);
        }
        if member.arity() > 0 {
            return self.unsupported(member, UnsupportedReason::RequiresParameters(member.arity()));
        }

        match member.invoke(target, &[]) {
            Ok(value) => {
                let elapsed = start.elapsed();
                vec![self
                    .describe(member.name(), Some(declared_type), value)
                    .with_timing(self.timing(member, elapsed))]
            }
            Err(err) => vec![self.failure(member, err, start.elapsed())],
        }
    }

    fn expand_variants(&self, member: &MemberInfo, variants: VariantSet, elapsed: Duration) -> Vec<Descriptor> {
        let timing = self.timing(member, elapsed);
        variants
            .into_iter()
            .map(|variant| {
                let description = variant.description().map(str::to_string);
                self.describe(member.name(), member.return_type(), variant.into_value())
                    .with_description(description)
                    .with_timing(timing)
            })
            .collect()
    }

    /// Wrap `value` in a descriptor named `name`.
    ///
    /// Choosing and running the value's strategy is host code too, so it is
    /// guarded like an invocation; a failure there becomes a failure
    /// descriptor for this member alone. `declared_type` of `None` takes the
    /// type from the value's strategy.
    fn describe(&self, name: impl Into<String>, declared_type: Option<&str>, value: Value) -> Descriptor {
        let name = name.into();
        let context = self.context;
        let described = guarded(|| {
            let object = context.snoop(value);
            let type_name = match declared_type {
                Some(type_name) => type_name.to_string(),
                None => object.type_name(),
            };
            Ok(Descriptor::value(name.clone(), type_name, object))
        });
        described.unwrap_or_else(|err| {
            tracing::debug!("Describing {} failed: {}", name, err);
            Descriptor::failed(name, declared_type.unwrap_or("Object"), err)
        })
    }

    fn unsupported(&self, member: &MemberInfo, reason: UnsupportedReason) -> Vec<Descriptor> {
        if !self.settings.include_unsupported {
            return Vec::new();
        }
        vec![Descriptor::unsupported(
            member.name(),
            member.return_type().unwrap_or("Void"),
            reason,
        )]
    }

    fn failure(&self, member: &MemberInfo, err: MemberError, elapsed: Duration) -> Descriptor {
        tracing::debug!("Member {} failed: {}", member.name(), err);
        Descriptor::failed(member.name(), member.return_type().unwrap_or("Void"), err)
            .with_timing(self.timing(member, elapsed))
    }

    fn timing(&self, member: &MemberInfo, elapsed: Duration) -> Option<Duration> {
        if !self.settings.include_timing {
            return None;
        }
        tracing::trace!("{} evaluated in {:?}", member.name(), elapsed);
        Some(elapsed)
    }

    fn add_extensions(&mut self, extension: &dyn DescriptorExtension) {
        let mut manager = ExtensionManager::new(self.context);
        let registered = panic::catch_unwind(AssertUnwindSafe(|| {
            extension.register_extensions(&mut manager);
        }));
        if registered.is_err() {
            tracing::warn!("Extension registration panicked; keeping results collected so far");
        }

        let descriptors = manager
            .into_results()
            .into_iter()
            .map(|outcome| {
                let timing = self.settings.include_timing.then_some(outcome.elapsed);
                let descriptor = match outcome.result {
                    Ok(value) => self.describe(outcome.name, None, value),
                    Err(err) => Descriptor::failed(outcome.name, "Extension", err),
                };
                descriptor.with_timing(timing)
            })
            .collect::<Vec<_>>();
        self.push(MemberCategory::Extensions, descriptors);
    }

    fn push(&mut self, category: MemberCategory, descriptors: Vec<Descriptor>) {
        if descriptors.is_empty() {
            return;
        }
        self.groups
            .entry(category)
            .or_default()
            .extend(descriptors.into_iter().map(|d| d.with_category(category)));
    }

    fn finish(self) -> Vec<Descriptor> {
        let total = self.groups.values().map(Vec::len).sum::<usize>() + self.groups.len();
        let mut output = Vec::with_capacity(total);

        for (category, mut descriptors) in self.groups {
            if category != MemberCategory::Items {
                // Stable: variants of one member keep their resolver order
                descriptors.sort_by(|a, b| a.name().cmp(&b.name()));
            }
            output.push(Descriptor::separator(category));
            output.extend(descriptors);
        }
        output
    }
}

/// Build the member list of `object` in `context`
pub fn build_descriptors(
    context: &InspectionContext,
    settings: &BuilderSettings,
    object: &SnoopableObject,
) -> Vec<Descriptor> {
    DescriptorBuilder::new(context, settings).build(object)
}

/// Build the static members of `type_info`
pub fn build_static_descriptors(
    context: &InspectionContext,
    settings: &BuilderSettings,
    type_info: &Arc<TypeInfo>,
) -> Vec<Descriptor> {
    DescriptorBuilder::new(context, settings).build_static(type_info)
}
