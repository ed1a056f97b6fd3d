//! Host reflection surface
//!
//! The host API exposes its objects through explicit type metadata: every
//! runtime type lists its declared members, and each member carries an
//! accessor the builder can call. Base types are linked so the builder can
//! walk the hierarchy from the most-derived type upward.

use std::fmt;
use std::sync::Arc;

use crate::types::{guarded, MemberError, ObjectRef, Value};

/// Callable backing a member: `(target, arguments) -> value`
pub type Invoker = Arc<dyn Fn(Option<&ObjectRef>, &[Value]) -> Result<Value, MemberError> + Send + Sync>;

/// Member category, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Event,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A declared parameter of a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub type_name: String,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// One declared member of a host type
#[derive(Clone)]
pub struct MemberInfo {
    name: String,
    kind: MemberKind,
    visibility: Visibility,
    is_static: bool,
    is_special_name: bool,
    return_type: Option<String>,
    parameters: Vec<ParameterInfo>,
    invoker: Option<Invoker>,
}

impl MemberInfo {
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            is_static: false,
            is_special_name: false,
            return_type: None,
            parameters: Vec::new(),
            invoker: None,
        }
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as compiler-synthesized (accessors, operators, backing fields)
    pub fn special_name(mut self) -> Self {
        self.is_special_name = true;
        self
    }

    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(ParameterInfo::new(name, type_name));
        self
    }

    pub fn with_invoker<F>(mut self, invoker: F) -> Self
    where
        F: Fn(Option<&ObjectRef>, &[Value]) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        self.invoker = Some(Arc::new(invoker));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_special_name(&self) -> bool {
        self.is_special_name
    }

    /// Declared result type, `None` when the member returns nothing
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn returns_void(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Invoke the member against `target`.
    ///
    /// Argument count and target presence are checked before the accessor
    /// runs; panics inside the accessor come back as `MemberError::Panicked`.
    pub fn invoke(&self, target: Option<&ObjectRef>, args: &[Value]) -> Result<Value, MemberError> {
        if args.len() != self.parameters.len() {
            return Err(MemberError::ParameterCount {
                expected: self.parameters.len(),
                supplied: args.len(),
            });
        }
        if !self.is_static && target.is_none() {
            return Err(MemberError::TargetType {
                expected: "instance".to_string(),
                actual: "none".to_string(),
            });
        }
        let invoker = self
            .invoker
            .as_ref()
            .ok_or_else(|| MemberError::host(format!("Member '{}' has no accessor", self.name)))?;
        guarded(|| invoker(target, args))
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .field("return_type", &self.return_type)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Runtime type metadata for a host object
#[derive(Debug)]
pub struct TypeInfo {
    name: String,
    base: Option<Arc<TypeInfo>>,
    members: Vec<MemberInfo>,
}

impl TypeInfo {
    pub fn builder(name: impl Into<String>) -> TypeInfoBuilder {
        TypeInfoBuilder {
            name: name.into(),
            base: None,
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&Arc<TypeInfo>> {
        self.base.as_ref()
    }

    /// Members declared directly on this type (not inherited)
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// This type followed by each base type, most-derived first
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// True when this type or one of its bases is named `type_name`
    pub fn is_assignable_to(&self, type_name: &str) -> bool {
        self.ancestors().any(|ty| ty.name == type_name)
    }
}

/// Iterator over a type hierarchy
pub struct Ancestors<'a> {
    next: Option<&'a TypeInfo>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base.as_deref();
        Some(current)
    }
}

/// Fluent builder for `TypeInfo`.
///
/// The typed helpers check that the target's runtime type derives from the
/// type being built, then downcast it to `T`. Either mismatch is reported as
/// `MemberError::TargetType`.
pub struct TypeInfoBuilder {
    name: String,
    base: Option<Arc<TypeInfo>>,
    members: Vec<MemberInfo>,
}

impl TypeInfoBuilder {
    pub fn base(mut self, base: Arc<TypeInfo>) -> Self {
        self.base = Some(base);
        self
    }

    pub fn member(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    pub fn field<T, F>(self, name: &str, type_name: &str, getter: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        let declaring = self.name.clone();
        let member = MemberInfo::new(name, MemberKind::Field)
            .returns(type_name)
            .with_invoker(move |target, _| getter(downcast::<T>(target, &declaring)?));
        self.member(member)
    }

    pub fn property<T, F>(self, name: &str, type_name: &str, getter: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        let declaring = self.name.clone();
        let member = MemberInfo::new(name, MemberKind::Property)
            .returns(type_name)
            .with_invoker(move |target, _| getter(downcast::<T>(target, &declaring)?));
        self.member(member)
    }

    pub fn static_property<F>(self, name: &str, type_name: &str, getter: F) -> Self
    where
        F: Fn() -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        let member = MemberInfo::new(name, MemberKind::Property)
            .static_member()
            .returns(type_name)
            .with_invoker(move |_, _| getter());
        self.member(member)
    }

    /// Parameterless method; `return_type` of `None` declares a void method
    pub fn method<T, F>(self, name: &str, return_type: Option<&str>, body: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        let declaring = self.name.clone();
        let mut member = MemberInfo::new(name, MemberKind::Method)
            .with_invoker(move |target, _| body(downcast::<T>(target, &declaring)?));
        if let Some(return_type) = return_type {
            member = member.returns(return_type);
        }
        self.member(member)
    }

    /// Method taking arguments, `parameters` as `(name, type)` pairs
    pub fn method_with<T, F>(
        self,
        name: &str,
        return_type: &str,
        parameters: &[(&str, &str)],
        body: F,
    ) -> Self
    where
        T: 'static,
        F: Fn(&T, &[Value]) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        let member = parameters.iter().fold(
            MemberInfo::new(name, MemberKind::Method).returns(return_type),
            |member, (param, ty)| member.parameter(*param, *ty),
        );
        let declaring = self.name.clone();
        let member = member
            .with_invoker(move |target, args| body(downcast::<T>(target, &declaring)?, args));
        self.member(member)
    }

    pub fn event(self, name: &str, handler_type: &str) -> Self {
        self.member(MemberInfo::new(name, MemberKind::Event).returns(handler_type))
    }

    pub fn build(self) -> Arc<TypeInfo> {
        Arc::new(TypeInfo {
            name: self.name,
            base: self.base,
            members: self.members,
        })
    }
}

/// Resolve the target of a member declared on `declaring`
fn downcast<'t, T: 'static>(
    target: Option<&'t ObjectRef>,
    declaring: &str,
) -> Result<&'t T, MemberError> {
    let target = target.ok_or_else(|| MemberError::TargetType {
        expected: declaring.to_string(),
        actual: "none".to_string(),
    })?;
    let type_info = target.type_info();
    let mismatch = || MemberError::TargetType {
        expected: declaring.to_string(),
        actual: type_info.name().to_string(),
    };
    if !type_info.is_assignable_to(declaring) {
        return Err(mismatch());
    }
    target.as_any().downcast_ref::<T>().ok_or_else(mismatch)
}
