//! Candidate answers a resolver offers for one member

use super::{Value, VariantError};

/// One candidate value, optionally labelled to tell it apart from its siblings
#[derive(Debug, Clone)]
pub struct Variant {
    value: Value,
    description: Option<String>,
}

impl Variant {
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Zero or more candidate answers for a single member.
///
/// Null values and empty collections are dropped on insertion and never
/// counted. An empty set means "no answer": the builder falls back to
/// reflecting the member itself.
#[derive(Debug, Clone, Default)]
pub struct VariantSet {
    variants: Vec<Variant>,
}

impl VariantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The "no answer" set
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            variants: Vec::with_capacity(capacity),
        }
    }

    /// A set holding exactly `value` (or nothing, if it gets dropped)
    pub fn single_value(value: impl Into<Value>) -> Self {
        Self::with_capacity(1).add(value)
    }

    pub fn add(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    pub fn add_described(mut self, value: impl Into<Value>, description: impl Into<String>) -> Self {
        self.push_described(value, description);
        self
    }

    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        self.insert(value.into(), None)
    }

    pub fn push_described(
        &mut self,
        value: impl Into<Value>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.insert(value.into(), Some(description.into()))
    }

    fn insert(&mut self, value: Value, description: Option<String>) -> &mut Self {
        if value.is_null() || value.is_empty_collection() {
            return self;
        }
        self.variants.push(Variant { value, description });
        self
    }

    pub fn count(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Narrow to the one candidate; any other cardinality is a caller bug
    pub fn single(&self) -> Result<&Variant, VariantError> {
        match self.variants.as_slice() {
            [variant] => Ok(variant),
            _ => Err(VariantError::NotSingle { count: self.count() }),
        }
    }

    pub fn into_single(mut self) -> Result<Variant, VariantError> {
        if self.variants.len() == 1 {
            Ok(self.variants.remove(0))
        } else {
            Err(VariantError::NotSingle { count: self.count() })
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variant> {
        self.variants.iter()
    }
}

impl IntoIterator for VariantSet {
    type Item = Variant;
    type IntoIter = std::vec::IntoIter<Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariantSet {
    type Item = &'a Variant;
    type IntoIter = std::slice::Iter<'a, Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}
