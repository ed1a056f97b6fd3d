//! Supplementary members computed outside the type's own reflection data

use std::time::{Duration, Instant};

use crate::context::InspectionContext;
use crate::types::{guarded, MemberError, Value};

/// Contributes extra named facts about the value being described
pub trait DescriptorExtension {
    fn register_extensions(&self, manager: &mut ExtensionManager<'_>);
}

/// Outcome of one extension callable
#[derive(Debug, Clone)]
pub struct ExtensionResult {
    pub name: String,
    pub result: Result<Value, MemberError>,
    pub elapsed: Duration,
}

/// Collects extension results for one value within one inspection context.
///
/// Each callable runs as soon as it is registered. An `Err` or a panic
/// becomes that extension's result; later registrations still run.
/// Registering a name twice keeps the last result.
pub struct ExtensionManager<'a> {
    context: &'a InspectionContext,
    results: Vec<ExtensionResult>,
}

impl<'a> ExtensionManager<'a> {
    pub fn new(context: &'a InspectionContext) -> Self {
        Self {
            context,
            results: Vec::new(),
        }
    }

    pub fn context(&self) -> &InspectionContext {
        self.context
    }

    pub fn register<F>(&mut self, name: impl Into<String>, extension: F) -> &mut Self
    where
        F: FnOnce(&InspectionContext) -> Result<Value, MemberError>,
    {
        let name = name.into();
        let context = self.context;
        let start = Instant::now();
        let result = guarded(|| extension(context));
        let elapsed = start.elapsed();

        if let Err(err) = &result {
            tracing::debug!("Extension {} failed: {}", name, err);
        }

        let entry = ExtensionResult {
            name,
            result,
            elapsed,
        };
        match self.results.iter_mut().find(|r| r.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.results.push(entry),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<ExtensionResult> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failing_extension_does_not_stop_the_next() {
        let context = InspectionContext::new("test");
        let mut manager = ExtensionManager::new(&context);
        manager
            .register("Broken", |_| Err(MemberError::host("not available")))
            .register("Working", |_| Ok(Value::Int(42)));

        let results = manager.into_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].result.as_ref().unwrap_err(), &MemberError::host("not available"));
        assert!(matches!(results[1].result, Ok(Value::Int(42))));
    }

    #[test]
    fn test_panicking_extension_is_captured() {
        let context = InspectionContext::new("test");
        let mut manager = ExtensionManager::new(&context);
        manager.register("Explodes", |_| panic!("host crashed"));
        manager.register("After", |_| Ok(Value::Bool(true)));

        let results = manager.into_results();
        assert!(matches!(&results[0].result, Err(MemberError::Panicked(msg)) if msg == "host crashed"));
        assert!(results[1].result.is_ok());
    }

    #[test]
    fn test_last_registration_wins() {
        let context = InspectionContext::new("test");
        let mut manager = ExtensionManager::new(&context);
        manager.register("Area", |_| Ok(Value::Int(1)));
        manager.register("Area", |_| Ok(Value::Int(2)));

        assert_eq!(manager.len(), 1);
        let results = manager.into_results();
        assert!(matches!(results[0].result, Ok(Value::Int(2))));
    }

    #[test]
    fn test_extensions_see_the_context() {
        let context = InspectionContext::new("Project1.rvt");
        let mut manager = ExtensionManager::new(&context);
        manager.register("Document", |ctx| Ok(Value::from(ctx.name())));

        let results = manager.into_results();
        assert!(matches!(&results[0].result, Ok(Value::String(s)) if s == "Project1.rvt"));
    }
}
