//! Leaf descriptors for scalar values
//!
//! A leaf's name is its own text, so searches can match on member values.

use super::TypeDescriptor;

pub struct NullDescriptor;

impl TypeDescriptor for NullDescriptor {
    fn type_name(&self) -> String {
        "Null".to_string()
    }

    fn label(&self) -> String {
        "<null>".to_string()
    }

    fn expandable(&self) -> bool {
        false
    }
}

pub struct BoolDescriptor(pub bool);

impl TypeDescriptor for BoolDescriptor {
    fn name(&self) -> Option<String> {
        Some(self.label())
    }

    fn type_name(&self) -> String {
        "Boolean".to_string()
    }

    fn label(&self) -> String {
        let label = if self.0 { "True" } else { "False" };
        label.to_string()
    }

    fn expandable(&self) -> bool {
        false
    }
}

pub struct IntegerDescriptor(pub i64);

impl TypeDescriptor for IntegerDescriptor {
    fn name(&self) -> Option<String> {
        Some(self.label())
    }

    fn type_name(&self) -> String {
        "Int64".to_string()
    }

    fn label(&self) -> String {
        self.0.to_string()
    }

    fn expandable(&self) -> bool {
        false
    }
}

pub struct FloatDescriptor(pub f64);

impl TypeDescriptor for FloatDescriptor {
    fn name(&self) -> Option<String> {
        Some(self.label())
    }

    fn type_name(&self) -> String {
        "Double".to_string()
    }

    fn label(&self) -> String {
        self.0.to_string()
    }

    fn expandable(&self) -> bool {
        false
    }
}

pub struct StringDescriptor(pub String);

impl TypeDescriptor for StringDescriptor {
    fn name(&self) -> Option<String> {
        Some(self.label())
    }

    fn type_name(&self) -> String {
        "String".to_string()
    }

    fn label(&self) -> String {
        self.0.clone()
    }

    fn expandable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_labels() {
        assert_eq!(BoolDescriptor(true).label(), "True");
        assert_eq!(IntegerDescriptor(-4).label(), "-4");
        assert_eq!(FloatDescriptor(2.5).label(), "2.5");
        assert_eq!(StringDescriptor("Level 1".into()).label(), "Level 1");
        assert_eq!(NullDescriptor.label(), "<null>");
        assert_eq!(StringDescriptor("Level 1".into()).name().as_deref(), Some("Level 1"));
        assert!(NullDescriptor.name().is_none());
    }

    #[test]
    fn test_leaves_do_not_expand() {
        assert!(!BoolDescriptor(false).expandable());
        assert!(!StringDescriptor(String::new()).expandable());
        assert!(BoolDescriptor(false).resolver().is_none());
    }
}
