//! Relationship definitions between model elements.

use crate::members::{Multiplicity, TypeRef, Typed, Visibility};
use crate::types::ElementId;

/// Relationship between two elements of the model.
#[derive(Debug, Clone)]
pub enum Relationship {
    /// `source` extends `target`.
    Generalization {
        /// Specializing element.
        source: ElementId,
        /// General element.
        target: ElementId,
    },
    /// `source` implements the interface `target`.
    InterfaceRealization {
        /// Implementing element.
        source: ElementId,
        /// Realized interface.
        target: ElementId,
    },
    /// `source` depends on `target`; between classes this models trait use.
    Dependency {
        /// Dependent element.
        source: ElementId,
        /// Supplier element.
        target: ElementId,
        /// Optional conflict resolution / alias block content.
        mapping: Option<String>,
    },
    /// Binary association.
    Association(Association),
}

impl Relationship {
    /// Returns true if the relationship touches the given element.
    #[must_use]
    pub fn involves(&self, id: ElementId) -> bool {
        match self {
            Self::Generalization { source, target }
            | Self::InterfaceRealization { source, target }
            | Self::Dependency { source, target, .. } => *source == id || *target == id,
            Self::Association(assoc) => {
                assoc.end1.reference == id || assoc.end2.reference == id
            }
        }
    }

    /// Returns the source element for directed relationships.
    #[must_use]
    pub const fn source(&self) -> Option<ElementId> {
        match self {
            Self::Generalization { source, .. }
            | Self::InterfaceRealization { source, .. }
            | Self::Dependency { source, .. } => Some(*source),
            Self::Association(_) => None,
        }
    }

    /// Returns the target element for directed relationships.
    #[must_use]
    pub const fn target(&self) -> Option<ElementId> {
        match self {
            Self::Generalization { target, .. }
            | Self::InterfaceRealization { target, .. }
            | Self::Dependency { target, .. } => Some(*target),
            Self::Association(_) => None,
        }
    }
}

/// Association with two ends.
#[derive(Debug, Clone)]
pub struct Association {
    /// First end.
    pub end1: AssociationEnd,
    /// Second end.
    pub end2: AssociationEnd,
}

impl Association {
    /// Returns the navigable end opposite to `id`, if `id` owns one end.
    #[must_use]
    pub fn navigable_end_from(&self, id: ElementId) -> Option<&AssociationEnd> {
        if self.end1.reference == id && self.end2.navigable {
            Some(&self.end2)
        } else if self.end2.reference == id && self.end1.navigable {
            Some(&self.end1)
        } else {
            None
        }
    }
}

/// One end of an association.
#[derive(Debug, Clone)]
pub struct AssociationEnd {
    /// Role name.
    pub name: String,
    /// Documentation text.
    pub documentation: String,
    /// Element at this end.
    pub reference: ElementId,
    /// Whether the end is navigable from the opposite end.
    pub navigable: bool,
    /// Multiplicity.
    pub multiplicity: Multiplicity,
    /// Visibility of the generated member.
    pub visibility: Visibility,
    /// Class-level member.
    pub is_static: bool,
    /// Final member.
    pub is_leaf: bool,
    /// Default value literal.
    pub default_value: Option<String>,
    type_ref: TypeRef,
}

impl AssociationEnd {
    /// Creates an end referencing the given element.
    #[must_use]
    pub fn new(reference: ElementId) -> Self {
        Self {
            name: String::new(),
            documentation: String::new(),
            reference,
            navigable: false,
            multiplicity: Multiplicity::default(),
            visibility: Visibility::default(),
            is_static: false,
            is_leaf: false,
            default_value: None,
            type_ref: TypeRef::Element(reference),
        }
    }

    /// Sets the role name and marks the end navigable.
    #[must_use]
    pub fn navigable(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.navigable = true;
        self
    }
}

impl Typed for AssociationEnd {
    fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    fn multiplicity(&self) -> &Multiplicity {
        &self.multiplicity
    }

    fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    fn is_association_end(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigable_end_from() {
        let a = ElementId::new(1);
        let b = ElementId::new(2);
        let assoc = Association {
            end1: AssociationEnd::new(a),
            end2: AssociationEnd::new(b).navigable("items"),
        };

        assert_eq!(assoc.navigable_end_from(a).map(|e| e.name.as_str()), Some("items"));
        assert!(assoc.navigable_end_from(b).is_none());
    }

    #[test]
    fn test_relationship_endpoints() {
        let a = ElementId::new(1);
        let b = ElementId::new(2);
        let rel = Relationship::Generalization { source: a, target: b };

        assert!(rel.involves(a));
        assert!(rel.involves(b));
        assert!(!rel.involves(ElementId::new(3)));
        assert_eq!(rel.source(), Some(a));
        assert_eq!(rel.target(), Some(b));
    }

    #[test]
    fn test_association_end_type() {
        let end = AssociationEnd::new(ElementId::new(4));
        assert_eq!(end.type_ref().element(), Some(ElementId::new(4)));
        assert!(end.is_association_end());
    }
}
