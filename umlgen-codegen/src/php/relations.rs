//! Relationship queries, including stereotype-derived supertypes.
//!
//! A stereotype tag `extends Name` acts as an extra superclass `\Name`; any
//! other tag except `trait` acts as a realized marker interface `\tag`.
//! These synthetic supertypes only exist for the duration of a query.

use super::namespace::{SEPARATOR, qualified_path};
use umlgen_model::{Direction, ElementId, ElementKind, Model, Relationship, TypeRef};

/// Superclass or realized interface of a classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuperType {
    /// Element of the model.
    Element(ElementId),
    /// Fully qualified name derived from a stereotype tag.
    Synthetic(String),
}

impl SuperType {
    /// Returns the name used in `extends` / `implements` clauses.
    #[must_use]
    pub fn name(&self, model: &Model) -> String {
        match self {
            Self::Element(id) => model.element(*id).name.clone(),
            Self::Synthetic(name) => name.clone(),
        }
    }

    /// Returns the model element, if this is not synthetic.
    #[must_use]
    pub const fn element(&self) -> Option<ElementId> {
        match self {
            Self::Element(id) => Some(*id),
            Self::Synthetic(_) => None,
        }
    }
}

/// Trait used by a class through a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitUse {
    /// Used trait.
    pub target: ElementId,
    /// Conflict resolution block, if any.
    pub mapping: Option<String>,
}

fn synthetic(name: &str) -> SuperType {
    if name.starts_with(SEPARATOR) {
        SuperType::Synthetic(name.to_string())
    } else {
        SuperType::Synthetic(format!("{SEPARATOR}{name}"))
    }
}

fn stereotype_tags(model: &Model, id: ElementId) -> Vec<&str> {
    model
        .classifier(id)
        .map(|c| c.stereotype_tags().collect())
        .unwrap_or_default()
}

/// Returns the superclasses of `id`: generalization targets in declaration
/// order, then one synthetic type per `extends` stereotype tag.
#[must_use]
pub fn super_classes(model: &Model, id: ElementId) -> Vec<SuperType> {
    let mut supers: Vec<SuperType> = model
        .relationships_of(id, move |r| {
            matches!(r, Relationship::Generalization { source, .. } if *source == id)
        })
        .filter_map(Relationship::target)
        .map(SuperType::Element)
        .collect();

    for tag in stereotype_tags(model, id) {
        if let Some(name) = tag.strip_prefix("extends ") {
            let name = name.trim();
            if !name.is_empty() {
                supers.push(synthetic(name));
            }
        }
    }

    supers
}

/// Returns the realized interfaces of `id`: realization targets in
/// declaration order, then one synthetic marker interface per remaining
/// stereotype tag.
#[must_use]
pub fn super_interfaces(model: &Model, id: ElementId) -> Vec<SuperType> {
    let mut supers: Vec<SuperType> = model
        .relationships_of(id, move |r| {
            matches!(r, Relationship::InterfaceRealization { source, .. } if *source == id)
        })
        .filter_map(Relationship::target)
        .map(SuperType::Element)
        .collect();

    for tag in stereotype_tags(model, id) {
        if tag != "trait" && !tag.starts_with("extends ") {
            supers.push(synthetic(tag));
        }
    }

    supers
}

/// Returns the traits used by `id`: dependencies whose target is a class.
#[must_use]
pub fn super_dependencies(model: &Model, id: ElementId) -> Vec<TraitUse> {
    model
        .relationships_of(id, move |r| {
            matches!(r, Relationship::Dependency { source, .. } if *source == id)
        })
        .filter_map(|r| match r {
            Relationship::Dependency {
                target, mapping, ..
            } if model.element(*target).kind.is_class() => Some(TraitUse {
                target: *target,
                mapping: mapping.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Returns the qualified paths of element-typed parameters and return
/// values of the operations of `id` and of its realized interfaces.
#[must_use]
pub fn param_namespaces(model: &Model, id: ElementId) -> Vec<String> {
    let mut owners = vec![id];
    owners.extend(
        super_interfaces(model, id)
            .iter()
            .filter_map(SuperType::element)
            .filter(|target| model.element(*target).kind.is_interface()),
    );

    let mut paths = Vec::new();
    for owner in owners {
        let Some(classifier) = model.classifier(owner) else {
            continue;
        };
        for operation in &classifier.operations {
            let params = operation
                .non_return_parameters()
                .chain(operation.return_parameter());
            for param in params {
                if let TypeRef::Element(target) = param.type_ref {
                    paths.push(qualified_path(model, target));
                }
            }
        }
    }
    paths
}

/// Returns the first superclass if it is a class of the model.
#[must_use]
pub fn first_super_class(model: &Model, id: ElementId) -> Option<ElementId> {
    super_classes(model, id)
        .first()
        .and_then(SuperType::element)
        .filter(|target| matches!(model.element(*target).kind, ElementKind::Class(_)))
}

/// Returns true if `direction` passes a value into the operation.
#[must_use]
pub const fn is_input(direction: Direction) -> bool {
    matches!(direction, Direction::In)
}
