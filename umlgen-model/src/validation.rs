//! Model validation utilities.
//!
//! Generation tolerates most modelling mistakes (unresolvable types become
//! `void`, unnamed members are skipped). Validation is the strict,
//! opt-in counterpart that reports structural problems up front.

use crate::error::ModelError;
use crate::members::{Direction, Multiplicity};
use crate::relationships::Relationship;
use crate::types::{Classifier, Element, ElementId, ElementKind, Model};

/// Validates a model for structural correctness.
///
/// # Arguments
/// * `model` - The model to validate
///
/// # Returns
/// Ok(()) if valid, or ModelError describing the first issue.
///
/// # Errors
/// Returns `ModelError` if validation fails.
pub fn validate_model(model: &Model) -> Result<(), ModelError> {
    validate_members(model)?;
    validate_relationships(model)?;
    Ok(())
}

/// Validates attributes, operations and parameters of every classifier.
fn validate_members(model: &Model) -> Result<(), ModelError> {
    for element in model.elements() {
        if let Some(classifier) = element.kind.classifier() {
            validate_classifier(element, classifier)?;
        }
    }
    Ok(())
}

fn validate_classifier(element: &Element, classifier: &Classifier) -> Result<(), ModelError> {
    for attribute in &classifier.attributes {
        check_multiplicity(
            &format!("{}.{}", element.name, attribute.name),
            &attribute.multiplicity,
        )?;
    }

    for operation in &classifier.operations {
        let path = format!("{}.{}()", element.name, operation.name);

        let count = operation
            .parameters
            .iter()
            .filter(|p| p.direction == Direction::Return)
            .count();
        if count > 1 {
            return Err(ModelError::MultipleReturns {
                operation: path,
                count,
            });
        }

        for parameter in &operation.parameters {
            check_multiplicity(&format!("{path}:{}", parameter.name), &parameter.multiplicity)?;
        }
    }

    Ok(())
}

fn check_multiplicity(member: &str, multiplicity: &Multiplicity) -> Result<(), ModelError> {
    if multiplicity.is_valid() {
        Ok(())
    } else {
        Err(ModelError::InvalidMultiplicity {
            member: member.to_string(),
            value: multiplicity.as_str().to_string(),
        })
    }
}

/// Validates relationship endpoints.
fn validate_relationships(model: &Model) -> Result<(), ModelError> {
    for relationship in model.relationships() {
        match relationship {
            Relationship::Generalization { source, target } => {
                let (s, t) = endpoints(model, *source, *target)?;
                if source == target {
                    return Err(invalid("generalization", s, t, "element extends itself"));
                }
                let compatible = matches!(
                    (&s.kind, &t.kind),
                    (ElementKind::Class(_), ElementKind::Class(_))
                        | (ElementKind::Interface(_), ElementKind::Interface(_))
                );
                if !compatible {
                    return Err(invalid(
                        "generalization",
                        s,
                        t,
                        "endpoints must both be classes or both be interfaces",
                    ));
                }
            }
            Relationship::InterfaceRealization { source, target } => {
                let (s, t) = endpoints(model, *source, *target)?;
                if s.kind.classifier().is_none() {
                    return Err(invalid("realization", s, t, "source is not a classifier"));
                }
                if !t.kind.is_interface() {
                    return Err(invalid("realization", s, t, "target is not an interface"));
                }
            }
            Relationship::Dependency { source, target, .. } => {
                let (s, t) = endpoints(model, *source, *target)?;
                if s.kind.classifier().is_none() || t.kind.classifier().is_none() {
                    return Err(invalid(
                        "dependency",
                        s,
                        t,
                        "endpoints must be classifiers",
                    ));
                }
            }
            Relationship::Association(assoc) => {
                let (s, t) = endpoints(model, assoc.end1.reference, assoc.end2.reference)?;
                for end in [&assoc.end1, &assoc.end2] {
                    check_multiplicity(
                        &format!("{}--{}:{}", s.name, t.name, end.name),
                        &end.multiplicity,
                    )?;
                }
            }
        }
    }
    Ok(())
}

fn endpoints(
    model: &Model,
    source: ElementId,
    target: ElementId,
) -> Result<(&Element, &Element), ModelError> {
    let lookup = |id: ElementId| {
        model.get(id).ok_or_else(|| ModelError::ElementNotFound {
            name: id.to_string(),
        })
    };
    Ok((lookup(source)?, lookup(target)?))
}

fn invalid(
    relationship: &'static str,
    source: &Element,
    target: &Element,
    message: &str,
) -> ModelError {
    ModelError::InvalidRelationship {
        relationship,
        source_name: source.name.clone(),
        target_name: target.name.clone(),
        message: message.to_string(),
    }
}
