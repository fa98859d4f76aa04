//! Namespace paths and import collection.

use super::relations::{param_namespaces, super_classes, super_dependencies, super_interfaces};
use umlgen_model::{ElementId, ElementKind, Model, TypeRef};

/// Namespace separator.
pub const SEPARATOR: &str = "\\";

/// Returns the namespace of an element: its enclosing package names joined
/// by `\`, without the model root. Empty at top level.
#[must_use]
pub fn namespace_path(model: &Model, id: ElementId) -> String {
    model.package_path(id).join(SEPARATOR)
}

/// Returns `Namespace\Name` (or just `Name` at top level), without a
/// leading separator.
#[must_use]
pub fn qualified_path(model: &Model, id: ElementId) -> String {
    let namespace = namespace_path(model, id);
    let name = &model.element(id).name;
    if namespace.is_empty() {
        name.clone()
    } else {
        format!("{namespace}{SEPARATOR}{name}")
    }
}

/// Returns true if `path` must be imported from a unit in `current`.
///
/// After removing the `current\` prefix the path must still contain a
/// separator; anything else is reachable by its short name.
#[must_use]
pub fn needs_import(path: &str, current: &str) -> bool {
    let relative = if current.is_empty() {
        path
    } else {
        path.strip_prefix(&format!("{current}{SEPARATOR}"))
            .unwrap_or(path)
    };
    relative.contains(SEPARATOR)
}

/// Collects the imports required by a classifier.
///
/// Groups, in order: attribute types, used traits, superclasses, realized
/// interfaces, parameter and return types (including those of realized
/// interfaces' operations), and the stereotypes of owned use cases.
/// Synthetic supertypes are never imported. The result is deduplicated.
#[must_use]
pub fn collect_uses(model: &Model, id: ElementId, current: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    if let Some(classifier) = model.classifier(id) {
        for attribute in &classifier.attributes {
            if let TypeRef::Element(target) = attribute.type_ref {
                candidates.push(qualified_path(model, target));
            }
        }
    }

    for trait_use in super_dependencies(model, id) {
        candidates.push(qualified_path(model, trait_use.target));
    }

    for parent in super_classes(model, id)
        .into_iter()
        .chain(super_interfaces(model, id))
    {
        if let Some(target) = parent.element() {
            candidates.push(qualified_path(model, target));
        }
    }

    candidates.extend(param_namespaces(model, id));

    for &owned in model.owned_elements(id) {
        if let ElementKind::UseCase(use_case) = &model.element(owned).kind {
            if let Some(stereotype) = use_case.stereotype_ref {
                candidates.push(qualified_path(model, stereotype));
            }
        }
    }

    let mut uses: Vec<String> = Vec::new();
    for path in candidates {
        if needs_import(&path, current) && !uses.contains(&path) {
            uses.push(path);
        }
    }
    uses
}
