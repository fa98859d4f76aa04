//! Type expression resolution.

use super::namespace::{SEPARATOR, namespace_path};
use umlgen_model::{ElementId, Model, TypeRef, Typed};

/// Where a resolved type is going to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMode {
    /// Doc blocks: collections render as `Name[]`.
    Documentation,
    /// Source code: collections render as `array`.
    Code,
}

/// Scalar types PHP does not accept as parameter hints here.
pub const NON_HINTABLE: [&str; 10] = [
    "bool", "boolean", "int", "integer", "float", "double", "string", "resource", "void", "mixed",
];

/// Resolves type references relative to the namespace of the current unit.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    model: &'a Model,
    namespace: &'a str,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver for a unit in `namespace`.
    #[must_use]
    pub fn new(model: &'a Model, namespace: &'a str) -> Self {
        Self { model, namespace }
    }

    /// Returns the namespace of the current unit.
    #[must_use]
    pub fn namespace(&self) -> &'a str {
        self.namespace
    }

    /// Resolves the type expression of a typed value.
    ///
    /// # Arguments
    /// * `typed` - Attribute, parameter or association end (None yields `void`)
    /// * `mode` - Documentation or code rendering
    /// * `suppress_namespace` - Use the bare element name; ignored for
    ///   association ends
    ///
    /// # Returns
    /// The type expression.
    #[must_use]
    pub fn resolve(
        &self,
        typed: Option<&dyn Typed>,
        mode: TypeMode,
        suppress_namespace: bool,
    ) -> String {
        let Some(typed) = typed else {
            return "void".to_string();
        };

        let mut ty = match typed.type_ref() {
            TypeRef::Element(id) => match self.model.get(*id) {
                Some(element) if !element.name.is_empty() => {
                    if suppress_namespace && !typed.is_association_end() {
                        element.name.clone()
                    } else {
                        self.qualify(*id)
                    }
                }
                _ => "void".to_string(),
            },
            TypeRef::Primitive(name) if !name.trim().is_empty() => name.clone(),
            _ => "void".to_string(),
        };

        let multiplicity = typed.multiplicity();
        if !multiplicity.is_empty() && ty != "void" {
            if multiplicity.is_many() {
                match mode {
                    TypeMode::Documentation => ty.push_str("[]"),
                    TypeMode::Code => ty = "array".to_string(),
                }
            }
        } else if typed.default_value() == Some("[]") || multiplicity.is_many() {
            ty = "array".to_string();
        }

        if ty == "object" {
            ty = "$this".to_string();
        }

        ty
    }

    /// Qualified name of an element as seen from the current namespace.
    fn qualify(&self, id: ElementId) -> String {
        let name = &self.model.element(id).name;
        let namespace = namespace_path(self.model, id);

        if namespace == self.namespace {
            name.clone()
        } else if namespace.is_empty() {
            format!("{SEPARATOR}{name}")
        } else {
            format!("{SEPARATOR}{namespace}{SEPARATOR}{name}")
        }
    }
}

/// Returns true if `ty` may be used as a parameter type hint.
#[must_use]
pub fn is_hintable(ty: &str) -> bool {
    !NON_HINTABLE.contains(&ty)
}

/// Returns the placeholder return statement for a code-mode return type.
///
/// `$this` is returned as `return $this;`; callers drop it for static
/// methods.
#[must_use]
pub fn default_return(ty: &str) -> Option<&'static str> {
    match ty {
        "void" => None,
        "bool" | "boolean" => Some("return false;"),
        "int" | "integer" | "long" | "short" | "byte" => Some("return 0;"),
        "float" | "double" => Some("return 0.0;"),
        "char" => Some("return '0';"),
        "string" => Some("return \"\";"),
        "array" => Some("return [];"),
        "$this" => Some("return $this;"),
        "create" => Some("return self::create();"),
        _ => Some("return null;"),
    }
}
