//! Classifier members: attributes, operations and parameters.
//!
//! Members are owned inline by their classifier (or operation) rather than
//! living in the element arena, since nothing refers to them by identity.

use crate::types::ElementId;

/// Multiplicity markers that denote a collection.
pub const MANY_MARKERS: [&str; 3] = ["0..*", "1..*", "*"];

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Visible everywhere.
    #[default]
    Public,
    /// Visible to subclasses.
    Protected,
    /// Visible to the owner only.
    Private,
    /// Package visibility (no keyword).
    Package,
}

impl Visibility {
    /// Parses a visibility from its model name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            "package" => Some(Self::Package),
            _ => None,
        }
    }

    /// Returns the keyword for this visibility, if it has one.
    #[must_use]
    pub const fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Protected => Some("protected"),
            Self::Private => Some("private"),
            Self::Package => None,
        }
    }
}

/// Parameter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Input parameter.
    #[default]
    In,
    /// Input/output parameter.
    InOut,
    /// Output parameter.
    Out,
    /// Return value.
    Return,
}

impl Direction {
    /// Parses a direction from its model name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "in" => Some(Self::In),
            "inout" => Some(Self::InOut),
            "out" => Some(Self::Out),
            "return" => Some(Self::Return),
            _ => None,
        }
    }
}

/// Reference to the type of a typed member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeRef {
    /// No type given.
    #[default]
    None,
    /// A primitive or otherwise unmodelled type name, used verbatim.
    Primitive(String),
    /// A classifier in the model.
    Element(ElementId),
}

impl TypeRef {
    /// Creates a primitive type reference.
    #[must_use]
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }

    /// Returns the referenced element, if any.
    #[must_use]
    pub const fn element(&self) -> Option<ElementId> {
        match self {
            Self::Element(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the primitive name, if any.
    #[must_use]
    pub fn primitive_name(&self) -> Option<&str> {
        match self {
            Self::Primitive(name) => Some(name),
            _ => None,
        }
    }
}

/// Multiplicity string as written in the model (`"1"`, `"0..*"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Multiplicity(String);

impl Multiplicity {
    /// Creates a multiplicity from its textual form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Multiplicity denoting a collection.
    #[must_use]
    pub fn many() -> Self {
        Self("*".to_string())
    }

    /// Returns the raw text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no multiplicity was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns true if this multiplicity denotes a collection.
    #[must_use]
    pub fn is_many(&self) -> bool {
        MANY_MARKERS.contains(&self.0.trim())
    }

    /// Returns true if the value belongs to the supported vocabulary.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let value = self.0.trim();
        value.is_empty()
            || self.is_many()
            || matches!(value, "0..1" | "1..1")
            || value.chars().all(|c| c.is_ascii_digit())
    }
}

/// Anything that carries a type reference: attributes, parameters and
/// association ends.
pub trait Typed {
    /// The referenced type.
    fn type_ref(&self) -> &TypeRef;

    /// The multiplicity of the reference.
    fn multiplicity(&self) -> &Multiplicity;

    /// The literal default value, if any.
    fn default_value(&self) -> Option<&str>;

    /// Association ends always resolve to their fully qualified reference.
    fn is_association_end(&self) -> bool {
        false
    }
}

/// Attribute of a classifier.
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Documentation text.
    pub documentation: String,
    /// Attribute type.
    pub type_ref: TypeRef,
    /// Multiplicity.
    pub multiplicity: Multiplicity,
    /// Default value literal.
    pub default_value: Option<String>,
    /// Visibility.
    pub visibility: Visibility,
    /// Class-level attribute.
    pub is_static: bool,
    /// Final attribute (emitted as a constant).
    pub is_leaf: bool,
    /// Derived attribute (no backing accessors).
    pub is_derived: bool,
}

impl Attribute {
    /// Creates a new attribute with the given name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            ..Self::default()
        }
    }

    /// Sets the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the multiplicity.
    #[must_use]
    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }
}

impl Typed for Attribute {
    fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    fn multiplicity(&self) -> &Multiplicity {
        &self.multiplicity
    }

    fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

/// Parameter of an operation, including its return value.
#[derive(Debug, Clone, Default)]
pub struct Parameter {
    /// Parameter name (may start with `&` for by-reference passing).
    pub name: String,
    /// Documentation text.
    pub documentation: String,
    /// Parameter type.
    pub type_ref: TypeRef,
    /// Multiplicity.
    pub multiplicity: Multiplicity,
    /// Default value literal.
    pub default_value: Option<String>,
    /// Direction.
    pub direction: Direction,
}

impl Parameter {
    /// Creates an input parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            ..Self::default()
        }
    }

    /// Creates a return parameter.
    #[must_use]
    pub fn returning(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            direction: Direction::Return,
            ..Self::default()
        }
    }
}

impl Typed for Parameter {
    fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    fn multiplicity(&self) -> &Multiplicity {
        &self.multiplicity
    }

    fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

/// Operation of a classifier.
#[derive(Debug, Clone, Default)]
pub struct Operation {
    /// Operation name.
    pub name: String,
    /// Documentation text.
    pub documentation: String,
    /// Visibility.
    pub visibility: Visibility,
    /// Class-level operation.
    pub is_static: bool,
    /// Abstract operation (no body).
    pub is_abstract: bool,
    /// Final operation.
    pub is_leaf: bool,
    /// Parameters in declaration order, including the return parameter.
    pub parameters: Vec<Parameter>,
    /// Body source. Empty means unspecified.
    pub specification: String,
}

impl Operation {
    /// Creates a public operation without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns all parameters except the return parameter.
    pub fn non_return_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.direction != Direction::Return)
    }

    /// Returns the first return parameter, if any.
    #[must_use]
    pub fn return_parameter(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.direction == Direction::Return)
    }
}

/// Literal of an enumeration.
#[derive(Debug, Clone, Default)]
pub struct EnumLiteral {
    /// Literal name.
    pub name: String,
    /// Documentation text.
    pub documentation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicity_many() {
        assert!(Multiplicity::new("0..*").is_many());
        assert!(Multiplicity::new(" 1..* ").is_many());
        assert!(Multiplicity::new("*").is_many());
        assert!(!Multiplicity::new("1").is_many());
        assert!(!Multiplicity::new("").is_many());
        assert!(Multiplicity::default().is_empty());
    }

    #[test]
    fn test_multiplicity_vocabulary() {
        assert!(Multiplicity::new("0..1").is_valid());
        assert!(Multiplicity::new("3").is_valid());
        assert!(Multiplicity::new("").is_valid());
        assert!(!Multiplicity::new("2..5").is_valid());
        assert!(!Multiplicity::new("many").is_valid());
    }

    #[test]
    fn test_visibility_keyword() {
        assert_eq!(Visibility::parse("Private"), Some(Visibility::Private));
        assert_eq!(Visibility::Private.keyword(), Some("private"));
        assert_eq!(Visibility::Package.keyword(), None);
        assert_eq!(Visibility::parse("friend"), None);
    }

    #[test]
    fn test_operation_parameters() {
        let mut op = Operation::new("find");
        op.parameters
            .push(Parameter::new("id", TypeRef::primitive("int")));
        op.parameters
            .push(Parameter::returning(TypeRef::primitive("string")));

        assert_eq!(op.non_return_parameters().count(), 1);
        let ret = op.return_parameter().expect("return parameter");
        assert_eq!(ret.type_ref.primitive_name(), Some("string"));
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("return"), Some(Direction::Return));
        assert_eq!(Direction::parse("INOUT"), Some(Direction::InOut));
        assert_eq!(Direction::parse("sideways"), None);
    }
}
