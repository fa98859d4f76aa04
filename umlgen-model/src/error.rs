//! Error types for model parsing and validation.

use thiserror::Error;

/// Error type for model parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML entity unescaping error.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Reference to an id that no element declares.
    #[error("unknown reference '{key}' in {context}")]
    UnknownReference {
        /// Referenced key.
        key: String,
        /// Where the reference appeared.
        context: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition.
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Invalid document structure.
    #[error("invalid model structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for model validation.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Element not found.
    #[error("element '{name}' not found")]
    ElementNotFound {
        /// Element name or key.
        name: String,
    },

    /// Multiplicity outside the supported vocabulary.
    #[error("invalid multiplicity '{value}' on '{member}'")]
    InvalidMultiplicity {
        /// Owning member path.
        member: String,
        /// Offending value.
        value: String,
    },

    /// Operation declares more than one return parameter.
    #[error("operation '{operation}' declares {count} return parameters")]
    MultipleReturns {
        /// Operation path.
        operation: String,
        /// Number of return parameters.
        count: usize,
    },

    /// Relationship endpoint of the wrong kind.
    #[error("{relationship} from '{source_name}' to '{target_name}': {message}")]
    InvalidRelationship {
        /// Relationship kind.
        relationship: &'static str,
        /// Source element name.
        source_name: String,
        /// Target element name.
        target_name: String,
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown reference error.
    pub fn unknown_reference(key: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownReference {
            key: key.into(),
            context: context.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }
}
