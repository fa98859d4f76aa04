//! # umlgen Model
//!
//! Object model and XML model parser for umlgen.
//!
//! This crate provides:
//! - An arena based model of packages, classifiers and relationships
//! - Typed members (attributes, operations, parameters)
//! - XML model parsing with forward reference resolution
//! - Structural model validation

pub mod error;
pub mod members;
pub mod parser;
pub mod relationships;
pub mod types;
pub mod validation;

pub use error::{ModelError, ParseError};
pub use members::{
    Attribute, Direction, EnumLiteral, MANY_MARKERS, Multiplicity, Operation, Parameter, TypeRef,
    Typed, Visibility,
};
pub use parser::{parse_model, parse_model_file};
pub use relationships::{Association, AssociationEnd, Relationship};
pub use types::{Classifier, Element, ElementId, ElementKind, Model, Package, UseCase};
pub use validation::validate_model;
