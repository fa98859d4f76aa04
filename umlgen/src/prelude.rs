//! Prelude module for convenient imports.
//!
//! ```ignore
//! use umlgen::prelude::*;
//! ```

// Model
pub use umlgen_model::{
    Attribute, Classifier, Direction, ElementId, ElementKind, Model, Multiplicity, Operation,
    Parameter, Relationship, TypeRef, Visibility, parse_model, parse_model_file, validate_model,
};

// Generation
pub use umlgen_codegen::{
    CodegenError, EnumStyle, FsSink, Generator, GeneratorConfig, IndentStyle, MemorySink,
    OutputSink,
};

pub use crate::preferences::Preferences;
