//! # umlgen
//!
//! Generates PHP source trees from UML models.
//!
//! A model document lists packages, classifiers and the relationships
//! between them. Every package becomes a directory and every top-level
//! classifier a `.php` file with its namespace, imports, members and
//! synthesized accessors.
//!
//! ## Quick Start
//!
//! ```ignore
//! use umlgen::prelude::*;
//!
//! let model = parse_model(&xml)?;
//! let config = GeneratorConfig::default().strict_types(true);
//! let mut sink = FsSink::new("out");
//! Generator::new(&model, &config).generate_all(&mut sink)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Object model, XML parser and validation
//! - [`codegen`] - PHP emission and output sinks
//! - [`preferences`] - Generator preferences files

pub mod preferences;
pub mod prelude;

/// Object model, parsing and validation.
pub mod model {
    pub use umlgen_model::*;
}

/// PHP code generation.
pub mod codegen {
    pub use umlgen_codegen::*;
}

pub use preferences::{Preferences, PreferencesError};
pub use umlgen_codegen::{
    CodegenError, FsSink, Generator, GeneratorConfig, MemorySink, OutputSink, generate_from_file,
    generate_from_xml,
};
pub use umlgen_model::{Model, ModelError, ParseError, parse_model, parse_model_file, validate_model};
