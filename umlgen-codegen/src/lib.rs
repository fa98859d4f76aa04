//! # umlgen Codegen
//!
//! PHP source generation from UML models.
//!
//! This crate provides:
//! - Type, namespace and relationship resolution for PHP
//! - Accessor, stereotype, interface and factory method synthesis
//! - Class, trait, interface, annotation and enum emission
//! - Filesystem and in-memory output sinks

pub mod config;
pub mod error;
pub mod generator;
pub mod php;
pub mod sink;
pub mod writer;

pub use config::{EnumStyle, GeneratorConfig, IndentStyle};
pub use error::CodegenError;
pub use generator::Generator;
pub use sink::{FsSink, MemorySink, OutputSink};
pub use writer::{CodeWriter, UnitBuffer};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Generates PHP sources from a model document.
///
/// # Arguments
/// * `xml` - Model document content
/// * `config` - Generation options
///
/// # Returns
/// Generated files keyed by their path relative to the output directory.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_xml(
    xml: &str,
    config: &GeneratorConfig,
) -> Result<BTreeMap<PathBuf, String>, CodegenError> {
    let model = umlgen_model::parse_model(xml)?;
    let mut sink = MemorySink::new();
    Generator::new(&model, config).generate_all(&mut sink)?;
    Ok(sink.into_files())
}

/// Generates PHP sources from a model file into `out_dir`.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or writing fails.
pub fn generate_from_file(
    path: &Path,
    out_dir: &Path,
    config: &GeneratorConfig,
) -> Result<(), CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    let model = umlgen_model::parse_model(&xml)?;
    let mut sink = FsSink::new(out_dir);
    Generator::new(&model, config).generate_all(&mut sink)
}
