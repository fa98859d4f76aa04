//! Main code generator.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::php::{ElementEmitter, namespace_path};
use crate::sink::OutputSink;
use crate::writer::UnitBuffer;
use std::path::Path;
use tracing::{debug, info, warn};
use umlgen_model::{ElementId, ElementKind, Model};

/// Walks the containment tree and writes one PHP file per top-level
/// classifier into a directory per package.
pub struct Generator<'a> {
    model: &'a Model,
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given model.
    #[must_use]
    pub fn new(model: &'a Model, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Generates the whole model.
    ///
    /// # Errors
    /// Returns the first sink failure.
    pub fn generate_all<S: OutputSink + ?Sized>(&self, sink: &mut S) -> Result<(), CodegenError> {
        self.generate(self.model.root(), sink)
    }

    /// Generates `base` and everything it owns.
    ///
    /// A package (or the model itself) becomes a directory named after it;
    /// a classifier becomes a file. Paths are relative to the sink root.
    ///
    /// # Errors
    /// Returns the first sink failure. Files written before the failure
    /// are left in place.
    pub fn generate<S: OutputSink + ?Sized>(
        &self,
        base: ElementId,
        sink: &mut S,
    ) -> Result<(), CodegenError> {
        if self.model.get(base).is_none() {
            return Err(CodegenError::generation(format!(
                "element {} does not exist",
                base.index()
            )));
        }
        self.generate_into(base, Path::new(""), sink)
    }

    fn generate_into<S: OutputSink + ?Sized>(
        &self,
        id: ElementId,
        dir: &Path,
        sink: &mut S,
    ) -> Result<(), CodegenError> {
        let element = self.model.element(id);

        match &element.kind {
            ElementKind::Model(_) | ElementKind::Package(_) => {
                if element.name.is_empty() {
                    warn!("skipping unnamed {}", element.kind.label());
                    return Ok(());
                }
                let path = dir.join(&element.name);
                sink.create_dir(&path)?;
                for &child in element.kind.owned() {
                    self.generate_into(child, &path, sink)?;
                }
                Ok(())
            }
            ElementKind::UseCase(_) => Ok(()),
            _ => {
                let (Some(file_name), Some(source)) = (self.file_name(id), self.render(id)) else {
                    warn!("skipping unnamed {}", element.kind.label());
                    return Ok(());
                };
                let path = dir.join(file_name);
                sink.write_file(&path, &source)?;
                info!("wrote {}", path.display());
                Ok(())
            }
        }
    }

    /// Renders the source unit of a classifier.
    ///
    /// Returns `None` for unnamed elements and for elements that are not
    /// classifiers.
    #[must_use]
    pub fn render(&self, id: ElementId) -> Option<String> {
        let element = self.model.get(id)?;
        element.kind.classifier()?;
        if element.name.is_empty() {
            return None;
        }

        let namespace = namespace_path(self.model, id);
        let mut unit = UnitBuffer::new(self.config.indent.unit(), namespace.as_str());
        ElementEmitter::new(self.model, self.config, &namespace).emit(&mut unit, id);

        debug!(
            "rendered {} {} ({} imports)",
            element.kind.label(),
            element.name,
            unit.uses().len()
        );
        Some(unit.finish())
    }

    /// Returns the file name of a classifier's source unit.
    #[must_use]
    pub fn file_name(&self, id: ElementId) -> Option<String> {
        let element = self.model.get(id)?;
        if element.name.is_empty() {
            return None;
        }

        let suffix = match element.kind {
            ElementKind::Class(_) => self.config.class_suffix.as_str(),
            ElementKind::Interface(_) => self.config.interface_suffix.as_str(),
            ElementKind::Enumeration(_) | ElementKind::AnnotationType(_) => "",
            _ => return None,
        };
        Some(format!("{}{}.php", element.name, suffix))
    }
}
