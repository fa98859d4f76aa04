//! Generator preferences files.
//!
//! ```xml
//! <preferences useTab="false" indentSpaces="2" classSuffix=".class"
//!              interfaceSuffix=".interface" docs="true" strictTypes="true"
//!              returnTypes="false" enumStyle="native"/>
//! ```
//!
//! Every attribute is optional; missing ones keep the generator default.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use umlgen_codegen::{EnumStyle, GeneratorConfig, IndentStyle};

/// Error raised while loading preferences.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// The file could not be read.
    #[error("failed to read preferences: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a valid preferences element.
    #[error("invalid preferences: {0}")]
    Parse(#[from] quick_xml::DeError),
}

/// Enumeration style as written in preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EnumStyleName {
    /// `enum Name { case A; }`
    #[serde(rename = "native")]
    Native,
    /// `class Name extends \SplEnum`
    #[serde(rename = "splEnum")]
    SplEnum,
}

impl From<EnumStyleName> for EnumStyle {
    fn from(name: EnumStyleName) -> Self {
        match name {
            EnumStyleName::Native => Self::Native,
            EnumStyleName::SplEnum => Self::SplEnum,
        }
    }
}

/// User preferences; unset fields fall back to [`GeneratorConfig`]
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename = "preferences")]
pub struct Preferences {
    /// Indent with tabs instead of spaces.
    #[serde(rename = "@useTab", default)]
    pub use_tab: Option<bool>,
    /// Spaces per indentation level.
    #[serde(rename = "@indentSpaces", default)]
    pub indent_spaces: Option<usize>,
    /// Class file name suffix.
    #[serde(rename = "@classSuffix", default)]
    pub class_suffix: Option<String>,
    /// Interface file name suffix.
    #[serde(rename = "@interfaceSuffix", default)]
    pub interface_suffix: Option<String>,
    /// Emit doc blocks.
    #[serde(rename = "@docs", default)]
    pub docs: Option<bool>,
    /// Emit parameter type hints.
    #[serde(rename = "@strictTypes", default)]
    pub strict_types: Option<bool>,
    /// Emit return type declarations.
    #[serde(rename = "@returnTypes", default)]
    pub return_types: Option<bool>,
    /// Enumeration style.
    #[serde(rename = "@enumStyle", default)]
    pub enum_style: Option<EnumStyleName>,
}

impl Preferences {
    /// Parses a preferences document.
    ///
    /// # Errors
    /// Returns `PreferencesError::Parse` for malformed documents or values.
    pub fn from_xml(xml: &str) -> Result<Self, PreferencesError> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Reads and parses a preferences file.
    ///
    /// # Errors
    /// Returns `PreferencesError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, PreferencesError> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }

    /// Overlays the fields set in `other` on top of `self`.
    #[must_use]
    pub fn merge(self, other: Preferences) -> Self {
        Self {
            use_tab: other.use_tab.or(self.use_tab),
            indent_spaces: other.indent_spaces.or(self.indent_spaces),
            class_suffix: other.class_suffix.or(self.class_suffix),
            interface_suffix: other.interface_suffix.or(self.interface_suffix),
            docs: other.docs.or(self.docs),
            strict_types: other.strict_types.or(self.strict_types),
            return_types: other.return_types.or(self.return_types),
            enum_style: other.enum_style.or(self.enum_style),
        }
    }

    /// Converts the preferences into a generator configuration.
    #[must_use]
    pub fn into_config(self) -> GeneratorConfig {
        let defaults = GeneratorConfig::default();

        let indent = match (self.use_tab, self.indent_spaces) {
            (Some(true), _) => IndentStyle::Tab,
            (_, Some(spaces)) => IndentStyle::Spaces(spaces),
            _ => defaults.indent,
        };

        GeneratorConfig::new()
            .indent(indent)
            .class_suffix(self.class_suffix.unwrap_or(defaults.class_suffix))
            .interface_suffix(self.interface_suffix.unwrap_or(defaults.interface_suffix))
            .docs(self.docs.unwrap_or(defaults.docs))
            .strict_types(self.strict_types.unwrap_or(defaults.strict_types))
            .return_types(self.return_types.unwrap_or(defaults.return_types))
            .enum_style(self.enum_style.map_or(defaults.enum_style, EnumStyle::from))
    }
}
