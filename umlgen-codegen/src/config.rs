//! Generator configuration.

/// Indentation used for nested blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    /// One tab per level.
    Tab,
    /// The given number of spaces per level.
    Spaces(usize),
}

impl IndentStyle {
    /// Returns the text of one indentation level.
    #[must_use]
    pub fn unit(&self) -> String {
        match self {
            Self::Tab => "\t".to_string(),
            Self::Spaces(n) => " ".repeat(*n),
        }
    }
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::Spaces(4)
    }
}

/// How enumerations are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumStyle {
    /// Native `enum Name { case A; }` declaration.
    Native,
    /// `class Name extends \SplEnum` with numbered constants.
    #[default]
    SplEnum,
}

/// Configuration options for code generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Indentation style.
    pub indent: IndentStyle,
    /// Suffix appended to class and trait file names.
    pub class_suffix: String,
    /// Suffix appended to interface file names.
    pub interface_suffix: String,
    /// Whether to emit doc blocks.
    pub docs: bool,
    /// Whether to emit parameter type hints.
    pub strict_types: bool,
    /// Whether to emit return type declarations.
    pub return_types: bool,
    /// Enumeration rendering.
    pub enum_style: EnumStyle,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: IndentStyle::default(),
            class_suffix: String::new(),
            interface_suffix: String::new(),
            docs: true,
            strict_types: false,
            return_types: false,
            enum_style: EnumStyle::default(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation style.
    #[must_use]
    pub fn indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the class file name suffix.
    #[must_use]
    pub fn class_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.class_suffix = suffix.into();
        self
    }

    /// Sets the interface file name suffix.
    #[must_use]
    pub fn interface_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.interface_suffix = suffix.into();
        self
    }

    /// Enables or disables doc blocks.
    #[must_use]
    pub fn docs(mut self, enabled: bool) -> Self {
        self.docs = enabled;
        self
    }

    /// Enables or disables parameter type hints.
    #[must_use]
    pub fn strict_types(mut self, enabled: bool) -> Self {
        self.strict_types = enabled;
        self
    }

    /// Enables or disables return type declarations.
    #[must_use]
    pub fn return_types(mut self, enabled: bool) -> Self {
        self.return_types = enabled;
        self
    }

    /// Sets the enumeration style.
    #[must_use]
    pub fn enum_style(mut self, style: EnumStyle) -> Self {
        self.enum_style = style;
        self
    }
}
