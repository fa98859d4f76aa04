//! Indentation aware line buffers.
//!
//! A source unit is assembled from two parts: the import header, which grows
//! while the body is being written, and the body itself. They are only
//! joined in [`UnitBuffer::finish`].

/// Line buffer with a current indentation depth.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<String>,
    indent_unit: String,
    depth: usize,
}

impl CodeWriter {
    /// Creates an empty writer using `indent_unit` per level.
    #[must_use]
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            indent_unit: indent_unit.into(),
            depth: 0,
        }
    }

    /// Returns the text of one indentation level.
    #[must_use]
    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    /// Increases the indentation depth.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decreases the indentation depth.
    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Writes `text` at the current depth.
    ///
    /// Multi-line text is split and every line is indented. Empty lines stay
    /// empty.
    pub fn write_line(&mut self, text: &str) {
        for line in text.split('\n') {
            let line = line.trim_end();
            if line.is_empty() {
                self.lines.push(String::new());
            } else {
                self.lines
                    .push(format!("{}{}", self.indent_unit.repeat(self.depth), line));
            }
        }
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Removes the last line if it is empty.
    pub fn pop_blank(&mut self) {
        if self.lines.last().is_some_and(String::is_empty) {
            self.lines.pop();
        }
    }

    /// Returns the written lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns true if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Joins the lines without a trailing newline.
    #[must_use]
    pub fn into_string(self) -> String {
        self.lines.join("\n")
    }
}

/// One generated source file: namespace, imports and body.
#[derive(Debug, Clone)]
pub struct UnitBuffer {
    namespace: String,
    uses: Vec<String>,
    /// Declaration body.
    pub body: CodeWriter,
}

impl UnitBuffer {
    /// Creates an empty unit for the given namespace (empty for none).
    #[must_use]
    pub fn new(indent_unit: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            uses: Vec::new(),
            body: CodeWriter::new(indent_unit),
        }
    }

    /// Returns the unit namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Adds an import; duplicates and empty paths are ignored.
    pub fn add_use(&mut self, path: &str) {
        let path = path.trim_start_matches('\\');
        if !path.is_empty() && !self.uses.iter().any(|u| u == path) {
            self.uses.push(path.to_string());
        }
    }

    /// Returns the imports in insertion order.
    #[must_use]
    pub fn uses(&self) -> &[String] {
        &self.uses
    }

    /// Assembles the final file text.
    #[must_use]
    pub fn finish(self) -> String {
        let mut output = String::from("<?php\n\n");

        if !self.namespace.is_empty() {
            output.push_str(&format!("namespace {};\n\n", self.namespace));
        }

        for path in &self.uses {
            output.push_str(&format!("use {};\n", path));
        }
        if !self.uses.is_empty() {
            output.push('\n');
        }

        let mut body = self.body;
        while body.lines.last().is_some_and(String::is_empty) {
            body.lines.pop();
        }
        output.push_str(&body.into_string());
        output.push('\n');

        output
    }
}
