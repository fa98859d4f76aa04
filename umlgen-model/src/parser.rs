//! XML model parser.
//!
//! This module reads the XML model document into a [`Model`]. References
//! between elements (`typeRef`, `source`, `target`, ...) are recorded while
//! reading and resolved once the whole document has been seen, so forward
//! references are allowed.

use crate::error::ParseError;
use crate::members::{
    Attribute, Direction, EnumLiteral, Multiplicity, Operation, Parameter, TypeRef, Visibility,
};
use crate::relationships::{Association, AssociationEnd, Relationship};
use crate::types::{Classifier, ElementId, ElementKind, Model, Package, UseCase};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

/// Parses an XML model document from a string.
///
/// # Arguments
/// * `xml` - XML model content
///
/// # Returns
/// Parsed model or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, a value is invalid or a
/// reference names an unknown id.
pub fn parse_model(xml: &str) -> Result<Model, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"model" => {
                let mut parser = ModelParser::new(e)?;
                let root = parser.model.root();
                parser.parse_children(&mut reader, root)?;
                return parser.finish();
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"model" => {
                return ModelParser::new(e)?.finish();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Err(ParseError::InvalidStructure {
        message: "No model element found".to_string(),
    })
}

/// Parses an XML model document from a file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_model_file(path: &std::path::Path) -> Result<Model, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_model(&xml)
}

/// Type reference waiting for its target to be declared.
enum Fixup {
    Attribute {
        owner: ElementId,
        index: usize,
        key: String,
    },
    Parameter {
        owner: ElementId,
        operation: usize,
        index: usize,
        key: String,
    },
    UseCase {
        owner: ElementId,
        key: String,
    },
}

/// Relationship with unresolved endpoints.
enum PendingRelationship {
    Generalization {
        source: String,
        target: String,
    },
    Realization {
        source: String,
        target: String,
    },
    Dependency {
        source: String,
        target: String,
        mapping: Option<String>,
    },
    Association {
        ends: Vec<(String, AssociationEnd)>,
    },
}

struct ModelParser {
    model: Model,
    fixups: Vec<Fixup>,
    pending: Vec<PendingRelationship>,
}

impl ModelParser {
    fn new(e: &BytesStart<'_>) -> Result<Self, ParseError> {
        let mut name = String::new();
        let mut author = None;

        for (key, value) in attribute_pairs(e)? {
            match key.as_str() {
                "name" => name = value,
                "author" if !value.is_empty() => author = Some(value),
                _ => {}
            }
        }

        let mut model = Model::new(name);
        model.author = author;

        Ok(Self {
            model,
            fixups: Vec::new(),
            pending: Vec::new(),
        })
    }

    /// Parses the children of a container until its end tag.
    fn parse_children(
        &mut self,
        reader: &mut Reader<&[u8]>,
        parent: ElementId,
    ) -> Result<(), ParseError> {
        let mut buf = Vec::new();

        loop {
            let (e, is_empty) = match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => (e.into_owned(), false),
                Ok(Event::Empty(e)) => (e.into_owned(), true),
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => {
                    return Err(ParseError::InvalidStructure {
                        message: "unexpected end of document".to_string(),
                    });
                }
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {
                    buf.clear();
                    continue;
                }
            };
            buf.clear();

            let tag_bytes = e.name().as_ref().to_vec();
            let tag = std::str::from_utf8(&tag_bytes)?;

            match tag {
                "package" => {
                    let id = self.parse_package(&e, parent)?;
                    if !is_empty {
                        self.parse_children(reader, id)?;
                    }
                }
                "class" | "interface" | "enumeration" | "annotationType" => {
                    let id = self.parse_classifier(&e, tag, parent)?;
                    if !is_empty {
                        self.parse_children(reader, id)?;
                    }
                }
                "attribute" => {
                    let attribute = parse_attribute(reader, &e, is_empty)?;
                    self.push_attribute(parent, attribute)?;
                }
                "operation" => {
                    let operation = parse_operation(reader, &e, is_empty)?;
                    self.push_operation(parent, operation)?;
                }
                "literal" => {
                    let literal = parse_literal(reader, &e, is_empty)?;
                    self.classifier_mut(parent, "literal")?.literals.push(literal);
                }
                "useCase" => {
                    self.parse_use_case(&e, parent)?;
                    if !is_empty {
                        skip_to_end(reader)?;
                    }
                }
                "generalization" | "realization" | "dependency" => {
                    self.parse_directed(&e, tag)?;
                    if !is_empty {
                        skip_to_end(reader)?;
                    }
                }
                "association" => {
                    let ends = if is_empty {
                        Vec::new()
                    } else {
                        parse_association_ends(reader)?
                    };
                    self.pending.push(PendingRelationship::Association { ends });
                }
                "documentation" => {
                    if !is_empty {
                        let text = read_text(reader)?;
                        if let Some(element) = self.model.get_mut(parent) {
                            element.documentation = text;
                        }
                    }
                }
                _ => {
                    if !is_empty {
                        skip_to_end(reader)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn parse_package(
        &mut self,
        e: &BytesStart<'_>,
        parent: ElementId,
    ) -> Result<ElementId, ParseError> {
        let mut name = String::new();
        let mut key = None;

        for (attr, value) in attribute_pairs(e)? {
            match attr.as_str() {
                "name" => name = value,
                "id" => key = Some(value),
                _ => {}
            }
        }

        let id = self
            .model
            .add_element(parent, name, ElementKind::Package(Package::default()));
        self.register(key, id)?;
        Ok(id)
    }

    fn parse_classifier(
        &mut self,
        e: &BytesStart<'_>,
        tag: &str,
        parent: ElementId,
    ) -> Result<ElementId, ParseError> {
        let mut name = String::new();
        let mut key = None;
        let mut classifier = Classifier::new();

        for (attr, value) in attribute_pairs(e)? {
            match attr.as_str() {
                "name" => name = value,
                "id" => key = Some(value),
                "stereotype" if !value.trim().is_empty() => classifier.stereotype = Some(value),
                "visibility" => {
                    classifier.visibility = Visibility::parse(&value)
                        .ok_or_else(|| ParseError::invalid_attr(tag, "visibility", &value))?;
                }
                "abstract" => classifier.is_abstract = parse_bool(tag, "abstract", &value)?,
                "static" => classifier.is_static = parse_bool(tag, "static", &value)?,
                "final" | "leaf" => classifier.is_leaf = parse_bool(tag, &attr, &value)?,
                _ => {}
            }
        }

        let kind = match tag {
            "interface" => ElementKind::Interface(classifier),
            "enumeration" => ElementKind::Enumeration(classifier),
            "annotationType" => ElementKind::AnnotationType(classifier),
            _ if classifier.has_stereotype("annotationType") => {
                ElementKind::AnnotationType(classifier)
            }
            _ => ElementKind::Class(classifier),
        };

        let id = self.model.add_element(parent, name, kind);
        self.register(key, id)?;
        Ok(id)
    }

    fn parse_use_case(&mut self, e: &BytesStart<'_>, parent: ElementId) -> Result<(), ParseError> {
        let mut name = String::new();
        let mut key = None;
        let mut stereotype_ref = None;

        for (attr, value) in attribute_pairs(e)? {
            match attr.as_str() {
                "name" => name = value,
                "id" => key = Some(value),
                "stereotypeRef" => stereotype_ref = Some(value),
                _ => {}
            }
        }

        let id = self
            .model
            .add_element(parent, name, ElementKind::UseCase(UseCase::default()));
        self.register(key, id)?;

        if let Some(key) = stereotype_ref {
            self.fixups.push(Fixup::UseCase { owner: id, key });
        }

        Ok(())
    }

    fn parse_directed(&mut self, e: &BytesStart<'_>, tag: &str) -> Result<(), ParseError> {
        let mut source = None;
        let mut target = None;
        let mut mapping = None;

        for (attr, value) in attribute_pairs(e)? {
            match attr.as_str() {
                "source" => source = Some(value),
                "target" => target = Some(value),
                "mapping" if !value.trim().is_empty() => mapping = Some(value),
                _ => {}
            }
        }

        let source = source.ok_or_else(|| ParseError::missing_attr(tag, "source"))?;
        let target = target.ok_or_else(|| ParseError::missing_attr(tag, "target"))?;

        self.pending.push(match tag {
            "generalization" => PendingRelationship::Generalization { source, target },
            "realization" => PendingRelationship::Realization { source, target },
            _ => PendingRelationship::Dependency {
                source,
                target,
                mapping,
            },
        });

        Ok(())
    }

    fn push_attribute(
        &mut self,
        owner: ElementId,
        (attribute, key): (Attribute, Option<String>),
    ) -> Result<(), ParseError> {
        let classifier = self.classifier_mut(owner, "attribute")?;
        let index = classifier.attributes.len();
        classifier.attributes.push(attribute);

        if let Some(key) = key {
            self.fixups.push(Fixup::Attribute { owner, index, key });
        }
        Ok(())
    }

    fn push_operation(
        &mut self,
        owner: ElementId,
        (operation, keys): (Operation, Vec<(usize, String)>),
    ) -> Result<(), ParseError> {
        let classifier = self.classifier_mut(owner, "operation")?;
        let index = classifier.operations.len();
        classifier.operations.push(operation);

        for (param, key) in keys {
            self.fixups.push(Fixup::Parameter {
                owner,
                operation: index,
                index: param,
                key,
            });
        }
        Ok(())
    }

    fn classifier_mut(
        &mut self,
        owner: ElementId,
        member: &str,
    ) -> Result<&mut Classifier, ParseError> {
        self.model
            .classifier_mut(owner)
            .ok_or_else(|| ParseError::InvalidStructure {
                message: format!("{member} outside of a classifier"),
            })
    }

    fn register(&mut self, key: Option<String>, id: ElementId) -> Result<(), ParseError> {
        if let Some(key) = key {
            if !self.model.register_key(key.clone(), id) {
                return Err(ParseError::duplicate("element id", key));
            }
        }
        Ok(())
    }

    fn resolve(&self, key: &str, context: &str) -> Result<ElementId, ParseError> {
        self.model
            .lookup(key)
            .ok_or_else(|| ParseError::unknown_reference(key, context))
    }

    /// Resolves all recorded references and returns the finished model.
    fn finish(mut self) -> Result<Model, ParseError> {
        let fixups = std::mem::take(&mut self.fixups);
        for fixup in fixups {
            match fixup {
                Fixup::Attribute { owner, index, key } => {
                    let target = self.resolve(&key, "attribute type")?;
                    if let Some(attr) = self
                        .model
                        .classifier_mut(owner)
                        .and_then(|c| c.attributes.get_mut(index))
                    {
                        attr.type_ref = TypeRef::Element(target);
                    }
                }
                Fixup::Parameter {
                    owner,
                    operation,
                    index,
                    key,
                } => {
                    let target = self.resolve(&key, "parameter type")?;
                    if let Some(param) = self
                        .model
                        .classifier_mut(owner)
                        .and_then(|c| c.operations.get_mut(operation))
                        .and_then(|op| op.parameters.get_mut(index))
                    {
                        param.type_ref = TypeRef::Element(target);
                    }
                }
                Fixup::UseCase { owner, key } => {
                    let target = self.resolve(&key, "use case stereotype")?;
                    if let Some(ElementKind::UseCase(use_case)) =
                        self.model.get_mut(owner).map(|e| &mut e.kind)
                    {
                        use_case.stereotype_ref = Some(target);
                    }
                }
            }
        }

        let pending = std::mem::take(&mut self.pending);
        for relationship in pending {
            let resolved = match relationship {
                PendingRelationship::Generalization { source, target } => {
                    Relationship::Generalization {
                        source: self.resolve(&source, "generalization")?,
                        target: self.resolve(&target, "generalization")?,
                    }
                }
                PendingRelationship::Realization { source, target } => {
                    Relationship::InterfaceRealization {
                        source: self.resolve(&source, "realization")?,
                        target: self.resolve(&target, "realization")?,
                    }
                }
                PendingRelationship::Dependency {
                    source,
                    target,
                    mapping,
                } => Relationship::Dependency {
                    source: self.resolve(&source, "dependency")?,
                    target: self.resolve(&target, "dependency")?,
                    mapping,
                },
                PendingRelationship::Association { ends } => {
                    let mut resolved = Vec::with_capacity(2);
                    for (key, mut end) in ends {
                        let reference = self.resolve(&key, "association end")?;
                        let mut fresh = AssociationEnd::new(reference);
                        std::mem::swap(&mut fresh.name, &mut end.name);
                        std::mem::swap(&mut fresh.documentation, &mut end.documentation);
                        fresh.navigable = end.navigable;
                        fresh.multiplicity = end.multiplicity;
                        fresh.visibility = end.visibility;
                        fresh.is_static = end.is_static;
                        fresh.is_leaf = end.is_leaf;
                        fresh.default_value = end.default_value;
                        resolved.push(fresh);
                    }

                    let mut ends = resolved.into_iter();
                    match (ends.next(), ends.next(), ends.next()) {
                        (Some(end1), Some(end2), None) => {
                            Relationship::Association(Association { end1, end2 })
                        }
                        _ => {
                            return Err(ParseError::InvalidStructure {
                                message: "association must have exactly two ends".to_string(),
                            });
                        }
                    }
                }
            };
            self.model.add_relationship(resolved);
        }

        Ok(self.model)
    }
}

/// Parses an attribute and returns it with its unresolved type key.
fn parse_attribute(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    is_empty: bool,
) -> Result<(Attribute, Option<String>), ParseError> {
    let mut attribute = Attribute::default();
    let mut key = None;

    for (attr, value) in attribute_pairs(e)? {
        match attr.as_str() {
            "name" => attribute.name = value,
            "type" if !value.is_empty() => attribute.type_ref = TypeRef::Primitive(value),
            "typeRef" => key = Some(value),
            "multiplicity" => attribute.multiplicity = Multiplicity::new(value),
            "default" => attribute.default_value = Some(value),
            "visibility" => {
                attribute.visibility = Visibility::parse(&value)
                    .ok_or_else(|| ParseError::invalid_attr("attribute", "visibility", &value))?;
            }
            "static" => attribute.is_static = parse_bool("attribute", "static", &value)?,
            "final" | "leaf" => attribute.is_leaf = parse_bool("attribute", &attr, &value)?,
            "derived" => attribute.is_derived = parse_bool("attribute", "derived", &value)?,
            _ => {}
        }
    }

    if !is_empty {
        attribute.documentation = parse_documented_body(reader)?;
    }

    Ok((attribute, key))
}

/// Parses an operation and returns it with its unresolved parameter types.
fn parse_operation(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    is_empty: bool,
) -> Result<(Operation, Vec<(usize, String)>), ParseError> {
    let mut operation = Operation::default();
    let mut keys = Vec::new();

    for (attr, value) in attribute_pairs(e)? {
        match attr.as_str() {
            "name" => operation.name = value,
            "visibility" => {
                operation.visibility = Visibility::parse(&value)
                    .ok_or_else(|| ParseError::invalid_attr("operation", "visibility", &value))?;
            }
            "static" => operation.is_static = parse_bool("operation", "static", &value)?,
            "abstract" => operation.is_abstract = parse_bool("operation", "abstract", &value)?,
            "final" | "leaf" => operation.is_leaf = parse_bool("operation", &attr, &value)?,
            _ => {}
        }
    }

    if is_empty {
        return Ok((operation, keys));
    }

    let mut buf = Vec::new();

    loop {
        let (child, child_empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e.into_owned(), false),
            Ok(Event::Empty(e)) => (e.into_owned(), true),
            Ok(Event::End(_)) | Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {
                buf.clear();
                continue;
            }
        };
        buf.clear();

        let tag_bytes = child.name().as_ref().to_vec();
        match tag_bytes.as_slice() {
            b"parameter" => {
                let (parameter, key) = parse_parameter(reader, &child, child_empty)?;
                if let Some(key) = key {
                    keys.push((operation.parameters.len(), key));
                }
                operation.parameters.push(parameter);
            }
            b"documentation" if !child_empty => {
                operation.documentation = read_text(reader)?;
            }
            b"specification" if !child_empty => {
                operation.specification = read_text(reader)?;
            }
            _ => {
                if !child_empty {
                    skip_to_end(reader)?;
                }
            }
        }
    }

    Ok((operation, keys))
}

/// Parses a parameter and returns it with its unresolved type key.
fn parse_parameter(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    is_empty: bool,
) -> Result<(Parameter, Option<String>), ParseError> {
    let mut parameter = Parameter::default();
    let mut key = None;

    for (attr, value) in attribute_pairs(e)? {
        match attr.as_str() {
            "name" => parameter.name = value,
            "type" if !value.is_empty() => parameter.type_ref = TypeRef::Primitive(value),
            "typeRef" => key = Some(value),
            "multiplicity" => parameter.multiplicity = Multiplicity::new(value),
            "default" if !value.is_empty() => parameter.default_value = Some(value),
            "direction" => {
                parameter.direction = Direction::parse(&value)
                    .ok_or_else(|| ParseError::invalid_attr("parameter", "direction", &value))?;
            }
            _ => {}
        }
    }

    if !is_empty {
        parameter.documentation = parse_documented_body(reader)?;
    }

    Ok((parameter, key))
}

fn parse_literal(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    is_empty: bool,
) -> Result<EnumLiteral, ParseError> {
    let mut literal = EnumLiteral::default();

    for (attr, value) in attribute_pairs(e)? {
        if attr == "name" {
            literal.name = value;
        }
    }

    if !is_empty {
        literal.documentation = parse_documented_body(reader)?;
    }

    Ok(literal)
}

/// Parses the `end` children of an association.
fn parse_association_ends(
    reader: &mut Reader<&[u8]>,
) -> Result<Vec<(String, AssociationEnd)>, ParseError> {
    let mut ends = Vec::new();
    let mut buf = Vec::new();

    loop {
        let (e, is_empty) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e.into_owned(), false),
            Ok(Event::Empty(e)) => (e.into_owned(), true),
            Ok(Event::End(_)) | Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {
                buf.clear();
                continue;
            }
        };
        buf.clear();

        if e.name().as_ref() != b"end" {
            if !is_empty {
                skip_to_end(reader)?;
            }
            continue;
        }

        let mut key = None;
        // Placeholder reference, replaced once the key is resolved.
        let mut end = AssociationEnd::new(ElementId::new(0));

        for (attr, value) in attribute_pairs(&e)? {
            match attr.as_str() {
                "reference" => key = Some(value),
                "name" => end.name = value,
                "navigable" => end.navigable = parse_bool("end", "navigable", &value)?,
                "multiplicity" => end.multiplicity = Multiplicity::new(value),
                "default" if !value.is_empty() => end.default_value = Some(value),
                "visibility" => {
                    end.visibility = Visibility::parse(&value)
                        .ok_or_else(|| ParseError::invalid_attr("end", "visibility", &value))?;
                }
                "static" => end.is_static = parse_bool("end", "static", &value)?,
                "final" | "leaf" => end.is_leaf = parse_bool("end", &attr, &value)?,
                _ => {}
            }
        }

        if !is_empty {
            end.documentation = parse_documented_body(reader)?;
        }

        let key = key.ok_or_else(|| ParseError::missing_attr("end", "reference"))?;
        ends.push((key, end));
    }

    Ok(ends)
}

/// Reads a member body that may only contain a `documentation` child.
fn parse_documented_body(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut documentation = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag_bytes = e.name().as_ref().to_vec();
                if tag_bytes == b"documentation" {
                    documentation = read_text(reader)?;
                } else {
                    skip_to_end(reader)?;
                }
            }
            Ok(Event::End(_)) | Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(documentation)
}

/// Collects the unescaped attributes of an element.
fn attribute_pairs(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut pairs = Vec::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        pairs.push((key.to_string(), unescape(value)?.into_owned()));
    }

    Ok(pairs)
}

fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value.trim() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

/// Reads the text of the current element, unescaped and dedented.
///
/// CDATA sections are taken verbatim. Whitespace is preserved while reading
/// so that indentation survives until `dedent`.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    reader.config_mut().trim_text(false);
    let text = collect_text(reader);
    reader.config_mut().trim_text(true);
    Ok(dedent(&text?))
}

fn collect_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut escaped = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => escaped.push_str(std::str::from_utf8(&t)?),
            Event::GeneralRef(r) => {
                escaped.push('&');
                escaped.push_str(std::str::from_utf8(&r)?);
                escaped.push(';');
            }
            Event::CData(c) => {
                text.push_str(&unescape(&escaped)?);
                escaped.clear();
                text.push_str(std::str::from_utf8(&c)?);
            }
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(ParseError::InvalidStructure {
                    message: "unexpected end of document".to_string(),
                });
            }
            _ => {}
        }
        buf.clear();
    }

    text.push_str(&unescape(&escaped)?);
    Ok(text)
}

/// Removes surrounding blank lines and the common indentation of a block.
///
/// A first line that starts right after the opening tag does not take part
/// in the indentation computation.
pub(crate) fn dedent(text: &str) -> String {
    let starts_inline = text
        .lines()
        .next()
        .is_some_and(|line| !line.trim().is_empty());

    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let first_content = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let lines = &lines[first_content..];

    let indent = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| !(starts_inline && *i == 0) && !line.trim().is_empty())
        .map(|(_, line)| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            out.push("");
        } else if starts_inline && i == 0 {
            out.push(line.trim());
        } else {
            out.push(line.get(indent..).unwrap_or(line.trim_start()).trim_end());
        }
    }

    out.join("\n")
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
