//! Model element definitions.
//!
//! The model is an arena of elements addressed by [`ElementId`]. Containment
//! is recorded twice: every element knows its parent, and every container
//! lists its owned elements in declaration order.

use crate::members::{Attribute, EnumLiteral, Operation, Visibility};
use crate::relationships::Relationship;
use std::collections::HashMap;
use std::fmt;

/// Handle of an element inside a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Creates a handle from a raw arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Complete object model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Project author, if known.
    pub author: Option<String>,
    elements: Vec<Element>,
    relationships: Vec<Relationship>,
    /// Lookup of user supplied keys (built during parsing).
    key_map: HashMap<String, ElementId>,
}

impl Model {
    /// Creates a model containing only its root element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let root = Element {
            id: ElementId(0),
            name: name.into(),
            documentation: String::new(),
            parent: None,
            kind: ElementKind::Model(Package::default()),
        };

        Self {
            author: None,
            elements: vec![root],
            relationships: Vec::new(),
            key_map: HashMap::new(),
        }
    }

    /// Returns the root element handle.
    #[must_use]
    pub const fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Returns the element for a handle created by this model.
    #[must_use]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    /// Returns the element for a handle, if it exists.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Returns the element mutably, if it exists.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Iterates over all elements in creation order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Adds an element below `parent` and returns its handle.
    ///
    /// If `parent` cannot own elements the new element is still created but
    /// not listed as owned.
    pub fn add_element(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        kind: ElementKind,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            id,
            name: name.into(),
            documentation: String::new(),
            parent: Some(parent),
            kind,
        });

        if let Some(owned) = self
            .elements
            .get_mut(parent.0)
            .and_then(|p| p.kind.owned_mut())
        {
            owned.push(id);
        }

        id
    }

    /// Returns the classifier of an element, if it is one.
    #[must_use]
    pub fn classifier(&self, id: ElementId) -> Option<&Classifier> {
        self.get(id).and_then(|e| e.kind.classifier())
    }

    /// Returns the classifier of an element mutably, if it is one.
    pub fn classifier_mut(&mut self, id: ElementId) -> Option<&mut Classifier> {
        self.get_mut(id).and_then(|e| e.kind.classifier_mut())
    }

    /// Returns the owned elements of a container in declaration order.
    #[must_use]
    pub fn owned_elements(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map_or(&[], |e| e.kind.owned())
    }

    /// Adds a relationship to the model.
    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.relationships.push(relationship);
    }

    /// Returns all relationships in declaration order.
    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Returns the relationships of `id` that satisfy `predicate`.
    pub fn relationships_of<'a, P>(
        &'a self,
        id: ElementId,
        predicate: P,
    ) -> impl Iterator<Item = &'a Relationship>
    where
        P: Fn(&Relationship) -> bool + 'a,
    {
        self.relationships
            .iter()
            .filter(move |r| r.involves(id) && predicate(r))
    }

    /// Registers a lookup key for an element.
    ///
    /// Returns false if the key is already taken.
    pub fn register_key(&mut self, key: impl Into<String>, id: ElementId) -> bool {
        let key = key.into();
        if self.key_map.contains_key(&key) {
            return false;
        }
        self.key_map.insert(key, id);
        true
    }

    /// Looks up an element by its registered key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ElementId> {
        self.key_map.get(key).copied()
    }

    /// Finds the first element with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        self.elements.iter().find(|e| e.name == name).map(|e| e.id)
    }

    /// Returns the names of the enclosing packages of `id`, outermost first.
    ///
    /// The model root contributes nothing.
    #[must_use]
    pub fn package_path(&self, id: ElementId) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self.get(id).and_then(|e| e.parent);

        while let Some(parent_id) = current {
            let parent = self.element(parent_id);
            if !matches!(parent.kind, ElementKind::Package(_)) {
                break;
            }
            path.push(parent.name.as_str());
            current = parent.parent;
        }

        path.reverse();
        path
    }
}

/// Named node of the containment tree.
#[derive(Debug, Clone)]
pub struct Element {
    /// Handle of this element.
    pub id: ElementId,
    /// Element name.
    pub name: String,
    /// Documentation text.
    pub documentation: String,
    /// Owning element (None for the root).
    pub parent: Option<ElementId>,
    /// Kind-specific data.
    pub kind: ElementKind,
}

/// Element kind variants.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Model root.
    Model(Package),
    /// Package (namespace).
    Package(Package),
    /// Class, or trait when stereotyped `trait`.
    Class(Classifier),
    /// Interface.
    Interface(Classifier),
    /// Enumeration.
    Enumeration(Classifier),
    /// Annotation type.
    AnnotationType(Classifier),
    /// Use case; only its stereotype reference matters for generation.
    UseCase(UseCase),
}

impl ElementKind {
    /// Returns the classifier data if this is a type container.
    #[must_use]
    pub const fn classifier(&self) -> Option<&Classifier> {
        match self {
            Self::Class(c) | Self::Interface(c) | Self::Enumeration(c) | Self::AnnotationType(c) => {
                Some(c)
            }
            _ => None,
        }
    }

    /// Returns the classifier data mutably if this is a type container.
    pub fn classifier_mut(&mut self) -> Option<&mut Classifier> {
        match self {
            Self::Class(c) | Self::Interface(c) | Self::Enumeration(c) | Self::AnnotationType(c) => {
                Some(c)
            }
            _ => None,
        }
    }

    /// Returns the owned element list.
    #[must_use]
    pub fn owned(&self) -> &[ElementId] {
        match self {
            Self::Model(p) | Self::Package(p) => &p.owned,
            Self::Class(c) | Self::Interface(c) | Self::Enumeration(c) | Self::AnnotationType(c) => {
                &c.owned
            }
            Self::UseCase(_) => &[],
        }
    }

    fn owned_mut(&mut self) -> Option<&mut Vec<ElementId>> {
        match self {
            Self::Model(p) | Self::Package(p) => Some(&mut p.owned),
            Self::Class(c) | Self::Interface(c) | Self::Enumeration(c) | Self::AnnotationType(c) => {
                Some(&mut c.owned)
            }
            Self::UseCase(_) => None,
        }
    }

    /// Returns true for packages and the model root.
    #[must_use]
    pub const fn is_package(&self) -> bool {
        matches!(self, Self::Model(_) | Self::Package(_))
    }

    /// Returns true for classes (including traits).
    #[must_use]
    pub const fn is_class(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    /// Returns true for interfaces.
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }

    /// Short name of the kind, used in messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Model(_) => "model",
            Self::Package(_) => "package",
            Self::Class(_) => "class",
            Self::Interface(_) => "interface",
            Self::Enumeration(_) => "enumeration",
            Self::AnnotationType(_) => "annotation type",
            Self::UseCase(_) => "use case",
        }
    }
}

/// Ordered contents of a package.
#[derive(Debug, Clone, Default)]
pub struct Package {
    /// Owned elements.
    pub owned: Vec<ElementId>,
}

/// Type container data shared by classes, interfaces, enumerations and
/// annotation types.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    /// Comma separated stereotype tags.
    pub stereotype: Option<String>,
    /// Visibility.
    pub visibility: Visibility,
    /// Static (nested) declaration.
    pub is_static: bool,
    /// Abstract declaration.
    pub is_abstract: bool,
    /// Final declaration.
    pub is_leaf: bool,
    /// Attributes in declaration order.
    pub attributes: Vec<Attribute>,
    /// Operations in declaration order.
    pub operations: Vec<Operation>,
    /// Literals (enumerations only).
    pub literals: Vec<EnumLiteral>,
    /// Nested elements.
    pub owned: Vec<ElementId>,
}

impl Classifier {
    /// Creates an empty public classifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier with the given stereotype.
    #[must_use]
    pub fn with_stereotype(stereotype: impl Into<String>) -> Self {
        Self {
            stereotype: Some(stereotype.into()),
            ..Self::default()
        }
    }

    /// Returns the trimmed, non-empty stereotype tags in order.
    pub fn stereotype_tags(&self) -> impl Iterator<Item = &str> {
        self.stereotype
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Returns true if the whole stereotype equals `tag`.
    #[must_use]
    pub fn has_stereotype(&self, tag: &str) -> bool {
        self.stereotype.as_deref().map(str::trim) == Some(tag)
    }

    /// Returns true if an operation with this exact name is declared.
    #[must_use]
    pub fn declares_operation(&self, name: &str) -> bool {
        self.operations.iter().any(|op| op.name == name)
    }
}

/// Use case data.
#[derive(Debug, Clone, Default)]
pub struct UseCase {
    /// Classifier named by the use case's stereotype.
    pub stereotype_ref: Option<ElementId>,
}
