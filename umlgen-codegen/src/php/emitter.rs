//! Declaration emission for classes, traits, interfaces, annotation types
//! and enumerations.

use super::members::MemberVariable;
use super::namespace::collect_uses;
use super::relations::{super_classes, super_dependencies, super_interfaces};
use super::synth::{
    abstract_overrides, accessors, interface_stubs, is_factory, rewrite_factory,
    stereotype_methods,
};
use super::types::TypeResolver;
use crate::config::{EnumStyle, GeneratorConfig};
use crate::writer::UnitBuffer;
use umlgen_model::{Classifier, ElementId, ElementKind, Model, Relationship};

/// Emits the declarations of one source unit.
///
/// The emitter is bound to the namespace of the unit; nested declarations
/// share it and their imports go to the same header.
#[derive(Debug, Clone, Copy)]
pub struct ElementEmitter<'a> {
    pub(super) model: &'a Model,
    pub(super) config: &'a GeneratorConfig,
    pub(super) types: TypeResolver<'a>,
}

impl<'a> ElementEmitter<'a> {
    /// Creates an emitter for a unit in `namespace`.
    #[must_use]
    pub fn new(model: &'a Model, config: &'a GeneratorConfig, namespace: &'a str) -> Self {
        Self {
            model,
            config,
            types: TypeResolver::new(model, namespace),
        }
    }

    /// Emits the declaration of a classifier. Other elements are ignored.
    pub fn emit(&self, unit: &mut UnitBuffer, id: ElementId) {
        match self.model.element(id).kind {
            ElementKind::Class(_) => self.emit_class(unit, id),
            ElementKind::Interface(_) => self.emit_interface(unit, id),
            ElementKind::Enumeration(_) => self.emit_enum(unit, id),
            ElementKind::AnnotationType(_) => self.emit_annotation_type(unit, id),
            _ => {}
        }
    }

    fn add_uses(&self, unit: &mut UnitBuffer, id: ElementId) {
        for path in collect_uses(self.model, id, self.types.namespace()) {
            unit.add_use(&path);
        }
    }

    fn documentation_with_author(&self, documentation: &str) -> String {
        let mut doc = documentation.trim().to_string();
        if let Some(author) = self.model.author.as_deref().filter(|a| !a.is_empty()) {
            doc.push_str(&format!("\n@author {author}"));
        }
        doc
    }

    /// Emits a class or trait.
    pub fn emit_class(&self, unit: &mut UnitBuffer, id: ElementId) {
        let element = self.model.element(id);
        let Some(classifier) = element.kind.classifier() else {
            return;
        };
        let name = element.name.as_str();

        self.add_uses(unit, id);
        self.emit_doc(unit, &self.documentation_with_author(&element.documentation));

        let mut terms = class_modifiers(classifier);
        terms.push(if classifier.has_stereotype("trait") {
            "trait".to_string()
        } else {
            "class".to_string()
        });
        terms.push(name.to_string());

        let supers = super_classes(self.model, id);
        if let Some(first) = supers.first() {
            terms.push(format!("extends {}", first.name(self.model)));
        }

        let interfaces = super_interfaces(self.model, id);
        if !interfaces.is_empty() {
            let names: Vec<String> = interfaces.iter().map(|i| i.name(self.model)).collect();
            terms.push(format!("implements {}", names.join(", ")));
        }

        unit.body.write_line(&terms.join(" "));
        unit.body.write_line("{");
        unit.body.indent();

        self.emit_trait_uses(unit, id);
        unit.body.blank();

        self.emit_member_variables(unit, id, classifier, true);

        if !name.is_empty() && supers.is_empty() && !classifier.declares_operation("__construct") {
            self.emit_doc(unit, &element.documentation);
            let constructor = match classifier.visibility.keyword() {
                Some(keyword) => format!("{keyword} function __construct()"),
                None => "function __construct()".to_string(),
            };
            unit.body.write_line(&constructor);
            unit.body.write_line("{");
            unit.body.write_line("}");
            unit.body.blank();
        }

        let indent = unit.body.indent_unit().to_string();
        for factory in classifier.operations.iter().filter(|op| is_factory(op)) {
            self.emit_method(unit, name, &rewrite_factory(factory, &indent), false, false);
            unit.body.blank();
        }

        let synthesized = classifier
            .attributes
            .iter()
            .flat_map(|attribute| accessors(classifier, attribute))
            .chain(stereotype_methods(classifier))
            .chain(interface_stubs(self.model, id));
        for op in synthesized {
            self.emit_method(unit, name, &op, false, false);
            unit.body.blank();
        }

        for op in classifier.operations.iter().filter(|op| !is_factory(op)) {
            self.emit_method(unit, name, op, false, false);
            unit.body.blank();
        }

        for op in abstract_overrides(self.model, id) {
            self.emit_method(unit, name, &op, false, false);
            unit.body.blank();
        }

        self.emit_nested(unit, classifier, true);

        unit.body.pop_blank();
        unit.body.outdent();
        unit.body.write_line("}");
    }

    /// Emits an interface.
    pub fn emit_interface(&self, unit: &mut UnitBuffer, id: ElementId) {
        let element = self.model.element(id);
        let Some(classifier) = element.kind.classifier() else {
            return;
        };

        self.add_uses(unit, id);
        self.emit_doc(unit, &element.documentation);

        let mut header = format!("interface {}", element.name);
        let supers = super_classes(self.model, id);
        if !supers.is_empty() {
            let names: Vec<String> = supers.iter().map(|s| s.name(self.model)).collect();
            header.push_str(&format!(" extends {}", names.join(", ")));
        }

        unit.body.write_line(&header);
        unit.body.write_line("{");
        unit.body.indent();

        self.emit_member_variables(unit, id, classifier, true);

        for op in &classifier.operations {
            self.emit_method(unit, &element.name, op, true, false);
            unit.body.blank();
        }

        self.emit_nested(unit, classifier, false);

        unit.body.pop_blank();
        unit.body.outdent();
        unit.body.write_line("}");
    }

    /// Emits an annotation type.
    pub fn emit_annotation_type(&self, unit: &mut UnitBuffer, id: ElementId) {
        let element = self.model.element(id);
        let Some(classifier) = element.kind.classifier() else {
            return;
        };

        self.emit_doc(unit, &self.documentation_with_author(&element.documentation));

        let mut terms = class_modifiers(classifier);
        terms.push("@interface".to_string());
        terms.push(element.name.clone());

        unit.body.write_line(&terms.join(" "));
        unit.body.write_line("{");
        unit.body.blank();
        unit.body.indent();

        self.emit_member_variables(unit, id, classifier, false);

        for op in &classifier.operations {
            self.emit_method(unit, &element.name, op, true, true);
            unit.body.blank();
        }

        self.emit_nested(unit, classifier, true);

        unit.body.pop_blank();
        unit.body.outdent();
        unit.body.write_line("}");
    }

    /// Emits an enumeration in the configured style.
    pub fn emit_enum(&self, unit: &mut UnitBuffer, id: ElementId) {
        let element = self.model.element(id);
        let Some(classifier) = element.kind.classifier() else {
            return;
        };

        self.add_uses(unit, id);
        self.emit_doc(unit, &element.documentation);

        let literals = classifier.literals.iter().filter(|l| !l.name.is_empty());

        match self.config.enum_style {
            EnumStyle::Native => {
                unit.body.write_line(&format!("enum {}", element.name));
                unit.body.write_line("{");
                unit.body.indent();
                for literal in literals {
                    self.emit_doc(unit, &literal.documentation);
                    unit.body.write_line(&format!("case {};", literal.name));
                }
            }
            EnumStyle::SplEnum => {
                unit.body
                    .write_line(&format!("class {} extends \\SplEnum", element.name));
                unit.body.write_line("{");
                unit.body.indent();
                for (value, literal) in literals.enumerate() {
                    self.emit_doc(unit, &literal.documentation);
                    unit.body
                        .write_line(&format!("const {} = {};", literal.name, value));
                }
            }
        }

        unit.body.outdent();
        unit.body.write_line("}");
    }

    /// Emits a `use` clause for traits, with an alias block when any
    /// dependency carries a mapping.
    fn emit_trait_uses(&self, unit: &mut UnitBuffer, id: ElementId) {
        let traits = super_dependencies(self.model, id);
        if traits.is_empty() {
            return;
        }

        let names: Vec<&str> = traits
            .iter()
            .map(|t| self.model.element(t.target).name.as_str())
            .collect();
        let mappings: Vec<&str> = traits
            .iter()
            .filter_map(|t| t.mapping.as_deref())
            .map(|m| m.trim().trim_end_matches(';'))
            .filter(|m| !m.is_empty())
            .collect();

        if mappings.is_empty() {
            unit.body.write_line(&format!("use {};", names.join(", ")));
            return;
        }

        unit.body.write_line(&format!("use {} {{", names.join(", ")));
        unit.body.indent();
        for mapping in mappings {
            unit.body.write_line(&format!("{mapping};"));
        }
        unit.body.outdent();
        unit.body.write_line("}");
    }

    /// Emits attributes and, when requested, navigable association ends not
    /// shadowed by an attribute of the same name. Each is followed by a
    /// blank line.
    fn emit_member_variables(
        &self,
        unit: &mut UnitBuffer,
        id: ElementId,
        classifier: &Classifier,
        with_associations: bool,
    ) {
        for attribute in classifier.attributes.iter().filter(|a| !a.name.is_empty()) {
            self.emit_member_variable(unit, MemberVariable::from(attribute));
            unit.body.blank();
        }

        if !with_associations {
            return;
        }

        let associations = self
            .model
            .relationships_of(id, |r| matches!(r, Relationship::Association(_)));
        for relationship in associations {
            let Relationship::Association(association) = relationship else {
                continue;
            };
            let Some(end) = association.navigable_end_from(id) else {
                continue;
            };
            if end.name.is_empty() || classifier.attributes.iter().any(|a| a.name == end.name) {
                continue;
            }
            self.emit_member_variable(unit, MemberVariable::from(end));
            unit.body.blank();
        }
    }

    /// Emits owned type declarations, each followed by a blank line.
    fn emit_nested(&self, unit: &mut UnitBuffer, classifier: &Classifier, interfaces: bool) {
        for &child in &classifier.owned {
            let element = self.model.element(child);
            if element.name.is_empty() {
                continue;
            }
            match element.kind {
                ElementKind::Class(_) => self.emit_class(unit, child),
                ElementKind::AnnotationType(_) => self.emit_annotation_type(unit, child),
                ElementKind::Interface(_) if interfaces => self.emit_interface(unit, child),
                ElementKind::Enumeration(_) => self.emit_enum(unit, child),
                _ => continue,
            }
            unit.body.blank();
        }
    }
}

fn class_modifiers(classifier: &Classifier) -> Vec<String> {
    let mut modifiers = Vec::new();
    if classifier.is_static {
        modifiers.push("static".to_string());
    }
    if classifier.is_abstract {
        modifiers.push("abstract".to_string());
    }
    if classifier.is_leaf {
        modifiers.push("final".to_string());
    }
    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::php::namespace::namespace_path;
    use umlgen_model::parse_model;

    fn render(xml: &str, name: &str, config: &GeneratorConfig) -> String {
        let model = parse_model(xml).expect("Failed to parse");
        let id = model.find_by_name(name).expect("element exists");
        let namespace = namespace_path(&model, id);
        let emitter = ElementEmitter::new(&model, config, &namespace);
        let mut unit = UnitBuffer::new(config.indent.unit(), namespace.as_str());
        emitter.emit(&mut unit, id);
        unit.finish()
    }

    #[test]
    fn test_simple_class() {
        let xml = r#"<model name="Shop" author="Jane">
    <package name="App">
        <class name="User">
            <attribute name="name" type="string" visibility="private"/>
        </class>
    </package>
</model>"#;

        let expected = r#"<?php

namespace App;

/**
 * @author Jane
 */
class User
{

    /**
     * @var string
     */
    private $name;

    public function __construct()
    {
    }

    /**
     * @param string $name
     * @return $this
     */
    public function setName($name)
    {
        $this->name = $name;

        return $this;
    }

    /**
     * @return string
     */
    public function getName()
    {
        return $this->name;
    }
}
"#;

        assert_eq!(render(xml, "User", &GeneratorConfig::default()), expected);
    }

    #[test]
    fn test_one_accessor_pair_per_attribute() {
        let xml = r#"<model name="M">
    <class name="User">
        <attribute name="name" type="string" visibility="private"/>
        <attribute name="active" type="bool" visibility="private"/>
        <attribute name="email" type="string" visibility="public"/>
        <attribute name="total" type="int" visibility="private" derived="true"/>
        <operation name="getName"><specification>return ucfirst($this->name);</specification></operation>
    </class>
</model>"#;

        let out = render(xml, "User", &GeneratorConfig::default().docs(false));
        assert_eq!(out.matches("function setName(").count(), 1);
        assert_eq!(out.matches("function getName(").count(), 1);
        assert!(out.contains("return ucfirst($this->name);"));
        assert_eq!(out.matches("function setActive(").count(), 1);
        assert_eq!(out.matches("function isActive(").count(), 1);
        assert!(!out.contains("getActive"));
        assert!(!out.contains("setEmail"));
        assert!(!out.contains("setTotal"));
    }

    #[test]
    fn test_accessors_with_strict_and_return_types() {
        let xml = r#"<model name="M">
    <package name="App">
        <class name="User">
            <attribute name="name" type="string" visibility="private"/>
        </class>
    </package>
</model>"#;
        let config = GeneratorConfig::default()
            .docs(false)
            .strict_types(true)
            .return_types(true);

        let out = render(xml, "User", &config);
        assert!(out.contains(
            "    public function setName($name): User\n    {\n        $this->name = $name;\n\n        return $this;\n    }"
        ));
        assert!(out.contains(
            "    public function getName(): string\n    {\n        return $this->name;\n    }"
        ));
        assert!(out.contains("    public function __construct()\n"));
    }

    #[test]
    fn test_stereotype_extends_without_import() {
        let xml = r#"<model name="M">
    <package name="App">
        <class name="Post" stereotype="extends BaseModel"/>
    </package>
</model>"#;

        let out = render(xml, "Post", &GeneratorConfig::default().docs(false));
        assert!(out.contains("class Post extends \\BaseModel\n"));
        assert!(!out.contains("\nuse "));
        assert!(!out.contains("__construct"));
    }

    #[test]
    fn test_countable_stereotype() {
        let xml = r#"<model name="M"><class name="Bag" stereotype="countable"/></model>"#;

        let out = render(xml, "Bag", &GeneratorConfig::default().docs(false));
        assert!(out.contains("class Bag implements \\countable\n"));
        assert!(out.contains(
            "    public function count()\n    {\n        // TODO: implement here\n        return 0;\n    }"
        ));
    }

    #[test]
    fn test_collection_types() {
        let xml = r#"<model name="M">
    <package name="App">
        <class id="role" name="Role"/>
        <class name="User">
            <attribute name="roles" typeRef="role" multiplicity="0..*" visibility="private"/>
        </class>
    </package>
</model>"#;

        let out = render(xml, "User", &GeneratorConfig::default().strict_types(true));
        assert!(out.contains("@var Role[]"));
        assert!(out.contains("private $roles = [];"));
        assert!(out.contains("@param Role[] $roles"));
        assert!(out.contains("public function setRoles(array $roles)"));
        assert!(out.contains("@return Role[]"));
    }

    #[test]
    fn test_namespace_collapsing_single_import() {
        let xml = r#"<model name="M">
    <package name="App">
        <package name="Models">
            <class id="role" name="Role"/>
            <class name="User">
                <attribute name="role" typeRef="role" visibility="private"/>
                <attribute name="mailer" typeRef="mailer" visibility="private"/>
                <operation name="notify">
                    <parameter name="mailer" typeRef="mailer"/>
                </operation>
            </class>
        </package>
        <package name="Services">
            <class id="mailer" name="Mailer"/>
        </package>
    </package>
</model>"#;

        let out = render(xml, "User", &GeneratorConfig::default().strict_types(true));
        assert_eq!(out.matches("use App\\Services\\Mailer;").count(), 1);
        assert!(!out.contains("use App\\Models\\Role;"));
        assert!(out.contains("public function setRole(Role $role)"));
        assert!(out.contains("public function notify(Mailer $mailer)"));
        assert!(out.starts_with("<?php\n\nnamespace App\\Models;\n\nuse App\\Services\\Mailer;\n\n"));
    }

    #[test]
    fn test_first_superclass_only() {
        let xml = r#"<model name="M">
    <class id="a" name="A"/>
    <class id="b" name="B">
        <operation name="draw" abstract="true"/>
    </class>
    <class id="c" name="C"/>
    <generalization source="a" target="b"/>
    <generalization source="a" target="c"/>
</model>"#;

        let out = render(xml, "A", &GeneratorConfig::default().docs(false));
        assert!(out.contains("class A extends B\n"));
        assert!(!out.contains(" C"));
        assert!(out.contains("public function draw()\n    {\n        // TODO: implement here\n    }"));
    }

    #[test]
    fn test_constructor_rules() {
        let xml = r#"<model name="M">
    <class name="Plain" visibility="protected">
        <documentation>Plain object.</documentation>
    </class>
    <class name="Custom">
        <operation name="__construct"><parameter name="x" type="int"/></operation>
    </class>
</model>"#;
        let config = GeneratorConfig::default();

        let plain = render(xml, "Plain", &config);
        assert!(plain.contains("    /**\n     * Plain object.\n     */\n    protected function __construct()\n    {\n    }\n"));

        let custom = render(xml, "Custom", &config);
        assert_eq!(custom.matches("__construct").count(), 1);
        assert!(custom.contains("public function __construct($x)"));
    }

    #[test]
    fn test_trait_with_mapping() {
        let xml = r#"<model name="M">
    <class id="logger" name="Logger" stereotype="trait"/>
    <class id="cache" name="Cache" stereotype="trait"/>
    <class id="svc" name="Service"/>
    <dependency source="svc" target="logger" mapping="Logger::log insteadof Cache"/>
    <dependency source="svc" target="cache"/>
</model>"#;
        let config = GeneratorConfig::default().docs(false);

        let service = render(xml, "Service", &config);
        assert!(service.contains(
            "class Service\n{\n    use Logger, Cache {\n        Logger::log insteadof Cache;\n    }\n\n"
        ));

        let logger = render(xml, "Logger", &config);
        assert!(logger.contains("trait Logger\n{"));
        assert!(!logger.contains("implements"));
    }

    #[test]
    fn test_navigable_association_member() {
        let xml = r#"<model name="M">
    <class id="order" name="Order">
        <attribute name="customer" type="string"/>
    </class>
    <class id="line" name="Line"/>
    <class id="cust" name="Customer"/>
    <association>
        <end reference="order"/>
        <end reference="line" navigable="true" name="lines" multiplicity="*"/>
    </association>
    <association>
        <end reference="order"/>
        <end reference="cust" navigable="true" name="customer"/>
    </association>
</model>"#;

        let out = render(xml, "Order", &GeneratorConfig::default());
        assert!(out.contains("     * @var Line[]\n     */\n    public $lines = [];"));
        assert_eq!(out.matches("$customer").count(), 1);
    }

    #[test]
    fn test_interface_stubs_in_class() {
        let xml = r#"<model name="M">
    <interface id="shape" name="Shape">
        <operation name="area"><parameter type="float" direction="return"/></operation>
    </interface>
    <class id="sq" name="Square"/>
    <realization source="sq" target="shape"/>
</model>"#;

        let out = render(xml, "Square", &GeneratorConfig::default().docs(false));
        assert!(out.contains("class Square implements Shape\n"));
        assert!(out.contains("public function area()\n    {\n        // TODO: implement here\n        return 0.0;\n    }"));
    }

    #[test]
    fn test_factory_method() {
        let xml = r#"<model name="M">
    <class name="Point">
        <operation name="createWithCoords" static="true">
            <parameter name="x" type="int"/>
            <parameter name="y" type="int"/>
            <parameter type="create" direction="return"/>
        </operation>
    </class>
</model>"#;

        let out = render(xml, "Point", &GeneratorConfig::default().docs(false));
        assert!(out.contains(
            "    public static function createWithCoords($x, $y)\n    {\n        return self::create()\n            ->setX($x)\n            ->setY($y);\n    }"
        ));
        assert_eq!(out.matches("createWithCoords").count(), 1);
    }

    #[test]
    fn test_interface() {
        let xml = r#"<model name="M">
    <package name="App">
        <interface id="base" name="Base"/>
        <interface id="named" name="Named">
            <documentation>Has a name.</documentation>
            <operation name="name"><parameter type="string" direction="return"/></operation>
        </interface>
        <generalization source="named" target="base"/>
    </package>
</model>"#;

        let expected = "<?php\n\nnamespace App;\n\n/**\n * Has a name.\n */\ninterface Named extends Base\n{\n    /**\n     * @return string\n     */\n    public function name();\n}\n";
        assert_eq!(render(xml, "Named", &GeneratorConfig::default()), expected);
    }

    #[test]
    fn test_annotation_type() {
        let xml = r#"<model name="M">
    <annotationType name="Route">
        <operation name="path"><parameter name="ignored" type="string"/></operation>
    </annotationType>
</model>"#;

        let out = render(xml, "Route", &GeneratorConfig::default().docs(false));
        assert_eq!(out, "<?php\n\n@interface Route\n{\n\n    public function path();\n}\n");
    }

    #[test]
    fn test_enum_styles() {
        let xml = r#"<model name="M">
    <enumeration name="State">
        <literal name="ACTIVE"/>
        <literal name="BLOCKED"/>
    </enumeration>
</model>"#;

        let native = render(
            xml,
            "State",
            &GeneratorConfig::default().enum_style(EnumStyle::Native),
        );
        assert_eq!(
            native,
            "<?php\n\nenum State\n{\n    case ACTIVE;\n    case BLOCKED;\n}\n"
        );

        let spl = render(xml, "State", &GeneratorConfig::default());
        assert_eq!(
            spl,
            "<?php\n\nclass State extends \\SplEnum\n{\n    const ACTIVE = 0;\n    const BLOCKED = 1;\n}\n"
        );
    }

    #[test]
    fn test_nested_declarations_share_header() {
        let xml = r#"<model name="M">
    <package name="App">
        <class name="Outer">
            <enumeration name="Kind"><literal name="A"/></enumeration>
            <class name="Inner">
                <attribute name="peer" typeRef="peer"/>
            </class>
        </class>
        <package name="Lib">
            <class id="peer" name="Peer"/>
        </package>
    </package>
</model>"#;

        let config = GeneratorConfig::default()
            .docs(false)
            .enum_style(EnumStyle::Native);
        let out = render(xml, "Outer", &config);
        assert!(out.starts_with("<?php\n\nnamespace App;\n\nuse App\\Lib\\Peer;\n\nclass Outer\n"));
        assert!(out.contains("    enum Kind\n    {\n        case A;\n    }\n\n    class Inner\n"));
        assert!(out.ends_with("    }\n}\n"));
    }

    #[test]
    fn test_tab_indentation() {
        let xml = r#"<model name="M"><interface name="I"><operation name="run"/></interface></model>"#;
        let config = GeneratorConfig::default()
            .docs(false)
            .indent(crate::config::IndentStyle::Tab);

        assert_eq!(
            render(xml, "I", &config),
            "<?php\n\ninterface I\n{\n\tpublic function run();\n}\n"
        );
    }
}
