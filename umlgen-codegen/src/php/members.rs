//! Doc block, member variable and method emission.

use super::emitter::ElementEmitter;
use super::namespace::SEPARATOR;
use super::synth::PLACEHOLDER;
use super::types::{TypeMode, default_return, is_hintable};
use crate::writer::UnitBuffer;
use umlgen_model::{AssociationEnd, Attribute, Operation, Parameter, Typed, Visibility};

/// Field-like view over attributes and association ends.
pub struct MemberVariable<'m> {
    /// Variable name.
    pub name: &'m str,
    /// Documentation text.
    pub documentation: &'m str,
    /// Type, multiplicity and default value.
    pub typed: &'m dyn Typed,
    /// Visibility.
    pub visibility: Visibility,
    /// Class-level member.
    pub is_static: bool,
    /// Emitted as a constant.
    pub is_leaf: bool,
}

impl<'m> From<&'m Attribute> for MemberVariable<'m> {
    fn from(attribute: &'m Attribute) -> Self {
        Self {
            name: &attribute.name,
            documentation: &attribute.documentation,
            typed: attribute,
            visibility: attribute.visibility,
            is_static: attribute.is_static,
            is_leaf: attribute.is_leaf,
        }
    }
}

impl<'m> From<&'m AssociationEnd> for MemberVariable<'m> {
    fn from(end: &'m AssociationEnd) -> Self {
        Self {
            name: &end.name,
            documentation: &end.documentation,
            typed: end,
            visibility: end.visibility,
            is_static: end.is_static,
            is_leaf: end.is_leaf,
        }
    }
}

/// Renders a parameter name; `&name` passes by reference.
///
/// Doc blocks never show the `&`.
fn param_name(name: &str, for_doc: bool) -> String {
    let name = name.trim();
    if name.contains('&') {
        let bare = name.replace('&', "");
        if for_doc {
            format!("${bare}")
        } else {
            format!("&${bare}")
        }
    } else {
        format!("${name}")
    }
}

impl ElementEmitter<'_> {
    /// Writes a `/** ... */` block, one trimmed line per text line.
    ///
    /// Nothing is written when docs are disabled or the text is empty.
    pub fn emit_doc(&self, unit: &mut UnitBuffer, text: &str) {
        let text = text.trim();
        if !self.config.docs || text.is_empty() {
            return;
        }

        unit.body.write_line("/**");
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                unit.body.write_line(" *");
            } else {
                unit.body.write_line(&format!(" * {line}"));
            }
        }
        unit.body.write_line(" */");
    }

    /// Writes a member variable (or constant) declaration with its doc.
    pub fn emit_member_variable(&self, unit: &mut UnitBuffer, member: MemberVariable<'_>) {
        if member.name.is_empty() {
            return;
        }

        let doc_type = self
            .types
            .resolve(Some(member.typed), TypeMode::Documentation, true);
        self.emit_doc(
            unit,
            &format!("@var {} {}", doc_type, member.documentation.trim()),
        );

        let mut terms = Vec::new();
        if member.is_leaf {
            terms.push(format!("const {}", member.name.to_uppercase()));
        } else {
            if let Some(keyword) = member.visibility.keyword() {
                terms.push(keyword.to_string());
            }
            if member.is_static {
                terms.push("static".to_string());
            }
            terms.push(format!("${}", member.name));
        }

        match member.typed.default_value().filter(|v| !v.is_empty()) {
            Some(value) => terms.push(format!("= {value}")),
            None if member.typed.multiplicity().is_many() => terms.push("= []".to_string()),
            None => {}
        }

        unit.body.write_line(&format!("{};", terms.join(" ")));
    }

    /// Writes a method declaration.
    ///
    /// # Arguments
    /// * `unit` - Target unit; deep parameter hints add imports to it
    /// * `owner_name` - Short name of the declaring type, used for `$this`
    ///   return declarations
    /// * `op` - Operation to emit
    /// * `skip_body` - Emit a signature terminated by `;`
    /// * `skip_params` - Emit an empty parameter list
    pub fn emit_method(
        &self,
        unit: &mut UnitBuffer,
        owner_name: &str,
        op: &Operation,
        skip_body: bool,
        skip_params: bool,
    ) {
        if op.name.is_empty() {
            return;
        }

        let params: Vec<&Parameter> = op.non_return_parameters().collect();
        let ret = op.return_parameter();

        let mut doc = op.documentation.trim().to_string();
        for param in &params {
            doc.push_str(&format!(
                "\n@param {} {} {}",
                self.types
                    .resolve(Some(*param), TypeMode::Documentation, true),
                param_name(&param.name, true),
                param.documentation
            ));
        }
        if let Some(ret) = ret {
            doc.push_str(&format!(
                "\n@return {} {}",
                self.types.resolve(Some(ret), TypeMode::Documentation, true),
                ret.documentation
            ));
        }
        self.emit_doc(unit, &doc);

        let mut terms: Vec<String> = Vec::new();
        if let Some(keyword) = op.visibility.keyword() {
            terms.push(keyword.to_string());
        }
        if op.is_static {
            terms.push("static".to_string());
        }
        if op.is_abstract {
            terms.push("abstract".to_string());
        }
        if op.is_leaf {
            terms.push("final".to_string());
        }
        terms.push("function".to_string());

        let mut param_terms = Vec::new();
        if !skip_params {
            for param in &params {
                param_terms.push(self.parameter(unit, param));
            }
        }

        let mut signature = format!("{}({})", op.name, param_terms.join(", "));
        if self.config.return_types && op.name != "__construct" {
            let ty = match ret {
                Some(ret) => {
                    let ty = self.types.resolve(Some(ret), TypeMode::Code, false);
                    match ty.as_str() {
                        "$this" => owner_name.to_string(),
                        "create" => "static".to_string(),
                        _ => ty,
                    }
                }
                None => "void".to_string(),
            };
            signature.push_str(&format!(": {ty}"));
        }
        terms.push(signature);

        let header = terms.join(" ");
        if skip_body || op.is_abstract {
            unit.body.write_line(&format!("{header};"));
            return;
        }

        unit.body.write_line(&header);
        unit.body.write_line("{");
        unit.body.indent();

        let return_type = ret.map(|r| self.types.resolve(Some(r), TypeMode::Code, false));
        let specification = op.specification.trim();

        if !specification.is_empty() {
            unit.body.write_line(specification);
            if return_type.as_deref() == Some("$this") && !op.is_static {
                unit.body.blank();
                unit.body.write_line("return $this;");
            }
        } else {
            unit.body.write_line(PLACEHOLDER);
            if let Some(ty) = return_type {
                if let Some(statement) = default_return(&ty) {
                    if !(ty == "$this" && op.is_static) {
                        unit.body.write_line(statement);
                    }
                }
            }
        }

        unit.body.outdent();
        unit.body.write_line("}");
    }

    /// Renders one parameter of a signature.
    fn parameter(&self, unit: &mut UnitBuffer, param: &Parameter) -> String {
        let mut term = param_name(&param.name, false);

        if self.config.strict_types {
            let mut ty = self.types.resolve(Some(param), TypeMode::Code, false);
            if ty.contains('|') {
                ty = "void".to_string();
            }

            if is_hintable(&ty) {
                let mut hint = ty.as_str();
                if ty.matches(SEPARATOR).count() > 1 {
                    if ty != format!("{SEPARATOR}{}", self.types.namespace()) {
                        unit.add_use(&ty);
                    }
                    hint = ty.rsplit(SEPARATOR).next().unwrap_or(hint);
                }
                term = format!("{hint} {term}");
            }
        }

        if let Some(value) = param.default_value.as_deref().filter(|v| !v.is_empty()) {
            term.push_str(&format!(" = {value}"));
        }

        term
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use umlgen_model::{Model, Multiplicity, TypeRef, parse_model};

    fn emit_op(model: &Model, config: &GeneratorConfig, namespace: &str, op: &Operation) -> UnitBuffer {
        let emitter = ElementEmitter::new(model, config, namespace);
        let mut unit = UnitBuffer::new("    ", namespace);
        emitter.emit_method(&mut unit, "Owner", op, false, false);
        unit
    }

    fn body(unit: UnitBuffer) -> String {
        unit.body.into_string()
    }

    #[test]
    fn test_param_name() {
        assert_eq!(param_name("name", false), "$name");
        assert_eq!(param_name("&items", false), "&$items");
        assert_eq!(param_name("&items", true), "$items");
    }

    #[test]
    fn test_placeholder_and_default_return() {
        let model = Model::new("M");
        let config = GeneratorConfig::default();
        let mut op = Operation::new("total");
        op.parameters
            .push(Parameter::new("rate", TypeRef::primitive("float")));
        op.parameters
            .push(Parameter::returning(TypeRef::primitive("int")));

        assert_eq!(
            body(emit_op(&model, &config, "", &op)),
            "/**\n * @param float $rate\n * @return int\n */\npublic function total($rate)\n{\n    // TODO: implement here\n    return 0;\n}"
        );
    }

    #[test]
    fn test_void_has_no_default_return() {
        let model = Model::new("M");
        let config = GeneratorConfig::default().docs(false);
        let op = Operation::new("run");

        assert_eq!(
            body(emit_op(&model, &config, "", &op)),
            "public function run()\n{\n    // TODO: implement here\n}"
        );
    }

    #[test]
    fn test_specification_with_this_return() {
        let model = Model::new("M");
        let config = GeneratorConfig::default().docs(false);
        let mut op = Operation::new("reset");
        op.parameters
            .push(Parameter::returning(TypeRef::primitive("$this")));
        op.specification = "$this->items = [];".to_string();

        assert_eq!(
            body(emit_op(&model, &config, "", &op)),
            "public function reset()\n{\n    $this->items = [];\n\n    return $this;\n}"
        );

        op.is_static = true;
        assert_eq!(
            body(emit_op(&model, &config, "", &op)),
            "public static function reset()\n{\n    $this->items = [];\n}"
        );
    }

    #[test]
    fn test_abstract_signature() {
        let model = Model::new("M");
        let config = GeneratorConfig::default().docs(false);
        let mut op = Operation::new("draw");
        op.is_abstract = true;
        op.visibility = Visibility::Protected;

        assert_eq!(
            body(emit_op(&model, &config, "", &op)),
            "protected abstract function draw();"
        );
    }

    #[test]
    fn test_strict_hints() {
        let xml = r#"<model name="M">
    <package name="App">
        <package name="Services"><class id="mailer" name="Mailer"/></package>
        <class id="local" name="Local"/>
    </package>
</model>"#;
        let model = parse_model(xml).expect("Failed to parse");
        let config = GeneratorConfig::default().docs(false).strict_types(true);

        let mut op = Operation::new("send");
        op.parameters.push(Parameter::new(
            "mailer",
            TypeRef::Element(model.lookup("mailer").expect("mailer")),
        ));
        op.parameters.push(Parameter::new(
            "local",
            TypeRef::Element(model.lookup("local").expect("local")),
        ));
        op.parameters
            .push(Parameter::new("subject", TypeRef::primitive("string")));
        let mut tags = Parameter::new("tags", TypeRef::primitive("string"));
        tags.multiplicity = Multiplicity::many();
        op.parameters.push(tags);
        let mut retries = Parameter::new("retries", TypeRef::primitive("int|null"));
        retries.default_value = Some("3".to_string());
        op.parameters.push(retries);

        let unit = emit_op(&model, &config, "App", &op);
        assert_eq!(unit.uses(), &["App\\Services\\Mailer".to_string()]);
        assert_eq!(
            body(unit),
            "public function send(Mailer $mailer, Local $local, $subject, array $tags, $retries = 3)\n{\n    // TODO: implement here\n}"
        );
    }

    #[test]
    fn test_return_declarations() {
        let model = Model::new("M");
        let config = GeneratorConfig::default().docs(false).return_types(true);

        let mut fluent = Operation::new("with");
        fluent
            .parameters
            .push(Parameter::returning(TypeRef::primitive("object")));
        assert!(body(emit_op(&model, &config, "", &fluent)).starts_with("public function with(): Owner\n"));

        let plain = Operation::new("run");
        assert!(body(emit_op(&model, &config, "", &plain)).starts_with("public function run(): void\n"));

        let mut factory = Operation::new("createWithX");
        factory.is_static = true;
        factory
            .parameters
            .push(Parameter::new("x", TypeRef::primitive("int")));
        factory
            .parameters
            .push(Parameter::returning(TypeRef::primitive("create")));
        assert!(
            body(emit_op(&model, &config, "", &factory))
                .starts_with("public static function createWithX($x): static\n")
        );

        let ctor = Operation::new("__construct");
        assert!(body(emit_op(&model, &config, "", &ctor)).starts_with("public function __construct()\n"));
    }

    #[test]
    fn test_member_variables() {
        let model = Model::new("M");
        let config = GeneratorConfig::default();
        let emitter = ElementEmitter::new(&model, &config, "");
        let mut unit = UnitBuffer::new("    ", "");

        let mut tags = Attribute::new("tags", TypeRef::primitive("string"))
            .with_visibility(Visibility::Protected)
            .with_multiplicity(Multiplicity::new("0..*"));
        tags.documentation = "Labels.".to_string();
        emitter.emit_member_variable(&mut unit, (&tags).into());

        let mut max = Attribute::new("max", TypeRef::primitive("int"));
        max.is_leaf = true;
        max.default_value = Some("10".to_string());
        emitter.emit_member_variable(&mut unit, (&max).into());

        let mut count = Attribute::new("count", TypeRef::primitive("int"))
            .with_visibility(Visibility::Private);
        count.is_static = true;
        emitter.emit_member_variable(&mut unit, (&count).into());

        assert_eq!(
            body(unit),
            "/**\n * @var string[] Labels.\n */\nprotected $tags = [];\n/**\n * @var int\n */\nconst MAX = 10;\n/**\n * @var int\n */\nprivate static $count;"
        );
    }

    #[test]
    fn test_doc_disabled() {
        let model = Model::new("M");
        let config = GeneratorConfig::default().docs(false);
        let emitter = ElementEmitter::new(&model, &config, "");
        let mut unit = UnitBuffer::new("    ", "");

        emitter.emit_doc(&mut unit, "Something.");
        assert!(unit.body.is_empty());
    }

    #[test]
    fn test_doc_blank_lines() {
        let model = Model::new("M");
        let config = GeneratorConfig::default();
        let emitter = ElementEmitter::new(&model, &config, "");
        let mut unit = UnitBuffer::new("    ", "");

        emitter.emit_doc(&mut unit, "  First.\n\n  Second.  ");
        assert_eq!(body(unit), "/**\n * First.\n *\n * Second.\n */");
    }
}
