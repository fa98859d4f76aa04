//! Synthesized operations.
//!
//! Every function here returns fresh [`Operation`] values; the model is
//! never modified.

use super::relations::{SuperType, first_super_class, is_input, super_interfaces};
use umlgen_model::{
    Attribute, Classifier, ElementId, Model, Operation, Parameter, TypeRef, Visibility,
};

/// Placeholder line written into unimplemented bodies.
pub const PLACEHOLDER: &str = "// TODO: implement here";

/// Converts `name` to camel case.
///
/// `_`, `-` and spaces separate words. Every word starts upper case except
/// the first one, which is lower cased unless `capitalize_first` is set.
#[must_use]
pub fn camelize(name: &str, capitalize_first: bool) -> String {
    let mut out = String::with_capacity(name.len());

    for (i, word) in name
        .split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 && !capitalize_first {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }

    out
}

fn is_boolean(type_ref: &TypeRef) -> bool {
    matches!(type_ref.primitive_name(), Some("bool" | "boolean"))
}

/// Returns the setter and getter for a private, non-derived attribute.
///
/// An accessor is left out when `owner` already declares an operation of
/// the same name.
#[must_use]
pub fn accessors(owner: &Classifier, attribute: &Attribute) -> Vec<Operation> {
    if attribute.name.is_empty()
        || attribute.visibility != Visibility::Private
        || attribute.is_derived
    {
        return Vec::new();
    }

    let field = &attribute.name;
    let param = camelize(field, false);
    let suffix = camelize(field, true);
    let target = if attribute.is_static {
        format!("self::${field}")
    } else {
        format!("$this->{field}")
    };

    let mut setter = Operation::new(format!("set{suffix}"));
    setter.is_static = attribute.is_static;
    setter.parameters.push(Parameter {
        name: param.clone(),
        documentation: attribute.documentation.clone(),
        type_ref: attribute.type_ref.clone(),
        multiplicity: attribute.multiplicity.clone(),
        ..Parameter::default()
    });
    if !attribute.is_static {
        setter
            .parameters
            .push(Parameter::returning(TypeRef::primitive("$this")));
    }
    setter.specification = format!("{target} = ${param};");

    let prefix = if is_boolean(&attribute.type_ref) {
        "is"
    } else {
        "get"
    };
    let mut getter = Operation::new(format!("{prefix}{suffix}"));
    getter.is_static = attribute.is_static;
    let mut ret = Parameter::returning(attribute.type_ref.clone());
    ret.multiplicity = attribute.multiplicity.clone();
    getter.parameters.push(ret);
    getter.specification = format!("return {target};");

    [setter, getter]
        .into_iter()
        .filter(|op| !owner.declares_operation(&op.name))
        .collect()
}

/// Returns the methods required by the stereotype tags of `owner`.
///
/// `IteratorAggregate` yields `getIterator()` and `Countable` yields
/// `count()` (tags match case-insensitively). Names the owner already
/// declares are skipped.
#[must_use]
pub fn stereotype_methods(owner: &Classifier) -> Vec<Operation> {
    let mut methods: Vec<Operation> = Vec::new();

    for tag in owner.stereotype_tags() {
        let (name, return_type, body) = match tag.to_lowercase().as_str() {
            "iteratoraggregate" => (
                "getIterator",
                "\\ArrayIterator",
                "return new \\ArrayIterator([]);",
            ),
            "countable" => ("count", "int", "return 0;"),
            _ => continue,
        };

        if owner.declares_operation(name) || methods.iter().any(|m| m.name == name) {
            continue;
        }

        let mut op = Operation::new(name);
        op.is_abstract = owner.is_abstract;
        op.parameters
            .push(Parameter::returning(TypeRef::primitive(return_type)));
        op.specification = format!("{PLACEHOLDER}\n{body}");
        methods.push(op);
    }

    methods
}

/// Returns placeholder implementations of the operations of every realized
/// interface that `id` does not declare itself.
#[must_use]
pub fn interface_stubs(model: &Model, id: ElementId) -> Vec<Operation> {
    let Some(owner) = model.classifier(id) else {
        return Vec::new();
    };

    super_interfaces(model, id)
        .iter()
        .filter_map(SuperType::element)
        .filter(|target| model.element(*target).kind.is_interface())
        .filter_map(|target| model.classifier(target))
        .flat_map(|interface| interface.operations.iter())
        .filter(|op| !owner.declares_operation(&op.name))
        .map(concrete_copy)
        .collect()
}

/// Returns concrete placeholders for the abstract operations of the first
/// superclass that `id` does not declare itself.
#[must_use]
pub fn abstract_overrides(model: &Model, id: ElementId) -> Vec<Operation> {
    let Some(owner) = model.classifier(id) else {
        return Vec::new();
    };
    let Some(parent) = first_super_class(model, id).and_then(|p| model.classifier(p)) else {
        return Vec::new();
    };

    parent
        .operations
        .iter()
        .filter(|op| op.is_abstract && !owner.declares_operation(&op.name))
        .map(concrete_copy)
        .collect()
}

fn concrete_copy(op: &Operation) -> Operation {
    Operation {
        is_abstract: false,
        specification: String::new(),
        ..op.clone()
    }
}

/// Returns true for factory operations (`createWith...`).
#[must_use]
pub fn is_factory(op: &Operation) -> bool {
    op.name.contains("createWith")
}

/// Returns a copy of a factory whose body creates the instance and chains
/// one setter call per input parameter.
#[must_use]
pub fn rewrite_factory(op: &Operation, indent: &str) -> Operation {
    let mut body = String::from("return self::create()");

    for param in op.parameters.iter().filter(|p| is_input(p.direction)) {
        body.push_str(&format!(
            "\n{indent}->set{}(${})",
            camelize(&param.name, true),
            camelize(&param.name, false)
        ));
    }
    body.push(';');

    Operation {
        specification: body,
        ..op.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umlgen_model::{Direction, Multiplicity, parse_model};

    fn private(name: &str, ty: &str) -> Attribute {
        Attribute::new(name, TypeRef::primitive(ty)).with_visibility(Visibility::Private)
    }

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("first_name", true), "FirstName");
        assert_eq!(camelize("first_name", false), "firstName");
        assert_eq!(camelize("created-at date", false), "createdAtDate");
        assert_eq!(camelize("Name", false), "name");
        assert_eq!(camelize("isActive", true), "IsActive");
        assert_eq!(camelize("", true), "");
    }

    #[test]
    fn test_accessor_pair() {
        let owner = Classifier::new();
        let ops = accessors(&owner, &private("name", "string"));

        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].name, "setName");
        assert_eq!(ops[0].specification, "$this->name = $name;");
        assert_eq!(
            ops[0].return_parameter().map(|p| p.type_ref.clone()),
            Some(TypeRef::primitive("$this"))
        );
        assert_eq!(ops[1].name, "getName");
        assert_eq!(ops[1].specification, "return $this->name;");
    }

    #[test]
    fn test_boolean_getter() {
        let owner = Classifier::new();
        let ops = accessors(&owner, &private("active", "bool"));
        assert_eq!(ops[1].name, "isActive");

        let ops = accessors(&owner, &private("enabled", "boolean"));
        assert_eq!(ops[1].name, "isEnabled");
    }

    #[test]
    fn test_static_accessors() {
        let owner = Classifier::new();
        let mut attr = private("count", "int");
        attr.is_static = true;

        let ops = accessors(&owner, &attr);
        assert!(ops[0].is_static);
        assert!(ops[0].return_parameter().is_none());
        assert_eq!(ops[0].specification, "self::$count = $count;");
        assert_eq!(ops[1].specification, "return self::$count;");
    }

    #[test]
    fn test_accessors_skip_declared() {
        let mut owner = Classifier::new();
        owner.operations.push(Operation::new("getName"));
        owner.operations.push(Operation::new("setName"));

        assert!(accessors(&owner, &private("name", "string")).is_empty());
    }

    #[test]
    fn test_accessors_only_private_non_derived() {
        let owner = Classifier::new();
        let public = Attribute::new("name", TypeRef::primitive("string"));
        let mut derived = private("total", "int");
        derived.is_derived = true;

        assert!(accessors(&owner, &public).is_empty());
        assert!(accessors(&owner, &derived).is_empty());
    }

    #[test]
    fn test_accessor_keeps_multiplicity() {
        let owner = Classifier::new();
        let attr = private("tags", "string").with_multiplicity(Multiplicity::new("0..*"));
        let ops = accessors(&owner, &attr);

        assert!(ops[0].parameters[0].multiplicity.is_many());
        assert!(ops[1].parameters[0].multiplicity.is_many());
    }

    #[test]
    fn test_stereotype_methods() {
        let mut owner = Classifier::with_stereotype("Countable, IteratorAggregate, Other");
        owner.is_abstract = true;

        let ops = stereotype_methods(&owner);
        let names: Vec<_> = ops.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["count", "getIterator"]);
        assert!(ops[0].is_abstract);
        assert_eq!(ops[0].specification, "// TODO: implement here\nreturn 0;");

        owner.operations.push(Operation::new("count"));
        assert_eq!(stereotype_methods(&owner).len(), 1);
    }

    #[test]
    fn test_interface_stubs_and_overrides() {
        let xml = r#"<model name="M">
    <interface id="shape" name="Shape">
        <operation name="area"><parameter type="float" direction="return"/></operation>
        <operation name="name"/>
    </interface>
    <class id="base" name="Base" abstract="true">
        <operation name="draw" abstract="true"/>
        <operation name="move"/>
    </class>
    <class id="circle" name="Circle">
        <operation name="name"><specification>return 'circle';</specification></operation>
    </class>
    <realization source="circle" target="shape"/>
    <generalization source="circle" target="base"/>
</model>"#;

        let model = parse_model(xml).expect("Failed to parse");
        let circle = model.lookup("circle").expect("circle");

        let stubs = interface_stubs(&model, circle);
        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].name, "area");
        assert!(stubs[0].specification.is_empty());

        let overrides = abstract_overrides(&model, circle);
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].name, "draw");
        assert!(!overrides[0].is_abstract);
    }

    #[test]
    fn test_rewrite_factory() {
        let mut op = Operation::new("createWithName");
        op.parameters
            .push(Parameter::new("first_name", TypeRef::primitive("string")));
        let mut out = Parameter::new("log", TypeRef::primitive("string"));
        out.direction = Direction::Out;
        op.parameters.push(out);
        op.parameters
            .push(Parameter::returning(TypeRef::primitive("create")));

        assert!(is_factory(&op));
        let rewritten = rewrite_factory(&op, "    ");
        assert_eq!(
            rewritten.specification,
            "return self::create()\n    ->setFirstName($firstName);"
        );
        assert_eq!(rewritten.parameters.len(), 3);
    }
}
