//! Descriptors for the callables and classes a service exposes.
//!
//! The WSDL builder never inspects code. It reads these descriptors through a
//! [`TypeCatalog`], which any front end (a source scanner, a build script, a
//! hand-written table) can fill in.

mod catalog;
pub mod docblock;

pub use catalog::{InMemoryCatalog, TypeCatalog};

use serde_json::Value;

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// What kind of callable a descriptor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunctionKind {
    #[default]
    Function,
    Method,
    StaticMethod,
    Constructor,
    Destructor,
}

/// A parameter of one prototype.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    pub optional: bool,
    pub default_value: Option<Value>,
    pub position: usize,
}

/// One call signature of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub return_type: String,
    pub parameters: Vec<Parameter>,
}

/// A parameter as declared, before doc-comment types are merged in.
#[derive(Debug, Clone, Default)]
pub struct NativeParameter {
    pub name: String,
    pub native_type: Option<String>,
    pub optional: bool,
    pub default_value: Option<Value>,
}

impl NativeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn typed(mut self, native_type: impl Into<String>) -> Self {
        self.native_type = Some(native_type.into());
        self
    }

    pub fn optional(mut self, default_value: Value) -> Self {
        self.optional = true;
        self.default_value = Some(default_value);
        self
    }
}

/// A free function or a method.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    pub name: String,
    pub kind: FunctionKind,
    pub visibility: Visibility,
    pub description: String,
    pub prototypes: Vec<Prototype>,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>, prototypes: Vec<Prototype>) -> Self {
        Self {
            name: name.into(),
            kind: FunctionKind::Function,
            visibility: Visibility::Public,
            description: String::new(),
            prototypes,
        }
    }

    /// Builds a descriptor from declared parameters and a doc-comment.
    ///
    /// Parameter types come from the declaration, then `@param` by name, then
    /// `@param` by position, then `mixed`. The return type comes from the
    /// declaration, then `@return`, then `void`.
    pub fn reflect(
        name: impl Into<String>,
        parameters: Vec<NativeParameter>,
        native_return: Option<&str>,
        doc_comment: &str,
    ) -> Self {
        let documented = docblock::param_types(doc_comment);
        let by_name = docblock::param_types_by_name(doc_comment);

        let parameters = parameters
            .into_iter()
            .enumerate()
            .map(|(position, native)| {
                let type_name = native
                    .native_type
                    .clone()
                    .or_else(|| by_name.get(&native.name).cloned())
                    .or_else(|| documented.get(position).map(|(_, t)| t.clone()))
                    .unwrap_or_else(|| "mixed".to_string());
                Parameter {
                    name: native.name,
                    type_name,
                    optional: native.optional,
                    default_value: native.default_value,
                    position,
                }
            })
            .collect();

        let return_type = native_return
            .map(str::to_string)
            .or_else(|| docblock::return_type(doc_comment))
            .unwrap_or_else(|| "void".to_string());

        Self {
            description: docblock::description(doc_comment),
            ..Self::new(name, vec![Prototype { return_type, parameters }])
        }
    }

    pub fn with_kind(mut self, kind: FunctionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// The prototype with the most parameters. Ties keep the first one.
    pub fn widest_prototype(&self) -> Option<&Prototype> {
        self.prototypes
            .iter()
            .reduce(|widest, p| if p.parameters.len() > widest.parameters.len() { p } else { widest })
    }
}

/// A class property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDescriptor {
    pub name: String,
    pub visibility: Visibility,
    /// Type from `@var`; fields without one are not exposed.
    pub type_name: Option<String>,
    pub default_is_null: bool,
    pub doc_comment: String,
}

impl FieldDescriptor {
    /// A public field with a null default, typed from its doc-comment.
    pub fn reflect(name: impl Into<String>, doc_comment: &str) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            type_name: docblock::var_type(doc_comment),
            default_is_null: true,
            doc_comment: doc_comment.to_string(),
        }
    }

    /// Marks the field as having a non-null default value.
    pub fn with_default(mut self) -> Self {
        self.default_is_null = false;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// A class: its fields feed complex types, its methods feed operations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassDescriptor {
    /// Fully qualified name, e.g. `App\Model\Book`.
    pub name: String,
    pub doc_comment: String,
    pub fields: Vec<FieldDescriptor>,
    pub methods: Vec<FunctionDescriptor>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_doc(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = doc_comment.into();
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: FunctionDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Methods that become service operations: public, not a constructor or
    /// destructor, and not a `__` magic method.
    pub fn service_methods(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.methods.iter().filter(|m| {
            m.visibility == Visibility::Public
                && !matches!(m.kind, FunctionKind::Constructor | FunctionKind::Destructor)
                && !m.name.starts_with("__")
        })
    }

    /// Short name after the last namespace separator.
    pub fn short_name(&self) -> &str {
        let trimmed = self.name.trim_matches('\\');
        trimmed.rsplit('\\').next().unwrap_or(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reflect_type_precedence() {
        let function = FunctionDescriptor::reflect(
            "testFunc3",
            vec![
                NativeParameter::new("who"),
                NativeParameter::new("when").typed("int"),
                NativeParameter::new("what"),
            ],
            None,
            "/**\n * Test Function 3\n * @param string $who\n * @param bool $x\n */",
        );

        let proto = &function.prototypes[0];
        assert_eq!(proto.parameters[0].type_name, "string");
        assert_eq!(proto.parameters[1].type_name, "int");
        // No declared type, no @param by name or position
        assert_eq!(proto.parameters[2].type_name, "mixed");
        assert_eq!(proto.return_type, "void");
        assert_eq!(function.description, "Test Function 3");
    }

    #[test]
    fn test_reflect_positional_param() {
        let function = FunctionDescriptor::reflect(
            "f",
            vec![NativeParameter::new("a"), NativeParameter::new("b")],
            None,
            "/** @param integer $x\n * @param double $y\n * @return boolean */",
        );
        let proto = &function.prototypes[0];
        assert_eq!(proto.parameters[0].type_name, "int");
        assert_eq!(proto.parameters[1].type_name, "float");
        assert_eq!(proto.return_type, "bool");
    }

    #[test]
    fn test_widest_prototype() {
        let narrow = Prototype { return_type: "int".into(), parameters: vec![] };
        let wide = FunctionDescriptor::reflect(
            "f",
            vec![NativeParameter::new("a").optional(json!(1))],
            Some("int"),
            "",
        )
        .prototypes
        .remove(0);
        let function = FunctionDescriptor::new("f", vec![narrow, wide.clone()]);
        assert_eq!(function.widest_prototype(), Some(&wide));
        assert!(FunctionDescriptor::new("g", vec![]).widest_prototype().is_none());
    }

    #[test]
    fn test_service_methods_filter() {
        let class = ClassDescriptor::new("\\App\\Service\\")
            .method(FunctionDescriptor::new("__construct", vec![]).with_kind(FunctionKind::Constructor))
            .method(FunctionDescriptor::new("__invoke", vec![]).with_kind(FunctionKind::Method))
            .method(FunctionDescriptor::new("hidden", vec![]).with_visibility(Visibility::Protected))
            .method(FunctionDescriptor::new("visible", vec![]).with_kind(FunctionKind::StaticMethod));

        let names: Vec<_> = class.service_methods().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["visible"]);
        assert_eq!(class.short_name(), "Service");
    }

    #[test]
    fn test_field_reflect() {
        let field = FieldDescriptor::reflect("var", "/** @var int */").with_default();
        assert_eq!(field.type_name.as_deref(), Some("int"));
        assert!(!field.default_is_null);
        assert!(FieldDescriptor::reflect("noDoc", "").type_name.is_none());
    }
}
