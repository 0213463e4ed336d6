//! Shared descriptors for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;

use soap_wsdl::reflect::{FunctionKind, NativeParameter};
use soap_wsdl::xml::{Document, NodeId};
use soap_wsdl::{ClassDescriptor, FieldDescriptor, FunctionDescriptor, InMemoryCatalog, TypeCatalog};

pub const SERVICE_URI: &str = "http://localhost/MyService.php";

fn method(name: &str, params: &[&str], doc: &str) -> FunctionDescriptor {
    let params = params.iter().map(|p| NativeParameter::new(*p)).collect();
    FunctionDescriptor::reflect(name, params, None, doc)
}

pub fn test_class() -> ClassDescriptor {
    ClassDescriptor::new("Tests\\Fixtures\\Test")
        .method(method("testFunc1", &[], "/**\n * Test Function 1\n *\n * @return string\n */"))
        .method(method(
            "testFunc2",
            &["who"],
            "/**\n * Test Function 2\n *\n * @param string $who Some Arg\n * @return string\n */",
        ))
        .method(method(
            "testFunc3",
            &["who", "when"],
            "/**\n * Test Function 3\n *\n * @param string $who Some Arg\n * @param int $when Some\n * @return string\n */",
        ))
        .method(
            method("testFunc4", &[], "/**\n * Test Function 4\n *\n * @return string\n */")
                .with_kind(FunctionKind::StaticMethod),
        )
        .method(method("__construct", &[], "").with_kind(FunctionKind::Constructor))
}

pub fn catalog() -> Arc<dyn TypeCatalog> {
    let catalog = InMemoryCatalog::new()
        .with_class(test_class())
        .with_function(FunctionDescriptor::reflect(
            "add",
            vec![NativeParameter::new("x").typed("int"), NativeParameter::new("y").typed("int")],
            Some("int"),
            "/** Adds two numbers */",
        ))
        .with_function(FunctionDescriptor::reflect(
            "search",
            vec![
                NativeParameter::new("query").typed("string"),
                NativeParameter::new("limit").typed("int").optional(json!(10)),
            ],
            Some("string"),
            "/** Searches the index */",
        ))
        .with_function(method(
            "TestFunc",
            &["who"],
            "/**\n * Test Function\n *\n * @param string $arg\n * @return string\n */",
        ))
        .with_function(method("OneWay", &["message"], "/**\n * One way\n *\n * @param string $message\n */"))
        .with_class(ClassDescriptor::new("Tests\\Fixtures\\NoReturnType").method(method(
            "pushOneWay",
            &["message"],
            "/**\n * @param string $message\n */",
        )))
        .with_class(
            ClassDescriptor::new("Tests\\Fixtures\\MyResponse")
                .field(FieldDescriptor::reflect("p1", "/** @var string */").with_default()),
        )
        .with_class(
            ClassDescriptor::new("Tests\\Fixtures\\MyService")
                .method(method("foo", &["foo"], "/** @param string $foo\n @return \\Tests\\Fixtures\\MyResponse[] */"))
                .method(method("bar", &["bar"], "/** @param string $bar\n @return \\Tests\\Fixtures\\MyResponse[] */"))
                .method(method("baz", &["baz"], "/** @param string $baz\n @return \\Tests\\Fixtures\\MyResponse[] */")),
        )
        .with_class(
            ClassDescriptor::new("Tests\\Fixtures\\MyServiceSequence")
                .method(method("foo", &["foo"], "/** @param string $foo\n @return string[] */"))
                .method(method("bar", &["bar"], "/** @param string $bar\n @return string[] */"))
                .method(method("bazNested", &["baz"], "/** @param string $baz\n @return string[][][] */")),
        )
        .with_class(
            ClassDescriptor::new("Tests\\Fixtures\\Recursion")
                .field(FieldDescriptor::reflect("recursion", "/** @var \\Tests\\Fixtures\\Recursion */"))
                .method(method("create", &[], "/** @return \\Tests\\Fixtures\\Recursion */")),
        )
        .with_class(
            ClassDescriptor::new("Tests\\Fixtures\\ComplexTypeB")
                .field(FieldDescriptor::reflect("bar", "/** @var string */").with_default())
                .field(FieldDescriptor::reflect("foo", "/** @var string */").with_default()),
        )
        .with_class(
            ClassDescriptor::new("Tests\\Fixtures\\ComplexTypeA")
                .field(FieldDescriptor::reflect("baz", "/** @var \\Tests\\Fixtures\\ComplexTypeB[] */").with_default()),
        );
    Arc::new(catalog)
}

/// Elements named `name` anywhere under the root.
pub fn find_all(doc: &Document, name: &str) -> Vec<NodeId> {
    match doc.root() {
        Some(root) => doc.descendants_named(root, name),
        None => Vec::new(),
    }
}

/// Elements named `name` whose attribute `key` equals `value`.
pub fn find_with(doc: &Document, name: &str, key: &str, value: &str) -> Vec<NodeId> {
    find_all(doc, name)
        .into_iter()
        .filter(|n| doc.attribute(*n, key) == Some(value))
        .collect()
}
