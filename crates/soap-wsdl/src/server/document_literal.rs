use serde_json::{Map, Value};
use tracing::trace;

use super::ServiceObject;
use crate::diagnostic::SoapError;

/// Adapts a plain service object to document/literal wrapped calls.
///
/// A wrapped request arrives as a single object whose properties are the
/// method's parameters, e.g. `{"x": 10, "y": 20}` for `add(x, y)`. The
/// wrapper spreads it into positional arguments and wraps the return value
/// as `{"addResult": 30}`.
#[derive(Debug)]
pub struct DocumentLiteralWrapper<S> {
    service: S,
}

impl<S: ServiceObject> DocumentLiteralWrapper<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn into_inner(self) -> S {
        self.service
    }

    /// Unwraps the request, calls `method` and wraps its result.
    pub fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, SoapError> {
        let [request]: [Value; 1] = args
            .try_into()
            .map_err(|args: Vec<Value>| SoapError::WrapperArity { count: args.len() })?;

        let parameters = self
            .service
            .parameters(method)
            .ok_or_else(|| SoapError::UnknownMethod {
                method: method.to_string(),
                delegate: self.service.name().to_string(),
            })?;

        let Value::Object(request) = request else {
            return Err(SoapError::InvalidRequest {
                method: method.to_string(),
            });
        };

        let args = self.parse_arguments(method, &parameters, request)?;
        trace!(method, args = args.len(), "dispatching wrapped call");
        let ret = self.service.invoke(method, args)?;

        let mut response = Map::new();
        response.insert(format!("{}Result", method), ret);
        Ok(Value::Object(response))
    }

    fn parse_arguments(
        &self,
        method: &str,
        parameters: &[String],
        request: Map<String, Value>,
    ) -> Result<Vec<Value>, SoapError> {
        // Parameters missing from the request are passed as null
        let mut args = vec![Value::Null; parameters.len()];
        for (name, value) in request {
            let position = parameters
                .iter()
                .position(|p| *p == name)
                .ok_or_else(|| SoapError::UnknownArgument {
                    argument: name.clone(),
                    delegate: self.service.name().to_string(),
                    method: method.to_string(),
                })?;
            args[position] = value;
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct Calculator;

    impl ServiceObject for Calculator {
        fn name(&self) -> &str {
            "MyCalculatorService"
        }

        fn parameters(&self, method: &str) -> Option<Vec<String>> {
            match method {
                "add" => Some(vec!["x".to_string(), "y".to_string()]),
                _ => None,
            }
        }

        fn invoke(&self, _method: &str, args: Vec<Value>) -> Result<Value, SoapError> {
            let sum: i64 = args.iter().filter_map(Value::as_i64).sum();
            Ok(json!(sum))
        }
    }

    #[test]
    fn test_delegate_unwraps_and_wraps() {
        let wrapper = DocumentLiteralWrapper::new(Calculator);
        let response = wrapper.call("add", vec![json!({"x": 10, "y": 20})]).unwrap();
        assert_eq!(response, json!({"addResult": 30}));
    }

    #[test]
    fn test_arguments_are_placed_by_position() {
        let wrapper = DocumentLiteralWrapper::new(Calculator);
        let args = wrapper
            .parse_arguments("add", &["x".to_string(), "y".to_string()], {
                let Value::Object(map) = json!({"y": 2, "x": 1}) else { unreachable!() };
                map
            })
            .unwrap();
        assert_eq!(args, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_wrong_argument_count() {
        let wrapper = DocumentLiteralWrapper::new(Calculator);
        let err = wrapper.call("add", vec![json!({}), json!({})]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expecting exactly one argument that is the document/literal wrapper, got 2"
        );
        assert!(matches!(
            wrapper.call("add", vec![]),
            Err(SoapError::WrapperArity { count: 0 })
        ));
    }

    #[test]
    fn test_unknown_method() {
        let wrapper = DocumentLiteralWrapper::new(Calculator);
        let err = wrapper.call("foo", vec![json!({})]).unwrap_err();
        assert_eq!(err.to_string(), "Method foo does not exist on delegate object MyCalculatorService");
    }

    #[test]
    fn test_unknown_argument() {
        let wrapper = DocumentLiteralWrapper::new(Calculator);
        let err = wrapper.call("add", vec![json!({"foo": "bar"})]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Received unknown argument foo which is not an argument to MyCalculatorService::add"
        );
    }

    #[test]
    fn test_request_must_be_object() {
        let wrapper = DocumentLiteralWrapper::new(Calculator);
        assert!(matches!(
            wrapper.call("add", vec![json!(1)]),
            Err(SoapError::InvalidRequest { .. })
        ));
    }
}
