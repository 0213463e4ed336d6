//! Message, port type and binding wiring for one operation.

use indexmap::IndexMap;
use tracing::debug;

use super::AutoDiscover;
use crate::config::Style;
use crate::diagnostic::SoapError;
use crate::reflect::FunctionDescriptor;
use crate::wsdl::{ElementSpec, MessagePart, Wsdl};
use crate::xml::NodeId;

impl AutoDiscover {
    /// Emits the messages, port type operation and binding operation of
    /// `function`, using its widest prototype.
    pub(super) fn add_function_to_wsdl(
        &self,
        function: &FunctionDescriptor,
        wsdl: &mut Wsdl,
        uri: &str,
        port: NodeId,
        binding: NodeId,
    ) -> Result<(), SoapError> {
        let prototype = function
            .widest_prototype()
            .ok_or_else(|| SoapError::NoPrototypes {
                function: function.name.clone(),
            })?;

        let name = wsdl.translate_type(&function.name);
        let document_style = self.binding_style.style == Style::Document;

        // Input message
        let mut args = IndexMap::new();
        if document_style {
            let mut sequence = Vec::new();
            for parameter in &prototype.parameters {
                let type_name = wsdl.get_type(&self.discovery.parameter_type(parameter))?;
                let mut element = ElementSpec::new(parameter.name.as_str()).attribute("type", type_name);
                if parameter.optional {
                    element = element.attribute("nillable", "true");
                }
                sequence.push(element);
            }
            let element = wsdl.add_element(&ElementSpec::new(name.as_str()).sequence(sequence))?;
            args.insert("parameters".to_string(), MessagePart::element(element));
        } else {
            for parameter in &prototype.parameters {
                let type_name = wsdl.get_type(&self.discovery.parameter_type(parameter))?;
                args.insert(parameter.name.clone(), MessagePart::Type(type_name));
            }
        }
        wsdl.add_message(&format!("{}In", name), &args)?;

        // Output message
        let one_way = self.discovery.is_one_way(function, prototype);
        if !one_way {
            let mut args = IndexMap::new();
            let return_type = self.discovery.return_type(function, prototype);
            let returns_value = return_type != "void";
            if document_style {
                let mut sequence = Vec::new();
                if returns_value {
                    let type_name = wsdl.get_type(&return_type)?;
                    sequence.push(ElementSpec::new(format!("{}Result", name)).attribute("type", type_name));
                }
                let element = wsdl.add_element(&ElementSpec::new(format!("{}Response", name)).sequence(sequence))?;
                args.insert("parameters".to_string(), MessagePart::element(element));
            } else if returns_value {
                let type_name = wsdl.get_type(&return_type)?;
                args.insert("return".to_string(), MessagePart::Type(type_name));
            }
            wsdl.add_message(&format!("{}Out", name), &args)?;
        }

        // Port type operation
        let input = wsdl.qualify(&format!("{}In", name));
        let output = (!one_way).then(|| wsdl.qualify(&format!("{}Out", name)));
        let port_operation = wsdl.add_port_operation(port, &name, Some(input.as_str()), output.as_deref(), None);
        let description = self.discovery.function_documentation(function);
        if !description.is_empty() {
            wsdl.add_documentation(port_operation, &description);
        }

        // Binding operation
        let mut body_style = self.operation_body_style.clone();
        if self.binding_style.style == Style::Rpc && body_style.namespace.is_none() {
            body_style.namespace = Some(uri.to_string());
        }
        let body = body_style.to_attributes();
        let output_body = if one_way { IndexMap::new() } else { body.clone() };
        let operation = wsdl.add_binding_operation(
            binding,
            &name,
            &body,
            &output_body,
            &IndexMap::new(),
            self.soap_version,
        )?;
        wsdl.add_soap_operation(operation, &format!("{}#{}", uri, name), self.soap_version)?;

        debug!(operation = %name, one_way, style = %self.binding_style.style, "emitted operation");
        Ok(())
    }
}
