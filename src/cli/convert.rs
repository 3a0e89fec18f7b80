//! Tree and token conversion to `serde_json::Value`

use serde_json::{Map, Value, json};

use crate::{Node, Token};

/// Converts a tree to JSON.
///
/// Every node becomes an object with a `"type"` field holding the variant
/// name, plus that variant's fields.
pub fn node_to_json(node: &Node) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), json!(node.kind_name()));

    match node {
        Node::Symbol(symbol) => {
            object.insert("name".to_string(), json!(symbol.name));
        }
        Node::Function(call) => {
            object.insert("name".to_string(), json!(call.name()));
            object.insert("args".to_string(), nodes_to_json(&call.args));
        }
        Node::Parenthesis(content) => {
            object.insert("content".to_string(), node_to_json(content));
        }
        Node::Operator(op) => {
            object.insert("op".to_string(), json!(op.op));
            object.insert("fn".to_string(), json!(op.func.name()));
            object.insert("args".to_string(), nodes_to_json(&op.args));
        }
        Node::Block(statements) => {
            object.insert("statements".to_string(), nodes_to_json(statements));
        }
        Node::Boolean(value) => {
            object.insert("value".to_string(), json!(value));
        }
        Node::Null => {}
        Node::Float(value) => {
            // NaN and infinities have no JSON number form
            let value = serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null);
            object.insert("value".to_string(), value);
        }
        Node::Int(value) => {
            object.insert("value".to_string(), json!(value));
        }
        Node::Constant(value) => {
            object.insert("value".to_string(), json!(value));
        }
    }

    Value::Object(object)
}

fn nodes_to_json(nodes: &[Node]) -> Value {
    Value::Array(nodes.iter().map(node_to_json).collect())
}

/// Converts scanned tokens to a JSON array of `{kind, text, literal?, line}`.
pub fn tokens_to_json(tokens: &[Token]) -> Value {
    Value::Array(
        tokens
            .iter()
            .map(|token| {
                let mut object = Map::new();
                object.insert("kind".to_string(), json!(token.kind.name()));
                object.insert("text".to_string(), json!(token.text));
                if let Some(literal) = &token.literal {
                    object.insert("literal".to_string(), json!(literal));
                }
                object.insert("line".to_string(), json!(token.line));
                Value::Object(object)
            })
            .collect(),
    )
}
