//! Decoding of PHP-Parser style JSON dumps.
//!
//! A dump is an array of statement objects. Every node object carries a
//! `nodeType` key; its remaining keys are sub-nodes in declaration order.
//! `attributes` (positions, comments) are not part of the tree.
//!
//! ```json
//! [{ "nodeType": "Stmt_Expression",
//!    "expr": { "nodeType": "Expr_Include",
//!              "expr": { "nodeType": "Scalar_String", "value": "tpl/page.html" },
//!              "type": 1 } }]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::node::{FieldValue, NodeKind, Scalar, SyntaxNode};

const NODE_TYPE_KEY: &str = "nodeType";
const ATTRIBUTES_KEY: &str = "attributes";

/// Remaining stack below which conversion switches to a fresh segment.
const STACK_RED_ZONE: usize = 64 * 1024;
/// Size of each additional stack segment.
const STACK_SEGMENT: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum AstError {
    #[error("failed to read syntax dump `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid JSON in syntax dump")]
    Json(#[from] serde_json::Error),

    #[error("syntax dump must be an array of statements, found {0}")]
    NotStatementList(&'static str),

    #[error("statement {index} is not a node object")]
    NotANode { index: usize },
}

/// Read and decode a dump file.
pub fn read_dump(path: &Path) -> Result<Vec<SyntaxNode>, AstError> {
    let content = fs::read_to_string(path).map_err(|err| AstError::Io(path.to_path_buf(), err))?;
    parse_dump(&content)
}

/// Decode a dump from its JSON text.
///
/// Nesting depth is unbounded: long expression chains nest one object per
/// operand. The stack grows on demand instead.
pub fn parse_dump(content: &str) -> Result<Vec<SyntaxNode>, AstError> {
    let mut de = serde_json::Deserializer::from_str(content);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    from_value(&value)
}

/// Decode an already parsed JSON value.
pub fn from_value(value: &Value) -> Result<Vec<SyntaxNode>, AstError> {
    let Value::Array(stmts) = value else {
        return Err(AstError::NotStatementList(value_type(value)));
    };

    stmts
        .iter()
        .enumerate()
        .map(|(index, stmt)| match stmt {
            Value::Object(map) if map.contains_key(NODE_TYPE_KEY) => Ok(node_from_object(map)),
            _ => Err(AstError::NotANode { index }),
        })
        .collect()
}

/// Build a node from an object known to carry `nodeType`.
fn node_from_object(map: &Map<String, Value>) -> SyntaxNode {
    let type_name = map
        .get(NODE_TYPE_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default();
    let mut node = SyntaxNode::new(NodeKind::from_type_name(type_name));

    for (name, value) in map {
        if name == NODE_TYPE_KEY || name == ATTRIBUTES_KEY {
            continue;
        }
        if let Some(field) = field_value(value) {
            node.push_field(name.as_str(), field);
        }
    }
    node
}

/// Convert a JSON value into a field value.
///
/// Objects without `nodeType` are not part of the syntax tree and are dropped.
fn field_value(value: &Value) -> Option<FieldValue> {
    let field = match value {
        Value::Null => FieldValue::Scalar(Scalar::Null),
        Value::Bool(b) => FieldValue::Scalar(Scalar::Bool(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Scalar(Scalar::Int(i)),
            None => FieldValue::Scalar(Scalar::Float(n.as_f64().unwrap_or_default())),
        },
        Value::String(s) => FieldValue::Scalar(Scalar::Str(s.clone())),
        Value::Array(items) => FieldValue::List(items.iter().filter_map(field_value).collect()),
        Value::Object(map) if map.contains_key(NODE_TYPE_KEY) => {
            let node = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
                node_from_object(map)
            });
            FieldValue::Node(Box::new(node))
        }
        Value::Object(_) => return None,
    };
    Some(field)
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::preorder;

    const DUMP: &str = r#"[
        {
            "nodeType": "Stmt_Expression",
            "attributes": { "startLine": 3, "endLine": 3 },
            "expr": {
                "nodeType": "Expr_Include",
                "attributes": { "startLine": 3 },
                "expr": {
                    "nodeType": "Scalar_String",
                    "attributes": { "kind": 1, "rawValue": "'tpl/page.html'" },
                    "value": "tpl/page.html"
                },
                "type": 1
            }
        },
        {
            "nodeType": "Stmt_Echo",
            "exprs": [
                { "nodeType": "Scalar_String", "value": "css/app.css" },
                { "nodeType": "Scalar_Int", "value": 42 }
            ]
        }
    ]"#;

    #[test]
    fn test_parse_dump_kinds_and_order() {
        let stmts = parse_dump(DUMP).unwrap();
        assert_eq!(stmts.len(), 2);

        let kinds: Vec<_> = preorder(&stmts)
            .map(|node| node.kind().type_name().to_string())
            .collect();
        assert_eq!(
            kinds,
            [
                "Stmt_Expression",
                "Expr_Include",
                "Scalar_String",
                "Stmt_Echo",
                "Scalar_String",
                "Scalar_Int",
            ]
        );
    }

    #[test]
    fn test_parse_dump_include_operand() {
        let stmts = parse_dump(DUMP).unwrap();
        let include = preorder(&stmts)
            .find(|node| *node.kind() == NodeKind::Include)
            .unwrap();
        assert_eq!(
            include.include_operand().and_then(SyntaxNode::literal_value),
            Some("tpl/page.html")
        );
        assert_eq!(
            include.field("type"),
            Some(&FieldValue::Scalar(Scalar::Int(1)))
        );
    }

    #[test]
    fn test_attributes_are_dropped() {
        let stmts = parse_dump(DUMP).unwrap();
        assert!(stmts[0].field("attributes").is_none());
        let names: Vec<_> = stmts[0].fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["expr"]);
    }

    /// `"a" . "b" . ...` nests one `Expr_BinaryOp_Concat` per operand.
    fn concat_chain(depth: usize) -> String {
        let mut expr = r#"{"nodeType": "Scalar_String", "value": "css/0.css"}"#.to_string();
        for i in 1..=depth {
            expr = format!(
                r#"{{"nodeType": "Expr_BinaryOp_Concat", "left": {expr}, "right": {{"nodeType": "Scalar_String", "value": "css/{i}.css"}}}}"#
            );
        }
        format!(r#"[{{"nodeType": "Stmt_Echo", "exprs": [{expr}]}}]"#)
    }

    #[test]
    fn test_parse_deeply_nested_dump() {
        let depth = 1000;
        let stmts = parse_dump(&concat_chain(depth)).unwrap();

        let literals = preorder(&stmts)
            .filter_map(SyntaxNode::literal_value)
            .collect::<Vec<_>>();
        assert_eq!(literals.len(), depth + 1);
        assert_eq!(literals[0], "css/0.css");
        assert_eq!(literals[depth], format!("css/{depth}.css"));
    }

    #[test]
    fn test_rejects_non_array() {
        let err = parse_dump(r#"{"nodeType": "Stmt_Nop"}"#).unwrap_err();
        assert!(matches!(err, AstError::NotStatementList("an object")));
    }

    #[test]
    fn test_rejects_non_node_statement() {
        let err = parse_dump(r#"[{"nodeType": "Stmt_Nop"}, 3]"#).unwrap_err();
        assert!(matches!(err, AstError::NotANode { index: 1 }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_dump("[").unwrap_err(), AstError::Json(_)));
    }

    #[test]
    fn test_read_dump_missing_file() {
        let err = read_dump(Path::new("/nonexistent/index.php.ast.json")).unwrap_err();
        assert!(err.to_string().contains("index.php.ast.json"));
    }
}
