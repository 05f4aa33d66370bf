//! Read-only syntax tree model.
//!
//! A node is a kind tag plus an ordered list of named fields. The finder
//! only needs to tell string literals and includes apart from everything
//! else, so all other node types collapse into [`NodeKind::Other`].

use std::fmt;

/// Node kind discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// String literal; its payload lives in the `value` field.
    StringLiteral,
    /// Include-like expression; its operand lives in the `expr` field.
    Include,
    /// Any other node type, keyed by the parser's type name.
    Other(String),
}

impl NodeKind {
    /// Map a parser node type name onto a kind.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Scalar_String" => Self::StringLiteral,
            "Expr_Include" => Self::Include,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::StringLiteral => "Scalar_String",
            Self::Include => "Expr_Include",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Non-node field payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Value held by a named field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Node(Box<SyntaxNode>),
    /// Ordered elements; only [`FieldValue::Node`] elements are children.
    List(Vec<FieldValue>),
    Scalar(Scalar),
}

/// A named field of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    kind: NodeKind,
    fields: Vec<Field>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }

    /// Node of an arbitrary parser type.
    pub fn other(type_name: impl Into<String>) -> Self {
        Self::new(NodeKind::Other(type_name.into()))
    }

    /// String literal node carrying `value`.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(NodeKind::StringLiteral).with_scalar("value", Scalar::Str(value.into()))
    }

    /// Include node with `expr` as its operand.
    pub fn include(expr: SyntaxNode) -> Self {
        Self::new(NodeKind::Include).with_node("expr", expr)
    }

    pub fn with_node(mut self, name: impl Into<String>, node: SyntaxNode) -> Self {
        self.push_field(name, FieldValue::Node(Box::new(node)));
        self
    }

    pub fn with_list(mut self, name: impl Into<String>, nodes: Vec<SyntaxNode>) -> Self {
        let items = nodes
            .into_iter()
            .map(|node| FieldValue::Node(Box::new(node)))
            .collect();
        self.push_field(name, FieldValue::List(items));
        self
    }

    pub fn with_scalar(mut self, name: impl Into<String>, scalar: Scalar) -> Self {
        self.push_field(name, FieldValue::Scalar(scalar));
        self
    }

    /// Append a field, keeping declaration order.
    pub fn push_field(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push(Field {
            name: name.into(),
            value,
        });
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Payload of a string literal node.
    pub fn literal_value(&self) -> Option<&str> {
        if self.kind != NodeKind::StringLiteral {
            return None;
        }
        match self.field("value")? {
            FieldValue::Scalar(Scalar::Str(value)) => Some(value),
            _ => None,
        }
    }

    /// Operand of an include node.
    pub fn include_operand(&self) -> Option<&SyntaxNode> {
        if self.kind != NodeKind::Include {
            return None;
        }
        match self.field("expr")? {
            FieldValue::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Direct child nodes in field order.
    ///
    /// Single-node fields yield their node; list fields yield their node
    /// elements. Scalars and lists nested inside lists are skipped.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &SyntaxNode> {
        self.fields.iter().flat_map(|field| {
            let items: Vec<&SyntaxNode> = match &field.value {
                FieldValue::Node(node) => vec![node.as_ref()],
                FieldValue::List(items) => items
                    .iter()
                    .filter_map(|item| match item {
                        FieldValue::Node(node) => Some(node.as_ref()),
                        _ => None,
                    })
                    .collect(),
                FieldValue::Scalar(_) => Vec::new(),
            };
            items
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_type_name() {
        assert_eq!(NodeKind::from_type_name("Scalar_String"), NodeKind::StringLiteral);
        assert_eq!(NodeKind::from_type_name("Expr_Include"), NodeKind::Include);
        assert_eq!(
            NodeKind::from_type_name("Stmt_Echo"),
            NodeKind::Other("Stmt_Echo".into())
        );
        assert_eq!(NodeKind::Include.to_string(), "Expr_Include");
    }

    #[test]
    fn test_literal_value() {
        let node = SyntaxNode::string("assets/app.css");
        assert_eq!(node.literal_value(), Some("assets/app.css"));

        let other = SyntaxNode::other("Scalar_Int").with_scalar("value", Scalar::Int(3));
        assert_eq!(other.literal_value(), None);
    }

    #[test]
    fn test_include_operand() {
        let node = SyntaxNode::include(SyntaxNode::string("tpl/page.html"));
        assert_eq!(
            node.include_operand().and_then(SyntaxNode::literal_value),
            Some("tpl/page.html")
        );
        assert!(SyntaxNode::string("x").include_operand().is_none());
    }

    #[test]
    fn test_children_skip_scalars_and_nested_lists() {
        let mut node = SyntaxNode::other("Expr_Array")
            .with_scalar("flag", Scalar::Bool(true))
            .with_node("first", SyntaxNode::string("a"));
        node.push_field(
            "items",
            FieldValue::List(vec![
                FieldValue::Node(Box::new(SyntaxNode::string("b"))),
                FieldValue::Scalar(Scalar::Null),
                FieldValue::List(vec![FieldValue::Node(Box::new(SyntaxNode::string(
                    "hidden",
                )))]),
                FieldValue::Node(Box::new(SyntaxNode::string("c"))),
            ]),
        );

        let values: Vec<_> = node
            .children()
            .filter_map(SyntaxNode::literal_value)
            .collect();
        assert_eq!(values, ["a", "b", "c"]);
    }
}
