//! Kotlin-style declaration signatures.

use regex::Regex;

use super::{SignatureRenderer, UnknownKindPolicy};
use crate::error::{Error, Result};
use crate::model::{ContentBlock, DocumentationNode, NodeKind};

/// Modifiers that are implied by default and never shown.
const SUPPRESSED_MODIFIERS: [&str; 2] = ["final", "internal"];

/// Renders declarations using Kotlin syntax.
pub struct KotlinSignatureRenderer {
    unknown_kinds: UnknownKindPolicy,
    function_type: Regex,
}

/// Shape of a functional type name such as `Function2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionType {
    /// `FunctionN`: N parameters and a return type
    Plain(usize),
    /// `ExtensionFunctionN`: a receiver, N parameters and a return type
    Extension(usize),
}

impl KotlinSignatureRenderer {
    /// Create a renderer with the plain-text fallback for unknown kinds.
    pub fn new() -> Self {
        Self {
            unknown_kinds: UnknownKindPolicy::Fallback,
            function_type: Regex::new(r"^(Extension)?Function(0|[1-9][0-9]*)$")
                .expect("function type pattern is valid"),
        }
    }

    /// Set how kinds without a signature rule are handled.
    pub fn with_unknown_kinds(mut self, policy: UnknownKindPolicy) -> Self {
        self.unknown_kinds = policy;
        self
    }

    fn function_type(&self, name: &str) -> Option<FunctionType> {
        let captures = self.function_type.captures(name)?;
        let arity = captures.get(2)?.as_str().parse().ok()?;
        Some(if captures.get(1).is_some() {
            FunctionType::Extension(arity)
        } else {
            FunctionType::Plain(arity)
        })
    }

    fn render_fallback(&self, block: &mut ContentBlock, node: &DocumentationNode) -> Result<()> {
        match self.unknown_kinds {
            UnknownKindPolicy::Fallback => {
                log::debug!(
                    "No signature rule for {} `{}`, rendering as text",
                    node.kind(),
                    node.name()
                );
                block.text(format!("{}: {}", node.kind(), node.name()));
                Ok(())
            }
            UnknownKindPolicy::Reject => Err(Error::UnsupportedNodeKind {
                kind: node.kind().clone(),
                name: node.name().to_string(),
            }),
        }
    }

    fn render_package(&self, block: &mut ContentBlock, node: &DocumentationNode) {
        block.keyword("package").text(" ").identifier(node.name());
    }

    fn render_list<'n>(
        &self,
        block: &mut ContentBlock,
        nodes: impl IntoIterator<Item = &'n DocumentationNode>,
        separator: &str,
        mut render_item: impl FnMut(&mut ContentBlock, &'n DocumentationNode) -> Result<()>,
    ) -> Result<()> {
        for (i, node) in nodes.into_iter().enumerate() {
            if i > 0 {
                block.symbol(separator);
            }
            render_item(block, node)?;
        }
        Ok(())
    }

    fn render_linked(&self, block: &mut ContentBlock, node: &DocumentationNode) {
        match node.link() {
            Some(target) => block.link(target.clone(), |b| {
                b.identifier(node.name());
            }),
            None => {
                block.identifier(node.name());
            }
        }
    }

    fn render_type(&self, block: &mut ContentBlock, node: &DocumentationNode) -> Result<()> {
        let arguments: Vec<&DocumentationNode> = node.details(&NodeKind::Type).collect();

        match (self.function_type(node.name()), arguments.split_last()) {
            (Some(FunctionType::Plain(arity)), Some((result, parameters)))
                if parameters.len() == arity =>
            {
                block.symbol("(");
                self.render_list(block, parameters.iter().copied(), ", ", |b, n| {
                    self.render_type(b, n)
                })?;
                block.symbol(")");
                return self.render_function_result(block, result);
            }
            (Some(FunctionType::Extension(arity)), Some((result, rest)))
                if rest.len() == arity + 1 =>
            {
                let (receiver, parameters) = (rest[0], &rest[1..]);
                self.render_type(block, receiver)?;
                block.symbol(".").symbol("(");
                self.render_list(block, parameters.iter().copied(), ", ", |b, n| {
                    self.render_type(b, n)
                })?;
                block.symbol(")");
                return self.render_function_result(block, result);
            }
            _ => {}
        }

        self.render_linked(block, node);
        if !arguments.is_empty() {
            block.symbol("<");
            self.render_list(block, arguments, ", ", |b, n| self.render_type(b, n))?;
            block.symbol(">");
        }
        Ok(())
    }

    fn render_function_result(
        &self,
        block: &mut ContentBlock,
        result: &DocumentationNode,
    ) -> Result<()> {
        block.text(" ").symbol("->").text(" ");
        self.render_type(block, result)
    }

    fn render_modifier(&self, block: &mut ContentBlock, node: &DocumentationNode) {
        if !SUPPRESSED_MODIFIERS.contains(&node.name()) {
            block.keyword(node.name());
        }
    }

    fn render_type_parameter(
        &self,
        block: &mut ContentBlock,
        node: &DocumentationNode,
    ) -> Result<()> {
        block.identifier(node.name());
        let mut constraints = node.details(&NodeKind::UpperBound).peekable();
        if constraints.peek().is_some() {
            block.symbol(" : ");
            self.render_list(block, constraints, ", ", |b, n| self.render_type(b, n))?;
        }
        Ok(())
    }

    fn render_parameter(&self, block: &mut ContentBlock, node: &DocumentationNode) -> Result<()> {
        block.identifier(node.name()).symbol(": ");
        self.render_type(block, node.detail(&NodeKind::Type)?)
    }

    fn render_type_parameters_for_node(
        &self,
        block: &mut ContentBlock,
        node: &DocumentationNode,
    ) -> Result<()> {
        let mut type_parameters = node.details(&NodeKind::TypeParameter).peekable();
        if type_parameters.peek().is_some() {
            block.symbol("<");
            // Names only; bounds show when the type parameter renders on its own.
            self.render_list(block, type_parameters, ", ", |b, n| self.render_type(b, n))?;
            block.symbol("> ");
        }
        Ok(())
    }

    fn render_supertypes_for_node(
        &self,
        block: &mut ContentBlock,
        node: &DocumentationNode,
    ) -> Result<()> {
        let mut supertypes = node.details(&NodeKind::Supertype).peekable();
        if supertypes.peek().is_some() {
            block.symbol(" : ");
            self.render_list(block, supertypes, ", ", |b, n| self.render_type(b, n))?;
        }
        Ok(())
    }

    fn render_modifiers_for_node(&self, block: &mut ContentBlock, node: &DocumentationNode) {
        for modifier in node.details(&NodeKind::Modifier) {
            if SUPPRESSED_MODIFIERS.contains(&modifier.name()) {
                continue;
            }
            // Interfaces are abstract already.
            if node.kind() == &NodeKind::Interface && modifier.name() == "abstract" {
                continue;
            }
            self.render_modifier(block, modifier);
            block.text(" ");
        }
    }

    fn render_receiver_for_node(
        &self,
        block: &mut ContentBlock,
        node: &DocumentationNode,
    ) -> Result<()> {
        if let Some(receiver) = node.single_detail(&NodeKind::Receiver) {
            self.render_type(block, receiver.detail(&NodeKind::Type)?)?;
            block.symbol(".");
        }
        Ok(())
    }

    fn render_class(&self, block: &mut ContentBlock, node: &DocumentationNode) -> Result<()> {
        let keyword = match node.kind() {
            NodeKind::Class => "class ",
            NodeKind::Interface => "trait ",
            NodeKind::Enum => "enum class ",
            NodeKind::EnumItem => "enum val ",
            NodeKind::Object => "object ",
            other => {
                return Err(Error::KindMismatch {
                    expected: "a class-like declaration",
                    actual: other.clone(),
                    name: node.name().to_string(),
                })
            }
        };

        self.render_modifiers_for_node(block, node);
        block.keyword(keyword).identifier(node.name());
        self.render_type_parameters_for_node(block, node)?;
        self.render_supertypes_for_node(block, node)
    }

    fn render_function(&self, block: &mut ContentBlock, node: &DocumentationNode) -> Result<()> {
        let is_constructor = match node.kind() {
            NodeKind::Constructor => true,
            NodeKind::Function => false,
            other => {
                return Err(Error::KindMismatch {
                    expected: "a function-like declaration",
                    actual: other.clone(),
                    name: node.name().to_string(),
                })
            }
        };

        self.render_modifiers_for_node(block, node);
        if is_constructor {
            block.identifier(self.owner_name(node)?);
        } else {
            block.keyword("fun ");
        }
        self.render_type_parameters_for_node(block, node)?;
        self.render_receiver_for_node(block, node)?;

        if !is_constructor {
            block.identifier(node.name());
        }

        block.symbol("(");
        self.render_list(block, node.details(&NodeKind::Parameter), ", ", |b, n| {
            self.render_parameter(b, n)
        })?;
        block.symbol(")");

        if !is_constructor {
            block.symbol(": ");
            self.render_type(block, node.detail(&NodeKind::Type)?)?;
        }
        Ok(())
    }

    fn render_property(&self, block: &mut ContentBlock, node: &DocumentationNode) -> Result<()> {
        if node.kind() != &NodeKind::Property {
            return Err(Error::KindMismatch {
                expected: "a property",
                actual: node.kind().clone(),
                name: node.name().to_string(),
            });
        }

        self.render_modifiers_for_node(block, node);
        block.keyword("val ");
        self.render_type_parameters_for_node(block, node)?;
        self.render_receiver_for_node(block, node)?;
        block.identifier(node.name()).symbol(": ");
        self.render_type(block, node.detail(&NodeKind::Type)?)
    }

    fn owner_name(&self, node: &DocumentationNode) -> Result<String> {
        node.owner()
            .map(|owner| owner.name().to_string())
            .ok_or_else(|| Error::MissingOwner(node.name().to_string()))
    }
}

impl Default for KotlinSignatureRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureRenderer for KotlinSignatureRenderer {
    fn render(&self, node: &DocumentationNode) -> Result<ContentBlock> {
        let mut block = ContentBlock::new();
        match node.kind() {
            NodeKind::Package => self.render_package(&mut block, node),
            NodeKind::Class
            | NodeKind::Interface
            | NodeKind::Enum
            | NodeKind::EnumItem
            | NodeKind::Object => self.render_class(&mut block, node)?,
            NodeKind::TypeParameter => self.render_type_parameter(&mut block, node)?,
            NodeKind::Type | NodeKind::UpperBound => self.render_type(&mut block, node)?,
            NodeKind::Modifier => self.render_modifier(&mut block, node),
            NodeKind::Constructor | NodeKind::Function => self.render_function(&mut block, node)?,
            NodeKind::Property => self.render_property(&mut block, node)?,
            NodeKind::Module
            | NodeKind::Supertype
            | NodeKind::Parameter
            | NodeKind::Receiver
            | NodeKind::Other(_) => self.render_fallback(&mut block, node)?,
        }
        Ok(block)
    }

    fn render_name(&self, node: &DocumentationNode) -> Result<String> {
        match node.kind() {
            NodeKind::Constructor => self.owner_name(node),
            _ => Ok(node.name().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentNode, LinkTarget, NodeBuilder};

    fn ty(name: &str) -> NodeBuilder {
        NodeBuilder::type_ref(name, vec![])
    }

    fn render(node: NodeBuilder) -> ContentBlock {
        KotlinSignatureRenderer::new().render(&node.build()).unwrap()
    }

    #[test]
    fn test_function_type_pattern() {
        let renderer = KotlinSignatureRenderer::new();
        assert_eq!(renderer.function_type("Function2"), Some(FunctionType::Plain(2)));
        assert_eq!(
            renderer.function_type("ExtensionFunction0"),
            Some(FunctionType::Extension(0))
        );
        assert_eq!(renderer.function_type("Function02"), None);
        assert_eq!(renderer.function_type("MyFunction1"), None);
    }

    #[test]
    fn test_generic_type() {
        let block = render(NodeBuilder::type_ref(
            "Map",
            vec![ty("String"), NodeBuilder::type_ref("List", vec![ty("Int")])],
        ));
        assert_eq!(block.plain_text(), "Map<String, List<Int>>");
    }

    #[test]
    fn test_function_type_with_wrong_arity_is_plain_generic() {
        let block = render(NodeBuilder::type_ref("Function3", vec![ty("A"), ty("B")]));
        assert_eq!(block.plain_text(), "Function3<A, B>");
    }

    #[test]
    fn test_function0_type() {
        let block = render(NodeBuilder::type_ref("Function0", vec![ty("Unit")]));
        assert_eq!(block.plain_text(), "() -> Unit");
    }

    #[test]
    fn test_linked_type() {
        let block = render(ty("Foo").with_link(LinkTarget::url("foo.html")));
        assert!(matches!(
            &block.children()[0],
            ContentNode::Link { target, .. } if target == &LinkTarget::url("foo.html")
        ));
        assert_eq!(block.plain_text(), "Foo");
    }

    #[test]
    fn test_suppressed_modifiers() {
        assert!(render(NodeBuilder::modifier("final")).is_empty());
        assert!(render(NodeBuilder::modifier("internal")).is_empty());
        assert_eq!(render(NodeBuilder::modifier("open")).plain_text(), "open");
    }

    #[test]
    fn test_type_parameter_with_bounds() {
        let block = render(
            NodeBuilder::new(NodeKind::TypeParameter, "T")
                .with_detail(NodeBuilder::new(NodeKind::UpperBound, "Comparable").with_detail(ty("T")))
                .with_detail(NodeBuilder::new(NodeKind::UpperBound, "Serializable")),
        );
        assert_eq!(block.plain_text(), "T : Comparable<T>, Serializable");
    }

    #[test]
    fn test_object_and_enum_keywords() {
        assert_eq!(
            render(NodeBuilder::new(NodeKind::Object, "Registry")).plain_text(),
            "object Registry"
        );
        assert_eq!(
            render(NodeBuilder::new(NodeKind::Enum, "Color")).plain_text(),
            "enum class Color"
        );
        assert_eq!(
            render(NodeBuilder::new(NodeKind::EnumItem, "RED")).plain_text(),
            "enum val RED"
        );
    }

    #[test]
    fn test_package() {
        assert_eq!(
            render(NodeBuilder::new(NodeKind::Package, "org.example")).plain_text(),
            "package org.example"
        );
    }

    #[test]
    fn test_unknown_kind_fallback() {
        let block = render(NodeBuilder::new(NodeKind::Other("Typealias".into()), "Alias"));
        assert_eq!(block.plain_text(), "Typealias: Alias");
        assert!(matches!(block.children()[0], ContentNode::Text { .. }));
    }

    #[test]
    fn test_unknown_kind_reject() {
        let renderer = KotlinSignatureRenderer::new().with_unknown_kinds(UnknownKindPolicy::Reject);
        let node = NodeBuilder::new(NodeKind::Parameter, "x").build();
        assert!(matches!(
            renderer.render(&node),
            Err(Error::UnsupportedNodeKind { .. })
        ));
    }

    #[test]
    fn test_rule_on_wrong_kind_fails() {
        let renderer = KotlinSignatureRenderer::new();
        let mut block = ContentBlock::new();
        let node = NodeBuilder::new(NodeKind::Function, "f").build();
        assert!(matches!(
            renderer.render_class(&mut block, &node),
            Err(Error::KindMismatch { .. })
        ));
        assert!(matches!(
            renderer.render_property(&mut block, &node),
            Err(Error::KindMismatch { .. })
        ));
        let class = NodeBuilder::new(NodeKind::Class, "C").build();
        assert!(matches!(
            renderer.render_function(&mut block, &class),
            Err(Error::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_function_without_return_type_fails() {
        let renderer = KotlinSignatureRenderer::new();
        let node = NodeBuilder::new(NodeKind::Function, "f").build();
        assert!(matches!(
            renderer.render(&node),
            Err(Error::MissingDetail { .. })
        ));
    }

    #[test]
    fn test_constructor_without_owner_fails() {
        let renderer = KotlinSignatureRenderer::new();
        let node = NodeBuilder::new(NodeKind::Constructor, "<init>").build();
        assert!(matches!(renderer.render(&node), Err(Error::MissingOwner(_))));
        assert!(matches!(renderer.render_name(&node), Err(Error::MissingOwner(_))));
    }
}
