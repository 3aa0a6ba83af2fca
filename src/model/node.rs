//! Semantic declaration nodes.

use std::fmt;
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use super::LinkTarget;
use crate::error::{Error, Result};

/// Kind of a declaration node, also used as the role of a detail node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Root of a documentation tree
    Module,
    /// A package
    Package,
    /// A class
    Class,
    /// An interface
    Interface,
    /// An enum class
    Enum,
    /// An entry of an enum class
    EnumItem,
    /// A singleton object
    Object,
    /// A generic type parameter
    TypeParameter,
    /// An upper-bound constraint of a type parameter
    UpperBound,
    /// A supertype reference
    Supertype,
    /// A type reference
    Type,
    /// A declaration modifier
    Modifier,
    /// A constructor
    Constructor,
    /// A function
    Function,
    /// A property
    Property,
    /// A value parameter
    Parameter,
    /// An extension receiver
    Receiver,
    /// Any kind this crate does not know about
    Other(String),
}

impl NodeKind {
    /// Canonical name of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Module => "Module",
            NodeKind::Package => "Package",
            NodeKind::Class => "Class",
            NodeKind::Interface => "Interface",
            NodeKind::Enum => "Enum",
            NodeKind::EnumItem => "EnumItem",
            NodeKind::Object => "Object",
            NodeKind::TypeParameter => "TypeParameter",
            NodeKind::UpperBound => "UpperBound",
            NodeKind::Supertype => "Supertype",
            NodeKind::Type => "Type",
            NodeKind::Modifier => "Modifier",
            NodeKind::Constructor => "Constructor",
            NodeKind::Function => "Function",
            NodeKind::Property => "Property",
            NodeKind::Parameter => "Parameter",
            NodeKind::Receiver => "Receiver",
            NodeKind::Other(name) => name,
        }
    }

    /// Check if this kind is rendered with the class-like rule.
    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            NodeKind::Class
                | NodeKind::Interface
                | NodeKind::Enum
                | NodeKind::EnumItem
                | NodeKind::Object
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Module" => NodeKind::Module,
            "Package" => NodeKind::Package,
            "Class" => NodeKind::Class,
            "Interface" => NodeKind::Interface,
            "Enum" => NodeKind::Enum,
            "EnumItem" => NodeKind::EnumItem,
            "Object" => NodeKind::Object,
            "TypeParameter" => NodeKind::TypeParameter,
            "UpperBound" => NodeKind::UpperBound,
            "Supertype" => NodeKind::Supertype,
            "Type" => NodeKind::Type,
            "Modifier" => NodeKind::Modifier,
            "Constructor" => NodeKind::Constructor,
            "Function" => NodeKind::Function,
            "Property" => NodeKind::Property,
            "Parameter" => NodeKind::Parameter,
            "Receiver" => NodeKind::Receiver,
            _ => NodeKind::Other(s),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        NodeKind::from(s.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A semantic declaration node.
///
/// Nodes are immutable once built and shared through [`Arc`]. The owner
/// relation is a [`Weak`] back-reference used for lookups only: a node never
/// keeps its owner alive.
#[derive(Debug)]
pub struct DocumentationNode {
    kind: NodeKind,
    name: String,
    links: Vec<LinkTarget>,
    details: Vec<Arc<DocumentationNode>>,
    members: Vec<Arc<DocumentationNode>>,
    owner: Weak<DocumentationNode>,
}

impl DocumentationNode {
    /// Kind of this node.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Declared name of this node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved link candidates, in priority order.
    pub fn links(&self) -> &[LinkTarget] {
        &self.links
    }

    /// The preferred link target, if any.
    pub fn link(&self) -> Option<&LinkTarget> {
        self.links.first()
    }

    /// All detail nodes in declaration order.
    pub fn all_details(&self) -> &[Arc<DocumentationNode>] {
        &self.details
    }

    /// Detail nodes with the given role, in declaration order.
    pub fn details<'a>(
        &'a self,
        role: &'a NodeKind,
    ) -> impl Iterator<Item = &'a DocumentationNode> + 'a {
        self.details
            .iter()
            .filter(move |d| &d.kind == role)
            .map(|d| d.as_ref())
    }

    /// The single detail node with the given role.
    ///
    /// Absence and duplication are both errors: a required detail missing
    /// from the input means the upstream model is malformed.
    pub fn detail(&self, role: &NodeKind) -> Result<&DocumentationNode> {
        let mut matching = self.details_with_role(role);
        let first = matching.next().ok_or_else(|| Error::MissingDetail {
            role: role.clone(),
            node: self.name.clone(),
        })?;
        if matching.next().is_some() {
            return Err(Error::AmbiguousDetail {
                role: role.clone(),
                node: self.name.clone(),
            });
        }
        Ok(first)
    }

    /// The detail node with the given role if there is exactly one.
    pub fn single_detail(&self, role: &NodeKind) -> Option<&DocumentationNode> {
        let mut matching = self.details_with_role(role);
        let first = matching.next()?;
        match matching.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    // Borrows `self` only; the role is copied into the filter.
    fn details_with_role(&self, role: &NodeKind) -> impl Iterator<Item = &DocumentationNode> {
        let role = role.clone();
        self.details
            .iter()
            .filter(move |d| d.kind == role)
            .map(|d| d.as_ref())
    }

    /// Member declarations in declaration order.
    pub fn members(&self) -> &[Arc<DocumentationNode>] {
        &self.members
    }

    /// The owning declaration, if it is still alive.
    pub fn owner(&self) -> Option<Arc<DocumentationNode>> {
        self.owner.upgrade()
    }

    /// Owners from the root down to the direct owner of this node.
    pub fn ancestors(&self) -> Vec<Arc<DocumentationNode>> {
        let mut chain = Vec::new();
        let mut current = self.owner();
        while let Some(node) = current {
            current = node.owner();
            chain.push(node);
        }
        chain.reverse();
        chain
    }
}

/// Builder for [`DocumentationNode`] trees.
///
/// The builder owns plain data; [`NodeBuilder::build`] turns it into an
/// `Arc` tree with owner back-references wired up. Builders deserialize from
/// JSON so upstream tools can hand declarations over as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeBuilder {
    /// Kind of the node
    pub kind: NodeKind,

    /// Declared name
    #[serde(default)]
    pub name: String,

    /// Resolved link candidates
    #[serde(default)]
    pub links: Vec<LinkTarget>,

    /// Detail nodes (types, modifiers, parameters, ...)
    #[serde(default)]
    pub details: Vec<NodeBuilder>,

    /// Member declarations (constructors, functions, ...)
    #[serde(default)]
    pub members: Vec<NodeBuilder>,
}

impl NodeBuilder {
    /// Create a builder for a node of the given kind.
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            links: Vec::new(),
            details: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Create a type reference with the given type arguments.
    pub fn type_ref(name: impl Into<String>, arguments: Vec<NodeBuilder>) -> Self {
        let mut node = Self::new(NodeKind::Type, name);
        node.details = arguments;
        node
    }

    /// Create a modifier detail.
    pub fn modifier(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Modifier, name)
    }

    /// Create a value parameter detail of the given type.
    pub fn parameter(name: impl Into<String>, ty: NodeBuilder) -> Self {
        Self::new(NodeKind::Parameter, name).with_detail(ty)
    }

    /// Create a receiver detail of the given type.
    pub fn receiver(ty: NodeBuilder) -> Self {
        Self::new(NodeKind::Receiver, "").with_detail(ty)
    }

    /// Parse a builder from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidInput(e.to_string()))
    }

    /// Add a link candidate.
    pub fn with_link(mut self, target: LinkTarget) -> Self {
        self.links.push(target);
        self
    }

    /// Add a detail node.
    pub fn with_detail(mut self, detail: NodeBuilder) -> Self {
        self.details.push(detail);
        self
    }

    /// Add several detail nodes.
    pub fn with_details(mut self, details: impl IntoIterator<Item = NodeBuilder>) -> Self {
        self.details.extend(details);
        self
    }

    /// Add a member declaration.
    pub fn with_member(mut self, member: NodeBuilder) -> Self {
        self.members.push(member);
        self
    }

    /// Build the node tree.
    pub fn build(self) -> Arc<DocumentationNode> {
        self.build_owned(Weak::new())
    }

    fn build_owned(self, owner: Weak<DocumentationNode>) -> Arc<DocumentationNode> {
        let NodeBuilder {
            kind,
            name,
            links,
            details,
            members,
        } = self;
        Arc::new_cyclic(|me| DocumentationNode {
            kind,
            name,
            links,
            details: details
                .into_iter()
                .map(|d| d.build_owned(me.clone()))
                .collect(),
            members: members
                .into_iter()
                .map(|m| m.build_owned(me.clone()))
                .collect(),
            owner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip_through_string() {
        assert_eq!(NodeKind::from("EnumItem"), NodeKind::EnumItem);
        assert_eq!(
            NodeKind::from("Typealias"),
            NodeKind::Other("Typealias".to_string())
        );
        assert_eq!(NodeKind::Other("Typealias".into()).to_string(), "Typealias");
    }

    #[test]
    fn test_owner_is_wired_for_details_and_members() {
        let class = NodeBuilder::new(NodeKind::Class, "Foo")
            .with_detail(NodeBuilder::modifier("open"))
            .with_member(NodeBuilder::new(NodeKind::Constructor, "<init>"))
            .build();

        let ctor = &class.members()[0];
        assert_eq!(ctor.owner().unwrap().name(), "Foo");
        assert_eq!(class.all_details()[0].owner().unwrap().name(), "Foo");
        assert!(class.owner().is_none());
    }

    #[test]
    fn test_owner_does_not_keep_parent_alive() {
        let class = NodeBuilder::new(NodeKind::Class, "Foo")
            .with_member(NodeBuilder::new(NodeKind::Function, "bar"))
            .build();
        let member = Arc::clone(&class.members()[0]);
        drop(class);
        assert!(member.owner().is_none());
    }

    #[test]
    fn test_detail_lookup() {
        let param = NodeBuilder::parameter("x", NodeBuilder::type_ref("Int", vec![])).build();
        assert_eq!(param.detail(&NodeKind::Type).unwrap().name(), "Int");
        assert!(matches!(
            param.detail(&NodeKind::Receiver),
            Err(Error::MissingDetail { .. })
        ));
    }

    #[test]
    fn test_detail_outlives_role() {
        let param = NodeBuilder::parameter("x", NodeBuilder::type_ref("Int", vec![])).build();
        let ty = {
            let role = NodeKind::from("Type");
            param.detail(&role).unwrap()
        };
        assert_eq!(ty.name(), "Int");

        let receiver = NodeBuilder::receiver(NodeBuilder::type_ref("String", vec![])).build();
        let single = receiver.single_detail(&NodeKind::from("Type".to_string()));
        assert_eq!(single.map(DocumentationNode::name), Some("String"));
    }

    #[test]
    fn test_detail_rejects_duplicates() {
        let node = NodeBuilder::new(NodeKind::Property, "p")
            .with_detail(NodeBuilder::type_ref("Int", vec![]))
            .with_detail(NodeBuilder::type_ref("Long", vec![]))
            .build();
        assert!(matches!(
            node.detail(&NodeKind::Type),
            Err(Error::AmbiguousDetail { .. })
        ));
        assert!(node.single_detail(&NodeKind::Type).is_none());
    }

    #[test]
    fn test_ancestors() {
        let module = NodeBuilder::new(NodeKind::Module, "core")
            .with_member(
                NodeBuilder::new(NodeKind::Package, "org.example")
                    .with_member(NodeBuilder::new(NodeKind::Class, "Foo")),
            )
            .build();
        let class = &module.members()[0].members()[0];
        let names: Vec<String> = class
            .ancestors()
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(names, vec!["core", "org.example"]);
    }

    #[test]
    fn test_builder_from_json() {
        let json = r#"{
            "kind": "Function",
            "name": "f",
            "details": [
                { "kind": "Parameter", "name": "x", "details": [{ "kind": "Type", "name": "Int" }] },
                { "kind": "Type", "name": "Unit" }
            ]
        }"#;
        let node = NodeBuilder::from_json(json).unwrap().build();
        assert_eq!(node.kind(), &NodeKind::Function);
        assert_eq!(node.details(&NodeKind::Parameter).count(), 1);
    }

    #[test]
    fn test_builder_from_malformed_json() {
        let err = NodeBuilder::from_json(r#"{ "name": "f" }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().starts_with("Invalid input: "));
    }

    #[test]
    fn test_class_like_kinds() {
        assert!(NodeKind::Interface.is_class_like());
        assert!(NodeKind::EnumItem.is_class_like());
        assert!(!NodeKind::Function.is_class_like());
        assert!(!NodeKind::Other("Typealias".into()).is_class_like());
    }

    #[test]
    fn test_with_details_keeps_order() {
        let node = NodeBuilder::new(NodeKind::Class, "Foo")
            .with_details([NodeBuilder::modifier("open"), NodeBuilder::modifier("data")])
            .build();
        let names: Vec<&str> = node
            .details(&NodeKind::Modifier)
            .map(DocumentationNode::name)
            .collect();
        assert_eq!(names, vec!["open", "data"]);
    }
}
