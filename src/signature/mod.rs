//! Signature rendering: declaration nodes to content trees.
//!
//! A [`SignatureRenderer`] turns one [`DocumentationNode`] into a
//! [`ContentBlock`] holding keyword, identifier, symbol and text tokens. The
//! block is format-agnostic; output builders decide how tokens look.
//!
//! # Example
//!
//! ```
//! use sigdoc::model::{NodeBuilder, NodeKind};
//! use sigdoc::signature::{KotlinSignatureRenderer, SignatureRenderer};
//!
//! let function = NodeBuilder::new(NodeKind::Function, "f")
//!     .with_detail(NodeBuilder::parameter("x", NodeBuilder::type_ref("Int", vec![])))
//!     .with_detail(NodeBuilder::type_ref("Unit", vec![]))
//!     .build();
//!
//! let block = KotlinSignatureRenderer::new().render(&function).unwrap();
//! assert_eq!(block.plain_text(), "fun f(x: Int): Unit");
//! ```

mod kotlin;

pub use kotlin::KotlinSignatureRenderer;

use crate::error::Result;
use crate::model::{ContentBlock, DocumentationNode};

/// How the top-level dispatcher treats kinds without a signature rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKindPolicy {
    /// Render `"<kind>: <name>"` as plain text
    #[default]
    Fallback,
    /// Fail with [`crate::Error::UnsupportedNodeKind`]
    Reject,
}

/// Trait for language-aware signature renderers.
///
/// Implement this trait to render declarations in another language's syntax.
pub trait SignatureRenderer: Send + Sync {
    /// Render the signature of a declaration node.
    fn render(&self, node: &DocumentationNode) -> Result<ContentBlock>;

    /// Name under which the node is displayed.
    fn render_name(&self, node: &DocumentationNode) -> Result<String>;
}
