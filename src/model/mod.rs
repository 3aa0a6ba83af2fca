//! Document model types for documentation rendering.
//!
//! Two trees live here. [`DocumentationNode`] is the semantic declaration
//! tree handed over by the upstream model builder. [`ContentNode`] is the
//! format-agnostic intermediate representation that signature renderers
//! produce and output builders consume.

mod content;
mod node;

pub use content::{ContentBlock, ContentNode, LinkTarget};
pub use node::{DocumentationNode, NodeBuilder, NodeKind};
