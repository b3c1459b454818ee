//! Domain layer: the node tree and its renderer
//!
//! This layer is independent of external concerns (no config, no CLI, no file handling).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod render;

pub use arena::{DocTree, NodeId, TreeNode};
pub use entities::{Argument, Command, NodeKind, Options};
pub use error::{DomainError, TreeResult};
pub use render::Rendered;
