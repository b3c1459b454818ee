//! Compose LaTeX source text from a tree of typed nodes.
//!
//! ```ignore
//! use texnodes::domain::{Command, DocTree, NodeKind};
//!
//! let mut tree = DocTree::new();
//! let root = tree.root();
//! tree.new_comment(root, "hello.tex - Our first LaTex example!")?;
//! tree.new_command(root, Command::new("documentclass").argument("article"))?;
//! let env = tree.new_environment(root, "document")?;
//! tree.new_text(env, "Hello World!")?;
//!
//! assert_eq!(
//!     tree.render(root)?,
//!     "% hello.tex - Our first LaTex example!\n\
//!      \\documentclass{article}\n\
//!      \\begin{document}\nHello World!\n\\end{document}\n"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod manifest;
pub mod tree_traits;
pub mod util;

pub use domain::{Argument, Command, DocTree, DomainError, NodeId, NodeKind, Options, TreeResult};
