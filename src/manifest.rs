//! Declarative TOML description of a document tree.
//!
//! ```toml
//! [[nodes]]
//! kind = "command"
//! name = "documentclass"
//! argument = "article"
//! options = ["11pt", "a4paper"]
//!
//! [[nodes]]
//! kind = "environment"
//! name = "document"
//! children = [{ kind = "text", text = "Hello World!" }]
//! ```
//!
//! A command `argument` may be a string, an array of strings or an inline
//! node table. Anything else is rejected with
//! [`DomainError::InvalidArgument`].

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{Argument, Command, DocTree, DomainError, NodeId, NodeKind};

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

pub type ManifestResult<T> = Result<T, ManifestError>;

/// Top-level manifest: the children of the Document root.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentManifest {
    #[serde(default)]
    pub nodes: Vec<NodeManifest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum NodeManifest {
    Text {
        text: String,
    },
    T {
        text: String,
    },
    LineBreak,
    Comment {
        text: String,
    },
    #[serde(rename = "dquote")]
    DQuote {
        text: String,
    },
    Group {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        children: Vec<NodeManifest>,
    },
    Environment {
        name: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        children: Vec<NodeManifest>,
    },
    Command {
        name: String,
        #[serde(default)]
        argument: Option<toml::Value>,
        #[serde(default)]
        options: Option<OptionsManifest>,
        #[serde(default = "default_newline")]
        newline: bool,
        #[serde(default)]
        children: Vec<NodeManifest>,
    },
    Content {
        #[serde(default)]
        children: Vec<NodeManifest>,
    },
    Switch {
        name: String,
        #[serde(default)]
        children: Vec<NodeManifest>,
    },
}

const NO_CHILDREN: &[NodeManifest] = &[];

fn default_newline() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionsManifest {
    One(String),
    Many(Vec<String>),
}

impl FromStr for DocumentManifest {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl DocumentManifest {
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> ManifestResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Materializes the manifest below a fresh Document root.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self) -> ManifestResult<DocTree> {
        let mut tree = DocTree::new();
        let root = tree.root();
        for node in &self.nodes {
            let id = node.materialize(&mut tree)?;
            tree.append(root, id)?;
        }
        debug!(nodes = tree.len(), "built document tree");
        Ok(tree)
    }
}

impl NodeManifest {
    /// Creates this node and its children in `tree`, detached.
    pub fn materialize(&self, tree: &mut DocTree) -> ManifestResult<NodeId> {
        let (kind, children) = match self {
            NodeManifest::Text { text } => (NodeKind::text(text.as_str()), NO_CHILDREN),
            NodeManifest::T { text } => (NodeKind::t(text.as_str()), NO_CHILDREN),
            NodeManifest::LineBreak => (NodeKind::LineBreak, NO_CHILDREN),
            NodeManifest::Comment { text } => (NodeKind::comment(text.as_str()), NO_CHILDREN),
            NodeManifest::DQuote { text } => (NodeKind::dquote(text.as_str()), NO_CHILDREN),
            NodeManifest::Group { name, children } => {
                (NodeKind::group(name.as_deref()), children.as_slice())
            }
            NodeManifest::Environment {
                name,
                args,
                children,
            } => (
                NodeKind::environment_with_args(name.as_str(), args.iter().cloned()),
                children.as_slice(),
            ),
            NodeManifest::Command {
                name,
                argument,
                options,
                newline,
                children,
            } => {
                let mut cmd = Command::new(name.as_str());
                if let Some(value) = argument {
                    cmd.argument = classify_argument(tree, name, value)?;
                }
                match options {
                    Some(OptionsManifest::One(opt)) => cmd = cmd.options(opt.as_str()),
                    Some(OptionsManifest::Many(opts)) => cmd = cmd.options(opts.clone()),
                    None => {}
                }
                cmd.newline = *newline;
                (cmd.into(), children.as_slice())
            }
            NodeManifest::Content { children } => (NodeKind::Content, children.as_slice()),
            NodeManifest::Switch { name, children } => {
                (NodeKind::switch(name.as_str()), children.as_slice())
            }
        };

        let id = tree.create(kind)?;
        for child in children {
            let child_id = child.materialize(tree)?;
            tree.append(id, child_id)?;
        }
        Ok(id)
    }
}

/// Maps a dynamic TOML value onto one of the argument shapes.
fn classify_argument(
    tree: &mut DocTree,
    command: &str,
    value: &toml::Value,
) -> ManifestResult<Argument> {
    let invalid = |reason: String| DomainError::InvalidArgument {
        command: command.to_string(),
        reason,
    };

    match value {
        toml::Value::String(s) => Ok(Argument::Literal(s.clone())),
        toml::Value::Array(items) => {
            let strings = items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid("array elements must all be strings".into()))?;
            Ok(Argument::List(strings))
        }
        toml::Value::Table(_) => {
            let node: NodeManifest = value
                .clone()
                .try_into()
                .map_err(|e| invalid(format!("not a node: {}", e)))?;
            let id = node.materialize(tree)?;
            Ok(Argument::Subtree(id))
        }
        other => Err(invalid(format!("unsupported {}", other.type_str())).into()),
    }
}
