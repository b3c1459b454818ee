//! Tree-building conveniences on top of `create` + `append`.

use tracing::{debug, instrument};

use crate::domain::arena::{DocTree, NodeId};
use crate::domain::entities::{Command, NodeKind};
use crate::domain::error::{DomainError, TreeResult};

impl DocTree {
    /// Creates a node of `kind` and appends it to `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn add(&mut self, parent: NodeId, kind: NodeKind) -> TreeResult<NodeId> {
        let id = self.create(kind)?;
        self.append(parent, id)
    }

    pub fn new_environment(&mut self, parent: NodeId, name: &str) -> TreeResult<NodeId> {
        self.add(parent, NodeKind::environment(name))
    }

    pub fn new_command(&mut self, parent: NodeId, cmd: Command) -> TreeResult<NodeId> {
        self.add(parent, cmd.into())
    }

    pub fn new_group(&mut self, parent: NodeId, name: Option<&str>) -> TreeResult<NodeId> {
        self.add(parent, NodeKind::group(name))
    }

    pub fn new_content(&mut self, parent: NodeId) -> TreeResult<NodeId> {
        self.add(parent, NodeKind::Content)
    }

    pub fn new_text(&mut self, parent: NodeId, txt: &str) -> TreeResult<NodeId> {
        self.add(parent, NodeKind::text(txt))
    }

    pub fn new_comment(&mut self, parent: NodeId, txt: &str) -> TreeResult<NodeId> {
        self.add(parent, NodeKind::comment(txt))
    }

    pub fn new_line_break(&mut self, parent: NodeId) -> TreeResult<NodeId> {
        self.add(parent, NodeKind::LineBreak)
    }

    /// Creates an unnamed Environment or Command child by accessor name.
    ///
    /// Name it afterwards with [`DocTree::set_name`].
    #[instrument(level = "debug", skip(self))]
    pub fn accessor(&mut self, parent: NodeId, name: &str) -> TreeResult<NodeId> {
        let kind = match name {
            "environment" | "env" => NodeKind::environment(""),
            "command" | "cmd" => Command::new("").into(),
            _ => return Err(DomainError::UnknownAccessor(name.to_string())),
        };
        debug!(accessor = name, "creating child");
        self.add(parent, kind)
    }

    pub fn set_name(&mut self, id: NodeId, new_name: &str) -> TreeResult<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Environment { name, .. } | NodeKind::Switch { name } => {
                *name = new_name.to_string();
            }
            NodeKind::Command(cmd) => cmd.name = new_name.to_string(),
            NodeKind::Group { name } => *name = Some(new_name.to_string()),
            other => return Err(DomainError::Unnamed(other.kind_name())),
        }
        Ok(())
    }

    /// Appends `child` to `parent`, then runs `scope` with the child as the
    /// nesting target. Returns what `scope` returns.
    pub fn with_child<F, R>(&mut self, parent: NodeId, child: NodeId, scope: F) -> TreeResult<R>
    where
        F: FnOnce(&mut DocTree, NodeId) -> TreeResult<R>,
    {
        self.append(parent, child)?;
        scope(self, child)
    }
}
