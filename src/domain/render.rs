//! Rendering of a node tree to LaTeX source.
//!
//! Every node renders as `start + content + end`:
//!
//! | kind        | start                          | content            | end                |
//! |-------------|--------------------------------|--------------------|--------------------|
//! | Document    |                                | children           |                    |
//! | Content     |                                | children           |                    |
//! | Text, T     |                                | text               |                    |
//! | LineBreak   |                                | `\\` newline       |                    |
//! | Comment     | `% `                           | text               | newline            |
//! | DQuote      | ` `` `                         | text               | `''`               |
//! | Group       | `{` or `\begin<name>`, newline | children           | newline, `}` or `\end<name>`, newline |
//! | Environment | `\begin{name}{arg}...` newline | children           | newline `\end{name}` newline |
//! | Command     | `\name[opts]{args}` (`{}`) (newline) | children     |                    |
//!
//! Switch bypasses the template and renders as `name\{children\}`.
//!
//! The only position-dependent rule: a command whose next sibling is a
//! Text or T leaf gets an empty `{}` group so the following text is not
//! swallowed by LaTeX's spacing rules.

use std::fmt::{self, Display, Write as _};
use std::io;

use tracing::{instrument, trace};

use crate::domain::arena::{DocTree, NodeId, TreeNode};
use crate::domain::entities::{Argument, Command, NodeKind};
use crate::domain::error::TreeResult;

/// Borrowed view of a node that renders through [`Display`].
#[derive(Clone, Copy)]
pub struct Rendered<'a> {
    tree: &'a DocTree,
    id: NodeId,
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.write_node(self.id, f)
    }
}

impl DocTree {
    /// Renders `id` and everything it owns.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, id: NodeId) -> TreeResult<String> {
        let view = self.display(id)?;
        let out = view.to_string();
        trace!(bytes = out.len(), "rendered");
        Ok(out)
    }

    pub fn display(&self, id: NodeId) -> TreeResult<Rendered<'_>> {
        self.node(id)?;
        Ok(Rendered { tree: self, id })
    }

    /// Writes the rendering of `id` to `dest` in one piece. Does not flush.
    #[instrument(level = "debug", skip(self, dest))]
    pub fn write<W: io::Write>(&self, id: NodeId, dest: &mut W) -> io::Result<()> {
        let text = self
            .render(id)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
        dest.write_all(text.as_bytes())
    }

    fn write_node(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(node) = self.get_node(id) else {
            return Ok(());
        };

        if let NodeKind::Switch { name } = &node.kind {
            f.write_str(name)?;
            f.write_str("\\{")?;
            self.write_children(node, f)?;
            return f.write_str("\\}");
        }

        self.write_start(id, node, f)?;
        self.write_content(node, f)?;
        write_end(&node.kind, f)
    }

    fn write_start(&self, id: NodeId, node: &TreeNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &node.kind {
            NodeKind::Comment(_) => f.write_str("% "),
            NodeKind::DQuote(_) => f.write_str("``"),
            NodeKind::Group { name: None } => f.write_str("{\n"),
            NodeKind::Group { name: Some(name) } => write!(f, "\\begin{}\n", name),
            NodeKind::Environment { name, args } => {
                write!(f, "\\begin{{{}}}", name)?;
                for arg in args {
                    write!(f, "{{{}}}", arg)?;
                }
                f.write_char('\n')
            }
            NodeKind::Command(cmd) => self.write_command(id, cmd, f),
            _ => Ok(()),
        }
    }

    fn write_content(&self, node: &TreeNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !node.kind.is_leaf() {
            return self.write_children(node, f);
        }
        match &node.kind {
            NodeKind::Text(txt)
            | NodeKind::T(txt)
            | NodeKind::Comment(txt)
            | NodeKind::DQuote(txt) => f.write_str(txt),
            NodeKind::LineBreak => f.write_str("\\\\\n"),
            _ => Ok(()),
        }
    }

    fn write_children(&self, node: &TreeNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &child in &node.children {
            self.write_node(child, f)?;
        }
        Ok(())
    }

    fn write_command(&self, id: NodeId, cmd: &Command, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\{}", cmd.name)?;

        if !cmd.options.is_empty() {
            write!(f, "[{}]", cmd.options.as_slice().join(","))?;
        }

        match &cmd.argument {
            Argument::None => {}
            Argument::Literal(value) => write!(f, "{{{}}}", value)?,
            Argument::List(values) => {
                for value in values {
                    write!(f, "{{{}}}", value)?;
                }
            }
            Argument::Subtree(sub) => {
                f.write_char('{')?;
                self.write_node(*sub, f)?;
                f.write_char('}')?;
            }
        }

        if self.followed_by_text(id) {
            f.write_str("{}")?;
        }

        if cmd.newline {
            f.write_char('\n')?;
        }
        Ok(())
    }

    fn followed_by_text(&self, id: NodeId) -> bool {
        self.next_sibling(id)
            .and_then(|sibling| self.get_node(sibling))
            .is_some_and(|sibling| sibling.kind.is_text())
    }
}

fn write_end(kind: &NodeKind, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match kind {
        NodeKind::Comment(_) => f.write_char('\n'),
        NodeKind::DQuote(_) => f.write_str("''"),
        NodeKind::Group { name: None } => f.write_str("\n}\n"),
        NodeKind::Group { name: Some(name) } => write!(f, "\n\\end{}\n", name),
        NodeKind::Environment { name, .. } => write!(f, "\n\\end{{{}}}\n", name),
        _ => Ok(()),
    }
}
