//! Node kinds and their payloads.

use std::fmt;

use crate::domain::arena::NodeId;

/// Variant-specific payload of a tree node.
///
/// Every kind shares the same prefix/content/suffix rendering contract, see
/// [`crate::domain::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root container, renders its children only.
    Document,
    /// Transparent grouping, typically used as a composite command argument.
    Content,
    /// Literal text leaf, no escaping.
    Text(String),
    /// Literal text inside composite argument content.
    T(String),
    /// `\\` followed by a newline.
    LineBreak,
    /// `% text` followed by a newline.
    Comment(String),
    /// Text wrapped in LaTeX curly double quotes.
    DQuote(String),
    /// Brace group, or `\begin<name>`/`\end<name>` when named.
    Group { name: Option<String> },
    /// `\begin{name}{arg}...` block closed by `\end{name}`.
    Environment { name: String, args: Vec<String> },
    Command(Command),
    /// `name\{content\}`, bypasses the shared template.
    Switch { name: String },
}

impl NodeKind {
    pub fn text(txt: impl Into<String>) -> Self {
        NodeKind::Text(txt.into())
    }

    pub fn t(txt: impl Into<String>) -> Self {
        NodeKind::T(txt.into())
    }

    pub fn comment(txt: impl Into<String>) -> Self {
        NodeKind::Comment(txt.into())
    }

    pub fn dquote(txt: impl Into<String>) -> Self {
        NodeKind::DQuote(txt.into())
    }

    pub fn group(name: Option<&str>) -> Self {
        NodeKind::Group {
            name: name.map(str::to_string),
        }
    }

    pub fn environment(name: impl Into<String>) -> Self {
        NodeKind::Environment {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn environment_with_args<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NodeKind::Environment {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn switch(name: impl Into<String>) -> Self {
        NodeKind::Switch { name: name.into() }
    }

    /// Literal text leaves trigger the empty group after a preceding command.
    pub fn is_text(&self) -> bool {
        matches!(self, NodeKind::Text(_) | NodeKind::T(_))
    }

    /// Leaves render their own payload instead of their children.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeKind::Text(_)
                | NodeKind::T(_)
                | NodeKind::LineBreak
                | NodeKind::Comment(_)
                | NodeKind::DQuote(_)
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Content => "Content",
            NodeKind::Text(_) => "Text",
            NodeKind::T(_) => "T",
            NodeKind::LineBreak => "LineBreak",
            NodeKind::Comment(_) => "Comment",
            NodeKind::DQuote(_) => "DQuote",
            NodeKind::Group { .. } => "Group",
            NodeKind::Environment { .. } => "Environment",
            NodeKind::Command(_) => "Command",
            NodeKind::Switch { .. } => "Switch",
        }
    }
}

impl From<Command> for NodeKind {
    fn from(cmd: Command) -> Self {
        NodeKind::Command(cmd)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Text(txt) | NodeKind::T(txt) | NodeKind::DQuote(txt) => {
                write!(f, "{} {:?}", self.kind_name(), txt)
            }
            NodeKind::Comment(txt) => write!(f, "Comment {:?}", txt),
            NodeKind::Group { name: Some(name) } => write!(f, "Group {}", name),
            NodeKind::Environment { name, .. } => write!(f, "Environment {}", name),
            NodeKind::Command(cmd) => write!(f, "Command \\{}", cmd.name),
            NodeKind::Switch { name } => write!(f, "Switch {}", name),
            _ => f.write_str(self.kind_name()),
        }
    }
}

/// Argument shape of a command, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Argument {
    /// No argument block, e.g. `\today`.
    #[default]
    None,
    /// One `{value}` block; commas inside are kept.
    Literal(String),
    /// One `{element}` block per element.
    List(Vec<String>),
    /// `{` + rendered subtree + `}`. The subtree is owned by the command.
    Subtree(NodeId),
}

impl Argument {
    pub fn is_none(&self) -> bool {
        matches!(self, Argument::None)
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Literal(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Literal(value)
    }
}

impl From<Vec<String>> for Argument {
    fn from(values: Vec<String>) -> Self {
        Argument::List(values)
    }
}

impl From<Vec<&str>> for Argument {
    fn from(values: Vec<&str>) -> Self {
        Argument::List(values.into_iter().map(str::to_string).collect())
    }
}

impl From<NodeId> for Argument {
    fn from(id: NodeId) -> Self {
        Argument::Subtree(id)
    }
}

/// Bracketed command options. A single string is a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(Vec<String>);

impl Options {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Options {
    fn from(value: &str) -> Self {
        Options(vec![value.to_string()])
    }
}

impl From<String> for Options {
    fn from(value: String) -> Self {
        Options(vec![value])
    }
}

impl From<Vec<String>> for Options {
    fn from(values: Vec<String>) -> Self {
        Options(values)
    }
}

impl From<Vec<&str>> for Options {
    fn from(values: Vec<&str>) -> Self {
        Options(values.into_iter().map(str::to_string).collect())
    }
}

/// A LaTeX command: `\name[options]{arguments}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub options: Options,
    pub argument: Argument,
    /// Emit a newline after the command (default).
    pub newline: bool,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Options::none(),
            argument: Argument::None,
            newline: true,
        }
    }

    pub fn argument(mut self, argument: impl Into<Argument>) -> Self {
        self.argument = argument.into();
        self
    }

    pub fn options(mut self, options: impl Into<Options>) -> Self {
        self.options = options.into();
        self
    }

    /// Suppress the trailing newline.
    pub fn inline(mut self) -> Self {
        self.newline = false;
        self
    }
}
