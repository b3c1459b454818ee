use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::entities::{Argument, NodeKind};
use crate::domain::error::{DomainError, TreeResult};

static NEXT_TREE: AtomicU64 = AtomicU64::new(0);

/// Handle of a node inside a [`DocTree`].
///
/// Handles carry the tag of the tree that issued them and resolve nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: Index,
}

/// Tree node in the arena-based document structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Kind and payload of this node
    pub kind: NodeKind,
    /// Owning node, None for the root and detached nodes.
    /// Either holds this node in `children` or as its command argument.
    pub parent: Option<NodeId>,
    /// Child nodes in rendering order
    pub children: Vec<NodeId>,
}

/// Arena-based document tree.
///
/// Ownership flows strictly from parents to children; `parent` is a
/// back-reference used for sibling lookup. The whole tree is dropped together.
#[derive(Debug)]
pub struct DocTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// The Document node created with the tree
    root: NodeId,
    /// Tag stamped into every handle this tree issues
    tag: u64,
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocTree {
    /// Creates a tree holding a single empty Document root.
    pub fn new() -> Self {
        let tag = NEXT_TREE.fetch_add(1, Ordering::Relaxed);
        let mut arena = Arena::new();
        let index = arena.insert(TreeNode {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
        });
        Self {
            arena,
            root: NodeId { tree: tag, index },
            tag,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Creates a detached node.
    ///
    /// A command with a subtree argument takes ownership of that subtree,
    /// see [`DocTree::set_argument`].
    #[instrument(level = "trace", skip(self))]
    pub fn create(&mut self, mut kind: NodeKind) -> TreeResult<NodeId> {
        let argument = match &mut kind {
            NodeKind::Command(cmd) => {
                if let Argument::Subtree(sub) = cmd.argument {
                    self.check_subtree(&cmd.name, sub)?;
                }
                std::mem::take(&mut cmd.argument)
            }
            _ => Argument::None,
        };

        let index = self.arena.insert(TreeNode {
            kind,
            parent: None,
            children: Vec::new(),
        });
        let id = NodeId {
            tree: self.tag,
            index,
        };
        if !argument.is_none() {
            self.set_argument(id, argument)?;
        }
        Ok(id)
    }

    /// Replaces the argument of command `id`.
    ///
    /// A subtree argument is detached from its previous owner and owned by the
    /// command from then on. A replaced subtree is left detached.
    #[instrument(level = "trace", skip(self))]
    pub fn set_argument(&mut self, id: NodeId, argument: Argument) -> TreeResult<()> {
        let previous = match self.kind(id)? {
            NodeKind::Command(cmd) => {
                if let Argument::Subtree(sub) = argument {
                    self.check_subtree(&cmd.name, sub)?;
                    if self.is_ancestor_or_self(sub, id) {
                        return Err(DomainError::CycleDetected {
                            parent: id,
                            child: sub,
                        });
                    }
                }
                cmd.argument.clone()
            }
            other => return Err(DomainError::NoArgument(other.kind_name())),
        };

        if let Argument::Subtree(old) = previous {
            self.detach(old)?;
        }
        if let Argument::Subtree(sub) = argument {
            self.detach(sub)?;
            self.node_mut(sub)?.parent = Some(id);
        }
        if let NodeKind::Command(cmd) = &mut self.node_mut(id)?.kind {
            cmd.argument = argument;
        }
        Ok(())
    }

    fn check_subtree(&self, command: &str, sub: NodeId) -> TreeResult<()> {
        if self.contains(sub) {
            Ok(())
        } else {
            Err(DomainError::InvalidArgument {
                command: command.to_string(),
                reason: format!("subtree {:?} does not exist", sub),
            })
        }
    }

    /// Arena slot of `id`, None for handles issued by another tree.
    fn slot(&self, id: NodeId) -> Option<Index> {
        (id.tree == self.tag).then_some(id.index)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some_and(|index| self.arena.contains(index))
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(self.slot(id)?)
    }

    pub fn node(&self, id: NodeId) -> TreeResult<&TreeNode> {
        self.get_node(id).ok_or(DomainError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut TreeNode> {
        let index = self.slot(id).ok_or(DomainError::NodeNotFound(id))?;
        self.arena.get_mut(index).ok_or(DomainError::NodeNotFound(id))
    }

    pub fn kind(&self, id: NodeId) -> TreeResult<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        self.node(id).map(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        self.node(id).map(|n| n.children.as_slice())
    }

    /// Appends `child` to the end of `parent`'s children.
    ///
    /// A child that is attached elsewhere is moved. Appending a node below
    /// itself fails with [`DomainError::CycleDetected`].
    #[instrument(level = "trace", skip(self))]
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> TreeResult<NodeId> {
        self.node(child)?;
        self.node(parent)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(DomainError::CycleDetected { parent, child });
        }

        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(child)
    }

    /// Wraps `txt` in a `T` leaf and appends it.
    pub fn append_text(&mut self, parent: NodeId, txt: &str) -> TreeResult<NodeId> {
        let id = self.create(NodeKind::t(txt))?;
        self.append(parent, id)
    }

    /// Removes `id` from its owner without dropping it.
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, id: NodeId) -> TreeResult<()> {
        let Some(owner) = self.node(id)?.parent else {
            return Ok(());
        };
        debug!(?owner, "detaching node");

        let owner_node = self.node_mut(owner)?;
        owner_node.children.retain(|&c| c != id);
        if let NodeKind::Command(cmd) = &mut owner_node.kind {
            if cmd.argument == Argument::Subtree(id) {
                cmd.argument = Argument::None;
            }
        }
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// The node following `id` in its owner's children.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get_node(id)?.parent?;
        let siblings = &self.get_node(parent)?.children;
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == candidate {
                return true;
            }
            match self.get_node(id).and_then(|n| n.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Nodes owned by `id` in rendering order: argument subtree, then children.
    pub(crate) fn owned(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.get_node(id) else {
            return Vec::new();
        };
        let mut owned = Vec::with_capacity(node.children.len() + 1);
        if let NodeKind::Command(cmd) = &node.kind {
            if let Argument::Subtree(sub) = cmd.argument {
                owned.push(sub);
            }
        }
        owned.extend(node.children.iter().copied());
        owned
    }

    /// Pre-order traversal starting at `id`, including argument subtrees.
    pub fn descendants(&self, id: NodeId) -> TreeIterator<'_> {
        TreeIterator::new(self, id)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: NodeId) -> usize {
        if self.contains(id) {
            1 + self
                .owned(id)
                .into_iter()
                .map(|child| self.depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a DocTree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a DocTree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        let node = self.tree.get_node(current)?;
        // Push in reverse order for left-to-right traversal
        for child in self.tree.owned(current).into_iter().rev() {
            self.stack.push(child);
        }
        Some((current, node))
    }
}
