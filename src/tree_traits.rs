use termtree::Tree;
use tracing::instrument;

use crate::domain::{Argument, DocTree, NodeId, NodeKind};

/// Conversion of a node tree into a printable outline.
pub trait TreeNodeConvert {
    fn to_tree_string(&self, id: NodeId) -> Tree<String>;
}

impl TreeNodeConvert for DocTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, id: NodeId) -> Tree<String> {
        let Some(node) = self.get_node(id) else {
            return Tree::new("Empty tree".to_string());
        };

        let mut tree = Tree::new(node.kind.to_string());
        if let NodeKind::Command(cmd) = &node.kind {
            if let Argument::Subtree(sub) = cmd.argument {
                let mut arg = Tree::new("argument".to_string());
                arg.push(self.to_tree_string(sub));
                tree.push(arg);
            }
        }
        for &child in &node.children {
            tree.push(self.to_tree_string(child));
        }
        tree
    }
}
