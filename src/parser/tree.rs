//! Derivation tree
//!
//! Nodes live in one arena owned by [`ParseTree`]; children are kept in
//! order and each node knows its parent by index, so upward walks (scope
//! lookup) and downward walks (rendering, leaf collection) need no shared
//! ownership.

use super::lexer::Token;
use crate::grammar::{NonTerminal, ProductionId};
use std::fmt;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A non-terminal expanded with `production`
    Interior {
        non_terminal: NonTerminal,
        production: ProductionId,
    },
    /// A matched input token
    Leaf { token: Token },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn non_terminal(&self) -> Option<NonTerminal> {
        match &self.kind {
            NodeKind::Interior { non_terminal, .. } => Some(*non_terminal),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn production(&self) -> Option<ProductionId> {
        match &self.kind {
            NodeKind::Interior { production, .. } => Some(*production),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match &self.kind {
            NodeKind::Leaf { token } => Some(token),
            NodeKind::Interior { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl ParseTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interior node under `parent`; the first parentless node
    /// becomes the root.
    pub fn add_interior(
        &mut self,
        parent: Option<NodeId>,
        non_terminal: NonTerminal,
        production: ProductionId,
    ) -> NodeId {
        self.push(
            parent,
            NodeKind::Interior {
                non_terminal,
                production,
            },
        )
    }

    pub fn add_leaf(&mut self, parent: Option<NodeId>, token: Token) -> NodeId {
        self.push(parent, NodeKind::Leaf { token })
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });

        match parent.and_then(|p| self.nodes.get_mut(p.0)) {
            Some(parent_node) => parent_node.children.push(id),
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }
        id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node id in creation order (pre-order for a finished parse).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Leaves below `id` left to right.
    pub fn leaves_under(&self, id: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            if node.is_leaf() {
                leaves.push(current);
            }
            pending.extend(node.children.iter().rev().copied());
        }
        leaves
    }

    /// All leaves left to right, i.e. the consumed input.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.root.map(|r| self.leaves_under(r)).unwrap_or_default()
    }

    /// Lexemes of the leaves below `id` joined by single spaces.
    pub fn text_of(&self, id: NodeId) -> String {
        self.leaves_under(id)
            .into_iter()
            .filter_map(|leaf| self.node(leaf).and_then(Node::token))
            .map(|t| t.lexeme.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        let indent = "  ".repeat(depth);
        match &node.kind {
            NodeKind::Interior {
                non_terminal,
                production,
            } => {
                writeln!(f, "{}{} ({})", indent, non_terminal, production)?;
                if node.children.is_empty() {
                    writeln!(f, "{}  ε", indent)?;
                }
            }
            NodeKind::Leaf { token } => writeln!(f, "{}{}", indent, token)?,
        }
        for child in &node.children {
            self.render(f, *child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.render(f, root, 0),
            None => Ok(()),
        }
    }
}
