//! Read-only queries over a finished derivation tree
//!
//! A declarator is an `identifier` leaf that is a direct child of the
//! `Assignment` or `AssignTail` chain of a `Declaration`:
//!
//! ```text
//! Declaration → int Assignment
//! Assignment  → identifier Initializer AssignTail
//! AssignTail  → , identifier Initializer AssignTail
//! ```
//!
//! Every other `identifier` leaf is a use. Queries return `None` or an empty
//! list instead of failing.

use super::tree::{NodeId, ParseTree};
use crate::grammar::{NonTerminal, Terminal};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
}

impl ScalarType {
    fn from_terminal(terminal: Terminal) -> Option<Self> {
        match terminal {
            Terminal::Int => Some(ScalarType::Int),
            Terminal::Float => Some(ScalarType::Float),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Int => write!(f, "int"),
            ScalarType::Float => write!(f, "float"),
        }
    }
}

/// One declared identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The enclosing `Declaration` node
    pub node: NodeId,
    /// The declarator leaf
    pub identifier: NodeId,
    pub name: String,
    pub ty: ScalarType,
    pub offset: usize,
}

pub struct TreeSearcher<'a> {
    tree: &'a ParseTree,
    /// In source order
    declarations: Vec<Declaration>,
    /// Declarator leaf → index into `declarations`
    by_leaf: FxHashMap<NodeId, usize>,
}

impl<'a> TreeSearcher<'a> {
    pub fn new(tree: &'a ParseTree) -> Self {
        let mut declarations = Vec::new();
        let mut by_leaf = FxHashMap::default();

        for leaf in tree.leaves() {
            if let Some(declaration) = Self::declaration_of(tree, leaf) {
                by_leaf.insert(leaf, declarations.len());
                declarations.push(declaration);
            }
        }

        Self {
            tree,
            declarations,
            by_leaf,
        }
    }

    /// Build the declaration introduced by `leaf`, if it is a declarator.
    fn declaration_of(tree: &ParseTree, leaf: NodeId) -> Option<Declaration> {
        let token = tree.node(leaf)?.token()?;
        if token.terminal != Terminal::Identifier {
            return None;
        }

        let mut current = tree.parent(leaf)?;
        loop {
            match tree.node(current)?.non_terminal()? {
                NonTerminal::Assignment | NonTerminal::AssignTail => {
                    current = tree.parent(current)?;
                }
                NonTerminal::Declaration => break,
                _ => return None,
            }
        }

        // Declaration → (int | float) Assignment
        let type_leaf = *tree.children(current).first()?;
        let ty = ScalarType::from_terminal(tree.node(type_leaf)?.token()?.terminal)?;

        Some(Declaration {
            node: current,
            identifier: leaf,
            name: token.lexeme.clone(),
            ty,
            offset: token.offset,
        })
    }

    /// Every declared identifier in source order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Distinct declared names in order of first declaration.
    pub fn declared_names(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.declarations
            .iter()
            .map(|d| d.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn find_declarations(&self, name: &str) -> Vec<&Declaration> {
        self.declarations.iter().filter(|d| d.name == name).collect()
    }

    /// Type of the first declaration of `name`.
    pub fn resolve_type(&self, name: &str) -> Option<ScalarType> {
        self.declarations
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.ty)
    }

    pub fn is_declarator(&self, leaf: NodeId) -> bool {
        self.by_leaf.contains_key(&leaf)
    }

    /// Nearest declaration visible from the identifier leaf `use_leaf`.
    ///
    /// Walks parent links upward. Through each `Statements → X Statements`
    /// reached from its tail, a declaration `X` is visible; inside a
    /// `Declaration`, its earlier declarators are. A loop body's
    /// declarations are never visible from outside it, since the walk only
    /// moves upward.
    pub fn declaration_in_scope(&self, use_leaf: NodeId) -> Option<&Declaration> {
        if let Some(index) = self.by_leaf.get(&use_leaf) {
            return self.declarations.get(*index);
        }

        let token = self.tree.node(use_leaf)?.token()?;
        let name = token.lexeme.as_str();
        let use_offset = token.offset;

        let mut current = use_leaf;
        while let Some(parent) = self.tree.parent(current) {
            let node = self.tree.node(parent)?;
            match node.non_terminal() {
                Some(NonTerminal::Statements) => {
                    let children = self.tree.children(parent);
                    if children.len() == 2 && children[1] == current {
                        if let Some(found) = self.latest_in(children[0], name, usize::MAX) {
                            return Some(found);
                        }
                    }
                }
                Some(NonTerminal::Declaration) => {
                    if let Some(found) = self.latest_in(parent, name, use_offset) {
                        return Some(found);
                    }
                }
                _ => {}
            }
            current = parent;
        }
        None
    }

    /// Last declarator of `name` in declaration `node` before `before`.
    fn latest_in(&self, node: NodeId, name: &str, before: usize) -> Option<&Declaration> {
        self.declarations
            .iter()
            .filter(|d| d.node == node && d.name == name && d.offset < before)
            .last()
    }

    pub fn resolve_type_at(&self, use_leaf: NodeId) -> Option<ScalarType> {
        self.declaration_in_scope(use_leaf).map(|d| d.ty)
    }

    /// Identifier leaves named `name` that are not declarators.
    pub fn uses(&self, name: &str) -> Vec<NodeId> {
        self.tree
            .leaves()
            .into_iter()
            .filter(|leaf| !self.is_declarator(*leaf))
            .filter(|leaf| {
                self.tree
                    .node(*leaf)
                    .and_then(|n| n.token())
                    .is_some_and(|t| t.terminal == Terminal::Identifier && t.lexeme == name)
            })
            .collect()
    }

    /// Lexemes of the whole declaration statement, e.g. `int x = 5 ;`.
    pub fn definition_text(&self, declaration: &Declaration) -> String {
        self.tree.text_of(declaration.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::parser::lexer::Lexer;
    use crate::parser::predictive::PredictiveParser;
    use crate::tables::ParseTable;

    fn parse(source: &str) -> ParseTree {
        let grammar = Grammar::c_subset()
            .clone()
            .with_start(NonTerminal::Statements)
            .unwrap();
        let table = ParseTable::build(&grammar).unwrap();
        let tokens = Lexer::new(source).tokenize().unwrap();
        PredictiveParser::new(&table).parse(&tokens).unwrap().tree
    }

    #[test]
    fn test_declarators_and_uses() {
        let tree = parse("int a = 1, b ; float c ; a = b ;");
        let searcher = TreeSearcher::new(&tree);

        assert_eq!(searcher.declared_names(), vec!["a", "b", "c"]);
        assert_eq!(searcher.resolve_type("c"), Some(ScalarType::Float));
        assert_eq!(searcher.resolve_type("b"), Some(ScalarType::Int));
        assert_eq!(searcher.resolve_type("z"), None);
        assert_eq!(searcher.uses("a").len(), 1);
        assert_eq!(searcher.uses("b").len(), 1);

        let a = searcher.find_declarations("a")[0];
        assert_eq!(searcher.definition_text(a), "int a = 1 , b ;");
    }

    #[test]
    fn test_scope_of_use() {
        let tree = parse("float x ; while ( x < 3 ) { int x ; x = 1 ; } x = 2 ;");
        let searcher = TreeSearcher::new(&tree);
        let uses = searcher.uses("x");
        assert_eq!(uses.len(), 3);

        // condition sees the outer float, the body sees its own int,
        // and the loop body does not leak.
        assert_eq!(searcher.resolve_type_at(uses[0]), Some(ScalarType::Float));
        assert_eq!(searcher.resolve_type_at(uses[1]), Some(ScalarType::Int));
        assert_eq!(searcher.resolve_type_at(uses[2]), Some(ScalarType::Float));
    }

    #[test]
    fn test_earlier_declarator_in_same_declaration() {
        let tree = parse("int a = 1, b = a ;");
        let searcher = TreeSearcher::new(&tree);
        let use_of_a = searcher.uses("a")[0];
        let found = searcher.declaration_in_scope(use_of_a).unwrap();
        assert_eq!(found.name, "a");
        assert_eq!(found.identifier, searcher.find_declarations("a")[0].identifier);
    }

    #[test]
    fn test_undeclared_use() {
        let tree = parse("y = 2 ; int y ;");
        let searcher = TreeSearcher::new(&tree);
        let use_of_y = searcher.uses("y")[0];
        assert!(searcher.declaration_in_scope(use_of_y).is_none());
        assert_eq!(searcher.resolve_type("y"), Some(ScalarType::Int));
    }
}
