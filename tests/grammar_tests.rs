// Grammar, FIRST/FOLLOW and parse table properties

use cppiler::grammar::{Grammar, GrammarError, NonTerminal, ProductionId, Symbol, Terminal};
use cppiler::tables::{GrammarSets, ParseTable};

fn t(terminal: Terminal) -> Symbol {
    Symbol::Terminal(terminal)
}

fn n(non_terminal: NonTerminal) -> Symbol {
    Symbol::NonTerminal(non_terminal)
}

#[test]
fn test_c_subset_is_ll1() {
    let table = ParseTable::build(Grammar::c_subset());
    assert!(table.is_ok(), "Table build failed: {:?}", table.err());
}

#[test]
fn test_rebuild_is_deterministic() {
    let grammar = Grammar::c_subset();
    assert_eq!(
        GrammarSets::compute(grammar).unwrap(),
        GrammarSets::compute(grammar).unwrap()
    );
    assert_eq!(
        ParseTable::build(grammar).unwrap(),
        ParseTable::build(grammar).unwrap()
    );
}

#[test]
fn test_follow_sets_are_terminal_only() {
    let grammar = Grammar::c_subset();
    let sets = GrammarSets::compute(grammar).unwrap();

    assert!(sets.follow(NonTerminal::Start).unwrap().contains(Terminal::EndMarker));
    for nt in grammar.non_terminals() {
        let follow = sets.follow(nt).unwrap();
        assert!(!follow.has_epsilon(), "FOLLOW({}) contains epsilon", nt);
    }
}

#[test]
fn test_every_cell_expands_its_row() {
    let table = ParseTable::build(Grammar::c_subset()).unwrap();
    assert!(!table.is_empty());
    for (nt, terminal, id) in table.cells() {
        let production = table.grammar().production(id).unwrap();
        assert_eq!(production.lhs, nt);
        assert_eq!(table.entry(nt, terminal), Some(production));
    }
}

#[test]
fn test_fragment_start_follows_end_marker() {
    let grammar = Grammar::c_subset()
        .clone()
        .with_start(NonTerminal::Statements)
        .unwrap();
    let table = ParseTable::build(&grammar).unwrap();
    assert!(table
        .sets()
        .follow(NonTerminal::Statements)
        .unwrap()
        .contains(Terminal::EndMarker));
    assert_eq!(
        table
            .entry(NonTerminal::Statements, Terminal::EndMarker)
            .map(|p| p.id.number()),
        Some(12)
    );
}

#[test]
fn test_first_first_conflict() {
    let grammar = Grammar::c_subset()
        .clone()
        .with_production(NonTerminal::Comparison, vec![t(Terminal::EqEq), t(Terminal::EqEq)])
        .unwrap();

    let err = ParseTable::build(&grammar).unwrap_err();
    assert_eq!(
        err,
        GrammarError::Conflict {
            non_terminal: NonTerminal::Comparison,
            terminal: Terminal::EqEq,
            existing: ProductionId(32),
            competing: ProductionId(48),
        }
    );
}

#[test]
fn test_nullable_alternative_overlapping_follow() {
    // FOLLOW(Namespace) = { int }, which the ε alternative already claims.
    let grammar = Grammar::c_subset()
        .clone()
        .with_production(NonTerminal::Namespace, vec![t(Terminal::Int)])
        .unwrap();

    let err = ParseTable::build(&grammar).unwrap_err();
    assert_eq!(
        err,
        GrammarError::Conflict {
            non_terminal: NonTerminal::Namespace,
            terminal: Terminal::Int,
            existing: ProductionId(4),
            competing: ProductionId(48),
        }
    );
}

#[test]
fn test_nullable_alternative_is_reported_on_its_own_row() {
    // Assignment is followed by Statements, whose FIRST holds identifier.
    let grammar = Grammar::c_subset()
        .clone()
        .with_production(NonTerminal::Assignment, vec![])
        .unwrap();

    assert!(ParseTable::build(&grammar).is_err());

    let conflicts = ParseTable::conflicts(&grammar).expect("Sets reach a fixed point");
    assert!(
        conflicts.contains(&GrammarError::Conflict {
            non_terminal: NonTerminal::Assignment,
            terminal: Terminal::Identifier,
            existing: ProductionId(16),
            competing: ProductionId(48),
        }),
        "Conflicts: {:?}",
        conflicts
    );
}

#[test]
fn test_build_reports_first_conflict() {
    let grammar = Grammar::c_subset()
        .clone()
        .with_production(NonTerminal::Assignment, vec![])
        .unwrap();

    let conflicts = ParseTable::conflicts(&grammar).unwrap();
    assert!(conflicts.len() > 1);
    assert_eq!(ParseTable::build(&grammar).unwrap_err(), conflicts[0]);
}

#[test]
fn test_two_nullable_alternatives() {
    let grammar = Grammar::c_subset()
        .clone()
        .with_production(NonTerminal::Initializer, vec![n(NonTerminal::OperationTail)])
        .unwrap();

    let err = ParseTable::build(&grammar).unwrap_err();
    match &err {
        GrammarError::Conflict {
            non_terminal,
            existing,
            competing,
            ..
        } => {
            assert_eq!(*non_terminal, NonTerminal::Initializer);
            assert_eq!(existing.number(), 31);
            assert_eq!(competing.number(), 49);
        }
        other => panic!("Expected a conflict, got {:?}", other),
    }
    assert!(format!("{}", err).contains("productions 31 and 49"));
}

#[test]
fn test_invalid_definitions() {
    let missing = Grammar::new(
        NonTerminal::Start,
        vec![(NonTerminal::Main, vec![t(Terminal::Main)])],
    );
    assert_eq!(missing, Err(GrammarError::MissingStart(NonTerminal::Start)));

    let undefined = Grammar::new(
        NonTerminal::Start,
        vec![(NonTerminal::Start, vec![n(NonTerminal::Main)])],
    );
    assert_eq!(
        undefined,
        Err(GrammarError::UndefinedNonTerminal {
            non_terminal: NonTerminal::Main,
            production: ProductionId(0),
        })
    );

    let marker = Grammar::c_subset()
        .clone()
        .with_production(NonTerminal::Return, vec![t(Terminal::EndMarker)]);
    assert_eq!(marker, Err(GrammarError::EndMarkerInBody(ProductionId(48))));
}

#[test]
fn test_grammar_listing() {
    let listing = Grammar::c_subset().to_string();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 48);
    assert_eq!(lines[0], "  1 Start → Includes Namespace Main");
    assert_eq!(lines[2], "  3 Includes → ε");
    assert_eq!(lines[47], " 48 OutputItem → identifier");
}
