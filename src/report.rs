//! Plain-text report of every analysis phase
//!
//! Sections are written independently so the binary can print the lexical
//! and table sections before parsing and stop at the first error.

use crate::grammar::{Grammar, ProductionId};
use crate::parser::lexer::Token;
use crate::parser::search::TreeSearcher;
use crate::tables::{ParseTable, TokenTable};
use std::fmt::{self, Write};

/// Tokens three to a row, followed by the token count.
pub fn write_tokens(out: &mut impl Write, tokens: &[Token]) -> fmt::Result {
    writeln!(out, "=== Tokens ===")?;
    for row in tokens.chunks(3) {
        let cells: Vec<String> = row.iter().map(|t| t.to_string()).collect();
        let line = format!(
            "{:<25} {:<25} {}",
            cells.first().map(String::as_str).unwrap_or_default(),
            cells.get(1).map(String::as_str).unwrap_or_default(),
            cells.get(2).map(String::as_str).unwrap_or_default(),
        );
        writeln!(out, "{}", line.trim_end())?;
    }
    writeln!(out, "\nSuccessfully tokenized {} tokens.", tokens.len())
}

pub fn write_token_table(out: &mut impl Write, table: &TokenTable) -> fmt::Result {
    writeln!(out, "\n=== Token Table ===")?;
    let mut current = None;
    for entry in table.entries() {
        if current != Some(entry.category) {
            current = Some(entry.category);
            writeln!(out, "\n{}:", entry.category.to_string().to_uppercase())?;
        }
        writeln!(out, "  {:<20} (hash: {})", entry.lexeme, entry.fingerprint)?;
    }
    Ok(())
}

pub fn write_sets(out: &mut impl Write, table: &ParseTable) -> fmt::Result {
    writeln!(out, "\n=== FIRST / FOLLOW ===")?;
    let sets = table.sets();
    for nt in table.grammar().non_terminals() {
        let first = sets.first(nt).map(|s| s.to_string()).unwrap_or_default();
        let follow = sets.follow(nt).map(|s| s.to_string()).unwrap_or_default();
        writeln!(out, "  {:<14} FIRST = {}", nt.as_str(), first)?;
        writeln!(out, "  {:<14} FOLLOW = {}", "", follow)?;
    }
    Ok(())
}

/// One block per non-terminal listing the production for each terminal.
pub fn write_parse_table(out: &mut impl Write, table: &ParseTable) -> fmt::Result {
    writeln!(out, "\n=== Parse Table ===")?;
    for nt in table.grammar().non_terminals() {
        writeln!(out, "\n{}:", nt)?;
        for (terminal, id) in table.row(nt) {
            let body = table
                .grammar()
                .production(id)
                .map(|p| if p.is_epsilon() { "epsilon".to_string() } else { p.body_text() })
                .unwrap_or_default();
            writeln!(out, "  {:<15} -> ({}) {}", terminal.as_str(), id, body)?;
        }
    }
    Ok(())
}

pub fn write_grammar(out: &mut impl Write, grammar: &Grammar) -> fmt::Result {
    writeln!(out, "\n=== Grammar ===")?;
    write!(out, "{}", grammar)
}

/// The applied productions, numbered in application order.
pub fn write_trace(out: &mut impl Write, grammar: &Grammar, trace: &[ProductionId]) -> fmt::Result {
    writeln!(out, "\n=== Production Sequence ===")?;
    for (i, id) in trace.iter().enumerate() {
        match grammar.production(*id) {
            Some(production) => writeln!(out, "{:3}. {}", i + 1, production)?,
            None => writeln!(out, "{:3}. ({})", i + 1, id)?,
        }
    }
    Ok(())
}

/// Declaration text for each declared name, plus `extra` names that may be
/// undeclared.
pub fn write_definitions(
    out: &mut impl Write,
    searcher: &TreeSearcher<'_>,
    extra: &[&str],
) -> fmt::Result {
    writeln!(out, "\n=== Identifier Definitions ===")?;
    let mut names = searcher.declared_names();
    for name in extra {
        if !names.contains(name) {
            names.push(*name);
        }
    }

    for name in names {
        match searcher.find_declarations(name).first() {
            Some(declaration) => writeln!(
                out,
                "  {:<10} -> {} ({})",
                name,
                searcher.definition_text(declaration),
                declaration.ty
            )?,
            None => writeln!(out, "  {:<10} -> Not found", name)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::NonTerminal;
    use crate::parser::lexer::Lexer;
    use crate::parser::predictive::PredictiveParser;

    #[test]
    fn test_tokens_three_per_row() {
        let tokens = Lexer::new("int x ;").tokenize().unwrap();
        let mut out = String::new();
        write_tokens(&mut out, &tokens).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "=== Tokens ===");
        assert!(lines[1].starts_with("[reservedword, int]"));
        assert!(lines[1].ends_with("[symbol, ;]"));
        assert_eq!(lines[2], "[$]");
        assert!(out.contains("Successfully tokenized 4 tokens."));
    }

    #[test]
    fn test_parse_table_block() {
        let table = ParseTable::build(Grammar::c_subset()).unwrap();
        let mut out = String::new();
        write_parse_table(&mut out, &table).unwrap();
        assert!(out.contains(
            "\nOutputTail:\n  ;               -> (45) epsilon\n  <<              -> (44) << OutputItem OutputTail\n"
        ));
    }

    #[test]
    fn test_trace_and_definitions() {
        let grammar = Grammar::c_subset()
            .clone()
            .with_start(NonTerminal::Statements)
            .unwrap();
        let table = ParseTable::build(&grammar).unwrap();
        let tokens = Lexer::new("float f = 2 ;").tokenize().unwrap();
        let derivation = PredictiveParser::new(&table).parse(&tokens).unwrap();

        let mut out = String::new();
        write_trace(&mut out, &grammar, &derivation.trace).unwrap();
        assert!(out.contains("  1. Statements → Declaration Statements\n"));
        assert!(out.contains("  2. Declaration → float Assignment\n"));

        let searcher = TreeSearcher::new(&derivation.tree);
        let mut out = String::new();
        write_definitions(&mut out, &searcher, &["f", "g"]).unwrap();
        assert!(out.contains("  f          -> float f = 2 ; (float)\n"));
        assert!(out.contains("  g          -> Not found\n"));
    }
}
