// cppiler: LL(1) front end for a C++ teaching subset with a parse step viewer

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use cppiler::config::{self, Config};
use cppiler::grammar::{Grammar, NonTerminal};
use cppiler::parser::{DiagnosticPrinter, Lexer, PredictiveParser, Token, TreeSearcher};
use cppiler::report;
use cppiler::snapshot::{Outcome, Recording};
use cppiler::tables::{ParseTable, TokenTable};
use cppiler::ui::App;

/// Parse a C++ subset program with a table-driven LL(1) parser and step
/// through the derivation.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Args {
    /// Source file to parse; the built-in sum program when omitted
    file: Option<PathBuf>,

    /// Print the text report instead of opening the step viewer
    #[arg(short, long)]
    report: bool,

    /// Non-terminal to start parsing from, e.g. `Statements`
    #[arg(short, long, default_value = "Start")]
    entry: NonTerminal,

    /// Memory budget of the step history in megabytes
    #[arg(long, default_value_t = config::DEFAULT_SNAPSHOT_LIMIT_MB)]
    snapshot_limit_mb: usize,

    /// Delay between moves in play mode, in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_PLAY_INTERVAL_MS)]
    play_ms: u64,

    /// Log debug details to stderr (report mode only)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = Config::default()
        .with_snapshot_limit_mb(args.snapshot_limit_mb)
        .with_play_interval_ms(args.play_ms)
        .with_entry(args.entry)
        .with_report(args.report);

    // Only the report logs; the viewer owns the terminal.
    if config.report {
        let default_level = if args.verbose { "debug" } else { "warn" };
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let (name, source) = match &args.file {
        Some(path) => (
            path.display().to_string(),
            fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?,
        ),
        None => ("<sum program>".to_string(), config::SAMPLE_PROGRAM.to_string()),
    };
    let printer = DiagnosticPrinter::new(&source);

    let tokens = match Lexer::new(&source).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            eprint!("{}", printer.render_lex(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let grammar = Grammar::c_subset()
        .clone()
        .with_start(config.entry)
        .context("invalid entry non-terminal")?;
    let table = ParseTable::build(&grammar).context("failed to build the parse table")?;

    if config.report {
        run_report(&source, &tokens, &table, &printer)
    } else {
        run_viewer(&name, source.clone(), tokens, &table, &config, &printer)
    }
}

fn run_report(
    source: &str,
    tokens: &[Token],
    table: &ParseTable,
    printer: &DiagnosticPrinter<'_>,
) -> Result<ExitCode> {
    let mut out = String::new();
    write_source(&mut out, source)?;
    report::write_tokens(&mut out, tokens)?;
    report::write_token_table(&mut out, &TokenTable::from_tokens(tokens))?;
    report::write_sets(&mut out, table)?;
    report::write_parse_table(&mut out, table)?;
    report::write_grammar(&mut out, table.grammar())?;
    print!("{}", out);

    match PredictiveParser::new(table).parse(tokens) {
        Ok(derivation) => {
            let mut out = String::new();
            report::write_trace(&mut out, table.grammar(), &derivation.trace)?;
            let searcher = TreeSearcher::new(&derivation.tree);
            report::write_definitions(&mut out, &searcher, &[])?;
            print!("{}", out);
            println!("\nSuccess! All phases completed with no syntax errors.");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprint!("\n{}", printer.render_syntax(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn write_source(out: &mut String, source: &str) -> std::fmt::Result {
    use std::fmt::Write;
    writeln!(out, "=== Input Code ===")?;
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "{}", source.trim_end())?;
    writeln!(out, "{}\n", "-".repeat(40))
}

fn run_viewer(
    name: &str,
    source: String,
    tokens: Vec<Token>,
    table: &ParseTable,
    config: &Config,
    printer: &DiagnosticPrinter<'_>,
) -> Result<ExitCode> {
    eprintln!("Parsing {}...", name);
    let recording = Recording::record(
        PredictiveParser::new(table).start(&tokens),
        config.snapshot_limit,
    );
    match &recording.outcome {
        Outcome::Accepted => eprintln!("Parsed successfully."),
        Outcome::Rejected(_) => eprintln!("Syntax error. Entering viewer with partial history..."),
        Outcome::Truncated => eprintln!("Step history limit reached. Entering viewer with partial history..."),
    }
    eprintln!("Total steps: {}", recording.snapshots.len());

    let error = recording.error().cloned();
    let trace_lines: Vec<String> = recording
        .trace
        .iter()
        .map(|id| match table.grammar().production(*id) {
            Some(p) => format!("({}) {}", p.id, p),
            None => format!("({})", id),
        })
        .collect();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(recording, tokens, trace_lines, source, config.play_interval);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res?;

    match error {
        Some(e) => {
            eprint!("{}", printer.render_syntax(&e));
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
