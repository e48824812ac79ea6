//! Terminal and non-terminal symbols of the C++ subset grammar
//!
//! Both alphabets are closed enums so that table construction and parsing
//! match on variants instead of comparing category strings.

use std::fmt;
use std::str::FromStr;

/// Every terminal the lexer can produce, plus the end-marker `$`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terminal {
    // Directives
    Include,
    Header,

    // Keywords
    Using,
    Namespace,
    Std,
    Int,
    Float,
    Main,
    While,
    Cin,
    Cout,
    Return,

    // Punctuation
    LBrace,    // {
    RBrace,    // }
    LParen,    // (
    RParen,    // )
    Semicolon, // ;
    Comma,     // ,

    // Operators
    Assign, // =
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // /
    EqEq,   // ==
    NotEq,  // !=
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
    GtGt,   // >>
    LtLt,   // <<

    // Token classes
    Identifier,
    Number,
    StringLiteral,

    // End of input
    EndMarker,
}

/// Lexical category of a terminal, used to group the token table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenCategory {
    StringLiteral,
    Number,
    Symbol,
    Identifier,
    ReservedWord,
    Directive,
    End,
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenCategory::StringLiteral => "string",
            TokenCategory::Number => "number",
            TokenCategory::Symbol => "symbol",
            TokenCategory::Identifier => "identifier",
            TokenCategory::ReservedWord => "reservedword",
            TokenCategory::Directive => "directive",
            TokenCategory::End => "end",
        };
        f.write_str(name)
    }
}

impl Terminal {
    pub const ALL: [Terminal; 35] = [
        Terminal::Include,
        Terminal::Header,
        Terminal::Using,
        Terminal::Namespace,
        Terminal::Std,
        Terminal::Int,
        Terminal::Float,
        Terminal::Main,
        Terminal::While,
        Terminal::Cin,
        Terminal::Cout,
        Terminal::Return,
        Terminal::LBrace,
        Terminal::RBrace,
        Terminal::LParen,
        Terminal::RParen,
        Terminal::Semicolon,
        Terminal::Comma,
        Terminal::Assign,
        Terminal::Plus,
        Terminal::Minus,
        Terminal::Star,
        Terminal::Slash,
        Terminal::EqEq,
        Terminal::NotEq,
        Terminal::Lt,
        Terminal::Le,
        Terminal::Gt,
        Terminal::Ge,
        Terminal::GtGt,
        Terminal::LtLt,
        Terminal::Identifier,
        Terminal::Number,
        Terminal::StringLiteral,
        Terminal::EndMarker,
    ];

    /// Name of the terminal as it appears in grammar and table listings.
    pub fn as_str(self) -> &'static str {
        match self {
            Terminal::Include => "#include",
            Terminal::Header => "header",
            Terminal::Using => "using",
            Terminal::Namespace => "namespace",
            Terminal::Std => "std",
            Terminal::Int => "int",
            Terminal::Float => "float",
            Terminal::Main => "main",
            Terminal::While => "while",
            Terminal::Cin => "cin",
            Terminal::Cout => "cout",
            Terminal::Return => "return",
            Terminal::LBrace => "{",
            Terminal::RBrace => "}",
            Terminal::LParen => "(",
            Terminal::RParen => ")",
            Terminal::Semicolon => ";",
            Terminal::Comma => ",",
            Terminal::Assign => "=",
            Terminal::Plus => "+",
            Terminal::Minus => "-",
            Terminal::Star => "*",
            Terminal::Slash => "/",
            Terminal::EqEq => "==",
            Terminal::NotEq => "!=",
            Terminal::Lt => "<",
            Terminal::Le => "<=",
            Terminal::Gt => ">",
            Terminal::Ge => ">=",
            Terminal::GtGt => ">>",
            Terminal::LtLt => "<<",
            Terminal::Identifier => "identifier",
            Terminal::Number => "number",
            Terminal::StringLiteral => "string",
            Terminal::EndMarker => "$",
        }
    }

    /// True for terminals whose lexeme varies (identifiers, literals,
    /// headers) as opposed to fixed keywords and symbols.
    pub fn is_class(self) -> bool {
        matches!(
            self,
            Terminal::Header
                | Terminal::Identifier
                | Terminal::Number
                | Terminal::StringLiteral
                | Terminal::EndMarker
        )
    }

    /// How the terminal is named in diagnostics: fixed-text terminals in
    /// backticks, classes by category name.
    pub fn describe(self) -> String {
        match self {
            Terminal::Header => "header-name".to_string(),
            Terminal::Identifier => "identifier".to_string(),
            Terminal::Number => "number".to_string(),
            Terminal::StringLiteral => "string-literal".to_string(),
            Terminal::EndMarker => "end of input".to_string(),
            other => format!("`{}`", other.as_str()),
        }
    }

    pub fn category(self) -> TokenCategory {
        match self {
            Terminal::Include | Terminal::Header => TokenCategory::Directive,
            Terminal::Using
            | Terminal::Namespace
            | Terminal::Std
            | Terminal::Int
            | Terminal::Float
            | Terminal::Main
            | Terminal::While
            | Terminal::Cin
            | Terminal::Cout
            | Terminal::Return => TokenCategory::ReservedWord,
            Terminal::Identifier => TokenCategory::Identifier,
            Terminal::Number => TokenCategory::Number,
            Terminal::StringLiteral => TokenCategory::StringLiteral,
            Terminal::EndMarker => TokenCategory::End,
            _ => TokenCategory::Symbol,
        }
    }

    /// Keyword terminal spelled by `word`, if any.
    pub fn keyword(word: &str) -> Option<Terminal> {
        let terminal = match word {
            "using" => Terminal::Using,
            "namespace" => Terminal::Namespace,
            "std" => Terminal::Std,
            "int" => Terminal::Int,
            "float" => Terminal::Float,
            "main" => Terminal::Main,
            "while" => Terminal::While,
            "cin" => Terminal::Cin,
            "cout" => Terminal::Cout,
            "return" => Terminal::Return,
            _ => return None,
        };
        Some(terminal)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar variables, named by the construct they derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NonTerminal {
    Start,
    Includes,
    Namespace,
    Main,
    Statements,
    Return,
    Declaration,
    Assignment,
    AssignTail,
    Operation,
    OperationTail,
    Operator,
    Operand,
    Initializer,
    Expression,
    Comparison,
    Loop,
    Input,
    InputTail,
    Output,
    OutputTail,
    OutputItem,
}

impl NonTerminal {
    pub const ALL: [NonTerminal; 22] = [
        NonTerminal::Start,
        NonTerminal::Includes,
        NonTerminal::Namespace,
        NonTerminal::Main,
        NonTerminal::Statements,
        NonTerminal::Return,
        NonTerminal::Declaration,
        NonTerminal::Assignment,
        NonTerminal::AssignTail,
        NonTerminal::Operation,
        NonTerminal::OperationTail,
        NonTerminal::Operator,
        NonTerminal::Operand,
        NonTerminal::Initializer,
        NonTerminal::Expression,
        NonTerminal::Comparison,
        NonTerminal::Loop,
        NonTerminal::Input,
        NonTerminal::InputTail,
        NonTerminal::Output,
        NonTerminal::OutputTail,
        NonTerminal::OutputItem,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NonTerminal::Start => "Start",
            NonTerminal::Includes => "Includes",
            NonTerminal::Namespace => "Namespace",
            NonTerminal::Main => "Main",
            NonTerminal::Statements => "Statements",
            NonTerminal::Return => "Return",
            NonTerminal::Declaration => "Declaration",
            NonTerminal::Assignment => "Assignment",
            NonTerminal::AssignTail => "AssignTail",
            NonTerminal::Operation => "Operation",
            NonTerminal::OperationTail => "OperationTail",
            NonTerminal::Operator => "Operator",
            NonTerminal::Operand => "Operand",
            NonTerminal::Initializer => "Initializer",
            NonTerminal::Expression => "Expression",
            NonTerminal::Comparison => "Comparison",
            NonTerminal::Loop => "Loop",
            NonTerminal::Input => "Input",
            NonTerminal::InputTail => "InputTail",
            NonTerminal::Output => "Output",
            NonTerminal::OutputTail => "OutputTail",
            NonTerminal::OutputItem => "OutputItem",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NonTerminal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NonTerminal::ALL
            .iter()
            .copied()
            .find(|nt| nt.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown non-terminal '{}'", s))
    }
}

/// A grammar symbol: one terminal or one non-terminal. Epsilon is not a
/// symbol; it is the empty production body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl Symbol {
    pub fn as_terminal(self) -> Option<Terminal> {
        match self {
            Symbol::Terminal(t) => Some(t),
            Symbol::NonTerminal(_) => None,
        }
    }

    pub fn as_non_terminal(self) -> Option<NonTerminal> {
        match self {
            Symbol::NonTerminal(nt) => Some(nt),
            Symbol::Terminal(_) => None,
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(nt: NonTerminal) -> Self {
        Symbol::NonTerminal(nt)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::NonTerminal(nt) => write!(f, "{}", nt),
        }
    }
}
