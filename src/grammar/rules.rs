// Production rules of the C++ teaching subset, in declaration order.
// Production numbers reported elsewhere are positions in this table (1-based).

use super::{NonTerminal as N, Symbol, Terminal as T};

const fn t(terminal: T) -> Symbol {
    Symbol::Terminal(terminal)
}

const fn n(non_terminal: N) -> Symbol {
    Symbol::NonTerminal(non_terminal)
}

pub(crate) const START: N = N::Start;

pub(crate) const RULES: &[(N, &[Symbol])] = &[
    // Program skeleton
    (N::Start, &[n(N::Includes), n(N::Namespace), n(N::Main)]),
    (N::Includes, &[t(T::Include), t(T::Header), n(N::Includes)]),
    (N::Includes, &[]),
    (N::Namespace, &[t(T::Using), t(T::Namespace), t(T::Std), t(T::Semicolon)]),
    (N::Namespace, &[]),
    (
        N::Main,
        &[
            t(T::Int),
            t(T::Main),
            t(T::LParen),
            t(T::RParen),
            t(T::LBrace),
            n(N::Statements),
            n(N::Return),
            t(T::RBrace),
        ],
    ),
    // Statements
    (N::Statements, &[n(N::Declaration), n(N::Statements)]),
    (N::Statements, &[n(N::Assignment), n(N::Statements)]),
    (N::Statements, &[n(N::Loop), n(N::Statements)]),
    (N::Statements, &[n(N::Input), n(N::Statements)]),
    (N::Statements, &[n(N::Output), n(N::Statements)]),
    (N::Statements, &[]),
    (N::Return, &[t(T::Return), t(T::Number), t(T::Semicolon)]),
    (N::Return, &[]),
    // Declarations and assignments
    (N::Declaration, &[t(T::Int), n(N::Assignment)]),
    (N::Declaration, &[t(T::Float), n(N::Assignment)]),
    (N::Assignment, &[t(T::Identifier), n(N::Initializer), n(N::AssignTail)]),
    (
        N::AssignTail,
        &[t(T::Comma), t(T::Identifier), n(N::Initializer), n(N::AssignTail)],
    ),
    (N::AssignTail, &[t(T::Semicolon)]),
    // Arithmetic
    (N::Operation, &[t(T::Number), n(N::OperationTail)]),
    (N::Operation, &[t(T::Identifier), n(N::OperationTail)]),
    (N::OperationTail, &[n(N::Operator), n(N::Operand), n(N::OperationTail)]),
    (N::OperationTail, &[]),
    (N::Operator, &[t(T::Plus)]),
    (N::Operator, &[t(T::Minus)]),
    (N::Operator, &[t(T::Star)]),
    (N::Operator, &[t(T::Slash)]),
    (N::Operand, &[t(T::Number)]),
    (N::Operand, &[t(T::Identifier)]),
    (N::Initializer, &[t(T::Assign), n(N::Operation)]),
    (N::Initializer, &[]),
    // Comparisons
    (N::Expression, &[n(N::Operation), n(N::Comparison), n(N::Operation)]),
    (N::Comparison, &[t(T::EqEq)]),
    (N::Comparison, &[t(T::Ge)]),
    (N::Comparison, &[t(T::Le)]),
    (N::Comparison, &[t(T::NotEq)]),
    (N::Comparison, &[t(T::Lt)]),
    (N::Comparison, &[t(T::Gt)]),
    // Loop
    (
        N::Loop,
        &[
            t(T::While),
            t(T::LParen),
            n(N::Expression),
            t(T::RParen),
            t(T::LBrace),
            n(N::Statements),
            t(T::RBrace),
        ],
    ),
    // Console I/O
    (
        N::Input,
        &[t(T::Cin), t(T::GtGt), t(T::Identifier), n(N::InputTail), t(T::Semicolon)],
    ),
    (N::InputTail, &[t(T::GtGt), t(T::Identifier), n(N::InputTail)]),
    (N::InputTail, &[]),
    (
        N::Output,
        &[t(T::Cout), t(T::LtLt), n(N::OutputItem), n(N::OutputTail), t(T::Semicolon)],
    ),
    (N::OutputTail, &[t(T::LtLt), n(N::OutputItem), n(N::OutputTail)]),
    (N::OutputTail, &[]),
    (N::OutputItem, &[t(T::Number)]),
    (N::OutputItem, &[t(T::StringLiteral)]),
    (N::OutputItem, &[t(T::Identifier)]),
];
