// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Lowering - transform AST statements into a flat instruction list.

mod assign;
mod expr;
mod stmt;

pub use expr::BasicExprLowerer;

use crate::{Instr, InstrBuilder, Operand, Options};
use mlog_ast::{BinOp, Expr, Stmt};
use thiserror::Error;

/// Expression lowering collaborator.
///
/// Given zero or more destinations, produce instructions after which
/// `dests[0]` (if any) holds the value of `expr`. Identities and
/// temporaries must come from `builder` so they stay unique within the
/// enclosing lowering.
pub trait ExprLowering {
    fn lower_expr(
        &self,
        builder: &mut InstrBuilder,
        dests: &[Operand],
        expr: &Expr,
        options: &Options,
    ) -> Result<Vec<Instr>, LoweringError>;
}

impl<T: ExprLowering + ?Sized> ExprLowering for &T {
    fn lower_expr(
        &self,
        builder: &mut InstrBuilder,
        dests: &[Operand],
        expr: &Expr,
        options: &Options,
    ) -> Result<Vec<Instr>, LoweringError> {
        (**self).lower_expr(builder, dests, expr, options)
    }
}

/// Lower one statement with a fresh builder.
pub fn lower<E: ExprLowering>(
    stmt: &Stmt,
    exprs: &E,
    options: &Options,
) -> Result<Vec<Instr>, LoweringError> {
    Lowerer::new(exprs, options).lower_stmt(stmt)
}

/// Statement lowerer. Statements lowered through the same `Lowerer` share
/// one identity space and can be concatenated and rendered together.
pub struct Lowerer<'a, E: ExprLowering> {
    builder: InstrBuilder,
    exprs: &'a E,
    options: &'a Options,
}

impl<'a, E: ExprLowering> Lowerer<'a, E> {
    pub fn new(exprs: &'a E, options: &'a Options) -> Self {
        Self {
            builder: InstrBuilder::new(),
            exprs,
            options,
        }
    }

    fn lower_expr(&mut self, dests: &[Operand], expr: &Expr) -> Result<Vec<Instr>, LoweringError> {
        self.exprs.lower_expr(&mut self.builder, dests, expr, self.options)
    }
}

/// Operand for `expr` if it is already a bare identifier or literal.
fn direct_operand(expr: &Expr) -> Option<Operand> {
    match expr {
        Expr::Ident(name) => Some(Operand::variable(name.as_str())),
        Expr::Lit(text) => Some(Operand::literal(text.as_str())),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoweringError {
    /// Statement or expression shape outside the supported set.
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),
    /// Comparison operator with no jump-condition equivalent.
    #[error("jump condition cannot use operator `{0}`")]
    UnsupportedOperator(BinOp),
    /// Destination/value counts that fit neither N-to-N nor N-to-1.
    #[error("mismatched assignment: {targets} destinations, {values} values")]
    MalformedAssignment { targets: usize, values: usize },
    /// Loop condition operand that is neither a literal nor an identifier.
    #[error("invalid loop condition operand: {0}")]
    InvalidOperand(String),
}

impl LoweringError {
    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        LoweringError::UnsupportedConstruct(what.into())
    }
}
