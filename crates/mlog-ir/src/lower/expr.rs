// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Reference expression lowering.

use super::{direct_operand, ExprLowering, LoweringError};
use crate::{Instr, InstrBuilder, Operand, Options};
use mlog_ast::{BinOp, Expr, UnaryOp};

/// Expression lowerer for plain arithmetic, comparison and logic.
///
/// Literals and identifiers become `set`, operators become `op` with compound
/// operands spilled to temporaries. Calls and member access belong to the
/// calling convention and are rejected here.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicExprLowerer;

impl ExprLowering for BasicExprLowerer {
    fn lower_expr(
        &self,
        builder: &mut InstrBuilder,
        dests: &[Operand],
        expr: &Expr,
        _options: &Options,
    ) -> Result<Vec<Instr>, LoweringError> {
        match dests {
            [] => {
                let tmp = builder.alloc_temp();
                lower_into(builder, tmp, expr)
            }
            [dest] => lower_into(builder, dest.clone(), expr),
            _ => Err(LoweringError::unsupported(format!(
                "{} destinations for a {}",
                dests.len(),
                expr.kind_name()
            ))),
        }
    }
}

fn lower_into(
    builder: &mut InstrBuilder,
    dest: Operand,
    expr: &Expr,
) -> Result<Vec<Instr>, LoweringError> {
    match expr {
        Expr::Lit(_) | Expr::Ident(_) => {
            let src = direct_operand(expr)
                .ok_or_else(|| LoweringError::unsupported(expr.kind_name()))?;
            Ok(vec![builder.set(dest, src, "Set variable")])
        }

        Expr::Paren(inner) => lower_into(builder, dest, inner),

        Expr::Binary { op, left, right } => {
            let mut out = Vec::new();
            let left = operand(builder, left, &mut out)?;
            let right = operand(builder, right, &mut out)?;
            out.push(builder.op(binop_name(*op), dest, left, right, "Execute operation"));
            Ok(out)
        }

        Expr::Unary { op, operand: inner } => {
            let mut out = Vec::new();
            let value = operand(builder, inner, &mut out)?;
            let zero = Operand::literal("0");
            out.push(match op {
                UnaryOp::Neg => builder.op("sub", dest, zero, value, "Negate value"),
                UnaryOp::Not => builder.op("equal", dest, value, zero, "Logical not"),
                UnaryOp::BitNot => builder.op("not", dest, value, zero, "Bitwise not"),
            });
            Ok(out)
        }

        Expr::Call { .. } | Expr::Selector { .. } | Expr::Index { .. } => {
            Err(LoweringError::unsupported(format!(
                "expression type not supported: {}",
                expr.kind_name()
            )))
        }
    }
}

/// Operand holding the value of `expr`, spilling to a temporary when the
/// expression is compound.
fn operand(
    builder: &mut InstrBuilder,
    expr: &Expr,
    out: &mut Vec<Instr>,
) -> Result<Operand, LoweringError> {
    if let Some(op) = direct_operand(expr) {
        return Ok(op);
    }
    if let Expr::Paren(inner) = expr {
        return operand(builder, inner, out);
    }
    let tmp = builder.alloc_temp();
    out.extend(lower_into(builder, tmp.clone(), expr)?);
    Ok(tmp)
}

/// `op` instruction name for a binary operator.
fn binop_name(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "add",
        BinOp::Sub => "sub",
        BinOp::Mul => "mul",
        BinOp::Div => "div",
        BinOp::Mod => "mod",
        BinOp::Eq => "equal",
        BinOp::Ne => "notEqual",
        BinOp::Lt => "lessThan",
        BinOp::Le => "lessThanEq",
        BinOp::Gt => "greaterThan",
        BinOp::Ge => "greaterThanEq",
        BinOp::And => "land",
        BinOp::Or | BinOp::BitOr => "or",
        BinOp::BitAnd => "and",
        BinOp::BitXor => "xor",
        BinOp::Shl => "shl",
        BinOp::Shr => "shr",
    }
}
