// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Assignment lowering.

use super::{ExprLowering, Lowerer, LoweringError};
use crate::{Instr, Operand};
use mlog_ast::{AssignOp, Expr};

impl<'a, E: ExprLowering> Lowerer<'a, E> {
    /// `a, b = x, y` lowers pair by pair; `a, b = f()` hands every
    /// destination to a single expression lowering.
    pub(super) fn lower_assign(
        &mut self,
        targets: &[Expr],
        op: AssignOp,
        values: &[Expr],
    ) -> Result<Vec<Instr>, LoweringError> {
        if targets.len() == values.len() {
            let mut out = Vec::new();
            for (target, value) in targets.iter().zip(values) {
                let dest = assign_target(target)?;
                check_direct(op)?;
                out.extend(self.lower_expr(&[dest], value)?);
            }
            return Ok(out);
        }

        match values {
            [value] if targets.len() > 1 => {
                check_direct(op)?;
                let dests = targets
                    .iter()
                    .map(assign_target)
                    .collect::<Result<Vec<_>, _>>()?;
                self.lower_expr(&dests, value)
            }
            _ => Err(LoweringError::MalformedAssignment {
                targets: targets.len(),
                values: values.len(),
            }),
        }
    }
}

fn assign_target(target: &Expr) -> Result<Operand, LoweringError> {
    match target {
        Expr::Ident(name) => Ok(Operand::variable(name.as_str())),
        other => Err(LoweringError::unsupported(format!(
            "left side of assignment can only contain identifiers, found {}",
            other.kind_name()
        ))),
    }
}

fn check_direct(op: AssignOp) -> Result<(), LoweringError> {
    if op.is_direct() {
        Ok(())
    } else {
        Err(LoweringError::unsupported(format!(
            "only direct assignment is supported, found `{}`",
            op.symbol()
        )))
    }
}
