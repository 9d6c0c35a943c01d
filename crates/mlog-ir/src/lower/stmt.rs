// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Statement lowering.

use super::{direct_operand, ExprLowering, Lowerer, LoweringError};
use crate::{Instr, JumpCond, JumpOp, JumpTarget, Operand, RETURN_SLOT};
use mlog_ast::{Expr, IncDecOp, Stmt};

impl<'a, E: ExprLowering> Lowerer<'a, E> {
    /// Lower one statement. Every jump in the returned list has its final
    /// target; nothing is patched after this returns.
    pub fn lower_stmt(&mut self, stmt: &Stmt) -> Result<Vec<Instr>, LoweringError> {
        match stmt {
            Stmt::Block(stmts) => self.lower_block(stmts),

            Stmt::Expr(e) => self.lower_expr(&[], e),

            Stmt::Assign { targets, op, values } => self.lower_assign(targets, *op, values),

            Stmt::IncDec { target, op } => self.lower_inc_dec(target, *op),

            Stmt::Return(values) => self.lower_return(values),

            Stmt::If {
                init,
                cond,
                then_branch,
                else_branch,
            } => self.lower_if(init.as_deref(), cond, then_branch, else_branch.as_deref()),

            Stmt::For {
                init,
                cond,
                post,
                body,
            } => self.lower_for(init.as_deref(), cond.as_ref(), post.as_deref(), body),

            Stmt::Range { .. }
            | Stmt::Switch { .. }
            | Stmt::Branch { .. }
            | Stmt::Labeled { .. }
            | Stmt::Defer(_)
            | Stmt::Go(_) => Err(LoweringError::unsupported(format!(
                "statement type not supported: {}",
                stmt.kind_name()
            ))),
        }
    }

    fn lower_block(&mut self, stmts: &[Stmt]) -> Result<Vec<Instr>, LoweringError> {
        let mut out = Vec::new();
        for stmt in stmts {
            out.extend(self.lower_stmt(stmt)?);
        }
        Ok(out)
    }

    fn lower_optional(&mut self, stmt: Option<&Stmt>) -> Result<Vec<Instr>, LoweringError> {
        match stmt {
            Some(s) => self.lower_stmt(s),
            None => Ok(Vec::new()),
        }
    }

    fn lower_inc_dec(&mut self, target: &Expr, op: IncDecOp) -> Result<Vec<Instr>, LoweringError> {
        let var = match target {
            Expr::Ident(name) => Operand::variable(name.as_str()),
            other => {
                return Err(LoweringError::unsupported(format!(
                    "increment/decrement of a {}",
                    other.kind_name()
                )))
            }
        };
        let (name, comment) = match op {
            IncDecOp::Inc => ("add", "Increment variable"),
            IncDecOp::Dec => ("sub", "Decrement variable"),
        };
        Ok(vec![self.builder.op(name, var.clone(), var, Operand::literal("1"), comment)])
    }

    fn lower_return(&mut self, values: &[Expr]) -> Result<Vec<Instr>, LoweringError> {
        // TODO: multi-value returns need one slot per value in the calling convention
        if values.len() > 1 {
            return Err(LoweringError::unsupported("only single value returns are supported"));
        }

        let mut out = Vec::new();
        if let Some(value) = values.first() {
            let result = match direct_operand(value) {
                Some(op) => op,
                None => {
                    let tmp = self.builder.alloc_temp();
                    out.extend(self.lower_expr(&[tmp.clone()], value)?);
                    tmp
                }
            };
            out.push(self.builder.set(Operand::variable(RETURN_SLOT), result, "Set return value"));
        }
        out.push(self.builder.trampoline_back());
        Ok(out)
    }

    // =================================================================
    // Control flow
    // =================================================================

    /// If/else.
    ///
    /// ```text
    ///     <init> <cond>
    ///     jump THEN equal cond 1
    ///     jump END|ELSE always
    /// THEN: ...
    ///     jump END always        (only with else)
    /// ELSE: ...
    /// END:
    /// ```
    fn lower_if(
        &mut self,
        init: Option<&Stmt>,
        cond: &Expr,
        then_branch: &[Stmt],
        else_branch: Option<&Stmt>,
    ) -> Result<Vec<Instr>, LoweringError> {
        let mut out = self.lower_optional(init)?;

        let cond_op = match cond {
            Expr::Ident(name) => Operand::variable(name.as_str()),
            _ => {
                let tmp = self.builder.alloc_temp();
                out.extend(self.lower_expr(&[tmp.clone()], cond)?);
                tmp
            }
        };

        let then_instrs = self.lower_block(then_branch)?;
        if then_instrs.is_empty() && else_branch.is_none() {
            log::debug!("if without body or else: keeping only the condition");
            return Ok(out);
        }
        let then_first = then_instrs.first().map(|i| i.id);
        let then_last = then_instrs.last().map(|i| i.id);

        let true_idx = out.len();
        out.push(self.builder.pending_jump(
            JumpCond::Compare {
                op: JumpOp::Equal,
                left: cond_op,
                right: Operand::literal("1"),
            },
            "Jump into if block when true",
        ));
        if let Some(first) = then_first {
            out[true_idx].retarget(JumpTarget::at(first));
        }

        let skip_idx = out.len();
        out.push(self.builder.pending_jump(JumpCond::Always, "Jump past if block"));
        if let Some(last) = then_last {
            out[skip_idx].retarget(JumpTarget::after(last));
        }

        out.extend(then_instrs);

        if let Some(else_stmt) = else_branch {
            let else_instrs = self.lower_stmt(else_stmt)?;

            // An empty else leaves this jump pointing just past itself.
            let mut past_else = self.builder.pending_jump(JumpCond::Always, "Jump past else block");
            if let Some(last) = else_instrs.last() {
                past_else.retarget(JumpTarget::after(last.id));
            }

            // False condition lands on the first else instruction.
            out[skip_idx].retarget(JumpTarget::after(past_else.id));
            if then_first.is_none() {
                out[true_idx].retarget(JumpTarget::at(past_else.id));
            }

            out.push(past_else);
            out.extend(else_instrs);
        }

        Ok(out)
    }

    /// C-style for loop, checked after the body:
    ///
    /// ```text
    ///     <init>
    /// BODY: ...
    ///     <post>
    ///     jump BODY <cond>
    /// ```
    ///
    /// The body always runs once before the condition is first tested. A loop
    /// with an empty body produces no code, init and post included.
    fn lower_for(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        post: Option<&Stmt>,
        body: &[Stmt],
    ) -> Result<Vec<Instr>, LoweringError> {
        if body.is_empty() {
            log::debug!("for loop with empty body omitted");
            return Ok(Vec::new());
        }

        let mut out = self.lower_optional(init)?;
        let cond = loop_condition(cond)?;
        let body_instrs = self.lower_block(body)?;
        let post_instrs = self.lower_optional(post)?;

        let loop_start = body_instrs
            .first()
            .or_else(|| post_instrs.first())
            .map(|i| JumpTarget::at(i.id));

        let back = match loop_start {
            Some(target) => self.builder.jump(cond, target, "Jump to start of loop"),
            None => {
                // Nothing to run between checks: the jump spins on itself.
                let mut jump = self.builder.pending_jump(cond, "Jump to start of loop");
                jump.retarget(JumpTarget::at(jump.id));
                jump
            }
        };

        out.extend(body_instrs);
        out.extend(post_instrs);
        out.push(back);
        Ok(out)
    }
}

/// Translate a loop condition into a jump condition. Only a single
/// comparison between literals and identifiers is accepted.
fn loop_condition(cond: Option<&Expr>) -> Result<JumpCond, LoweringError> {
    let (op, left, right) = match cond {
        Some(Expr::Binary { op, left, right }) => (*op, left, right),
        Some(other) => {
            return Err(LoweringError::unsupported(format!(
                "for loop can only have binary conditional expressions, found {}",
                other.kind_name()
            )))
        }
        None => return Err(LoweringError::unsupported("for loop without condition")),
    };

    let op = JumpOp::from_bin_op(op).ok_or(LoweringError::UnsupportedOperator(op))?;
    Ok(JumpCond::Compare {
        op,
        left: condition_operand(left)?,
        right: condition_operand(right)?,
    })
}

fn condition_operand(expr: &Expr) -> Result<Operand, LoweringError> {
    direct_operand(expr).ok_or_else(|| LoweringError::InvalidOperand(expr.kind_name().to_string()))
}

#[cfg(test)]
mod tests {
    use crate::{lower, render, BasicExprLowerer, LoweringError, Options};
    use mlog_ast::{AssignOp, BinOp, BranchKind, Expr, IncDecOp, Stmt};

    fn ident(name: &str) -> Expr {
        Expr::ident(name)
    }

    fn lit(text: &str) -> Expr {
        Expr::lit(text)
    }

    fn set(name: &str, value: Expr) -> Stmt {
        Stmt::assign(ident(name), AssignOp::Assign, value)
    }

    fn define(name: &str, value: Expr) -> Stmt {
        Stmt::assign(ident(name), AssignOp::Define, value)
    }

    fn inc(name: &str) -> Stmt {
        Stmt::IncDec {
            target: ident(name),
            op: IncDecOp::Inc,
        }
    }

    fn if_stmt(cond: Expr, then_branch: Vec<Stmt>, else_branch: Option<Stmt>) -> Stmt {
        Stmt::If {
            init: None,
            cond,
            then_branch,
            else_branch: else_branch.map(Box::new),
        }
    }

    fn for_stmt(
        init: Option<Stmt>,
        cond: Option<Expr>,
        post: Option<Stmt>,
        body: Vec<Stmt>,
    ) -> Stmt {
        Stmt::For {
            init: init.map(Box::new),
            cond,
            post: post.map(Box::new),
            body,
        }
    }

    fn lower_text(stmt: &Stmt) -> String {
        let options = Options::default();
        let instrs = lower(stmt, &BasicExprLowerer, &options).unwrap();
        render(&instrs, &options, 0).unwrap()
    }

    fn lower_err(stmt: &Stmt) -> LoweringError {
        lower(stmt, &BasicExprLowerer, &Options::default()).unwrap_err()
    }

    // ── Straight-line statements ────────────────────────────────

    #[test]
    fn define_literal_is_single_set() {
        let instrs = lower(&define("x", lit("5")), &BasicExprLowerer, &Options::default()).unwrap();
        assert_eq!(instrs.len(), 1);
        assert_eq!(render(&instrs, &Options::default(), 0).unwrap(), "set x 5\n");
    }

    #[test]
    fn block_is_concatenation_of_children() {
        let a = set("a", lit("1"));
        let b = set("b", Expr::binary(BinOp::Add, ident("a"), lit("2")));
        let c = inc("b");
        let block = Stmt::Block(vec![a.clone(), b.clone(), c.clone()]);

        let joined = [lower_text(&a), lower_text(&b), lower_text(&c)].concat();
        assert_eq!(lower_text(&block), joined);
    }

    #[test]
    fn empty_block_lowers_to_nothing() {
        assert_eq!(lower_text(&Stmt::Block(vec![])), "");
    }

    #[test]
    fn increment_and_decrement() {
        assert_eq!(lower_text(&inc("i")), "op add i i 1\n");
        let dec = Stmt::IncDec {
            target: ident("i"),
            op: IncDecOp::Dec,
        };
        assert_eq!(lower_text(&dec), "op sub i i 1\n");
    }

    #[test]
    fn increment_of_non_identifier_is_rejected() {
        let stmt = Stmt::IncDec {
            target: Expr::Selector {
                object: Box::new(ident("p")),
                field: "x".into(),
            },
            op: IncDecOp::Inc,
        };
        assert!(matches!(lower_err(&stmt), LoweringError::UnsupportedConstruct(_)));
    }

    // ── Return ──────────────────────────────────────────────────

    #[test]
    fn return_identifier_sets_slot_directly() {
        let text = lower_text(&Stmt::Return(vec![ident("x")]));
        assert_eq!(text, "set _RETURN x\nset @counter @funcTramp\n");
    }

    #[test]
    fn return_compound_goes_through_temp() {
        let text = lower_text(&Stmt::Return(vec![Expr::binary(BinOp::Add, ident("a"), lit("1"))]));
        assert_eq!(text, "op add _tmp0 a 1\nset _RETURN _tmp0\nset @counter @funcTramp\n");
    }

    #[test]
    fn bare_return_only_trampolines() {
        assert_eq!(lower_text(&Stmt::Return(vec![])), "set @counter @funcTramp\n");
    }

    #[test]
    fn multi_value_return_is_rejected() {
        let err = lower_err(&Stmt::Return(vec![lit("1"), lit("2")]));
        assert_eq!(
            err,
            LoweringError::UnsupportedConstruct("only single value returns are supported".into())
        );
    }

    // ── If / else ───────────────────────────────────────────────

    #[test]
    fn if_identifier_without_else() {
        let stmt = if_stmt(ident("x"), vec![define("y", lit("1"))], None);
        assert_eq!(
            lower_text(&stmt),
            "jump 2 equal x 1\n\
             jump 3 always\n\
             set y 1\n"
        );
    }

    #[test]
    fn if_compound_condition_uses_temp() {
        let cond = Expr::binary(BinOp::Lt, ident("a"), ident("b"));
        let stmt = if_stmt(cond, vec![set("y", lit("1"))], None);
        assert_eq!(
            lower_text(&stmt),
            "op lessThan _tmp0 a b\n\
             jump 3 equal _tmp0 1\n\
             jump 4 always\n\
             set y 1\n"
        );
    }

    #[test]
    fn if_with_init_runs_init_first() {
        let stmt = Stmt::If {
            init: Some(Box::new(define("y", lit("3")))),
            cond: ident("y"),
            then_branch: vec![set("z", lit("1"))],
            else_branch: None,
        };
        assert_eq!(
            lower_text(&stmt),
            "set y 3\n\
             jump 3 equal y 1\n\
             jump 4 always\n\
             set z 1\n"
        );
    }

    #[test]
    fn if_else_skip_lands_on_else() {
        let stmt = if_stmt(
            ident("x"),
            vec![set("y", lit("1"))],
            Some(Stmt::Block(vec![set("y", lit("2"))])),
        );
        assert_eq!(
            lower_text(&stmt),
            "jump 2 equal x 1\n\
             jump 4 always\n\
             set y 1\n\
             jump 5 always\n\
             set y 2\n"
        );
    }

    #[test]
    fn else_if_chain() {
        let inner = if_stmt(ident("b"), vec![set("x", lit("2"))], None);
        let stmt = if_stmt(ident("a"), vec![set("x", lit("1"))], Some(inner));
        assert_eq!(
            lower_text(&stmt),
            "jump 2 equal a 1\n\
             jump 4 always\n\
             set x 1\n\
             jump 7 always\n\
             jump 6 equal b 1\n\
             jump 7 always\n\
             set x 2\n"
        );
    }

    #[test]
    fn empty_if_keeps_condition_only() {
        let cond = Expr::binary(BinOp::Lt, ident("c"), ident("d"));
        assert_eq!(lower_text(&if_stmt(cond, vec![], None)), "op lessThan _tmp0 c d\n");
        assert_eq!(lower_text(&if_stmt(ident("c"), vec![], None)), "");
    }

    #[test]
    fn empty_then_with_else() {
        let stmt = if_stmt(ident("x"), vec![], Some(Stmt::Block(vec![set("y", lit("2"))])));
        assert_eq!(
            lower_text(&stmt),
            "jump 2 equal x 1\n\
             jump 3 always\n\
             jump 4 always\n\
             set y 2\n"
        );
    }

    #[test]
    fn empty_else_jumps_to_next_row() {
        let stmt = if_stmt(ident("x"), vec![set("y", lit("1"))], Some(Stmt::Block(vec![])));
        assert_eq!(
            lower_text(&stmt),
            "jump 2 equal x 1\n\
             jump 4 always\n\
             set y 1\n\
             jump 4 always\n"
        );
    }

    // ── For ─────────────────────────────────────────────────────

    #[test]
    fn for_loop_checks_after_body() {
        let stmt = for_stmt(
            Some(define("i", lit("0"))),
            Some(Expr::binary(BinOp::Lt, ident("i"), ident("n"))),
            Some(inc("i")),
            vec![set("s", Expr::binary(BinOp::Add, ident("s"), ident("i")))],
        );
        assert_eq!(
            lower_text(&stmt),
            "set i 0\n\
             op add s s i\n\
             op add i i 1\n\
             jump 1 lessThan i n\n"
        );
    }

    #[test]
    fn for_loop_with_empty_body_emits_nothing() {
        let stmt = for_stmt(
            Some(define("i", lit("0"))),
            Some(Expr::binary(BinOp::Lt, ident("i"), lit("10"))),
            Some(inc("i")),
            vec![],
        );
        assert_eq!(lower_text(&stmt), "");
    }

    #[test]
    fn for_loop_body_without_code_targets_post() {
        let empty_cond = Expr::binary(BinOp::Lt, ident("j"), lit("1"));
        let empty_loop = for_stmt(None, Some(empty_cond), None, vec![]);
        let stmt = for_stmt(
            None,
            Some(Expr::binary(BinOp::Ne, ident("i"), lit("3"))),
            Some(inc("i")),
            vec![empty_loop],
        );
        assert_eq!(lower_text(&stmt), "op add i i 1\njump 0 notEqual i 3\n");
    }

    #[test]
    fn for_loop_rejects_non_comparison_operator() {
        let stmt = for_stmt(
            None,
            Some(Expr::binary(BinOp::Add, ident("i"), lit("1"))),
            None,
            vec![inc("i")],
        );
        assert_eq!(lower_err(&stmt), LoweringError::UnsupportedOperator(BinOp::Add));
    }

    #[test]
    fn for_loop_rejects_compound_operand() {
        let stmt = for_stmt(
            None,
            Some(Expr::binary(
                BinOp::Lt,
                ident("i"),
                Expr::binary(BinOp::Mul, ident("n"), lit("2")),
            )),
            None,
            vec![inc("i")],
        );
        assert!(matches!(lower_err(&stmt), LoweringError::InvalidOperand(_)));
    }

    #[test]
    fn for_loop_requires_binary_condition() {
        let missing = for_stmt(None, None, None, vec![inc("i")]);
        assert!(matches!(lower_err(&missing), LoweringError::UnsupportedConstruct(_)));

        let bare = for_stmt(None, Some(ident("running")), None, vec![inc("i")]);
        assert!(matches!(lower_err(&bare), LoweringError::UnsupportedConstruct(_)));
    }

    // ── Failures ────────────────────────────────────────────────

    #[test]
    fn unsupported_statement_names_its_shape() {
        let stmt = Stmt::Switch {
            tag: Some(ident("x")),
            body: vec![],
        };
        let err = lower_err(&stmt);
        assert_eq!(
            err,
            LoweringError::UnsupportedConstruct(
                "statement type not supported: switch statement".into()
            )
        );
    }

    #[test]
    fn nested_error_aborts_whole_lowering() {
        let stmt = Stmt::Block(vec![
            set("a", lit("1")),
            if_stmt(
                ident("a"),
                vec![Stmt::Branch {
                    kind: BranchKind::Break,
                    label: None,
                }],
                None,
            ),
        ]);
        let err = lower_err(&stmt);
        assert_eq!(err.to_string(), "unsupported construct: statement type not supported: break");
    }

    #[test]
    fn temporaries_restart_per_invocation() {
        let stmt = Stmt::Return(vec![Expr::binary(BinOp::Mul, ident("a"), ident("b"))]);
        assert_eq!(lower_text(&stmt), lower_text(&stmt));
        assert!(lower_text(&stmt).starts_with("op mul _tmp0 a b\n"));
    }
}
