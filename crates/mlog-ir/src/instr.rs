// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Instructions, jump conditions and symbolic jump targets.

use crate::Operand;
use mlog_ast::BinOp;

/// Stable identity of an instruction within one lowering invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstrId(pub u32);

/// A lowered instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Instr {
    pub id: InstrId,
    pub kind: InstrKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstrKind {
    /// Straight-line code. One instruction may cover several physical rows.
    Plain {
        rows: Vec<Vec<Operand>>,
        comment: String,
    },
    Jump {
        cond: JumpCond,
        target: JumpTarget,
        comment: String,
    },
    /// Hand control back to the dynamic caller.
    TrampolineBack,
}

impl Instr {
    /// Number of physical rows this instruction renders to.
    pub fn row_count(&self) -> usize {
        match &self.kind {
            InstrKind::Plain { rows, .. } => rows.len(),
            InstrKind::Jump { .. } | InstrKind::TrampolineBack => 1,
        }
    }

    pub fn comment(&self) -> &str {
        match &self.kind {
            InstrKind::Plain { comment, .. } | InstrKind::Jump { comment, .. } => comment,
            InstrKind::TrampolineBack => "Trampoline back to caller",
        }
    }

    pub fn jump_target(&self) -> Option<JumpTarget> {
        match &self.kind {
            InstrKind::Jump { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Point an already emitted jump somewhere else. No-op for other kinds.
    pub(crate) fn retarget(&mut self, new_target: JumpTarget) {
        if let InstrKind::Jump { target, .. } = &mut self.kind {
            *target = new_target;
        }
    }
}

/// Condition guarding a jump.
#[derive(Debug, Clone, PartialEq)]
pub enum JumpCond {
    Always,
    Compare {
        op: JumpOp,
        left: Operand,
        right: Operand,
    },
}

/// Comparison conditions understood by the target machine's `jump`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanEq,
    GreaterThan,
    GreaterThanEq,
}

impl JumpOp {
    /// Fixed operator table; `None` means the operator cannot guard a jump.
    pub fn from_bin_op(op: BinOp) -> Option<JumpOp> {
        match op {
            BinOp::Eq => Some(JumpOp::Equal),
            BinOp::Ne => Some(JumpOp::NotEqual),
            BinOp::Lt => Some(JumpOp::LessThan),
            BinOp::Le => Some(JumpOp::LessThanEq),
            BinOp::Gt => Some(JumpOp::GreaterThan),
            BinOp::Ge => Some(JumpOp::GreaterThanEq),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            JumpOp::Equal => "equal",
            JumpOp::NotEqual => "notEqual",
            JumpOp::LessThan => "lessThan",
            JumpOp::LessThanEq => "lessThanEq",
            JumpOp::GreaterThan => "greaterThan",
            JumpOp::GreaterThanEq => "greaterThanEq",
        }
    }
}

/// Symbolic jump target: an instruction, or the row just past it.
///
/// `after` resolves to one past the last row of `instr`, so a jump can skip
/// a whole block by naming the block's last instruction regardless of how
/// many rows that instruction expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JumpTarget {
    pub instr: InstrId,
    pub after: bool,
}

impl JumpTarget {
    pub fn at(instr: InstrId) -> Self {
        Self { instr, after: false }
    }

    pub fn after(instr: InstrId) -> Self {
        Self { instr, after: true }
    }
}
