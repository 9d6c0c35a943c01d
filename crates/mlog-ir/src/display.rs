// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Display implementations for IR types.

use crate::*;
use std::fmt;

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(text) => write!(f, "{}", text),
            Operand::Variable(name) => write!(f, "{}", name),
            Operand::Temp(id) => write!(f, "_tmp{}", id.0),
        }
    }
}

impl fmt::Display for InstrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for JumpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Display for JumpCond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JumpCond::Always => write!(f, "always"),
            JumpCond::Compare { op, left, right } => write!(f, "{} {} {}", op, left, right),
        }
    }
}

impl fmt::Display for JumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.after {
            write!(f, "after {}", self.instr)
        } else {
            write!(f, "{}", self.instr)
        }
    }
}

/// Symbolic form, for debugging: jumps show their unresolved target.
impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            InstrKind::Plain { rows, .. } => {
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    for (j, operand) in row.iter().enumerate() {
                        if j > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{}", operand)?;
                    }
                }
                Ok(())
            }
            InstrKind::Jump { cond, target, .. } => write!(f, "jump [{}] {}", target, cond),
            InstrKind::TrampolineBack => write!(f, "set @counter {}", TRAMPOLINE_SLOT),
        }
    }
}
