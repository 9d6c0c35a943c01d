// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! InstrBuilder - identity and temporary allocation during lowering.

use crate::{Instr, InstrId, InstrKind, JumpCond, JumpTarget, Operand, TempId};

/// Hands out instruction identities and temporaries for one lowering
/// invocation. Nothing here is global: two builders never share counters.
#[derive(Debug, Default)]
pub struct InstrBuilder {
    next_instr_id: u32,
    next_temp_id: u32,
}

impl InstrBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> InstrId {
        let id = InstrId(self.next_instr_id);
        self.next_instr_id += 1;
        id
    }

    pub fn alloc_temp(&mut self) -> Operand {
        let id = TempId(self.next_temp_id);
        self.next_temp_id += 1;
        Operand::Temp(id)
    }

    pub fn plain(&mut self, rows: Vec<Vec<Operand>>, comment: impl Into<String>) -> Instr {
        Instr {
            id: self.next_id(),
            kind: InstrKind::Plain {
                rows,
                comment: comment.into(),
            },
        }
    }

    /// Single-row instruction.
    pub fn row(&mut self, row: Vec<Operand>, comment: impl Into<String>) -> Instr {
        self.plain(vec![row], comment)
    }

    /// `set dst src`
    pub fn set(&mut self, dst: Operand, src: Operand, comment: impl Into<String>) -> Instr {
        self.row(vec![Operand::token("set"), dst, src], comment)
    }

    /// `op <name> dst left right`
    pub fn op(
        &mut self,
        name: &str,
        dst: Operand,
        left: Operand,
        right: Operand,
        comment: impl Into<String>,
    ) -> Instr {
        self.row(
            vec![Operand::token("op"), Operand::token(name), dst, left, right],
            comment,
        )
    }

    pub fn jump(
        &mut self,
        cond: JumpCond,
        target: JumpTarget,
        comment: impl Into<String>,
    ) -> Instr {
        Instr {
            id: self.next_id(),
            kind: InstrKind::Jump {
                cond,
                target,
                comment: comment.into(),
            },
        }
    }

    /// Jump whose target is not known yet. It points at itself until the
    /// emitting statement retargets it.
    pub(crate) fn pending_jump(&mut self, cond: JumpCond, comment: impl Into<String>) -> Instr {
        let id = self.next_id();
        Instr {
            id,
            kind: InstrKind::Jump {
                cond,
                target: JumpTarget::after(id),
                comment: comment.into(),
            },
        }
    }

    pub fn trampoline_back(&mut self) -> Instr {
        Instr {
            id: self.next_id(),
            kind: InstrKind::TrampolineBack,
        }
    }
}
