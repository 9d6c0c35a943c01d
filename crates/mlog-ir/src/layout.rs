// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Linearization - assign an address to every physical row.

use crate::{Instr, InstrId, JumpTarget, RenderError};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Address table for one finished instruction list.
#[derive(Debug, Clone)]
pub struct Layout {
    /// First row address and row count of each instruction.
    spans: HashMap<InstrId, (usize, usize)>,
    end: usize,
}

impl Layout {
    /// Lay out `instrs` starting at `base`, one address per physical row.
    ///
    /// Every identity must appear once. Lists produced by separate builders
    /// reuse identities and are rejected with `DuplicateId`.
    pub fn new(instrs: &[Instr], base: usize) -> Result<Self, RenderError> {
        let mut spans = HashMap::with_capacity(instrs.len());
        let mut addr = base;
        for instr in instrs {
            let rows = instr.row_count();
            match spans.entry(instr.id) {
                Entry::Occupied(_) => return Err(RenderError::DuplicateId(instr.id)),
                Entry::Vacant(slot) => {
                    slot.insert((addr, rows));
                }
            }
            addr += rows;
        }
        log::trace!("laid out {} instructions at {}..{}", instrs.len(), base, addr);
        Ok(Self { spans, end: addr })
    }

    /// One past the last row.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Concrete address of a symbolic target, or `None` if the target is not
    /// part of this layout.
    pub fn resolve(&self, target: JumpTarget) -> Option<usize> {
        let &(first, rows) = self.spans.get(&target.instr)?;
        Some(if target.after { first + rows } else { first })
    }
}
