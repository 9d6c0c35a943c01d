// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Rendering - resolve jump targets and emit program text.

use crate::{Instr, InstrId, InstrKind, Layout, Options, TRAMPOLINE_SLOT};
use thiserror::Error;

/// Width the row text is padded to before a trailing comment.
const COMMENT_COLUMN: usize = 45;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A jump names an instruction that is not in the rendered list.
    #[error("jump target {0} is not part of the instruction stream")]
    DanglingTarget(InstrId),
    /// Two instructions share an identity, typically because the list joins
    /// the output of separate lowerings.
    #[error("instruction {0} appears more than once")]
    DuplicateId(InstrId),
}

/// Render `instrs` as program text, numbering rows from `base`.
///
/// Decorations only wrap each row; the row text itself is the same whatever
/// the options are.
pub fn render(instrs: &[Instr], options: &Options, base: usize) -> Result<String, RenderError> {
    let layout = Layout::new(instrs, base)?;
    let mut out = String::new();
    let mut addr = base;

    for instr in instrs {
        for row in row_texts(instr, &layout)? {
            if options.show_addresses {
                out.push_str(&format!("{:3}: ", addr));
            }
            if options.show_comments {
                out.push_str(&format!(
                    "{:<width$} // {}",
                    row,
                    instr.comment(),
                    width = COMMENT_COLUMN
                ));
            } else {
                out.push_str(&row);
            }
            out.push('\n');
            addr += 1;
        }
    }

    debug_assert_eq!(addr, layout.end());
    log::trace!("rendered rows {}..{}", base, layout.end());
    Ok(out)
}

fn row_texts(instr: &Instr, layout: &Layout) -> Result<Vec<String>, RenderError> {
    match &instr.kind {
        InstrKind::Plain { rows, .. } => Ok(rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|operand| operand.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()),
        InstrKind::Jump { cond, target, .. } => {
            let addr = layout
                .resolve(*target)
                .ok_or(RenderError::DanglingTarget(target.instr))?;
            Ok(vec![format!("jump {} {}", addr, cond)])
        }
        InstrKind::TrampolineBack => Ok(vec![format!("set @counter {}", TRAMPOLINE_SLOT)]),
    }
}
