// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! mlog lowering core - structured statements to a flat, jump-only
//! instruction stream.
//!
//! Statements are lowered into a list of instructions whose jumps refer to
//! other instructions by identity. Addresses are only assigned when the
//! finished list is laid out and rendered.

mod builder;
mod config;
mod display;
mod instr;
mod layout;
mod operand;
mod render;

pub mod lower;

pub use builder::InstrBuilder;
pub use config::Options;
pub use instr::{Instr, InstrId, InstrKind, JumpCond, JumpOp, JumpTarget};
pub use layout::Layout;
pub use lower::{lower, BasicExprLowerer, ExprLowering, Lowerer, LoweringError};
pub use operand::{Operand, TempId};
pub use render::{render, RenderError};

/// Variable a `return` writes its value into.
pub const RETURN_SLOT: &str = "_RETURN";

/// Variable holding the caller's resume address; the trampoline marker jumps
/// through it.
pub const TRAMPOLINE_SLOT: &str = "@funcTramp";
