// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types consumed by the mlog lowering pass.
//!
//! This crate defines the statement and expression nodes a front end hands
//! to the lowering core. Parsing lives elsewhere; these types only describe
//! the shapes the lowering pass has to recognise, including the ones it
//! rejects.

pub mod expr;
pub mod stmt;

pub use expr::{BinOp, Expr, UnaryOp};
pub use stmt::{AssignOp, BranchKind, IncDecOp, Stmt};
