// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement AST nodes.

use crate::expr::Expr;

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    /// Block of statements
    Block(Vec<Stmt>),
    /// Expression statement
    Expr(Expr),
    /// Assignment (`a = x`, `a, b := f()`, `a += 1`)
    Assign {
        targets: Vec<Expr>,
        op: AssignOp,
        values: Vec<Expr>,
    },
    /// Increment or decrement (`i++`, `i--`)
    IncDec { target: Expr, op: IncDecOp },
    /// Return statement
    Return(Vec<Expr>),
    /// If statement with optional initializer and else branch.
    /// The else branch is either a `Block` or another `If`.
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// C-style for loop
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Vec<Stmt>,
    },
    /// For-range loop
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        iter: Expr,
        body: Vec<Stmt>,
    },
    /// Switch statement
    Switch { tag: Option<Expr>, body: Vec<Stmt> },
    /// break / continue / goto / fallthrough
    Branch {
        kind: BranchKind,
        label: Option<String>,
    },
    /// Labeled statement
    Labeled { label: String, body: Box<Stmt> },
    /// Deferred call
    Defer(Expr),
    /// Concurrent call
    Go(Expr),
}

impl Stmt {
    /// Short name of the statement's shape, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Block(_) => "block",
            Stmt::Expr(_) => "expression statement",
            Stmt::Assign { .. } => "assignment",
            Stmt::IncDec { .. } => "increment/decrement",
            Stmt::Return(_) => "return",
            Stmt::If { .. } => "if statement",
            Stmt::For { .. } => "for loop",
            Stmt::Range { .. } => "range loop",
            Stmt::Switch { .. } => "switch statement",
            Stmt::Branch { kind, .. } => kind.keyword(),
            Stmt::Labeled { .. } => "labeled statement",
            Stmt::Defer(_) => "defer statement",
            Stmt::Go(_) => "go statement",
        }
    }

    /// Single-destination assignment `target op value`.
    pub fn assign(target: Expr, op: AssignOp, value: Expr) -> Self {
        Stmt::Assign {
            targets: vec![target],
            op,
            values: vec![value],
        }
    }
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `:=`
    Define,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

impl AssignOp {
    /// Plain assignment or declaration-assignment, as opposed to compound forms.
    pub fn is_direct(self) -> bool {
        matches!(self, AssignOp::Assign | AssignOp::Define)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Define => ":=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IncDecOp {
    Inc,
    Dec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

impl BranchKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BranchKind::Break => "break",
            BranchKind::Continue => "continue",
            BranchKind::Goto => "goto",
            BranchKind::Fallthrough => "fallthrough",
        }
    }
}
