// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Instruction operands.

/// Operand of an instruction. Every variant renders to exactly one token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Constant captured verbatim from source.
    Literal(String),
    /// Source-level variable. All names share one flat namespace.
    Variable(String),
    /// Compiler-generated variable with no source name.
    Temp(TempId),
}

impl Operand {
    pub fn literal(text: impl Into<String>) -> Self {
        Operand::Literal(text.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Operand::Variable(name.into())
    }

    /// Keyword tokens (`set`, `op`, `add`, ...) are literals too.
    pub(crate) fn token(text: &str) -> Self {
        Operand::Literal(text.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TempId(pub u32);
