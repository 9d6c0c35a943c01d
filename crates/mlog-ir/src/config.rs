// SPDX-License-Identifier: (MIT OR Apache-2.0)

/// Lowering and rendering options. Both decorations are off by default and
/// independent of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Prefix each rendered row with its address.
    pub show_addresses: bool,
    /// Append each instruction's annotation as a trailing comment.
    pub show_comments: bool,
}

impl Options {
    pub fn with_addresses(mut self, on: bool) -> Self {
        self.show_addresses = on;
        self
    }

    pub fn with_comments(mut self, on: bool) -> Self {
        self.show_comments = on;
        self
    }
}
