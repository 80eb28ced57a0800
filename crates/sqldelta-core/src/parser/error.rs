//! Parser error types.

use crate::lexer::{Pos, Token, TokenKind};

/// An error produced while parsing DDL.
///
/// Every variant carries the failing token's position so messages always
/// name a line and column. The first error aborts the whole parse; there
/// is no partial recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The lexer produced an ILLEGAL token (unknown byte or unterminated
    /// literal).
    #[error("illegal input {value:?} at {pos}")]
    Lexical {
        /// The offending text.
        value: String,
        /// Where it starts.
        pos: Pos,
    },

    /// The parser expected one set of token kinds and saw another.
    #[error("unexpected {found} {value:?} at {pos}, expected {expected}")]
    UnexpectedToken {
        /// Human description of what was acceptable here.
        expected: String,
        /// The kind actually found.
        found: TokenKind,
        /// The token's text.
        value: String,
        /// Where it starts.
        pos: Pos,
    },

    /// A recognized construct the parser deliberately refuses, e.g.
    /// `CHECK` constraints or the `TABLESPACE` table option.
    #[error("unsupported feature {feature} at {pos}")]
    UnsupportedFeature {
        /// The refused construct.
        feature: String,
        /// Where it starts.
        pos: Pos,
    },

    /// A structurally invalid combination of otherwise valid tokens,
    /// e.g. a second `USING` clause or a misordered column option.
    #[error("{message} at {pos}")]
    Structural {
        /// What went wrong.
        message: String,
        /// Where it went wrong.
        pos: Pos,
    },
}

impl ParseError {
    /// Creates the right error for an unexpected token: `Lexical` when
    /// the token is ILLEGAL, `UnexpectedToken` otherwise.
    #[must_use]
    pub fn unexpected(token: &Token, expected: impl Into<String>) -> Self {
        if token.kind == TokenKind::Illegal {
            return Self::Lexical {
                value: token.value.clone(),
                pos: token.pos,
            };
        }
        Self::UnexpectedToken {
            expected: expected.into(),
            found: token.kind,
            value: token.value.clone(),
            pos: token.pos,
        }
    }

    /// Creates an unsupported-feature error at the given token.
    #[must_use]
    pub fn unsupported(token: &Token, feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
            pos: token.pos,
        }
    }

    /// Creates a structural error at the given token.
    #[must_use]
    pub fn structural(token: &Token, message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
            pos: token.pos,
        }
    }

    /// The source position of the failure.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::Lexical { pos, .. }
            | Self::UnexpectedToken { pos, .. }
            | Self::UnsupportedFeature { pos, .. }
            | Self::Structural { pos, .. } => *pos,
        }
    }
}
