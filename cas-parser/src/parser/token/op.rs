//! Unary and binary operators, along with their precedence and associativity.

use crate::{
    parser::{error::{kind, Error}, Associativity, Parse, Parser, Precedence},
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    /// Negation, `-x`. The parser lowers it to multiplication by `-1`.
    Neg,
}

impl UnaryOpKind {
    /// The tokens that begin a unary operation.
    const TOKENS: &'static [TokenKind] = &[TokenKind::Sub];

    /// Returns the precedence of the unary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Neg => Precedence::Neg,
        }
    }
}

/// A unary operator that takes one operand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    pub kind: UnaryOpKind,
    pub span: Range<usize>,
}

impl UnaryOp {
    /// Returns the precedence of the unary operator.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.expect(UnaryOpKind::TOKENS)?;
        Ok(Self { kind: UnaryOpKind::Neg, span: token.span })
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    /// The tokens that can appear as an explicit binary operator.
    const TOKENS: &'static [TokenKind] = &[
        TokenKind::Exp,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Add,
        TokenKind::Sub,
    ];

    /// Returns the binary operation written with the given token, if there is one.
    fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Exp => Self::Exp,
            TokenKind::Mul => Self::Mul,
            TokenKind::Div => Self::Div,
            TokenKind::Add => Self::Add,
            TokenKind::Sub => Self::Sub,
            _ => return None,
        })
    }

    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns the associativity of the binary operation. Only exponentiation is
    /// right-associative: `2^3^2` is `2^(3^2)`.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

/// A binary operator that takes two operands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    pub kind: BinOpKind,

    /// Whether this binary operator was implicitly inserted by the parser, as in `2x`.
    pub implicit: bool,

    pub span: Range<usize>,
}

impl BinOp {
    /// Creates the implicit multiplication operator covering the gap between two juxtaposed
    /// operands.
    pub fn implicit_mul(gap: Range<usize>) -> Self {
        Self { kind: BinOpKind::Mul, implicit: true, span: gap }
    }

    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match BinOpKind::from_token(token.kind) {
            Some(kind) => Ok(Self { kind, implicit: false, span: token.span }),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: BinOpKind::TOKENS,
                found: token.kind,
            })),
        }
    }
}
