use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single-argument function that can appear in an expression.
///
/// The derivative of each function with respect to its argument is defined in
/// [`derivative`](crate::algebra::derivative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Arcsin,
    Arccos,
    Arctan,
    Sinh,
    Cosh,
    Arsinh,
    Arcosh,
    Ln,
}

impl Func {
    /// Every function, in the order they are listed to the user.
    pub const ALL: [Func; 11] = [
        Func::Sin,
        Func::Cos,
        Func::Tan,
        Func::Arcsin,
        Func::Arccos,
        Func::Arctan,
        Func::Sinh,
        Func::Cosh,
        Func::Arsinh,
        Func::Arcosh,
        Func::Ln,
    ];

    /// Returns the name the function is called by.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Arcsin => "arcsin",
            Self::Arccos => "arccos",
            Self::Arctan => "arctan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Arsinh => "asinh",
            Self::Arcosh => "acosh",
            Self::Ln => "ln",
        }
    }

    /// Returns the function with the given name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|func| func.name() == name)
    }

    /// Applies the function to a number.
    pub fn apply(&self, arg: f64) -> f64 {
        match self {
            Self::Sin => arg.sin(),
            Self::Cos => arg.cos(),
            Self::Tan => arg.tan(),
            Self::Arcsin => arg.asin(),
            Self::Arccos => arg.acos(),
            Self::Arctan => arg.atan(),
            Self::Sinh => arg.sinh(),
            Self::Cosh => arg.cosh(),
            Self::Arsinh => arg.asinh(),
            Self::Arcosh => arg.acosh(),
            Self::Ln => arg.ln(),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
