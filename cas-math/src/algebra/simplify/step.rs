use std::fmt;

/// A rewrite applied by the simplifier. Each variant lists examples of the rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `2 + 3 = 5`, `2 * 3 = 6`, `2^3 = 8`
    FoldConstants,

    /// `a + 0 = a`
    AddZero,

    /// `a * 0 = 0`
    MultiplyZero,

    /// `a * 1 = a`
    MultiplyOne,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `a + a = 2a`, `2a + 3a = 5a`, `a + -1a = 0`
    CombineLikeTerms,

    /// `a * a = a^2`, `a^2 * a^3 = a^5`, `(2a)^2 = 4a^2`
    CombineLikeFactors,

    /// `a * (b + c) = a * b + a * c`
    DistributiveProperty,
}

impl Step {
    /// Returns a short description of the rewrite.
    pub fn description(self) -> &'static str {
        match self {
            Step::FoldConstants => "fold constants",
            Step::AddZero => "remove zero term",
            Step::MultiplyZero => "multiply by zero",
            Step::MultiplyOne => "remove factor of one",
            Step::PowerZero => "raise to the zeroth power",
            Step::PowerOne => "remove exponent of one",
            Step::CombineLikeTerms => "combine like terms",
            Step::CombineLikeFactors => "combine like factors",
            Step::DistributiveProperty => "distribute",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
