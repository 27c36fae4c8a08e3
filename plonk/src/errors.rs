use ark_std::{boxed::Box, error, fmt, format, string::String};
use plonk_algebra::prelude::AlgebraError;

pub(crate) type Result<T> = core::result::Result<T, PlonkError>;

#[derive(Debug, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum PlonkError {
    /// Algebra error
    Algebra(AlgebraError),
    /// Group not found.
    GroupNotFound(usize),
    /// Polynomial commitment error.
    CommitmentError,
    /// Error occurred when setup.
    SetupError,
    /// Error occurred when verify.
    VerificationError,
    /// Function params error.
    FuncParamsError,
    /// The witness does not satisfy the constraint at the given row.
    UnsatisfiedConstraint(usize),
    /// The challenge slot was never declared.
    UnknownChallenge(String),
    /// The challenge slot is already computed and accepts no more binds.
    ChallengeAlreadyComputed(String),
    /// The challenge slot has nothing bound to it.
    ChallengeNotBound(String),
    /// The slot declared before this one is not computed yet.
    PreviousChallengeNotComputed(String),
    /// Cannot compute the opening proof.
    PCSProveEvalError,
    /// The degree of the polynomial is higher than the maximum degree supported.
    DegreeError,
}

impl fmt::Display for PlonkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PlonkError::*;
        f.write_str(match self {
            Algebra(e) => Box::leak(format!("Algebra: {}", e).into_boxed_str()),
            GroupNotFound(n) => Box::leak(format!("Group of size {} not found.", n).into_boxed_str()),
            CommitmentError => "Commitment error.",
            SetupError => "Setup error.",
            VerificationError => "Verification error.",
            FuncParamsError => "Function params error",
            UnsatisfiedConstraint(row) => {
                Box::leak(format!("Constraint at row {} is not satisfied.", row).into_boxed_str())
            }
            UnknownChallenge(name) => {
                Box::leak(format!("Unknown challenge {}.", name).into_boxed_str())
            }
            ChallengeAlreadyComputed(name) => {
                Box::leak(format!("Challenge {} is already computed.", name).into_boxed_str())
            }
            ChallengeNotBound(name) => {
                Box::leak(format!("Challenge {} has no bound values.", name).into_boxed_str())
            }
            PreviousChallengeNotComputed(name) => Box::leak(
                format!("The challenge before {} is not computed.", name).into_boxed_str(),
            ),
            PCSProveEvalError => "Cannot compute the opening proof.",
            DegreeError => {
                "The degree of the polynomial is higher than the maximum degree supported."
            }
        })
    }
}

impl error::Error for PlonkError {
    #[cfg(feature = "std")]
    fn description(&self) -> &str {
        Box::leak(format!("{}", self).into_boxed_str())
    }
}

impl From<AlgebraError> for PlonkError {
    fn from(e: AlgebraError) -> PlonkError {
        PlonkError::Algebra(e)
    }
}
