//! Arm control module
//!
//! Converts target head positions into joint configurations and smooth
//! joint-space paths for the two-link planar arm. Renderers and plotters
//! consume the module's output snapshots; nothing else mutates the arm.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod arm_config;
mod cmd;
mod kinematics;
mod params;
mod state;
mod trajectory;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use arm_config::*;
pub use cmd::*;
pub use params::*;
pub use state::*;
pub use trajectory::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The elbow solution branch the inverse kinematics solver shall return.
///
/// Every reachable target admits two mirrored joint solutions. The solver
/// always returns this single fixed branch and never offers the mirrored
/// one. Support for selecting the other branch would be added by threading
/// a branch argument through the solver, not by reinterpreting this
/// constant.
pub const IK_ELBOW_BRANCH: ElbowBranch = ElbowBranch::Positive;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Elbow solution branches for a two-link planar arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElbowBranch {
    /// Elbow angle in `[0, pi]`.
    Positive,
    /// Elbow angle in `[-pi, 0]`, the mirror of `Positive` about the
    /// base-target chord.
    Negative,
}

/// Possible errors that can occur during ArmCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum ArmCtrlError {
    #[error("Expected there to be an arm command but couldn't find one")]
    NoArmCmd,

    #[error("Recieved an invalid arm command: {0:#?}")]
    InvalidArmCmd(ArmCmd),

    #[error("Target ({0:.3}, {1:.3}) m is outside the arm's workspace")]
    TargetOutOfWorkspace(f64, f64),

    #[error("No inverse kinematics solution for target ({0:.3}, {1:.3}) m")]
    NoIkSolution(f64, f64),
}
