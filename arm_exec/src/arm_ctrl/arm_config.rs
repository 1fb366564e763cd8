//! Arm configuration structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Stores an arm configuration - the angular positions of both rotational
/// axes.
///
/// Angles are unbounded real values, no joint limits are enforced.
#[derive(Clone, Copy, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmConfig {
    /// Absolute position of the shoulder axis, measured from the +x axis of
    /// the arm frame.
    ///
    /// Units: radians
    pub shoulder_pos_rad: f64,

    /// Absolute position of the elbow axis, measured from the direction of
    /// the shoulder link.
    ///
    /// Units: radians
    pub elbow_pos_rad: f64,
}
