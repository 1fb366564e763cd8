//! Parameters structure for ArmCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Arm control.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- GEOMETRY ----
    /// The length of the shoulder link.
    ///
    /// Units: meters. Shall be positive.
    pub shoulder_length_m: f64,

    /// The length of the elbow link.
    ///
    /// Units: meters. Shall be positive.
    pub elbow_length_m: f64,

    /// The offset of the gripper tip beyond the head of the arm, along the
    /// elbow link direction.
    ///
    /// Units: meters
    pub gripper_length_m: f64,

    // ---- POSITIONS ----
    /// The predefined home position of the head in the arm frame.
    ///
    /// Units: meters
    pub home_pos_m: [f64; 2],

    /// Shoulder axis position at initialisation.
    ///
    /// Units: radians
    pub init_shoulder_pos_rad: f64,

    /// Elbow axis position at initialisation.
    ///
    /// Units: radians
    pub init_elbow_pos_rad: f64,
}
