//! Commands passed into ArmCtrl

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A command to be executed by ArmCtrl.
#[derive(Clone, Copy, Debug)]
pub enum ArmCmd {
    /// Move the head of the arm to the given position in the arm frame.
    MoveTo {
        /// Target head x coordinate.
        ///
        /// Units: meters
        x_m: f64,

        /// Target head y coordinate.
        ///
        /// Units: meters
        y_m: f64,
    },

    /// Return the head of the arm to the predefined home position.
    Home,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmCmd {
    /// Determine if the command is valid (i.e. contains well-formed data).
    pub fn is_valid(&self) -> bool {
        match self {
            ArmCmd::MoveTo { x_m, y_m } => x_m.is_finite() && y_m.is_finite(),
            ArmCmd::Home => true,
        }
    }
}
