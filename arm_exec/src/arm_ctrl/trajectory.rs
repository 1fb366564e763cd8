//! Joint-space trajectory generation
//!
//! Turns a pair of arm configurations into a time-parameterised sequence of
//! samples easing the arm from one to the other. Consumers play the
//! sequence back for rendering and feed the time series into plots.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::{ArmConfig, ArmCtrl};
use util::maths;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of interpolation steps in a generated path. A path holds one
/// sample more than this, since both endpoints are included.
pub const NUM_PATH_STEPS: usize = 100;

/// Fixed component of a path's duration.
///
/// Units: seconds
const PATH_BASE_DURATION_S: f64 = 15.0;

/// Scaling of a path's duration with the largest angular distance a joint
/// must cover.
///
/// Units: seconds/radian
const PATH_DURATION_SCALE_S_PER_RAD: f64 = 10.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A path easing the arm from one configuration to another.
///
/// Samples are in playback order. A path is immutable once generated and
/// is replaced wholesale by the next move.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub samples: Vec<PathSample>,
}

/// A single timestamped sample of a path.
///
/// Kept flat so that one sample is one archive record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    /// Time of this sample from the start of the path.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Shoulder axis position at this sample.
    ///
    /// Units: radians
    pub shoulder_pos_rad: f64,

    /// Elbow axis position at this sample.
    ///
    /// Units: radians
    pub elbow_pos_rad: f64,

    /// Head x position at this sample.
    ///
    /// Units: meters
    pub x_m: f64,

    /// Head y position at this sample.
    ///
    /// Units: meters
    pub y_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Create a new empty path
    pub fn new_empty() -> Self {
        Path {
            samples: Vec::new(),
        }
    }

    /// Return the duration of the path in seconds, or zero for an empty
    /// path.
    pub fn duration_s(&self) -> f64 {
        match self.samples.last() {
            Some(s) => s.time_s,
            None => 0.0,
        }
    }

    /// Get the number of samples in the path
    pub fn get_num_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl PathSample {
    /// Get the joint configuration at this sample.
    pub fn config(&self) -> ArmConfig {
        ArmConfig {
            shoulder_pos_rad: self.shoulder_pos_rad,
            elbow_pos_rad: self.elbow_pos_rad,
        }
    }
}

impl ArmCtrl {
    /// Generate the path easing the arm from one configuration to another.
    ///
    /// The path holds `NUM_PATH_STEPS + 1` samples with both endpoint
    /// configurations included exactly. Progress through the move is
    /// reparameterised with smoothstep easing so the joints accelerate out
    /// of the start and settle into the target. The duration scales with
    /// the largest angular distance either joint must cover.
    ///
    /// Each sample's head position is derived from its interpolated joint
    /// angles through the forward kinematics, never interpolated in
    /// Cartesian space, so every sample is kinematically consistent.
    ///
    /// Pure with respect to the arm state: the same configuration pair
    /// always yields the same path.
    pub fn generate_path(&self, from: &ArmConfig, to: &ArmConfig) -> Path {
        let max_dist_rad = (to.shoulder_pos_rad - from.shoulder_pos_rad)
            .abs()
            .max((to.elbow_pos_rad - from.elbow_pos_rad).abs());

        let duration_s = PATH_BASE_DURATION_S + PATH_DURATION_SCALE_S_PER_RAD * max_dist_rad;

        let mut samples = Vec::with_capacity(NUM_PATH_STEPS + 1);

        for i in 0..=NUM_PATH_STEPS {
            let t = i as f64 / NUM_PATH_STEPS as f64;
            let progress = maths::smoothstep(t);

            // Affine combination rather than `from + delta * progress`, so
            // the endpoint samples carry the endpoint angles exactly
            let config = ArmConfig {
                shoulder_pos_rad: (1.0 - progress) * from.shoulder_pos_rad
                    + progress * to.shoulder_pos_rad,
                elbow_pos_rad: (1.0 - progress) * from.elbow_pos_rad
                    + progress * to.elbow_pos_rad,
            };

            let pos_m = self.calc_forward_kinematics(&config);

            samples.push(PathSample {
                time_s: maths::lin_map((0.0, 1.0), (0.0, duration_s), t),
                shoulder_pos_rad: config.shoulder_pos_rad,
                elbow_pos_rad: config.elbow_pos_rad,
                x_m: pos_m.x,
                y_m: pos_m.y,
            });
        }

        Path { samples }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
