//! Arm kinematics calculations
//!
//! Forward and inverse kinematics for the two-link planar arm, along with
//! the workspace reachability check. Inverse kinematics is described in
//! https://en.wikipedia.org/wiki/Inverse_kinematics; the closed form used
//! here is the law-of-cosines solution on the triangle formed by the two
//! links and the base-target chord.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;

// Internal imports
use super::*;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmCtrl {
    /// Determine whether the given target is inside the arm's workspace.
    ///
    /// The workspace is the annulus centred on the arm base with outer
    /// radius `shoulder_length_m + elbow_length_m` and inner radius
    /// `|shoulder_length_m - elbow_length_m|`, both bounds inclusive. With
    /// equal link lengths the annulus degenerates into a full disk.
    ///
    /// The inverse kinematics solver rejects out-of-range targets through
    /// this same check, so the two can never disagree on the annulus bound
    /// itself.
    pub fn is_target_reachable(&self, target_pos_m: &Vector2<f64>) -> bool {
        let dist_sq_m2 = target_pos_m.norm_squared();
        let outer_m = self.params.shoulder_length_m + self.params.elbow_length_m;
        let inner_m = (self.params.shoulder_length_m - self.params.elbow_length_m).abs();

        dist_sq_m2 <= outer_m.powi(2) && dist_sq_m2 >= inner_m.powi(2)
    }

    /// Perform the forward kinematics calculation.
    ///
    /// Maps a joint configuration to the position of the head of the arm in
    /// the arm frame. Total over all real angle pairs.
    pub fn calc_forward_kinematics(&self, config: &ArmConfig) -> Vector2<f64> {
        let shoulder_rad = config.shoulder_pos_rad;
        let head_rad = config.shoulder_pos_rad + config.elbow_pos_rad;

        Vector2::new(
            self.params.shoulder_length_m * shoulder_rad.cos()
                + self.params.elbow_length_m * head_rad.cos(),
            self.params.shoulder_length_m * shoulder_rad.sin()
                + self.params.elbow_length_m * head_rad.sin(),
        )
    }

    /// Get the position of the gripper tip for the given configuration.
    ///
    /// The tip sits `gripper_length_m` beyond the head of the arm, along
    /// the direction of the elbow link.
    pub fn calc_gripper_tip_pos_m(&self, config: &ArmConfig) -> Vector2<f64> {
        let head_rad = config.shoulder_pos_rad + config.elbow_pos_rad;

        self.calc_forward_kinematics(config)
            + self.params.gripper_length_m * Vector2::new(head_rad.cos(), head_rad.sin())
    }

    /// Perform the inverse kinematics calculation.
    ///
    /// Maps a target head position to the joint configuration placing the
    /// head there. `None` is returned for any target the solver cannot
    /// reach, with no distinction between the causes.
    ///
    /// Of the two mirrored solutions a reachable target admits, the one on
    /// the [`IK_ELBOW_BRANCH`] branch is always the one returned.
    pub fn calc_inverse_kinematics(&self, target_pos_m: &Vector2<f64>) -> Option<ArmConfig> {
        let shoulder_length_m = self.params.shoulder_length_m;
        let elbow_length_m = self.params.elbow_length_m;

        // Range rejection goes through the workspace check itself so that
        // the solver and the reachability query share one distance bound.
        if !self.is_target_reachable(target_pos_m) {
            return None;
        }

        let dist_sq_m2 = target_pos_m.norm_squared();
        let dist_m = dist_sq_m2.sqrt();

        // A zero chord length is only in range when the links are of equal
        // length. The polar angle of the target is undefined there and the
        // cosine rule below would divide by zero, so return the fully
        // folded configuration directly.
        if dist_m == 0.0 {
            return Some(ArmConfig {
                shoulder_pos_rad: 0.0,
                elbow_pos_rad: std::f64::consts::PI,
            });
        }

        // Polar angle of the target
        let gamma_rad = target_pos_m.y.atan2(target_pos_m.x);

        // Angle at the base of the link triangle, between the chord and the
        // shoulder link. The l1^2 - l2^2 term is kept in factored form:
        // with equal link lengths it is exactly zero, which holds the
        // quotient at 1 on the outer workspace boundary.
        let cos_beta = (dist_sq_m2
            + (shoulder_length_m - elbow_length_m) * (shoulder_length_m + elbow_length_m))
            / (2.0 * dist_m * shoulder_length_m);

        // The annulus check bounds the exact quotient but not the computed
        // one, which can leave the acos domain through rounding at the
        // workspace boundary
        if cos_beta.abs() > 1.0 {
            return None;
        }

        let beta_rad = cos_beta.acos();

        // Angle at the elbow of the link triangle
        let cos_alpha = (shoulder_length_m.powi(2) + elbow_length_m.powi(2) - dist_sq_m2)
            / (2.0 * shoulder_length_m * elbow_length_m);

        if cos_alpha.abs() > 1.0 {
            return None;
        }

        let (shoulder_pos_rad, elbow_pos_rad) = match IK_ELBOW_BRANCH {
            ElbowBranch::Positive => (
                gamma_rad - beta_rad,
                std::f64::consts::PI - cos_alpha.acos(),
            ),
            ElbowBranch::Negative => (
                gamma_rad + beta_rad,
                cos_alpha.acos() - std::f64::consts::PI,
            ),
        };

        Some(ArmConfig {
            shoulder_pos_rad,
            elbow_pos_rad,
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    /// An uninitialised ArmCtrl carrying the baseline geometry (equal
    /// 0.12 m links).
    fn test_arm() -> ArmCtrl {
        ArmCtrl {
            params: Params {
                shoulder_length_m: 0.12,
                elbow_length_m: 0.12,
                gripper_length_m: 0.02,
                home_pos_m: [0.14, 0.14],
                init_shoulder_pos_rad: FRAC_PI_2,
                init_elbow_pos_rad: 0.0,
            },
            ..ArmCtrl::default()
        }
    }

    #[test]
    fn test_forward_kinematics() {
        let arm = test_arm();

        // Straight up
        let pos_m = arm.calc_forward_kinematics(&ArmConfig {
            shoulder_pos_rad: FRAC_PI_2,
            elbow_pos_rad: 0.0,
        });
        assert!(pos_m.x.abs() < 1e-12);
        assert!((pos_m.y - 0.24).abs() < 1e-12);

        // Straight out along +x
        let pos_m = arm.calc_forward_kinematics(&ArmConfig {
            shoulder_pos_rad: 0.0,
            elbow_pos_rad: 0.0,
        });
        assert!((pos_m.x - 0.24).abs() < 1e-12);
        assert!(pos_m.y.abs() < 1e-12);

        // Fully folded back onto the base
        let pos_m = arm.calc_forward_kinematics(&ArmConfig {
            shoulder_pos_rad: 0.0,
            elbow_pos_rad: PI,
        });
        assert!(pos_m.norm() < 1e-12);
    }

    #[test]
    fn test_workspace_boundary() {
        let arm = test_arm();

        // Outer boundary is inclusive
        assert!(arm.is_target_reachable(&Vector2::new(0.24, 0.0)));
        assert!(!arm.is_target_reachable(&Vector2::new(0.2401, 0.0)));

        // Equal link lengths degenerate the annulus into a full disk, so
        // the base itself is in range
        assert!(arm.is_target_reachable(&Vector2::new(0.0, 0.0)));

        assert!(!arm.is_target_reachable(&Vector2::new(10.0, 10.0)));
    }

    #[test]
    fn test_workspace_unequal_links() {
        let mut arm = test_arm();
        arm.params.elbow_length_m = 0.08;

        // Inner radius is now 0.04 m, the base is no longer in range
        assert!(!arm.is_target_reachable(&Vector2::zeros()));
        assert!(arm.calc_inverse_kinematics(&Vector2::zeros()).is_none());
        assert!(!arm.is_target_reachable(&Vector2::new(0.01, 0.0)));

        // Inside the ring
        assert!(arm.is_target_reachable(&Vector2::new(0.05, 0.0)));
        assert!(arm.is_target_reachable(&Vector2::new(0.0, -0.19)));
    }

    #[test]
    fn test_ik_round_trip() {
        let arm = test_arm();

        // Grid of configurations on the solver's branch (positive elbow),
        // with shoulder angles keeping the target's polar angle away from
        // the atan2 wrap.
        for i in 0..=12 {
            let shoulder_pos_rad = -1.2 + 0.2 * i as f64;

            for &elbow_pos_rad in [0.3, 0.9, 1.5, 2.4, 3.0].iter() {
                let config = ArmConfig {
                    shoulder_pos_rad,
                    elbow_pos_rad,
                };

                let pos_m = arm.calc_forward_kinematics(&config);
                assert!(arm.is_target_reachable(&pos_m));

                let solved = arm.calc_inverse_kinematics(&pos_m).unwrap();
                assert!(
                    (solved.shoulder_pos_rad - config.shoulder_pos_rad).abs() < 1e-9,
                    "shoulder mismatch at ({}, {})",
                    shoulder_pos_rad,
                    elbow_pos_rad
                );
                assert!(
                    (solved.elbow_pos_rad - config.elbow_pos_rad).abs() < 1e-9,
                    "elbow mismatch at ({}, {})",
                    shoulder_pos_rad,
                    elbow_pos_rad
                );
            }
        }
    }

    #[test]
    fn test_validator_solver_agreement() {
        let arm = test_arm();

        // 0.01 m grid over the square containing the workspace, including
        // the exact outer boundary points and the base
        for i in -30..=30 {
            for j in -30..=30 {
                let target_pos_m = Vector2::new(i as f64 * 0.01, j as f64 * 0.01);

                let reachable = arm.is_target_reachable(&target_pos_m);
                let solution = arm.calc_inverse_kinematics(&target_pos_m);

                assert_eq!(
                    reachable,
                    solution.is_some(),
                    "disagreement at ({}, {})",
                    target_pos_m.x,
                    target_pos_m.y
                );

                if let Some(config) = solution {
                    // Solutions are on the positive elbow branch and place
                    // the head on the target
                    assert!(config.elbow_pos_rad >= 0.0);

                    let pos_m = arm.calc_forward_kinematics(&config);
                    assert!((pos_m - target_pos_m).norm() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_ik_degenerate_fold() {
        let arm = test_arm();

        let solved = arm.calc_inverse_kinematics(&Vector2::zeros()).unwrap();
        assert_eq!(solved.shoulder_pos_rad, 0.0);
        assert_eq!(solved.elbow_pos_rad, PI);

        let pos_m = arm.calc_forward_kinematics(&solved);
        assert!(pos_m.norm() < 1e-12);
    }

    #[test]
    fn test_gripper_tip() {
        let arm = test_arm();

        let tip_m = arm.calc_gripper_tip_pos_m(&ArmConfig {
            shoulder_pos_rad: 0.0,
            elbow_pos_rad: 0.0,
        });
        assert!((tip_m.x - 0.26).abs() < 1e-12);
        assert!(tip_m.y.abs() < 1e-12);
    }
}
