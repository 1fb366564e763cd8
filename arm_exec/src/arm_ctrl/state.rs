//! Implementations for the ArmCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::Vector2;
use serde::Serialize;

// Internal
use super::{ArmCmd, ArmConfig, Params, Path};
use util::{
    archive::{Archived, Archiver},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Arm control module state.
///
/// The single owner of the arm's configuration, head position and playback
/// path. Only command execution inside [`State::proc`] mutates these, and
/// always as one unit.
pub struct ArmCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,
    pub(crate) arch_path: Archiver,

    pub(crate) current_cmd: Option<ArmCmd>,

    pub(crate) current_config: ArmConfig,

    pub(crate) current_pos_m: Vector2<f64>,

    pub(crate) path: Path,
}

/// Input data to Arm Control.
#[derive(Default)]
pub struct InputData {
    /// The command to be executed, or `None` if there is no new command on
    /// this cycle.
    pub cmd: Option<ArmCmd>,
}

/// Output data from Arm Control.
///
/// A self-contained snapshot of the arm taken after the cycle's
/// processing. Renderers and plotters read this copy; the module never
/// hands out a reference that a later move would mutate under them.
#[derive(Clone, Serialize, Debug)]
pub struct OutputData {
    /// The configuration the arm is settling into.
    pub config: ArmConfig,

    /// Head position consistent with `config`.
    ///
    /// Units: meters
    pub pos_m: Vector2<f64>,

    /// Gripper tip position derived from `config` and the gripper offset.
    ///
    /// Units: meters
    pub gripper_tip_pos_m: Vector2<f64>,

    /// The playback path from the previous configuration to `config`.
    pub path: Path,
}

/// Status report for ArmCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// True if a new path was generated on this cycle.
    pub path_generated: bool,

    /// Duration of the most recently generated path.
    ///
    /// Units: seconds
    pub path_duration_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ArmCtrl {
    fn default() -> Self {
        ArmCtrl {
            params: Params::default(),
            report: StatusReport::default(),
            arch_path: Archiver::default(),
            current_cmd: None,
            current_config: ArmConfig::default(),
            current_pos_m: Vector2::zeros(),
            path: Path::new_empty(),
        }
    }
}

impl State for ArmCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = super::ArmCtrlError;

    /// Initialise the ArmCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(
        &mut self,
        init_data: Self::InitData,
        session: &Session,
    ) -> Result<(), Self::InitError> {
        // Load the parameters
        self.params = match params::load(init_data) {
            Ok(p) => p,
            Err(e) => return Err(e),
        };

        // Start from the predefined initial pose
        self.current_config = ArmConfig {
            shoulder_pos_rad: self.params.init_shoulder_pos_rad,
            elbow_pos_rad: self.params.init_elbow_pos_rad,
        };
        self.current_pos_m = self.calc_forward_kinematics(&self.current_config);

        // Settling path into the initial pose, so consumers have a full
        // playback sequence before the first commanded move
        let config = self.current_config;
        self.path = self.generate_path(&config, &config);

        // Create the arch folder for arm_ctrl
        let mut arch_path = session.arch_root.clone();
        arch_path.push("arm_ctrl");
        std::fs::create_dir_all(arch_path).unwrap();

        // Initialise the archivers
        self.arch_path = Archiver::from_path(session, "arm_ctrl/path.csv").unwrap();

        Ok(())
    }

    /// Perform cyclic processing of Arm Control.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        // Clear the status report
        self.report = StatusReport::default();

        // Check to see if there's a new command
        if let Some(cmd) = input_data.cmd {
            // Update the internal copy of the command
            self.current_cmd = Some(cmd);

            // Output the command in debug mode
            debug!("New ArmCtrl ArmCmd::{:#?}", cmd);

            // Execute the command. On failure this leaves the arm state
            // untouched and the error propagates to the caller.
            self.exec_current_cmd()?;
        }

        Ok((self.get_output(), self.report))
    }
}

impl ArmCtrl {
    /// Get a snapshot of the arm for consumers.
    pub fn get_output(&self) -> OutputData {
        OutputData {
            config: self.current_config,
            pos_m: self.current_pos_m,
            gripper_tip_pos_m: self.calc_gripper_tip_pos_m(&self.current_config),
            path: self.path.clone(),
        }
    }

    /// Execute the current command.
    ///
    /// A valid command should be set in `self.current_cmd` before calling
    /// this function.
    fn exec_current_cmd(&mut self) -> Result<(), super::ArmCtrlError> {
        // Check we have a valid command
        let cmd = match self.current_cmd {
            Some(c) => c,
            None => return Err(super::ArmCtrlError::NoArmCmd),
        };

        if !cmd.is_valid() {
            return Err(super::ArmCtrlError::InvalidArmCmd(cmd));
        }

        // Resolve the commanded target in the arm frame
        let target_pos_m = match cmd {
            ArmCmd::MoveTo { x_m, y_m } => Vector2::new(x_m, y_m),
            ArmCmd::Home => Vector2::new(self.params.home_pos_m[0], self.params.home_pos_m[1]),
        };

        self.move_to(target_pos_m)
    }

    /// Move the head of the arm to the given target.
    ///
    /// On success the current configuration, head position and path are
    /// replaced together. On any failure the arm state is left untouched;
    /// there is no partially applied move and no retry.
    fn move_to(&mut self, target_pos_m: Vector2<f64>) -> Result<(), super::ArmCtrlError> {
        if !self.is_target_reachable(&target_pos_m) {
            return Err(super::ArmCtrlError::TargetOutOfWorkspace(
                target_pos_m.x,
                target_pos_m.y,
            ));
        }

        // Backstop for acos-domain edge cases the annulus check lets
        // through
        let target_config = match self.calc_inverse_kinematics(&target_pos_m) {
            Some(c) => c,
            None => {
                return Err(super::ArmCtrlError::NoIkSolution(
                    target_pos_m.x,
                    target_pos_m.y,
                ))
            }
        };

        let path = self.generate_path(&self.current_config, &target_config);

        self.report.path_generated = true;
        self.report.path_duration_s = path.duration_s();

        self.current_config = target_config;
        self.current_pos_m = target_pos_m;
        self.path = path;

        Ok(())
    }
}

impl Archived for ArmCtrl {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        // One record per path sample, giving the joint and head time series
        // for the whole move
        for sample in self.path.samples.iter() {
            self.arch_path.serialise(sample)?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::super::{ArmCtrlError, NUM_PATH_STEPS};
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    /// An ArmCtrl set up as `init` would leave it, minus the parameter file
    /// and session archive plumbing.
    fn test_arm() -> ArmCtrl {
        let mut arm = ArmCtrl {
            params: Params {
                shoulder_length_m: 0.12,
                elbow_length_m: 0.12,
                gripper_length_m: 0.02,
                home_pos_m: [0.14, 0.14],
                init_shoulder_pos_rad: FRAC_PI_2,
                init_elbow_pos_rad: 0.0,
            },
            ..ArmCtrl::default()
        };

        arm.current_config = ArmConfig {
            shoulder_pos_rad: arm.params.init_shoulder_pos_rad,
            elbow_pos_rad: arm.params.init_elbow_pos_rad,
        };
        arm.current_pos_m = arm.calc_forward_kinematics(&arm.current_config);
        let config = arm.current_config;
        arm.path = arm.generate_path(&config, &config);

        arm
    }

    #[test]
    fn test_settling_path() {
        let arm = test_arm();

        // The settling path plays the initial pose for the base duration
        assert_eq!(arm.path.get_num_samples(), NUM_PATH_STEPS + 1);
        assert_eq!(arm.path.duration_s(), 15.0);
        assert_eq!(arm.path.samples[0].config(), arm.current_config);
        assert_eq!(arm.path.samples[NUM_PATH_STEPS].config(), arm.current_config);
    }

    #[test]
    fn test_move_scenario() {
        let mut arm = test_arm();

        let input_data = InputData {
            cmd: Some(ArmCmd::MoveTo {
                x_m: 0.14,
                y_m: 0.14,
            }),
        };

        let (output, report) = arm.proc(&input_data).unwrap();

        assert!(report.path_generated);
        assert_eq!(output.pos_m, Vector2::new(0.14, 0.14));
        assert_eq!(output.path.get_num_samples(), NUM_PATH_STEPS + 1);

        // The path starts at the initial pose and ends exactly on the
        // solved configuration
        assert_eq!(
            output.path.samples[0].config(),
            ArmConfig {
                shoulder_pos_rad: FRAC_PI_2,
                elbow_pos_rad: 0.0,
            }
        );
        assert_eq!(output.path.samples[NUM_PATH_STEPS].config(), output.config);

        // The solved configuration places the head on the target
        let head_pos_m = arm.calc_forward_kinematics(&output.config);
        assert!((head_pos_m - Vector2::new(0.14, 0.14)).norm() < 1e-9);

        // Duration scales with the largest joint distance of this move
        let max_dist_rad = (output.config.shoulder_pos_rad - FRAC_PI_2)
            .abs()
            .max(output.config.elbow_pos_rad.abs());
        assert!((report.path_duration_s - (15.0 + 10.0 * max_dist_rad)).abs() < 1e-12);
    }

    #[test]
    fn test_home_cmd() {
        let mut arm = test_arm();

        let (output, report) = arm
            .proc(&InputData {
                cmd: Some(ArmCmd::Home),
            })
            .unwrap();

        assert!(report.path_generated);
        assert_eq!(output.pos_m, Vector2::new(0.14, 0.14));

        let head_pos_m = arm.calc_forward_kinematics(&output.config);
        assert!((head_pos_m - Vector2::new(0.14, 0.14)).norm() < 1e-9);
    }

    #[test]
    fn test_failed_move_atomicity() {
        let mut arm = test_arm();

        let config_before = arm.current_config;
        let pos_before_m = arm.current_pos_m;
        let path_before = arm.path.clone();

        // Clearly outside the workspace for 0.12 m links
        let result = arm.proc(&InputData {
            cmd: Some(ArmCmd::MoveTo {
                x_m: 10.0,
                y_m: 10.0,
            }),
        });

        assert!(matches!(
            result,
            Err(ArmCtrlError::TargetOutOfWorkspace(_, _))
        ));

        // The arm state is untouched by the rejected move
        assert_eq!(arm.current_config, config_before);
        assert_eq!(arm.current_pos_m, pos_before_m);
        assert_eq!(arm.path, path_before);
    }

    #[test]
    fn test_invalid_cmd() {
        let mut arm = test_arm();

        let config_before = arm.current_config;
        let path_before = arm.path.clone();

        let result = arm.proc(&InputData {
            cmd: Some(ArmCmd::MoveTo {
                x_m: std::f64::NAN,
                y_m: 0.1,
            }),
        });

        assert!(matches!(result, Err(ArmCtrlError::InvalidArmCmd(_))));
        assert_eq!(arm.current_config, config_before);
        assert_eq!(arm.path, path_before);
    }

    #[test]
    fn test_no_cmd_passthrough() {
        let mut arm = test_arm();

        let config_before = arm.current_config;
        let path_before = arm.path.clone();

        let (output, report) = arm.proc(&InputData { cmd: None }).unwrap();

        // No command means no new path and no state change, the output is
        // just a snapshot of the arm as it stands
        assert!(!report.path_generated);
        assert_eq!(output.config, config_before);
        assert_eq!(output.path, path_before);
        assert_eq!(arm.current_config, config_before);
    }
}
