//! # Planar Arm Control Executable
//!
//! Command line adapter around the arm control module. Parses a target
//! head position, runs a single move cycle, and leaves the joint and head
//! time series in the session archive for plotting.
//!
//! Usage:
//!
//!     arm_exec            Move to the predefined home position
//!     arm_exec <x> <y>    Move the head to (x, y) meters in the arm frame

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{error, info};
use std::env;

// Internal
use arm_lib::arm_ctrl::{ArmCmd, ArmCtrl, InputData};
use util::{
    archive::Archived,
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("arm_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Planar Arm Control Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- MODULE INITIALISATION ----

    let mut arm_ctrl = ArmCtrl::default();

    arm_ctrl
        .init("arm_ctrl.toml", &session)
        .wrap_err("Failed to initialise ArmCtrl")?;

    info!("ArmCtrl initialised");

    // ---- COMMAND PARSING ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    let cmd = match args.len() {
        1 => {
            info!("No target given, moving to the home position");
            ArmCmd::Home
        }
        3 => {
            let x_m: f64 = args[1]
                .parse()
                .wrap_err("Could not parse the target x coordinate")?;
            let y_m: f64 = args[2]
                .parse()
                .wrap_err("Could not parse the target y coordinate")?;

            info!("Moving the head to ({:.3}, {:.3}) m", x_m, y_m);

            ArmCmd::MoveTo { x_m, y_m }
        }
        _ => {
            return Err(eyre!(
                "Expected either zero or two arguments, found {}",
                args.len() - 1
            ))
        }
    };

    // ---- PROCESSING ----

    let input_data = InputData { cmd: Some(cmd) };

    match arm_ctrl.proc(&input_data) {
        Ok((output, report)) => {
            info!("Move accepted:");
            info!(
                "    Head position: ({:.3}, {:.3}) m",
                output.pos_m.x, output.pos_m.y
            );
            info!(
                "    Shoulder angle: {:.1} deg",
                output.config.shoulder_pos_rad.to_degrees()
            );
            info!(
                "    Elbow angle: {:.1} deg",
                output.config.elbow_pos_rad.to_degrees()
            );
            info!(
                "    Path: {} samples over {:.1} s",
                output.path.get_num_samples(),
                report.path_duration_s
            );

            // Archive the path time series and save the final snapshot
            arm_ctrl
                .write()
                .map_err(|e| eyre!("Failed to archive the path: {}", e))?;
            session.save("output.json", output);
        }
        Err(e) => {
            // A rejected move leaves the arm state unchanged, report it and
            // exit cleanly
            error!("Move rejected: {}", e);
        }
    }

    session.exit();

    Ok(())
}
