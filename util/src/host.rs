//! Host platform (linux for example) utility functions

use std::path::PathBuf;

use uname;

/// Retrieve uname information.
pub fn get_uname() -> std::io::Result<uname::Info> {
    uname::uname()
}

/// Get the software root directory.
///
/// The root is read from the `PLANAR_ARM_SW_ROOT` environment variable,
/// which shall point at the checkout containing the `params` and
/// `sessions` directories.
pub fn get_planar_arm_sw_root() -> Result<PathBuf, std::env::VarError> {
    std::env::var("PLANAR_ARM_SW_ROOT").map(PathBuf::from)
}
