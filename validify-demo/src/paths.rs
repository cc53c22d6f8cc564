//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "norpie";
const APPLICATION: &str = "validify";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Default location of the engine configuration.
///
/// - Linux: `$XDG_CONFIG_HOME/validify/config.json` or `~/.config/validify/config.json`
/// - macOS: `~/Library/Application Support/dev.norpie.validify/config.json`
/// - Windows: `C:\Users\<User>\AppData\Roaming\norpie\validify\config\config.json`
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}
