// browserstore platform paths
// Linux follows XDG; macOS uses Application Support; Windows uses %APPDATA%.

use std::env;
use std::path::PathBuf;

const APP_DIR_UNIX: &str = "browserstore";
#[cfg_attr(not(any(target_os = "macos", target_os = "windows")), allow(dead_code))]
const APP_DIR_BUNDLE: &str = "BrowserStore";

fn home_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    let var = "USERPROFILE";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";
    PathBuf::from(env::var(var).unwrap_or_else(|_| env::temp_dir().to_string_lossy().to_string()))
}

/// Resolves `$<xdg_var>/browserstore`, falling back to `~/<fallback>/browserstore`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn xdg_dir(xdg_var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(xdg_var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join(APP_DIR_UNIX),
        _ => fallback
            .iter()
            .fold(home_dir(), |path, part| path.join(part))
            .join(APP_DIR_UNIX),
    }
}

/// Directory for the prefs file.
///
/// - **Linux**: `$XDG_CONFIG_HOME/browserstore` or `~/.config/browserstore`
/// - **macOS**: `~/Library/Application Support/BrowserStore`
/// - **Windows**: `%APPDATA%/BrowserStore`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR_BUNDLE)
    }
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
            .join(APP_DIR_BUNDLE)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
}

/// Directory for the clients and tabs database.
///
/// - **Linux**: `$XDG_DATA_HOME/browserstore` or `~/.local/share/browserstore`
/// - **macOS** and **Windows**: same as [`get_config_dir`]
pub fn get_data_dir() -> PathBuf {
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        get_config_dir()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"])
    }
}
