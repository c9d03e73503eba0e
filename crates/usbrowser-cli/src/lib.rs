use clap::ValueEnum;
use std::path::PathBuf;

pub mod commands;

/// System-wide config, read first
pub const SYSTEM_CONFIG: &str = "/etc/usbrowser.yaml";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Config files in the order they are layered: system, then user
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG)];
    match dirs::home_dir() {
        Some(home) => paths.push(home.join(".config").join("usbrowser.yaml")),
        None => tracing::debug!("No home directory, skipping user config"),
    }
    paths
}

/// Accept only URLs the launcher knows how to hand to a browser
///
/// `http`, `https` and `ext+container` URLs pass, as does anything without a
/// `://` separator. Host, port and path are not checked.
pub fn validate_url(url: &str) -> Result<String, String> {
    let allowed = url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("ext+container:")
        || !url.contains("://");

    if !allowed {
        return Err(format!("Not an HTTP/HTTPS URL: {}", url));
    }

    Ok(url.to_string())
}
