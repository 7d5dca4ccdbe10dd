use std::env;
use std::path::PathBuf;

/// Get the path to the CSMS directory (~/.csms)
pub fn csms_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".csms")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .expect("Unable to get home directory")
            .join(".csms")
    }
}

/// Get the default record store directory (~/.csms/data)
pub fn default_data_dir() -> PathBuf {
    csms_dir().join("data")
}
