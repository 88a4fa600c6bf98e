//! DeviceInfo - banner supplied by the host application
//!
//! Written once at the top of every log file the file sink creates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator line framing the header block
pub const HEADER_RULE: &str = "**************";

/// Host device description
///
/// Created once per application session by the platform layer.
/// Empty strings are rendered as empty fields, content is never validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Operating system version
    pub os_version: String,

    /// Host application version
    pub app_version: String,

    /// Device model name
    pub device_model: String,
}

impl DeviceInfo {
    /// Create a new DeviceInfo
    pub fn new(
        os_version: impl Into<String>,
        app_version: impl Into<String>,
        device_model: impl Into<String>,
    ) -> Self {
        Self {
            os_version: os_version.into(),
            app_version: app_version.into(),
            device_model: device_model.into(),
        }
    }

    /// Render the header block written on first creation of a file
    ///
    /// ```text
    /// **************
    ///  
    /// Device Model: <model>
    /// OS Version: <os>
    /// App Version: <app>
    ///  
    /// **************
    /// ```
    pub fn header_block(&self) -> String {
        format!("{HEADER_RULE}\n \n{self}\n \n{HEADER_RULE}\n")
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Device Model: {}", self.device_model)?;
        writeln!(f, "OS Version: {}", self.os_version)?;
        write!(f, "App Version: {}", self.app_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_three_lines() {
        let info = DeviceInfo::new("1.0", "2.0", "Pixel");
        assert_eq!(
            info.to_string(),
            "Device Model: Pixel\nOS Version: 1.0\nApp Version: 2.0"
        );
    }

    #[test]
    fn test_header_block_layout() {
        let header = DeviceInfo::new("1.0", "2.0", "Pixel").header_block();
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(
            lines,
            vec![
                "**************",
                " ",
                "Device Model: Pixel",
                "OS Version: 1.0",
                "App Version: 2.0",
                " ",
                "**************",
            ]
        );
        assert!(header.ends_with('\n'));
    }

    #[test]
    fn test_empty_fields_render_empty() {
        let info = DeviceInfo::default();
        assert_eq!(info.to_string(), "Device Model: \nOS Version: \nApp Version: ");
    }
}
