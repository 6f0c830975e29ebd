/// Types shared by the alarm capability bridge and its platforms
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::PlatformError;

/// Settings action that lets the user grant exact-alarm scheduling.
pub const ACTION_REQUEST_SCHEDULE_EXACT_ALARM: &str =
    "android.settings.REQUEST_SCHEDULE_EXACT_ALARM";

/// `Intent.FLAG_ACTIVITY_NEW_TASK`
pub const FLAG_ACTIVITY_NEW_TASK: u32 = 0x1000_0000;

/// Platform API level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SdkVersion(pub u32);

impl SdkVersion {
    /// Android 12 (API 31), the first release gating exact alarms.
    pub const S: Self = Self(31);

    /// Returns true if exact alarms need an explicit user grant on this version.
    pub fn gates_exact_alarms(self) -> bool {
        self >= Self::S
    }
}

impl std::fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API {}", self.0)
    }
}

/// A request to open a platform settings screen for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsIntent {
    pub action: String,
    /// `package:<application id>`
    pub data: Url,
    pub flags: u32,
}

impl SettingsIntent {
    /// The exact-alarm permission screen for `package_name`.
    pub fn request_schedule_exact_alarm(package_name: &str) -> Result<Self, PlatformError> {
        let data = package_uri(package_name)?;
        Ok(Self {
            action: ACTION_REQUEST_SCHEDULE_EXACT_ALARM.to_string(),
            data,
            flags: FLAG_ACTIVITY_NEW_TASK,
        })
    }
}

fn package_uri(package_name: &str) -> Result<Url, PlatformError> {
    let invalid = |message: String| PlatformError::InvalidPackage {
        package: package_name.to_string(),
        message,
    };

    // Application ids are dot-separated Java identifiers
    let valid = !package_name.is_empty()
        && package_name.split('.').all(|segment| {
            !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    if !valid {
        return Err(invalid("not a valid application id".to_string()));
    }

    Url::parse(&format!("package:{package_name}")).map_err(|e| invalid(e.to_string()))
}

/// Acknowledgement that a request was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Acknowledged;
