//! Platform backed by a device reachable through `adb`.
//!
//! Queries run synchronously; settings navigation is spawned and not awaited.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use super::error::PlatformError;
use super::platform::Platform;
use super::types::{SdkVersion, SettingsIntent};

/// App-op guarding exact alarms on API 31+.
const EXACT_ALARM_APP_OP: &str = "SCHEDULE_EXACT_ALARM";

#[derive(Debug, Clone)]
pub struct AdbPlatform {
    adb_path: PathBuf,
    serial: Option<String>,
    package_name: String,
    sdk_version: SdkVersion,
}

impl AdbPlatform {
    /// Connects to the device and reads its SDK level once.
    ///
    /// # Arguments
    /// * `adb_path` - Path to the `adb` executable
    /// * `serial` - Device serial, if more than one device is attached
    /// * `package_name` - Application id whose permission state is queried
    pub fn connect(
        adb_path: impl Into<PathBuf>,
        serial: Option<String>,
        package_name: impl Into<String>,
    ) -> Result<Self, PlatformError> {
        let mut platform = Self {
            adb_path: adb_path.into(),
            serial,
            package_name: package_name.into(),
            sdk_version: SdkVersion(0),
        };
        let output = platform.shell(&["getprop", "ro.build.version.sdk"])?;
        platform.sdk_version = parse_sdk_version(&output)?;
        info!(
            "Connected to device {} ({})",
            platform.serial.as_deref().unwrap_or("default"),
            platform.sdk_version
        );
        Ok(platform)
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.adb_path);
        if let Some(serial) = &self.serial {
            command.args(["-s", serial.as_str()]);
        }
        command
    }

    fn program(&self) -> String {
        self.adb_path.display().to_string()
    }

    /// Runs `adb shell <args>` and returns its standard output.
    fn shell(&self, args: &[&str]) -> Result<String, PlatformError> {
        let output = self
            .command()
            .arg("shell")
            .args(args)
            .output()
            .map_err(|e| PlatformError::Command {
                program: self.program(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(PlatformError::Command {
                program: self.program(),
                message: format!(
                    "{} exited with {}: {}",
                    args.join(" "),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Platform for AdbPlatform {
    fn sdk_version(&self) -> SdkVersion {
        self.sdk_version
    }

    fn can_schedule_exact_alarms(&self) -> bool {
        match self.shell(&["appops", "get", self.package_name.as_str(), EXACT_ALARM_APP_OP]) {
            Ok(output) => {
                let allowed = parse_app_op_allowed(&output);
                debug!("appops {} -> {:?}: {}", EXACT_ALARM_APP_OP, output.trim(), allowed);
                allowed
            }
            Err(e) => {
                warn!("Failed to query exact alarm permission: {}", e);
                false
            }
        }
    }

    fn launch(&self, intent: &SettingsIntent) -> Result<(), PlatformError> {
        let flags = format!("{:#x}", intent.flags);
        let mut child = self
            .command()
            .args(["shell", "am", "start", "-a", intent.action.as_str(), "-d"])
            .arg(intent.data.as_str())
            .args(["-f", flags.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlatformError::Command {
                program: self.program(),
                message: e.to_string(),
            })?;
        let pid = child.id();
        debug!("Spawned settings launch (pid {})", pid);

        // Reaped off the calling thread; callers never wait on the launch
        std::thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                warn!("Settings launch (pid {}) exited with {}", pid, status);
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to wait for settings launch (pid {}): {}", pid, e),
        });
        Ok(())
    }
}

/// Parses the output of `getprop ro.build.version.sdk`.
fn parse_sdk_version(output: &str) -> Result<SdkVersion, PlatformError> {
    output
        .trim()
        .parse::<u32>()
        .map(SdkVersion)
        .map_err(|e| PlatformError::UnexpectedOutput {
            message: format!("SDK version {:?}: {}", output.trim(), e),
        })
}

/// Parses `appops get <pkg> SCHEDULE_EXACT_ALARM` output, e.g.
/// `SCHEDULE_EXACT_ALARM: allow; time=+2d3h ago`.
///
/// Only an explicit `allow` counts as granted.
fn parse_app_op_allowed(output: &str) -> bool {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix(EXACT_ALARM_APP_OP))
        .filter_map(|rest| rest.trim_start().strip_prefix(':'))
        .any(|rest| {
            rest.split(';')
                .next()
                .is_some_and(|mode| mode.trim() == "allow")
        })
}
