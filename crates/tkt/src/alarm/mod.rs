//! Exact-alarm capability bridge.
//!
//! Answers whether the app may schedule exact alarms and forwards the user
//! to the platform settings screen where the permission can be granted.
//! Actual alarm scheduling happens elsewhere.

mod adb;
mod error;
mod platform;
mod types;

pub use adb::AdbPlatform;
pub use error::PlatformError;
pub use platform::{Platform, StaticPlatform};
pub use types::*;

use tracing::{debug, info, warn};

/// The capability operations exposed to the host shell.
pub trait CapabilityBridge: Send + Sync {
    /// Whether the app may currently schedule exact alarms.
    fn query_exact_alarm_allowed(&self) -> bool;

    /// Opens the permission settings screen without waiting for the user.
    ///
    /// Callers re-check with [`CapabilityBridge::query_exact_alarm_allowed`].
    fn request_exact_alarm_settings_navigation(&self) -> Acknowledged;
}

/// Capability bridge backed by a [`Platform`].
pub struct AlarmCapabilityBridge {
    platform: Box<dyn Platform>,
    settings_intent: SettingsIntent,
}

impl AlarmCapabilityBridge {
    /// Creates a bridge for the application `package_name`.
    pub fn new(
        platform: impl Platform + 'static,
        package_name: &str,
    ) -> Result<Self, PlatformError> {
        Ok(Self {
            platform: Box::new(platform),
            settings_intent: SettingsIntent::request_schedule_exact_alarm(package_name)?,
        })
    }

    pub fn settings_intent(&self) -> &SettingsIntent {
        &self.settings_intent
    }
}

impl CapabilityBridge for AlarmCapabilityBridge {
    fn query_exact_alarm_allowed(&self) -> bool {
        let sdk = self.platform.sdk_version();
        if !sdk.gates_exact_alarms() {
            debug!("Exact alarms are not gated on {}", sdk);
            return true;
        }
        let allowed = self.platform.can_schedule_exact_alarms();
        debug!("Exact alarms allowed on {}: {}", sdk, allowed);
        allowed
    }

    fn request_exact_alarm_settings_navigation(&self) -> Acknowledged {
        let sdk = self.platform.sdk_version();
        if !sdk.gates_exact_alarms() {
            debug!("No exact alarm settings on {}, nothing to open", sdk);
            return Acknowledged;
        }

        info!("Opening exact alarm settings for {}", self.settings_intent.data);
        if let Err(e) = self.platform.launch(&self.settings_intent) {
            warn!("Failed to open exact alarm settings: {}", e);
        }
        Acknowledged
    }
}

impl std::fmt::Debug for AlarmCapabilityBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmCapabilityBridge")
            .field("settings_intent", &self.settings_intent)
            .finish_non_exhaustive()
    }
}
