/// Platform abstraction used by the capability bridge
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use super::error::PlatformError;
use super::types::{SdkVersion, SettingsIntent};

/// The device-side operations the capability bridge relies on.
pub trait Platform: Send + Sync {
    fn sdk_version(&self) -> SdkVersion;

    /// Live permission state; only meaningful on gated SDK versions.
    fn can_schedule_exact_alarms(&self) -> bool;

    /// Starts the settings screen described by `intent` and returns
    /// immediately.
    fn launch(&self, intent: &SettingsIntent) -> Result<(), PlatformError>;
}

impl<P: Platform + ?Sized> Platform for Arc<P> {
    fn sdk_version(&self) -> SdkVersion {
        (**self).sdk_version()
    }

    fn can_schedule_exact_alarms(&self) -> bool {
        (**self).can_schedule_exact_alarms()
    }

    fn launch(&self, intent: &SettingsIntent) -> Result<(), PlatformError> {
        (**self).launch(intent)
    }
}

/// A platform with a fixed SDK level and permission state.
///
/// Launch requests are logged and counted instead of shown to anyone. Only
/// the most recent intent is kept.
#[derive(Debug)]
pub struct StaticPlatform {
    sdk_version: SdkVersion,
    exact_alarms_allowed: bool,
    launch_count: AtomicUsize,
    last_launched: Mutex<Option<SettingsIntent>>,
}

impl StaticPlatform {
    pub fn new(sdk_version: SdkVersion, exact_alarms_allowed: bool) -> Self {
        Self {
            sdk_version,
            exact_alarms_allowed,
            launch_count: AtomicUsize::new(0),
            last_launched: Mutex::new(None),
        }
    }

    /// Number of intents launched so far.
    pub fn launch_count(&self) -> usize {
        self.launch_count.load(Ordering::Relaxed)
    }

    /// The most recently launched intent, if any.
    pub fn last_launched(&self) -> Option<SettingsIntent> {
        self.last_launched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Platform for StaticPlatform {
    fn sdk_version(&self) -> SdkVersion {
        self.sdk_version
    }

    fn can_schedule_exact_alarms(&self) -> bool {
        self.exact_alarms_allowed
    }

    fn launch(&self, intent: &SettingsIntent) -> Result<(), PlatformError> {
        info!("Launching {} for {}", intent.action, intent.data);
        self.launch_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_launched
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(intent.clone());
        Ok(())
    }
}
