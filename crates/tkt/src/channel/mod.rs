//! Method-call dispatch between the host shell and this core.
//!
//! Each call runs to completion synchronously and produces either a JSON
//! value or a [`ChannelError`]. Unknown methods are answered with
//! [`ChannelError::NotImplemented`].

mod error;

pub use error::ChannelError;

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::alarm::CapabilityBridge;
use crate::course::{ScheduleWidget, Weekday};

/// Name under which the host registers this channel.
pub const CHANNEL_NAME: &str = "com.example.tkt/exact_alarm";

/// Methods understood by the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    IsExactAlarmAllowed,
    OpenExactAlarmSettings,
    TodayCourses,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::IsExactAlarmAllowed => "isExactAlarmAllowed",
            Method::OpenExactAlarmSettings => "openExactAlarmSettings",
            Method::TodayCourses => "todayCourses",
        }
    }
}

impl FromStr for Method {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isExactAlarmAllowed" => Ok(Method::IsExactAlarmAllowed),
            "openExactAlarmSettings" => Ok(Method::OpenExactAlarmSettings),
            "todayCourses" => Ok(Method::TodayCourses),
            _ => Err(ChannelError::NotImplemented {
                method: s.to_string(),
            }),
        }
    }
}

/// A single invocation coming from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Value::Null,
        }
    }

    pub fn with_arguments(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Arguments accepted by `todayCourses`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TodayCoursesArgs {
    /// Overrides the local weekday (1 = Monday ... 7 = Sunday)
    day: Option<u8>,
}

/// Routes method calls to the capability bridge and the schedule widget.
pub struct MethodChannel {
    bridge: Arc<dyn CapabilityBridge>,
    widget: Arc<ScheduleWidget>,
}

impl MethodChannel {
    pub fn new(bridge: Arc<dyn CapabilityBridge>, widget: Arc<ScheduleWidget>) -> Self {
        Self { bridge, widget }
    }

    /// Handles one call.
    pub fn invoke(&self, call: &MethodCall) -> Result<Value, ChannelError> {
        let method = match call.method.parse::<Method>() {
            Ok(method) => method,
            Err(e) => {
                info!("Rejecting call on {}: {}", CHANNEL_NAME, e);
                return Err(e);
            }
        };
        debug!("Invoking {} on {}", method.as_str(), CHANNEL_NAME);

        match method {
            Method::IsExactAlarmAllowed => Ok(Value::Bool(self.bridge.query_exact_alarm_allowed())),
            Method::OpenExactAlarmSettings => {
                self.bridge.request_exact_alarm_settings_navigation();
                Ok(Value::Bool(true))
            }
            Method::TodayCourses => {
                let day = today_courses_day(method, &call.arguments)?;
                let view = self.widget.view_for(day);
                Ok(json!(view))
            }
        }
    }
}

fn today_courses_day(method: Method, arguments: &Value) -> Result<Weekday, ChannelError> {
    let invalid = |message: String| ChannelError::InvalidArgument {
        method: method.as_str().to_string(),
        message,
    };

    let args: TodayCoursesArgs = if arguments.is_null() {
        TodayCoursesArgs::default()
    } else {
        serde_json::from_value(arguments.clone()).map_err(|e| invalid(e.to_string()))?
    };

    match args.day {
        Some(code) => Weekday::new(code).map_err(|e| invalid(e.to_string())),
        None => Ok(Weekday::today()),
    }
}

impl std::fmt::Debug for MethodChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodChannel")
            .field("name", &CHANNEL_NAME)
            .field("widget", &self.widget)
            .finish_non_exhaustive()
    }
}
