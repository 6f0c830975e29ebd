use std::sync::Arc;

use crate::channel::MethodChannel;
use crate::course::ScheduleWidget;

/// State shared by all request handlers.
#[derive(Debug)]
pub struct AppState {
    pub widget: Arc<ScheduleWidget>,
    pub channel: MethodChannel,
}

impl AppState {
    pub fn new(widget: Arc<ScheduleWidget>, channel: MethodChannel) -> Self {
        Self { widget, channel }
    }
}
