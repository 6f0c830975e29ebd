//! Today's schedule as read from the preference store.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::ProjectionError;
use super::projector::{Projection, Projector, ScheduleProjector};
use super::types::Weekday;
use super::view::WidgetView;
use crate::store::PreferenceStore;

/// Key under which the app stores its serialized course list.
pub const COURSES_KEY: &str = "courses_data";

/// Reads the stored course list on every request and projects it.
///
/// Nothing is cached; each call takes a fresh snapshot of the store.
pub struct ScheduleWidget {
    store: Arc<dyn PreferenceStore>,
    courses_key: String,
    projector: Box<dyn Projector>,
}

impl ScheduleWidget {
    /// Creates a widget reading `courses_key` with the default projector.
    pub fn new(store: Arc<dyn PreferenceStore>, courses_key: impl Into<String>) -> Self {
        Self::with_projector(store, courses_key, ScheduleProjector)
    }

    pub fn with_projector(
        store: Arc<dyn PreferenceStore>,
        courses_key: impl Into<String>,
        projector: impl Projector + 'static,
    ) -> Self {
        Self {
            store,
            courses_key: courses_key.into(),
            projector: Box::new(projector),
        }
    }

    /// Projects the stored courses onto `day`, keeping the error distinct.
    pub fn project_for(&self, day: Weekday) -> Result<Projection, ProjectionError> {
        let raw_courses = self.store.get(&self.courses_key);
        self.projector.project(raw_courses.as_deref(), day)
    }

    /// Builds the widget view for `day`.
    pub fn view_for(&self, day: Weekday) -> WidgetView {
        let outcome = self.project_for(day);
        match &outcome {
            Ok(projection) => info!(
                "Rendering {} course(s) for day {}",
                projection.courses().len(),
                day
            ),
            Err(e) => warn!("Showing empty schedule, stored courses are unusable: {}", e),
        }
        WidgetView::from_outcome(&outcome)
    }

    /// Builds the widget view for the current local weekday.
    pub fn view_today(&self) -> WidgetView {
        self.view_for(Weekday::today())
    }
}

impl std::fmt::Debug for ScheduleWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleWidget")
            .field("courses_key", &self.courses_key)
            .finish_non_exhaustive()
    }
}
