/// Render-facing view of today's schedule
use serde::Serialize;

use super::error::ProjectionError;
use super::projector::Projection;
use super::types::CourseRecord;

/// Label shown under a course name, e.g. "第 1-2 節" (periods 1-2).
pub fn time_label(start_slot: i32, end_slot: i32) -> String {
    format!("第 {start_slot}-{end_slot} 節")
}

/// A single row in the widget's course list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRow {
    pub name: String,
    pub time_label: String,
}

impl From<&CourseRecord> for CourseRow {
    fn from(course: &CourseRecord) -> Self {
        Self {
            name: course.name.clone(),
            time_label: time_label(course.start_slot, course.end_slot),
        }
    }
}

/// What the widget shows: either the course list or the empty placeholder,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "courses", rename_all = "snake_case")]
pub enum WidgetView {
    Courses(Vec<CourseRow>),
    Empty,
}

impl WidgetView {
    /// Builds the view from a projection outcome.
    ///
    /// Missing data, malformed data and an empty day all render as the
    /// placeholder. Malformed data is never partially shown.
    pub fn from_outcome(outcome: &Result<Projection, ProjectionError>) -> Self {
        match outcome {
            Ok(Projection::Courses(courses)) if !courses.is_empty() => {
                WidgetView::Courses(courses.iter().map(CourseRow::from).collect())
            }
            Ok(_) | Err(_) => WidgetView::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, WidgetView::Empty)
    }

    pub fn rows(&self) -> &[CourseRow] {
        match self {
            WidgetView::Courses(rows) => rows,
            WidgetView::Empty => &[],
        }
    }
}
