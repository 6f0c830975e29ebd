//! Projection of the stored course list onto a single day.

use serde_json::Value;
use tracing::debug;

use super::error::ProjectionError;
use super::types::{CourseRecord, Weekday};

/// Outcome of a successful projection.
///
/// "Nothing stored" and "nothing today" are kept apart so callers can tell
/// them from each other, even though the widget renders both the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// No course data has ever been stored
    NoData,
    /// Course data exists, but none of it falls on the requested day
    NoneToday,
    /// Courses for the requested day, ordered by start slot
    Courses(Vec<CourseRecord>),
}

impl Projection {
    pub fn courses(&self) -> &[CourseRecord] {
        match self {
            Projection::Courses(courses) => courses,
            Projection::NoData | Projection::NoneToday => &[],
        }
    }

    pub fn into_courses(self) -> Vec<CourseRecord> {
        match self {
            Projection::Courses(courses) => courses,
            Projection::NoData | Projection::NoneToday => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.courses().is_empty()
    }
}

/// Turns a serialized course collection into the courses of a single day.
pub trait Projector: Send + Sync {
    fn project(
        &self,
        raw_courses: Option<&str>,
        today: Weekday,
    ) -> Result<Projection, ProjectionError>;
}

/// The default projector: filters by weekday and orders by start slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleProjector;

impl Projector for ScheduleProjector {
    fn project(
        &self,
        raw_courses: Option<&str>,
        today: Weekday,
    ) -> Result<Projection, ProjectionError> {
        project(raw_courses, today)
    }
}

/// Projects the stored course collection onto `today`.
///
/// # Arguments
/// * `raw_courses` - The stored collection, or `None` if nothing was ever stored
/// * `today` - The day to project onto
///
/// # Returns
/// * `Ok(Projection)` - The courses of the day, sorted by start slot (stable)
/// * `Err(ProjectionError::Malformed)` - If any part of the data fails to parse
pub fn project(raw_courses: Option<&str>, today: Weekday) -> Result<Projection, ProjectionError> {
    let Some(raw_courses) = raw_courses else {
        debug!("No stored course data");
        return Ok(Projection::NoData);
    };

    let courses = parse_courses(raw_courses)?;
    let total = courses.len();

    let mut todays: Vec<CourseRecord> = courses.into_iter().filter(|c| c.is_on(today)).collect();
    // sort_by_key is stable, so courses sharing a start slot keep their stored order
    todays.sort_by_key(|c| c.start_slot);

    debug!("Projected {} of {} courses onto day {}", todays.len(), total, today);

    if todays.is_empty() {
        Ok(Projection::NoneToday)
    } else {
        Ok(Projection::Courses(todays))
    }
}

/// Parses the stored collection.
///
/// The collection is a JSON array whose elements are themselves serialized
/// course objects. Elements stored inline as objects are accepted as well.
/// Parsing is all-or-nothing.
pub fn parse_courses(raw_courses: &str) -> Result<Vec<CourseRecord>, ProjectionError> {
    let elements: Vec<Value> = serde_json::from_str(raw_courses)
        .map_err(|e| ProjectionError::collection(e.to_string()))?;

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| parse_course(index, element))
        .collect()
}

fn parse_course(index: usize, element: Value) -> Result<CourseRecord, ProjectionError> {
    let parsed = match element {
        Value::String(s) => serde_json::from_str(&s),
        Value::Object(_) => serde_json::from_value(element),
        other => {
            return Err(ProjectionError::record(
                index,
                format!("expected a serialized course, found {other}"),
            ))
        }
    };
    parsed.map_err(|e| ProjectionError::record(index, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::MalformedPart;

    fn encode(courses: &[CourseRecord]) -> String {
        let elements: Vec<String> = courses
            .iter()
            .map(|c| serde_json::to_string(c).unwrap())
            .collect();
        serde_json::to_string(&elements).unwrap()
    }

    fn day(code: u8) -> Weekday {
        Weekday::new(code).unwrap()
    }

    #[test]
    fn test_project_orders_todays_courses() {
        let raw = encode(&[
            CourseRecord::new("Math", "A101", 3, 4, 2),
            CourseRecord::new("Lab", "B2", 1, 2, 2),
            CourseRecord::new("PE", "Gym", 1, 1, 3),
        ]);

        let projection = project(Some(&raw), day(2)).unwrap();
        let names: Vec<_> = projection.courses().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Lab", "Math"]);
        assert_eq!(projection.courses()[0].start_slot, 1);
        assert_eq!(projection.courses()[0].end_slot, 2);
    }

    #[test]
    fn test_project_only_returns_requested_day() {
        let raw = encode(&[
            CourseRecord::new("A", "", 1, 1, 1),
            CourseRecord::new("B", "", 2, 2, 5),
            CourseRecord::new("C", "", 3, 3, 1),
            CourseRecord::new("D", "", 4, 4, 7),
        ]);

        for code in 1..=7 {
            let projection = project(Some(&raw), day(code)).unwrap();
            assert!(projection
                .courses()
                .iter()
                .all(|c| c.day_of_week == i32::from(code)));
        }
    }

    #[test]
    fn test_project_is_stable_on_equal_slots() {
        let raw = encode(&[
            CourseRecord::new("Second period", "", 2, 3, 4),
            CourseRecord::new("First", "", 1, 1, 4),
            CourseRecord::new("Also first", "", 1, 2, 4),
            CourseRecord::new("Still first", "", 1, 1, 4),
        ]);

        let names: Vec<_> = project(Some(&raw), day(4))
            .unwrap()
            .into_courses()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["First", "Also first", "Still first", "Second period"]);
    }

    #[test]
    fn test_project_without_data() {
        assert_eq!(project(None, day(1)), Ok(Projection::NoData));
        assert!(project(None, day(7)).unwrap().is_empty());
    }

    #[test]
    fn test_project_with_nothing_today() {
        let raw = encode(&[CourseRecord::new("PE", "Gym", 1, 1, 3)]);
        let projection = project(Some(&raw), day(5)).unwrap();
        assert_eq!(projection, Projection::NoneToday);
        assert_ne!(projection, Projection::NoData);
    }

    #[test]
    fn test_project_empty_collection() {
        assert_eq!(project(Some("[]"), day(1)), Ok(Projection::NoneToday));
    }

    #[test]
    fn test_project_rejects_text_slot() {
        let raw = serde_json::to_string(&[
            r#"{"name":"Math","classroom":"A","start_slot":3,"end_slot":4,"day_of_week":2}"#,
            r#"{"name":"Lab","classroom":"B","start_slot":"one","end_slot":2,"day_of_week":2}"#,
        ])
        .unwrap();

        let err = project(Some(&raw), day(2)).unwrap_err();
        assert_eq!(err.part(), MalformedPart::Record(1));
    }

    #[test]
    fn test_project_rejects_missing_field() {
        let raw = serde_json::to_string(&[r#"{"name":"Math","start_slot":3,"end_slot":4,"day_of_week":2}"#])
            .unwrap();
        let err = project(Some(&raw), day(2)).unwrap_err();
        assert_eq!(err.part(), MalformedPart::Record(0));
    }

    #[test]
    fn test_project_rejects_malformed_collection() {
        for raw in ["", "not json", "{}", r#"{"name":"Math"}"#, "[1, 2"] {
            let err = project(Some(raw), day(1)).unwrap_err();
            assert_eq!(err.part(), MalformedPart::Collection, "input: {raw:?}");
        }
    }

    #[test]
    fn test_project_rejects_non_record_elements() {
        let err = project(Some("[42]"), day(1)).unwrap_err();
        assert_eq!(err.part(), MalformedPart::Record(0));

        let err = project(Some(r#"["not a course"]"#), day(1)).unwrap_err();
        assert_eq!(err.part(), MalformedPart::Record(0));
    }

    #[test]
    fn test_project_malformed_on_other_day_still_fails() {
        // A bad record on another day must not be skipped silently.
        let raw = serde_json::to_string(&[
            r#"{"name":"Math","classroom":"A","start_slot":3,"end_slot":4,"day_of_week":2}"#,
            r#"{"name":"PE","classroom":"Gym","start_slot":1,"end_slot":1,"day_of_week":"Wed"}"#,
        ])
        .unwrap();
        assert!(project(Some(&raw), day(2)).is_err());
    }

    #[test]
    fn test_project_accepts_inline_objects() {
        let raw = r#"[{"name":"Math","classroom":"A","start_slot":3,"end_slot":4,"day_of_week":2,"color":"red"}]"#;
        let projection = project(Some(raw), day(2)).unwrap();
        assert_eq!(projection.courses(), [CourseRecord::new("Math", "A", 3, 4, 2)]);
    }

    #[test]
    fn test_project_passes_inverted_slots_through() {
        let raw = encode(&[CourseRecord::new("Odd", "", 5, 2, 1)]);
        let projection = project(Some(&raw), day(1)).unwrap();
        assert_eq!(projection.courses()[0].start_slot, 5);
        assert_eq!(projection.courses()[0].end_slot, 2);
    }

    #[test]
    fn test_schedule_projector_trait() {
        let projector: &dyn Projector = &ScheduleProjector;
        assert_eq!(projector.project(None, day(3)), Ok(Projection::NoData));
    }
}
