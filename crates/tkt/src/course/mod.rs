/// Course schedule module: parsing, projection and the widget view
mod error;
mod projector;
mod types;
mod view;
mod widget;

pub use error::{MalformedPart, ProjectionError, WeekdayError};
pub use projector::{parse_courses, project, Projection, Projector, ScheduleProjector};
pub use types::{CourseRecord, Weekday};
pub use view::{time_label, CourseRow, WidgetView};
pub use widget::{ScheduleWidget, COURSES_KEY};
