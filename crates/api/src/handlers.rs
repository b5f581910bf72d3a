pub mod assisted;
pub mod timetable;
