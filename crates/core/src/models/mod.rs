pub mod clock;
pub mod external;
pub mod request;
pub mod timetable;
