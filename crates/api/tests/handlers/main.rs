#[path = "../test_utils.rs"]
mod test_utils;

mod assisted_test;
mod middleware_test;
mod timetable_test;
