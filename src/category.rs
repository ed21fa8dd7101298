//! Weekday-driven topic rotation.
//!
//! Each day of the week has one fixed category, Monday first.

use chrono::{Datelike, Local, NaiveDate, Weekday};

/// Categories indexed by days since Monday.
pub const CATEGORIES: [&str; 7] = [
    "Python Programming",
    "Database Management",
    "Website Development",
    "Data Science",
    "Graphic Designing",
    "Cloud Computing",
    "Data Structures & Algorithms",
];

/// Category for a given weekday.
pub fn category_for(weekday: Weekday) -> &'static str {
    CATEGORIES[weekday.num_days_from_monday() as usize]
}

/// Category for a calendar date.
pub fn category_on(date: NaiveDate) -> &'static str {
    category_for(date.weekday())
}

/// Category for today in local time.
pub fn select_category() -> &'static str {
    category_on(Local::now().date_naive())
}
