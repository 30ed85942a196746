use chrono::{Local, NaiveDate};

/// Represents an entity responsible for providing dates across application. This allows tests to
/// pin "today" to a fixed day.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// Calendar day the user is currently filling in. Always taken in local time, the checklist
    /// is a personal thing and a UTC day would roll over in the middle of someone's evening.
    fn today(&self) -> NaiveDate;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
