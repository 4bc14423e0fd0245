pub mod relative;

pub use relative::{age_in_days, normalize_age, parse_event_date, AGE_SENTINEL_DAYS};
