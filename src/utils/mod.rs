//! Utils Module
pub mod dates;

pub use dates::{month_label, parse_day};
