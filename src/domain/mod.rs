mod logic;
mod report;
mod status;

pub use logic::qualifying_dates;
pub use report::{Report, SUBJECT_ALERT, SUBJECT_NONE};
