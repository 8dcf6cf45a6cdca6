pub mod dates;
pub mod users;

pub use dates::{DateChoice, DateParseError, DatePicker, TextDatePicker};
pub use users::{StaticDirectory, UserDirectory};
