mod helpers;
mod kopeks;
pub mod op;

pub use helpers::parse_boolean_flag;
pub use kopeks::{Kopeks, KopeksConversionError};
