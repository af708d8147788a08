pub mod parse;
pub mod report;
pub mod schedule;
pub mod upload;
pub mod validate;
