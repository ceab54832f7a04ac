pub mod quiz_parser;
pub mod sanitize;
