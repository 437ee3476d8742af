//! Ruby syntax support: parsing, method definitions and conversion calls.

pub mod calls;
pub mod definitions;
pub mod parser;

pub use calls::{find_conversion_calls, ConversionSite, DEFAULT_CONVERSION_METHODS};
pub use definitions::{enclosing_definition, extract_definition};
pub use parser::{has_parse_errors, parse_source, RubyAst};
