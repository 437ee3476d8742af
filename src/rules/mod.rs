pub mod suppression;
pub mod to_enum_arguments;

pub use suppression::{parse_suppression_comments, SuppressionContext};
pub use to_enum_arguments::{SiteOutcome, ToEnumArguments};
