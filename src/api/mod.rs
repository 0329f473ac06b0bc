//! Output formatting for estimates and tracker updates

pub mod formatting;

pub use formatting::{
    EstimateFormatter, FormattedEstimate, JsonFormatter, OutputFormat, TextFormatter,
};
