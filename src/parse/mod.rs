//! Lenient readers for free-text model replies.

pub mod breed;
pub mod json_island;

pub use breed::{Recommendation, parse_recommendation};
pub use json_island::{Unparsed, extract_json_island, extract_json_object};
