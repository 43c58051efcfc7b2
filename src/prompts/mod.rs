pub mod breed;
pub mod disease;

pub use breed::build_breed_prompt;
pub use disease::DISEASE_SCREENING_PROMPT;
