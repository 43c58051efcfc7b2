//! Breed suggestions from survey answers.

pub mod catalog;
pub mod survey;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::parse::parse_recommendation;
use crate::prompts::build_breed_prompt;
use crate::provider::TextModel;

pub use catalog::BreedCatalog;
pub use survey::SurveyForm;

/// Response body of `/v1/suggest/breed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedSuggestion {
    pub breed: String,
    pub reason: String,
}

pub struct BreedAdvisor {
    model: Arc<dyn TextModel>,
    catalog: BreedCatalog,
}

impl BreedAdvisor {
    pub fn new(model: Arc<dyn TextModel>, catalog: BreedCatalog) -> Self {
        Self { model, catalog }
    }

    /// Ask the model once and read its pick.
    ///
    /// `Ok(None)` means the reply had no usable index/reason pair, or named a
    /// position outside the catalog. Provider failures are errors.
    pub async fn suggest(&self, survey: &SurveyForm) -> Result<Option<BreedSuggestion>> {
        let prompt = build_breed_prompt(survey, &self.catalog);
        let reply = self.model.generate(&prompt).await?;

        let Some(rec) = parse_recommendation(&reply) else {
            tracing::info!(reply_len = reply.len(), "model reply had no usable recommendation");
            return Ok(None);
        };

        match self.catalog.get(rec.index) {
            Some(breed) => Ok(Some(BreedSuggestion {
                breed: breed.to_string(),
                reason: rec.reason,
            })),
            None => {
                tracing::warn!(
                    index = rec.index,
                    catalog_len = self.catalog.len(),
                    "model picked a breed outside the catalog"
                );
                Ok(None)
            }
        }
    }
}
