use serde::{Deserialize, Serialize};

/// Answers from the adoption survey. All fields are free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyForm {
    pub job: String,
    pub home: String,
    pub ownership: String,
    pub personality: String,
    pub family_type: String,
    pub dog_size: String,
    pub activity_rate: String,
}

impl SurveyForm {
    /// Render as `label: answer` lines for the prompt.
    pub fn render(&self) -> String {
        let rows = [
            ("job", &self.job),
            ("housing", &self.home),
            ("prior dog ownership", &self.ownership),
            ("personality", &self.personality),
            ("family type", &self.family_type),
            ("desired dog size", &self.dog_size),
            ("activity level", &self.activity_rate),
        ];

        rows.iter()
            .map(|(label, answer)| format!("- {}: {}", label, answer.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
