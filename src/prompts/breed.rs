use crate::recommend::catalog::BreedCatalog;
use crate::recommend::survey::SurveyForm;

const INTRO: &str = "Below are the survey answers of a person who wants to raise a dog.";
const CATALOG_HEADER: &str = "Breed list:";
const TASK: &str =
    "From the breed list, output the **number** of the breed you recommend and a one-line **reason**.";
const RULES_HEADER: &str = "Your output must be exactly 2 lines:";
const RULES: &[&str] = &[
    "Line 1: the number of the recommended breed (digits only, add nothing else).",
    "Line 2: the reason for the recommendation (a single sentence, 50 characters or fewer).",
    "Do not add explanations, blank lines or any other words before or after.",
    "Never answer in a different format.",
];
const FORMAT: &str = "<FORMAT>\nn\nOne sentence explaining the reason (50 characters or fewer)\n</FORMAT>";
const FORMAT_FOOTER: &str =
    "Follow the format between the <FORMAT> tags exactly. Do not add any other text.";

pub fn build_breed_prompt(survey: &SurveyForm, catalog: &BreedCatalog) -> String {
    let rules = RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("  {}. {}", i + 1, rule))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{intro}\n{survey}\n\n{catalog_header}\n{catalog}\n\n{task}\n\n{rules_header}\n{rules}\n\n{format}\n\n{footer}\n",
        intro = INTRO,
        survey = survey.render(),
        catalog_header = CATALOG_HEADER,
        catalog = catalog.numbered(),
        task = TASK,
        rules_header = RULES_HEADER,
        rules = rules,
        format = FORMAT,
        footer = FORMAT_FOOTER,
    )
}
