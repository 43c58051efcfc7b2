/// Instruction sent alongside the photo. The model is asked for JSON only,
/// but replies are still run through the lenient extractor.
pub const DISEASE_SCREENING_PROMPT: &str = r#"First check whether this image shows a dog. If it does, analyse its health and give the result in this JSON format:
{
    "is_dog": true,
    "disease": "the disease or condition found",
    "info": {
        "symptoms": "list of observed symptoms",
        "recommendations": "recommended actions",
        "vet_visit_required": true/false,
        "severity": "low/medium/high"
    }
}

If the dog shows no particular problem, set "disease" to "healthy".
If there is no dog in the image, answer like this:
{
    "is_dog": false,
    "message": "There is no dog in the image. Please upload a photo of a dog."
}

Answer in JSON only."#;
