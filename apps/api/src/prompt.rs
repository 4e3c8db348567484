//! Prompt synthesis — builds the generation prompt from the intake form.

use serde::Deserialize;

/// Candidate intake form as submitted by the web client (camelCase keys).
/// Every field is optional on the wire; missing fields interpolate as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub education: String,
    pub experience_level: String,
    pub skills: String,
    pub job_description: String,
}

/// Builds the resume-generation prompt from form data.
/// An empty name falls back to the `[Candidate]` placeholder.
pub fn build_prompt(form: &ResumeForm) -> String {
    let name = if form.full_name.trim().is_empty() {
        "[Candidate]"
    } else {
        form.full_name.trim()
    };

    format!(
        "Generate a professional, ATS-friendly resume for {name}.\n\n\
         Profile:\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Location: {location}\n\
         Education: {education}\n\
         Experience: {experience}\n\
         Skills: {skills}\n\n\
         Job description:\n{jd}\n\n\
         Please produce a resume in plain text with clear section headings.",
        name = name,
        email = form.email,
        phone = form.phone,
        location = form.location,
        education = form.education,
        experience = form.experience_level,
        skills = form.skills,
        jd = form.job_description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_interpolates_fields() {
        let form = ResumeForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            skills: "Rust, SQL".to_string(),
            job_description: "Build engines.".to_string(),
            ..Default::default()
        };
        let prompt = build_prompt(&form);
        assert!(prompt.starts_with("Generate a professional, ATS-friendly resume for Ada Lovelace."));
        assert!(prompt.contains("Email: ada@example.com"));
        assert!(prompt.contains("Skills: Rust, SQL"));
        assert!(prompt.contains("Job description:\nBuild engines."));
        assert!(prompt.ends_with("clear section headings."));
    }

    #[test]
    fn test_build_prompt_falls_back_to_candidate_placeholder() {
        let prompt = build_prompt(&ResumeForm::default());
        assert!(prompt.contains("resume for [Candidate]."));
    }

    #[test]
    fn test_form_deserializes_camel_case_with_missing_fields() {
        let form: ResumeForm =
            serde_json::from_str(r#"{"fullName":"Ada","experienceLevel":"5+"}"#).unwrap();
        assert_eq!(form.full_name, "Ada");
        assert_eq!(form.experience_level, "5+");
        assert!(form.email.is_empty());
    }
}
