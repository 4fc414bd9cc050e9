// Prompt templates for the writing endpoints.

use crate::llm_client::prompts::fill_template;

/// Replace: {language}, {resume_json}, {job_description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are a professional Career Coach and Resume Writer.
Using the provided Candidate's Resume Data and the Target Job Description, write a tailored, professional, and persuasive Cover Letter.

Tone: Professional, Confident, and Enthusiastic.
Language: {language} (Matches the job description language if not specified).

CANDIDATE RESUME DATA:
{resume_json}

TARGET JOB DESCRIPTION:
{job_description}

Output ONLY the body of the cover letter. Do not include placeholders like [Your Name] or [Date] at the top, just start with "Dear Hiring Manager," or similar professional salutation."#;

/// Prefix for the rewrite prompt; the user's text follows after a blank line.
pub const REWRITE_INSTRUCTION: &str = "Rewrite the following resume text to be more professional, \
    concise, and impactful. Maintain the original language of the input (if Thai, keep Thai). \
    Result only, no explanations:";

pub const DEFAULT_COVER_LETTER_LANGUAGE: &str = "English";

pub fn build_cover_letter_prompt(
    resume_json: &str,
    job_description: &str,
    language: Option<&str>,
) -> String {
    let language = language
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_COVER_LETTER_LANGUAGE);

    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("language", language),
            ("resume_json", resume_json),
            ("job_description", job_description),
        ],
    )
}

pub fn build_rewrite_prompt(text: &str) -> String {
    format!("{REWRITE_INSTRUCTION}\n\n{text}")
}
