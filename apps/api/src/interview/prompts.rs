// Prompt templates for the interview coach.
//
// Each template embeds the exact output format that `parser.rs` extracts from.
// Every template takes {job_position} and {language_instruction}; extra
// placeholders are listed above each constant.

use crate::interview::models::{CoachAction, CoachRequest};
use crate::llm_client::prompts::fill_template;

/// Replace: {conversation_history}
pub const HINT_PROMPT_TEMPLATE: &str = r#"You are an expert career coach helping someone prepare for a job interview for the position of "{job_position}".
{language_instruction}

The current interview question is:
{conversation_history}

Provide helpful tips on how to answer this question effectively. Include:
1. Key points to mention
2. What the interviewer is looking for
3. A brief example structure for the answer

Keep your response concise and practical (2-3 short paragraphs)."#;

/// Replace: {conversation_history}
pub const SCORE_PROMPT_TEMPLATE: &str = r#"You are an expert HR interviewer evaluating a mock interview for the position of "{job_position}".
{language_instruction}

Here is the complete interview conversation:
{conversation_history}

Analyze the candidate's performance and provide:
1. An overall score from 0-100
2. Scores for each category (0-100): Communication, Relevance, Confidence, Structure
3. 2-3 key strengths
4. 2-3 areas for improvement
5. A brief overall assessment (2-3 sentences)

Format your response EXACTLY as (use numbers only for scores):
[OverallScore]: 85
[Communication]: 80
[Relevance]: 90
[Confidence]: 85
[Structure]: 75
[Strengths]:
- First strength
- Second strength
- Third strength
[Improvements]:
- First improvement area
- Second improvement area
- Third improvement area
[Assessment]: Your overall assessment here in 2-3 sentences."#;

/// Replace: {years_of_experience}, {location}
pub const SALARY_PROMPT_TEMPLATE: &str = r#"You are an expert HR compensation analyst.
{language_instruction}

Estimate the monthly salary range for the position of "{job_position}" with {years_of_experience} years of experience in "{location}".

Provide:
1. Minimum monthly salary (in local currency based on location, e.g., THB for Bangkok)
2. Maximum monthly salary
3. Median monthly salary
4. 3 key factors influencing this salary
5. Market trend (Increasing/Stable/Decreasing)

Format your response EXACTLY as (use numbers only for salary values, no commas):
[Min]: 25000
[Max]: 45000
[Median]: 35000
[Currency]: THB
[Factors]:
- Factor 1
- Factor 2
- Factor 3
[Trend]: Stable"#;

/// Replace: {current_level}, {target_company_clause}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"You are an expert career coach.
{language_instruction}

Create a personalized 5-step career roadmap for a "{current_level}" aspiring to become a "{job_position}"{target_company_clause}.

For each step, provide:
1. Title
2. Actionable description
3. Estimated weeks to complete

Also provide a short, inspiring motivation message.

Format your response EXACTLY as JSON:
{
  "steps": [
    {
      "title": "Step Title",
      "description": "Step Description",
      "estimated_weeks": 4
    }
  ],
  "motivation": "Your motivation message"
}"#;

pub const WELCOME_PROMPT_TEMPLATE: &str = r#"You are an expert job interviewer for the position of "{job_position}".
{language_instruction}

Generate a welcoming message and ask the first interview question. The question should be an opening question like "Tell me about yourself" or "Why are you interested in this role?".

Format your response EXACTLY as:
[Welcome]: Your welcoming message here
[Question]: Your interview question here"#;

/// Replace: {conversation_history}
pub const CONTINUE_PROMPT_TEMPLATE: &str = r#"You are an expert job interviewer for the position of "{job_position}".
{language_instruction}

Here is the conversation so far:
{conversation_history}

Based on the candidate's last answer:
1. Provide brief, constructive feedback on their answer (1-2 sentences)
2. Ask the next relevant interview question

Format your response EXACTLY as:
[Feedback]: Your feedback here
[Question]: Your next question here"#;

/// Builds the full prompt for a validated request. Never fails.
pub fn build_prompt(request: &CoachRequest) -> String {
    let language = request.language.instruction();
    let job = request.job_position.as_str();

    match &request.action {
        CoachAction::Welcome => fill_template(
            WELCOME_PROMPT_TEMPLATE,
            &[("language_instruction", language), ("job_position", job)],
        ),
        CoachAction::Continue { history } => fill_template(
            CONTINUE_PROMPT_TEMPLATE,
            &[
                ("language_instruction", language),
                ("job_position", job),
                ("conversation_history", history.as_str()),
            ],
        ),
        CoachAction::Hint { question } => fill_template(
            HINT_PROMPT_TEMPLATE,
            &[
                ("language_instruction", language),
                ("job_position", job),
                ("conversation_history", question.as_str()),
            ],
        ),
        CoachAction::Score { transcript } => fill_template(
            SCORE_PROMPT_TEMPLATE,
            &[
                ("language_instruction", language),
                ("job_position", job),
                ("conversation_history", transcript.as_str()),
            ],
        ),
        CoachAction::Salary {
            years_of_experience,
            location,
        } => fill_template(
            SALARY_PROMPT_TEMPLATE,
            &[
                ("language_instruction", language),
                ("job_position", job),
                ("years_of_experience", years_of_experience.as_str()),
                ("location", location.as_str()),
            ],
        ),
        CoachAction::Roadmap {
            current_level,
            target_company,
        } => {
            let clause = target_company
                .as_deref()
                .map(|company| format!(" at {company}"))
                .unwrap_or_default();
            fill_template(
                ROADMAP_PROMPT_TEMPLATE,
                &[
                    ("language_instruction", language),
                    ("job_position", job),
                    ("current_level", current_level.as_str()),
                    ("target_company_clause", clause.as_str()),
                ],
            )
        }
    }
}
