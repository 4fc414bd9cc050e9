//! Request and result types for the interview coach.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::prompts::{RESPOND_IN_ENGLISH, RESPOND_IN_THAI};

// ────────────────────────────────────────────────────────────────────────────
// Wire request
// ────────────────────────────────────────────────────────────────────────────

/// Raw JSON body as sent by the client. Every field is optional on the wire;
/// `CoachRequest::try_from` decides what each action actually needs.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequestBody {
    pub job_position: Option<String>,
    pub conversation_history: Option<String>,
    pub practice_language: Option<String>,
    pub action: Option<String>,
    /// Clients send this as either a number or a string.
    pub years_of_experience: Option<Value>,
    pub location: Option<String>,
    pub current_level: Option<String>,
    pub target_company: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validated request
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PracticeLanguage {
    #[default]
    English,
    Thai,
}

impl PracticeLanguage {
    /// `"th"` selects Thai; anything else (including absent) is English.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("th") => PracticeLanguage::Thai,
            _ => PracticeLanguage::English,
        }
    }

    /// The literal language line embedded in every interview prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            PracticeLanguage::Thai => RESPOND_IN_THAI,
            PracticeLanguage::English => RESPOND_IN_ENGLISH,
        }
    }
}

/// Which prompt template and parser apply to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Welcome,
    Continue,
    Hint,
    Score,
    Salary,
    Roadmap,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Welcome => "welcome",
            ActionKind::Continue => "continue",
            ActionKind::Hint => "hint",
            ActionKind::Score => "score",
            ActionKind::Salary => "salary",
            ActionKind::Roadmap => "roadmap",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "welcome" => Ok(ActionKind::Welcome),
            "continue" => Ok(ActionKind::Continue),
            "hint" => Ok(ActionKind::Hint),
            "score" => Ok(ActionKind::Score),
            "salary" => Ok(ActionKind::Salary),
            "roadmap" => Ok(ActionKind::Roadmap),
            other => Err(AppError::Validation(format!("Unknown action: {other}"))),
        }
    }
}

/// Action plus exactly the parameters its prompt needs.
#[derive(Debug, Clone, PartialEq)]
pub enum CoachAction {
    Welcome,
    Continue { history: String },
    /// `question` is the interview question the candidate wants help with.
    Hint { question: String },
    Score { transcript: String },
    Salary {
        years_of_experience: String,
        location: String,
    },
    Roadmap {
        current_level: String,
        target_company: Option<String>,
    },
}

impl CoachAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            CoachAction::Welcome => ActionKind::Welcome,
            CoachAction::Continue { .. } => ActionKind::Continue,
            CoachAction::Hint { .. } => ActionKind::Hint,
            CoachAction::Score { .. } => ActionKind::Score,
            CoachAction::Salary { .. } => ActionKind::Salary,
            CoachAction::Roadmap { .. } => ActionKind::Roadmap,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoachRequest {
    pub job_position: String,
    pub language: PracticeLanguage,
    pub action: CoachAction,
}

impl TryFrom<InterviewRequestBody> for CoachRequest {
    type Error = AppError;

    fn try_from(body: InterviewRequestBody) -> Result<Self, Self::Error> {
        let job_position = non_blank(body.job_position)
            .ok_or_else(|| AppError::Validation("Job position is required".to_string()))?;
        let language = PracticeLanguage::from_tag(body.practice_language.as_deref());
        let history = non_blank(body.conversation_history);

        // Explicit action wins; otherwise history decides between welcome and continue.
        let kind = match body.action.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.parse()?,
            _ if history.is_some() => ActionKind::Continue,
            _ => ActionKind::Welcome,
        };

        let action = match kind {
            ActionKind::Welcome => CoachAction::Welcome,
            ActionKind::Continue => CoachAction::Continue {
                history: require(history, "Conversation history is required to continue")?,
            },
            ActionKind::Hint => CoachAction::Hint {
                question: require(history, "Conversation history is required for a hint")?,
            },
            ActionKind::Score => CoachAction::Score {
                transcript: require(history, "Conversation history is required for scoring")?,
            },
            ActionKind::Salary => CoachAction::Salary {
                years_of_experience: require(
                    body.years_of_experience.as_ref().and_then(value_text),
                    "Years of experience is required for a salary estimate",
                )?,
                location: require(
                    non_blank(body.location),
                    "Location is required for a salary estimate",
                )?,
            },
            ActionKind::Roadmap => CoachAction::Roadmap {
                current_level: require(
                    non_blank(body.current_level),
                    "Current level is required for a roadmap",
                )?,
                target_company: non_blank(body.target_company),
            },
        };

        Ok(CoachRequest {
            job_position,
            language,
            action,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require(value: Option<String>, message: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Validation(message.to_string()))
}

/// Renders a number-or-string JSON value as prompt text.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => non_blank(Some(s.clone())),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parsed results
// ────────────────────────────────────────────────────────────────────────────

/// Welcome or continue turn. `question` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewTurn {
    pub welcome: Option<String>,
    pub feedback: Option<String>,
    pub question: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub communication: u32,
    pub relevance: u32,
    pub confidence: u32,
    pub structure: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub overall: u32, // 0 – 100
    pub breakdown: ScoreBreakdown,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub assessment: String,
}

/// Monthly salary range in the local currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryEstimate {
    pub min: u64,
    pub max: u64,
    pub median: u64,
    pub currency: String,
    pub trend: String,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    pub estimated_weeks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub steps: Vec<RoadmapStep>,
    #[serde(default)]
    pub motivation: String,
}

/// Parser output, serialized as the response body. The turn variant is flat;
/// every other variant is wrapped one level under its action name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedResult {
    Turn(InterviewTurn),
    Hint { hint: String },
    Score { score: ScoreReport },
    Salary { salary: SalaryEstimate },
    Roadmap { roadmap: Roadmap },
}
