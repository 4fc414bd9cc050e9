//! Response Parser — turns the model's free text back into typed results.
//!
//! Tagged formats (`[Tag]: value`) are parsed leniently: a missing or garbled
//! tag yields a zero, an empty string or an empty list, never an error.
//! The roadmap is the exception. It is JSON, and a decode failure is an error.
//!
//! Tag matching is case-sensitive on the bracketed name, the colon after the
//! bracket is optional, and a section runs until the next recognized tag or
//! the end of the text.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::AppError;
use crate::interview::models::{
    ActionKind, InterviewTurn, ParsedResult, Roadmap, SalaryEstimate, ScoreBreakdown, ScoreReport,
};
use crate::llm_client::strip_json_fences;

static TURN_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(Welcome|Feedback|Question)\]:?").expect("turn tag pattern is valid")
});

static SCORE_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[(OverallScore|Communication|Relevance|Confidence|Structure|Strengths|Improvements|Assessment)\]:?",
    )
    .expect("score tag pattern is valid")
});

static SALARY_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(Min|Max|Median|Currency|Factors|Trend)\]:?")
        .expect("salary tag pattern is valid")
});

const MAX_SCORE: u64 = 100;

/// Dispatches to the parser for `kind`.
pub fn parse_response(kind: ActionKind, raw: &str) -> Result<ParsedResult, AppError> {
    Ok(match kind {
        ActionKind::Welcome | ActionKind::Continue => ParsedResult::Turn(parse_turn(raw)),
        ActionKind::Hint => ParsedResult::Hint {
            hint: raw.trim().to_string(),
        },
        ActionKind::Score => ParsedResult::Score {
            score: parse_score(raw),
        },
        ActionKind::Salary => ParsedResult::Salary {
            salary: parse_salary(raw),
        },
        ActionKind::Roadmap => ParsedResult::Roadmap {
            roadmap: parse_roadmap(raw)?,
        },
    })
}

/// Welcome / continue turn. Without a `[Question]` tag the whole reply is the
/// question and nothing else is extracted. An empty `[Question]` keeps the
/// other sections but still falls back to the whole reply for the question.
pub fn parse_turn(raw: &str) -> InterviewTurn {
    let sections = TaggedSections::scan(raw, &TURN_TAGS);

    let Some(question) = sections.section("Question") else {
        return InterviewTurn {
            welcome: None,
            feedback: None,
            question: raw.trim().to_string(),
        };
    };

    let question = match question.trim() {
        "" => raw.trim(),
        captured => captured,
    };

    InterviewTurn {
        welcome: Some(sections.text("Welcome")).filter(|s| !s.is_empty()),
        feedback: Some(sections.text("Feedback")).filter(|s| !s.is_empty()),
        question: question.to_string(),
    }
}

pub fn parse_score(raw: &str) -> ScoreReport {
    let sections = TaggedSections::scan(raw, &SCORE_TAGS);
    let score = |tag: &str| sections.number(tag).min(MAX_SCORE) as u32;

    ScoreReport {
        overall: score("OverallScore"),
        breakdown: ScoreBreakdown {
            communication: score("Communication"),
            relevance: score("Relevance"),
            confidence: score("Confidence"),
            structure: score("Structure"),
        },
        strengths: sections.bullets("Strengths"),
        improvements: sections.bullets("Improvements"),
        assessment: sections.text("Assessment"),
    }
}

pub fn parse_salary(raw: &str) -> SalaryEstimate {
    let sections = TaggedSections::scan(raw, &SALARY_TAGS);

    SalaryEstimate {
        min: sections.number("Min"),
        max: sections.number("Max"),
        median: sections.number("Median"),
        currency: sections.text("Currency"),
        trend: sections.text("Trend"),
        factors: sections.bullets("Factors"),
    }
}

/// Roadmap JSON, optionally wrapped in a code fence.
pub fn parse_roadmap(raw: &str) -> Result<Roadmap, AppError> {
    serde_json::from_str(strip_json_fences(raw)).map_err(|e| {
        tracing::warn!("Failed to parse roadmap JSON: {raw}");
        AppError::MalformedStructuredResponse(e.to_string())
    })
}

/// Positions of every recognized tag in a reply.
struct TaggedSections<'a> {
    text: &'a str,
    markers: Vec<Marker<'a>>,
}

struct Marker<'a> {
    tag: &'a str,
    start: usize,
    end: usize,
}

impl<'a> TaggedSections<'a> {
    fn scan(text: &'a str, pattern: &Regex) -> Self {
        let markers = pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(Marker {
                    tag: caps.get(1)?.as_str(),
                    start: whole.start(),
                    end: whole.end(),
                })
            })
            .collect();
        Self { text, markers }
    }

    /// Raw body of the first `[tag]`, up to the next tag or end of text.
    fn section(&self, tag: &str) -> Option<&'a str> {
        let idx = self.markers.iter().position(|m| m.tag == tag)?;
        let body_start = self.markers[idx].end;
        let body_end = self
            .markers
            .get(idx + 1)
            .map(|next| next.start)
            .unwrap_or(self.text.len());
        Some(&self.text[body_start..body_end])
    }

    fn text(&self, tag: &str) -> String {
        self.section(tag)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    /// Leading integer of the section. Thousands separators are dropped;
    /// anything unparseable is 0.
    fn number(&self, tag: &str) -> u64 {
        let Some(body) = self.section(tag) else {
            return 0;
        };
        let digits: String = body
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',')
            .filter(char::is_ascii_digit)
            .collect();
        digits.parse().unwrap_or(0)
    }

    /// `- ` bulleted lines of the section, marker stripped.
    fn bullets(&self, tag: &str) -> Vec<String> {
        self.section(tag)
            .map(|body| {
                body.lines()
                    .filter_map(|line| line.trim_start().strip_prefix("- "))
                    .map(|item| item.trim().to_string())
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
