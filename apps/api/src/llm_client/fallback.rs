//! Model fallback chain.
//!
//! Candidates are tried strictly in order, one at a time. The first model that
//! returns non-empty text wins and nothing after it is called. There is no
//! backoff, no racing and no memory of which model worked last time.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use super::{LlmError, TextGenerator};

/// Successful generation and the model that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub text: String,
    pub model: String,
}

/// One failed candidate in a fallback chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFailure {
    pub model: String,
    pub reason: String,
}

impl fmt::Display for ModelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.model, self.reason)
    }
}

/// Every candidate failed. `attempts` keeps all failures in call order; the
/// message only names the last one.
#[derive(Debug, Error)]
#[error("All models failed. Last error: {}", last_reason(.attempts))]
pub struct FallbackError {
    pub attempts: Vec<ModelFailure>,
}

impl FallbackError {
    pub fn last(&self) -> Option<&ModelFailure> {
        self.attempts.last()
    }
}

fn last_reason(attempts: &[ModelFailure]) -> &str {
    attempts
        .last()
        .map(|f| f.reason.as_str())
        .unwrap_or("no models configured")
}

/// Calls a single model under `timeout`. A timeout is reported as `LlmError::Timeout`.
pub async fn generate_once(
    generator: &dyn TextGenerator,
    model: &str,
    prompt: &str,
    timeout: Duration,
) -> Result<String, LlmError> {
    let text = tokio::time::timeout(timeout, generator.generate(model, prompt))
        .await
        .map_err(|_| LlmError::Timeout(timeout))??;

    if text.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(text)
}

/// Runs `prompt` through `models` in order and returns the first usable reply.
pub async fn generate_with_fallback(
    generator: &dyn TextGenerator,
    models: &[&str],
    prompt: &str,
    timeout: Duration,
) -> Result<Generation, FallbackError> {
    let mut attempts = Vec::with_capacity(models.len());

    for model in models {
        info!("Attempting generation with model: {model}");
        match generate_once(generator, model, prompt, timeout).await {
            Ok(text) => {
                info!("Generation succeeded with model: {model}");
                return Ok(Generation {
                    text,
                    model: model.to_string(),
                });
            }
            Err(e) => {
                warn!("Generation failed with model {model}: {e}");
                attempts.push(ModelFailure {
                    model: model.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Err(FallbackError { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Replies per model from a fixed script and records every call.
    struct ScriptedGenerator {
        replies: HashMap<&'static str, Result<&'static str, u16>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<(&'static str, Result<&'static str, u16>)>) -> Self {
            Self {
                replies: replies.into_iter().collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, model: &str, _prompt: &str) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(model.to_string());
            match self.replies.get(model) {
                Some(Ok(text)) => Ok(text.to_string()),
                Some(Err(status)) => Err(LlmError::Api {
                    status: *status,
                    message: format!("{model} unavailable"),
                }),
                None => Err(LlmError::EmptyContent),
            }
        }
    }

    const MODELS: &[&str] = &["m1", "m2", "m3", "m4"];

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let generator = ScriptedGenerator::new(vec![
            ("m1", Err(404)),
            ("m2", Err(429)),
            ("m3", Ok("third")),
            ("m4", Ok("fourth")),
        ]);

        let result = generate_with_fallback(&generator, MODELS, "p", Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result.text, "third");
        assert_eq!(result.model, "m3");
        assert_eq!(generator.calls(), vec!["m1", "m2", "m3"]);
    }

    #[tokio::test]
    async fn test_first_model_success_makes_one_call() {
        let generator = ScriptedGenerator::new(vec![("m1", Ok("first"))]);

        let result = generate_with_fallback(&generator, MODELS, "p", Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result.model, "m1");
        assert_eq!(generator.calls(), vec!["m1"]);
    }

    #[tokio::test]
    async fn test_all_fail_reports_last_reason_only() {
        let generator = ScriptedGenerator::new(vec![
            ("m1", Err(500)),
            ("m2", Err(500)),
            ("m3", Err(500)),
            ("m4", Err(503)),
        ]);

        let err = generate_with_fallback(&generator, MODELS, "p", Duration::from_secs(5))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("All models failed. Last error: "));
        assert!(message.contains("m4 unavailable"));
        assert!(!message.contains("m1 unavailable"));
        assert_eq!(err.attempts.len(), 4);
        assert_eq!(err.attempts[0].model, "m1");
        assert_eq!(err.last().unwrap().model, "m4");
        assert_eq!(generator.calls(), vec!["m1", "m2", "m3", "m4"]);
    }

    #[tokio::test]
    async fn test_blank_text_counts_as_failure() {
        let generator = ScriptedGenerator::new(vec![("m1", Ok("   \n")), ("m2", Ok("usable"))]);

        let result = generate_with_fallback(&generator, MODELS, "p", Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result.model, "m2");
    }

    #[tokio::test]
    async fn test_empty_model_list_fails() {
        let generator = ScriptedGenerator::new(vec![]);
        let err = generate_with_fallback(&generator, &[], "p", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(err.attempts.is_empty());
        assert_eq!(
            err.to_string(),
            "All models failed. Last error: no models configured"
        );
    }

    struct HangingThenOk;

    #[async_trait]
    impl TextGenerator for HangingThenOk {
        async fn generate(&self, model: &str, _prompt: &str) -> Result<String, LlmError> {
            if model == "slow" {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Ok(format!("from {model}"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_candidate_times_out_and_falls_through() {
        let result = generate_with_fallback(
            &HangingThenOk,
            &["slow", "fast"],
            "p",
            Duration::from_secs(30),
        )
        .await
        .unwrap();

        assert_eq!(result.text, "from fast");
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_once_timeout_error() {
        let err = generate_once(&HangingThenOk, "slow", "p", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Timeout(_)));
    }
}
