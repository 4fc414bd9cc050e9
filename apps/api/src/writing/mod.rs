// Single-shot writing helpers: cover letters and resume text rewrites.
// One prompt, one fixed model, trimmed text back. No fallback chain.

pub mod handlers;
pub mod prompts;
