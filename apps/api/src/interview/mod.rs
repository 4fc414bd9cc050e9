// Interview coach: one endpoint, several actions.
// Flow per request: validate → build prompt → model fallback chain → parse reply.
// All model calls go through llm_client.

pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
