// Shared prompt fragments and prompt-building utilities.
// Each feature module keeps its own prompts.rs; only cross-cutting pieces live here.

/// Language instruction for Thai practice sessions.
pub const RESPOND_IN_THAI: &str = "Respond in Thai language only.";

/// Language instruction for everything else.
pub const RESPOND_IN_ENGLISH: &str = "Respond in English only.";

/// Single-pass `{name}` substitution. Inserted values are never rescanned, so
/// user text that happens to contain a placeholder name is left alone. Braces
/// that do not name a known variable (the JSON example) pass through.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];
        let hit = vars.iter().find_map(|(key, value)| {
            after_brace
                .strip_prefix(*key)
                .and_then(|r| r.strip_prefix('}'))
                .map(|remaining| (*value, remaining))
        });
        match hit {
            Some((value, remaining)) => {
                out.push_str(value);
                rest = remaining;
            }
            None => {
                out.push('{');
                rest = after_brace;
            }
        }
    }
    out.push_str(rest);
    out
}
