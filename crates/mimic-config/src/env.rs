use std::sync::OnceLock;

use regex::Regex;

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// When a `default("fallback")` clause is present and the variable is unset,
/// the fallback is substituted instead of returning an error. Config structs
/// stay plain `String`/`SecretString` because expansion happens on the raw
/// text before deserialization.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    let mut output = String::with_capacity(input.len());
    let mut last_end = 0;

    for captures in placeholder().captures_iter(input) {
        let whole = captures.get(0).expect("capture 0 always present");
        let name = &captures[1];

        output.push_str(&input[last_end..whole.start()]);

        match std::env::var(name) {
            Ok(value) => output.push_str(&value),
            Err(_) => match captures.get(2) {
                Some(default) => output.push_str(default.as_str()),
                None => anyhow::bail!("environment variable not found: `{name}`"),
            },
        }

        last_end = whole.end();
    }

    output.push_str(&input[last_end..]);
    Ok(output)
}
