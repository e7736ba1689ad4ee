use std::sync::OnceLock;

use regex::Regex;

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

fn double_quotes() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[\u{201C}\u{201D}]").expect("static pattern"))
}

fn single_quotes() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[\u{2018}\u{2019}]").expect("static pattern"))
}

/// Deletes whitespace entirely; "a b" and "ab" compare equal.
pub fn strip_whitespace(text: &str) -> String {
    whitespace().replace_all(text, "").into_owned()
}

/// Canonical form of a typed answer: smart quotes straightened, whitespace removed.
pub fn normalize(text: &str) -> String {
    let text = double_quotes().replace_all(text, "\"");
    let text = single_quotes().replace_all(&text, "'");
    strip_whitespace(&text)
}
