use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for Android locale qualifiers
///
/// Target codes are Android resource qualifiers (`fr`, `pt-rBR`, `b+sr+Latn`).
/// Comparisons are case-insensitive on the whole qualifier; names come from the
/// ISO 639 base language.
/// Check if two language codes are the same qualifier, ignoring case
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    code1.trim().eq_ignore_ascii_case(code2.trim())
}

/// Base ISO language of a qualifier (`pt-rBR` -> `pt`, `b+sr+Latn` -> `sr`)
pub fn base_language(code: &str) -> String {
    let code = code.trim();
    let code = code.strip_prefix("b+").unwrap_or(code);
    code.split(['-', '_', '+'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Get the English language name for a code
pub fn get_language_name(code: &str) -> Result<String> {
    let base = base_language(code);
    let lang = match base.len() {
        2 => Language::from_639_1(&base),
        3 => Language::from_639_3(&base),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Human label for log lines: `French (fr)`, or the bare code if unknown
pub fn display_name(code: &str) -> String {
    match get_language_name(code) {
        Ok(name) => format!("{} ({})", name, code),
        Err(_) => code.to_string(),
    }
}
