use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// Used when a file name leaves nothing usable, and ahead of names that
/// start with a digit.
const FALLBACK_IDENTIFIER: &str = "dataset";

/// `{identifier} = {literal};`
pub fn render_declaration(identifier: &str, literal: &str) -> String {
    format!("{identifier} = {literal};")
}

/// Derive a variable name from a source file name.
///
/// The extension is dropped, characters that cannot appear in an identifier
/// become `_`, and a leading digit gets a `dataset_` prefix.
pub fn declaration_identifier(file_name: &str) -> String {
    let stem = file_name
        .rfind('.')
        .map_or(file_name, |dot| &file_name[..dot]);
    let sanitized: Cow<str> = invalid_identifier_char().replace_all(stem, "_");

    if sanitized.is_empty() {
        FALLBACK_IDENTIFIER.to_string()
    } else if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{FALLBACK_IDENTIFIER}_{sanitized}")
    } else {
        sanitized.into_owned()
    }
}

/// JSON sources skip table parsing and are embedded as written.
pub fn is_json_source(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn invalid_identifier_char() -> &'static Regex {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    INVALID.get_or_init(|| Regex::new(r"[^A-Za-z0-9_$]").expect("Invalid identifier regex"))
}
