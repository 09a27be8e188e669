//! The marker-line grammar: a consultation response must end with a line of
//! the exact form `RECOMMENDED_PRODUCTS=[id_1,id_2,...]`. This module is the
//! single place that text contract is parsed.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a whole marker line, optionally padded with spaces or tabs.
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*RECOMMENDED_PRODUCTS=\[([^\[\]\r\n]*)\][ \t]*$").unwrap()
});

/// A successfully parsed response: marker ids in order of appearance, and
/// the prose with the marker line removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub ids: Vec<String>,
    pub explanation: String,
}

/// Extract the trailing machine-readable product list from a free-text
/// response. If several marker lines appear, the last one wins. Returns
/// `None` when no well-formed marker line exists; the ids list may be
/// empty (`RECOMMENDED_PRODUCTS=[]` is well-formed).
pub fn parse_recommendations(text: &str) -> Option<ParsedResponse> {
    let captures = MARKER_RE.captures_iter(text).last()?;
    let whole = captures.get(0)?;

    let ids = captures
        .get(1)?
        .as_str()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    let explanation = format!("{}{}", &text[..whole.start()], &text[whole.end()..])
        .trim()
        .to_string();

    Some(ParsedResponse { ids, explanation })
}
