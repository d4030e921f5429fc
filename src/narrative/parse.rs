//! Defensive parsing of free-form narrative responses.
//!
//! The generator owes us nothing: the response may be valid JSON, JSON
//! buried in prose, loosely structured headers, or noise. Parsing is a chain
//! of attempts, each returning what it could extract; the analyzer fills in
//! defaults for whatever remains absent.

use std::sync::LazyLock;

use regex::Regex;

static SCORE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(\.\d+)?)").expect("score pattern is valid"));

/// Fields recovered from a response. `None`/empty means the response never
/// yielded that field.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ParsedAnalysis {
    pub score: Option<f64>,
    pub reasoning: Option<String>,
    pub warning_indicators: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ParsedAnalysis {
    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.score.is_none()
            && self.reasoning.is_none()
            && self.warning_indicators.is_empty()
            && self.recommendations.is_empty()
    }
}

/// Runs the full parse chain over a response.
pub(crate) fn parse_response(response: &str) -> ParsedAnalysis {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return ParsedAnalysis::default();
    }

    let mut parsed = extract_json(trimmed).unwrap_or_else(|| parse_structured_text(trimmed));

    // Keyword inference fires only when no explicit score was ever parsed;
    // a genuinely-parsed 0.0 stays 0.0. With no parsed reasoning either,
    // the whole response is the best text we have to infer from.
    if parsed.score.is_none() {
        let basis = parsed.reasoning.as_deref().unwrap_or(trimmed);
        parsed.score = Some(infer_score_from_text(basis));
    }

    parsed
}

/// Tier 1: the substring from the first `{` to the last `}` decoded as JSON.
///
/// Returns `None` when the substring is absent, fails to decode, or decodes
/// to something unusable (not an object, or an empty one), handing the
/// response to the line-oriented tier.
fn extract_json(response: &str) -> Option<ParsedAnalysis> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end <= start {
        return None;
    }

    let value: serde_json::Value = serde_json::from_str(&response[start..=end]).ok()?;
    let object = value.as_object()?;
    if object.is_empty() {
        return None;
    }

    Some(ParsedAnalysis {
        score: object.get("score").and_then(serde_json::Value::as_f64),
        reasoning: object
            .get("reasoning")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        warning_indicators: string_list(object.get("warning_indicators")),
        recommendations: string_list(object.get("recommendations")),
    })
}

/// Reads a JSON array as strings, stringifying non-string items rather than
/// dropping them.
fn string_list(value: Option<&serde_json::Value>) -> Vec<String> {
    value
        .and_then(serde_json::Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item.as_str() {
                    Some(s) => s.to_string(),
                    None => item.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Reasoning,
    WarningIndicators,
    Recommendations,
}

/// Tier 2: line-oriented scan keyed on header keywords.
fn parse_structured_text(response: &str) -> ParsedAnalysis {
    let mut parsed = ParsedAnalysis::default();
    let mut reasoning = String::new();
    let mut section = Section::None;

    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();

        if lower.contains("score:") {
            section = Section::None;
            if let Some(score) = extract_score(line) {
                parsed.score = Some(score);
            }
        } else if ["reasoning:", "analysis:", "assessment:"]
            .iter()
            .any(|header| lower.contains(header))
        {
            section = Section::Reasoning;
            let text = after_colon(line).unwrap_or(line);
            if !reasoning.is_empty() {
                reasoning.push(' ');
            }
            reasoning.push_str(text);
        } else if ["warning", "indicator", "red flag"]
            .iter()
            .any(|header| lower.contains(header))
        {
            section = Section::WarningIndicators;
            if let Some(item) = after_colon(line)
                && !item.is_empty()
            {
                parsed.warning_indicators.push(item.to_string());
            }
        } else if ["recommendation", "suggest"]
            .iter()
            .any(|header| lower.contains(header))
        {
            section = Section::Recommendations;
            if let Some(item) = after_colon(line)
                && !item.is_empty()
            {
                parsed.recommendations.push(item.to_string());
            }
        } else {
            match section {
                Section::Reasoning => {
                    if !reasoning.is_empty() {
                        reasoning.push(' ');
                    }
                    reasoning.push_str(line);
                }
                Section::WarningIndicators if line.starts_with('-') => {
                    parsed
                        .warning_indicators
                        .push(line[1..].trim().to_string());
                }
                Section::Recommendations if line.starts_with('-') => {
                    parsed.recommendations.push(line[1..].trim().to_string());
                }
                _ => {}
            }
        }
    }

    if !reasoning.is_empty() {
        parsed.reasoning = Some(reasoning);
    }

    parsed
}

/// Pulls a numeric score out of a `... score: ...` line: direct float parse
/// first, then the first decimal number anywhere in the remainder.
fn extract_score(line: &str) -> Option<f64> {
    let text = after_colon(line)?;

    if let Ok(score) = text.parse::<f64>() {
        return Some(score);
    }

    SCORE_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn after_colon(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, rest)| rest.trim())
}

/// Tier 3: score from sentiment keywords in the text.
///
/// Checked in this order: the fake-words list wins, so "not authentic" lands
/// on 0.8 despite containing "authentic".
fn infer_score_from_text(text: &str) -> f64 {
    let lower = text.to_lowercase();

    const FAKE_WORDS: [&str; 4] = ["fake", "counterfeit", "suspicious", "not authentic"];
    const AUTHENTIC_WORDS: [&str; 3] = ["authentic", "genuine", "legitimate"];

    if FAKE_WORDS.iter().any(|word| lower.contains(word)) {
        0.8
    } else if AUTHENTIC_WORDS.iter().any(|word| lower.contains(word)) {
        0.2
    } else {
        0.5
    }
}
