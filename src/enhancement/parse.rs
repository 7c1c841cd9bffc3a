//! Turning provider output into field values
//!
//! Providers are asked for JSON but often answer with fenced blocks, extra
//! prose or plain lines. A reply holding a JSON object must carry the
//! field's key; replies without one are read line by line.

use serde_json::Value;

use super::fields::{AntonymEntry, Collocation, EnhancementField, ExampleSentence, FieldValue, SynonymEntry};

const COLLOCATION_SEPARATORS: &[&str] = &["：", ":", "+"];
const EXAMPLE_SEPARATORS: &[&str] = &["——", "—", " - ", ":", "："];

/// Parse raw provider output for `field`. The error describes why nothing
/// usable was found.
pub fn parse_response(field: EnhancementField, content: &str) -> Result<FieldValue, String> {
    let content = strip_code_fence(content.trim());
    if content.is_empty() {
        return Err("empty response".to_string());
    }

    let value = match extract_json_object(content) {
        Some(obj) => {
            let json = obj
                .get(field.key())
                .ok_or_else(|| format!("JSON reply is missing '{}'", field.key()))?;
            from_json(field, json).ok_or_else(|| format!("unexpected JSON shape for '{}'", field.key()))?
        }
        None => from_text(field, content),
    };

    if value.is_empty() {
        return Err(format!("no content for '{}'", field.key()));
    }
    Ok(value)
}

/// Character count and limit when a text value is longer than the field's soft limit
pub fn soft_limit_excess(field: EnhancementField, value: &FieldValue) -> Option<(usize, usize)> {
    let limit = field.soft_limit()?;
    match value {
        FieldValue::Text(text) => {
            let count = text.chars().count();
            (count > limit).then_some((count, limit))
        }
        _ => None,
    }
}

fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Drop the info string (```json)
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    rest.trim_end().trim_end_matches("```").trim()
}

/// The outermost `{...}` span, if it parses as a JSON object
fn extract_json_object(s: &str) -> Option<serde_json::Map<String, Value>> {
    let first = s.find('{')?;
    let last = s.rfind('}')?;
    if last <= first {
        return None;
    }
    match serde_json::from_str::<Value>(&s[first..=last]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(clean_text(s)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_field(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(json_text))
        .unwrap_or_default()
}

fn from_json(field: EnhancementField, json: &Value) -> Option<FieldValue> {
    use EnhancementField as F;
    match field {
        F::Phonetic | F::PartOfSpeech | F::Definition | F::ChineseMeaning | F::MemoryTip | F::Association => {
            json_text(json).map(FieldValue::Text)
        }
        F::Collocations => {
            let items = json.as_array()?;
            let collocations = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(collocation_from_line(s)),
                    Value::Object(obj) => Some(Collocation {
                        phrase: json_field(obj, &["phrase", "en"]),
                        meaning: json_field(obj, &["meaning", "zh"]),
                    }),
                    _ => None,
                })
                .filter(|c| !c.phrase.is_empty())
                .collect();
            Some(FieldValue::Collocations(collocations))
        }
        F::Example => {
            let example = match json {
                Value::String(s) => example_from_text(s),
                Value::Array(items) => items.iter().find_map(|item| match item {
                    Value::String(s) => Some(example_from_line(s)),
                    Value::Object(obj) => Some(example_from_object(obj)),
                    _ => None,
                })?,
                Value::Object(obj) => example_from_object(obj),
                _ => return None,
            };
            Some(FieldValue::Example(example))
        }
        F::Synonyms => {
            let entries = json
                .as_array()?
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(SynonymEntry {
                        word: clean_text(s),
                        example: String::new(),
                        difference: String::new(),
                    }),
                    Value::Object(obj) => Some(SynonymEntry {
                        word: json_field(obj, &["word"]),
                        example: json_field(obj, &["example"]),
                        difference: json_field(obj, &["difference"]),
                    }),
                    _ => None,
                })
                .filter(|s| !s.word.is_empty())
                .collect();
            Some(FieldValue::Synonyms(entries))
        }
        F::Antonyms => {
            let entries = json
                .as_array()?
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(AntonymEntry {
                        word: clean_text(s),
                        example: String::new(),
                    }),
                    Value::Object(obj) => Some(AntonymEntry {
                        word: json_field(obj, &["word"]),
                        example: json_field(obj, &["example"]),
                    }),
                    _ => None,
                })
                .filter(|a| !a.word.is_empty())
                .collect();
            Some(FieldValue::Antonyms(entries))
        }
    }
}

fn from_text(field: EnhancementField, text: &str) -> FieldValue {
    use EnhancementField as F;
    match field {
        F::Collocations => FieldValue::Collocations(
            lines(text)
                .map(collocation_from_line)
                .filter(|c| !c.phrase.is_empty())
                .collect(),
        ),
        F::Example => FieldValue::Example(example_from_text(text)),
        F::Synonyms => FieldValue::Synonyms(
            lines(text)
                .map(|line| SynonymEntry {
                    word: line.to_string(),
                    example: String::new(),
                    difference: String::new(),
                })
                .collect(),
        ),
        F::Antonyms => FieldValue::Antonyms(
            lines(text)
                .map(|line| AntonymEntry {
                    word: line.to_string(),
                    example: String::new(),
                })
                .collect(),
        ),
        _ => FieldValue::Text(clean_text(text)),
    }
}

/// Non-empty lines with list markers removed
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(strip_list_marker).filter(|line| !line.is_empty())
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    let line = line.trim_start_matches(['•', '*']).trim_start();
    let line = line.strip_prefix("- ").unwrap_or(line);

    // "1." / "2)" numbering
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim();
        }
    }
    line.trim()
}

fn clean_text(s: &str) -> String {
    s.trim()
        .trim_matches(|c| matches!(c, '"' | '“' | '”' | '\'' | '`'))
        .trim()
        .to_string()
}

fn split_pair(line: &str, separators: &[&str]) -> (String, String) {
    for sep in separators {
        if let Some((head, tail)) = line.split_once(sep) {
            return (clean_text(head), clean_text(tail));
        }
    }
    (clean_text(line), String::new())
}

fn collocation_from_line(line: &str) -> Collocation {
    let (phrase, meaning) = split_pair(strip_list_marker(line), COLLOCATION_SEPARATORS);
    Collocation { phrase, meaning }
}

fn example_from_line(line: &str) -> ExampleSentence {
    let (sentence, translation) = split_pair(strip_list_marker(line), EXAMPLE_SEPARATORS);
    ExampleSentence { sentence, translation }
}

/// Only the first non-empty line is kept
fn example_from_text(text: &str) -> ExampleSentence {
    lines(text).next().map(example_from_line).unwrap_or(ExampleSentence {
        sentence: String::new(),
        translation: String::new(),
    })
}

fn example_from_object(obj: &serde_json::Map<String, Value>) -> ExampleSentence {
    ExampleSentence {
        sentence: json_field(obj, &["sentence", "en"]),
        translation: json_field(obj, &["translation", "zh"]),
    }
}
