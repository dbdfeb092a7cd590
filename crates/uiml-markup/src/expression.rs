//! Attribute value resolution.
//!
//! Brace expressions are resolved in a fixed order: strict JSON, the bare
//! literals `true`/`false`/`null`/`undefined`, a bare number, and finally
//! JavaScript-style object syntax (single quotes, unquoted keys, trailing
//! commas) rewritten into JSON. Anything still unreadable is rejected by the
//! caller.

use serde_json::Number;
use serde_json::Value;

pub(crate) fn resolve_expression(text: &str) -> Option<Value> {
    let text = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    match text {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        "null" | "undefined" => return Some(Value::Null),
        _ => {}
    }

    if let Some(number) = parse_bare_number(text) {
        return Some(Value::Number(number));
    }

    let normalized = ObjectLiteralScanner::new(text).normalize();
    serde_json::from_str::<Value>(&normalized).ok()
}

/// Quoted attribute text is kept as a string unless it is obviously a JSON
/// array or object.
pub(crate) fn coerce_quoted(raw: String) -> Value {
    let trimmed = raw.trim();
    let looks_structured = (trimmed.starts_with('[') && trimmed.ends_with(']'))
        || (trimmed.starts_with('{') && trimmed.ends_with('}'));

    if looks_structured {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return value;
        }
    }
    Value::String(raw)
}

/// Integers and decimals JSON itself refuses, such as `+3`, `.5` or `2.`.
fn parse_bare_number(text: &str) -> Option<Number> {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    let valid = !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;

    if !valid {
        return None;
    }

    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

#[derive(Clone, Copy, PartialEq)]
enum QuoteState {
    None,
    Single,
    Double,
}

/// Single-pass, quote-aware rewrite of JavaScript object syntax into JSON.
struct ObjectLiteralScanner {
    chars: Vec<char>,
    pos: usize,
    out: String,
}

impl ObjectLiteralScanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            out: String::with_capacity(text.len() + 8),
        }
    }

    fn normalize(mut self) -> String {
        let mut quote_state = QuoteState::None;

        while let Some(c) = self.peek(0) {
            match (quote_state, c) {
                (QuoteState::Single | QuoteState::Double, '\\') => {
                    self.pos += 1;
                    match self.peek(0) {
                        // `\'` needs no escape once the string is double quoted
                        Some('\'') if quote_state == QuoteState::Single => self.out.push('\''),
                        Some(next) => {
                            self.out.push('\\');
                            self.out.push(next);
                        }
                        None => self.out.push('\\'),
                    }
                }
                (QuoteState::Single, '\'') | (QuoteState::Double, '"') => {
                    quote_state = QuoteState::None;
                    self.out.push('"');
                }
                (QuoteState::Single, '"') => self.out.push_str("\\\""),
                (QuoteState::Single | QuoteState::Double, _) => self.out.push(c),

                (QuoteState::None, '\'') => {
                    quote_state = QuoteState::Single;
                    self.out.push('"');
                }
                (QuoteState::None, '"') => {
                    quote_state = QuoteState::Double;
                    self.out.push('"');
                }
                (QuoteState::None, ',') if self.closes_after_comma() => {}
                (QuoteState::None, c) if is_word_char(c) => {
                    self.word();
                    continue;
                }
                (QuoteState::None, _) => self.out.push(c),
            }
            self.pos += 1;
        }

        self.out
    }

    /// A bare word: quoted when it is an object key, `undefined` becomes
    /// `null`, anything else is copied through.
    fn word(&mut self) {
        let start = self.pos;
        while self.peek(0).is_some_and(is_word_char) {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();

        if self.next_significant() == Some(':') {
            self.out.push('"');
            self.out.push_str(&word);
            self.out.push('"');
        } else if word == "undefined" {
            self.out.push_str("null");
        } else {
            self.out.push_str(&word);
        }
    }

    fn closes_after_comma(&self) -> bool {
        let mut offset = 1;
        while let Some(c) = self.peek(offset) {
            if !c.is_whitespace() {
                return matches!(c, '}' | ']');
            }
            offset += 1;
        }
        false
    }

    fn next_significant(&self) -> Option<char> {
        self.chars[self.pos..]
            .iter()
            .copied()
            .find(|c| !c.is_whitespace())
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | '-' | '+')
}
