//! JSONPath subset
//!
//! | Syntax | Step |
//! |--------|------|
//! | `$` or empty | whole value |
//! | `.name`, `name` (leading), `['name']`, `["name"]` | [`Step::Field`] |
//! | `[N]` | [`Step::Index`] |
//! | `[]` | [`Step::Append`] |
//! | `[*]`, `.*` | [`Step::Wildcard`] |
//! | `[?(@.a.b == literal)]`, `[?(@ == literal)]` | [`Step::Filter`] |
//!
//! Filter literals are quoted strings, integers, floats, `true`, `false`
//! or `null`.

use super::{Path, PathError, Predicate, Step};
use crate::value::Value;

/// Parse a JSONPath query into a path
///
/// # Examples
///
/// ```
/// use prefpath_core::{parse_query, Step};
///
/// let path = parse_query("$.items[0].name").unwrap();
/// assert_eq!(
///     path.steps(),
///     &[Step::Field("items".into()), Step::Index(0), Step::Field("name".into())]
/// );
/// assert!(parse_query("$").unwrap().is_root());
/// ```
pub fn parse_query(expr: &str) -> Result<Path, PathError> {
    let chars: Vec<char> = expr.trim().chars().collect();
    let mut i = 0;
    if chars.first() == Some(&'$') {
        i = 1;
    }

    let mut steps = Vec::new();

    // A leading bare name is accepted: "items[0]" reads like "$.items[0]"
    if i < chars.len() && chars[i] != '.' && chars[i] != '[' {
        let (name, next) = read_name(&chars, i);
        if name.is_empty() {
            return Err(PathError::UnexpectedChar(chars[i], i));
        }
        steps.push(Step::Field(name));
        i = next;
    }

    while i < chars.len() {
        match chars[i] {
            '.' => {
                i += 1;
                if i >= chars.len() {
                    return Err(PathError::EmptySegment(i));
                }
                if chars[i] == '*' {
                    steps.push(Step::Wildcard);
                    i += 1;
                } else {
                    let (name, next) = read_name(&chars, i);
                    if name.is_empty() {
                        return Err(PathError::EmptySegment(i));
                    }
                    steps.push(Step::Field(name));
                    i = next;
                }
            }
            '[' => {
                let (step, next) = parse_bracket(&chars, i)?;
                steps.push(step);
                i = next;
            }
            c => return Err(PathError::UnexpectedChar(c, i)),
        }
    }

    Path::from_steps(steps)
}

fn read_name(chars: &[char], start: usize) -> (String, usize) {
    let mut i = start;
    while i < chars.len() && !matches!(chars[i], '.' | '[' | ']') {
        i += 1;
    }
    (chars[start..i].iter().collect(), i)
}

/// Parse a bracket step starting at `start` (the `[`), returning the step
/// and the position after the closing `]`
fn parse_bracket(chars: &[char], start: usize) -> Result<(Step, usize), PathError> {
    let mut i = start + 1;
    match chars.get(i) {
        None => Err(PathError::UnclosedBracket(start)),
        Some(']') => Ok((Step::Append, i + 1)),
        Some('*') => {
            i += 1;
            expect_close(chars, i, start)?;
            Ok((Step::Wildcard, i + 1))
        }
        Some(&q) if q == '\'' || q == '"' => {
            let (name, next) = read_quoted(chars, i).ok_or(PathError::UnclosedBracket(start))?;
            expect_close(chars, next, start)?;
            Ok((Step::Field(name), next + 1))
        }
        Some('?') => parse_filter(chars, start),
        Some(_) => {
            let idx_start = i;
            while i < chars.len() && chars[i] != ']' {
                i += 1;
            }
            if i >= chars.len() {
                return Err(PathError::UnclosedBracket(start));
            }
            let idx_str: String = chars[idx_start..i].iter().collect();
            if !idx_str.bytes().all(|b| b.is_ascii_digit()) {
                return Err(PathError::InvalidIndex(idx_start, idx_str));
            }
            let idx = idx_str
                .parse::<usize>()
                .map_err(|_| PathError::InvalidIndex(idx_start, idx_str.clone()))?;
            Ok((Step::Index(idx), i + 1))
        }
    }
}

fn expect_close(chars: &[char], i: usize, start: usize) -> Result<(), PathError> {
    match chars.get(i) {
        Some(']') => Ok(()),
        Some(&c) => Err(PathError::UnexpectedChar(c, i)),
        None => Err(PathError::UnclosedBracket(start)),
    }
}

/// Read a quoted string starting at the opening quote; returns the
/// unescaped content and the position after the closing quote
fn read_quoted(chars: &[char], start: usize) -> Option<(String, usize)> {
    let quote = chars[start];
    let mut out = String::new();
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                out.push(*chars.get(i + 1)?);
                i += 2;
            }
            c if c == quote => return Some((out, i + 1)),
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    None
}

/// Parse `[?( ... )]` starting at the `[`
fn parse_filter(chars: &[char], start: usize) -> Result<(Step, usize), PathError> {
    // chars[start + 1] == '?'
    let mut i = start + 2;
    if chars.get(i) != Some(&'(') {
        return Err(PathError::InvalidFilter(
            "expected '(' after '?'".to_string(),
        ));
    }
    i += 1;
    let body_start = i;

    // find ")]" outside of quoted literals
    let mut quote: Option<char> = None;
    while i < chars.len() {
        let c = chars[i];
        match quote {
            Some(q) => {
                if c == '\\' {
                    i += 1;
                } else if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    quote = Some(c);
                } else if c == ')' && chars.get(i + 1) == Some(&']') {
                    let body: String = chars[body_start..i].iter().collect();
                    let predicate = parse_predicate(&body)?;
                    return Ok((Step::Filter(predicate), i + 2));
                }
            }
        }
        i += 1;
    }

    Err(PathError::UnterminatedFilter(start))
}

fn parse_predicate(body: &str) -> Result<Predicate, PathError> {
    let body = body.trim();
    let (lhs, rhs) = body
        .split_once("==")
        .ok_or_else(|| PathError::InvalidFilter(format!("expected '==' in '{}'", body)))?;

    let lhs = lhs.trim();
    let rest = lhs
        .strip_prefix('@')
        .ok_or_else(|| PathError::InvalidFilter(format!("expected '@' in '{}'", lhs)))?;

    let fields = if rest.is_empty() {
        Vec::new()
    } else {
        let chain = rest
            .strip_prefix('.')
            .ok_or_else(|| PathError::InvalidFilter(format!("unexpected '{}'", rest)))?;
        chain
            .split('.')
            .map(|f| {
                if f.is_empty() {
                    Err(PathError::InvalidFilter(format!("empty member in '{}'", lhs)))
                } else {
                    Ok(f.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Predicate::new(fields, parse_literal(rhs.trim())?))
}

fn parse_literal(text: &str) -> Result<Value, PathError> {
    match text {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        _ => {}
    }

    let chars: Vec<char> = text.chars().collect();
    if let Some(&q) = chars.first() {
        if q == '\'' || q == '"' {
            return match read_quoted(&chars, 0) {
                Some((s, end)) if end == chars.len() => Ok(Value::String(s)),
                _ => Err(PathError::InvalidFilter(format!("bad string literal {}", text))),
            };
        }
    }

    if let Ok(i) = text.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    let numeric = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if numeric {
        if let Ok(f) = text.parse::<f64>() {
            return Ok(Value::Float(f));
        }
    }

    Err(PathError::InvalidFilter(format!("unsupported literal '{}'", text)))
}
