//! Exposition text to metric families
//!
//! Reads the Prometheus text format line by line. Label values are quoted
//! strings that may hold `,`, `=` or `}`; the escapes `\\`, `\"` and `\n`
//! are decoded exactly once, any other escape is an error. Every line must
//! be blank, a comment or a well-formed sample, otherwise the whole body
//! fails to parse.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::data::types::{MetricFamily, MetricKind, Sample};

/// Longest slice of the offending line quoted back in a failure
const MAX_LINE_PREVIEW: usize = 80;

/// First malformed line of a body
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message} in `{content}`")]
pub struct ParseFailure {
    /// 1-based line number
    pub line: usize,
    pub message: String,
    pub content: String,
}

impl ParseFailure {
    fn at(line: usize, raw: &str, message: String) -> Self {
        Self {
            line,
            message,
            content: raw.trim().chars().take(MAX_LINE_PREVIEW).collect(),
        }
    }
}

/// Parse an exposition body into families, in first-seen order.
///
/// Samples named `<base>_bucket`, `<base>_sum` or `<base>_count` join the
/// `<base>` family when it was declared as a histogram or summary. Samples
/// with no `# TYPE` line are untyped.
pub fn parse_exposition(body: &str) -> Result<Vec<MetricFamily>, ParseFailure> {
    let mut declared: HashMap<String, MetricKind> = HashMap::new();
    let mut families: Vec<MetricFamily> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, raw) in body.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let fail = |message: String| ParseFailure::at(i + 1, raw, message);

        if let Some(comment) = line.strip_prefix('#') {
            if let Some((name, kind)) = parse_type_comment(comment).map_err(fail)? {
                declared.insert(name, kind);
            }
            continue;
        }

        let parsed = parse_sample_line(line).map_err(fail)?;
        let (family_name, kind) = resolve_family(&parsed.name, &declared);
        let (gauge, untyped) = match kind {
            MetricKind::Gauge => (Some(parsed.value), None),
            MetricKind::Untyped => (None, Some(parsed.value)),
            _ => (None, None),
        };
        let sample = Sample {
            labels: parsed.labels,
            gauge,
            untyped,
            timestamp_ms: parsed.timestamp_ms,
        };

        match index.get(&family_name) {
            Some(&at) => families[at].samples.push(sample),
            None => {
                index.insert(family_name.clone(), families.len());
                families.push(MetricFamily {
                    name: family_name,
                    kind,
                    samples: vec![sample],
                });
            }
        }
    }

    Ok(families)
}

/// `# TYPE <name> <kind>` yields the declaration; HELP and free comments
/// yield nothing.
fn parse_type_comment(comment: &str) -> Result<Option<(String, MetricKind)>, String> {
    let mut tokens = comment.split_whitespace();
    if tokens.next() != Some("TYPE") {
        return Ok(None);
    }

    let name = tokens
        .next()
        .ok_or_else(|| "TYPE line without metric name".to_string())?;
    if !is_metric_name(name) {
        return Err(format!("invalid metric name '{}'", name));
    }
    let kind = match tokens.next() {
        Some("gauge") => MetricKind::Gauge,
        Some("counter") => MetricKind::Counter,
        Some("untyped") => MetricKind::Untyped,
        Some("histogram") => MetricKind::Histogram,
        Some("summary") => MetricKind::Summary,
        Some(other) => return Err(format!("unknown metric type '{}'", other)),
        None => return Err("TYPE line without metric type".to_string()),
    };
    if tokens.next().is_some() {
        return Err("unexpected text after metric type".to_string());
    }

    Ok(Some((name.to_string(), kind)))
}

fn resolve_family(name: &str, declared: &HashMap<String, MetricKind>) -> (String, MetricKind) {
    if let Some(&kind) = declared.get(name) {
        return (name.to_string(), kind);
    }
    for suffix in ["_bucket", "_sum", "_count"] {
        if let Some(base) = name.strip_suffix(suffix)
            && let Some(&kind) = declared.get(base)
            && matches!(kind, MetricKind::Histogram | MetricKind::Summary)
        {
            return (base.to_string(), kind);
        }
    }
    (name.to_string(), MetricKind::Untyped)
}

#[derive(Debug)]
struct SampleLine {
    name: String,
    labels: BTreeMap<String, String>,
    value: f64,
    timestamp_ms: Option<i64>,
}

/// `name[{labels}] value [timestamp_ms]`
fn parse_sample_line(line: &str) -> Result<SampleLine, String> {
    let mut cursor = Cursor::new(line);

    let name = cursor.take_while(is_metric_name_char);
    if !is_metric_name(name) {
        return Err("expected metric name".to_string());
    }
    cursor.skip_blanks();

    let labels = if cursor.eat('{') {
        parse_labels(&mut cursor)?
    } else {
        BTreeMap::new()
    };
    cursor.skip_blanks();

    let token = cursor.take_while(|c| !c.is_whitespace());
    if token.is_empty() {
        return Err(format!("missing value for '{}'", name));
    }
    // Accepts NaN and +Inf/-Inf like the exposition format
    let value: f64 = token
        .parse()
        .map_err(|_| format!("invalid value '{}'", token))?;
    cursor.skip_blanks();

    let timestamp_ms = if cursor.is_done() {
        None
    } else {
        let token = cursor.take_while(|c| !c.is_whitespace());
        let ts: i64 = token
            .parse()
            .map_err(|_| format!("invalid timestamp '{}'", token))?;
        cursor.skip_blanks();
        if !cursor.is_done() {
            return Err("unexpected text after timestamp".to_string());
        }
        Some(ts)
    };

    Ok(SampleLine {
        name: name.to_string(),
        labels,
        value,
        timestamp_ms,
    })
}

/// Label pairs after the opening `{`, up to and including the closing `}`.
/// A trailing comma and `{}` are allowed.
fn parse_labels(cursor: &mut Cursor<'_>) -> Result<BTreeMap<String, String>, String> {
    let mut labels = BTreeMap::new();

    loop {
        cursor.skip_blanks();
        if cursor.eat('}') {
            return Ok(labels);
        }

        let name = cursor.take_while(is_label_name_char);
        if !is_label_name(name) {
            return Err("expected label name".to_string());
        }
        cursor.skip_blanks();
        if !cursor.eat('=') {
            return Err(format!("expected '=' after label '{}'", name));
        }
        cursor.skip_blanks();
        if !cursor.eat('"') {
            return Err(format!("expected quoted value for label '{}'", name));
        }
        let value = parse_label_value(cursor)?;
        if labels.insert(name.to_string(), value).is_some() {
            return Err(format!("duplicate label '{}'", name));
        }

        cursor.skip_blanks();
        match cursor.bump() {
            Some(',') => continue,
            Some('}') => return Ok(labels),
            _ => return Err(format!("expected ',' or '}}' after label '{}'", name)),
        }
    }
}

/// Quoted value after the opening `"`, consuming the closing one
fn parse_label_value(cursor: &mut Cursor<'_>) -> Result<String, String> {
    let mut value = String::new();

    loop {
        match cursor.bump() {
            Some('"') => return Ok(value),
            Some('\\') => match cursor.bump() {
                Some('\\') => value.push('\\'),
                Some('"') => value.push('"'),
                Some('n') => value.push('\n'),
                Some(other) => return Err(format!("invalid escape '\\{}' in label value", other)),
                None => return Err("unterminated label value".to_string()),
            },
            Some(c) => value.push(c),
            None => return Err("unterminated label value".to_string()),
        }
    }
}

fn is_metric_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':'
}

fn is_metric_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| !c.is_ascii_digit())
        && name.chars().all(is_metric_name_char)
}

fn is_label_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_label_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| !c.is_ascii_digit())
        && name.chars().all(is_label_name_char)
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !keep(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.text[start..self.pos]
    }

    fn skip_blanks(&mut self) {
        self.take_while(|c| c == ' ' || c == '\t');
    }

    fn is_done(&self) -> bool {
        self.pos >= self.text.len()
    }
}
