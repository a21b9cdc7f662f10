//! Source normalization ahead of compilation.
//!
//! Text models asked for Rhai still slip into JavaScript habits. This pass
//! rewrites the common ones outside of string literals and comments:
//!
//! | Input                         | Rewritten to           |
//! |-------------------------------|------------------------|
//! | `===`, `!==`                  | `==`, `!=`             |
//! | `'text'`                      | `"text"`               |
//! | `null`, `undefined`           | `()`                   |
//! | `function`, `var`, `const`    | `fn`, `let`, `let`     |
//! | `.length`                     | `.len()`               |
//! | `.includes(`, `.trim(`        | `.contains(`, `.trimmed(` |
//! | `(x => ..)`, `(x) => ..`      | `(\|x\| ..)`           |
//!
//! A leading `row =>` arrow and surrounding Markdown code fences are stripped.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\(\s*row\s*\)|row)\s*=>\s*").expect("valid arrow pattern")
});

/// Arrow parameter at the end of the rewritten text, directly after `(` or `,`.
static ARROW_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([(,]\s*)(?:\(\s*([A-Za-z_][A-Za-z0-9_]*)\s*\)|([A-Za-z_][A-Za-z0-9_]*))\s*$")
        .expect("valid arrow parameter pattern")
});

/// Strip a Markdown fence (```` ```rhai ... ``` ````) wrapped around the code.
fn strip_code_fence(code: &str) -> &str {
    let trimmed = code.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening line.
    match body.split_once('\n') {
        Some((tag, inner)) if !tag.trim().contains(char::is_whitespace) => inner.trim(),
        _ => body.trim(),
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Copy a double-quoted or backtick literal verbatim. Returns the index past it.
fn copy_literal(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    out.push(quote);
    let mut index = start + 1;
    while index < chars.len() {
        let ch = chars[index];
        out.push(ch);
        index += 1;
        if ch == '\\' && index < chars.len() {
            out.push(chars[index]);
            index += 1;
        } else if ch == quote {
            break;
        }
    }
    index
}

/// Convert a single-quoted literal into a double-quoted one.
fn convert_single_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut index = start + 1;
    while index < chars.len() {
        let ch = chars[index];
        index += 1;
        match ch {
            '\\' if index < chars.len() => {
                let escaped = chars[index];
                index += 1;
                if escaped == '\'' {
                    out.push('\'');
                } else {
                    out.push('\\');
                    out.push(escaped);
                }
            }
            '\'' => break,
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
    index
}

/// Copy a `//` or `/* */` comment verbatim. Returns the index past it.
fn copy_comment(chars: &[char], start: usize, out: &mut String) -> usize {
    let block = chars.get(start + 1) == Some(&'*');
    let mut index = start;
    while index < chars.len() {
        let ch = chars[index];
        if !block && ch == '\n' {
            break;
        }
        out.push(ch);
        index += 1;
        if block && ch == '/' && index - start > 3 && chars[index - 2] == '*' {
            break;
        }
    }
    index
}

fn next_non_space(chars: &[char], from: usize) -> Option<char> {
    chars[from..].iter().copied().find(|ch| !ch.is_whitespace())
}

/// Replace a trailing arrow parameter in `out` with a closure head.
fn rewrite_arrow(out: &mut String) -> bool {
    let Some(captures) = ARROW_PARAM.captures(out.as_str()) else {
        return false;
    };
    let Some(whole) = captures.get(0) else {
        return false;
    };
    let lead = captures.get(1).map_or("", |m| m.as_str()).to_string();
    let param = captures
        .get(2)
        .or_else(|| captures.get(3))
        .map_or("", |m| m.as_str())
        .to_string();
    if param == "_" {
        return false;
    }
    let start = whole.start();
    out.truncate(start);
    out.push_str(&lead);
    out.push('|');
    out.push_str(&param);
    out.push_str("| ");
    true
}

fn rewrite_identifier(word: &str, after_dot: bool, next: Option<char>) -> Option<&'static str> {
    if after_dot {
        return match (word, next) {
            ("length", next) if next != Some('(') => Some("len()"),
            ("includes", Some('(')) => Some("contains"),
            ("trim", Some('(')) => Some("trimmed"),
            _ => None,
        };
    }
    match word {
        "null" | "undefined" => Some("()"),
        "function" => Some("fn"),
        "var" | "const" => Some("let"),
        _ => None,
    }
}

/// Normalize model-emitted code into the compiler's dialect.
pub fn preprocess_code(code: &str) -> String {
    let code = strip_code_fence(code);
    let code = LEADING_ARROW.replace(code, "");
    let chars: Vec<char> = code.chars().collect();
    let mut out = String::with_capacity(code.len());
    let mut index = 0;
    let mut after_dot = false;

    while index < chars.len() {
        let ch = chars[index];
        let next = chars.get(index + 1).copied();
        match ch {
            '"' | '`' => {
                index = copy_literal(&chars, index, &mut out);
                after_dot = false;
            }
            '\'' => {
                index = convert_single_quoted(&chars, index, &mut out);
                after_dot = false;
            }
            '/' if matches!(next, Some('/' | '*')) => {
                index = copy_comment(&chars, index, &mut out);
            }
            '=' | '!' if next == Some('=') && chars.get(index + 2) == Some(&'=') => {
                out.push(ch);
                out.push('=');
                index += 3;
                after_dot = false;
            }
            '=' if next == Some('>') => {
                if !rewrite_arrow(&mut out) {
                    out.push_str("=>");
                }
                index += 2;
                after_dot = false;
            }
            '.' => {
                out.push(ch);
                index += 1;
                after_dot = true;
            }
            ch if is_ident_start(ch) => {
                let start = index;
                while index < chars.len() && is_ident_char(chars[index]) {
                    index += 1;
                }
                let word: String = chars[start..index].iter().collect();
                match rewrite_identifier(&word, after_dot, next_non_space(&chars, index)) {
                    Some(replacement) => out.push_str(replacement),
                    None => out.push_str(&word),
                }
                after_dot = false;
            }
            ch => {
                out.push(ch);
                index += 1;
                if !ch.is_whitespace() {
                    after_dot = false;
                }
            }
        }
    }

    out.trim().to_string()
}
