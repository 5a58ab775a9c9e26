//! Character-level passes applied to each physical line.

/// Removes everything from the first unescaped `#` to the end of the line.
///
/// `\#` is replaced with a literal `#` and does not start a comment.
#[must_use]
pub fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());

    for ch in line.chars() {
        if ch == '#' {
            if out.ends_with('\\') {
                out.pop();
                out.push('#');
                continue;
            }
            break;
        }
        out.push(ch);
    }

    out
}

/// Collapses runs of whitespace to a single space.
///
/// Inside a run, a whitespace character directly after a backslash is kept
/// as-is. A backslash is only emitted when it follows another backslash,
/// so `\\` yields `\`. The input is expected to be trimmed; a whitespace
/// run at the very end is dropped.
#[must_use]
pub fn collapse_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev: Option<char> = None;
    let mut in_run = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        let escaped = prev == Some('\\');

        if ch == '\\' {
            if escaped {
                out.push('\\');
            }
        } else if ch.is_whitespace() {
            if in_run {
                if escaped {
                    out.push(ch);
                }
            } else {
                in_run = true;
                if chars.peek().is_some() {
                    out.push(' ');
                }
            }
        } else {
            out.push(ch);
            in_run = false;
        }

        prev = Some(ch);
    }

    out
}

/// Applies comment removal and whitespace collapsing to a trimmed line.
#[must_use]
pub fn normalize(line: &str) -> String {
    let stripped = strip_comment(line);
    collapse_whitespace(stripped.trim_end())
}
