//! Logical line scanner shared by the OBJ and MTL parsers.
//!
//! Strips `#` comments, joins lines ending in `\`, and skips lines that end up
//! empty. Each logical line is split into a directive keyword and the rest.

use std::borrow::Cow;
use std::iter::Enumerate;
use std::str::SplitWhitespace;

/// A directive line after comment stripping and continuation joining.
#[derive(Clone, Debug, PartialEq)]
pub struct LogicalLine<'a> {
    /// 1-based physical line number of the first joined line.
    pub number: usize,
    pub text: Cow<'a, str>,
}

impl LogicalLine<'_> {
    /// Leading directive keyword (`v`, `f`, `newmtl`, ...).
    pub fn keyword(&self) -> &str {
        self.split().0
    }

    /// Everything after the keyword, with surrounding whitespace removed.
    pub fn rest(&self) -> &str {
        self.split().1
    }

    /// Whitespace-separated arguments after the keyword.
    pub fn args(&self) -> SplitWhitespace<'_> {
        self.rest().split_whitespace()
    }

    fn split(&self) -> (&str, &str) {
        let text: &str = &self.text;
        match text.find(char::is_whitespace) {
            Some(pos) => (&text[..pos], text[pos..].trim()),
            None => (text, ""),
        }
    }
}

/// Lazy iterator of [`LogicalLine`]s over a text document.
pub struct LineScanner<'a> {
    lines: Enumerate<PhysicalLines<'a>>,
}

impl<'a> LineScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            lines: PhysicalLines { rest: text }.enumerate(),
        }
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = LogicalLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (idx, raw) = self.lines.next()?;
            let content = strip_comment(raw).trim();

            let Some(head) = content.strip_suffix('\\') else {
                if content.is_empty() {
                    continue;
                }
                return Some(LogicalLine {
                    number: idx + 1,
                    text: Cow::Borrowed(content),
                });
            };

            let mut joined = String::from(head.trim_end());
            while let Some((_, raw)) = self.lines.next() {
                let part = strip_comment(raw).trim();
                let (part, more) = match part.strip_suffix('\\') {
                    Some(p) => (p.trim_end(), true),
                    None => (part, false),
                };
                if !part.is_empty() {
                    if !joined.is_empty() {
                        joined.push(' ');
                    }
                    joined.push_str(part);
                }
                if !more {
                    break;
                }
            }

            if joined.is_empty() {
                continue;
            }
            return Some(LogicalLine {
                number: idx + 1,
                text: Cow::Owned(joined),
            });
        }
    }
}

/// Physical lines ended by `\n`, `\r\n` or a lone `\r`.
struct PhysicalLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let Some(pos) = self.rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut self.rest));
        };
        let line = &self.rest[..pos];
        let end = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[pos + end..];
        Some(line)
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}
