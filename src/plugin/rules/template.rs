use crate::context::LibraryContext;
use crate::plugin::CheckError;
use crate::tags::{TagField, TrackTags};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        field: TagField,
        width: usize,
        trim: bool,
    },
}

/// Expected location of a file relative to the library root, extension
/// excluded, e.g. `{albumartist}/{year}-{album}/{disc:02}_{track:02}-{title}`.
///
/// `{field:0N}` left-pads the value with zeros to `N` characters.
/// `{field:trim}` strips leading and trailing dots from the value, then
/// trailing whitespace. `{{` and `}}` are literal braces. Empty path
/// components, e.g. from a missing `{albumartist}`, are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template.
    ///
    /// # Errors
    /// Returns a description of the problem for unbalanced braces, unknown
    /// fields, bad padding specs and empty templates.
    pub fn parse(source: &str) -> Result<Self, String> {
        if source.trim().is_empty() {
            return Err("path template is empty".to_string());
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut placeholder = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(inner) => placeholder.push(inner),
                            None => return Err(format!("unclosed '{{' in path template '{source}'")),
                        }
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_placeholder(&placeholder)?);
                }
                '}' => return Err(format!("unmatched '}}' in path template '{source}'")),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Render the expected relative path (without extension) for `tags`.
    #[must_use]
    pub fn render(&self, tags: &TrackTags) -> String {
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Field { field, width, trim } => {
                    let mut value = sanitize(&tags.get(*field).unwrap_or_default());
                    if *trim {
                        value = value.trim_matches('.').trim_end().to_string();
                    }
                    rendered.push_str(&format!("{value:0>width$}"));
                }
            }
        }

        rendered
            .split('/')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Compare the file's location against the rendered template.
    ///
    /// # Errors
    /// [`CheckError::Assertion`] when the paths differ, and
    /// [`CheckError::Evaluation`] when the relative path is not valid UTF-8.
    pub fn check(&self, ctx: &LibraryContext) -> Result<(), CheckError> {
        let stem = ctx.rel_path().with_extension("");
        let mut parts = Vec::new();
        for component in stem.components() {
            let part = component.as_os_str().to_str().ok_or_else(|| {
                CheckError::evaluation(format!(
                    "path {} is not valid UTF-8",
                    ctx.rel_path().display()
                ))
            })?;
            parts.push(part);
        }
        let actual = parts.join("/");
        let expected = self.render(ctx.tags());

        if actual == expected {
            Ok(())
        } else {
            Err(CheckError::assertion(format!(
                "expected path '{expected}', found '{actual}'"
            )))
        }
    }
}

fn parse_placeholder(placeholder: &str) -> Result<Segment, String> {
    let (name, spec) = match placeholder.split_once(':') {
        Some((name, spec)) => (name.trim(), Some(spec.trim())),
        None => (placeholder.trim(), None),
    };

    let field = TagField::from_name(name)
        .ok_or_else(|| format!("unknown tag field '{name}' in path template"))?;

    let (width, trim) = match spec {
        None => (0, false),
        Some("trim") => (0, true),
        Some(spec) => {
            let width = spec
                .strip_prefix('0')
                .and_then(|digits| digits.parse::<usize>().ok())
                .ok_or_else(|| {
                    format!("invalid format '{spec}' for field '{name}', expected e.g. '02' or 'trim'")
                })?;
            (width, false)
        }
    };

    Ok(Segment::Field { field, width, trim })
}

/// Make a tag value safe to use as part of a file name.
#[must_use]
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter_map(|c| match c {
            '*' => Some('.'),
            '?' => None,
            ':' | '/' | '\\' => Some('-'),
            '<' | '>' | '|' => Some('_'),
            other => Some(other),
        })
        .collect()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
