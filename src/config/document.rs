//! INI documents: parsing and two-level layering.
//!
//! A [`ConfigDocument`] is an ordered mapping `section -> key -> value` where
//! every value is a raw string. Section and key names are case-sensitive.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// Keys and values of one section, in document order.
pub type Section = IndexMap<String, String>;

/// Parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    sections: IndexMap<String, Section>,
}

impl ConfigDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text.
    ///
    /// `source_name` is only used to label parse errors.
    ///
    /// Grammar:
    /// - `[Section Name]` opens (or reopens) a section
    /// - `key = value` or `key: value`, split on the first delimiter
    /// - lines starting with `#` or `;` are comments, blank lines are ignored
    /// - a line indented deeper than the key line that precedes it continues
    ///   that key's value; keys indented by the same amount are separate keys
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for a key outside any section, a line with no
    /// delimiter, an empty key, or an empty section name.
    pub fn parse(content: &str, source_name: &str) -> Result<Self> {
        let mut doc = Self::new();
        let mut current: Option<String> = None;
        // Key that may take continuation lines, with its indent width.
        let mut last_key: Option<(String, usize)> = None;

        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();
            let indent = raw.len() - raw.trim_start().len();

            if trimmed.is_empty() {
                last_key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Continuation: indented deeper than the line that opened the key
            if let (Some(section), Some((key, key_indent))) =
                (current.as_ref(), last_key.as_ref())
            {
                if indent > *key_indent {
                    if let Some(value) = doc
                        .sections
                        .get_mut(section)
                        .and_then(|s| s.get_mut(key))
                    {
                        value.push('\n');
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if let Some(inner) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                let name = inner.trim();
                if name.is_empty() {
                    return Err(Error::parse(source_name, line_no, "empty section name"));
                }
                doc.sections.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                last_key = None;
                continue;
            }

            let Some(section) = current.as_ref() else {
                return Err(Error::parse(
                    source_name,
                    line_no,
                    "key/value line before any [section] header",
                ));
            };

            let Some(split) = trimmed.find(['=', ':']) else {
                return Err(Error::parse(
                    source_name,
                    line_no,
                    format!("expected 'key = value', got '{trimmed}'"),
                ));
            };

            let key = trimmed[..split].trim();
            let value = trimmed[split + 1..].trim();
            if key.is_empty() {
                return Err(Error::parse(source_name, line_no, "empty key"));
            }

            doc.set(section, key, value);
            last_key = Some((key.to_string(), indent));
        }

        Ok(doc)
    }

    /// Set `[section] key = value`, creating the section if needed.
    pub fn set(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Look up a single value.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }

    /// Look up a whole section.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Whether a section header exists, even if the section is empty.
    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Iterate sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when the document has no sections at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Layer `overlay` on top of `self`, key by key.
    ///
    /// Keys present in `overlay` replace the value for that exact
    /// `(section, key)`; every other key keeps its current value. Sections
    /// only present in `overlay` are added. A section is never replaced as a
    /// whole.
    pub fn merge(&mut self, overlay: &Self) {
        for (name, section) in &overlay.sections {
            let target = self.sections.entry(name.clone()).or_default();
            for (key, value) in section {
                target.insert(key.clone(), value.clone());
            }
        }
    }

    /// Consuming form of [`ConfigDocument::merge`].
    #[must_use]
    pub fn merged(mut self, overlay: &Self) -> Self {
        self.merge(overlay);
        self
    }
}
