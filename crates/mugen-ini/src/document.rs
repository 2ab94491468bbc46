//! Parsed document model.
//!
//! A [`Document`] is an ordered list of [`Section`]s; each section holds an
//! ordered list of [`KeyValue`] pairs. Names and keys are stored lowercase,
//! values are kept verbatim (trimmed, comment stripped). Duplicate section
//! names and duplicate keys are both retained.

use std::fmt::{self, Write as _};

use serde::Serialize;

/// One `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A `[header]` and the pairs that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    name: String,
    position: usize,
    entries: Vec<KeyValue>,
}

impl Section {
    /// Creates an empty section. `name` is lowercased.
    pub fn new(name: &str, position: usize) -> Self {
        Self {
            name: name.to_lowercase(),
            position,
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, key: String, value: String) {
        self.entries.push(KeyValue { key, value });
    }

    /// Lowercased header text between the brackets.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based ordinal of this section in its document.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn entries(&self) -> &[KeyValue] {
        &self.entries
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|kv| kv.key == key)
            .map(KeyValue::value)
    }

    /// Every value stored under `key`, in source order.
    pub fn get_all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> + 'a {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .filter(move |kv| kv.key == key)
            .map(KeyValue::value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(KeyValue::key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered sequence of sections produced by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub(crate) fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// First section called `name` (case-insensitive).
    pub fn section(&self, name: &str) -> Option<&Section> {
        let name = name.to_lowercase();
        self.sections.iter().find(|s| s.name == name)
    }

    /// All sections called `name` (case-insensitive), in source order.
    pub fn sections_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Section> + 'a {
        let name = name.to_lowercase();
        self.sections.iter().filter(move |s| s.name == name)
    }

    /// Section at `position`, or `None` when out of range.
    pub fn section_at(&self, position: usize) -> Option<&Section> {
        self.sections.get(position)
    }

    /// Section following `section` in document order.
    pub fn next_section(&self, section: &Section) -> Option<&Section> {
        self.section_at(section.position + 1)
    }

    /// First value of `key` in the first section called `section`.
    pub fn named_property(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Like [`Document::named_property`], falling back when either the
    /// section or the key is absent.
    pub fn value_or<'a>(&'a self, section: &str, key: &str, fallback: &'a str) -> &'a str {
        self.named_property(section, key).unwrap_or(fallback)
    }

    /// Renders the document back to INI text (comments are not preserved).
    pub fn to_ini_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, section) in self.sections.iter().enumerate() {
            if idx > 0 {
                f.write_char('\n')?;
            }
            writeln!(f, "[{}]", section.name)?;
            for kv in &section.entries {
                writeln!(f, "{} = {}", kv.key, kv.value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;

    const SAMPLE: &str = "\
[Statedef 0]
type = S
anim = 0

[State 0, 1]
type = ChangeAnim
trigger1 = Anim != 0
trigger1 = Time = 0
value = 0

[State 0, 2]
type = VelSet
trigger1 = 1
x = 0
";

    #[test]
    fn lookups_by_name_and_position() {
        let doc = parse_str(SAMPLE).expect("parse");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.section("STATEDEF 0").map(Section::position), Some(0));
        assert_eq!(doc.section("state 0, 2").map(Section::position), Some(2));
        assert_eq!(doc.section_at(1).map(Section::name), Some("state 0, 1"));
        assert!(doc.section_at(3).is_none());
    }

    #[test]
    fn duplicate_keys_are_retained() {
        let doc = parse_str(SAMPLE).expect("parse");
        let state = doc.section_at(1).expect("state");
        assert_eq!(state.get("trigger1"), Some("Anim != 0"));
        let all: Vec<&str> = state.get_all("TRIGGER1").collect();
        assert_eq!(all, vec!["Anim != 0", "Time = 0"]);
    }

    #[test]
    fn next_section_follows_order() {
        let doc = parse_str(SAMPLE).expect("parse");
        let first = doc.section_at(0).expect("first");
        let next = doc.next_section(first).expect("next");
        assert_eq!(next.name(), "state 0, 1");
        let last = doc.section_at(2).expect("last");
        assert!(doc.next_section(last).is_none());
    }

    #[test]
    fn value_or_falls_back() {
        let doc = parse_str("[Info]\nname = \"Kung Fu Man\"\n").expect("parse");
        assert_eq!(doc.value_or("Info", "name", "x"), "\"Kung Fu Man\"");
        assert_eq!(doc.value_or("Info", "localcoord", "320,240"), "320,240");
        assert_eq!(doc.value_or("Files", "cmd", "blank.cmd"), "blank.cmd");
    }

    #[test]
    fn renders_ini_text() {
        let doc = parse_str("[A]\nx=1\n[b]\ny = two words\n").expect("parse");
        assert_eq!(doc.to_ini_string(), "[a]\nx = 1\n\n[b]\ny = two words\n");
    }
}
