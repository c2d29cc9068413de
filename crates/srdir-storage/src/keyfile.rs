//! Minimal writer for GLib-style key files.
//!
//! The archive `metadata` file is a flat INI-like document:
//!
//! ```text
//! [global]
//! sigrok version=0.6.0
//!
//! [device 1]
//! samplerate=1 MHz
//! ```
//!
//! Groups and keys keep insertion order. Setting an existing key replaces its
//! value in place.

use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Group {
    name: String,
    entries: Vec<(String, String)>,
}

/// In-memory key file, serialized with [`KeyFile::to_data`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFile {
    groups: Vec<Group>,
}

impl KeyFile {
    /// Empty key file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` in `group` to a string value.
    pub fn set_string(&mut self, group: &str, key: &str, value: &str) {
        let group = match self.groups.iter().position(|g| g.name == group) {
            Some(idx) => &mut self.groups[idx],
            None => {
                self.groups.push(Group {
                    name: group.to_string(),
                    entries: Vec::new(),
                });
                let last = self.groups.len() - 1;
                &mut self.groups[last]
            }
        };

        let value = escape_value(value);
        match group.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => group.entries.push((key.to_string(), value)),
        }
    }

    /// Set `key` in `group` to a numeric value.
    pub fn set_integer(&mut self, group: &str, key: &str, value: impl Display) {
        self.set_string(group, key, &value.to_string());
    }

    /// Look up the serialized value of `key` in `group`.
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.name == group)?
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `group` contains `key`.
    pub fn has_key(&self, group: &str, key: &str) -> bool {
        self.get(group, key).is_some()
    }

    /// Serialize to text. Groups are separated by one blank line.
    pub fn to_data(&self) -> String {
        let mut out = String::new();
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push('[');
            out.push_str(&group.name);
            out.push_str("]\n");
            for (key, value) in &group.entries {
                out.push_str(key);
                out.push('=');
                out.push_str(value);
                out.push('\n');
            }
        }
        out
    }
}

/// Escape a value the way GLib does for string values.
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            ' ' if i == 0 => out.push_str("\\s"),
            '\t' if i == 0 => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_and_order() {
        let mut kf = KeyFile::new();
        kf.set_string("global", "sigrok version", "0.6.0");
        kf.set_string("device 1", "samplerate", "1 MHz");
        kf.set_integer("device 1", "total analog", 2);

        assert_eq!(
            kf.to_data(),
            "[global]\nsigrok version=0.6.0\n\n[device 1]\nsamplerate=1 MHz\ntotal analog=2\n"
        );
    }

    #[test]
    fn test_set_existing_key_replaces_in_place() {
        let mut kf = KeyFile::new();
        kf.set_integer("g", "a", 1);
        kf.set_integer("g", "b", 2);
        kf.set_integer("g", "a", 3);
        assert_eq!(kf.to_data(), "[g]\na=3\nb=2\n");
        assert_eq!(kf.get("g", "a"), Some("3"));
    }

    #[test]
    fn test_value_escaping() {
        let mut kf = KeyFile::new();
        kf.set_string("g", "name", " lead\\line\nbreak");
        assert_eq!(kf.get("g", "name"), Some("\\slead\\\\line\\nbreak"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(KeyFile::new().to_data(), "");
        assert!(!KeyFile::new().has_key("g", "k"));
    }
}
