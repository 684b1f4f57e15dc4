//! Java `.properties` reading and writing
//!
//! Reading is permissive: anything that is not a comment becomes a key with a
//! possibly empty value. Writing emits one `key=value` line per entry with no
//! timestamp header.

use std::fmt::Write as _;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn parse(text: &str) -> Self {
        let mut props = Properties::default();
        let mut lines = text.lines();

        while let Some(first) = lines.next() {
            let first = first.trim_start();
            if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
                continue;
            }

            let mut logical = first.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some(next) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            props.entries.push((unescape(key), unescape(value)));
        }

        props
    }

    /// Value of the last entry with this key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a key, replacing every earlier entry for it
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();
        for (key, value) in &self.entries {
            escape_into(&mut out, key, true);
            out.push('=');
            escape_into(&mut out, value, false);
            out.push('\n');
        }
        out.into_bytes()
    }
}

fn ends_with_continuation(line: &str) -> bool {
    let backslashes = line.len() - line.trim_end_matches('\\').len();
    backslashes % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (key, rest.trim_start_matches([' ', '\t', '\x0c']))
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (idx, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' if is_key || idx == 0 => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || idx == 0 => out.push_str("\\ "),
            c if (c as u32) < 0x20 || (c as u32) > 0x7e => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04X}");
                }
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators_and_comments() {
        let props = Properties::parse(
            "# comment\n! also comment\n\na=1\nb : 2\nc 3\n  d=\nmoduleName=demo\n",
        );
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some(""));
        assert_eq!(props.get("moduleName"), Some("demo"));
        assert_eq!(props.get("# comment"), None);
    }

    #[test]
    fn test_parse_continuation_and_escapes() {
        let props = Properties::parse("list=a,\\\n    b,\\\n    c\nkey\\ with\\ space=v\\tx\nu=\\u0041\n");
        assert_eq!(props.get("list"), Some("a,b,c"));
        assert_eq!(props.get("key with space"), Some("v\tx"));
        assert_eq!(props.get("u"), Some("A"));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let props = Properties::parse("k=1\nk=2\n");
        assert_eq!(props.get("k"), Some("2"));
    }

    #[test]
    fn test_set_and_write() {
        let mut props = Properties::default();
        props.set("moduleName", "demo");
        props.set("extensionClasses", "r.B,c.D");
        props.set("moduleName", "other");
        let text = String::from_utf8(props.to_bytes()).unwrap();
        assert_eq!(text, "extensionClasses=r.B,c.D\nmoduleName=other\n");
    }

    #[test]
    fn test_write_escapes() {
        let mut props = Properties::default();
        props.set("a key", "caf\u{e9}");
        let bytes = props.to_bytes();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert_eq!(text, "a\\ key=caf\\u00E9\n");
        assert_eq!(
            Properties::parse(&text).get("a key"),
            Some("caf\u{e9}")
        );
    }
}
