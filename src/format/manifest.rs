//! JAR manifest reading and writing
//!
//! A manifest is a main section followed by optional per-entry sections, each a
//! block of `Key: value` headers separated by blank lines. Lines longer than 72
//! bytes continue on the next line after a single leading space. Header names
//! compare case-insensitively.

use thiserror::Error;

pub const MANIFEST_VERSION: &str = "Manifest-Version";
pub const MAIN_CLASS: &str = "Main-Class";

const LINE_LIMIT: usize = 72;
const NEWLINE: &str = "\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("manifest is not valid UTF-8")]
    Encoding,
}

/// Ordered header list with case-insensitive names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, overwriting any same-named header in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self
            .entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-entry section introduced by a `Name:` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub main: Attributes,
    pub sections: Vec<Section>,
}

impl Manifest {
    pub fn parse(bytes: &[u8]) -> Result<Self, ManifestError> {
        let text = std::str::from_utf8(bytes).map_err(|_| ManifestError::Encoding)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut manifest = Manifest::default();
        let mut current: Vec<(String, String)> = Vec::new();
        let mut in_main = true;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            if line.is_empty() {
                manifest.close_section(&mut current, &mut in_main, line_no)?;
                continue;
            }

            if let Some(continued) = line.strip_prefix(' ') {
                match current.last_mut() {
                    Some((_, value)) => value.push_str(continued),
                    None => {
                        return Err(ManifestError::Malformed {
                            line: line_no,
                            reason: "continuation line without a header".to_string(),
                        });
                    }
                }
                continue;
            }

            let (name, value) = split_header(line).ok_or_else(|| ManifestError::Malformed {
                line: line_no,
                reason: format!("invalid header '{line}'"),
            })?;
            current.push((name.to_string(), value.to_string()));
        }
        manifest.close_section(&mut current, &mut in_main, 0)?;

        Ok(manifest)
    }

    fn close_section(
        &mut self,
        current: &mut Vec<(String, String)>,
        in_main: &mut bool,
        line_no: usize,
    ) -> Result<(), ManifestError> {
        if current.is_empty() {
            // Blank lines between sections still end the main section
            *in_main = false;
            return Ok(());
        }

        let headers = std::mem::take(current);
        if *in_main {
            for (k, v) in headers {
                self.main.insert(k, v);
            }
            *in_main = false;
            return Ok(());
        }

        let mut headers = headers.into_iter();
        let name = match headers.next() {
            Some((k, v)) if k.eq_ignore_ascii_case("Name") => v,
            _ => {
                return Err(ManifestError::Malformed {
                    line: line_no,
                    reason: "entry section does not start with Name".to_string(),
                });
            }
        };
        let mut attributes = Attributes::default();
        for (k, v) in headers {
            attributes.insert(k, v);
        }
        self.sections.push(Section { name, attributes });
        Ok(())
    }

    /// Serialize with `Manifest-Version` first, CRLF line ends and 72-byte lines
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();

        let version = self.main.get(MANIFEST_VERSION).unwrap_or("1.0");
        write_header(&mut out, MANIFEST_VERSION, version);
        for (k, v) in self.main.iter() {
            if !k.eq_ignore_ascii_case(MANIFEST_VERSION) {
                write_header(&mut out, k, v);
            }
        }
        out.push_str(NEWLINE);

        for section in &self.sections {
            write_header(&mut out, "Name", &section.name);
            for (k, v) in section.attributes.iter() {
                write_header(&mut out, k, v);
            }
            out.push_str(NEWLINE);
        }

        out.into_bytes()
    }
}

fn split_header(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_name {
        return None;
    }
    Some((name, value.strip_prefix(' ').unwrap_or(value)))
}

fn write_header(out: &mut String, name: &str, value: &str) {
    let line = format!("{name}: {value}");
    let mut rest = line.as_str();
    let mut limit = LINE_LIMIT;

    while rest.len() > limit {
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push_str(&rest[..cut]);
        out.push_str(NEWLINE);
        out.push(' ');
        rest = &rest[cut..];
        limit = LINE_LIMIT - 1;
    }
    out.push_str(rest);
    out.push_str(NEWLINE);
}
