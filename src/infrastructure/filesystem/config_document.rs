//! Ordered, format-preserving model of a section-structured config file.
//!
//! The document is kept as raw lines: a preamble followed by sections, each a
//! header line plus its body lines up to the next line starting with `[`.
//! Serializing joins everything back with `\n`, so sections that are never
//! touched come out byte-for-byte identical, trailing newline included.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::entities::credentials::Credentials;

const CREDENTIAL_PREFIX: &str = "[credential";

fn credential_header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"^\[credential "(.*)"\]$"#).expect("valid regex"))
}

/// Header line for the credential section of `url`
pub fn credential_header(url: &str) -> String {
    format!("[credential \"{}\"]", url)
}

/// One `[...]` block with its raw lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    header: String,
    body: Vec<String>,
}

impl Section {
    fn new(header: String) -> Self {
        Self {
            header,
            body: Vec::new(),
        }
    }

    /// New credential section in the canonical tab-indented layout
    pub fn credential(creds: &Credentials) -> Self {
        Self {
            header: credential_header(&creds.url),
            body: vec![
                format!("\tusername = {}", creds.username),
                format!("\tpassword = {}", creds.password),
            ],
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Any header starting with `[credential`, quoted or not
    pub fn is_credential(&self) -> bool {
        self.header.trim().starts_with(CREDENTIAL_PREFIX)
    }

    /// URL of a well-formed `[credential "<url>"]` header
    pub fn credential_url(&self) -> Option<&str> {
        credential_header_pattern()
            .captures(self.header.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// `key = value` pairs of the body in file order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.body.iter().filter_map(|line| {
            let (key, value) = line.trim().split_once('=')?;
            Some((key.trim(), value.trim()))
        })
    }

    /// Last value recorded for `key`
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .last()
    }

    /// Credentials held by this section, if it is a well-formed credential block
    pub fn credentials(&self) -> Option<Credentials> {
        let url = self.credential_url()?;
        Some(Credentials::new(
            url,
            self.field("username").unwrap_or_default(),
            self.field("password").unwrap_or_default(),
        ))
    }
}

/// Parsed document: preamble lines, then sections in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    preamble: Vec<String>,
    sections: Vec<Section>,
}

impl ConfigDocument {
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::default();

        for line in text.split('\n') {
            if line.trim().starts_with('[') {
                doc.sections.push(Section::new(line.to_string()));
            } else if let Some(section) = doc.sections.last_mut() {
                section.body.push(line.to_string());
            } else {
                doc.preamble.push(line.to_string());
            }
        }

        doc
    }

    pub fn serialize(&self) -> String {
        let lines = self
            .preamble
            .iter()
            .map(String::as_str)
            .chain(self.sections.iter().flat_map(|s| {
                std::iter::once(s.header.as_str()).chain(s.body.iter().map(String::as_str))
            }));
        lines.collect::<Vec<_>>().join("\n")
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Drop every section whose header is exactly the credential header of `url`.
    /// Returns how many were removed.
    pub fn remove_credential(&mut self, url: &str) -> usize {
        let header = credential_header(url);
        let before = self.sections.len();
        self.sections.retain(|s| s.header.trim() != header);
        before - self.sections.len()
    }

    /// Drop every credential section regardless of URL
    pub fn remove_all_credentials(&mut self) -> usize {
        let before = self.sections.len();
        self.sections.retain(|s| !s.is_credential());
        before - self.sections.len()
    }

    /// Last credential section with URL, username and password all present
    pub fn last_complete_credentials(&self) -> Option<Credentials> {
        self.sections
            .iter()
            .filter_map(Section::credentials)
            .filter(Credentials::is_complete)
            .last()
    }
}
