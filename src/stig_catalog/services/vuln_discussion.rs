use super::xml_tree::{self, XmlValue};
use crate::shared::error::StigError;
use crate::shared::Result;

const VULN_DISCUSSION: &str = "VulnDiscussion";
const DIAGNOSTIC_DEST: &str = "DIAGNOSTIC_DEST";
const SUBJECT: &str = "Subject";

/// The encodings a rule's vulnerability discussion shows up in
#[derive(Debug, Clone, PartialEq)]
pub enum VulnDiscussion {
    /// `<VulnDiscussion>text</VulnDiscussion>`
    PlainText(String),
    /// A `DIAGNOSTIC_DEST` element inside the discussion replaces everything else
    DiagnosticDest(String),
    /// Mixed content, optionally followed by a `Subject` element
    TextWithSubject { text: String, subject: Option<String> },
}

impl VulnDiscussion {
    /// Decodes the escaped XML held in a rule's `description` and classifies
    /// its `VulnDiscussion` element
    pub fn from_description(description: &str) -> Result<Self> {
        let fragment = xml_tree::decode(description.as_bytes())
            .map_err(|e| StigError::parse(format!("description fragment: {}", e)))?;
        let value = fragment
            .child(VULN_DISCUSSION)
            .and_then(|values| values.first())
            .ok_or_else(|| StigError::parse("description has no VulnDiscussion element"))?;
        Self::classify(value)
    }

    /// Picks the first matching shape: DIAGNOSTIC_DEST, then text with optional
    /// Subject, then the plain value
    pub fn classify(value: &XmlValue) -> Result<Self> {
        match value {
            XmlValue::Text(text) => Ok(VulnDiscussion::PlainText(text.clone())),
            XmlValue::Node(node) => {
                if let Some(dest) = node.child(DIAGNOSTIC_DEST) {
                    let text = dest.first().and_then(XmlValue::text).ok_or_else(|| {
                        StigError::parse("DIAGNOSTIC_DEST in VulnDiscussion has no text")
                    })?;
                    return Ok(VulnDiscussion::DiagnosticDest(text.to_string()));
                }
                if let Some(text) = node.text() {
                    return Ok(VulnDiscussion::TextWithSubject {
                        text: text.to_string(),
                        subject: node.child_text(SUBJECT).map(str::to_string),
                    });
                }
                Err(StigError::parse(
                    "VulnDiscussion is neither text nor a recognised structure",
                ))
            }
        }
    }

    pub fn into_text(self) -> String {
        match self {
            VulnDiscussion::PlainText(text) | VulnDiscussion::DiagnosticDest(text) => text,
            VulnDiscussion::TextWithSubject { text, subject } => match subject {
                Some(subject) => format!("{}{}", text, subject),
                None => text,
            },
        }
    }
}
