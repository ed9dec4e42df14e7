use super::text::normalize_text;
use super::vuln_discussion::VulnDiscussion;
use super::xml_tree::{OneOrMany, XmlNode, XmlValue};
use crate::shared::error::StigError;
use crate::shared::Result;
use crate::stig_catalog::domain::{RuleDraft, Severity};
use std::str::FromStr;

/// RuleNormalizer service for turning one XCCDF `Group` into a rule
pub struct RuleNormalizer;

impl RuleNormalizer {
    /// Normalizes a `Group` node
    ///
    /// The Group's `id` becomes the STIG ID. Its `Rule` child is either a
    /// single element or a list; for a list only the first rule is used.
    ///
    /// # Errors
    /// Returns `Parse` when the Group or Rule id, the title or the version is
    /// missing, the severity is missing or not one of high/medium/low, or the
    /// description does not contain a usable VulnDiscussion.
    pub fn normalize(group: &XmlValue) -> Result<RuleDraft> {
        let group = group
            .as_node()
            .ok_or_else(|| StigError::parse("Group element has no content"))?;
        let stig_id = group
            .attribute("id")
            .ok_or_else(|| StigError::parse("Group is missing its id attribute"))?;

        Self::normalize_rule(stig_id, group)
            .map_err(|e| match e {
                StigError::Parse { details } => {
                    StigError::parse(format!("group {}: {}", stig_id, details))
                }
                other => other,
            })
    }

    fn normalize_rule(stig_id: &str, group: &XmlNode) -> Result<RuleDraft> {
        let rule = match group.child("Rule") {
            Some(OneOrMany::Single(rule)) => rule,
            Some(OneOrMany::Many(rules)) => rules
                .first()
                .ok_or_else(|| StigError::parse("Rule list is empty"))?,
            None => return Err(StigError::parse("Group has no Rule")),
        };
        let rule = rule
            .as_node()
            .ok_or_else(|| StigError::parse("Rule element has no attributes"))?;

        let rule_id = rule
            .attribute("id")
            .ok_or_else(|| StigError::parse("Rule is missing its id attribute"))?;
        let severity = Self::parse_severity(rule)?;

        let title = rule
            .child_text("title")
            .map(normalize_text)
            .ok_or_else(|| StigError::parse(format!("rule {} has no title", rule_id)))?;
        let version = rule
            .child_text("version")
            .map(normalize_text)
            .ok_or_else(|| StigError::parse(format!("rule {} has no version", rule_id)))?;
        let fix_text = rule.child_text("fixtext").map(normalize_text).unwrap_or_default();
        let check_text = Self::check_content(rule).map(normalize_text).unwrap_or_default();

        let raw_description = rule
            .child_text("description")
            .ok_or_else(|| StigError::parse(format!("rule {} has no description", rule_id)))?;
        let description =
            normalize_text(&VulnDiscussion::from_description(raw_description)?.into_text());

        Ok(RuleDraft {
            stig_id: normalize_text(stig_id),
            rule_id: normalize_text(rule_id),
            severity,
            title,
            version,
            description,
            fix_text,
            check_text,
        })
    }

    fn parse_severity(rule: &XmlNode) -> Result<Severity> {
        let raw = rule
            .attribute("severity")
            .ok_or_else(|| StigError::parse("Rule is missing its severity attribute"))?;
        Severity::from_str(raw.trim()).map_err(StigError::parse)
    }

    /// `check/check-content` of the first check that has any
    fn check_content(rule: &XmlNode) -> Option<&str> {
        rule.child("check")?
            .iter()
            .filter_map(XmlValue::as_node)
            .find_map(|check| check.child_text("check-content"))
    }
}
