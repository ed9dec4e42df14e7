use super::text::{clean_benchmark_title, normalize_text};
use super::xml_tree::{XmlNode, XmlValue};
use crate::shared::error::StigError;
use crate::shared::Result;
use crate::stig_catalog::domain::BenchmarkDraft;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

const BENCHMARK_ELEMENT: &str = "Benchmark";
const RELEASE_INFO_ID: &str = "release-info";

/// Release number in a "Release: 4 Benchmark Date: 27 Apr 2018" style string
static RELEASE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\D+(\d+)").expect("valid release regex"));

/// Benchmark metadata together with the Group nodes still to be normalized
#[derive(Debug, Clone)]
pub struct NormalizedBenchmark {
    pub draft: BenchmarkDraft,
    pub groups: Vec<XmlValue>,
}

/// BenchmarkNormalizer service for extracting benchmark metadata
///
/// Pure logic over a decoded document; it never touches the file system.
pub struct BenchmarkNormalizer;

impl BenchmarkNormalizer {
    /// Takes the `Benchmark` element out of a decoded document
    ///
    /// Namespace prefixes are tolerated (`xccdf:Benchmark`).
    pub fn benchmark_root(mut document: XmlNode) -> Result<XmlNode> {
        let name = document
            .children()
            .map(|(name, _)| name)
            .find(|name| local_name(name) == BENCHMARK_ELEMENT)
            .map(str::to_string)
            .ok_or_else(|| StigError::parse("document has no Benchmark element"))?;

        match document.take_child(&name).and_then(|values| values.into_vec().into_iter().next()) {
            Some(XmlValue::Node(node)) => Ok(node),
            _ => Err(StigError::parse("Benchmark element is empty")),
        }
    }

    /// Extracts title, description, version, release, date and the Group list
    pub fn normalize(mut benchmark: XmlNode) -> Result<NormalizedBenchmark> {
        let raw_title = benchmark
            .child_text("title")
            .ok_or_else(|| StigError::parse("benchmark has no title"))?;
        let title = clean_benchmark_title(raw_title);

        let description = benchmark
            .child_text("description")
            .map(normalize_text)
            .filter(|description| !description.trim().is_empty());
        if description.is_none() {
            tracing::debug!(title = %title, "benchmark has no description");
        }

        let version = Self::parse_version(&benchmark)?;
        let release = Self::parse_release(&benchmark)?;
        let date = Self::parse_status_date(&benchmark)?;

        let groups = benchmark
            .take_child("Group")
            .map(|groups| groups.into_vec())
            .unwrap_or_default();

        Ok(NormalizedBenchmark {
            draft: BenchmarkDraft {
                title,
                description,
                version,
                release,
                date,
            },
            groups,
        })
    }

    fn parse_version(benchmark: &XmlNode) -> Result<u32> {
        let raw = benchmark
            .child_text("version")
            .ok_or_else(|| StigError::parse("benchmark has no version"))?;
        raw.trim()
            .parse::<u32>()
            .map_err(|_| StigError::parse(format!("benchmark version '{}' is not an integer", raw)))
    }

    fn parse_release(benchmark: &XmlNode) -> Result<u32> {
        let plain_texts = benchmark
            .child("plain-text")
            .ok_or_else(|| StigError::parse("benchmark has no plain-text release information"))?;

        let release_info = plain_texts
            .iter()
            .find(|value| {
                value
                    .as_node()
                    .and_then(|node| node.attribute("id"))
                    .is_some_and(|id| id == RELEASE_INFO_ID)
            })
            .or_else(|| plain_texts.first())
            .and_then(XmlValue::text)
            .ok_or_else(|| StigError::parse("plain-text release information is empty"))?;

        Self::extract_release(release_info)
    }

    /// First integer after a non-digit prefix
    pub fn extract_release(release_info: &str) -> Result<u32> {
        let single_line = normalize_text(release_info);
        RELEASE_PATTERN
            .captures(&single_line)
            .and_then(|captures| captures.get(1))
            .and_then(|digits| digits.as_str().parse::<u32>().ok())
            .ok_or_else(|| {
                StigError::parse(format!(
                    "no release number found in '{}'",
                    single_line.trim()
                ))
            })
    }

    fn parse_status_date(benchmark: &XmlNode) -> Result<DateTime<Utc>> {
        let raw = benchmark
            .child("status")
            .into_iter()
            .flat_map(|statuses| statuses.iter())
            .filter_map(XmlValue::as_node)
            .find_map(|status| status.attribute("date"))
            .ok_or_else(|| StigError::parse("benchmark status has no date"))?;
        Self::parse_date(raw)
    }

    /// Accepts RFC 3339 timestamps and plain calendar dates (taken as midnight UTC)
    pub fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Ok(timestamp.with_timezone(&Utc));
        }
        ["%Y-%m-%d", "%d %b %Y", "%d %B %Y"]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .ok_or_else(|| StigError::parse(format!("unparseable benchmark date '{}'", raw)))
    }
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stig_catalog::services::xml_tree::decode;
    use chrono::TimeZone;

    fn benchmark_xml(body: &str) -> XmlNode {
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Benchmark xmlns=\"http://checklists.nist.gov/xccdf/1.1\" id=\"Test\">{}</Benchmark>",
            body
        );
        BenchmarkNormalizer::benchmark_root(decode(xml.as_bytes()).unwrap()).unwrap()
    }

    const COMPLETE: &str = r#"
        <status date="2021-01-22">accepted</status>
        <title>Windows 10 Security Technical Implementation Guide</title>
        <description>The Windows 10 STIG &amp; guidance
for hardening.</description>
        <plain-text id="release-info">Release: 23 Benchmark Date: 22 Jan 2021</plain-text>
        <version>2</version>
        <Group id="V-1"><Rule id="SV-1r1_rule" severity="high"/></Group>
        <Group id="V-2"><Rule id="SV-2r1_rule" severity="low"/></Group>
    "#;

    #[test]
    fn test_normalize_complete_benchmark() {
        let normalized = BenchmarkNormalizer::normalize(benchmark_xml(COMPLETE)).unwrap();
        let draft = &normalized.draft;

        assert_eq!(draft.title, "Windows 10");
        assert_eq!(
            draft.description.as_deref(),
            Some("The Windows 10 STIG & guidance for hardening.")
        );
        assert_eq!(draft.version, 2);
        assert_eq!(draft.release, 23);
        assert_eq!(draft.date, Utc.with_ymd_and_hms(2021, 1, 22, 0, 0, 0).unwrap());
        assert_eq!(normalized.groups.len(), 2);
        assert_eq!(draft.composite_title(), "Windows 10 v2 r23");
    }

    #[test]
    fn test_single_group_becomes_one_element_list() {
        let normalized = BenchmarkNormalizer::normalize(benchmark_xml(
            r#"<status date="2016-04-15"/><title>Citrix XenDesktop 7.x StoreFront STIG</title>
               <plain-text id="release-info">Release: 1</plain-text><version>1</version>
               <Group id="V-9"><Rule id="SV-9" severity="medium"/></Group>"#,
        ))
        .unwrap();
        assert_eq!(normalized.groups.len(), 1);
        assert_eq!(normalized.draft.title, "Citrix XenDesktop 7.x StoreFront");
    }

    #[test]
    fn test_missing_description_is_omitted() {
        let normalized = BenchmarkNormalizer::normalize(benchmark_xml(
            r#"<status date="2016-04-15"/><title>A</title>
               <plain-text>Release: 1</plain-text><version>1</version>"#,
        ))
        .unwrap();
        assert!(normalized.draft.description.is_none());
        assert!(normalized.groups.is_empty());
    }

    #[test]
    fn test_release_info_preferred_among_plain_texts() {
        let normalized = BenchmarkNormalizer::normalize(benchmark_xml(
            r#"<status date="2016-04-15"/><title>A</title>
               <plain-text id="generator">DISA 2.9</plain-text>
               <plain-text id="release-info">Release: 7 Benchmark Date: 1 Jan 2020</plain-text>
               <version>1</version>"#,
        ))
        .unwrap();
        assert_eq!(normalized.draft.release, 7);
    }

    #[test]
    fn test_missing_release_pattern_fails() {
        let result = BenchmarkNormalizer::normalize(benchmark_xml(
            r#"<status date="2016-04-15"/><title>A</title>
               <plain-text id="release-info">No release here</plain-text><version>1</version>"#,
        ));
        assert!(matches!(result, Err(StigError::Parse { .. })));
    }

    #[test]
    fn test_unparseable_date_fails() {
        let result = BenchmarkNormalizer::normalize(benchmark_xml(
            r#"<status date="sometime">accepted</status><title>A</title>
               <plain-text>Release: 1</plain-text><version>1</version>"#,
        ));
        let error = result.unwrap_err().to_string();
        assert!(error.contains("sometime"));
    }

    #[test]
    fn test_non_integer_version_fails() {
        let result = BenchmarkNormalizer::normalize(benchmark_xml(
            r#"<status date="2016-04-15"/><title>A</title>
               <plain-text>Release: 1</plain-text><version>one</version>"#,
        ));
        assert!(matches!(result, Err(StigError::Parse { .. })));
    }

    #[test]
    fn test_extract_release() {
        assert_eq!(
            BenchmarkNormalizer::extract_release("Release: 4 Benchmark Date: 27 Apr 2018").unwrap(),
            4
        );
        assert_eq!(BenchmarkNormalizer::extract_release("Release:\n12").unwrap(), 12);
        assert!(BenchmarkNormalizer::extract_release("12 only digits first").is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2018, 4, 27, 0, 0, 0).unwrap();
        assert_eq!(BenchmarkNormalizer::parse_date("2018-04-27").unwrap(), expected);
        assert_eq!(BenchmarkNormalizer::parse_date("27 Apr 2018").unwrap(), expected);
        assert_eq!(
            BenchmarkNormalizer::parse_date("2018-04-27T00:00:00Z").unwrap(),
            expected
        );
        assert!(BenchmarkNormalizer::parse_date("2018/99/99").is_err());
    }

    #[test]
    fn test_benchmark_root_with_prefix() {
        let document =
            decode(b"<cdf:Benchmark xmlns:cdf=\"urn:x\"><title>T</title></cdf:Benchmark>").unwrap();
        let root = BenchmarkNormalizer::benchmark_root(document).unwrap();
        assert_eq!(root.child_text("title"), Some("T"));
    }

    #[test]
    fn test_benchmark_root_missing() {
        let document = decode(b"<Other/>").unwrap();
        assert!(BenchmarkNormalizer::benchmark_root(document).is_err());
    }
}
