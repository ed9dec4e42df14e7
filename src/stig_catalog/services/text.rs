use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("valid line break regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static GUIDE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bsecurity[\W_]+technical[\W_]+implementation[\W_]+guide\b")
        .expect("valid guide phrase regex")
});

static EMPTY_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\)").expect("valid empty parens regex"));

/// Decodes HTML entities and folds every CR/LF run into one space
pub fn normalize_text(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    LINE_BREAKS.replace_all(&decoded, " ").into_owned()
}

/// Strips the "STIG" marker and the spelled-out guide name from a benchmark title
///
/// Repeats until stable so that removals cannot splice together a new match.
pub fn clean_benchmark_title(raw: &str) -> String {
    let mut title = normalize_text(raw);
    loop {
        let mut next = GUIDE_PHRASE.replace_all(&title, " ").into_owned();
        next = next.replace("STIG", "");
        next = WHITESPACE.replace_all(&next, " ").into_owned();
        next = EMPTY_PARENS.replace_all(&next, " ").into_owned();
        next = WHITESPACE.replace_all(&next, " ").trim().to_string();
        if next == title {
            return next;
        }
        title = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_decodes_entities() {
        assert_eq!(normalize_text("A &amp; B &lt;c&gt; &quot;d&quot;"), "A & B <c> \"d\"");
    }

    #[test]
    fn test_normalize_text_folds_line_breaks() {
        assert_eq!(normalize_text("one\r\ntwo\n\nthree\rfour"), "one two three four");
        assert!(!normalize_text("a&#10;b&#13;c").contains(['\r', '\n']));
    }

    #[test]
    fn test_normalize_text_keeps_other_whitespace() {
        assert_eq!(normalize_text("a  b\tc"), "a  b\tc");
    }

    #[test]
    fn test_clean_title_removes_stig_marker() {
        assert_eq!(clean_benchmark_title("Windows 10 STIG"), "Windows 10");
        assert_eq!(
            clean_benchmark_title("A10 Networks ADC ALG STIG"),
            "A10 Networks ADC ALG"
        );
    }

    #[test]
    fn test_clean_title_removes_guide_phrase() {
        assert_eq!(
            clean_benchmark_title("Red Hat 7 Security Technical Implementation Guide"),
            "Red Hat 7"
        );
        assert_eq!(
            clean_benchmark_title("Citrix XenDesktop (Security Technical Implementation Guide)"),
            "Citrix XenDesktop"
        );
        assert_eq!(
            clean_benchmark_title("Oracle SECURITY-technical_implementation\nGUIDE Database"),
            "Oracle Database"
        );
    }

    #[test]
    fn test_clean_title_keeps_unrelated_words() {
        assert_eq!(
            clean_benchmark_title("Network Security Guide"),
            "Network Security Guide"
        );
    }

    #[test]
    fn test_clean_title_is_stable_against_splicing() {
        let cleaned = clean_benchmark_title("STSTIGIG Router");
        assert!(!cleaned.contains("STIG"));
        assert_eq!(cleaned, "Router");
    }

    #[test]
    fn test_clean_title_collapses_whitespace() {
        assert_eq!(clean_benchmark_title("  Apache   2.4\r\n STIG  "), "Apache 2.4");
    }
}
