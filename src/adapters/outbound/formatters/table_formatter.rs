use crate::application::read_models::RuleDetailView;
use crate::ports::outbound::CatalogFormatter;
use crate::shared::Result;
use crate::stig_catalog::domain::{Benchmark, Rule, Severity};
use owo_colors::OwoColorize;

/// Width at which the title column wraps
const TITLE_WIDTH: usize = 55;

/// Width at which long free text in rule details wraps
const DETAIL_WIDTH: usize = 100;

/// Gap between table columns
const COLUMN_GAP: &str = "  ";

const BENCHMARK_HEADERS: [&str; 5] = ["ID", "Title", "Ver.", "Rel.", "Date"];
const RULE_HEADERS: [&str; 4] = ["Severity", "Title", "STIG ID", "Rule ID"];

/// TableFormatter adapter rendering aligned text tables
///
/// Colour is applied after padding, so alignment is the same whether or not
/// it is enabled.
pub struct TableFormatter {
    colored: bool,
}

impl TableFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn header(&self, text: &str) -> String {
        if self.colored {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn severity(&self, severity: Severity, padded: &str) -> String {
        if !self.colored {
            return padded.to_string();
        }
        match severity {
            Severity::High => padded.red().to_string(),
            Severity::Medium => padded.yellow().to_string(),
            Severity::Low => padded.green().to_string(),
        }
    }

    /// Renders rows whose cells may span several lines
    ///
    /// `styles` receives (row, column, padded text) and returns the text to
    /// print, so callers can colour individual cells.
    fn render_table<F>(&self, headers: &[&str], rows: &[Vec<Vec<String>>], style: F) -> String
    where
        F: Fn(usize, usize, &str) -> String,
    {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (column, lines) in row.iter().enumerate() {
                for line in lines {
                    widths[column] = widths[column].max(line.chars().count());
                }
            }
        }

        let mut output = String::new();
        let header_cells: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(header, &width)| self.header(&pad(header, width)))
            .collect();
        push_line(&mut output, &header_cells);
        let rules: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
        push_line(&mut output, &rules);

        for (row_number, row) in rows.iter().enumerate() {
            let height = row.iter().map(Vec::len).max().unwrap_or(1).max(1);
            for line_number in 0..height {
                let cells: Vec<String> = row
                    .iter()
                    .enumerate()
                    .map(|(column, lines)| {
                        let text = lines.get(line_number).map(String::as_str).unwrap_or("");
                        let padded = pad(text, widths[column]);
                        if line_number == 0 {
                            style(row_number, column, &padded)
                        } else {
                            padded
                        }
                    })
                    .collect();
                push_line(&mut output, &cells);
            }
        }
        output
    }

    fn detail_field(output: &mut String, label: &str, value: &str) {
        output.push_str(label);
        output.push('\n');
        if value.is_empty() {
            output.push_str("    (none)\n");
            return;
        }
        for line in wrap(value, DETAIL_WIDTH) {
            output.push_str("    ");
            output.push_str(&line);
            output.push('\n');
        }
    }
}

impl CatalogFormatter for TableFormatter {
    fn format_benchmarks(&self, benchmarks: &[Benchmark]) -> Result<String> {
        let rows: Vec<Vec<Vec<String>>> = benchmarks
            .iter()
            .map(|benchmark| {
                vec![
                    vec![benchmark.index.to_string()],
                    wrap(&benchmark.title, TITLE_WIDTH),
                    vec![benchmark.version.to_string()],
                    vec![benchmark.release.to_string()],
                    vec![benchmark.date.format("%Y-%m-%d").to_string()],
                ]
            })
            .collect();
        Ok(self.render_table(&BENCHMARK_HEADERS, &rows, |_, _, text| text.to_string()))
    }

    fn format_rules(&self, rules: &[Rule]) -> Result<String> {
        let rows: Vec<Vec<Vec<String>>> = rules
            .iter()
            .map(|rule| {
                vec![
                    vec![rule.severity.to_string()],
                    wrap(&rule.title, TITLE_WIDTH),
                    vec![rule.stig_id.clone()],
                    vec![rule.rule_id.clone()],
                ]
            })
            .collect();
        Ok(self.render_table(&RULE_HEADERS, &rows, |row, column, text| {
            if column == 0 {
                self.severity(rules[row].severity, text)
            } else {
                text.to_string()
            }
        }))
    }

    fn format_rule_details(&self, details: &[RuleDetailView]) -> Result<String> {
        let mut output = String::new();
        for (position, detail) in details.iter().enumerate() {
            if position > 0 {
                output.push_str(&"=".repeat(DETAIL_WIDTH));
                output.push('\n');
            }
            let rule = &detail.rule;
            output.push_str(&format!("{} {}\n", self.header("Benchmark:"), detail.benchmark_title));
            output.push_str(&format!("{} {}\n", self.header("Title:    "), rule.title));
            output.push_str(&format!(
                "{} {}    {} {}\n",
                self.header("STIG ID:  "),
                rule.stig_id,
                self.header("Rule ID:"),
                rule.rule_id
            ));
            output.push_str(&format!("{} {}\n", self.header("Version:  "), rule.version));
            output.push_str(&format!(
                "{} {}\n\n",
                self.header("Severity: "),
                self.severity(rule.severity, rule.severity.as_str())
            ));
            Self::detail_field(&mut output, &self.header("Description:"), &rule.description);
            output.push('\n');
            Self::detail_field(&mut output, &self.header("Check Text:"), &rule.check_text);
            output.push('\n');
            Self::detail_field(&mut output, &self.header("Fix Text:"), &rule.fix_text);
        }
        Ok(output)
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(fill))
}

fn push_line(output: &mut String, cells: &[String]) {
    output.push_str(cells.join(COLUMN_GAP).trim_end());
    output.push('\n');
}

/// Greedy word wrap; words longer than `width` are split
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stig_catalog::domain::{BenchmarkDraft, BenchmarkIndex, RuleDraft};
    use chrono::{TimeZone, Utc};

    fn benchmark(title: &str) -> Benchmark {
        BenchmarkDraft {
            title: title.to_string(),
            description: None,
            version: 1,
            release: 4,
            date: Utc.with_ymd_and_hms(2018, 4, 27, 0, 0, 0).unwrap(),
        }
        .into_benchmark(BenchmarkIndex::new(12))
    }

    fn rule(severity: Severity, title: &str) -> Rule {
        RuleDraft {
            stig_id: "V-68105".to_string(),
            rule_id: "SV-82595r1_rule".to_string(),
            severity,
            title: title.to_string(),
            version: "AADC-AG-000125".to_string(),
            description: "Discussion".to_string(),
            fix_text: String::new(),
            check_text: "Review the configuration.".to_string(),
        }
        .attach(BenchmarkIndex::new(12))
    }

    #[test]
    fn test_wrap_at_width() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert!(lines.iter().all(|line| line.chars().count() <= 9));
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn test_benchmark_table() {
        let output = TableFormatter::new(false)
            .format_benchmarks(&[benchmark("A10 Networks ADC ALG")])
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].contains("Title"));
        assert!(lines[0].ends_with("Date"));
        assert!(lines[1].starts_with("--"));
        assert!(lines[2].starts_with("12"));
        assert!(lines[2].contains("A10 Networks ADC ALG v1 r4"));
        assert!(lines[2].ends_with("2018-04-27"));
    }

    #[test]
    fn test_long_titles_wrap_in_table() {
        let title = "The A10 Networks ADC, when used for TCP load balancing, must generate an alert to, at a minimum, the ISSO and ISSM";
        let output = TableFormatter::new(false)
            .format_rules(&[rule(Severity::Medium, title)])
            .unwrap();
        let body: Vec<&str> = output.lines().skip(2).collect();
        assert!(body.len() > 1);
        assert!(body[0].starts_with("medium"));
        assert!(body[0].contains("SV-82595r1_rule"));
        assert!(!body[1].contains("SV-82595r1_rule"));
    }

    #[test]
    fn test_colored_output_contains_escape_codes() {
        let colored = TableFormatter::new(true)
            .format_rules(&[rule(Severity::High, "t")])
            .unwrap();
        assert!(colored.contains('\u{1b}'));
        let plain = TableFormatter::new(false)
            .format_rules(&[rule(Severity::High, "t")])
            .unwrap();
        assert!(!plain.contains('\u{1b}'));
    }

    #[test]
    fn test_rule_details() {
        let details = vec![
            RuleDetailView::new("A10 Networks ADC ALG v1 r4", rule(Severity::High, "First")),
            RuleDetailView::new("A10 Networks ADC ALG v1 r4", rule(Severity::Low, "Second")),
        ];
        let output = TableFormatter::new(false).format_rule_details(&details).unwrap();
        assert!(output.contains("Benchmark: A10 Networks ADC ALG v1 r4"));
        assert!(output.contains("Severity:  high"));
        assert!(output.contains("    Review the configuration."));
        assert!(output.contains("    (none)"));
        assert_eq!(output.matches("Title:").count(), 2);
    }
}
