mod benchmark_normalizer;
mod rule_normalizer;
mod text;
mod vuln_discussion;
pub mod xml_tree;

pub use benchmark_normalizer::{BenchmarkNormalizer, NormalizedBenchmark};
pub use rule_normalizer::RuleNormalizer;
pub use text::{clean_benchmark_title, normalize_text};
pub use vuln_discussion::VulnDiscussion;
pub use xml_tree::{decode, OneOrMany, XmlNode, XmlValue};
