//! Read models for CQRS-lite pattern
//!
//! View structs that denormalize catalog data for presentation.

mod rule_detail_view;

pub use rule_detail_view::RuleDetailView;
