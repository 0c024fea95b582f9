//! Collectible assessment fields, their priorities and grouping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of essential fields an assessment needs before a report is useful.
pub const ESSENTIAL_FIELDS_TOTAL: u8 = 5;

/// How much a field matters for the downstream report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPriority {
    Essential,
    Important,
    Optional,
}

/// Namespace a field is stored under in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    CompanyInfo,
    CurrentState,
    Goals,
    ContactInfo,
}

impl FieldGroup {
    /// Returns all groups in report order.
    pub fn all() -> &'static [FieldGroup] {
        &[
            FieldGroup::CompanyInfo,
            FieldGroup::CurrentState,
            FieldGroup::Goals,
            FieldGroup::ContactInfo,
        ]
    }

    /// Topic label reported once the group has any data.
    pub fn topic_label(&self) -> &'static str {
        match self {
            FieldGroup::CompanyInfo => "Empresa",
            FieldGroup::CurrentState => "Situação Atual",
            FieldGroup::Goals => "Objetivos",
            FieldGroup::ContactInfo => "Contato",
        }
    }
}

/// Every field the assessment can collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    // Essential, in gap order
    Industry,
    CompanySize,
    TeamSize,
    PainPoints,
    PrimaryGoals,

    // Important
    AiMaturity,
    Timeline,
    Budget,
    Role,
    AiTools,

    // Optional
    CompanyName,
    Revenue,
    SuccessMetrics,
    CompetitiveThreat,
    ContactName,
    ContactEmail,
    Expertise,
}

impl FieldKey {
    /// Returns all keys, essential first.
    pub fn all() -> &'static [FieldKey] {
        &[
            FieldKey::Industry,
            FieldKey::CompanySize,
            FieldKey::TeamSize,
            FieldKey::PainPoints,
            FieldKey::PrimaryGoals,
            FieldKey::AiMaturity,
            FieldKey::Timeline,
            FieldKey::Budget,
            FieldKey::Role,
            FieldKey::AiTools,
            FieldKey::CompanyName,
            FieldKey::Revenue,
            FieldKey::SuccessMetrics,
            FieldKey::CompetitiveThreat,
            FieldKey::ContactName,
            FieldKey::ContactEmail,
            FieldKey::Expertise,
        ]
    }

    /// Returns the keys of one priority tier, in gap order.
    pub fn with_priority(priority: FieldPriority) -> impl Iterator<Item = FieldKey> {
        Self::all()
            .iter()
            .copied()
            .filter(move |k| k.priority() == priority)
    }

    /// Returns the priority tier of this key.
    pub fn priority(&self) -> FieldPriority {
        match self {
            FieldKey::Industry
            | FieldKey::CompanySize
            | FieldKey::TeamSize
            | FieldKey::PainPoints
            | FieldKey::PrimaryGoals => FieldPriority::Essential,
            FieldKey::AiMaturity
            | FieldKey::Timeline
            | FieldKey::Budget
            | FieldKey::Role
            | FieldKey::AiTools => FieldPriority::Important,
            FieldKey::CompanyName
            | FieldKey::Revenue
            | FieldKey::SuccessMetrics
            | FieldKey::CompetitiveThreat
            | FieldKey::ContactName
            | FieldKey::ContactEmail
            | FieldKey::Expertise => FieldPriority::Optional,
        }
    }

    /// Returns the namespace the key lives in.
    pub fn group(&self) -> FieldGroup {
        match self {
            FieldKey::Industry
            | FieldKey::CompanySize
            | FieldKey::CompanyName
            | FieldKey::Revenue => FieldGroup::CompanyInfo,
            FieldKey::TeamSize
            | FieldKey::PainPoints
            | FieldKey::AiMaturity
            | FieldKey::AiTools
            | FieldKey::CompetitiveThreat => FieldGroup::CurrentState,
            FieldKey::PrimaryGoals
            | FieldKey::Timeline
            | FieldKey::Budget
            | FieldKey::SuccessMetrics => FieldGroup::Goals,
            FieldKey::Role
            | FieldKey::ContactName
            | FieldKey::ContactEmail
            | FieldKey::Expertise => FieldGroup::ContactInfo,
        }
    }

    /// Returns true for essential keys.
    pub fn is_essential(&self) -> bool {
        self.priority() == FieldPriority::Essential
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKey::Industry => "industry",
            FieldKey::CompanySize => "company_size",
            FieldKey::TeamSize => "team_size",
            FieldKey::PainPoints => "pain_points",
            FieldKey::PrimaryGoals => "primary_goals",
            FieldKey::AiMaturity => "ai_maturity",
            FieldKey::Timeline => "timeline",
            FieldKey::Budget => "budget",
            FieldKey::Role => "role",
            FieldKey::AiTools => "ai_tools",
            FieldKey::CompanyName => "company_name",
            FieldKey::Revenue => "revenue",
            FieldKey::SuccessMetrics => "success_metrics",
            FieldKey::CompetitiveThreat => "competitive_threat",
            FieldKey::ContactName => "contact_name",
            FieldKey::ContactEmail => "contact_email",
            FieldKey::Expertise => "expertise",
        };
        write!(f, "{}", s)
    }
}

/// A value extracted from an answer, tagged with the field it fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Industry(String),
    CompanySize(String),
    TeamSize(u32),
    PainPoints(Vec<String>),
    PrimaryGoals(Vec<String>),
    AiMaturity(String),
    Timeline(String),
    Budget(String),
    Role(String),
    AiTools(Vec<String>),
    CompanyName(String),
    Revenue(String),
    SuccessMetrics(Vec<String>),
    CompetitiveThreat(String),
    ContactName(String),
    ContactEmail(String),
    Expertise(Vec<String>),
}

impl FieldValue {
    /// Returns the key this value fills.
    pub fn key(&self) -> FieldKey {
        match self {
            FieldValue::Industry(_) => FieldKey::Industry,
            FieldValue::CompanySize(_) => FieldKey::CompanySize,
            FieldValue::TeamSize(_) => FieldKey::TeamSize,
            FieldValue::PainPoints(_) => FieldKey::PainPoints,
            FieldValue::PrimaryGoals(_) => FieldKey::PrimaryGoals,
            FieldValue::AiMaturity(_) => FieldKey::AiMaturity,
            FieldValue::Timeline(_) => FieldKey::Timeline,
            FieldValue::Budget(_) => FieldKey::Budget,
            FieldValue::Role(_) => FieldKey::Role,
            FieldValue::AiTools(_) => FieldKey::AiTools,
            FieldValue::CompanyName(_) => FieldKey::CompanyName,
            FieldValue::Revenue(_) => FieldKey::Revenue,
            FieldValue::SuccessMetrics(_) => FieldKey::SuccessMetrics,
            FieldValue::CompetitiveThreat(_) => FieldKey::CompetitiveThreat,
            FieldValue::ContactName(_) => FieldKey::ContactName,
            FieldValue::ContactEmail(_) => FieldKey::ContactEmail,
            FieldValue::Expertise(_) => FieldKey::Expertise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_five_essential_fields() {
        let count = FieldKey::with_priority(FieldPriority::Essential).count();
        assert_eq!(count, usize::from(ESSENTIAL_FIELDS_TOTAL));
    }

    #[test]
    fn all_lists_essential_keys_first() {
        let first_five: Vec<_> = FieldKey::all()[..5].to_vec();
        assert!(first_five.iter().all(FieldKey::is_essential));
    }

    #[test]
    fn all_keys_are_unique() {
        let mut keys = FieldKey::all().to_vec();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), FieldKey::all().len());
    }

    #[test]
    fn goals_group_reports_objetivos_topic() {
        assert_eq!(FieldKey::PrimaryGoals.group().topic_label(), "Objetivos");
    }

    #[test]
    fn field_value_reports_its_key() {
        assert_eq!(FieldValue::TeamSize(12).key(), FieldKey::TeamSize);
        assert_eq!(
            FieldValue::Expertise(vec!["data-ai".to_string()]).key(),
            FieldKey::Expertise
        );
    }

    #[test]
    fn field_value_serializes_tagged() {
        let json = serde_json::to_string(&FieldValue::Industry("Varejo".to_string())).unwrap();
        assert_eq!(json, r#"{"field":"industry","value":"Varejo"}"#);
    }
}
