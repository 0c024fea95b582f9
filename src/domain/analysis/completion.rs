//! Completion Tracker - how much of the assessment has been collected.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{
    AssessmentSession, FieldGroup, FieldKey, FieldPriority, ESSENTIAL_FIELDS_TOTAL,
};
use crate::domain::foundation::Percentage;

/// Points contributed by the essential tier when fully collected.
pub const ESSENTIAL_POINTS: u32 = 60;

/// Points contributed by the important tier when fully collected.
pub const IMPORTANT_POINTS: u32 = 30;

/// Points contributed by the optional tier when fully collected.
pub const OPTIONAL_POINTS: u32 = 10;

/// Snapshot of collection progress for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMetrics {
    pub completeness_score: Percentage,
    pub essential_fields_collected: u8,
    pub essential_fields_total: u8,
    pub total_fields_collected: u8,
    pub topics_covered: Vec<String>,
    /// Missing essential fields (in priority order) followed by missing important ones.
    pub gaps: Vec<FieldKey>,
    pub estimated_remaining_questions: u32,
}

impl CompletionMetrics {
    /// Returns true once every essential field is present.
    pub fn all_essential_collected(&self) -> bool {
        self.essential_fields_collected >= self.essential_fields_total
    }

    /// Returns the missing essential fields only.
    pub fn essential_gaps(&self) -> Vec<FieldKey> {
        self.gaps.iter().copied().filter(FieldKey::is_essential).collect()
    }

    /// Position of `key` in the gap list, if it is a gap.
    pub fn gap_rank(&self, key: FieldKey) -> Option<usize> {
        self.gaps.iter().position(|g| *g == key)
    }
}

/// Calculator for completeness and gap analysis.
pub struct CompletionTracker;

impl CompletionTracker {
    /// Computes completion metrics from the session's collected fields.
    ///
    /// Each tier contributes `collected * tier_points / tier_size`, so the
    /// score only grows as fields are filled.
    ///
    /// # Edge Cases
    /// - Empty session: score 0, every essential and important key is a gap
    /// - Fully populated session: score 100, no gaps
    pub fn compute(session: &AssessmentSession) -> CompletionMetrics {
        let essential = TierCount::of(session, FieldPriority::Essential);
        let important = TierCount::of(session, FieldPriority::Important);
        let optional = TierCount::of(session, FieldPriority::Optional);

        let points = essential.points(ESSENTIAL_POINTS)
            + important.points(IMPORTANT_POINTS)
            + optional.points(OPTIONAL_POINTS);

        let gaps: Vec<FieldKey> = essential
            .missing
            .iter()
            .chain(important.missing.iter())
            .copied()
            .collect();

        let important_gaps = important.missing.len() as u32;
        let estimated_remaining_questions =
            essential.missing.len() as u32 + important_gaps.div_ceil(2);

        CompletionMetrics {
            completeness_score: Percentage::from_points(points),
            essential_fields_collected: (essential.collected as u8).min(ESSENTIAL_FIELDS_TOTAL),
            essential_fields_total: ESSENTIAL_FIELDS_TOTAL,
            total_fields_collected: (essential.collected + important.collected + optional.collected)
                as u8,
            topics_covered: Self::topics_covered(session),
            gaps,
            estimated_remaining_questions,
        }
    }

    /// Topic labels for every field group with at least one populated key.
    pub fn topics_covered(session: &AssessmentSession) -> Vec<String> {
        FieldGroup::all()
            .iter()
            .filter(|group| {
                FieldKey::all()
                    .iter()
                    .any(|k| k.group() == **group && session.has_field(*k))
            })
            .map(|group| group.topic_label().to_string())
            .collect()
    }
}

/// Free-function form of [`CompletionTracker::compute`].
pub fn compute_completion_metrics(session: &AssessmentSession) -> CompletionMetrics {
    CompletionTracker::compute(session)
}

struct TierCount {
    total: usize,
    collected: usize,
    missing: Vec<FieldKey>,
}

impl TierCount {
    fn of(session: &AssessmentSession, priority: FieldPriority) -> Self {
        let mut total = 0;
        let mut collected = 0;
        let mut missing = Vec::new();
        for key in FieldKey::with_priority(priority) {
            total += 1;
            if session.has_field(key) {
                collected += 1;
            } else {
                missing.push(key);
            }
        }
        Self {
            total,
            collected,
            missing,
        }
    }

    fn points(&self, tier_points: u32) -> u32 {
        if self.total == 0 {
            return 0;
        }
        self.collected as u32 * tier_points / self.total as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::FieldValue;

    fn essential_values() -> Vec<FieldValue> {
        vec![
            FieldValue::Industry("Varejo".to_string()),
            FieldValue::CompanySize("51-200".to_string()),
            FieldValue::TeamSize(25),
            FieldValue::PainPoints(vec!["Entregas lentas".to_string()]),
            FieldValue::PrimaryGoals(vec!["Reduzir custos".to_string()]),
        ]
    }

    fn all_values() -> Vec<FieldValue> {
        let mut values = essential_values();
        values.extend(vec![
            FieldValue::AiMaturity("Experimentos isolados".to_string()),
            FieldValue::Timeline("6 meses".to_string()),
            FieldValue::Budget("R$ 50-200 mil".to_string()),
            FieldValue::Role("CTO".to_string()),
            FieldValue::AiTools(vec!["GitHub Copilot".to_string()]),
            FieldValue::CompanyName("Acme".to_string()),
            FieldValue::Revenue("R$ 5-50 mi".to_string()),
            FieldValue::SuccessMetrics(vec!["NPS".to_string()]),
            FieldValue::CompetitiveThreat("Concorrente lançou copiloto".to_string()),
            FieldValue::ContactName("Ana".to_string()),
            FieldValue::ContactEmail("ana@acme.com".to_string()),
            FieldValue::Expertise(vec!["engineering-tech".to_string()]),
        ]);
        values
    }

    #[test]
    fn empty_session_scores_zero_with_essential_gaps_first() {
        let metrics = CompletionTracker::compute(&AssessmentSession::new());

        assert_eq!(metrics.completeness_score, Percentage::ZERO);
        assert_eq!(metrics.essential_fields_collected, 0);
        assert_eq!(metrics.essential_fields_total, 5);
        assert_eq!(metrics.total_fields_collected, 0);
        assert!(metrics.topics_covered.is_empty());
        assert_eq!(
            metrics.essential_gaps(),
            vec![
                FieldKey::Industry,
                FieldKey::CompanySize,
                FieldKey::TeamSize,
                FieldKey::PainPoints,
                FieldKey::PrimaryGoals,
            ]
        );
        assert_eq!(&metrics.gaps[..5], metrics.essential_gaps().as_slice());
        assert_eq!(metrics.gaps.len(), 10);
    }

    #[test]
    fn full_session_scores_hundred_with_no_gaps() {
        let mut session = AssessmentSession::new();
        session.apply(all_values());

        let metrics = CompletionTracker::compute(&session);

        assert_eq!(metrics.completeness_score, Percentage::HUNDRED);
        assert!(metrics.gaps.is_empty());
        assert_eq!(metrics.estimated_remaining_questions, 0);
        assert_eq!(metrics.total_fields_collected as usize, FieldKey::all().len());
        assert_eq!(
            metrics.topics_covered,
            vec!["Empresa", "Situação Atual", "Objetivos", "Contato"]
        );
    }

    #[test]
    fn essential_only_scores_sixty() {
        let mut session = AssessmentSession::new();
        session.apply(essential_values());

        let metrics = CompletionTracker::compute(&session);

        assert_eq!(metrics.completeness_score.value(), 60);
        assert!(metrics.all_essential_collected());
        assert!(metrics.essential_gaps().is_empty());
        assert_eq!(metrics.gaps.len(), 5);
        // five important gaps -> ceil(5 / 2)
        assert_eq!(metrics.estimated_remaining_questions, 3);
    }

    #[test]
    fn essential_fields_weigh_more_than_optional() {
        let mut with_essential = AssessmentSession::new();
        with_essential.apply(vec![FieldValue::Industry("Saúde".to_string())]);

        let mut with_optional = AssessmentSession::new();
        with_optional.apply(vec![FieldValue::CompanyName("Acme".to_string())]);

        assert!(
            CompletionTracker::compute(&with_essential).completeness_score
                > CompletionTracker::compute(&with_optional).completeness_score
        );
    }

    #[test]
    fn goals_group_reports_objetivos() {
        let mut session = AssessmentSession::new();
        session.apply(vec![FieldValue::PrimaryGoals(vec!["Reduzir custos".to_string()])]);

        let metrics = compute_completion_metrics(&session);
        assert_eq!(metrics.topics_covered, vec!["Objetivos"]);
    }

    #[test]
    fn gap_rank_follows_priority_order() {
        let mut session = AssessmentSession::new();
        session.apply(vec![FieldValue::Industry("Varejo".to_string())]);

        let metrics = CompletionTracker::compute(&session);
        assert_eq!(metrics.gap_rank(FieldKey::CompanySize), Some(0));
        assert_eq!(metrics.gap_rank(FieldKey::Industry), None);
        assert!(metrics.gap_rank(FieldKey::AiMaturity) > metrics.gap_rank(FieldKey::PrimaryGoals));
    }

    #[test]
    fn optional_fields_are_never_gaps() {
        let metrics = CompletionTracker::compute(&AssessmentSession::new());
        assert!(metrics
            .gaps
            .iter()
            .all(|k| k.priority() != FieldPriority::Optional));
    }
}
