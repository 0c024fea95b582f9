//! Adaptive Question Selector.
//!
//! Picks the next template that closes the most important open gap,
//! preferring topics the respondent has not talked about yet. While the
//! persona is unknown, a template asking for the role comes first so the
//! persona follow-ups can unlock before the essentials run out.

use tracing::debug;

use crate::domain::analysis::{CompletionMetrics, CompletionTracker};
use crate::domain::assessment::{
    AssessmentSession, FieldKey, QuestionId, QuestionPool, QuestionTemplate,
};

/// Stateless selector over a question pool.
pub struct QuestionSelector;

impl QuestionSelector {
    /// Returns the best next question, or `None` when nothing applicable remains.
    ///
    /// Templates whose id is in `answered_ids` or already recorded on the
    /// session are never returned. Ids that are not in the pool are ignored.
    pub fn select_next<'a>(
        pool: &'a QuestionPool,
        session: &AssessmentSession,
        answered_ids: &[QuestionId],
    ) -> Option<&'a QuestionTemplate> {
        let metrics = CompletionTracker::compute(session);
        Self::select_with_metrics(pool, session, &metrics, answered_ids)
    }

    /// Same as [`select_next`](Self::select_next) with precomputed metrics.
    pub fn select_with_metrics<'a>(
        pool: &'a QuestionPool,
        session: &AssessmentSession,
        metrics: &CompletionMetrics,
        answered_ids: &[QuestionId],
    ) -> Option<&'a QuestionTemplate> {
        let needs_role = session.persona.is_none() && !session.has_field(FieldKey::Role);
        let selected = pool
            .iter()
            .enumerate()
            .filter(|(_, t)| !answered_ids.contains(t.id()) && !session.has_answered(t.id()))
            .filter(|(_, t)| t.applies_to(session.persona))
            .min_by_key(|(index, t)| {
                let best_gap = t.fills().iter().filter_map(|k| metrics.gap_rank(*k)).min();
                let topic_seen =
                    !t.topic().is_empty() && session.topics_discussed.contains(t.topic());
                let asks_role = needs_role && t.fills().contains(&FieldKey::Role);
                (
                    !asks_role,
                    best_gap.is_none(),
                    best_gap.unwrap_or(usize::MAX),
                    topic_seen,
                    t.priority(),
                    *index,
                )
            })
            .map(|(_, t)| t);

        debug!(
            session_id = %session.id,
            question = selected.map(|t| t.id().as_str()).unwrap_or("<none>"),
            "Next question selected"
        );
        selected
    }
}

/// Selects the next question for a session.
pub fn select_next_question<'a>(
    pool: &'a QuestionPool,
    session: &AssessmentSession,
    answered_ids: &[QuestionId],
) -> Option<&'a QuestionTemplate> {
    QuestionSelector::select_next(pool, session, answered_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{Answer, FieldKey, FieldValue, InputKind, Persona};

    fn nothing(_: &Answer) -> Vec<FieldValue> {
        Vec::new()
    }

    fn template(id: &str, fills: &[FieldKey], topic: &str, priority: u32) -> QuestionTemplate {
        QuestionTemplate::new(id, id, InputKind::FreeText, nothing)
            .filling(fills)
            .on_topic(topic)
            .with_priority(priority)
    }

    fn ids(items: &[&str]) -> Vec<QuestionId> {
        items.iter().map(|s| QuestionId::new(*s)).collect()
    }

    #[test]
    fn returns_none_when_every_template_answered() {
        let pool = QuestionPool::new(vec![
            template("t1", &[FieldKey::Industry], "Empresa", 1),
            template("t2", &[FieldKey::Budget], "Investimento", 2),
            template("t3", &[FieldKey::Revenue], "Empresa", 3),
        ])
        .unwrap();

        let next = select_next_question(&pool, &AssessmentSession::new(), &ids(&["t1", "t2", "t3"]));

        assert!(next.is_none());
    }

    #[test]
    fn prefers_earliest_gap_over_priority() {
        let pool = QuestionPool::new(vec![
            template("budget", &[FieldKey::Budget], "Investimento", 0),
            template("goals", &[FieldKey::PrimaryGoals], "Objetivos", 50),
            template("industry", &[FieldKey::Industry], "Empresa", 99),
        ])
        .unwrap();

        let next = select_next_question(&pool, &AssessmentSession::new(), &[]).unwrap();

        assert_eq!(next.id().as_str(), "industry");
    }

    #[test]
    fn gap_filling_beats_non_gap_templates() {
        let pool = QuestionPool::new(vec![
            template("name", &[FieldKey::CompanyName], "Empresa", 0),
            template("tools", &[FieldKey::AiTools], "Ferramentas", 99),
        ])
        .unwrap();

        let next = select_next_question(&pool, &AssessmentSession::new(), &[]).unwrap();

        assert_eq!(next.id().as_str(), "tools");
    }

    #[test]
    fn undiscussed_topic_wins_between_equal_gaps() {
        let pool = QuestionPool::new(vec![
            template("pain_a", &[FieldKey::PainPoints], "Situação Atual", 0),
            template("pain_b", &[FieldKey::PainPoints], "Engenharia", 5),
        ])
        .unwrap();
        let mut session = AssessmentSession::new();
        session.topics_discussed.insert("Situação Atual".to_string());

        let next = select_next_question(&pool, &session, &[]).unwrap();

        assert_eq!(next.id().as_str(), "pain_b");
    }

    #[test]
    fn ties_fall_back_to_priority_then_pool_order() {
        let pool = QuestionPool::new(vec![
            template("late", &[FieldKey::Industry], "Empresa", 20),
            template("first", &[FieldKey::Industry], "Empresa", 10),
            template("second", &[FieldKey::Industry], "Empresa", 10),
        ])
        .unwrap();

        let next = select_next_question(&pool, &AssessmentSession::new(), &[]).unwrap();

        assert_eq!(next.id().as_str(), "first");
    }

    #[test]
    fn skips_ids_recorded_on_session() {
        let pool = QuestionPool::default_pool();
        let mut session = AssessmentSession::new();
        let industry = pool.get(&QuestionId::new("industry")).unwrap();
        session
            .record_answer(industry, &Answer::Text("Varejo".to_string()))
            .unwrap();

        let next = select_next_question(&pool, &session, &[]).unwrap();

        assert_ne!(next.id().as_str(), "industry");
        assert_eq!(next.id().as_str(), "role");
    }

    #[test]
    fn unknown_answered_ids_are_ignored() {
        let pool = QuestionPool::default_pool();
        let next = select_next_question(&pool, &AssessmentSession::new(), &ids(&["ghost"]));
        assert_eq!(next.unwrap().id().as_str(), "role");
    }

    #[test]
    fn role_question_comes_first_while_persona_unknown() {
        let pool = QuestionPool::new(vec![
            template("industry", &[FieldKey::Industry], "Empresa", 0),
            template("role", &[FieldKey::Role], "Perfil", 50),
        ])
        .unwrap();

        let next = select_next_question(&pool, &AssessmentSession::new(), &[]).unwrap();

        assert_eq!(next.id().as_str(), "role");
    }

    #[test]
    fn role_question_waits_once_persona_known() {
        let pool = QuestionPool::new(vec![
            template("industry", &[FieldKey::Industry], "Empresa", 0),
            template("role", &[FieldKey::Role], "Perfil", 50),
        ])
        .unwrap();
        let mut session = AssessmentSession::new();
        session.set_persona(Persona::FinanceOps);

        let next = select_next_question(&pool, &session, &[]).unwrap();

        assert_eq!(next.id().as_str(), "industry");
    }

    #[test]
    fn persona_specific_templates_wait_for_persona() {
        let pool = QuestionPool::default_pool();
        let mut answered: Vec<QuestionId> = Vec::new();
        let session = AssessmentSession::new();
        while let Some(next) = select_next_question(&pool, &session, &answered) {
            assert!(next.personas().is_empty());
            answered.push(next.id().clone());
        }
    }

    #[test]
    fn persona_follow_up_becomes_available() {
        let pool = QuestionPool::default_pool();
        let mut session = AssessmentSession::new();
        session.set_persona(Persona::ProductBusiness);
        let mut answered =
            ids(&["industry", "company_size", "team_size", "pain_points", "primary_goals"]);

        let mut seen = Vec::new();
        while let Some(next) = select_next_question(&pool, &session, &answered) {
            seen.push(next.id().as_str().to_string());
            answered.push(next.id().clone());
        }

        assert!(seen.contains(&"customer_journey".to_string()));
        assert!(!seen.contains(&"engineering_bottleneck".to_string()));
    }

    #[test]
    fn selection_does_not_mutate_session() {
        let pool = QuestionPool::default_pool();
        let session = AssessmentSession::new();
        let before = session.clone();
        let _ = select_next_question(&pool, &session, &[]);
        assert_eq!(session, before);
    }
}
