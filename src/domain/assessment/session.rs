//! AssessmentSession aggregate - the single source of truth for one assessment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{SessionId, Timestamp};

use super::errors::AssessmentError;
use super::fields::{FieldKey, FieldValue};
use super::persona::{Persona, PersonaDetector};
use super::question::{Answer, QuestionId, QuestionTemplate};

/// Facts about the company being assessed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub revenue: Option<String>,
}

/// Where the company stands today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentState {
    pub team_size: Option<u32>,
    pub ai_maturity: Option<String>,
    pub ai_tools: Vec<String>,
    pub pain_points: Vec<String>,
    pub competitive_threat: Option<String>,
}

/// What the company wants out of AI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    pub primary_goals: Vec<String>,
    pub timeline: Option<String>,
    pub budget: Option<String>,
    pub success_metrics: Vec<String>,
}

/// The respondent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub expertise: Vec<String>,
}

/// One respondent's assessment in progress.
///
/// Field namespaces only ever grow: merging a value never removes data
/// that was already collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSession {
    pub id: SessionId,
    #[serde(default)]
    pub persona: Option<Persona>,
    #[serde(default)]
    pub company_info: CompanyInfo,
    #[serde(default)]
    pub current_state: CurrentState,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    answered_question_ids: Vec<QuestionId>,
    #[serde(default)]
    pub topics_discussed: BTreeSet<String>,
    #[serde(default)]
    pub question_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AssessmentSession {
    /// Starts an empty session with a fresh id.
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    /// Starts an empty session with a known id.
    pub fn with_id(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            persona: None,
            company_info: CompanyInfo::default(),
            current_state: CurrentState::default(),
            goals: Goals::default(),
            contact_info: ContactInfo::default(),
            answered_question_ids: Vec::new(),
            topics_discussed: BTreeSet::new(),
            question_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Question ids in the order they were answered.
    pub fn answered_question_ids(&self) -> &[QuestionId] {
        &self.answered_question_ids
    }

    /// Returns true if `id` has already been answered or skipped.
    pub fn has_answered(&self, id: &QuestionId) -> bool {
        self.answered_question_ids.contains(id)
    }

    /// Sets the persona explicitly.
    pub fn set_persona(&mut self, persona: Persona) {
        self.persona = Some(persona);
        self.touch();
    }

    /// Detects the persona from collected answers if it is not yet known.
    pub fn detect_persona(&mut self) -> Option<Persona> {
        if self.persona.is_none() {
            self.persona = PersonaDetector::detect(self);
        }
        self.persona
    }

    /// Merges field values into the session and returns the keys that changed.
    pub fn apply(&mut self, values: impl IntoIterator<Item = FieldValue>) -> Vec<FieldKey> {
        let mut changed = Vec::new();
        for value in values {
            let key = value.key();
            if self.merge(value) && !changed.contains(&key) {
                changed.push(key);
            }
        }
        if !changed.is_empty() {
            self.touch();
        }
        changed
    }

    fn merge(&mut self, value: FieldValue) -> bool {
        match value {
            FieldValue::Industry(v) => merge_text(&mut self.company_info.industry, v),
            FieldValue::CompanySize(v) => merge_text(&mut self.company_info.size, v),
            FieldValue::CompanyName(v) => merge_text(&mut self.company_info.name, v),
            FieldValue::Revenue(v) => merge_text(&mut self.company_info.revenue, v),
            FieldValue::TeamSize(n) => {
                // Zero is treated as "not answered".
                if n == 0 || self.current_state.team_size == Some(n) {
                    false
                } else {
                    self.current_state.team_size = Some(n);
                    true
                }
            }
            FieldValue::AiMaturity(v) => merge_text(&mut self.current_state.ai_maturity, v),
            FieldValue::AiTools(v) => merge_list(&mut self.current_state.ai_tools, v),
            FieldValue::PainPoints(v) => merge_list(&mut self.current_state.pain_points, v),
            FieldValue::CompetitiveThreat(v) => {
                merge_text(&mut self.current_state.competitive_threat, v)
            }
            FieldValue::PrimaryGoals(v) => merge_list(&mut self.goals.primary_goals, v),
            FieldValue::Timeline(v) => merge_text(&mut self.goals.timeline, v),
            FieldValue::Budget(v) => merge_text(&mut self.goals.budget, v),
            FieldValue::SuccessMetrics(v) => merge_list(&mut self.goals.success_metrics, v),
            FieldValue::Role(v) => merge_text(&mut self.contact_info.role, v),
            FieldValue::ContactName(v) => merge_text(&mut self.contact_info.name, v),
            FieldValue::ContactEmail(v) => merge_text(&mut self.contact_info.email, v),
            FieldValue::Expertise(v) => merge_list(&mut self.contact_info.expertise, v),
        }
    }

    /// Returns true if the field has a non-empty value.
    pub fn has_field(&self, key: FieldKey) -> bool {
        match key {
            FieldKey::Industry => is_present(&self.company_info.industry),
            FieldKey::CompanySize => is_present(&self.company_info.size),
            FieldKey::CompanyName => is_present(&self.company_info.name),
            FieldKey::Revenue => is_present(&self.company_info.revenue),
            FieldKey::TeamSize => self.current_state.team_size.is_some_and(|n| n > 0),
            FieldKey::AiMaturity => is_present(&self.current_state.ai_maturity),
            FieldKey::AiTools => has_items(&self.current_state.ai_tools),
            FieldKey::PainPoints => has_items(&self.current_state.pain_points),
            FieldKey::CompetitiveThreat => is_present(&self.current_state.competitive_threat),
            FieldKey::PrimaryGoals => has_items(&self.goals.primary_goals),
            FieldKey::Timeline => is_present(&self.goals.timeline),
            FieldKey::Budget => is_present(&self.goals.budget),
            FieldKey::SuccessMetrics => has_items(&self.goals.success_metrics),
            FieldKey::Role => is_present(&self.contact_info.role),
            FieldKey::ContactName => is_present(&self.contact_info.name),
            FieldKey::ContactEmail => is_present(&self.contact_info.email),
            FieldKey::Expertise => has_items(&self.contact_info.expertise),
        }
    }

    /// Records an answer to `template` and returns the fields it changed.
    ///
    /// # Errors
    ///
    /// - `AlreadyAnswered` if the template id was answered before
    /// - `InvalidAnswer` if the answer does not fit the template
    pub fn record_answer(
        &mut self,
        template: &QuestionTemplate,
        answer: &Answer,
    ) -> Result<Vec<FieldKey>, AssessmentError> {
        if self.has_answered(template.id()) {
            return Err(AssessmentError::AlreadyAnswered(template.id().clone()));
        }
        template.validate_answer(answer)?;

        let changed = self.apply(template.extract(answer));
        self.mark_asked(template);
        Ok(changed)
    }

    /// Records that the respondent chose not to answer `template`.
    pub fn skip_question(&mut self, template: &QuestionTemplate) -> Result<(), AssessmentError> {
        if self.has_answered(template.id()) {
            return Err(AssessmentError::AlreadyAnswered(template.id().clone()));
        }
        self.mark_asked(template);
        Ok(())
    }

    fn mark_asked(&mut self, template: &QuestionTemplate) {
        self.answered_question_ids.push(template.id().clone());
        if !template.topic().is_empty() {
            self.topics_discussed.insert(template.topic().to_string());
        }
        self.question_count += 1;
        self.touch();
    }

    pub fn expertise(&self) -> &[String] {
        &self.contact_info.expertise
    }

    pub fn primary_goals(&self) -> &[String] {
        &self.goals.primary_goals
    }

    pub fn pain_points(&self) -> &[String] {
        &self.current_state.pain_points
    }

    /// Returns the competitive threat description, if any was given.
    pub fn competitive_threat(&self) -> Option<&str> {
        self.current_state
            .competitive_threat
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

fn is_present(slot: &Option<String>) -> bool {
    slot.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn has_items(list: &[String]) -> bool {
    list.iter().any(|s| !s.trim().is_empty())
}

fn merge_text(slot: &mut Option<String>, value: String) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() || slot.as_deref() == Some(trimmed) {
        return false;
    }
    *slot = Some(trimmed.to_string());
    true
}

fn merge_list(list: &mut Vec<String>, values: Vec<String>) -> bool {
    let mut changed = false;
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        if list.iter().any(|existing| existing.to_lowercase() == lower) {
            continue;
        }
        list.push(trimmed.to_string());
        changed = true;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::InputKind;

    fn extract_goals(answer: &Answer) -> Vec<FieldValue> {
        vec![FieldValue::PrimaryGoals(answer.as_list())]
    }

    fn goals_template() -> QuestionTemplate {
        QuestionTemplate::new("goals", "Objetivos?", InputKind::QuickChip, extract_goals)
            .on_topic("Objetivos")
            .filling(&[FieldKey::PrimaryGoals])
    }

    #[test]
    fn new_session_is_empty() {
        let session = AssessmentSession::new();
        assert!(session.persona.is_none());
        assert_eq!(session.question_count, 0);
        assert!(FieldKey::all().iter().all(|k| !session.has_field(*k)));
    }

    #[test]
    fn apply_ignores_blank_values() {
        let mut session = AssessmentSession::new();
        let changed = session.apply(vec![
            FieldValue::Industry("   ".to_string()),
            FieldValue::PainPoints(vec![String::new()]),
            FieldValue::TeamSize(0),
        ]);
        assert!(changed.is_empty());
        assert!(!session.has_field(FieldKey::Industry));
        assert!(!session.has_field(FieldKey::PainPoints));
        assert!(!session.has_field(FieldKey::TeamSize));
    }

    #[test]
    fn apply_deduplicates_list_values_case_insensitively() {
        let mut session = AssessmentSession::new();
        session.apply(vec![FieldValue::PainPoints(vec!["Bugs".to_string()])]);
        let changed = session.apply(vec![FieldValue::PainPoints(vec![
            "bugs".to_string(),
            "Deploy lento".to_string(),
        ])]);
        assert_eq!(changed, vec![FieldKey::PainPoints]);
        assert_eq!(session.pain_points(), &["Bugs", "Deploy lento"]);
    }

    #[test]
    fn apply_never_clears_existing_scalar() {
        let mut session = AssessmentSession::new();
        session.apply(vec![FieldValue::Budget("R$ 50-200 mil".to_string())]);
        session.apply(vec![FieldValue::Budget(String::new())]);
        assert_eq!(session.goals.budget.as_deref(), Some("R$ 50-200 mil"));
    }

    #[test]
    fn record_answer_tracks_id_topic_and_count() {
        let mut session = AssessmentSession::new();
        let changed = session
            .record_answer(&goals_template(), &Answer::Choices(vec!["Reduzir custos".to_string()]))
            .unwrap();

        assert_eq!(changed, vec![FieldKey::PrimaryGoals]);
        assert_eq!(session.answered_question_ids(), &[QuestionId::new("goals")]);
        assert!(session.topics_discussed.contains("Objetivos"));
        assert_eq!(session.question_count, 1);
    }

    #[test]
    fn record_answer_rejects_repeat() {
        let mut session = AssessmentSession::new();
        let answer = Answer::Text("Reduzir custos".to_string());
        session.record_answer(&goals_template(), &answer).unwrap();

        let err = session.record_answer(&goals_template(), &answer).unwrap_err();
        assert_eq!(err, AssessmentError::AlreadyAnswered(QuestionId::new("goals")));
        assert_eq!(session.question_count, 1);
    }

    #[test]
    fn record_answer_rejects_blank_without_side_effects() {
        let mut session = AssessmentSession::new();
        let result = session.record_answer(&goals_template(), &Answer::Text(" ".to_string()));
        assert!(result.is_err());
        assert!(session.answered_question_ids().is_empty());
        assert_eq!(session.question_count, 0);
    }

    #[test]
    fn skip_counts_question_without_data() {
        let mut session = AssessmentSession::new();
        session.skip_question(&goals_template()).unwrap();
        assert_eq!(session.question_count, 1);
        assert!(!session.has_field(FieldKey::PrimaryGoals));
        assert!(session.skip_question(&goals_template()).is_err());
    }

    #[test]
    fn detect_persona_keeps_explicit_choice() {
        let mut session = AssessmentSession::new();
        session.set_persona(Persona::FinanceOps);
        session.apply(vec![FieldValue::Role("CTO".to_string())]);
        assert_eq!(session.detect_persona(), Some(Persona::FinanceOps));
    }

    #[test]
    fn detect_persona_uses_role() {
        let mut session = AssessmentSession::new();
        session.apply(vec![FieldValue::Role("Head de DevOps".to_string())]);
        assert_eq!(session.detect_persona(), Some(Persona::ItDevops));
    }

    #[test]
    fn competitive_threat_ignores_whitespace() {
        let mut session = AssessmentSession::new();
        session.current_state.competitive_threat = Some("   ".to_string());
        assert_eq!(session.competitive_threat(), None);
    }

    #[test]
    fn session_round_trips_through_yaml() {
        let mut session = AssessmentSession::new();
        session.set_persona(Persona::EngineeringTech);
        session
            .record_answer(&goals_template(), &Answer::Text("Aumentar produtividade dev".to_string()))
            .unwrap();

        let yaml = serde_yaml::to_string(&session).unwrap();
        let back: AssessmentSession = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, session);
    }
}
