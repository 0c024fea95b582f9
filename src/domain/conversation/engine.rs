//! Assessment engine - the decision services bundled for one question pool.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::analysis::{CompletionMetrics, CompletionTracker};
use crate::domain::assessment::{
    Answer, AssessmentError, AssessmentSession, InputKind, QuestionId, QuestionPool,
    QuestionTemplate,
};
use crate::domain::routing::{RoutingResult, SpecialistRouter};

use super::selector::QuestionSelector;
use super::termination::{FinishDecision, FinishReason, TerminationPolicy};

/// Serializable view of the question to ask next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextQuestion {
    pub id: QuestionId,
    pub prompt: String,
    pub kind: InputKind,
    pub choices: Vec<String>,
    pub topic: String,
}

impl From<&QuestionTemplate> for NextQuestion {
    fn from(template: &QuestionTemplate) -> Self {
        Self {
            id: template.id().clone(),
            prompt: template.prompt().to_string(),
            kind: template.kind(),
            choices: template.choices().to_vec(),
            topic: template.topic().to_string(),
        }
    }
}

/// Where a session stands after its latest answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentStep {
    pub metrics: CompletionMetrics,
    pub decision: FinishDecision,
    /// `None` exactly when `decision.finish` is true.
    pub next_question: Option<NextQuestion>,
}

impl AssessmentStep {
    pub fn is_finished(&self) -> bool {
        self.decision.finish
    }
}

/// Read-only bundle of pool, router and policy. Share across sessions with `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AssessmentEngine {
    pool: QuestionPool,
    router: SpecialistRouter,
    policy: TerminationPolicy,
}

impl AssessmentEngine {
    pub fn new(pool: QuestionPool, router: SpecialistRouter, policy: TerminationPolicy) -> Self {
        Self {
            pool,
            router,
            policy,
        }
    }

    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    pub fn policy(&self) -> &TerminationPolicy {
        &self.policy
    }

    /// Computes metrics, the finish decision and the next question.
    pub fn next_step(&self, session: &AssessmentSession) -> AssessmentStep {
        let metrics = CompletionTracker::compute(session);
        let decision = self
            .policy
            .should_finish(session, &metrics, session.question_count);

        if decision.finish {
            return AssessmentStep {
                metrics,
                decision,
                next_question: None,
            };
        }

        match QuestionSelector::select_with_metrics(&self.pool, session, &metrics, &[]) {
            Some(template) => AssessmentStep {
                metrics,
                decision,
                next_question: Some(NextQuestion::from(template)),
            },
            None => {
                info!(session_id = %session.id, "Question pool exhausted");
                AssessmentStep {
                    metrics,
                    decision: FinishDecision::finished(FinishReason::QuestionsExhausted),
                    next_question: None,
                }
            }
        }
    }

    /// Routes the session to a specialist.
    pub fn route(&self, session: &AssessmentSession) -> RoutingResult {
        self.router.route(session)
    }

    /// Records an answer and returns the next step.
    ///
    /// # Errors
    ///
    /// - `UnknownQuestion` if `question_id` is not in the pool
    /// - `AlreadyAnswered` / `InvalidAnswer` from the session
    pub fn submit(
        &self,
        session: &mut AssessmentSession,
        question_id: &QuestionId,
        answer: &Answer,
    ) -> Result<AssessmentStep, AssessmentError> {
        let template = self.template(question_id)?;
        let changed = session.record_answer(template, answer)?;
        session.detect_persona();

        debug!(
            session_id = %session.id,
            question = %question_id,
            changed_fields = changed.len(),
            persona = session.persona.map(|p| p.id()).unwrap_or("unknown"),
            "Answer recorded"
        );
        Ok(self.next_step(session))
    }

    /// Marks a question as skipped and returns the next step.
    pub fn skip(
        &self,
        session: &mut AssessmentSession,
        question_id: &QuestionId,
    ) -> Result<AssessmentStep, AssessmentError> {
        let template = self.template(question_id)?;
        session.skip_question(template)?;
        debug!(session_id = %session.id, question = %question_id, "Question skipped");
        Ok(self.next_step(session))
    }

    fn template(&self, id: &QuestionId) -> Result<&QuestionTemplate, AssessmentError> {
        self.pool
            .get(id)
            .ok_or_else(|| AssessmentError::UnknownQuestion(id.clone()))
    }
}
