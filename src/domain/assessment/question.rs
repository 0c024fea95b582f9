//! Question templates and the answers they accept.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::AssessmentError;
use super::fields::{FieldKey, FieldValue};
use super::persona::Persona;

/// Stable identifier of a question template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a question id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// How the respondent answers a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    FreeText,
    SingleChoice,
    MultiChoice,
    /// Suggested chips; free text is accepted too.
    QuickChip,
}

/// A raw answer as submitted by the respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    Text(String),
    Choice(String),
    Choices(Vec<String>),
}

impl Answer {
    /// Returns the non-blank, trimmed values carried by the answer.
    pub fn values(&self) -> Vec<&str> {
        let raw: Vec<&str> = match self {
            Answer::Text(s) | Answer::Choice(s) => vec![s.as_str()],
            Answer::Choices(v) => v.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns true if the answer carries no usable content.
    pub fn is_blank(&self) -> bool {
        self.values().is_empty()
    }

    /// Returns the answer flattened to a single string.
    pub fn as_text(&self) -> String {
        self.values().join(", ")
    }

    /// Returns the answer as a list, splitting free text on separators.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            Answer::Choices(_) => self.values().into_iter().map(str::to_string).collect(),
            Answer::Text(s) | Answer::Choice(s) => s
                .split([',', ';', '\n'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Maps a raw answer to the field values it provides.
pub type Extractor = fn(&Answer) -> Vec<FieldValue>;

/// Immutable description of one question in the pool.
#[derive(Clone)]
pub struct QuestionTemplate {
    id: QuestionId,
    prompt: String,
    kind: InputKind,
    choices: Vec<String>,
    topic: String,
    fills: Vec<FieldKey>,
    priority: u32,
    personas: Vec<Persona>,
    extractor: Extractor,
}

impl QuestionTemplate {
    /// Creates a universal template with default priority and no choices.
    pub fn new(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        kind: InputKind,
        extractor: Extractor,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind,
            choices: Vec::new(),
            topic: String::new(),
            fills: Vec::new(),
            priority: u32::MAX,
            personas: Vec::new(),
            extractor,
        }
    }

    /// Sets the suggested or allowed choices.
    pub fn with_choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Sets the topic label recorded once the question is answered.
    pub fn on_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Declares which fields an answer can fill.
    pub fn filling(mut self, fields: &[FieldKey]) -> Self {
        self.fills = fields.to_vec();
        self
    }

    /// Sets the tie-break priority (lower is asked first).
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Restricts the template to the given personas.
    pub fn for_personas(mut self, personas: &[Persona]) -> Self {
        self.personas = personas.to_vec();
        self
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn fills(&self) -> &[FieldKey] {
        &self.fills
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    /// Returns true if the template can be asked given the known persona.
    ///
    /// Persona-specific follow-ups wait until a persona has been detected.
    pub fn applies_to(&self, persona: Option<Persona>) -> bool {
        if self.personas.is_empty() {
            return true;
        }
        persona.is_some_and(|p| self.personas.contains(&p))
    }

    /// Checks that an answer has the shape this template expects.
    pub fn validate_answer(&self, answer: &Answer) -> Result<(), AssessmentError> {
        let values = answer.values();
        if values.is_empty() {
            return Err(AssessmentError::invalid_answer(&self.id, "answer is blank"));
        }

        match self.kind {
            InputKind::FreeText | InputKind::QuickChip => Ok(()),
            InputKind::SingleChoice => {
                if values.len() != 1 {
                    return Err(AssessmentError::invalid_answer(
                        &self.id,
                        "exactly one choice is required",
                    ));
                }
                self.ensure_listed(&values)
            }
            InputKind::MultiChoice => self.ensure_listed(&values),
        }
    }

    fn ensure_listed(&self, values: &[&str]) -> Result<(), AssessmentError> {
        match values
            .iter()
            .find(|v| !self.choices.iter().any(|c| c.eq_ignore_ascii_case(v)))
        {
            Some(unknown) => Err(AssessmentError::invalid_answer(
                &self.id,
                format!("'{}' is not one of the listed choices", unknown),
            )),
            None => Ok(()),
        }
    }

    /// Runs the template's extractor over an answer.
    pub fn extract(&self, answer: &Answer) -> Vec<FieldValue> {
        (self.extractor)(answer)
    }
}

impl fmt::Debug for QuestionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionTemplate")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("topic", &self.topic)
            .field("fills", &self.fills)
            .field("priority", &self.priority)
            .field("personas", &self.personas)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_industry(answer: &Answer) -> Vec<FieldValue> {
        vec![FieldValue::Industry(answer.as_text())]
    }

    fn single_choice() -> QuestionTemplate {
        QuestionTemplate::new("size", "Quantos funcionários?", InputKind::SingleChoice, extract_industry)
            .with_choices(&["1-10", "11-50"])
    }

    #[test]
    fn answer_values_skip_blanks() {
        let answer = Answer::Choices(vec!["  ".to_string(), " Varejo ".to_string()]);
        assert_eq!(answer.values(), vec!["Varejo"]);
    }

    #[test]
    fn text_answer_splits_into_list() {
        let answer = Answer::Text("Bugs; deploy lento,\nretrabalho".to_string());
        assert_eq!(answer.as_list(), vec!["Bugs", "deploy lento", "retrabalho"]);
    }

    #[test]
    fn blank_answer_is_rejected() {
        let err = single_choice()
            .validate_answer(&Answer::Text("   ".to_string()))
            .unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidAnswer { .. }));
    }

    #[test]
    fn single_choice_accepts_listed_value_case_insensitively() {
        let template = QuestionTemplate::new("x", "?", InputKind::SingleChoice, extract_industry)
            .with_choices(&["Varejo"]);
        assert!(template.validate_answer(&Answer::Choice("varejo".to_string())).is_ok());
    }

    #[test]
    fn single_choice_rejects_unlisted_value() {
        assert!(single_choice()
            .validate_answer(&Answer::Choice("5000".to_string()))
            .is_err());
    }

    #[test]
    fn single_choice_rejects_multiple_values() {
        let answer = Answer::Choices(vec!["1-10".to_string(), "11-50".to_string()]);
        assert!(single_choice().validate_answer(&answer).is_err());
    }

    #[test]
    fn quick_chip_accepts_free_text() {
        let template = QuestionTemplate::new("x", "?", InputKind::QuickChip, extract_industry)
            .with_choices(&["Varejo"]);
        assert!(template
            .validate_answer(&Answer::Text("Agronegócio".to_string()))
            .is_ok());
    }

    #[test]
    fn persona_specific_template_waits_for_persona() {
        let template = QuestionTemplate::new("x", "?", InputKind::FreeText, extract_industry)
            .for_personas(&[Persona::EngineeringTech]);
        assert!(!template.applies_to(None));
        assert!(!template.applies_to(Some(Persona::FinanceOps)));
        assert!(template.applies_to(Some(Persona::EngineeringTech)));
    }

    #[test]
    fn universal_template_applies_to_everyone() {
        let template = single_choice();
        assert!(template.applies_to(None));
        assert!(template.applies_to(Some(Persona::BoardExecutive)));
    }

    #[test]
    fn extract_runs_extractor() {
        let values = single_choice().extract(&Answer::Choice("Saúde".to_string()));
        assert_eq!(values, vec![FieldValue::Industry("Saúde".to_string())]);
    }
}
