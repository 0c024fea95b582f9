//! Scoring Rules Table - weighted signals mapped to specialist categories.
//!
//! The keyword lists are product data rather than contract: the built-in
//! table can be replaced wholesale from YAML after review.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::assessment::{Persona, SpecialistCategory};

/// Errors raised when loading or validating a rules table.
#[derive(Debug, Error)]
pub enum ScoringRulesError {
    #[error("Failed to parse scoring rules: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid scoring rules: {0}")]
    Invalid(String),
}

/// Fixed bonus a persona gives to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaBonus {
    pub persona: Persona,
    pub category: SpecialistCategory,
    pub points: i32,
}

/// Bonus for each expertise tag the respondent selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertiseBonus {
    pub tag: String,
    pub category: SpecialistCategory,
    pub points: i32,
}

/// Keywords up to this length only match whole words.
const WHOLE_WORD_MAX_CHARS: usize = 4;

/// A named set of keywords pointing at one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordFamily {
    pub name: String,
    pub category: SpecialistCategory,
    pub keywords: Vec<String>,
}

impl KeywordFamily {
    fn new(name: &str, category: SpecialistCategory, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Case-insensitive match against any keyword.
    ///
    /// Short keywords ("ux", "roi", "data") must match a whole word so
    /// "fluxo" is not UX work. Longer ones match as substrings, which lets
    /// stems like "financ" or "operaç" cover their inflections.
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        self.keywords.iter().any(|kw| {
            let kw = kw.to_lowercase();
            if kw.chars().count() <= WHOLE_WORD_MAX_CHARS {
                words.contains(&kw.as_str())
            } else {
                lower.contains(&kw)
            }
        })
    }
}

/// The complete weighted rules table used by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub persona_bonuses: Vec<PersonaBonus>,
    pub expertise_bonuses: Vec<ExpertiseBonus>,
    pub cross_functional_min_tags: usize,
    pub cross_functional_bonus: i32,
    pub keyword_families: Vec<KeywordFamily>,
    pub goal_keyword_bonus: i32,
    pub pain_point_keyword_bonus: i32,
    pub competitive_threat_bonus: i32,
}

impl ScoringRules {
    /// Parses and validates a rules table from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScoringRulesError> {
        let rules: ScoringRules = serde_yaml::from_str(yaml)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Serializes the table to YAML (for review or as an override template).
    pub fn to_yaml(&self) -> Result<String, ScoringRulesError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks that every bonus is non-negative and every family has keywords.
    pub fn validate(&self) -> Result<(), ScoringRulesError> {
        let fixed = [
            ("cross_functional_bonus", self.cross_functional_bonus),
            ("goal_keyword_bonus", self.goal_keyword_bonus),
            ("pain_point_keyword_bonus", self.pain_point_keyword_bonus),
            ("competitive_threat_bonus", self.competitive_threat_bonus),
        ];
        if let Some((name, _)) = fixed.iter().find(|(_, points)| *points < 0) {
            return Err(ScoringRulesError::Invalid(format!("{} must not be negative", name)));
        }
        if self.cross_functional_min_tags == 0 {
            return Err(ScoringRulesError::Invalid(
                "cross_functional_min_tags must be at least 1".to_string(),
            ));
        }
        if let Some(bonus) = self.persona_bonuses.iter().find(|b| b.points < 0) {
            return Err(ScoringRulesError::Invalid(format!(
                "persona bonus for {} must not be negative",
                bonus.persona.id()
            )));
        }
        if let Some(bonus) = self
            .expertise_bonuses
            .iter()
            .find(|b| b.points < 0 || b.tag.trim().is_empty())
        {
            return Err(ScoringRulesError::Invalid(format!(
                "expertise bonus '{}' needs a tag and non-negative points",
                bonus.tag
            )));
        }
        if let Some(family) = self
            .keyword_families
            .iter()
            .find(|f| f.keywords.is_empty() || f.keywords.iter().any(|k| k.trim().is_empty()))
        {
            return Err(ScoringRulesError::Invalid(format!(
                "keyword family '{}' has empty keywords",
                family.name
            )));
        }
        Ok(())
    }

    /// Bonuses granted by a persona.
    pub fn persona_bonuses_for(&self, persona: Persona) -> impl Iterator<Item = &PersonaBonus> {
        self.persona_bonuses
            .iter()
            .filter(move |b| b.persona == persona)
    }

    /// Bonus granted by one expertise tag, matched case-insensitively.
    pub fn expertise_bonus_for(&self, tag: &str) -> Option<&ExpertiseBonus> {
        let tag = tag.trim();
        self.expertise_bonuses
            .iter()
            .find(|b| b.tag.eq_ignore_ascii_case(tag))
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        use SpecialistCategory::*;

        let persona = |persona, category, points| PersonaBonus {
            persona,
            category,
            points,
        };
        let expertise = |tag: &str, category| ExpertiseBonus {
            tag: tag.to_string(),
            category,
            points: 25,
        };

        Self {
            persona_bonuses: vec![
                persona(Persona::BoardExecutive, Strategy, 30),
                persona(Persona::BoardExecutive, Finance, 10),
                persona(Persona::FinanceOps, Finance, 30),
                persona(Persona::FinanceOps, Strategy, 10),
                persona(Persona::ProductBusiness, Product, 30),
                persona(Persona::ProductBusiness, Data, 10),
                persona(Persona::EngineeringTech, Engineering, 30),
                persona(Persona::EngineeringTech, Data, 10),
                persona(Persona::ItDevops, Operations, 30),
                persona(Persona::ItDevops, Engineering, 10),
            ],
            expertise_bonuses: vec![
                expertise("board-executive", Strategy),
                expertise("finance-ops", Finance),
                expertise("product-business", Product),
                expertise("engineering-tech", Engineering),
                expertise("it-devops", Operations),
                expertise("data-ai", Data),
            ],
            cross_functional_min_tags: 3,
            cross_functional_bonus: 15,
            keyword_families: vec![
                KeywordFamily::new(
                    "produtividade de engenharia",
                    Engineering,
                    &[
                        "produtividade", "dev", "código", "codigo", "code review",
                        "engenharia", "bugs", "testes", "qualidade de software",
                    ],
                ),
                KeywordFamily::new(
                    "operações e infraestrutura",
                    Operations,
                    &[
                        "deploy", "infra", "automatizar", "automação", "operaç",
                        "processos manuais", "incidente", "cloud", "suporte",
                    ],
                ),
                KeywordFamily::new(
                    "produto e cliente",
                    Product,
                    &[
                        "cliente", "produto", "lançamento", "experiência", "jornada",
                        "time to market", "ux",
                    ],
                ),
                KeywordFamily::new(
                    "dados e analytics",
                    Data,
                    &[
                        "dados", "analytics", "machine learning", "previs",
                        "dashboards", "data",
                    ],
                ),
                KeywordFamily::new(
                    "custos e retorno",
                    Finance,
                    &[
                        "custo", "roi", "receita", "margem", "orçamento", "economia",
                        "financ", "despesa",
                    ],
                ),
                KeywordFamily::new(
                    "estratégia e mercado",
                    Strategy,
                    &[
                        "estratég", "competi", "concorr", "transformação", "inovação",
                        "mercado", "liderança",
                    ],
                ),
            ],
            goal_keyword_bonus: 20,
            pain_point_keyword_bonus: 10,
            competitive_threat_bonus: 20,
        }
    }
}
