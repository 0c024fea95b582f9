//! Respondent personas and role-based persona detection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::session::AssessmentSession;

/// Who is answering the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Persona {
    BoardExecutive,
    FinanceOps,
    ProductBusiness,
    EngineeringTech,
    ItDevops,
}

impl Persona {
    /// Returns all personas in canonical order.
    pub fn all() -> &'static [Persona] {
        &[
            Persona::BoardExecutive,
            Persona::FinanceOps,
            Persona::ProductBusiness,
            Persona::EngineeringTech,
            Persona::ItDevops,
        ]
    }

    /// Returns the wire identifier (also used as an expertise tag).
    pub fn id(&self) -> &'static str {
        match self {
            Persona::BoardExecutive => "board-executive",
            Persona::FinanceOps => "finance-ops",
            Persona::ProductBusiness => "product-business",
            Persona::EngineeringTech => "engineering-tech",
            Persona::ItDevops => "it-devops",
        }
    }

    /// Returns the display name shown to respondents.
    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::BoardExecutive => "Conselho / C-Level",
            Persona::FinanceOps => "Finanças / Operações",
            Persona::ProductBusiness => "Produto / Negócios",
            Persona::EngineeringTech => "Engenharia / Tecnologia",
            Persona::ItDevops => "TI / DevOps",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string is not a persona id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown persona: {0}")]
pub struct UnknownPersona(pub String);

impl FromStr for Persona {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Persona::all()
            .iter()
            .copied()
            .find(|p| p.id() == normalized)
            .ok_or_else(|| UnknownPersona(s.to_string()))
    }
}

/// Role keywords per persona, checked in order. Earlier personas win when
/// a role mentions several (a "CTO" is engineering, not board).
const ROLE_KEYWORDS: &[(Persona, &[&str])] = &[
    (
        Persona::EngineeringTech,
        &["cto", "engenh", "engineer", "desenvolv", "developer", "tech lead", "arquitet", "architect"],
    ),
    (
        Persona::ItDevops,
        &["devops", "infra", "sre", "ti", "it manager", "sysadmin", "plataforma", "platform"],
    ),
    (
        Persona::FinanceOps,
        &["cfo", "financ", "finance", "controller", "contab", "operações", "operations", "coo"],
    ),
    (
        Persona::ProductBusiness,
        &["produto", "product", "cpo", "negócio", "business", "marketing", "comercial", "vendas"],
    ),
    (
        Persona::BoardExecutive,
        &["ceo", "conselh", "board", "diretor", "director", "presidente", "fundador", "founder", "sócio"],
    ),
];

/// Infers a persona from what the respondent told us about themselves.
pub struct PersonaDetector;

impl PersonaDetector {
    /// Detects the persona from role and expertise answers.
    ///
    /// Order: exact persona id in the role, role keywords, then the first
    /// expertise tag that is a persona id.
    pub fn detect(session: &AssessmentSession) -> Option<Persona> {
        if let Some(role) = session.contact_info.role.as_deref() {
            if let Ok(persona) = role.parse::<Persona>() {
                return Some(persona);
            }
            if let Some(persona) = Self::from_role_text(role) {
                return Some(persona);
            }
        }

        session
            .contact_info
            .expertise
            .iter()
            .find_map(|tag| tag.parse::<Persona>().ok())
    }

    /// Matches free-text role descriptions such as "CTO" or "Gerente de Produto".
    pub fn from_role_text(role: &str) -> Option<Persona> {
        let lower = role.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        ROLE_KEYWORDS
            .iter()
            .find(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|kw| role_keyword_matches(kw, &lower, &words))
            })
            .map(|(persona, _)| *persona)
    }
}

/// Acronyms ("cto", "ti") must match a whole word so "director" is not a CTO.
fn role_keyword_matches(keyword: &str, lower: &str, words: &[&str]) -> bool {
    if keyword.chars().count() <= 3 {
        words.contains(&keyword)
    } else {
        lower.contains(keyword)
    }
}
