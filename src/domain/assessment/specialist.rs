//! Specialist categories a finished assessment can be routed to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::persona::Persona;

/// The finite set of consultant specialties.
///
/// Declaration order doubles as the tie-break preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialistCategory {
    Strategy,
    Engineering,
    Product,
    Data,
    Operations,
    Finance,
}

impl SpecialistCategory {
    /// Returns all categories in preference order.
    pub fn all() -> &'static [SpecialistCategory] {
        &[
            SpecialistCategory::Strategy,
            SpecialistCategory::Engineering,
            SpecialistCategory::Product,
            SpecialistCategory::Data,
            SpecialistCategory::Operations,
            SpecialistCategory::Finance,
        ]
    }

    /// Position in the preference order (lower wins ties).
    pub fn preference_rank(&self) -> usize {
        Self::all()
            .iter()
            .position(|c| c == self)
            .unwrap_or(usize::MAX)
    }

    /// Categories that may be offered to a persona.
    pub fn available_for(persona: Option<Persona>) -> &'static [SpecialistCategory] {
        use SpecialistCategory::*;
        match persona {
            None => Self::all(),
            Some(Persona::BoardExecutive) => &[Strategy, Product, Finance],
            Some(Persona::FinanceOps) => &[Strategy, Operations, Finance],
            Some(Persona::ProductBusiness) => &[Strategy, Engineering, Product, Data],
            Some(Persona::EngineeringTech) => &[Strategy, Engineering, Product, Data, Operations],
            Some(Persona::ItDevops) => &[Strategy, Engineering, Data, Operations],
        }
    }

    /// Returns true if this category may be offered to `persona`.
    pub fn is_available_for(&self, persona: Option<Persona>) -> bool {
        Self::available_for(persona).contains(self)
    }

    /// Category used when no signal scored anything.
    pub fn default_for(persona: Option<Persona>) -> SpecialistCategory {
        match persona {
            Some(Persona::BoardExecutive) | None => SpecialistCategory::Strategy,
            Some(Persona::FinanceOps) => SpecialistCategory::Finance,
            Some(Persona::ProductBusiness) => SpecialistCategory::Product,
            Some(Persona::EngineeringTech) => SpecialistCategory::Engineering,
            Some(Persona::ItDevops) => SpecialistCategory::Operations,
        }
    }

    /// Returns the wire identifier.
    pub fn id(&self) -> &'static str {
        match self {
            SpecialistCategory::Strategy => "strategy",
            SpecialistCategory::Engineering => "engineering",
            SpecialistCategory::Product => "product",
            SpecialistCategory::Data => "data",
            SpecialistCategory::Operations => "operations",
            SpecialistCategory::Finance => "finance",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SpecialistCategory::Strategy => "Estratégia de IA",
            SpecialistCategory::Engineering => "Engenharia & Produtividade Dev",
            SpecialistCategory::Product => "Produto & Experiência",
            SpecialistCategory::Data => "Dados & Machine Learning",
            SpecialistCategory::Operations => "Operações & Infraestrutura",
            SpecialistCategory::Finance => "Finanças & ROI",
        }
    }
}

impl fmt::Display for SpecialistCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
