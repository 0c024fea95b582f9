//! Specialist routing.
//!
//! A weighted rules table and the router that applies it.

mod router;
mod scoring_rules;

pub use router::{select_specialist, RoutingResult, SpecialistRouter, UNAVAILABLE_SCORE};
pub use scoring_rules::{
    ExpertiseBonus, KeywordFamily, PersonaBonus, ScoringRules, ScoringRulesError,
};
