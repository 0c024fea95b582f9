//! Specialist Auto-Router - scores every category and picks one.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::assessment::{AssessmentSession, Persona, SpecialistCategory};

use super::scoring_rules::ScoringRules;

/// Score forced onto categories the persona may not be routed to.
pub const UNAVAILABLE_SCORE: i32 = -1000;

static DEFAULT_ROUTER: Lazy<SpecialistRouter> = Lazy::new(SpecialistRouter::default);

/// A single scoring contribution, kept so the reasoning can be explained.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Signal {
    Persona(Persona),
    Expertise(String),
    CrossFunctional(usize),
    Goal(String),
    PainPoint(String),
    CompetitiveThreat,
}

#[derive(Debug, Clone)]
struct Contribution {
    category: SpecialistCategory,
    points: i32,
    signal: Signal,
}

/// Outcome of routing a session to a specialist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingResult {
    pub specialist: SpecialistCategory,
    pub reasoning: String,
    pub scores: BTreeMap<SpecialistCategory, i32>,
    pub alternatives: Vec<SpecialistCategory>,
    pub used_fallback: bool,
}

impl RoutingResult {
    /// Score of the chosen specialist.
    pub fn winning_score(&self) -> i32 {
        self.scores.get(&self.specialist).copied().unwrap_or(0)
    }
}

/// Deterministic weighted router over a `ScoringRules` table.
#[derive(Debug, Clone, Default)]
pub struct SpecialistRouter {
    rules: ScoringRules,
}

impl SpecialistRouter {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Scores the session and selects a specialist.
    pub fn route(&self, session: &AssessmentSession) -> RoutingResult {
        let persona = session.persona;
        let contributions = self.collect(session);

        let mut scores: BTreeMap<SpecialistCategory, i32> = SpecialistCategory::all()
            .iter()
            .map(|c| (*c, 0))
            .collect();
        for c in &contributions {
            *scores.entry(c.category).or_insert(0) += c.points;
        }
        for category in SpecialistCategory::all() {
            if !category.is_available_for(persona) {
                scores.insert(*category, UNAVAILABLE_SCORE);
            }
        }

        let available = SpecialistCategory::available_for(persona);
        let score_of = |c: &SpecialistCategory| scores.get(c).copied().unwrap_or(0);
        let top = available.iter().map(score_of).max().unwrap_or(0);

        let (specialist, used_fallback) = if top <= 0 {
            (SpecialistCategory::default_for(persona), true)
        } else if available.contains(&SpecialistCategory::Strategy)
            && score_of(&SpecialistCategory::Strategy) == top
        {
            (SpecialistCategory::Strategy, false)
        } else {
            // available_for preserves preference order, so the first hit wins ties.
            let winner = available
                .iter()
                .copied()
                .find(|c| score_of(c) == top)
                .unwrap_or_else(|| SpecialistCategory::default_for(persona));
            (winner, false)
        };

        let mut alternatives: Vec<SpecialistCategory> = available
            .iter()
            .copied()
            .filter(|c| *c != specialist && score_of(c) > 0)
            .collect();
        alternatives.sort_by_key(|c| (-score_of(c), c.preference_rank()));

        let reasoning = explain(specialist, persona, used_fallback, &contributions);

        debug!(
            session_id = %session.id,
            specialist = %specialist,
            score = top,
            used_fallback,
            "Specialist routed"
        );

        RoutingResult {
            specialist,
            reasoning,
            scores,
            alternatives,
            used_fallback,
        }
    }

    fn collect(&self, session: &AssessmentSession) -> Vec<Contribution> {
        let rules = &self.rules;
        let mut out = Vec::new();

        if let Some(persona) = session.persona {
            for bonus in rules.persona_bonuses_for(persona) {
                out.push(Contribution {
                    category: bonus.category,
                    points: bonus.points,
                    signal: Signal::Persona(persona),
                });
            }
        }

        let expertise = session.expertise();
        for tag in expertise {
            if let Some(bonus) = rules.expertise_bonus_for(tag) {
                out.push(Contribution {
                    category: bonus.category,
                    points: bonus.points,
                    signal: Signal::Expertise(bonus.tag.clone()),
                });
            }
        }
        let tag_count = expertise.iter().filter(|t| !t.trim().is_empty()).count();
        if tag_count >= rules.cross_functional_min_tags {
            out.push(Contribution {
                category: SpecialistCategory::Strategy,
                points: rules.cross_functional_bonus,
                signal: Signal::CrossFunctional(tag_count),
            });
        }

        for goal in session.primary_goals() {
            for family in rules.keyword_families.iter().filter(|f| f.matches(goal)) {
                out.push(Contribution {
                    category: family.category,
                    points: rules.goal_keyword_bonus,
                    signal: Signal::Goal(family.name.clone()),
                });
            }
        }

        for pain in session.pain_points() {
            for family in rules.keyword_families.iter().filter(|f| f.matches(pain)) {
                out.push(Contribution {
                    category: family.category,
                    points: rules.pain_point_keyword_bonus,
                    signal: Signal::PainPoint(family.name.clone()),
                });
            }
        }

        if session.competitive_threat().is_some() {
            out.push(Contribution {
                category: SpecialistCategory::Strategy,
                points: rules.competitive_threat_bonus,
                signal: Signal::CompetitiveThreat,
            });
        }

        out
    }
}

/// Routes with the built-in rules table.
pub fn select_specialist(session: &AssessmentSession) -> RoutingResult {
    DEFAULT_ROUTER.route(session)
}

fn explain(
    specialist: SpecialistCategory,
    persona: Option<Persona>,
    used_fallback: bool,
    contributions: &[Contribution],
) -> String {
    if used_fallback {
        let who = persona
            .map(|p| format!("o perfil {}", p.display_name()))
            .unwrap_or_else(|| "um perfil ainda não identificado".to_string());
        return format!(
            "Nenhum sinal forte identificado; {} é o especialista padrão para {}.",
            specialist.display_name(),
            who
        );
    }

    let mut reasons: Vec<String> = Vec::new();
    let mut push = |reason: String| {
        if !reasons.contains(&reason) {
            reasons.push(reason);
        }
    };

    for c in contributions.iter().filter(|c| c.category == specialist && c.points > 0) {
        match &c.signal {
            Signal::Persona(p) => push(format!("perfil {}", p.display_name())),
            Signal::Expertise(tag) => push(format!("experiência em {}", tag)),
            Signal::CrossFunctional(n) => push(format!("atuação multidisciplinar ({} áreas)", n)),
            Signal::Goal(family) => push(format!("objetivos ligados a {}", family)),
            Signal::PainPoint(family) => push(format!("dores ligadas a {}", family)),
            Signal::CompetitiveThreat => push("ameaça competitiva identificada".to_string()),
        }
    }

    format!(
        "{} recomendado: {}.",
        specialist.display_name(),
        reasons.join("; ")
    )
}
