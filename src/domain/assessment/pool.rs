//! The question pool and the built-in assessment questions.

use std::collections::HashSet;

use super::errors::AssessmentError;
use super::fields::{FieldKey, FieldValue};
use super::persona::Persona;
use super::question::{Answer, InputKind, QuestionId, QuestionTemplate};

/// Ordered, read-only collection of question templates.
#[derive(Debug, Clone)]
pub struct QuestionPool {
    templates: Vec<QuestionTemplate>,
}

impl QuestionPool {
    /// Builds a pool, rejecting duplicate ids.
    pub fn new(templates: Vec<QuestionTemplate>) -> Result<Self, AssessmentError> {
        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id().clone()) {
                return Err(AssessmentError::DuplicateQuestionId(template.id().clone()));
            }
        }
        Ok(Self { templates })
    }

    /// Looks up a template by id.
    pub fn get(&self, id: &QuestionId) -> Option<&QuestionTemplate> {
        self.templates.iter().find(|t| t.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionTemplate> {
        self.templates.iter()
    }

    pub fn as_slice(&self) -> &[QuestionTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The built-in Portuguese assessment questions.
    pub fn default_pool() -> Self {
        Self {
            templates: default_templates(),
        }
    }
}

impl Default for QuestionPool {
    fn default() -> Self {
        Self::default_pool()
    }
}

fn default_templates() -> Vec<QuestionTemplate> {
    vec![
        QuestionTemplate::new(
            "role",
            "Para começar, qual é o seu papel na empresa?",
            InputKind::QuickChip,
            extract_role,
        )
        .with_choices(&[
            "CEO / Conselho",
            "CTO / Engenharia",
            "CFO / Finanças",
            "Produto / Negócios",
            "TI / DevOps",
        ])
        .on_topic("Perfil")
        .filling(&[FieldKey::Role])
        .with_priority(0),
        QuestionTemplate::new(
            "industry",
            "Em qual setor sua empresa atua?",
            InputKind::QuickChip,
            extract_industry,
        )
        .with_choices(&[
            "Tecnologia",
            "Varejo",
            "Serviços Financeiros",
            "Saúde",
            "Indústria",
            "Educação",
        ])
        .on_topic("Empresa")
        .filling(&[FieldKey::Industry])
        .with_priority(10),
        QuestionTemplate::new(
            "company_size",
            "Quantos funcionários a empresa tem hoje?",
            InputKind::SingleChoice,
            extract_company_size,
        )
        .with_choices(&["1-10", "11-50", "51-200", "201-1000", "1000+"])
        .on_topic("Empresa")
        .filling(&[FieldKey::CompanySize])
        .with_priority(20),
        QuestionTemplate::new(
            "team_size",
            "Quantas pessoas fazem parte do time de tecnologia e desenvolvimento?",
            InputKind::FreeText,
            extract_team_size,
        )
        .on_topic("Situação Atual")
        .filling(&[FieldKey::TeamSize])
        .with_priority(30),
        QuestionTemplate::new(
            "pain_points",
            "Quais são as maiores dores da operação hoje?",
            InputKind::QuickChip,
            extract_pain_points,
        )
        .with_choices(&[
            "Entregas lentas",
            "Muitos bugs em produção",
            "Custos operacionais altos",
            "Dificuldade de contratar",
            "Processos manuais",
            "Dados desorganizados",
        ])
        .on_topic("Situação Atual")
        .filling(&[FieldKey::PainPoints])
        .with_priority(40),
        QuestionTemplate::new(
            "engineering_bottleneck",
            "Onde está o principal gargalo do ciclo de desenvolvimento: code review, testes ou deploy?",
            InputKind::FreeText,
            extract_pain_points,
        )
        .on_topic("Engenharia")
        .filling(&[FieldKey::PainPoints])
        .with_priority(45)
        .for_personas(&[Persona::EngineeringTech, Persona::ItDevops]),
        QuestionTemplate::new(
            "primary_goals",
            "O que vocês mais querem alcançar com IA?",
            InputKind::QuickChip,
            extract_primary_goals,
        )
        .with_choices(&[
            "Aumentar produtividade dev",
            "Reduzir custos",
            "Melhorar experiência do cliente",
            "Acelerar lançamento de produtos",
            "Automatizar operações",
            "Tomar decisões com dados",
        ])
        .on_topic("Objetivos")
        .filling(&[FieldKey::PrimaryGoals])
        .with_priority(50),
        QuestionTemplate::new(
            "customer_journey",
            "Em qual etapa da jornada do cliente a IA teria mais impacto?",
            InputKind::FreeText,
            extract_primary_goals,
        )
        .on_topic("Produto")
        .filling(&[FieldKey::PrimaryGoals])
        .with_priority(55)
        .for_personas(&[Persona::ProductBusiness]),
        QuestionTemplate::new(
            "ai_maturity",
            "Como você descreve o uso de IA na empresa hoje?",
            InputKind::SingleChoice,
            extract_ai_maturity,
        )
        .with_choices(&[
            "Nenhum uso",
            "Experimentos isolados",
            "Uso em alguns times",
            "Uso estratégico em toda a empresa",
        ])
        .on_topic("Situação Atual")
        .filling(&[FieldKey::AiMaturity])
        .with_priority(60),
        QuestionTemplate::new(
            "ai_tools",
            "Quais ferramentas de IA o time já utiliza?",
            InputKind::QuickChip,
            extract_ai_tools,
        )
        .with_choices(&["GitHub Copilot", "ChatGPT", "Claude", "Cursor", "Nenhuma"])
        .on_topic("Ferramentas")
        .filling(&[FieldKey::AiTools])
        .with_priority(70),
        QuestionTemplate::new(
            "timeline",
            "Em quanto tempo vocês esperam ver resultados?",
            InputKind::SingleChoice,
            extract_timeline,
        )
        .with_choices(&["3 meses", "6 meses", "12 meses", "Mais de 12 meses"])
        .on_topic("Objetivos")
        .filling(&[FieldKey::Timeline])
        .with_priority(80),
        QuestionTemplate::new(
            "expected_return",
            "Qual retorno mínimo justificaria o investimento em IA?",
            InputKind::FreeText,
            extract_success_metrics,
        )
        .on_topic("Finanças")
        .filling(&[FieldKey::SuccessMetrics])
        .with_priority(85)
        .for_personas(&[Persona::FinanceOps, Persona::BoardExecutive]),
        QuestionTemplate::new(
            "budget",
            "Qual orçamento está previsto para iniciativas de IA?",
            InputKind::SingleChoice,
            extract_budget,
        )
        .with_choices(&[
            "Até R$ 50 mil",
            "R$ 50-200 mil",
            "R$ 200 mil - 1 mi",
            "Acima de R$ 1 mi",
            "Ainda não definido",
        ])
        .on_topic("Investimento")
        .filling(&[FieldKey::Budget])
        .with_priority(90),
        QuestionTemplate::new(
            "competitive_threat",
            "Algum concorrente já usa IA de um jeito que preocupa vocês?",
            InputKind::FreeText,
            extract_competitive_threat,
        )
        .on_topic("Mercado")
        .filling(&[FieldKey::CompetitiveThreat])
        .with_priority(100),
        QuestionTemplate::new(
            "success_metrics",
            "Como vocês vão medir o sucesso dessa iniciativa?",
            InputKind::QuickChip,
            extract_success_metrics,
        )
        .with_choices(&["Tempo de entrega", "Redução de custos", "NPS", "Receita"])
        .on_topic("Objetivos")
        .filling(&[FieldKey::SuccessMetrics])
        .with_priority(110),
        QuestionTemplate::new(
            "company_name",
            "Qual é o nome da empresa?",
            InputKind::FreeText,
            extract_company_name,
        )
        .on_topic("Empresa")
        .filling(&[FieldKey::CompanyName])
        .with_priority(120),
        QuestionTemplate::new(
            "revenue",
            "Qual é o faturamento anual aproximado?",
            InputKind::SingleChoice,
            extract_revenue,
        )
        .with_choices(&["Até R$ 5 mi", "R$ 5-50 mi", "R$ 50-500 mi", "Acima de R$ 500 mi"])
        .on_topic("Empresa")
        .filling(&[FieldKey::Revenue])
        .with_priority(130),
        QuestionTemplate::new(
            "expertise",
            "Em quais áreas você tem mais experiência?",
            InputKind::MultiChoice,
            extract_expertise,
        )
        .with_choices(&[
            "board-executive",
            "finance-ops",
            "product-business",
            "engineering-tech",
            "it-devops",
            "data-ai",
        ])
        .on_topic("Perfil")
        .filling(&[FieldKey::Expertise])
        .with_priority(140),
        QuestionTemplate::new(
            "contact",
            "Para enviarmos o relatório: qual é o seu nome e e-mail?",
            InputKind::FreeText,
            extract_contact,
        )
        .on_topic("Contato")
        .filling(&[FieldKey::ContactName, FieldKey::ContactEmail])
        .with_priority(150),
    ]
}

fn extract_role(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::Role(answer.as_text())]
}

fn extract_industry(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::Industry(answer.as_text())]
}

fn extract_company_size(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::CompanySize(answer.as_text())]
}

fn extract_team_size(answer: &Answer) -> Vec<FieldValue> {
    parse_team_size(&answer.as_text())
        .map(|n| vec![FieldValue::TeamSize(n)])
        .unwrap_or_default()
}

fn extract_pain_points(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::PainPoints(answer.as_list())]
}

fn extract_primary_goals(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::PrimaryGoals(answer.as_list())]
}

fn extract_ai_maturity(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::AiMaturity(answer.as_text())]
}

fn extract_ai_tools(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::AiTools(answer.as_list())]
}

fn extract_timeline(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::Timeline(answer.as_text())]
}

fn extract_budget(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::Budget(answer.as_text())]
}

fn extract_competitive_threat(answer: &Answer) -> Vec<FieldValue> {
    let text = answer.as_text();
    if is_plain_negative(&text) {
        return Vec::new();
    }
    vec![FieldValue::CompetitiveThreat(text)]
}

fn extract_success_metrics(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::SuccessMetrics(answer.as_list())]
}

fn extract_company_name(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::CompanyName(answer.as_text())]
}

fn extract_revenue(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::Revenue(answer.as_text())]
}

fn extract_expertise(answer: &Answer) -> Vec<FieldValue> {
    vec![FieldValue::Expertise(answer.as_list())]
}

fn extract_contact(answer: &Answer) -> Vec<FieldValue> {
    let text = answer.as_text();
    let mut values = Vec::new();
    let mut name_parts = Vec::new();

    for token in text.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
        let token = token.trim_matches(|c: char| c == '<' || c == '>' || c == '(' || c == ')');
        if token.is_empty() {
            continue;
        }
        if token.contains('@') && values.is_empty() {
            values.push(FieldValue::ContactEmail(token.to_lowercase()));
        } else {
            name_parts.push(token);
        }
    }

    let name = name_parts.join(" ");
    if !name.is_empty() {
        values.push(FieldValue::ContactName(name));
    }
    values
}

/// Answers like "não" to the competitor question carry no signal.
fn is_plain_negative(text: &str) -> bool {
    matches!(
        text.trim().trim_end_matches(['.', '!']).to_lowercase().as_str(),
        "não" | "nao" | "no" | "nenhum" | "nenhuma" | "n/a" | "-"
    )
}

/// Parses a team size from answers like "12", "cerca de 40 devs", "11-50" or "500+".
///
/// Ranges resolve to their midpoint. Dots between digits are thousands separators.
pub fn parse_team_size(text: &str) -> Option<u32> {
    let mut numbers: Vec<(usize, usize, u32)> = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let start = i;
            let mut digits = String::new();
            while i < chars.len()
                && (chars[i].is_ascii_digit()
                    || (chars[i] == '.' && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())))
            {
                if chars[i] != '.' {
                    digits.push(chars[i]);
                }
                i += 1;
            }
            if let Ok(n) = digits.parse::<u32>() {
                numbers.push((start, i, n));
            }
        } else {
            i += 1;
        }
    }

    let (_, first_end, first) = *numbers.first()?;
    if let Some(&(second_start, _, second)) = numbers.get(1) {
        let between: String = chars[first_end..second_start].iter().collect();
        let between = between.trim().to_lowercase();
        if between == "-" || between == "a" || between == "até" || between == "to" {
            let mid = ((u64::from(first) + u64::from(second)) / 2) as u32;
            return (mid > 0).then_some(mid);
        }
    }
    (first > 0).then_some(first)
}
