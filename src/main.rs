//! Console driver for the readiness assessment.
//!
//! Asks questions on stdin/stdout until the termination policy ends the
//! session, then prints the specialist recommendation and completion metrics
//! as JSON. Logs go to stderr. An empty line skips a question and `/fim`
//! stops early.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use readiness_advisor::adapters::{
    AnthropicConfig, AnthropicTextGenerator, FileSessionStore, InMemoryReportQueue,
    InMemorySessionStore,
};
use readiness_advisor::application::handlers::{
    FinishAssessmentCommand, FinishAssessmentHandler, GetNextQuestionHandler,
    GetNextQuestionQuery, StartAssessmentCommand, StartAssessmentHandler, SubmitAnswerCommand,
    SubmitAnswerError, SubmitAnswerHandler,
};
use readiness_advisor::config::{AppConfig, LogFormat, RuntimeConfig, StorageBackend};
use readiness_advisor::domain::assessment::{Answer, InputKind, QuestionPool};
use readiness_advisor::domain::conversation::{AssessmentEngine, NextQuestion, TerminationPolicy};
use readiness_advisor::domain::routing::SpecialistRouter;
use readiness_advisor::ports::{ReportGenerator, SessionStore};

const STOP_COMMAND: &str = "/fim";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.runtime);

    let rules = config.assessment.scoring_rules()?;
    let policy = TerminationPolicy::new(config.assessment.termination())?;
    let engine = Arc::new(AssessmentEngine::new(
        QuestionPool::default_pool(),
        SpecialistRouter::new(rules),
        policy,
    ));

    let store: Arc<dyn SessionStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemorySessionStore::new()),
        StorageBackend::File => Arc::new(FileSessionStore::new(&config.storage.data_dir)),
    };
    let reports: Arc<dyn ReportGenerator> = Arc::new(InMemoryReportQueue::new());

    let mut next_question = GetNextQuestionHandler::new(store.clone(), engine.clone());
    if let Some(key) = config.ai.anthropic_api_key.as_deref().filter(|_| config.ai.has_anthropic()) {
        let generator = AnthropicTextGenerator::new(
            AnthropicConfig::new(key)
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout())
                .with_max_retries(config.ai.max_retries),
        )?;
        next_question = next_question.with_text_generator(Arc::new(generator), config.ai.timeout());
        info!(model = %config.ai.model, "Question phrasing enabled");
    }

    let start = StartAssessmentHandler::new(store.clone(), engine.clone());
    let submit = SubmitAnswerHandler::new(store.clone(), engine.clone());
    let finish = FinishAssessmentHandler::new(store, engine, reports);

    let session_id = start.handle(StartAssessmentCommand::default()).await?.session.id;

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let current = next_question
            .handle(GetNextQuestionQuery { session_id })
            .await?;
        let (Some(question), Some(prompt)) = (current.step.next_question, current.prompt) else {
            break;
        };

        stdout.write_all(render(&question, &prompt).as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = stdin.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line == STOP_COMMAND {
            break;
        }

        let result = submit
            .handle(SubmitAnswerCommand {
                session_id,
                question_id: question.id.clone(),
                answer: parse_answer(&question, line),
            })
            .await;

        match result {
            Ok(_) => {}
            Err(SubmitAnswerError::Domain(err)) => {
                stdout.write_all(format!("{}\n\n", err).as_bytes()).await?;
            }
            Err(SubmitAnswerError::AlreadyFinished(_)) => break,
            Err(err) => return Err(err.into()),
        }
    }

    let outcome = finish.handle(FinishAssessmentCommand { session_id }).await?;
    if outcome.finish_reason.is_none() {
        warn!(session_id = %session_id, "Assessment stopped before the policy finished it");
    }

    let summary = serde_json::json!({
        "session_id": session_id,
        "report_id": outcome.ticket.id,
        "finish_reason": outcome.finish_reason,
        "routing": outcome.routing,
        "metrics": outcome.metrics,
    });
    stdout
        .write_all(format!("{}\n", serde_json::to_string_pretty(&summary)?).as_bytes())
        .await?;
    stdout.flush().await?;

    Ok(())
}

fn init_tracing(runtime: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&runtime.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match runtime.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn render(question: &NextQuestion, prompt: &str) -> String {
    let mut out = format!("{}\n", prompt);
    for (i, choice) in question.choices.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, choice));
    }
    if question.kind == InputKind::MultiChoice {
        out.push_str("  (separe várias opções com vírgula)\n");
    }
    out.push_str("> ");
    out
}

/// Blank input skips. Numbers pick from the listed choices.
fn parse_answer(question: &NextQuestion, line: &str) -> Option<Answer> {
    if line.is_empty() {
        return None;
    }

    let pick = |token: &str| -> String {
        token
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| question.choices.get(i))
            .cloned()
            .unwrap_or_else(|| token.to_string())
    };

    let picks = || -> Vec<String> {
        line.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(pick)
            .collect()
    };

    let answer = match question.kind {
        InputKind::FreeText => Answer::Text(line.to_string()),
        InputKind::SingleChoice => Answer::Choice(pick(line)),
        InputKind::QuickChip => Answer::Text(picks().join(", ")),
        InputKind::MultiChoice => Answer::Choices(picks()),
    };
    Some(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use readiness_advisor::domain::assessment::QuestionId;

    fn question(kind: InputKind) -> NextQuestion {
        NextQuestion {
            id: QuestionId::new("pain_points"),
            prompt: "Quais são as maiores dores hoje?".to_string(),
            kind,
            choices: vec![
                "Entregas lentas".to_string(),
                "Custos altos".to_string(),
                "Muitos bugs".to_string(),
            ],
            topic: "Situação Atual".to_string(),
        }
    }

    #[test]
    fn quick_chip_maps_each_number() {
        let answer = parse_answer(&question(InputKind::QuickChip), "1,3");

        assert_eq!(answer, Some(Answer::Text("Entregas lentas, Muitos bugs".to_string())));
    }

    #[test]
    fn quick_chip_keeps_free_text_tokens() {
        let answer = parse_answer(&question(InputKind::QuickChip), "2, falta de dados");

        assert_eq!(answer, Some(Answer::Text("Custos altos, falta de dados".to_string())));
    }

    #[test]
    fn multi_choice_maps_each_number() {
        let answer = parse_answer(&question(InputKind::MultiChoice), "3, 1");

        assert_eq!(
            answer,
            Some(Answer::Choices(vec!["Muitos bugs".to_string(), "Entregas lentas".to_string()]))
        );
    }

    #[test]
    fn single_choice_out_of_range_is_kept_verbatim() {
        let answer = parse_answer(&question(InputKind::SingleChoice), "9");

        assert_eq!(answer, Some(Answer::Choice("9".to_string())));
    }

    #[test]
    fn blank_line_skips() {
        assert_eq!(parse_answer(&question(InputKind::QuickChip), ""), None);
    }
}
