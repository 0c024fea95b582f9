//! Assessment Command and Query Handlers
//!
//! ## Commands
//! - `StartAssessment` - Create a new session
//! - `SubmitAnswer` - Record (or skip) an answer and advance
//! - `FinishAssessment` - Route and hand the session to report generation
//!
//! ## Queries
//! - `GetNextQuestion` - Next step, optionally phrased by a text generator
//! - `RouteSpecialist` - Current specialist recommendation

mod finish_assessment;
mod get_next_question;
mod route_specialist;
mod start_assessment;
mod submit_answer;

pub use finish_assessment::{
    FinishAssessmentCommand, FinishAssessmentError, FinishAssessmentHandler,
    FinishAssessmentResult,
};
pub use get_next_question::{
    GetNextQuestionError, GetNextQuestionHandler, GetNextQuestionQuery, GetNextQuestionResult,
    DEFAULT_PHRASING_TIMEOUT,
};
pub use route_specialist::{
    RouteSpecialistError, RouteSpecialistHandler, RouteSpecialistQuery, RouteSpecialistResult,
};
pub use start_assessment::{
    StartAssessmentCommand, StartAssessmentError, StartAssessmentHandler, StartAssessmentResult,
};
pub use submit_answer::{
    SubmitAnswerCommand, SubmitAnswerError, SubmitAnswerHandler, SubmitAnswerResult,
};
