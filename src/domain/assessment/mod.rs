//! Assessment domain module.
//!
//! The `AssessmentSession` aggregate, the question pool it is filled from,
//! and the persona/specialist vocabulary shared by the decision services.

mod errors;
mod fields;
mod persona;
mod pool;
mod question;
mod session;
mod specialist;

pub use errors::AssessmentError;
pub use fields::{FieldGroup, FieldKey, FieldPriority, FieldValue, ESSENTIAL_FIELDS_TOTAL};
pub use persona::{Persona, PersonaDetector, UnknownPersona};
pub use pool::{parse_team_size, QuestionPool};
pub use question::{Answer, Extractor, InputKind, QuestionId, QuestionTemplate};
pub use session::{AssessmentSession, CompanyInfo, ContactInfo, CurrentState, Goals};
pub use specialist::SpecialistCategory;
