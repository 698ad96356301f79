//! Service layer: prompt construction, dispatch, classification and the
//! interactive session that ties them together.

pub mod classifier;
pub mod dispatcher;
pub mod prompt;
pub mod session;

pub use classifier::{classify, CAUTION_TOKEN, DANGER_TOKEN};
pub use dispatcher::DiagnosisDispatcher;
pub use prompt::{build_diagnosis_prompt, REPLY_FIELDS};
pub use session::{Session, SessionError};
