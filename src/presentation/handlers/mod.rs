mod health;
mod question_answer;
mod question_request;

pub use health::health_handler;
pub use question_answer::question_answer_handler;
pub use question_request::{FieldErrors, QuestionRequest};
