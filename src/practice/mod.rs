//! Typing practice: order selection, answer checking and the session
//! controller that ties resources, bookmarks and the schedule together

pub mod matching;
pub mod order;
pub mod session;

pub use matching::{is_correct, normalize_for_word_match, word_diff};
pub use order::{OrderCoordinator, OrderPlan};
pub use session::{AnswerOutcome, PracticeError, PracticeSession, SessionSummary};
