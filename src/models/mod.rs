pub mod due;
pub mod flashcard;
pub mod quality;
pub mod review_session;
pub mod review_state;
pub mod sm2;

pub use flashcard::{Difficulty, Flashcard, NewFlashcard};
pub use quality::Quality;
pub use review_session::{ReviewSession, SessionSummary};
pub use review_state::ReviewState;
