use crate::api::Question;

/// Advances through the interview's question list in order.
///
/// The index stays within `[0, len)` while the interview is in progress;
/// `finish` moves it past the end once the run completes so `current`
/// returns `None`.
#[derive(Debug)]
pub struct Sequencer {
    questions: Vec<Question>,
    index: usize,
}

impl Sequencer {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions, index: 0 }
    }

    /// The active question, or `None` if there are no questions or the run
    /// is past the last one
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Move to the next question.
    ///
    /// Returns `false` when the current question was the last; the lifecycle
    /// manager must end the session instead of advancing.
    pub fn advance(&mut self) -> bool {
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Mark the run complete; `current` returns `None` from here on
    pub fn finish(&mut self) {
        self.index = self.questions.len();
    }

    /// Zero-based index of the active question
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
