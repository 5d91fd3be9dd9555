//! Random quiz sessions
//!
//! A session repeatedly draws a question from the pool, accepts one answer,
//! reveals the result and keeps a running score. Draws are independent, so
//! the same question can come up twice in a row.

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::catalog::FlatQuestion;
use crate::error::QuizError;

/// Running score for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

/// Where the current question is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Waiting for an answer
    Unanswered,
    /// Answered; the correct option is shown
    Revealed,
}

/// Result of answering the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Correct,
    Wrong,
    /// The question was already answered; nothing changed
    AlreadyAnswered,
}

/// How an option should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// Not revealed yet, option can be picked
    Pending,
    /// The correct answer
    Correct,
    /// Picked, but wrong
    Wrong,
    /// Neither the answer nor the pick
    Dimmed,
}

/// A quiz over a fixed pool of questions
pub struct QuizSession<'a, R = ThreadRng> {
    pool: Vec<FlatQuestion<'a>>,
    rng: R,
    current: usize,
    selected: Option<String>,
    score: Score,
}

impl<'a> QuizSession<'a, ThreadRng> {
    /// Start a session using the thread-local generator
    pub fn new(pool: Vec<FlatQuestion<'a>>) -> Result<Self, QuizError> {
        Self::with_rng(pool, rand::rng())
    }
}

impl<'a, R: Rng> QuizSession<'a, R> {
    /// Start a session with a specific random generator
    pub fn with_rng(pool: Vec<FlatQuestion<'a>>, rng: R) -> Result<Self, QuizError> {
        if pool.is_empty() {
            return Err(QuizError::EmptyPool);
        }

        let mut session = Self { pool, rng, current: 0, selected: None, score: Score::default() };
        session.next();
        Ok(session)
    }

    /// The question being asked
    pub fn current(&self) -> FlatQuestion<'a> {
        self.pool[self.current]
    }

    /// Index of the current question in the pool
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of questions that can be drawn
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// The option picked for the current question, if any
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_revealed(&self) -> bool {
        self.selected.is_some()
    }

    pub fn state(&self) -> QuizState {
        if self.is_revealed() { QuizState::Revealed } else { QuizState::Unanswered }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Answer the current question
    ///
    /// Only the first answer counts; later calls leave the session untouched.
    pub fn select(&mut self, option: &str) -> SelectOutcome {
        if self.is_revealed() {
            return SelectOutcome::AlreadyAnswered;
        }

        let correct = self.current().question.is_correct(option);
        self.selected = Some(option.to_string());
        self.score.total += 1;
        if correct {
            self.score.correct += 1;
        }

        tracing::debug!(
            "Answered question {} ({}): {}",
            self.current,
            self.current().topic_title,
            if correct { "correct" } else { "wrong" }
        );

        if correct { SelectOutcome::Correct } else { SelectOutcome::Wrong }
    }

    /// Draw a new question, keeping the score
    pub fn next(&mut self) {
        self.current = self.rng.random_range(0..self.pool.len());
        self.selected = None;
    }

    /// Zero the score and draw a new question
    pub fn reset_score(&mut self) {
        self.score = Score::default();
        self.next();
    }

    /// Display mark for every option of the current question, in order
    pub fn option_marks(&self) -> Vec<(&'a str, OptionMark)> {
        let question = self.current().question;
        question
            .options
            .iter()
            .map(|option| {
                let mark = match self.selected.as_deref() {
                    None => OptionMark::Pending,
                    Some(_) if question.is_correct(option) => OptionMark::Correct,
                    Some(picked) if picked == option => OptionMark::Wrong,
                    Some(_) => OptionMark::Dimmed,
                };
                (option.as_str(), mark)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::Question;

    fn abc() -> Question {
        Question::new("Pick B", ["A", "B", "C"], "B")
    }

    fn session(pool: &[Question]) -> QuizSession<'_, StdRng> {
        let flat = pool.iter().map(|question| FlatQuestion { question, topic_title: "T" }).collect();
        QuizSession::with_rng(flat, StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn empty_pool_is_rejected() {
        let result = QuizSession::with_rng(Vec::new(), StdRng::seed_from_u64(1));
        assert_eq!(result.err(), Some(QuizError::EmptyPool));
    }

    #[test]
    fn starts_unanswered() {
        let pool = [abc()];
        let quiz = session(&pool);
        assert_eq!(quiz.state(), QuizState::Unanswered);
        assert_eq!(quiz.selected(), None);
        assert_eq!(quiz.score(), Score::default());
        assert!(quiz.option_marks().iter().all(|(_, m)| *m == OptionMark::Pending));
    }

    #[test]
    fn correct_answer_scores() {
        let pool = [abc()];
        let mut quiz = session(&pool);

        assert_eq!(quiz.select("B"), SelectOutcome::Correct);
        assert_eq!(quiz.state(), QuizState::Revealed);
        assert_eq!(quiz.score(), Score { correct: 1, total: 1 });
        assert_eq!(
            quiz.option_marks(),
            vec![("A", OptionMark::Dimmed), ("B", OptionMark::Correct), ("C", OptionMark::Dimmed)]
        );
    }

    #[test]
    fn wrong_answer_counts_total_only() {
        let pool = [abc()];
        let mut quiz = session(&pool);

        assert_eq!(quiz.select("A"), SelectOutcome::Wrong);
        assert_eq!(quiz.score(), Score { correct: 0, total: 1 });
        assert_eq!(
            quiz.option_marks(),
            vec![("A", OptionMark::Wrong), ("B", OptionMark::Correct), ("C", OptionMark::Dimmed)]
        );
    }

    #[test]
    fn second_select_is_ignored() {
        let pool = [abc()];
        let mut quiz = session(&pool);

        quiz.select("A");
        assert_eq!(quiz.select("C"), SelectOutcome::AlreadyAnswered);
        assert_eq!(quiz.select("B"), SelectOutcome::AlreadyAnswered);
        assert_eq!(quiz.selected(), Some("A"));
        assert_eq!(quiz.score(), Score { correct: 0, total: 1 });
    }

    #[test]
    fn reveal_keeps_question_intact() {
        let pool = [abc()];
        let mut quiz = session(&pool);
        quiz.select("C");

        let current = quiz.current().question;
        assert_eq!(current.answer, "B");
        assert_eq!(current.options, vec!["A", "B", "C"]);
    }

    #[test]
    fn next_clears_selection_and_keeps_score() {
        let pool = [abc()];
        let mut quiz = session(&pool);
        quiz.select("B");
        quiz.next();

        assert_eq!(quiz.state(), QuizState::Unanswered);
        assert_eq!(quiz.selected(), None);
        assert_eq!(quiz.score(), Score { correct: 1, total: 1 });

        assert_eq!(quiz.select("A"), SelectOutcome::Wrong);
        assert_eq!(quiz.score(), Score { correct: 1, total: 2 });
    }

    #[test]
    fn reset_score_zeroes_and_moves_on() {
        let pool = [abc()];
        let mut quiz = session(&pool);
        quiz.select("B");
        quiz.reset_score();

        assert_eq!(quiz.score(), Score::default());
        assert_eq!(quiz.state(), QuizState::Unanswered);
    }

    #[test]
    fn reset_score_works_while_unanswered() {
        let pool = [abc()];
        let mut quiz = session(&pool);
        quiz.reset_score();
        assert_eq!(quiz.score(), Score::default());
    }

    #[test]
    fn answers_compare_exactly() {
        let pool = [abc()];
        let mut quiz = session(&pool);
        assert_eq!(quiz.select("b"), SelectOutcome::Wrong);
    }

    #[test]
    fn draws_cover_pool_and_repeat() {
        let pool = [abc(), abc(), abc()];
        let mut quiz = session(&pool);

        let mut seen = HashSet::new();
        let mut repeated = false;
        let mut last = quiz.current_index();
        for _ in 0..300 {
            quiz.next();
            let idx = quiz.current_index();
            assert!(idx < quiz.pool_size());
            repeated |= idx == last;
            seen.insert(idx);
            last = idx;
        }

        assert_eq!(seen.len(), 3);
        assert!(repeated, "draws are with replacement");
    }
}
