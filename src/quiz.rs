//! Picking the next question of a quiz round.
//!
//! The client keeps the round's history and sends the ids it has already been
//! shown with every request. Questions in that history are never offered
//! again, whatever their position in the candidate list.

use std::collections::HashSet;

use rand::Rng;

use crate::configuration::QuizOrder;
use crate::db::Question;

/// `quiz_category` value that selects questions from every category.
pub const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextQuestion {
    pub question: Question,
    /// No other unasked candidate is left after this one.
    pub last_question: bool,
}

/// Chooses the next question among `candidates` that is not in `previous`.
///
/// `candidates` must be in storage order (ascending id). Returns `None` once
/// every candidate has been asked.
pub fn next_question<R: Rng>(
    candidates: Vec<Question>,
    previous: &[i64],
    order: QuizOrder,
    rng: &mut R,
) -> Option<NextQuestion> {
    let asked: HashSet<i64> = previous.iter().copied().collect();
    let mut remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !asked.contains(&q.id))
        .collect();
    if remaining.is_empty() {
        return None;
    }
    let last_question = remaining.len() == 1;

    let index = match order {
        QuizOrder::Sequential => 0,
        QuizOrder::Shuffled => rng.gen_range(0..remaining.len()),
    };
    Some(NextQuestion {
        question: remaining.swap_remove(index),
        last_question,
    })
}
