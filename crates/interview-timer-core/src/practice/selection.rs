use crate::{Deck, PracticeMode, Question, RealModeOrder};

use rand::{Rng, seq::SliceRandom};

/// Clamp a requested question count to `[1, available]`.
///
/// Returns 0 only when nothing is available.
pub fn clamp_count(requested: usize, available: usize) -> usize {
    requested.clamp(1, available.max(1)).min(available)
}

/// Uniform in-place permutation (Fisher-Yates).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Pick the ordered questions for a run.
///
/// `Random` mode always shuffles; `Real` mode shuffles only when the order
/// policy says so. The first `count` (clamped) questions are taken.
pub fn select_questions<R: Rng + ?Sized>(
    deck: &Deck,
    mode: PracticeMode,
    order: RealModeOrder,
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut questions = deck.questions.clone();

    let should_shuffle = match mode {
        PracticeMode::Random => true,
        PracticeMode::Real => order == RealModeOrder::Shuffle,
    };
    if should_shuffle {
        shuffle(&mut questions, rng);
    }

    questions.truncate(clamp_count(count, deck.questions.len()));
    questions
}
