#![allow(clippy::unwrap_used)]

use crate::{DEFAULT_DECK_ID, Deck, Question, StoreError, default_deck};

/// WHAT: Question text is trimmed on add and edit
/// WHY: Stray whitespace from the terminal should not end up in the deck
#[test]
fn given_deck_when_question_added_and_updated_then_text_trimmed() {
    // Given: An empty deck
    let mut deck = Deck::new("Tech");

    // When: Adding then editing a question
    let id = deck.add_question("  What is a lifetime?  ", 90).unwrap();
    deck.update_question(&id, " What is a borrow? ", 45).unwrap();

    // Then: One question with the trimmed, updated values
    let question = deck.question(&id).unwrap();
    assert_eq!(question.text, "What is a borrow?");
    assert_eq!(question.recommended_seconds, 45);
    assert_eq!(deck.questions.len(), 1);
}

/// WHAT: Blank text is rejected
/// WHY: A question without text cannot be practiced
#[test]
fn given_blank_text_when_adding_question_then_invalid_input() {
    let mut deck = Deck::new("Tech");

    let result = deck.add_question("   ", 60);

    assert!(matches!(result, Err(StoreError::InvalidInput { .. })));
    assert!(deck.questions.is_empty());
}

/// WHAT: Removing keeps the order of the remaining questions
/// WHY: Real mode with fixed order relies on deck order
#[test]
fn given_three_questions_when_middle_removed_then_order_kept() {
    // Given: Three questions
    let mut deck = Deck::new("Tech");
    let a = deck.add_question("A", 60).unwrap();
    let b = deck.add_question("B", 60).unwrap();
    let c = deck.add_question("C", 60).unwrap();

    // When: Removing B
    let removed = deck.remove_question(&b).unwrap();

    // Then: A, C remain in order; removing B again fails
    assert_eq!(removed.text, "B");
    let ids: Vec<&str> = deck.questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec![a.as_str(), c.as_str()]);
    assert!(matches!(
        deck.remove_question(&b),
        Err(StoreError::QuestionNotFound { .. })
    ));
}

/// WHAT: Zero recommended seconds falls back to the default
#[test]
fn given_zero_recommended_seconds_when_resolving_then_default_used() {
    assert_eq!(Question::new("Q", 0).recommended_or(75), 75);
    assert_eq!(Question::new("Q", 30).recommended_or(75), 30);
}

/// WHAT: The seeded deck has the fixed id and thirty questions
/// WHY: Fresh installs and tests rely on a stable default deck
#[test]
fn given_default_deck_when_built_then_protected_with_thirty_questions() {
    let deck = default_deck();

    assert_eq!(deck.id, DEFAULT_DECK_ID);
    assert!(deck.is_default());
    assert_eq!(deck.questions.len(), 30);
    assert!(deck.questions.iter().all(|q| q.recommended_seconds > 0));
}
