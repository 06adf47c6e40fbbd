use crate::{DEFAULT_DECK_ID, Deck, Question};

use chrono::Utc;

const DEFAULT_DECK_NAME: &str = "Common Interview Questions";

const DEFAULT_QUESTIONS: [(&str, u32); 30] = [
    ("Please introduce yourself.", 60),
    ("Why are you applying for this position?", 90),
    ("Why did you choose our company?", 60),
    ("What are your strengths?", 60),
    ("What are your weaknesses?", 60),
    ("What did you put the most effort into as a student?", 90),
    ("What would you like to do after joining?", 90),
    ("Where do you see your career in five and ten years?", 90),
    ("Is there any recent news that caught your attention?", 60),
    ("Tell me about an experience working in a team.", 90),
    ("Tell me about a failure and what you learned from it.", 90),
    ("Have you ever shown leadership?", 90),
    ("Tell me about a time you overcame a difficulty.", 90),
    ("What does work mean to you?", 60),
    ("What do you know about our business?", 60),
    ("Where else are you interviewing?", 60),
    ("Do you have a preferred team or role?", 60),
    ("Are you open to relocation?", 30),
    ("What is your view on overtime?", 60),
    ("Is there someone you admire?", 60),
    ("Tell me about your hobbies or special skills.", 60),
    ("Do you have any questions for us?", 60),
    ("How do you relieve stress?", 60),
    ("How would the people around you describe you?", 60),
    ("How will you apply what you learned at university?", 90),
    ("What do you want to achieve at our company?", 90),
    ("Why should we hire you?", 90),
    ("Tell me about a book you read recently.", 60),
    ("How would you describe yourself in one word?", 60),
    ("What would you like to do once you join us?", 90),
];

/// The deck seeded on first run.
///
/// Question ids are stable (`"1"` through `"30"`) so history entries keep
/// pointing at the same question across reinstalls.
pub fn default_deck() -> Deck {
    let now = Utc::now();

    let questions = DEFAULT_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, (text, seconds))| Question {
            id: (i + 1).to_string(),
            text: (*text).to_string(),
            recommended_seconds: *seconds,
            created_at: now,
        })
        .collect();

    Deck {
        id: DEFAULT_DECK_ID.to_string(),
        name: DEFAULT_DECK_NAME.to_string(),
        questions,
        created_at: now,
        updated_at: now,
    }
}
