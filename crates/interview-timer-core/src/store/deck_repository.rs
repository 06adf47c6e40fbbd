use crate::{
    Deck, StoreError,
    error::StoreResult,
    store::{KeyValueStore, RecordKey, default_deck, export_questions, parse_questions, read_json, write_json},
};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use tracing::{info, instrument, warn};

/// Deck and question CRUD over the storage port.
pub struct DeckRepository<'a, S: ?Sized> {
    kv: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> DeckRepository<'a, S> {
    /// Create a view over `kv`.
    pub fn new(kv: &'a mut S) -> Self {
        Self { kv }
    }

    /// All decks in insertion order. Seeds the default deck on first use.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn list(&mut self) -> StoreResult<Vec<Deck>> {
        if let Some(decks) = read_json::<_, Vec<Deck>>(&*self.kv, RecordKey::Decks)? {
            return Ok(decks);
        }

        let decks = vec![default_deck()];
        write_json(&mut *self.kv, RecordKey::Decks, &decks)?;
        info!("Seeded default deck");

        Ok(decks)
    }

    /// Look up one deck.
    ///
    /// # Errors
    ///
    /// Returns `DeckNotFound` for an unknown id.
    #[track_caller]
    pub fn get(&mut self, deck_id: &str) -> StoreResult<Deck> {
        let location = ErrorLocation::from(Location::caller());
        self.list()?
            .into_iter()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| StoreError::DeckNotFound {
                deck_id: deck_id.to_string(),
                location,
            })
    }

    /// Insert a new deck or replace an existing one with the same id.
    ///
    /// Replacing bumps `updated_at`.
    #[track_caller]
    #[instrument(skip(self, deck), fields(deck_id = %deck.id))]
    pub fn save(&mut self, mut deck: Deck) -> StoreResult<()> {
        let mut decks = self.list()?;

        match decks.iter_mut().find(|d| d.id == deck.id) {
            Some(existing) => {
                deck.updated_at = Utc::now();
                *existing = deck;
            }
            None => decks.push(deck),
        }

        write_json(&mut *self.kv, RecordKey::Decks, &decks)
    }

    /// Create and persist an empty deck.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the trimmed name is empty.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn create(&mut self, name: &str) -> StoreResult<Deck> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput {
                reason: "deck name is empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let deck = Deck::new(name);
        self.save(deck.clone())?;
        info!(deck_id = %deck.id, "Deck created");

        Ok(deck)
    }

    /// Delete a deck and its questions.
    ///
    /// # Errors
    ///
    /// Returns `DefaultDeckProtected` for the default deck (the list is left
    /// unchanged) and `DeckNotFound` for an unknown id.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn delete(&mut self, deck_id: &str) -> StoreResult<()> {
        let location = ErrorLocation::from(Location::caller());

        if deck_id == crate::DEFAULT_DECK_ID {
            warn!("Refusing to delete the default deck");
            return Err(StoreError::DefaultDeckProtected { location });
        }

        let mut decks = self.list()?;
        let before = decks.len();
        decks.retain(|d| d.id != deck_id);

        if decks.len() == before {
            return Err(StoreError::DeckNotFound {
                deck_id: deck_id.to_string(),
                location,
            });
        }

        write_json(&mut *self.kv, RecordKey::Decks, &decks)?;
        info!("Deck deleted");

        Ok(())
    }

    /// Append questions parsed from CSV to a deck. Returns how many were added.
    #[track_caller]
    #[instrument(skip(self, csv))]
    pub fn import_csv(&mut self, deck_id: &str, csv: &str) -> StoreResult<usize> {
        let mut deck = self.get(deck_id)?;
        let imported = parse_questions(csv)?;
        let count = imported.len();

        deck.questions.extend(imported);
        self.save(deck)?;
        info!(count, "Questions imported");

        Ok(count)
    }

    /// Render a deck's questions as CSV.
    #[track_caller]
    pub fn export_csv(&mut self, deck_id: &str) -> StoreResult<String> {
        let deck = self.get(deck_id)?;
        export_questions(&deck.questions)
    }
}
