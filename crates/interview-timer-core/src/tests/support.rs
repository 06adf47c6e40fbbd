#![allow(clippy::unwrap_used)]

use crate::{
    AppSettings, CaptureError, Deck, EncodedAudio, KeyValueStore, MemoryStore, PracticeEvent,
    PracticeSession, PracticeState, RecordKey, Recorder, Storage, StoreError, UserAction,
    error::{CaptureResult, StoreResult},
};

use std::{cell::Cell, panic::Location, rc::Rc};

use error_location::ErrorLocation;

pub(crate) const FAKE_AUDIO: &str = "data:audio/wav;base64,UklGRg==";

/// Counters shared between a test and the [`FakeRecorder`] it moved into a
/// session.
#[derive(Debug, Default)]
pub(crate) struct RecorderCalls {
    pub starts: Cell<usize>,
    pub stops: Cell<usize>,
    pub discards: Cell<usize>,
}

/// Scripted recorder that never touches a device.
pub(crate) struct FakeRecorder {
    calls: Rc<RecorderCalls>,
    fail_start: bool,
    fail_stop: bool,
    active: bool,
}

impl FakeRecorder {
    pub fn new() -> (Self, Rc<RecorderCalls>) {
        let calls = Rc::new(RecorderCalls::default());
        let recorder = Self {
            calls: Rc::clone(&calls),
            fail_start: false,
            fail_stop: false,
            active: false,
        };
        (recorder, calls)
    }

    pub fn failing_start() -> (Self, Rc<RecorderCalls>) {
        let (mut recorder, calls) = Self::new();
        recorder.fail_start = true;
        (recorder, calls)
    }

    pub fn failing_stop() -> (Self, Rc<RecorderCalls>) {
        let (mut recorder, calls) = Self::new();
        recorder.fail_stop = true;
        (recorder, calls)
    }
}

impl Recorder for FakeRecorder {
    fn start(&mut self) -> CaptureResult<()> {
        self.calls.starts.set(self.calls.starts.get() + 1);
        if self.fail_start {
            return Err(CaptureError::DeviceError {
                reason: "permission denied".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.active = true;
        Ok(())
    }

    fn stop(&mut self) -> CaptureResult<Option<EncodedAudio>> {
        if !std::mem::replace(&mut self.active, false) {
            return Ok(None);
        }
        self.calls.stops.set(self.calls.stops.get() + 1);
        if self.fail_stop {
            return Err(CaptureError::EncodingFailed {
                reason: "device vanished".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Some(EncodedAudio::from_data_url(FAKE_AUDIO)))
    }

    fn discard(&mut self) {
        if std::mem::replace(&mut self.active, false) {
            self.calls.discards.set(self.calls.discards.get() + 1);
        }
    }

    fn is_recording(&self) -> bool {
        self.active
    }
}

/// [`MemoryStore`] whose writes to one key fail a set number of times
/// before going through.
#[derive(Debug)]
pub(crate) struct FailingStore {
    inner: MemoryStore,
    fail_key: RecordKey,
    failures_left: usize,
}

impl FailingStore {
    pub fn new(inner: MemoryStore, fail_key: RecordKey, failures: usize) -> Self {
        Self {
            inner,
            fail_key,
            failures_left: failures,
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: RecordKey) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn put(&mut self, key: RecordKey, value: &str) -> StoreResult<()> {
        if key == self.fail_key && self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(StoreError::from(std::io::Error::other("disk full")));
        }
        self.inner.put(key, value)
    }
}

/// A deck of `n` questions, each recommending `seconds`.
pub(crate) fn deck_with(n: usize, seconds: u32) -> Deck {
    let mut deck = Deck::new("Test deck");
    for i in 0..n {
        deck.add_question(&format!("Question {}", i + 1), seconds)
            .unwrap();
    }
    deck
}

/// Storage port pre-seeded with one deck and the given settings.
pub(crate) fn seeded_store(deck: &Deck, settings: &AppSettings) -> MemoryStore {
    let mut storage = Storage::new(MemoryStore::new());
    storage.decks().save(deck.clone()).unwrap();
    storage.settings().put(settings).unwrap();
    storage.into_inner()
}

/// A session over a seeded store and a fresh fake recorder.
pub(crate) fn session_with(
    deck: &Deck,
    settings: &AppSettings,
    recorder: FakeRecorder,
) -> PracticeSession<MemoryStore, FakeRecorder> {
    PracticeSession::new(seeded_store(deck, settings), recorder)
}

/// Send `n` ticks.
pub(crate) fn tick<S: KeyValueStore>(session: &mut PracticeSession<S, FakeRecorder>, n: u32) {
    for _ in 0..n {
        session.handle(PracticeEvent::Tick).unwrap();
    }
}

/// Answer the current question for `seconds`, then end and save it.
pub(crate) fn answer<S: KeyValueStore>(session: &mut PracticeSession<S, FakeRecorder>, seconds: u32) {
    assert!(matches!(session.state(), PracticeState::Answering(_)));
    tick(session, seconds);
    session.handle(UserAction::End.into()).unwrap();
    session.handle(UserAction::Save.into()).unwrap();
}
