//! Round setup state
//!
//! Holds the roster, the requested impostor count and the topic while a
//! group configures a round. The impostor count callers see is always
//! derived from the requested value and the current roster size; only
//! removing a participant ever rewrites the requested value.

use std::fmt;
use tracing::{debug, info, warn};

use crate::config::settings::{RoundConfiguration, SettingsStore, Storage};
use crate::constants::game::*;
use crate::word_bank::Topic;

/// Largest impostor count a roster of `roster_size` allows (never below 1)
pub fn max_impostors(roster_size: usize) -> usize {
    (roster_size / 2).max(MIN_IMPOSTORS)
}

/// Live impostor count for a requested value and roster size
pub fn clamp_impostors(requested: i64, roster_size: usize) -> usize {
    let max = max_impostors(roster_size) as i64;
    requested.clamp(MIN_IMPOSTORS as i64, max) as usize
}

/// Stable participant identity, never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Roster entry with its 1-based display rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub rank: usize,
}

impl Participant {
    pub fn label(&self) -> String {
        format!("Player {}", self.rank)
    }
}

/// Mutable configuration of the round being set up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupState {
    roster: Vec<ParticipantId>,
    next_id: u32,
    requested_impostors: i64,
    topic_id: String,
}

impl SetupState {
    /// Restore the last committed round from `store`, or start empty
    pub fn initialize<S: Storage>(topics: &[Topic], store: &SettingsStore<S>) -> Self {
        Self::from_saved(store.load(), topics)
    }

    /// Seed state from an optional saved round
    ///
    /// Only the saved roster size survives, clamped into `[0, MAX_PARTICIPANTS]`
    /// and filled with fresh identities. The impostor count is kept raw. The
    /// topic falls back to the first known topic when it is not in `topics`.
    pub fn from_saved(saved: Option<RoundConfiguration>, topics: &[Topic]) -> Self {
        let first_topic = || topics.first().map(|t| t.id.clone()).unwrap_or_default();

        let Some(saved) = saved else {
            debug!("No saved round, starting with an empty roster");
            return Self {
                roster: Vec::new(),
                next_id: 1,
                requested_impostors: DEFAULT_IMPOSTORS,
                topic_id: first_topic(),
            };
        };

        let roster_size = saved.participant_count.clamp(0, MAX_PARTICIPANTS as i64) as u32;
        if i64::from(roster_size) != saved.participant_count {
            warn!(
                stored = saved.participant_count,
                using = roster_size,
                "Saved participant count out of range, clamping"
            );
        }

        let topic_id = if topics.iter().any(|t| t.id == saved.topic_id) {
            saved.topic_id
        } else {
            let fallback = first_topic();
            warn!(stored = %saved.topic_id, using = %fallback, "Saved topic no longer exists");
            fallback
        };

        info!(
            participants = roster_size,
            impostors = saved.impostor_count,
            topic = %topic_id,
            "Restored last round setup"
        );

        Self {
            roster: (1..=roster_size).map(ParticipantId).collect(),
            next_id: roster_size + 1,
            requested_impostors: saved.impostor_count,
            topic_id,
        }
    }

    /// Roster in insertion order with positional ranks
    pub fn participants(&self) -> impl Iterator<Item = Participant> + '_ {
        self.roster.iter().enumerate().map(|(i, &id)| Participant { id, rank: i + 1 })
    }

    pub fn roster_size(&self) -> usize {
        self.roster.len()
    }

    pub fn max_impostors(&self) -> usize {
        max_impostors(self.roster.len())
    }

    /// Impostor count as shown and committed
    pub fn impostor_count(&self) -> usize {
        clamp_impostors(self.requested_impostors, self.roster.len())
    }

    /// Raw requested value, before clamping
    pub fn requested_impostors(&self) -> i64 {
        self.requested_impostors
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    pub fn can_add(&self) -> bool {
        self.roster.len() < MAX_PARTICIPANTS
    }

    /// Whether the round is playable; commit itself does not check this
    pub fn can_start(&self) -> bool {
        self.roster.len() >= MIN_PARTICIPANTS_TO_START
    }

    pub fn shows_impostor_choice(&self) -> bool {
        self.roster.len() >= MIN_PARTICIPANTS_FOR_IMPOSTOR_CHOICE
    }

    /// Append a participant with a fresh identity; `None` once the roster is full
    pub fn add_participant(&mut self) -> Option<ParticipantId> {
        if !self.can_add() {
            debug!(max = MAX_PARTICIPANTS, "Roster full, ignoring add");
            return None;
        }
        let id = ParticipantId(self.next_id);
        self.next_id += 1;
        self.roster.push(id);
        Some(id)
    }

    /// Remove a participant; unknown ids are ignored
    ///
    /// Lowers the requested impostor count when it no longer fits the
    /// smaller roster. Growing the roster again does not raise it back.
    pub fn remove_participant(&mut self, id: ParticipantId) -> bool {
        let Some(index) = self.roster.iter().position(|&p| p == id) else {
            debug!(participant = %id, "Unknown participant, ignoring remove");
            return false;
        };
        self.roster.remove(index);

        let max = self.max_impostors() as i64;
        if self.requested_impostors > max {
            debug!(from = self.requested_impostors, to = max, "Lowering requested impostors");
            self.requested_impostors = max;
        }
        true
    }

    /// Store the requested count verbatim; reads clamp it
    pub fn set_impostor_count(&mut self, requested: i64) {
        self.requested_impostors = requested;
    }

    /// Step the live count up by one, capped at the maximum
    pub fn increment_impostors(&mut self) {
        let next = (self.impostor_count() + 1).min(self.max_impostors());
        self.requested_impostors = next as i64;
    }

    /// Step the live count down by one, floored at one
    pub fn decrement_impostors(&mut self) {
        let next = self.impostor_count().saturating_sub(1).max(MIN_IMPOSTORS);
        self.requested_impostors = next as i64;
    }

    /// Store the topic verbatim, without checking it against the topic set
    pub fn set_topic(&mut self, topic_id: impl Into<String>) {
        self.topic_id = topic_id.into();
    }

    /// Add or remove trailing participants until the roster has `target`
    /// entries (capped at the roster limit)
    pub fn resize_roster(&mut self, target: usize) {
        let target = target.min(MAX_PARTICIPANTS);
        while self.roster.len() < target && self.add_participant().is_some() {}
        while self.roster.len() > target {
            let Some(&last) = self.roster.last() else { break };
            self.remove_participant(last);
        }
    }

    /// Current round as it would be committed, without persisting it
    pub fn snapshot(&self) -> RoundConfiguration {
        RoundConfiguration {
            participant_count: self.roster.len() as i64,
            impostor_count: self.impostor_count() as i64,
            topic_id: self.topic_id.clone(),
        }
    }

    /// Finalize the round and persist it
    ///
    /// There is no validity gate here: callers check [`SetupState::can_start`]
    /// before treating the result as playable.
    pub fn commit<S: Storage>(&self, store: &SettingsStore<S>) -> RoundConfiguration {
        let config = self.snapshot();
        store.save(&config);
        info!(
            participants = config.participant_count,
            impostors = config.impostor_count,
            topic = %config.topic_id,
            "Committed round setup"
        );
        config
    }
}
