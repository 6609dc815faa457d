//! Setup engine for a round of the impostor party game
//!
//! [`setup::SetupState`] keeps roster, impostor count and topic consistent
//! while they are edited, [`config::SettingsStore`] remembers the last
//! committed round, and [`word_bank::WordBank`] serves topics and draws words.

#![forbid(unsafe_code)]

pub mod config;
pub mod constants;
pub mod setup;
pub mod word_bank;

pub use config::{AppConfig, RoundConfiguration, SettingsStore};
pub use setup::{Participant, ParticipantId, SetupState};
pub use word_bank::{Topic, WordBank, WordBankCache, WordBankSource};
