//! Application-wide constants
//!
//! Game-design limits and storage/string literals used throughout
//! the crate, kept in one place.

/// Roster and impostor limits
pub mod game {
    /// Largest roster a round can have
    pub const MAX_PARTICIPANTS: usize = 10;

    /// Fewest participants for a playable round (one impostor, two others)
    pub const MIN_PARTICIPANTS_TO_START: usize = 3;

    /// Roster size at which choosing the impostor count becomes meaningful
    pub const MIN_PARTICIPANTS_FOR_IMPOSTOR_CHOICE: usize = 2;

    /// Floor of the impostor range, even for empty rosters
    pub const MIN_IMPOSTORS: usize = 1;

    /// Impostor count used when nothing was restored
    pub const DEFAULT_IMPOSTORS: i64 = 1;
}

/// Settings persistence constants
pub mod storage {
    /// Fixed key the last committed round is stored under
    pub const SETTINGS_KEY: &str = "imposter-game-settings";

    /// File extension used by file-backed storage entries
    pub const FILE_EXTENSION: &str = "json";
}

/// Application configuration constants
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "impostor-setup";

    /// Environment variable overriding the word bank location (URL or path)
    pub const ENV_WORD_BANK: &str = "IMPOSTOR_WORD_BANK";

    /// Environment variable overriding the settings directory
    pub const ENV_SETTINGS_DIR: &str = "IMPOSTOR_SETTINGS_DIR";

    /// Environment variable selecting the log level
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

/// Word bank constants
pub mod word_bank {
    /// Spanish word list the game ships with
    pub const DEFAULT_URL: &str =
        "https://raw.githubusercontent.com/abelazo/impostor/refs/heads/main/word-bank/es.yaml";
}
