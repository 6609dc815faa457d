use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use impostor_setup::config::{AppConfig, FileStorage, SettingsStore};
use impostor_setup::constants::game::MIN_PARTICIPANTS_TO_START;
use impostor_setup::setup::SetupState;
use impostor_setup::word_bank::{WordBank, WordBankCache};

#[derive(Debug, Parser)]
#[command(name = "impostor-setup", version, about = "Configure a round of the impostor party game")]
struct Cli {
    /// Word bank URL or file (overrides IMPOSTOR_WORD_BANK)
    #[arg(long, global = true)]
    word_bank: Option<String>,

    /// Directory holding the remembered round (overrides IMPOSTOR_SETTINGS_DIR)
    #[arg(long, global = true)]
    settings_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error (overrides LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List topics in catalog order
    Topics,
    /// List the words of a topic
    Words { topic: String },
    /// Show the remembered setup without committing it
    Show,
    /// Adjust the remembered setup, commit it and draw words for the round
    Start {
        /// Roster size (at most 10)
        #[arg(long)]
        players: Option<usize>,
        /// Requested impostor count, clamped to what the roster allows
        #[arg(long, allow_negative_numbers = true)]
        impostors: Option<i64>,
        /// Topic id
        #[arg(long)]
        topic: Option<String>,
        /// Words to draw, none repeating the previous one
        #[arg(long, default_value_t = 1)]
        rounds: usize,
    },
    /// Draw a single word from a topic
    Draw {
        topic: String,
        /// Word drawn last time, avoided when possible
        #[arg(long)]
        last: Option<String>,
    },
}

fn print_setup(state: &SetupState) {
    println!("topic: {}", state.topic_id());
    println!("participants: {}", state.roster_size());
    for participant in state.participants() {
        println!("  {} (id {})", participant.label(), participant.id);
    }
    if state.shows_impostor_choice() {
        println!("impostors: {} (max {})", state.impostor_count(), state.max_impostors());
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let cache = WordBankCache::new(config.word_bank.clone());
    let bank: WordBank = cache.ensure_loaded().await?;
    let store = SettingsStore::new(FileStorage::new(&config.settings_dir));

    match cli.command {
        Command::Topics => {
            for topic in bank.topics() {
                println!("{}\t{}", topic.id, topic.title);
            }
        }
        Command::Words { topic } => {
            for word in bank.words_for_topic(&topic) {
                println!("{word}");
            }
        }
        Command::Show => {
            let state = SetupState::initialize(bank.topics(), &store);
            print_setup(&state);
        }
        Command::Start { players, impostors, topic, rounds } => {
            let mut state = SetupState::initialize(bank.topics(), &store);
            if let Some(players) = players {
                state.resize_roster(players);
            }
            if let Some(impostors) = impostors {
                state.set_impostor_count(impostors);
            }
            if let Some(topic) = topic {
                state.set_topic(topic);
            }

            if !state.can_start() {
                bail!(
                    "need at least {} participants to start, have {}",
                    MIN_PARTICIPANTS_TO_START,
                    state.roster_size()
                );
            }

            let round = state.commit(&store);
            println!(
                "starting: {} participants, {} impostor(s), topic {}",
                round.participant_count, round.impostor_count, round.topic_id
            );

            let mut last: Option<String> = None;
            for n in 1..=rounds {
                let word = bank.select_word_from_topic(&round.topic_id, last.as_deref());
                println!("round {n}: {word}");
                last = Some(word);
            }
        }
        Command::Draw { topic, last } => {
            println!("{}", bank.select_word_from_topic(&topic, last.as_deref()));
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().with_overrides(
        cli.word_bank.as_deref(),
        cli.settings_dir.clone(),
        cli.log_level.as_deref(),
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.trace_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(word_bank = %config.word_bank, settings_dir = %config.settings_dir.display(), "config loaded");

    run(cli, config)
        .await
        .inspect_err(|err| error!("impostor-setup failed: err={err:#}"))
}
