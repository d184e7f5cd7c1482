//! Fair Dice CLI
//!
//! Plays a provably fair non-transitive dice game against the computer, and
//! verifies disclosed HMAC commitments.

use clap::{Parser, Subcommand};
use fair_dice_core::{
    crypto::verify_tag,
    parse_dice_args, ConsoleInterface, FairPlayProtocol, GameConfig, GameError, GameSession,
    HmacService, SecretKey, SessionEnd, Tag,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fair-dice", version)]
#[command(about = "Provably fair non-transitive dice game")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Dice as comma separated faces, e.g. 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3.
    /// Put `--` before the dice if one starts with a negative face.
    dice: Vec<String>,

    /// HMAC key length in bytes (overrides FAIR_DICE_KEY_BYTES)
    #[arg(long)]
    key_bytes: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Recompute a disclosed commitment
    Verify {
        /// Disclosed key, hex
        #[arg(long)]
        key: String,
        /// Disclosed value
        #[arg(long, allow_negative_numbers = true)]
        value: i32,
        /// Tag published before the value was disclosed, hex
        #[arg(long)]
        tag: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Verify { key, value, tag }) => verify(&key, value, &tag).map(|valid| {
            println!("{}", if valid { "valid" } else { "INVALID" });
            valid
        }),
        None => play(&cli.dice, cli.key_bytes).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn play(args: &[String], key_bytes: Option<usize>) -> Result<(), GameError> {
    let config = match key_bytes {
        Some(key_bytes) => GameConfig::with_key_bytes(key_bytes)?,
        None => GameConfig::from_env()?,
    };
    let dice = parse_dice_args(args)?;
    info!(key_bytes = config.key_bytes, dice = dice.len(), "Starting game");

    let protocol = FairPlayProtocol::with_service(HmacService::from_config(&config));
    let mut session = GameSession::with_protocol(dice, protocol)?;
    let mut ui = ConsoleInterface::stdio();

    match session.run(&mut ui)? {
        SessionEnd::Finished(report) => info!(
            verdict = ?report.verdict,
            consistent = report.is_consistent(),
            "Session finished"
        ),
        SessionEnd::Exited => info!("Session exited by user"),
    }
    Ok(())
}

/// Whether `key` and `value` reproduce `tag`
fn verify(key: &str, value: i32, tag: &str) -> Result<bool, GameError> {
    let key = SecretKey::from_hex(key)?;
    let tag = Tag::from_hex(tag)?;
    Ok(verify_tag(&key, value, &tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_dice_positionals() {
        let cli = Cli::parse_from(["fair-dice", "2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.dice, ["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]);
        assert_eq!(cli.key_bytes, None);
    }

    #[test]
    fn test_key_bytes_after_dice() {
        let cli = Cli::parse_from([
            "fair-dice",
            "2,2,4,4,9,9",
            "6,8,1,1,8,6",
            "7,5,3,7,5,3",
            "--key-bytes",
            "64",
        ]);
        assert_eq!(cli.dice.len(), 3);
        assert_eq!(cli.key_bytes, Some(64));
    }

    #[test]
    fn test_negative_faces_after_separator() {
        let cli = Cli::parse_from([
            "fair-dice",
            "--key-bytes",
            "48",
            "2,2,4,4,9,9",
            "--",
            "-1,1,6,6,8,8",
            "3,3,5,5,7,7",
        ]);
        assert_eq!(cli.dice, ["2,2,4,4,9,9", "-1,1,6,6,8,8", "3,3,5,5,7,7"]);
        assert_eq!(cli.key_bytes, Some(48));
    }

    #[test]
    fn test_parses_verify() {
        let cli = Cli::parse_from(["fair-dice", "verify", "--key", "AB", "--value", "3", "--tag", "CD"]);
        assert!(matches!(
            cli.command,
            Some(Command::Verify { value: 3, .. })
        ));
    }

    #[test]
    fn test_verify_disclosed_round() {
        let mut service = HmacService::new();
        let commitment = service.commit(0, 5).unwrap();
        let key = commitment.key().to_hex();
        let tag = commitment.tag().to_string();

        assert_eq!(verify(&key, commitment.secret(), &tag), Ok(true));
        assert_eq!(verify(&key.to_lowercase(), commitment.secret(), &tag), Ok(true));
        assert_eq!(verify(&key, commitment.secret() + 1, &tag), Ok(false));
        assert!(verify("zz", 0, &tag).is_err());
    }

    #[test]
    fn test_play_rejects_too_few_dice() {
        let args = vec!["2,2,4,4,9,9".to_string()];
        assert_eq!(
            play(&args, None),
            Err(GameError::NotEnoughDice { min: 3, actual: 1 })
        );
    }

    #[test]
    fn test_play_rejects_short_key() {
        let args = vec!["1,2,3,4,5,6".to_string(); 3];
        assert!(matches!(
            play(&args, Some(8)),
            Err(GameError::InvalidKeyLength { .. })
        ));
    }
}
