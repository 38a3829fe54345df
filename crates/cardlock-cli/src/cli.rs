//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Work with cardlock encrypted message documents.
///
/// The secret answer is read from the `CARDLOCK_ANSWER` environment variable
/// when set, otherwise prompted for interactively with hidden input. It is
/// used exactly as supplied — no trimming, no case folding.
#[derive(Debug, Parser)]
#[command(name = "cardlock", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt an HTML message body into a storable document.
    ///
    /// Reads plaintext from `--in` (or stdin) and writes the
    /// `{"encryptedPayload": …, "salt": …}` JSON document to `--out`
    /// (or stdout).
    Encrypt {
        /// Plaintext input file; stdin when omitted.
        #[arg(long = "in", value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file for the encrypted document; stdout when omitted.
        #[arg(long = "out", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Decrypt a stored document back to its HTML message body.
    Decrypt {
        /// Encrypted JSON document; stdin when omitted.
        #[arg(long = "in", value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file for the plaintext; stdout when omitted.
        #[arg(long = "out", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Report a stored document's framing without attempting decryption.
    ///
    /// Requires no secret: decodes the base64 layers and prints the
    /// IV / ciphertext / tag split and the salt length. Image references
    /// cannot be listed here — they live inside the ciphertext.
    Inspect {
        /// Encrypted JSON document; stdin when omitted.
        #[arg(long = "in", value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_encrypt_with_files() {
        let cli = Cli::try_parse_from(["cardlock", "encrypt", "--in", "body.html", "--out", "card.json"])
            .unwrap();
        match cli.command {
            Command::Encrypt { input, output } => {
                assert_eq!(input.unwrap().to_str().unwrap(), "body.html");
                assert_eq!(output.unwrap().to_str().unwrap(), "card.json");
            }
            _ => panic!("expected encrypt"),
        }
    }

    #[test]
    fn inspect_takes_no_output() {
        assert!(Cli::try_parse_from(["cardlock", "inspect", "--out", "x"]).is_err());
    }
}
