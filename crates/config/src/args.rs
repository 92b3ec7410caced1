use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.mainnet)
    #[arg(short, long, default_value = ".env")]
    pub env_file: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert a shard account record (JSON) into an account
    Account {
        /// Account address, raw or user-friendly
        #[arg(long)]
        address: String,

        /// Path to the shard account JSON
        #[arg(long)]
        file: PathBuf,
    },

    /// Convert a transaction record, or a JSON array of them, into transactions
    Transaction {
        /// Path to the transaction JSON
        #[arg(long)]
        file: PathBuf,

        /// Batch order assigned to the first transaction
        #[arg(long, default_value_t = 0)]
        bias: u64,
    },

    /// Classify and decode a message body
    DecodeBody {
        /// Which registry to decode with
        #[arg(long, value_enum, default_value_t = BodyKind::Internal)]
        kind: BodyKind,

        /// Body as a hex-encoded bag of cells
        body: String,
    },

    /// Report whether an address is classified as a wallet
    IsWallet {
        /// Account address, raw or user-friendly
        address: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    ExtIn,
    Internal,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decode_body() {
        let args = Args::try_parse_from(["ton-normalizer", "decode-body", "--kind", "ext-in", "b5ee9c72"]).unwrap();
        assert_eq!(args.env_file, ".env");
        match args.command {
            Command::DecodeBody { kind, body } => {
                assert_eq!(kind, BodyKind::ExtIn);
                assert_eq!(body, "b5ee9c72");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_transaction_with_bias() {
        let args = Args::try_parse_from([
            "ton-normalizer",
            "--env-file",
            ".env.test",
            "transaction",
            "--file",
            "tx.json",
            "--bias",
            "12",
        ])
        .unwrap();
        assert_eq!(args.env_file, ".env.test");
        assert!(matches!(args.command, Command::Transaction { bias: 12, .. }));
    }

    #[test]
    fn test_parse_is_wallet() {
        let args = Args::try_parse_from(["ton-normalizer", "is-wallet", "0:00"]).unwrap();
        assert!(matches!(args.command, Command::IsWallet { address } if address == "0:00"));
    }

    #[test]
    fn test_account_requires_address() {
        assert!(Args::try_parse_from(["ton-normalizer", "account", "--file", "a.json"]).is_err());
    }
}
