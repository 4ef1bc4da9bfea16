use crate::utils::paths::DEFAULT_OUTPUT_NAME;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "verified-publishers-list")]
#[command(version)]
#[command(about = "Build the verified news publishers PEM bundle and JSON key directory")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory containing the Publishers/ tree
    #[arg(long, env = "VNPL_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Directory the lists are written to
    #[arg(long, env = "VNPL_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Base name of the generated .pem and .json files
    #[arg(long, env = "VNPL_OUTPUT_NAME", default_value = DEFAULT_OUTPUT_NAME)]
    pub output_name: String,

    /// How certificates are decoded
    #[arg(long, env = "VNPL_DECODER", value_enum, default_value_t = DecoderKind::Openssl)]
    pub decoder: DecoderKind,

    /// Seconds to wait for openssl before giving up on a certificate
    #[arg(long, env = "VNPL_OPENSSL_TIMEOUT", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub openssl_timeout: u64,

    /// Validate the publishers tree without writing the lists
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging (repeat for more verbosity: -v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output raw tab-separated values (no formatting)
    #[arg(short, long)]
    pub raw: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DecoderKind {
    /// Run `openssl x509 -text`
    Openssl,
    /// Parse certificates in-process
    Native,
}
