use crate::cert::{CertificateDecoder, NativeDecoder, OpensslDecoder};
use crate::cli::args::{Cli, DecoderKind};
use crate::list::{self, GeneratedLists, ListBuilder};
use crate::utils::errors::Result;
use crate::utils::output::{summary_rows, OutputFormat, SUMMARY_HEADER};
use crate::utils::paths::ListPaths;
use chrono::Utc;
use std::io;
use std::time::Duration;

pub fn handle_command(cli: Cli) -> Result<()> {
    // Initialize logging - always to stderr
    if !cli.quiet {
        let log_level = match cli.verbose {
            0 => "verified_publishers_list=warn",  // Default: warnings only
            1 => "verified_publishers_list=info",  // -v: info level
            2 => "verified_publishers_list=debug", // -vv: debug level
            _ => "verified_publishers_list=trace", // -vvv+: trace level
        };

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(log_level)
            .init();
    }

    let paths = ListPaths::new(&cli.root, &cli.output_dir, cli.output_name.as_str());
    let decoder = make_decoder(cli.decoder, Duration::from_secs(cli.openssl_timeout))?;

    let lists = if cli.dry_run {
        let lists = ListBuilder::new(&paths, decoder.as_ref()).build(Utc::now())?;
        tracing::info!(
            "Dry run: {} publishers validated, nothing written",
            lists.directory.entities.len()
        );
        lists
    } else {
        list::generate(&paths, decoder.as_ref())?
    };

    if !cli.quiet {
        print_summary(&lists, &OutputFormat::new(cli.raw));
    }

    Ok(())
}

fn make_decoder(kind: DecoderKind, timeout: Duration) -> Result<Box<dyn CertificateDecoder>> {
    let decoder: Box<dyn CertificateDecoder> = match kind {
        DecoderKind::Openssl => Box::new(OpensslDecoder::locate(timeout)?),
        DecoderKind::Native => Box::new(NativeDecoder),
    };
    Ok(decoder)
}

fn print_summary(lists: &GeneratedLists, output: &OutputFormat) {
    let mut table: Vec<Vec<String>> = Vec::new();
    if !output.raw {
        table.push(SUMMARY_HEADER.iter().map(|h| h.to_string()).collect());
    }
    table.extend(summary_rows(&lists.directory.entities));
    output.print_table(&table);

    if !output.raw {
        println!(
            "\n{} publishers, {} keys",
            lists.directory.entities.len(),
            lists.directory.key_count()
        );
    }
}
