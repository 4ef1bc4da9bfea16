use clap::Parser;
use verified_publishers_list::cli::{handle_command, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = handle_command(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
