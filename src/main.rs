use clap::Parser;

use soundcheck::cli::Cli;
use soundcheck::commands::run_check;

fn main() {
    let cli = Cli::parse();
    std::process::exit(run_check(&cli));
}
