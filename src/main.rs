use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use sift::format::FormatKind;

/// sift — scan files (or stdin) line by line for a regular expression and
/// print matching lines in a selectable format.
#[derive(Parser)]
#[command(name = "sift", version, about)]
struct Cli {
    /// Regular expression to search for.
    pattern: Option<String>,

    /// Files to search, scanned in the given order. Reads standard input
    /// when none are given.
    files: Vec<PathBuf>,

    /// Print a second line with '^' under every matched character.
    #[arg(short, long, group = "format")]
    underscore: bool,

    /// Highlight each match in color.
    #[arg(short, long, group = "format")]
    color: bool,

    /// Machine-readable output: one `file:line:start:text` record per match.
    #[arg(short, long, group = "format")]
    machine: bool,

    /// Print shell completions for the given shell.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    // Shell completions
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "sift", &mut io::stdout());
        return;
    }

    let Some(pattern) = cli.pattern else {
        eprintln!("usage: sift <pattern> [FILE...] [-u | -c | -m]");
        process::exit(3);
    };

    let format = if cli.underscore {
        FormatKind::Underscore
    } else if cli.color {
        FormatKind::Color
    } else if cli.machine {
        FormatKind::Machine
    } else {
        FormatKind::Default
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = sift::run(&pattern, &cli.files, format, &mut stdout) {
        let _ = stdout.flush();
        eprintln!("{e}");
        process::exit(e.exit_code());
    }
}
