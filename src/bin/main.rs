use clap::Parser;
use lox_scan::{printer, Error, Scanner};
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Prints the tokens of a Lox script, or of each line typed at the prompt.
#[derive(Parser, Debug)]
#[command(name = "lox-scan", version)]
struct Cli {
    /// Script to scan. Starts an interactive prompt when omitted.
    script: Option<PathBuf>,

    /// Only print diagnostics, not the token listing.
    #[arg(short, long)]
    quiet: bool,

    /// Log scanner activity at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut lox = Lox::new(stdout.lock(), stderr.lock(), cli.quiet);

    let result = match &cli.script {
        Some(path) => run_file(&mut lox, path),
        None => run_prompt(&mut lox),
    };

    match result {
        Ok(true) => (),
        Ok(false) => process::exit(65),
        Err(e) => {
            warn!(error = %e, "could not read input");
            eprintln!("{}", e);
            process::exit(74);
        },
    }
}

fn run_file<Out: Write, ErrOut: Write>(lox: &mut Lox<Out, ErrOut>, path: &Path) -> io::Result<bool> {
    debug!(path = %path.display(), "scanning file");
    let contents = std::fs::read_to_string(path)?;
    lox.run(contents.as_str())
}

fn run_prompt<Out: Write, ErrOut: Write>(lox: &mut Lox<Out, ErrOut>) -> io::Result<bool> {
    let mut buffer = String::new();
    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    loop {
        write!(lox.out, "> ")?;
        lox.out.flush()?;

        buffer.clear();

        let num_bytes = stdin.read_line(&mut buffer)?;
        if num_bytes == 0 { break };

        // errors at the prompt are shown, not fatal
        lox.run(buffer.as_str())?;
    }

    Ok(true)
}

struct Lox<Out, ErrOut> {
    out: Out,
    err_out: ErrOut,
    quiet: bool,
}

impl <Out: Write, ErrOut: Write> Lox<Out, ErrOut> {
    fn new(out: Out, err_out: ErrOut, quiet: bool) -> Self {
        Self { out, err_out, quiet }
    }

    /// Scans `source`, printing tokens and diagnostics. Returns whether the
    /// source was free of lexical errors.
    fn run(&mut self, source: &str) -> io::Result<bool> {
        let mut errors: Vec<Error> = Vec::new();
        let tokens = Scanner::new(source).scan_tokens(&mut errors);

        if !self.quiet {
            write!(self.out, "{}", printer::print(&tokens))?;
        }
        for e in errors.iter() {
            writeln!(self.err_out, "{}", e)?;
        }

        Ok(errors.is_empty())
    }
}
