//! Deleg CLI
//!
//! Runs structured programs against the drawing host's initial dictionary
//! and prints the resulting stack.

use clap::{Parser as ClapParser, Subcommand};
use deleg::{EvalConfig, Session, State, show_stack};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

mod host;
mod program;

#[derive(ClapParser)]
#[command(name = "deleg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Deleg - run concatenative programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JSON program file
    Run {
        /// Program file (JSON array of words and host commands)
        input: PathBuf,

        /// Evaluator configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the maximum quotation nesting depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print the stack after every step
        #[arg(long)]
        trace: bool,
    },

    /// Run the built-in demo program
    Demo,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deleg=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input,
            config,
            max_depth,
            trace,
        } => run_file(
            &input,
            config.as_deref(),
            max_depth,
            trace,
            &mut io::stdout().lock(),
        ),
        Commands::Demo => run_demo(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>, max_depth: Option<usize>) -> Result<EvalConfig, String> {
    let config = match path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            EvalConfig::from_toml(&source)?
        }
        None => EvalConfig::default(),
    };
    Ok(match max_depth {
        Some(depth) => config.with_max_depth(depth),
        None => config,
    })
}

fn run_file(
    input: &Path,
    config: Option<&Path>,
    max_depth: Option<usize>,
    trace: bool,
    out: &mut impl Write,
) -> Result<(), String> {
    let config = load_config(config, max_depth)?;
    let steps = program::load_program(input)?;
    info!(steps = steps.len(), max_depth = config.max_depth, "running {}", input.display());

    let mut session = Session::with_config(host::initial_state(), config);
    let mut traced = 0usize;
    let mut write_error = None;
    let outcome = program::run(&mut session, &steps, |state| {
        if trace && write_error.is_none() {
            traced += 1;
            if let Err(e) = writeln!(out, "{}", show_stack(state)) {
                write_error = Some(e);
            }
        }
    });
    if let Some(e) = write_error {
        return Err(format!("Failed to write output: {}", e));
    }
    // The final stack is always shown once: after a failure, or when no
    // traced line already ended on it
    if traced == 0 || outcome.is_err() {
        writeln!(out, "{}", show_stack(session.state()))
            .map_err(|e| format!("Failed to write output: {}", e))?;
    }
    outcome
}

fn run_demo() -> Result<(), String> {
    let mut session = Session::new(State::with_prelude());
    println!("{}", show_stack(session.state()));
    program::run(&mut session, &program::demo_program(), |_| {})?;
    println!("{}", show_stack(session.state()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_defaults() {
        assert_eq!(load_config(None, None).unwrap(), EvalConfig::default());
    }

    #[test]
    fn test_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth = 20").unwrap();

        assert_eq!(load_config(Some(file.path()), None).unwrap().max_depth, 20);
        assert_eq!(
            load_config(Some(file.path()), Some(7)).unwrap().max_depth,
            7
        );
    }

    #[test]
    fn test_run_file_reports_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"sym": "loop"}}, ["loop"], "def", "loop"]"#).unwrap();
        let mut out = Vec::new();
        let err = run_file(file.path(), None, Some(10), false, &mut out).unwrap_err();
        assert_eq!(
            err,
            "step 3: evaluation depth exceeded 10 while expanding `loop`"
        );
        assert_eq!(String::from_utf8(out).unwrap(), "<0> \n");
    }

    #[test]
    fn test_trace_empty_program_prints_final_stack() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        let mut out = Vec::new();
        run_file(file.path(), None, None, true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<0> \n");
    }

    #[test]
    fn test_trace_prints_each_step_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, \"swap\"]").unwrap();
        let mut out = Vec::new();
        run_file(file.path(), None, None, true, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<1> 1\n<2> 1 2\n<2> 2 1\n"
        );
    }
}
