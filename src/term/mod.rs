extern crate ansi_term;
extern crate clap;
extern crate ctrlc;
extern crate linefeed;
use crate::lang::Error;
use crate::mach::{compile, Event, Listing, Runtime};
use ansi_term::Style;
use clap::Parser;
use linefeed::{Interface, ReadResult, Signal};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "pl0", about = "Compiles and runs a PL/0 program.", version)]
struct Args {
    /// Path to a PL/0 source file.
    program: PathBuf,

    /// Print the object-code listing before running.
    #[arg(long)]
    list: bool,

    /// Compile and list only; do not run.
    #[arg(long)]
    no_run: bool,
}

pub fn main() {
    let args = Args::parse();
    let source = match std::fs::read_to_string(&args.program) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}: {}", args.program.display(), error);
            std::process::exit(1);
        }
    };
    let compiled = match compile(&source) {
        Ok(compiled) => compiled,
        Err(error) => {
            // Fatal: a resource limit stopped the compiler cold.
            report(&error);
            std::process::exit(1);
        }
    };
    // Diagnostics alone never block the run.
    for error in &compiled.errors {
        report(error);
    }
    if args.list || args.no_run {
        print!("{}", Listing::new(&compiled.code));
    }
    if args.no_run {
        return;
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    if let Err(error) = run(Runtime::new(compiled.code), interrupted) {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

fn report(error: &Error) {
    eprintln!("{}", Style::new().bold().paint(error.to_string()));
}

fn run(mut runtime: Runtime, interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let input = Interface::new("pl0")?;
    input.set_report_signal(Signal::Interrupt, true);
    input.set_prompt("? ")?;
    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        }
        match runtime.execute(5000) {
            Event::Stopped => break,
            Event::Running => {}
            Event::Print(s) => {
                print!("{}", s);
                std::io::stdout().flush()?;
            }
            Event::Input => match input.read_line()? {
                ReadResult::Input(line) => runtime.input(&line),
                ReadResult::Signal(_) | ReadResult::Eof => runtime.interrupt(),
            },
            Event::Errors(errors) => {
                for error in errors.iter() {
                    report(error);
                }
            }
        }
    }
    Ok(())
}
