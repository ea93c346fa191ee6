extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::Style;
use clap::{ArgAction, Parser};
use intcode::error;
use intcode::lang::{parse, Error};
use intcode::mach::{Event, Listing, Runtime, Word};
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Run an Intcode program, printing each output on its own line.
#[derive(Parser, Debug)]
#[command(name = "intcode", version)]
struct Args {
    /// Program file of comma separated integers
    program: PathBuf,

    /// Queue a value as input; may be repeated
    #[arg(short, long = "input", allow_hyphen_values = true)]
    inputs: Vec<Word>,

    /// Patch memory before running, as ADDR=VALUE; may be repeated
    #[arg(short = 's', long = "set", value_parser = parse_patch)]
    patches: Vec<(Word, Word)>,

    /// Print a disassembly of the patched program and exit
    #[arg(long)]
    list: bool,

    /// Instructions executed between Ctrl-C checks
    #[arg(long, default_value_t = 5000)]
    cycles: usize,

    /// More logging on stderr: -v debug, -vv trace
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

pub fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        warn!(%error, "Ctrl-C handler not installed");
    }
    if let Err(error) = main_loop(&args, interrupted) {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main_loop(args: &Args, interrupted: Arc<AtomicBool>) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.program)
        .map_err(|e| format!("{}: {}", args.program.display(), e))?;
    let mut runtime = Runtime::new(parse(&text)?).with_inputs(args.inputs.iter().copied());
    for (addr, value) in &args.patches {
        runtime.write(*addr, *value)?;
    }
    if args.list {
        print!("{}", Listing::new(runtime.memory()));
        return Ok(());
    }
    match Interface::new("intcode") {
        Ok(interface) => {
            interface.set_prompt("?? ")?;
            interface.set_report_signal(Signal::Interrupt, true);
            runtime.set_input_fn(move |_| prompt_input(&interface));
        }
        Err(error) => debug!(%error, "no line editor, reading input from stdin"),
    }

    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            return Err(format!("BREAK AT {}", runtime.pos()).into());
        }
        match runtime.execute(args.cycles)? {
            Event::Output(value) => println!("{}", value),
            Event::Running => {}
            Event::Halted => break,
        }
    }
    debug!(pos = runtime.pos(), "program halted");
    Ok(())
}

fn prompt_input(interface: &Interface<DefaultTerminal>) -> Result<Word, Error> {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Input(line)) => match line.trim().parse::<Word>() {
                Ok(value) => {
                    interface.add_history_unique(line);
                    return Ok(value);
                }
                Err(_) => {
                    if interface.write_fmt(format_args!("?REDO\n")).is_err() {
                        return Err(error!(InvalidInput; "TERMINAL ERROR"));
                    }
                }
            },
            Ok(ReadResult::Signal(_)) | Ok(ReadResult::Eof) => {
                return Err(error!(InvalidInput; "END OF INPUT"))
            }
            Err(_) => return Err(error!(InvalidInput; "TERMINAL ERROR")),
        }
    }
}

fn parse_patch(s: &str) -> Result<(Word, Word), String> {
    let mut parts = s.splitn(2, '=');
    let addr = parts.next().unwrap_or("").trim();
    let value = parts
        .next()
        .ok_or_else(|| format!("expected ADDR=VALUE, got {:?}", s))?
        .trim();
    let addr = addr
        .parse::<Word>()
        .map_err(|e| format!("bad address {:?}: {}", addr, e))?;
    let value = value
        .parse::<Word>()
        .map_err(|e| format!("bad value {:?}: {}", value, e))?;
    Ok((addr, value))
}
