use std::{
    fs,
    io::{self, Write},
    process::ExitCode,
};

use clap::{ArgAction, Parser};
use const_format::formatcp;
use lamred::{
    lambda::reducer::{Reducer, REDUCTION_LIMIT},
    RunError,
};
use log::LevelFilter;

const ABOUT: &str = formatcp!(
    "Reduce lambda terms to normal form, one per line of FILE, or compute \
     NUM1 OP NUM2 with Church numerals (OP is +, * or -). \
     Gives up after {REDUCTION_LIMIT} β-steps unless --max-steps says otherwise."
);

#[derive(Parser, Debug)]
#[command(version, about = ABOUT)]
struct Cli {
    /// <FILE> or <NUM1> <OP> <NUM2>
    #[arg(required = true, allow_negative_numbers = true)]
    args: Vec<String>,

    /// Maximum number of β-steps per expression
    #[arg(long, default_value_t = REDUCTION_LIMIT)]
    max_steps: usize,

    /// Log more (-v info, -vv debug, -vvv every step)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let reducer = Reducer::new(cli.max_steps);
    match run(&cli.args, &reducer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: &[String], reducer: &Reducer) -> Result<(), RunError> {
    match args {
        [path] => {
            log::info!("evaluating {path}");
            let source = fs::read_to_string(path)?;
            let mut stdout = io::stdout().lock();
            for line in lamred::evaluate_lines(reducer, &source) {
                writeln!(stdout, "{}", line?)?;
            }
            Ok(())
        }
        [a, op, b] => {
            let out = lamred::evaluate_arithmetic(
                reducer,
                parse_number(a)?,
                op.parse()?,
                parse_number(b)?,
            )?;
            println!("{out}");
            Ok(())
        }
        _ => Err(RunError::ArgumentCount(args.len())),
    }
}

fn parse_number(s: &str) -> Result<i64, RunError> {
    s.parse().map_err(|_| RunError::InvalidNumber(String::from(s)))
}
