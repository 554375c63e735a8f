use std::{env, fs, path::PathBuf, process};

use log::info;

#[path = "main/logger.rs"]
mod logger;
#[path = "main/replay.rs"]
mod replay;
#[path = "main/trace.rs"]
mod trace;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let level = logger::init_from_env();

    let mut trace_path: Option<PathBuf> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            value if value.starts_with('-') => {
                return Err(format!("unknown argument: {value}"));
            }
            value => {
                if trace_path.is_some() {
                    return Err("multiple trace paths provided".into());
                }
                trace_path = Some(PathBuf::from(value));
            }
        }
    }

    let trace_path = trace_path.ok_or_else(usage)?;
    let text = fs::read_to_string(&trace_path)
        .map_err(|err| format!("failed to read {}: {err}", trace_path.display()))?;
    let trace =
        trace::parse_trace(&text).map_err(|err| format!("{}: {err}", trace_path.display()))?;
    info!(
        "replay: trace={} steps={} screen_width={} raw_width={} log_level={}",
        trace_path.display(),
        trace.steps.len(),
        trace.screen_width,
        trace.raw_width,
        level
    );

    let report = replay::run(&trace)?;
    for fired in &report.events {
        println!(
            "{}: {} {}",
            fired.line,
            fired.event.kind(),
            fired.event.label()
        );
    }

    let tally = report.tally;
    println!(
        "observers: slide-left={} slide-right={} lower={} upper={}",
        tally.slide_left, tally.slide_right, tally.lower, tally.upper
    );
    Ok(())
}

fn usage() -> String {
    format!(
        "usage: touchline <trace-file>\n\n\
         Replays a touch/sensor trace through the swipe classifier and hysteresis trigger.\n\
         Set {}=off|error|warn|info|debug|trace to change log verbosity.",
        logger::LOG_LEVEL_ENV
    )
}
