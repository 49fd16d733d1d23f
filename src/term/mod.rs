extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::mach::{Event, Runtime};
use crate::{error, lang::Error};
use ansi_term::Style;
use linefeed::{Interface, ReadResult, Signal};
use std::fs;
use std::io::ErrorKind;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn main() {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(interrupted) {
        eprintln!("{}", error);
    }
}

fn main_loop(interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let mut runtime = Runtime::default();
    let command = Interface::new("HL")?;
    command.set_prompt("> ")?;
    command.set_report_signal(Signal::Interrupt, true);

    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        }
        match runtime.execute(5000) {
            Event::Stopped => {
                let string = match command.read_line()? {
                    ReadResult::Input(string) => string,
                    ReadResult::Signal(Signal::Interrupt) => continue,
                    ReadResult::Signal(_) | ReadResult::Eof => break,
                };
                let line = string.trim();
                if line == "exit" {
                    break;
                }
                if line == "clear" {
                    command.write_fmt(format_args!("\x1b[2J\x1b[1;1H"))?;
                } else if line == "run" || line.starts_with("run ") {
                    match load(line[3..].trim()) {
                        Ok(text) => {
                            runtime.enter(&text);
                            command.add_history_unique(string);
                        }
                        Err(error) => command.write_fmt(format_args!(
                            "{}\n",
                            Style::new().bold().paint(error.to_string())
                        ))?,
                    }
                } else if runtime.enter(&string) {
                    command.add_history_unique(string);
                }
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    command.write_fmt(format_args!(
                        "{}\n",
                        Style::new().bold().paint(error.to_string())
                    ))?;
                }
            }
            Event::Running => {}
            Event::Print(s) => {
                command.write_fmt(format_args!("{}", s))?;
            }
        }
    }
    Ok(())
}

/// Read a whole source file; the path may be quoted.
pub fn load(filename: &str) -> Result<String, Error> {
    let filename = unquote(filename);
    if filename.is_empty() {
        return Err(error!(LoadError; "MISSING FILE NAME"));
    }
    match fs::read_to_string(filename) {
        Ok(text) => Ok(text),
        Err(error) => {
            let msg = error.to_string();
            match error.kind() {
                ErrorKind::NotFound => Err(error!(LoadError; &format!("{}: {}", filename, msg))),
                _ => Err(error!(LoadError; &msg)),
            }
        }
    }
}

fn unquote(path: &str) -> &str {
    let path = path.trim();
    for quote in &['"', '\''] {
        if path.len() >= 2 && path.starts_with(*quote) && path.ends_with(*quote) {
            return &path[1..path.len() - 1];
        }
    }
    path
}
