use hl::mach::{Event, Runtime};
use std::process::exit;

fn main() {
    let mut args = std::env::args().skip(1);
    match args.next() {
        None => hl::term::main(),
        Some(path) => {
            if path.starts_with('-') || args.next().is_some() {
                eprintln!("usage: hl [file]");
                exit(1);
            }
            exit(run_file(&path));
        }
    }
}

// One-shot mode: compile and run a single file, then report the
// outcome through the exit status.
fn run_file(path: &str) -> i32 {
    let text = match hl::term::load(path) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("{}", error);
            return 1;
        }
    };
    let mut runtime = Runtime::default();
    if !runtime.enter(&text) {
        return 0;
    }
    loop {
        match runtime.execute(5000) {
            Event::Stopped => return 0,
            Event::Running => {}
            Event::Print(s) => print!("{}", s),
            Event::Errors(errors) => {
                for error in errors.iter() {
                    eprintln!("{}", error);
                }
                return 1;
            }
        }
    }
}
