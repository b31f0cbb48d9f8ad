use std::process;

use anyhow::Result;
use colored::Colorize;

use pdbedit::functions::{trim, trim_messages, trim_table};
use pdbedit::options::{trim_args, TrimOptions};

fn run() -> Result<(), anyhow::Error> {
    let matches = trim_args().get_matches();
    let options = TrimOptions::new(&matches)?;

    println!("Reading input file: {}", options.input.display());
    let report = trim(&options.input, &options.output, &options.config)?;

    for message in trim_messages(&report, &options.config) {
        println!("{}", message);
    }
    println!("Output saved to: {}\n", options.output.display());
    trim_table(&report).printstd();

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        println!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}
