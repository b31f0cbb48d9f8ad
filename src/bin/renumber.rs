use std::process;

use anyhow::Result;
use colored::Colorize;

use pdbedit::functions::{renumber, renumber_messages, renumber_table};
use pdbedit::options::{renumber_args, RenumberOptions};

fn run() -> Result<(), anyhow::Error> {
    let matches = renumber_args().get_matches();
    let options = RenumberOptions::new(&matches)?;

    println!("Reading input file: {}", options.input.display());
    let report = renumber(&options.input, &options.output, options.offset)?;

    for message in renumber_messages(&report) {
        println!("{}", message);
    }
    println!("Output saved to: {}\n", options.output.display());
    renumber_table(&report).printstd();

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        println!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}
