use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use lazy_regex::regex_is_match;

use crate::functions::TrimConfig;
use crate::record::RecordType;

/// Command line options of the renumbering tool.
#[derive(PartialEq, Debug, Clone)]
pub struct RenumberOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub offset: i64,
}

/// Command line options of the trimming tool.
#[derive(PartialEq, Debug, Clone)]
pub struct TrimOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: TrimConfig,
}

// Required args are guaranteed by clap, thus the `unwrap()`s on value_of are ok.
impl RenumberOptions {
    pub fn new(matches: &clap::ArgMatches) -> Result<RenumberOptions, anyhow::Error> {
        let offset = matches.value_of("Offset").unwrap();

        Ok(RenumberOptions {
            input: PathBuf::from(matches.value_of("Input").unwrap()),
            output: PathBuf::from(matches.value_of("Output").unwrap()),
            offset: offset
                .trim()
                .parse()
                .with_context(|| format!("Offset must be an integer, got '{}'", offset))?,
        })
    }
}

impl TrimOptions {
    pub fn new(matches: &clap::ArgMatches) -> Result<TrimOptions, anyhow::Error> {
        let residue = |name: &str| -> Result<i64, anyhow::Error> {
            let value = matches.value_of(name).unwrap();
            value
                .trim()
                .parse()
                .with_context(|| format!("{} residue must be an integer, got '{}'", name, value))
        };

        let chain_id = matches
            .value_of("Chain")
            .map(|c| c.trim().to_owned());

        // A blank chain ID selects atoms with an empty chain column
        if let Some(chain) = chain_id.as_ref().filter(|c| !c.is_empty()) {
            if !regex_is_match!(r"^[A-Za-z0-9]$", chain) {
                println!(
                    "{} Chain ID '{}' is not a single character and will not match any atom.",
                    "Warning:".yellow(),
                    chain
                );
            }
        }

        let mut config = TrimConfig::new(residue("Start")?, residue("End")?, chain_id);
        if let Some(records) = matches.values_of("KeepRecord") {
            for record in records {
                config = config.keep_record(RecordType::from_tag(&record.to_uppercase()));
            }
        }

        Ok(TrimOptions {
            input: PathBuf::from(matches.value_of("Input").unwrap()),
            output: PathBuf::from(matches.value_of("Output").unwrap()),
            config,
        })
    }
}
