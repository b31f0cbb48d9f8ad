use clap::{App, AppSettings, Arg};

/// Defines the Args of the renumbering tool. All three are positional.
pub fn renumber_args() -> App<'static> {
    App::new("pdb-renumber")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Renumber residues in a PDB file by adding a constant offset.")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::new("Input")
                .help("Path to the input PDB file (e.g., structure.pdb)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("Output")
                .help("Path for the renumbered output PDB file (e.g., renumbered.pdb)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("Offset")
                .help("The integer value to add to every residue number (e.g., 250)")
                .required(true)
                .allow_hyphen_values(true)
                .index(3),
        )
}

/// Defines the Args of the trimming tool.
pub fn trim_args() -> App<'static> {
    App::new("pdb-trim")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Trim a residue range from a PDB file, optionally restricted to one chain.")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::new("Input")
                .help("Path to the input PDB file.")
                .long("input_pdb")
                .short('i')
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("Output")
                .help("Path for the output trimmed PDB file.")
                .long("output_pdb")
                .short('o')
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("Start")
                .help("Starting residue number (inclusive) of the segment to REMOVE.")
                .long("start_res")
                .short('s')
                .takes_value(true)
                .allow_hyphen_values(true)
                .required(true),
        )
        .arg(
            Arg::new("End")
                .help("Ending residue number (inclusive) of the segment to REMOVE.")
                .long("end_res")
                .short('e')
                .takes_value(true)
                .allow_hyphen_values(true)
                .required(true),
        )
        .arg(
            Arg::new("Chain")
                .help("Optional: Specify the chain ID to trim (e.g., 'A').")
                .long("chain_id")
                .short('c')
                .takes_value(true),
        )
        .arg(
            Arg::new("KeepRecord")
                .help("Additional record type to copy verbatim (e.g., 'HEADER'). May be repeated.")
                .long("keep_record")
                .short('k')
                .takes_value(true)
                .multiple_occurrences(true),
        )
}
