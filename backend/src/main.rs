//! prepare-sample-sheet - IEM to CASAVA sample sheet conversion
//!
//! ```bash
//! prepare-sample-sheet SampleSheet.csv casava.csv              # convert and check
//! prepare-sample-sheet -v SampleSheet.csv casava.csv           # also show records
//! prepare-sample-sheet -f --fix-empty-projects -t 6 in.csv out.csv
//! prepare-sample-sheet -w SampleSheet.csv casava.csv           # write despite warnings
//! ```
//!
//! Exit status is 0 on success and 1 when the sheet has unresolved
//! warnings (unless `-w`) or cannot be read.

use clap::Parser;
use samplesheet::{prepare_sample_sheet, ConsoleReporter, PrepareOptions, PredictedOutput};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prepare-sample-sheet", version)]
#[command(about = "Prepare an Illumina IEM sample sheet for bcl2fastq", long_about = None)]
struct Cli {
    /// Input IEM sample sheet
    samplesheet: PathBuf,

    /// Output CASAVA sample sheet
    output: PathBuf,

    /// View contents of the sample sheet
    #[arg(short, long)]
    view: bool,

    /// Replace spaces in SampleID and SampleProject fields with underscores
    #[arg(short, long)]
    fix_spaces: bool,

    /// Create SampleProject names where these are blank in the original
    #[arg(short = 'e', long)]
    fix_empty_projects: bool,

    /// Ignore warnings about spaces and duplicate SampleID/SampleProject
    #[arg(short = 'w', long)]
    ignore_warnings: bool,

    /// Trim barcode sequences to this many bases (0 leaves them unaltered)
    #[arg(short, long, default_value = "0")]
    truncate_barcodes: usize,

    /// Flowcell ID written into every row
    #[arg(long, env = "SAMPLESHEET_FCID", default_value = samplesheet::DEFAULT_FLOWCELL_ID)]
    flowcell_id: String,

    /// Print the validation report as JSON
    #[arg(long)]
    report_json: bool,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli) {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let reporter = ConsoleReporter;
    let options = PrepareOptions {
        flowcell_id: cli.flowcell_id,
        fix_spaces: cli.fix_spaces,
        fix_empty_projects: cli.fix_empty_projects,
        ignore_warnings: cli.ignore_warnings,
        truncate_barcodes: Some(cli.truncate_barcodes),
    };

    eprintln!("📄 Processing: {}", cli.samplesheet.display());
    let result = prepare_sample_sheet(&cli.samplesheet, &options, &reporter)?;

    if cli.view {
        println!("{}", result.sheet.transpose());
    }

    if cli.report_json {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
    }

    if let Some(ref projects) = result.predicted {
        print_predicted(projects);
    }

    if result.can_write() {
        result.sheet.write_file(&cli.output)?;
        eprintln!("💾 Output written to: {}", cli.output.display());
    }

    Ok(result.status)
}

fn print_predicted(projects: &PredictedOutput) {
    println!("Predicted output:");
    for (project, samples) in projects {
        println!("{} ({} samples)", project, samples.len());
        for (sample, fastqs) in samples {
            println!("\t{}", sample);
            for fastq in fastqs {
                println!("\t\t{}", fastq);
            }
        }
    }
}
