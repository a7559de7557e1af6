use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "clausula",
    version,
    about = "Clause boundary detection and segmentation for Brazilian investment contracts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Segment(SegmentArgs),
    Inspect(InspectArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Profile {
    Loose,
    Strict,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loose => "loose",
            Self::Strict => "strict",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    /// Path to the extracted contract text (UTF-8).
    #[arg(long)]
    pub input: PathBuf,

    /// Document identifier; defaults to the input file stem.
    #[arg(long)]
    pub document_id: Option<String>,

    /// Page count reported by the PDF text extractor.
    #[arg(long, default_value_t = 1)]
    pub page_count: i64,

    #[arg(long, value_enum, default_value_t = Profile::Loose)]
    pub profile: Profile,

    /// Where to write the clause list; defaults next to the input.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Where to write the run manifest; defaults next to the output.
    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Path to the extracted contract text (UTF-8).
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = Profile::Loose)]
    pub profile: Profile,
}
