use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON lines of frame candidates; reads stdin when omitted or "-"
    pub input: Option<PathBuf>,

    /// JSON file with tracker settings; missing fields use the defaults
    #[arg(long = "settings")]
    pub settings_path: Option<PathBuf>,

    /// Override the window depth (output latency, in frames)
    #[arg(long = "dynamicDepth")]
    pub dynamic_depth: Option<usize>,

    /// Only keep the best N candidates of each frame
    #[arg(long = "maxCandidates")]
    pub max_candidates: Option<usize>,

    /// Do not emit the frames still in the window when the input ends
    #[arg(long = "noFlush")]
    pub no_flush: bool,

    #[arg(long = "loglevel", default_value_t = String::from("info"))]
    pub log_level: String,
}
