mod config;
mod error;
mod merges;
mod pipeline;
mod tokenizer;
mod vocab;

use std::path::PathBuf;

use clap::Parser;
use log::{debug, error};

use pipeline::{ExtendOptions, DEFAULT_MODEL_DIR};

/// Extend an XTTS tokenizer with a pre-trained BPE vocabulary for a new language
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Base output directory for XTTS files.
    #[arg(long = "output_path")]
    output_path: PathBuf,

    /// Path to the training metadata CSV (kept for compatibility, not used).
    #[arg(long = "metadata_path")]
    metadata_path: PathBuf,

    /// Language code for the new language (e.g. 'fa').
    #[arg(long = "language")]
    language: String,

    /// Kept for compatibility, the vocabulary comes from a pre-trained tokenizer.
    #[arg(long = "extended_vocab_size", default_value_t = 2000)]
    extended_vocab_size: usize,

    /// Pre-trained tokenizer.json for the new language.
    #[arg(long = "new_tokenizer_path")]
    new_tokenizer_path: PathBuf,

    /// Model directory under the output path.
    #[arg(long = "model_dir", default_value = DEFAULT_MODEL_DIR)]
    model_dir: String,

    /// Keep the exported and merged vocabularies next to the model.
    #[arg(long = "keep_intermediate")]
    keep_intermediate: bool,
}

impl Args {
    fn into_options(self) -> ExtendOptions {
        ExtendOptions {
            root: self.output_path.join(self.model_dir),
            new_tokenizer: self.new_tokenizer_path,
            language: self.language,
            keep_intermediate: self.keep_intermediate,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    debug!(
        "Ignoring metadata_path={} and extended_vocab_size={}",
        args.metadata_path.display(),
        args.extended_vocab_size
    );

    let options = args.into_options();
    if let Err(err) = pipeline::run(&options) {
        error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_original_flags() {
        let args = Args::try_parse_from([
            "xtts_vocab_extender",
            "--output_path",
            "/data/run",
            "--metadata_path",
            "/data/metadata.csv",
            "--language",
            "fa",
            "--new_tokenizer_path",
            "/downloads/tokenizer.json",
        ])
        .expect("Failed to parse arguments");

        assert_eq!(args.extended_vocab_size, 2000);
        assert!(!args.keep_intermediate);

        let options = args.into_options();
        assert_eq!(options.root, PathBuf::from("/data/run").join(DEFAULT_MODEL_DIR));
        assert_eq!(options.language, "fa");
        assert_eq!(options.vocab_path(), options.root.join("vocab.json"));
    }

    #[test]
    fn test_missing_language() {
        let result = Args::try_parse_from([
            "xtts_vocab_extender",
            "--output_path",
            "/data/run",
            "--metadata_path",
            "/data/metadata.csv",
            "--new_tokenizer_path",
            "/downloads/tokenizer.json",
        ]);
        assert!(result.is_err());
    }
}
