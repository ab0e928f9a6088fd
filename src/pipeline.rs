use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::adjust_config;
use crate::error::{ExtendError, Result};
use crate::tokenizer::{add_language_token, export_bpe, load_tokenizer, rebuild_with_merged_model, save_tokenizer};
use crate::vocab::combine::{MERGES_FILE, VOCAB_FILE};
use crate::vocab::combine_tokenizers;

pub const DEFAULT_MODEL_DIR: &str = "XTTS_v2.0_original_model_files";
const CONFIG_FILE: &str = "config.json";
const SPECIAL_TOKENS_MAP_FILE: &str = "special_tokens_map.json";

/// Everything one run needs, resolved from the command line
#[derive(Debug, Clone)]
pub struct ExtendOptions {
    /// Model directory holding `vocab.json` and `config.json`
    pub root: PathBuf,
    /// Pre-trained `tokenizer.json` for the new language
    pub new_tokenizer: PathBuf,
    pub language: String,
    pub keep_intermediate: bool,
}

impl ExtendOptions {
    pub fn vocab_path(&self) -> PathBuf {
        self.root.join(VOCAB_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    fn old_tokenizer_dir(&self) -> PathBuf {
        self.root.join("old_tokenizer")
    }

    fn new_tokenizer_dir(&self) -> PathBuf {
        self.root.join("new_tokenizer")
    }

    fn merged_tokenizer_dir(&self) -> PathBuf {
        self.root.join("merged_tokenizer")
    }
}

/// Merge the new language's BPE model into the model's tokenizer
///
/// Overwrites `<root>/vocab.json` and returns the id of the language token.
pub fn extend_tokenizer(options: &ExtendOptions) -> Result<u32> {
    let vocab_path = options.vocab_path();
    let old_dir = options.old_tokenizer_dir();
    let new_dir = options.new_tokenizer_dir();
    let merged_dir = options.merged_tokenizer_dir();

    // 1. Export the current model
    let existing = load_tokenizer(&vocab_path)?;
    export_bpe(&existing, &old_dir)?;

    // 2. Export the new language's model
    info!("Loading pre-trained tokenizer from {}", options.new_tokenizer.display());
    let incoming = load_tokenizer(&options.new_tokenizer)?;
    export_bpe(&incoming, &new_dir)?;
    copy_special_tokens_map(&options.new_tokenizer, &new_dir)?;

    // 3. Union
    info!("Combining tokenizers into {}", merged_dir.display());
    let summary = combine_tokenizers(&old_dir, &new_dir, &merged_dir)?;

    // 4. Rebuild on top of a fresh copy so the original pipeline settings survive
    let mut tokenizer = load_tokenizer(&vocab_path)?;
    rebuild_with_merged_model(&mut tokenizer, &merged_dir.join(VOCAB_FILE), &merged_dir.join(MERGES_FILE))?;
    let token_id = add_language_token(&mut tokenizer, &options.language)?;

    // 5. Overwrite
    save_tokenizer(&tokenizer, &vocab_path)?;
    info!(
        "Saved merged tokenizer ({} tokens, {} merge lines) to {}",
        summary.vocab_size,
        summary.merge_lines,
        vocab_path.display()
    );

    if options.keep_intermediate {
        info!("Keeping intermediate exports under {}", options.root.display());
    } else {
        for dir in [&old_dir, &new_dir, &merged_dir] {
            if let Err(err) = fs::remove_dir_all(dir) {
                warn!("Could not remove {}: {}", dir.display(), err);
            }
        }
    }

    Ok(token_id)
}

/// Copy `special_tokens_map.json` from beside the source tokenizer, if any
fn copy_special_tokens_map(new_tokenizer: &Path, new_dir: &Path) -> Result<()> {
    let source_dir = new_tokenizer.parent().unwrap_or_else(|| Path::new("."));
    let source = source_dir.join(SPECIAL_TOKENS_MAP_FILE);
    if !source.is_file() {
        warn!("No {} next to {}, skipping copy", SPECIAL_TOKENS_MAP_FILE, new_tokenizer.display());
        return Ok(());
    }
    let target = new_dir.join(SPECIAL_TOKENS_MAP_FILE);
    fs::copy(&source, &target).map_err(|e| ExtendError::io(&source, e))?;
    Ok(())
}

/// Full run: extend the tokenizer, then register the language in the config
pub fn run(options: &ExtendOptions) -> Result<()> {
    if options.language.is_empty() {
        return Err(ExtendError::EmptyLanguage);
    }
    extend_tokenizer(options)?;
    adjust_config(options.config_path(), &options.language)?;
    Ok(())
}
