use std::fs;
use std::path::Path;

use log::{info, warn};

use super::Vocabulary;
use crate::error::{ExtendError, Result};
use crate::merges::MergeRules;

pub const VOCAB_FILE: &str = "vocab.json";
pub const MERGES_FILE: &str = "merges.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombineSummary {
    pub vocab_size: usize,
    pub merge_lines: usize,
}

/// Merge two exported BPE models into `save_dir`
///
/// Both `old_dir` and `new_dir` must hold a `vocab.json` and a `merges.txt`.
/// The old model takes priority: its tokens keep their order and the new
/// model's merges go after the old ones, minus their header line.
pub fn combine_tokenizers(old_dir: &Path, new_dir: &Path, save_dir: &Path) -> Result<CombineSummary> {
    let old_vocab = Vocabulary::from_file(old_dir.join(VOCAB_FILE))?;
    let new_vocab = Vocabulary::from_file(new_dir.join(VOCAB_FILE))?;
    if new_vocab.is_empty() {
        warn!("{} holds no tokens, nothing to add", new_dir.join(VOCAB_FILE).display());
    }
    let merged_vocab = old_vocab.merge(&new_vocab);
    info!(
        "Vocabulary union: {} + {} -> {} tokens",
        old_vocab.len(),
        new_vocab.len(),
        merged_vocab.len()
    );

    fs::create_dir_all(save_dir).map_err(|e| ExtendError::io(save_dir, e))?;
    merged_vocab.save(save_dir.join(VOCAB_FILE))?;

    let old_merges = MergeRules::from_file(old_dir.join(MERGES_FILE))?;
    let new_merges = MergeRules::from_file(new_dir.join(MERGES_FILE))?;
    if new_merges.len() < 2 {
        warn!("{} has no rules after its header line", new_dir.join(MERGES_FILE).display());
    }
    let merged_merges = MergeRules::concat(&old_merges, &new_merges);
    merged_merges.save(save_dir.join(MERGES_FILE))?;
    info!("Merge rules: {} + {} -> {} lines", old_merges.len(), new_merges.len(), merged_merges.len());

    Ok(CombineSummary {
        vocab_size: merged_vocab.len(),
        merge_lines: merged_merges.len(),
    })
}
