use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tokenizers::models::bpe::BPE;
use tokenizers::{AddedToken, Model, ModelWrapper, Tokenizer};

use crate::error::{ExtendError, Result};

/// Load a full tokenizer description (`tokenizer.json` layout)
///
/// XTTS ships this document under the name `vocab.json`, so the file name
/// alone says nothing about its layout.
pub fn load_tokenizer<P: AsRef<Path>>(path: P) -> Result<Tokenizer> {
    let path = path.as_ref();
    let tokenizer = Tokenizer::from_file(path).map_err(|e| {
        ExtendError::Tokenizer(format!("Failed to load {}: {}", path.display(), e))
    })?;
    debug!(
        "Loaded tokenizer from {} ({} tokens)",
        path.display(),
        tokenizer.get_vocab_size(true)
    );
    Ok(tokenizer)
}

/// Export the tokenizer's BPE model as `vocab.json` + `merges.txt` in `dir`
///
/// # Returns
/// * The paths of the written files
///
/// # Errors
/// Returns `NotBpe` if the model is a different kind (WordPiece, Unigram, ...)
pub fn export_bpe(tokenizer: &Tokenizer, dir: &Path) -> Result<Vec<PathBuf>> {
    let ModelWrapper::BPE(bpe) = tokenizer.get_model() else {
        return Err(ExtendError::NotBpe);
    };
    fs::create_dir_all(dir).map_err(|e| ExtendError::io(dir, e))?;
    let files = bpe.save(dir, None)?;
    info!("Exported BPE model ({} tokens) to {}", bpe.get_vocab_size(), dir.display());
    Ok(files)
}

/// Swap the tokenizer's model for a fresh BPE built from the given files
///
/// The new model uses default BPE options, it does not inherit dropout,
/// unknown token or prefixes from the model it replaces. Normalizer,
/// pre-tokenizer, post-processor, decoder and added tokens stay attached.
pub fn rebuild_with_merged_model(tokenizer: &mut Tokenizer, vocab: &Path, merges: &Path) -> Result<()> {
    let bpe = BPE::from_file(path_str(vocab)?, path_str(merges)?).build()?;
    info!("Rebuilt BPE model with {} tokens", bpe.get_vocab_size());
    tokenizer.with_model(ModelWrapper::BPE(bpe));
    Ok(())
}

/// Register `[<language>]` as a special token
///
/// # Returns
/// * The id of the token. A new token gets the next id after the current
///   vocabulary, one that already exists keeps its id.
pub fn add_language_token(tokenizer: &mut Tokenizer, language: &str) -> Result<u32> {
    if language.is_empty() {
        return Err(ExtendError::EmptyLanguage);
    }
    let token = format!("[{language}]");
    let added = tokenizer.add_special_tokens(&[AddedToken::from(token.clone(), true)]);
    let id = tokenizer
        .token_to_id(&token)
        .ok_or_else(|| ExtendError::Tokenizer(format!("{token} was not registered")))?;
    info!("Language token {} has id {} ({} new)", token, id, added);
    Ok(id)
}

pub fn save_tokenizer(tokenizer: &Tokenizer, path: &Path) -> Result<()> {
    tokenizer.save(path, true).map_err(|e| {
        ExtendError::Tokenizer(format!("Failed to save {}: {}", path.display(), e))
    })
}

// BPE::from_file only takes &str
fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| ExtendError::Tokenizer(format!("Path is not valid UTF-8: {}", path.display())))
}
