/// Tokenizer rebuild on top of the `tokenizers` crate
///
/// Loads XTTS-style tokenizer documents, exports their BPE model, swaps in a
/// merged model and registers the language token.
pub mod bpe;

pub use bpe::{add_language_token, export_bpe, load_tokenizer, rebuild_with_merged_model, save_tokenizer};
