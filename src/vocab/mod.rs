/// Vocabulary handling for tokenizer extension
///
/// A vocabulary is an ordered token -> id mapping, read from the `vocab.json`
/// a BPE model exports. Merging two of them keeps the first one's tokens in
/// front and renumbers everything from 0.
pub mod vocabulary;
pub mod combine;

pub use vocabulary::Vocabulary;
pub use combine::combine_tokenizers;
