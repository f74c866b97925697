// Profanity infra layer.
// - `remote_word_list.rs` fetches the dictionary over HTTP.

pub mod remote_word_list;

pub use remote_word_list::{RemoteWordList, DEFAULT_PROFANITY_LIST_URL};
