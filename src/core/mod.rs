pub mod logging;

// Offline-first static assets (dictionaries, similarity table, index page)
pub mod assets;
pub mod cache;

pub mod lexicon;
pub mod similarity;
pub mod association;
