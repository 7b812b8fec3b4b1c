use std::sync::Arc;

use anyhow::{bail, Context};

use word_ocean::config::AppConfig;
use word_ocean::core::assets::AssetWorker;
use word_ocean::core::association::{AssociationEngine, RelationFilter};
use word_ocean::core::cache::CacheStore;
use word_ocean::core::lexicon::{DictionaryLoader, Lexicon, RootTable, DICTIONARY_NAMES};
use word_ocean::core::similarity::{AssetSimilaritySource, SimilarityLoader};

fn usage() -> String {
    format!(
        "usage: word-ocean <dictionary> [word]\n\ndictionaries:\n  {}",
        DICTIONARY_NAMES.join("\n  ")
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(dictionary) = args.next() else {
        bail!(usage());
    };
    let word = args.next();

    let config = AppConfig::load();
    let _log_guard = word_ocean::core::logging::init(&config.log_dir());
    log::info!("{} v{} starting", word_ocean::NAME, word_ocean::VERSION);

    let worker = Arc::new(
        AssetWorker::with_http(&config.assets, config.asset_cache_dir())
            .context("invalid asset configuration")?,
    );
    let report = worker.install().await.context("asset worker install failed")?;
    if !report.is_complete() {
        log::warn!("{} assets could not be precached", report.failed.len());
    }
    worker.activate().await.context("asset worker activation failed")?;

    let store = CacheStore::sqlite(config.data_dir(), config.cache.ttl());
    let similarity = SimilarityLoader::new(Arc::new(AssetSimilaritySource::new(worker.clone())), store);
    let _preload = similarity.preload();

    let entries = DictionaryLoader::new(worker.clone())
        .load(&dictionary)
        .await
        .with_context(|| usage())?;
    let lexicon = Lexicon::from_entries(&entries);

    let selected = match &word {
        Some(word) => lexicon
            .get(word)
            .with_context(|| format!("'{word}' is not in {dictionary}"))?,
        None => lexicon
            .random_word(&mut rand::thread_rng())
            .context("dictionary is empty")?,
    };

    println!("{}  {}", selected.word, selected.meaning);
    if let Some(root) = selected.root.and_then(|r| RootTable::builtin().get(r)) {
        println!("root: {} ({})", root.root, root.meaning);
    }

    let engine = AssociationEngine::new(similarity, config.association.clone());
    let Some(associations) = engine.associate(selected, &lexicon, RelationFilter::ALL).await else {
        return Ok(());
    };
    for assoc in associations {
        match assoc.similarity {
            Some(score) => println!(
                "  [{}] {} {:.3}  {}",
                assoc.relation, assoc.word.word, score, assoc.word.meaning
            ),
            None => println!("  [{}] {}  {}", assoc.relation, assoc.word.word, assoc.word.meaning),
        }
    }

    Ok(())
}
