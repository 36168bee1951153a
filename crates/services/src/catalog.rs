use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use prep_core::model::{CardRecord, Locale};

use crate::loader::RecordLoader;

/// Loaded cards per locale, read from the loader at most once each.
pub struct CardCatalog {
    loader: RecordLoader,
    loaded: Mutex<HashMap<Locale, Arc<[CardRecord]>>>,
}

impl CardCatalog {
    #[must_use]
    pub fn new(loader: RecordLoader) -> Self {
        Self {
            loader,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn loader(&self) -> &RecordLoader {
        &self.loader
    }

    /// Cards for `locale`; empty if the source could not be loaded.
    #[must_use]
    pub fn records(&self, locale: Locale) -> Arc<[CardRecord]> {
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        let records = loaded
            .entry(locale)
            .or_insert_with(|| {
                let records = self.loader.load_or_empty(locale);
                tracing::info!(%locale, count = records.len(), "loaded cards");
                records.into()
            });
        Arc::clone(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_cached_per_locale() {
        let catalog = CardCatalog::new(RecordLoader::bundled());
        let first = catalog.records(Locale::En);
        let second = catalog.records(Locale::En);
        assert!(Arc::ptr_eq(&first, &second));
        assert_ne!(first[0].section, catalog.records(Locale::Ja)[0].section);
    }
}
