use std::io::Read;
use std::path::{Path, PathBuf};

use prep_core::model::{CardDraft, CardRecord, Locale, parse_link};

use crate::error::LoaderError;

const BUNDLED_EN: &str = include_str!("../data/aws_en.csv");
const BUNDLED_JA: &str = include_str!("../data/aws_ja.csv");

/// Where card rows come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CardSource {
    /// Compiled-in data, one table per locale.
    #[default]
    Bundled,
    /// A user-supplied CSV file; used for every locale.
    File(PathBuf),
}

/// Loads flashcards from a tabular source with a
/// `Section,Content,Details,Link` header row.
#[derive(Debug, Clone, Default)]
pub struct RecordLoader {
    source: CardSource,
}

impl RecordLoader {
    #[must_use]
    pub fn bundled() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: CardSource::File(path.into()),
        }
    }

    #[must_use]
    pub fn source(&self) -> &CardSource {
        &self.source
    }

    /// Load every usable card for `locale`.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError` if the file cannot be read or the header row is
    /// not valid CSV.
    pub fn load(&self, locale: Locale) -> Result<Vec<CardRecord>, LoaderError> {
        match &self.source {
            CardSource::Bundled => parse_records(bundled_table(locale).as_bytes()),
            CardSource::File(path) => load_file(path),
        }
    }

    /// Like `load`, but logs failures and yields no cards instead.
    #[must_use]
    pub fn load_or_empty(&self, locale: Locale) -> Vec<CardRecord> {
        self.load(locale).unwrap_or_else(|err| {
            tracing::error!(%locale, error = %err, "failed to load cards");
            Vec::new()
        })
    }
}

fn bundled_table(locale: Locale) -> &'static str {
    match locale {
        Locale::En => BUNDLED_EN,
        Locale::Ja => BUNDLED_JA,
    }
}

fn load_file(path: &Path) -> Result<Vec<CardRecord>, LoaderError> {
    let file = std::fs::File::open(path)?;
    tracing::debug!(path = %path.display(), "loading cards from file");
    parse_records(file)
}

/// Parse CSV rows into cards.
///
/// Columns are located by header name, so extra or reordered columns are
/// fine and short rows read missing cells as empty. Rows without content,
/// and rows the CSV reader rejects, are skipped.
///
/// # Errors
///
/// Returns `LoaderError::Csv` if the header row cannot be read.
pub fn parse_records<R: Read>(input: R) -> Result<Vec<CardRecord>, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let section_col = column("Section");
    let content_col = column("Content");
    let details_col = column("Details");
    let link_col = column("Link");

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed card row");
                continue;
            }
        };
        let cell = |col: Option<usize>| {
            col.and_then(|i| row.get(i))
                .unwrap_or_default()
                .to_owned()
        };

        let link = parse_link(&cell(link_col)).unwrap_or_else(|err| {
            tracing::warn!(index, error = %err, "dropping card link");
            None
        });
        let draft = CardDraft {
            section: cell(section_col),
            content: cell(content_col),
            details: cell(details_col),
            link,
        };
        match draft.validate(index) {
            Ok(card) => records.push(card),
            Err(err) => tracing::debug!(index, error = %err, "skipping card row"),
        }
    }

    Ok(records)
}
