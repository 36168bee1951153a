mod card;
mod ids;
mod locale;
mod section;

pub use card::{CardDraft, CardError, CardRecord, parse_link};
pub use ids::{CardId, ParseIdError};
pub use locale::{Locale, LocaleError};
pub use section::Section;
