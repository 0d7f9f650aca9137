pub mod glossary;
pub mod paragraph;
pub mod shield;

pub use glossary::apply_glossary;
pub use paragraph::ParagraphTranslator;
pub use shield::{shield, unshield, Shielded};
