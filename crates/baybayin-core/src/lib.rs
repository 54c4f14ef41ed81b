pub mod glyphs;
pub mod lexicon;
pub mod segment;
pub mod settings;
pub mod unicode;
pub mod validate;
