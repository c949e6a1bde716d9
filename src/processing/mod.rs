//! Text normalization, similarity scoring and role analysis

pub mod lexicon;
pub mod stop_words;
pub mod normalizer;
pub mod tfidf;
pub mod similarity;
pub mod ranker;
pub mod skill_gap;
pub mod analyzer;

pub use lexicon::{Lexicon, LinguisticBackend};
pub use normalizer::Normalizer;
pub use ranker::{rank_roles, RoleCatalogEntry, RoleScore};
pub use similarity::{similarity, SimilarityEngine};
pub use skill_gap::skill_gap;
