//! muse - startup idea generator and market analyzer
//!
//! Ideas come from a text-generation backend with model fallback and
//! content-hash deduplication; market summaries combine a scraped competitor
//! list with canned narratives and a saturation level.

pub mod commands;
pub mod config;
pub mod details;
pub mod display;
pub mod error;
pub mod export;
pub mod generation;
pub mod ideas;
pub mod market;
pub mod prompts;
pub mod report;
pub mod search;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::{ConfigError, GenerationError, SearchError, StoreError};
pub use generation::{ModelId, SamplingParams, TextGenerator};
pub use ideas::{GenerationPlan, GenerationReport, GenerationState, IdeaGenerator, IdeaRecord};
pub use market::{MarketAnalyzer, MarketSummary, Saturation};
pub use session::{Session, SessionManager};
