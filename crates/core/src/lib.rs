pub mod curation;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod limiter;
pub mod output;
pub mod parse;
pub mod pipeline;
pub mod robots;
pub mod validate;

pub use curation::{
    MENTAL_HEALTH_THEMES, StoryEntry, entry_filename, infer_role_model_name, list_raw_files, next_story_number,
    sanitize_role_model_name, save_entry,
};
pub use error::{ColligoError, Result};
pub use extract::{ExtractConfig, Extraction, extract_text};
pub use fetch::{FetchConfig, FetchedPage, build_client, fetch_url};
pub use limiter::{REQUEST_DELAY, RateLimiter};
pub use output::{RAW_DATA_DIR, raw_text_filename, sanitize_subject, write_raw_text};
pub use parse::{Document, Element};
pub use pipeline::{Pipeline, PipelineConfig, SeedRequest, UrlOutcome, UrlStatus};
pub use robots::{RobotsChecker, RobotsDecision};
pub use validate::{host_key, is_valid_url, parse_seed_url};
