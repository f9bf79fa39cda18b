//! Curated story records: the JSON schema the downstream consumer reads.
//!
//! Phase 2 of the pipeline. A human reads the raw text files and authors one
//! [`StoryEntry`] per story; this module owns the schema, its validation
//! rules, and the file naming conventions
//! (`Generated_JSON_Entries/{Name}_{StoryNumber}_{RollNumber}.json`).

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{ColligoError, Result};

/// Default directory for curated JSON entries.
pub const OUTPUT_DIR: &str = "Generated_JSON_Entries";

/// The fixed vocabulary for `Mental_Health_Themes`.
pub const MENTAL_HEALTH_THEMES: &[&str] = &[
    "anxiety",
    "depression",
    "stress_management",
    "burnout",
    "grief",
    "addiction_recovery",
    "imposter_syndrome",
    "self_esteem",
    "relationship_challenges",
    "public_pressure",
];

/// One curated story, serialized field-for-field to the downstream JSON
/// contract (the serde renames produce the exact published key names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryEntry {
    #[serde(rename = "Role_Model_Name")]
    pub role_model_name: String,
    #[serde(rename = "Role_Model_Context")]
    pub role_model_context: String,
    #[serde(rename = "Situation_Faced")]
    pub situation_faced: String,
    #[serde(rename = "Challenge_Narrative")]
    pub challenge_narrative: String,
    #[serde(rename = "Mental_Health_Themes")]
    pub mental_health_themes: Vec<String>,
    #[serde(rename = "Coping_Strategies_Used")]
    pub coping_strategies_used: Vec<String>,
    #[serde(rename = "Key_Action_Taken")]
    pub key_action_taken: String,
    #[serde(rename = "Key_Quote_or_Insight")]
    pub key_quote_or_insight: String,
    #[serde(rename = "Summary_Psychological")]
    pub summary_psychological: String,
    #[serde(rename = "Outcome_Resolution")]
    pub outcome_resolution: String,
    #[serde(rename = "Source_Reference")]
    pub source_reference: String,
}

impl StoryEntry {
    /// Checks every field against the schema's minimum requirements.
    pub fn validate(&self) -> Result<()> {
        require_min("Role_Model_Name", &self.role_model_name, 2)?;
        require_min("Role_Model_Context", &self.role_model_context, 10)?;
        require_min("Situation_Faced", &self.situation_faced, 10)?;
        require_min("Challenge_Narrative", &self.challenge_narrative, 20)?;
        require_min("Key_Action_Taken", &self.key_action_taken, 5)?;
        require_min("Key_Quote_or_Insight", &self.key_quote_or_insight, 10)?;
        require_min("Summary_Psychological", &self.summary_psychological, 20)?;
        require_min("Outcome_Resolution", &self.outcome_resolution, 10)?;
        require_min("Source_Reference", &self.source_reference, 1)?;

        if self.mental_health_themes.len() < 2 || self.mental_health_themes.len() > 4 {
            return Err(ColligoError::InvalidEntry(format!(
                "Mental_Health_Themes must have 2-4 entries, got {}",
                self.mental_health_themes.len()
            )));
        }
        for theme in &self.mental_health_themes {
            if !MENTAL_HEALTH_THEMES.contains(&theme.as_str()) {
                return Err(ColligoError::InvalidEntry(format!("unknown theme '{}'", theme)));
            }
        }

        if self.coping_strategies_used.iter().filter(|s| !s.trim().is_empty()).count() == 0 {
            return Err(ColligoError::InvalidEntry(
                "Coping_Strategies_Used must list at least one strategy".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether the key quote appears verbatim (case-insensitive) in the raw
    /// source text. A failed check is a warning for the curator, not an
    /// error: quotes are occasionally normalized from the page.
    pub fn quote_in_source(&self, raw_text: &str) -> bool {
        raw_text.to_lowercase().contains(&self.key_quote_or_insight.to_lowercase())
    }
}

fn require_min(field: &str, value: &str, min: usize) -> Result<()> {
    if value.trim().chars().count() < min {
        return Err(ColligoError::InvalidEntry(format!(
            "{} must be at least {} character(s)",
            field, min
        )));
    }
    Ok(())
}

/// Makes a role model name safe for entry filenames: spaces and apostrophes
/// are dropped, matching the published `Source_Reference` convention.
pub fn sanitize_role_model_name(name: &str) -> String {
    name.replace([' ', '\''], "")
}

/// Infers the role model name from a raw text file's `Role Model:` header.
pub fn infer_role_model_name(raw_text: &str) -> Option<String> {
    const HEADER: &str = "role model:";

    for line in raw_text.lines() {
        if let Some(head) = line.get(..HEADER.len())
            && head.eq_ignore_ascii_case(HEADER)
        {
            let name = line[HEADER.len()..].trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Filename for one curated entry.
pub fn entry_filename(role_model_name: &str, story_number: u32, roll_number: &str) -> String {
    format!(
        "{}_{}_{}.json",
        sanitize_role_model_name(role_model_name),
        story_number,
        roll_number
    )
}

/// Computes the next story number for a role model and roll number by
/// scanning existing entries in `dir`. Missing directory counts as empty.
pub fn next_story_number(dir: &Path, role_model_name: &str, roll_number: &str) -> Result<u32> {
    let clean = sanitize_role_model_name(role_model_name);
    let pattern = Regex::new(&format!(
        r"^{}_(\d+)_{}\.json$",
        regex::escape(&clean),
        regex::escape(roll_number)
    ))
    .map_err(|e| ColligoError::InvalidEntry(format!("bad filename pattern: {}", e)))?;

    let mut max_seen = 0u32;
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(1),
        Err(e) => return Err(e.into()),
    };

    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(captures) = name.to_str().and_then(|n| pattern.captures(n))
            && let Ok(number) = captures[1].parse::<u32>()
        {
            max_seen = max_seen.max(number);
        }
    }

    Ok(max_seen + 1)
}

/// Validates and writes one entry as pretty-printed JSON.
pub fn save_entry(dir: &Path, entry: &StoryEntry, story_number: u32, roll_number: &str) -> Result<PathBuf> {
    entry.validate()?;

    fs::create_dir_all(dir)?;
    let path = dir.join(entry_filename(&entry.role_model_name, story_number, roll_number));
    let json = serde_json::to_string_pretty(entry)
        .map_err(|e| ColligoError::InvalidEntry(format!("serialization failed: {}", e)))?;
    fs::write(&path, json)?;

    Ok(path)
}

/// Lists the raw `*.txt` files available for curation, sorted by name.
pub fn list_raw_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
