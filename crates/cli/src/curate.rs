//! Interactive curation: raw text files in, validated JSON story entries out.
//!
//! The flow mirrors the manual curation workflow: pick a raw file, read a
//! preview, answer one prompt per schema field (short answers are re-asked),
//! pick 2-4 themes from the fixed vocabulary, and verify the key quote
//! actually appears in the source text before the entry is saved.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use colligo_core::curation::{
    MENTAL_HEALTH_THEMES, StoryEntry, infer_role_model_name, list_raw_files, next_story_number, save_entry,
};

use crate::echo;

const PREVIEW_CHARS: usize = 1500;

pub fn run(raw_dir: &Path, output_dir: &Path) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_with_input(&mut input, raw_dir, output_dir)
}

/// The whole session, reading prompts from any `BufRead`.
fn run_with_input<R: BufRead>(input: &mut R, raw_dir: &Path, output_dir: &Path) -> anyhow::Result<()> {
    let roll_number = prompt_nonempty(input, "Enter your roll number")?;
    let mut total_saved = 0usize;

    loop {
        let files = list_raw_files(raw_dir)
            .with_context(|| format!("Failed to list raw files in {}", raw_dir.display()))?;
        if files.is_empty() {
            echo::print_warning(&format!(
                "No raw text files found in {}. Run the scrape phase first.",
                raw_dir.display()
            ));
            break;
        }

        print_file_listing(&files);

        let Some(file) = select_file(input, &files)? else {
            break;
        };
        let raw_text =
            fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file.display()))?;
        print_preview(&file, &raw_text);

        let entry = collect_entry(input, &file, &raw_text)?;
        let story_number = next_story_number(output_dir, &entry.role_model_name, &roll_number)?;
        let path = save_entry(output_dir, &entry, story_number, &roll_number)
            .with_context(|| format!("Failed to save entry #{}", story_number))?;

        print_entry_summary(&entry);
        echo::print_success(&format!("Entry saved to {}", path.display()));
        total_saved += 1;

        let again = prompt_nonempty(input, "Curate another file? (y/n)")?;
        if !again.eq_ignore_ascii_case("y") {
            break;
        }
    }

    echo::print_success(&format!("Curation complete: {} entries created", total_saved));
    Ok(())
}

fn print_file_listing(files: &[PathBuf]) {
    println!("\nAvailable raw data files:");
    for (i, path) in files.iter().enumerate() {
        let size_kb = fs::metadata(path).map(|m| m.len() as f64 / 1024.0).unwrap_or(0.0);
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("?");
        println!("{:>3}. {} ({:.1} KB)", i + 1, name, size_kb);
    }
}

fn select_file<R: BufRead>(input: &mut R, files: &[PathBuf]) -> anyhow::Result<Option<PathBuf>> {
    loop {
        let line = prompt_nonempty(input, "File number to curate (0 to exit)")?;
        match line.parse::<usize>() {
            Ok(0) => return Ok(None),
            Ok(n) if n <= files.len() => return Ok(Some(files[n - 1].clone())),
            _ => println!("Invalid choice, try again."),
        }
    }
}

fn print_preview(path: &Path, raw_text: &str) {
    println!("\n--- {} ---", path.file_name().and_then(|n| n.to_str()).unwrap_or("?"));
    let preview: String = raw_text.chars().take(PREVIEW_CHARS).collect();
    println!("{}", preview);

    let total = raw_text.chars().count();
    if total > PREVIEW_CHARS {
        println!("... ({} more characters)", total - PREVIEW_CHARS);
    }
    println!("---");
}

/// One prompt per schema field, in the published field order.
fn collect_entry<R: BufRead>(input: &mut R, file: &Path, raw_text: &str) -> anyhow::Result<StoryEntry> {
    let role_model_name = confirm_role_model_name(input, raw_text)?;
    let role_model_context = prompt_min(input, "Context (one sentence about who they are)", 10)?;
    let situation_faced = prompt_min(input, "Situation faced", 10)?;
    let challenge_narrative = prompt_min(input, "Challenge narrative (2-3 sentences)", 20)?;
    let mental_health_themes = select_themes(input)?;
    let coping_strategies_used = prompt_list(input, "Coping strategies (comma-separated)")?;
    let key_action_taken = prompt_min(input, "Key action taken", 5)?;
    let key_quote_or_insight = prompt_quote(input, raw_text)?;
    let summary_psychological = prompt_min(input, "Psychological lesson (2-3 sentences)", 20)?;
    let outcome_resolution = prompt_min(input, "Outcome or resolution", 10)?;
    let source_reference = file.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string();

    Ok(StoryEntry {
        role_model_name,
        role_model_context,
        situation_faced,
        challenge_narrative,
        mental_health_themes,
        coping_strategies_used,
        key_action_taken,
        key_quote_or_insight,
        summary_psychological,
        outcome_resolution,
        source_reference,
    })
}

/// Prefers the name from the raw file's `Role Model:` header; the curator
/// can override it or, with no header, is asked outright.
fn confirm_role_model_name<R: BufRead>(input: &mut R, raw_text: &str) -> anyhow::Result<String> {
    if let Some(inferred) = infer_role_model_name(raw_text) {
        println!("Detected role model name: '{}'", inferred);
        let answer = prompt_line(input, "Press Enter to confirm, or type a different name")?;
        if answer.is_empty() {
            return Ok(inferred);
        }
        return Ok(answer);
    }
    prompt_min(input, "Role model name (full name)", 2)
}

fn select_themes<R: BufRead>(input: &mut R) -> anyhow::Result<Vec<String>> {
    println!("\nMental health themes:");
    for (i, theme) in MENTAL_HEALTH_THEMES.iter().enumerate() {
        println!("{:>3}. {}", i + 1, theme);
    }

    loop {
        let line = prompt_nonempty(input, "Theme numbers (2-4, comma-separated, e.g. 1,3)")?;
        let parsed: Result<Vec<usize>, _> = line.split(',').map(|s| s.trim().parse::<usize>()).collect();

        if let Ok(choices) = parsed
            && (2..=4).contains(&choices.len())
            && choices.iter().all(|n| (1..=MENTAL_HEALTH_THEMES.len()).contains(n))
        {
            return Ok(choices.iter().map(|n| MENTAL_HEALTH_THEMES[n - 1].to_string()).collect());
        }
        println!("Select between 2 and 4 valid theme numbers.");
    }
}

fn prompt_quote<R: BufRead>(input: &mut R, raw_text: &str) -> anyhow::Result<String> {
    loop {
        let quote = prompt_min(input, "Direct quote from the raw text", 10)?;
        if raw_text.to_lowercase().contains(&quote.to_lowercase()) {
            return Ok(quote);
        }

        echo::print_warning("Quote not found in the raw text.");
        let keep = prompt_nonempty(input, "Keep it anyway? (y/n)")?;
        if keep.eq_ignore_ascii_case("y") {
            return Ok(quote);
        }
    }
}

fn print_entry_summary(entry: &StoryEntry) {
    println!("\nRole model: {}", entry.role_model_name);
    println!("Themes: {}", entry.mental_health_themes.join(", "));
    println!("Strategies: {}", entry.coping_strategies_used.join(", "));
    println!("Quote: \"{}\"", entry.key_quote_or_insight);
    println!("Source: {}", entry.source_reference);
}

fn prompt_line<R: BufRead>(input: &mut R, prompt: &str) -> anyhow::Result<String> {
    print!("{}: ", prompt);
    io::stdout().flush().ok();

    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read input")? == 0 {
        anyhow::bail!("input ended before the entry was complete");
    }
    Ok(line.trim().to_string())
}

fn prompt_nonempty<R: BufRead>(input: &mut R, prompt: &str) -> anyhow::Result<String> {
    loop {
        let value = prompt_line(input, prompt)?;
        if !value.is_empty() {
            return Ok(value);
        }
        println!("A value is required.");
    }
}

fn prompt_min<R: BufRead>(input: &mut R, prompt: &str, min: usize) -> anyhow::Result<String> {
    loop {
        let value = prompt_line(input, prompt)?;
        if value.chars().count() >= min {
            return Ok(value);
        }
        println!("Please enter at least {} characters.", min);
    }
}

fn prompt_list<R: BufRead>(input: &mut R, prompt: &str) -> anyhow::Result<Vec<String>> {
    loop {
        let line = prompt_nonempty(input, prompt)?;
        let items: Vec<String> =
            line.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
        if !items.is_empty() {
            return Ok(items);
        }
        println!("Enter at least one item.");
    }
}
