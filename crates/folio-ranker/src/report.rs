//! Markdown rendering of a weekly selection.

use chrono::{Duration, NaiveDate};
use folio_common::config::OutputConfig;
use folio_common::PicksConfig;
use std::fmt::Write as _;

use crate::scorer::ScoredPaper;
use crate::selector::WeeklySelection;
use crate::tags::{pretty_category, tags};

const WRAP_WIDTH: usize = 90;
const QUOTE_PREFIX: &str = "> ";

/// File name for the report of a run on `date`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("reading_{}.md", date.format("%Y-%m-%d"))
}

/// "Oct 19 – Oct 25, 2026" for a week starting on `week_of`.
pub fn week_label(week_of: NaiveDate) -> String {
    let week_end = week_of + Duration::days(6);
    format!("{} – {}", week_of.format("%b %d"), week_end.format("%b %d, %Y"))
}

/// Cut `text` to at most `max_chars` characters, backing off to the last
/// word boundary and appending `...` when anything was dropped.
pub fn truncate_abstract(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let kept = match cut.rfind(' ') {
        Some(idx) => &cut[..idx],
        None => cut.as_str(),
    };
    format!("{}...", kept.trim_end())
}

/// Greedy word wrap with a prefix on every line. Words longer than the
/// available width get a line of their own.
pub fn wrap_quoted(text: &str, width: usize, prefix: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::from(prefix);
    let mut current_len = prefix.chars().count();
    let prefix_len = current_len;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > prefix_len && current_len + 1 + word_len > width {
            lines.push(std::mem::replace(&mut current, String::from(prefix)));
            current_len = prefix_len;
        }
        if current_len > prefix_len {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if current_len > prefix_len {
        lines.push(current);
    }
    lines.join("\n")
}

/// Field categories (alphabetical) followed by the feature lists in use.
fn criteria_line(config: &PicksConfig) -> Option<String> {
    let mut parts: Vec<String> = config.field_keywords.keys().map(|k| pretty_category(k).to_lowercase()).collect();
    if !config.structural_keywords.is_empty() {
        parts.push("structural models".into());
    }
    if !config.novel_data_keywords.is_empty() {
        parts.push("novel data".into());
    }
    if !config.novel_measurement_keywords.is_empty() {
        parts.push("novel measurement".into());
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("Selection criteria: {}.", parts.join(", ")))
    }
}

fn render_entry(md: &mut String, rank: usize, pick: &ScoredPaper, config: &PicksConfig, max_abstract: usize) {
    let p = &pick.paper;
    let authors = if p.authors.trim().is_empty() { "Unknown" } else { p.authors.trim() };

    let _ = writeln!(md, "### {rank}. {}", p.title.trim());
    md.push('\n');
    if let Some(link) = p.link() {
        let _ = writeln!(md, "**[Open paper]({link})**");
    }
    if let Some(oa) = p.oa_url.as_deref().filter(|u| !u.is_empty()) {
        let _ = writeln!(md, "[Open-access PDF]({oa})");
    }
    let _ = writeln!(md, "*{authors}*");
    match p.publication_date.as_deref().filter(|d| !d.is_empty()) {
        Some(date) => {
            let _ = writeln!(md, "*{}*, {date}", p.venue_name());
        }
        None => {
            let _ = writeln!(md, "*{}*", p.venue_name());
        }
    }
    let paper_tags = tags(p, config);
    if !paper_tags.is_empty() {
        let rendered: Vec<String> = paper_tags.iter().map(|t| format!("`{t}`")).collect();
        let _ = writeln!(md, "  {}", rendered.join(" "));
    }
    let _ = writeln!(md, "Score: {:.2}", pick.score);
    md.push('\n');

    let abstract_text = p.abstract_or_empty().trim();
    if !abstract_text.is_empty() {
        let short = truncate_abstract(abstract_text, max_abstract);
        md.push_str(&wrap_quoted(&short, WRAP_WIDTH, QUOTE_PREFIX));
        md.push_str("\n\n");
    }
    md.push_str("---\n\n");
}

/// Render the reading list. `curated_on` is the run date.
pub fn render_report(
    result: &WeeklySelection,
    config: &PicksConfig,
    output: &OutputConfig,
    curated_on: NaiveDate,
) -> String {
    let mut md = String::new();
    md.push_str("# Weekly Reading List\n");
    let _ = writeln!(md, "## {}", week_label(result.week_of));
    md.push('\n');

    if result.selection.is_empty() {
        md.push_str("No new papers this week.\n\n");
        let _ = writeln!(md, "*{}. {} papers left in the backlog.*", capitalise(result.status.describe()), result.remaining_backlog);
        if let Some(note) = duplicates_note(result) {
            let _ = writeln!(md, "\n*{note}*");
        }
        return md;
    }

    let _ = writeln!(
        md,
        "*Curated on {}. {} papers selected from {} new items this week; {} left in the backlog.*",
        curated_on.format("%A, %B %d, %Y"),
        result.selection.len(),
        result.new_this_week,
        result.remaining_backlog,
    );
    md.push('\n');
    if let Some(line) = criteria_line(config) {
        md.push_str(&line);
        md.push_str("\n\n");
    }
    md.push_str("---\n\n");

    for (i, pick) in result.selection.iter().enumerate() {
        render_entry(&mut md, i + 1, pick, config, output.max_abstract_length);
    }

    if !result.runners_up.is_empty() {
        md.push_str("## Also worth a look\n\n");
        for r in &result.runners_up {
            let link = r.paper.link().map(|u| format!(" [link]({u})")).unwrap_or_default();
            let _ = writeln!(md, "- **{}** (*{}*){link}", r.paper.title.trim(), r.paper.venue_name());
        }
        md.push('\n');
    }

    if let Some(note) = duplicates_note(result) {
        let _ = writeln!(md, "*{note}*");
    }

    md
}

/// Title duplicates are never marked picked: the losing copy stays in the
/// backlog and can be selected in a later week once its twin is gone.
pub fn duplicates_note(result: &WeeklySelection) -> Option<String> {
    match result.collapsed_duplicates {
        0 => None,
        1 => Some("1 title duplicate stays in the backlog and may come up again in a later week.".to_string()),
        n => Some(format!("{n} title duplicates stay in the backlog and may come up again in a later week.")),
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
