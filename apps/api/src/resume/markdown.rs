//! Form state → resume markdown.
//!
//! The output is what the editor shows and what the PDF renderer consumes. Section order is fixed:
//! contact block, summary, skills, experience, education, projects.

use crate::resume::dates::normalize_display_date;
use crate::resume::models::{ContactInfo, Entry, EntryKind, ResumeForm};

pub const CONTACT_HEADING: &str = "Contact information";
pub const SUMMARY_HEADING: &str = "Professional summary";
pub const SKILLS_HEADING: &str = "Skills";

pub const EMAIL_MARKER: &str = "📧";
pub const MOBILE_MARKER: &str = "📱";

/// `## {heading}` followed by the entries, separated by blank lines.
pub fn entries_to_markdown(kind: EntryKind, entries: &[Entry]) -> String {
    let body = entries
        .iter()
        .map(entry_to_markdown)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("## {}\n\n{}", kind.heading(), body)
}

fn entry_to_markdown(entry: &Entry) -> String {
    let entry = Entry {
        start_date: normalize_display_date(&entry.start_date),
        end_date: normalize_display_date(&entry.end_date),
        ..entry.clone()
    };
    format!(
        "### {} @ {}\n{}\n\n{}",
        entry.title.trim(),
        entry.organization.trim(),
        entry.date_range(),
        entry.description.trim()
    )
}

fn anchor(url: &str, label: &str) -> String {
    format!(r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{label}: {url}</a>"#)
}

fn contact_parts(contact: &ContactInfo) -> Vec<String> {
    let mut parts = Vec::new();
    let email = contact.email.trim();
    if !email.is_empty() {
        parts.push(format!("{EMAIL_MARKER} {email}"));
    }
    let mobile = contact.mobile.trim();
    if !mobile.is_empty() {
        parts.push(format!("{MOBILE_MARKER} {mobile}"));
    }
    let linkedin = contact.linkedin.trim();
    if !linkedin.is_empty() {
        parts.push(anchor(linkedin, "LinkedIn"));
    }
    let twitter = contact.twitter.trim();
    if !twitter.is_empty() {
        parts.push(anchor(twitter, "Twitter"));
    }
    parts
}

fn centered(content: &str) -> String {
    format!(r#"<div align="center">{content}</div>"#)
}

/// Centered contact block, or an empty string when there is no contact data at all.
pub fn contact_markdown(form: &ResumeForm) -> String {
    let parts = contact_parts(&form.contact_info);
    if parts.is_empty() {
        return String::new();
    }

    let mut lines = vec![format!("## {}", centered(CONTACT_HEADING))];
    if let Some(name) = form.full_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        lines.push(centered(name));
    }
    let (first, rest) = parts.split_at(parts.len().min(2));
    lines.push(centered(&first.join(" | ")));
    if !rest.is_empty() {
        lines.push(centered(&rest.join(" | ")));
    }
    lines.join("\n\n")
}

/// Full resume markdown; empty pieces (and empty entry sections) are dropped.
pub fn compose_markdown(form: &ResumeForm) -> String {
    let mut pieces = vec![contact_markdown(form)];

    let summary = form.summary.trim();
    if !summary.is_empty() {
        pieces.push(format!("## {SUMMARY_HEADING}\n\n{summary}"));
    }
    let skills = form.skills.trim();
    if !skills.is_empty() {
        pieces.push(format!("## {SKILLS_HEADING}\n\n{skills}"));
    }
    for kind in EntryKind::ALL {
        let entries = form.entries(kind);
        if !entries.is_empty() {
            pieces.push(entries_to_markdown(kind, entries));
        }
    }

    pieces
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
