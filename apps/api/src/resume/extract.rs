//! Resume markdown → form state.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::markdown::{CONTACT_HEADING, EMAIL_MARKER, MOBILE_MARKER};
use crate::resume::models::{ContactInfo, Entry, EntryKind, ExtractedInfo, ResumeForm};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{10,}\b").expect("valid phone regex"));
static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)## Professional summary\s+(.*?)(?:\s+##|\z)").expect("valid summary regex")
});
static SKILLS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)## Skills\s+(.*?)(?:\s+##|\z)").expect("valid skills regex"));
static HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href\s*=\s*["']([^"']+)["']"#).expect("valid href regex"));

/// Text content of an HTML-ish string: tags removed, basic entities decoded.
pub fn strip_tags(input: &str) -> String {
    let text = TAG_RE.replace_all(input, "");
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn capture_section(re: &Regex, markdown: &str) -> String {
    re.captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Pulls the fields the editor syncs back into the form. Missing values are empty strings.
pub fn extract_info(markdown: &str) -> ExtractedInfo {
    let text = strip_tags(markdown);
    let email = EMAIL_RE
        .find(&text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let mobile = PHONE_RE
        .find(&text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    ExtractedInfo {
        email,
        mobile,
        summary: capture_section(&SUMMARY_RE, markdown),
        skills: capture_section(&SKILLS_RE, markdown),
    }
}

fn url_host(url: &str) -> Option<String> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.rsplit('@').next()?.split(':').next()?;
    (!host.is_empty()).then(|| host.to_ascii_lowercase())
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}

fn social_links(markdown: &str) -> (String, String) {
    let mut linkedin = String::new();
    let mut twitter = String::new();
    for caps in HREF_RE.captures_iter(markdown) {
        let url = &caps[1];
        let Some(host) = url_host(url) else { continue };
        if linkedin.is_empty() && host_matches(&host, "linkedin.com") {
            linkedin = url.to_string();
        } else if twitter.is_empty()
            && (host_matches(&host, "twitter.com") || host_matches(&host, "x.com"))
        {
            twitter = url.to_string();
        }
    }
    (linkedin, twitter)
}

/// Splits markdown into `(heading text, body lines)` for every `## ` section.
fn sections(markdown: &str) -> Vec<(String, Vec<&str>)> {
    let mut out: Vec<(String, Vec<&str>)> = Vec::new();
    for line in markdown.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            out.push((strip_tags(heading).trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = out.last_mut() {
            body.push(line);
        }
    }
    out
}

fn parse_date_line(line: &str, entry: &mut Entry) {
    let (start, end) = line.split_once(" - ").unwrap_or((line, ""));
    entry.start_date = start.trim().to_string();
    let end = end.trim();
    if end.eq_ignore_ascii_case("present") {
        entry.is_current = true;
        entry.end_date.clear();
    } else {
        entry.end_date = end.to_string();
    }
}

fn finish_entry(entry: Option<Entry>, description: &mut Vec<&str>, out: &mut Vec<Entry>) {
    if let Some(mut entry) = entry {
        entry.description = description.join("\n").trim().to_string();
        out.push(entry);
    }
    description.clear();
}

/// `### title @ organization` blocks: first non-empty line is the date range, the rest is description.
fn parse_entries(lines: &[&str]) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;
    let mut has_dates = false;
    let mut description: Vec<&str> = Vec::new();

    for line in lines {
        if let Some(header) = line.strip_prefix("### ") {
            finish_entry(current.take(), &mut description, &mut entries);
            let (title, organization) = header.split_once(" @ ").unwrap_or((header, ""));
            current = Some(Entry {
                title: title.trim().to_string(),
                organization: organization.trim().to_string(),
                ..Default::default()
            });
            has_dates = false;
            continue;
        }
        let Some(entry) = current.as_mut() else { continue };
        if !has_dates {
            if line.trim().is_empty() {
                continue;
            }
            parse_date_line(line.trim(), entry);
            has_dates = true;
        } else {
            description.push(line);
        }
    }
    finish_entry(current, &mut description, &mut entries);
    entries
}

/// Display name: the first contact-block line that is not contact data.
fn contact_name(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .map(|line| strip_tags(line).trim().to_string())
        .find(|line| !line.is_empty())
        .filter(|line| {
            !line.contains(EMAIL_MARKER)
                && !line.contains(MOBILE_MARKER)
                && !line.contains('@')
                && !line.contains("://")
        })
}

/// Rebuilds the whole form from resume markdown.
pub fn parse_resume(markdown: &str) -> ResumeForm {
    let info = extract_info(markdown);
    let (linkedin, twitter) = social_links(markdown);
    let mut form = ResumeForm {
        contact_info: ContactInfo {
            email: info.email,
            mobile: info.mobile,
            linkedin,
            twitter,
        },
        summary: info.summary,
        skills: info.skills,
        ..Default::default()
    };

    for (heading, lines) in sections(markdown) {
        if heading.eq_ignore_ascii_case(CONTACT_HEADING) {
            form.full_name = contact_name(&lines);
            continue;
        }
        if let Some(kind) = EntryKind::ALL
            .into_iter()
            .find(|kind| heading.eq_ignore_ascii_case(kind.heading()))
        {
            form.entries_mut(kind).extend(parse_entries(&lines));
        }
    }
    form
}
