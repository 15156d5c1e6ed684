use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FieldError;
use crate::resume::models::{ContactInfo, Entry, EntryKind, ResumeForm};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("valid email regex")
});
static MOBILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+]?[\s0-9]+)?(\d{3}|[(]?[0-9]+[)])?([-]?[\s]?[0-9])+$")
        .expect("valid mobile regex")
});

pub fn is_valid_email(value: &str) -> bool {
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };
    EMAIL_RE.is_match(value)
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !value.contains("..")
}

pub fn is_valid_mobile(value: &str) -> bool {
    MOBILE_RE.is_match(value)
}

pub fn validate_contact(contact: &ContactInfo) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let email = contact.email.trim();
    if email.is_empty() {
        errors.push(FieldError::new("contactInfo.email", "Email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new("contactInfo.email", "Invalid email address"));
    }

    let mobile = contact.mobile.trim();
    if mobile.is_empty() {
        errors.push(FieldError::new("contactInfo.mobile", "Mobile number is required"));
    } else if !is_valid_mobile(mobile) {
        errors.push(FieldError::new("contactInfo.mobile", "Invalid mobile number"));
    }
    errors
}

/// Checks one entry; `prefix` is its form path, e.g. `experience[0]`.
pub fn validate_entry(prefix: &str, entry: &Entry) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let required = [
        ("title", &entry.title, "Title is required"),
        ("organization", &entry.organization, "Organization is required"),
        ("startDate", &entry.start_date, "Start date is required"),
        ("description", &entry.description, "Description is required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            errors.push(FieldError::new(format!("{prefix}.{field}"), message));
        }
    }
    if !entry.is_current && entry.end_date.trim().is_empty() {
        errors.push(FieldError::new(
            format!("{prefix}.endDate"),
            "End date is required unless this is your current position",
        ));
    }
    errors
}

/// Validates the whole form, collecting every failure rather than stopping at the first.
pub fn validate_form(form: &ResumeForm) -> Result<(), Vec<FieldError>> {
    let mut errors = validate_contact(&form.contact_info);

    if form.summary.trim().is_empty() {
        errors.push(FieldError::new("summary", "Professional summary is required"));
    }
    if form.skills.trim().is_empty() {
        errors.push(FieldError::new("skills", "Skills are required"));
    }

    for kind in EntryKind::ALL {
        for (i, entry) in form.entries(kind).iter().enumerate() {
            errors.extend(validate_entry(&format!("{}[{i}]", kind.field()), entry));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
