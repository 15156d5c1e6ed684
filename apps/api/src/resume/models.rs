use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    /// Profile URL; empty when not provided.
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub twitter: String,
}

/// One experience, education, or project item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub title: String,
    pub organization: String,
    pub start_date: String,
    /// Empty when `is_current`.
    #[serde(default)]
    pub end_date: String,
    pub description: String,
    #[serde(default)]
    pub is_current: bool,
}

impl Entry {
    /// `"Jan 2023 - Present"` or `"Jan 2020 - Dec 2022"`.
    pub fn date_range(&self) -> String {
        if self.is_current {
            format!("{} - Present", self.start_date)
        } else {
            format!("{} - {}", self.start_date, self.end_date)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Experience,
    Education,
    Project,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::Experience, EntryKind::Education, EntryKind::Project];

    /// Markdown section heading.
    pub fn heading(self) -> &'static str {
        match self {
            EntryKind::Experience => "Experience",
            EntryKind::Education => "Education",
            EntryKind::Project => "Projects",
        }
    }

    /// Singular noun used in prompts.
    pub fn noun(self) -> &'static str {
        match self {
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
            EntryKind::Project => "project",
        }
    }

    /// Form field name, used in validation paths.
    pub fn field(self) -> &'static str {
        match self {
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
            EntryKind::Project => "projects",
        }
    }
}

/// Full resume form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeForm {
    #[serde(default)]
    pub contact_info: ContactInfo,
    /// Display name shown in the contact block.
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: Vec<Entry>,
    #[serde(default)]
    pub education: Vec<Entry>,
    #[serde(default)]
    pub projects: Vec<Entry>,
}

impl ResumeForm {
    pub fn entries(&self, kind: EntryKind) -> &[Entry] {
        match kind {
            EntryKind::Experience => &self.experience,
            EntryKind::Education => &self.education,
            EntryKind::Project => &self.projects,
        }
    }

    pub fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<Entry> {
        match kind {
            EntryKind::Experience => &mut self.experience,
            EntryKind::Education => &mut self.education,
            EntryKind::Project => &mut self.projects,
        }
    }
}

/// The fields the markdown editor syncs back into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    pub email: String,
    pub mobile: String,
    pub summary: String,
    pub skills: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_current_says_present() {
        let entry = Entry {
            start_date: "Jan 2023".to_string(),
            is_current: true,
            ..Default::default()
        };
        assert_eq!(entry.date_range(), "Jan 2023 - Present");
    }

    #[test]
    fn test_form_deserializes_camel_case_with_defaults() {
        let json = r#"{
            "contactInfo": {"email": "jane@example.com", "mobile": "5551234567"},
            "summary": "Engineer",
            "skills": "Rust",
            "experience": [{
                "title": "Engineer", "organization": "Acme", "startDate": "2021-03",
                "description": "Built things", "isCurrent": true
            }]
        }"#;
        let form: ResumeForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.contact_info.linkedin, "");
        assert_eq!(form.experience[0].end_date, "");
        assert!(form.experience[0].is_current);
        assert!(form.projects.is_empty());
    }

    #[test]
    fn test_entry_kind_headings() {
        assert_eq!(EntryKind::Project.heading(), "Projects");
        assert_eq!(EntryKind::Project.field(), "projects");
        let kind: EntryKind = serde_json::from_str(r#""education""#).unwrap();
        assert_eq!(kind, EntryKind::Education);
    }
}
