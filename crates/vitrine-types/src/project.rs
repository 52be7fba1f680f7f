use serde::{Deserialize, Serialize};

use crate::document::EqualityFilter;
use crate::entity::{optional_url, require_text, EntityFields, Record};
use crate::error::TypeError;
use crate::kind::EntityKind;

/// A portfolio project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    /// Free-text category; lists can be narrowed by exact match.
    pub category: String,
    /// Display order is significant.
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Partial project update. `link`/`github` use a nested option so a patch
/// can clear them (`Some(None)`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub link: Option<Option<String>>,
    pub github: Option<Option<String>>,
}

pub type Project = Record<ProjectFields>;

impl EntityFields for ProjectFields {
    type Patch = ProjectPatch;
    type Filter = String;

    const KIND: EntityKind = EntityKind::Project;

    fn validate(&self) -> Result<(), TypeError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("category", &self.category)?;
        for (i, tech) in self.technologies.iter().enumerate() {
            if tech.trim().is_empty() {
                return Err(TypeError::InvalidField {
                    field: format!("technologies[{i}]"),
                    reason: "must not be empty".into(),
                });
            }
        }
        optional_url("link", self.link.as_deref())?;
        optional_url("github", self.github.as_deref())
    }

    fn apply(&mut self, patch: ProjectPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(technologies) = patch.technologies {
            self.technologies = technologies;
        }
        if let Some(link) = patch.link {
            self.link = link;
        }
        if let Some(github) = patch.github {
            self.github = github;
        }
    }

    fn filter_clause(filter: &String) -> EqualityFilter {
        EqualityFilter::new("category", filter.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn site() -> ProjectFields {
        ProjectFields {
            title: "Storefront".into(),
            description: "Headless commerce rebuild".into(),
            category: "web".into(),
            technologies: vec!["Rust".into(), "TypeScript".into(), "Postgres".into()],
            link: Some("https://shop.example".into()),
            github: None,
        }
    }

    #[test]
    fn technologies_keep_order() {
        let value = serde_json::to_value(site()).unwrap();
        assert_eq!(value["technologies"], json!(["Rust", "TypeScript", "Postgres"]));
        assert!(value.get("github").is_none());
    }

    #[test]
    fn validate_checks_optional_links() {
        assert!(site().validate().is_ok());

        let mut bad = site();
        bad.github = Some("github.com/acme/shop".into());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_technology() {
        let mut bad = site();
        bad.technologies.push(" ".into());
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("technologies[3]"));
    }

    #[test]
    fn patch_can_clear_link() {
        let mut fields = site();
        fields.apply(ProjectPatch {
            link: Some(None),
            ..Default::default()
        });
        assert!(fields.link.is_none());
        assert_eq!(fields.title, "Storefront");
    }
}
