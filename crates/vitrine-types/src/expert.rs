use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::document::EqualityFilter;
use crate::entity::{require_text, EntityFields, Record};
use crate::error::TypeError;
use crate::kind::EntityKind;

/// A team member profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertFields {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpertPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
}

pub type Expert = Record<ExpertFields>;

impl EntityFields for ExpertFields {
    type Patch = ExpertPatch;
    type Filter = Infallible;

    const KIND: EntityKind = EntityKind::Expert;

    fn validate(&self) -> Result<(), TypeError> {
        require_text("name", &self.name)?;
        require_text("role", &self.role)
    }

    fn apply(&mut self, patch: ExpertPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
    }

    fn filter_clause(filter: &Infallible) -> EqualityFilter {
        match *filter {}
    }
}
