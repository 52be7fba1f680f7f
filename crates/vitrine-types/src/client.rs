use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::EqualityFilter;
use crate::entity::{require_text, require_url, EntityFields, Record};
use crate::error::TypeError;
use crate::kind::EntityKind;

/// Whether a company is listed as a client or as a partner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerCategory {
    Client,
    Partner,
}

impl PartnerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Partner => "partner",
        }
    }
}

impl fmt::Display for PartnerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartnerCategory {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "partner" => Ok(Self::Partner),
            other => Err(TypeError::invalid(
                "category",
                format!("expected client or partner, got `{other}`"),
            )),
        }
    }
}

/// A client or partner company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientFields {
    pub name: String,
    pub website: String,
    pub category: PartnerCategory,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub website: Option<String>,
    pub category: Option<PartnerCategory>,
}

pub type Client = Record<ClientFields>;

impl EntityFields for ClientFields {
    type Patch = ClientPatch;
    type Filter = PartnerCategory;

    const KIND: EntityKind = EntityKind::Client;

    fn validate(&self) -> Result<(), TypeError> {
        require_text("name", &self.name)?;
        require_url("website", &self.website)
    }

    fn apply(&mut self, patch: ClientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(website) = patch.website {
            self.website = website;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }

    fn filter_clause(filter: &PartnerCategory) -> EqualityFilter {
        EqualityFilter::new("category", filter.as_str())
    }
}
