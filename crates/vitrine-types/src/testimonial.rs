use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::document::EqualityFilter;
use crate::entity::{require_text, EntityFields, Record};
use crate::error::TypeError;
use crate::kind::EntityKind;

/// A customer quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialFields {
    pub name: String,
    pub role: String,
    pub company: String,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestimonialPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: Option<String>,
}

pub type Testimonial = Record<TestimonialFields>;

impl EntityFields for TestimonialFields {
    type Patch = TestimonialPatch;
    type Filter = Infallible;

    const KIND: EntityKind = EntityKind::Testimonial;

    fn validate(&self) -> Result<(), TypeError> {
        require_text("name", &self.name)?;
        require_text("role", &self.role)?;
        require_text("company", &self.company)?;
        require_text("content", &self.content)
    }

    fn apply(&mut self, patch: TestimonialPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
    }

    fn filter_clause(filter: &Infallible) -> EqualityFilter {
        match *filter {}
    }
}
