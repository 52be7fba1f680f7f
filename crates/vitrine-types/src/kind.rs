use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The four content record kinds managed by the back office.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A client or partner company, shown with its logo.
    Client,
    /// A team member profile.
    Expert,
    /// A portfolio project.
    Project,
    /// A customer quote.
    Testimonial,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [Self::Client, Self::Expert, Self::Project, Self::Testimonial];

    /// Document collection the kind is stored in. Also used as the asset
    /// path prefix.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Client => "clients",
            Self::Expert => "experts",
            Self::Project => "projects",
            Self::Testimonial => "testimonials",
        }
    }

    /// Name of the document field holding the asset URL.
    pub fn asset_field(&self) -> &'static str {
        match self {
            Self::Client => "logo",
            Self::Expert | Self::Project | Self::Testimonial => "image",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Expert => write!(f, "expert"),
            Self::Project => write!(f, "project"),
            Self::Testimonial => write!(f, "testimonial"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" | "clients" | "partner" | "partners" => Ok(Self::Client),
            "expert" | "experts" => Ok(Self::Expert),
            "project" | "projects" => Ok(Self::Project),
            "testimonial" | "testimonials" => Ok(Self::Testimonial),
            other => Err(TypeError::invalid(
                "kind",
                format!("unknown entity kind `{other}`"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collections_are_distinct() {
        let mut names: Vec<_> = EntityKind::ALL.iter().map(|k| k.collection()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn client_uses_logo_field() {
        assert_eq!(EntityKind::Client.asset_field(), "logo");
        assert_eq!(EntityKind::Expert.asset_field(), "image");
        assert_eq!(EntityKind::Project.asset_field(), "image");
        assert_eq!(EntityKind::Testimonial.asset_field(), "image");
    }

    #[test]
    fn parse_accepts_singular_and_plural() {
        assert_eq!("Clients".parse::<EntityKind>().unwrap(), EntityKind::Client);
        assert_eq!("partner".parse::<EntityKind>().unwrap(), EntityKind::Client);
        assert_eq!(" expert ".parse::<EntityKind>().unwrap(), EntityKind::Expert);
        assert!("widget".parse::<EntityKind>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
        }
    }
}
