//! Foundation types for Vitrine.
//!
//! This crate defines the four content record kinds managed by the admin
//! back office and the schemaless document shape they are persisted as.
//! Every other Vitrine crate depends on `vitrine-types`.
//!
//! # Key Types
//!
//! - [`DocumentId`] — Store-assigned document identifier
//! - [`EntityKind`] — Client, Expert, Project, or Testimonial
//! - [`EntityFields`] — Per-kind domain fields, patches, and list filters
//! - [`Record`] — A persisted entity: id, creation time, asset URL, fields
//! - [`Document`] — The schemaless map a record is stored as

pub mod client;
pub mod document;
pub mod entity;
pub mod error;
pub mod expert;
pub mod id;
pub mod kind;
pub mod project;
pub mod testimonial;
pub mod timestamp;

pub use client::{Client, ClientFields, ClientPatch, PartnerCategory};
pub use document::{Document, EqualityFilter, CREATED_AT_FIELD};
pub use entity::{EntityFields, Record};
pub use error::TypeError;
pub use expert::{Expert, ExpertFields, ExpertPatch};
pub use id::DocumentId;
pub use kind::EntityKind;
pub use project::{Project, ProjectFields, ProjectPatch};
pub use testimonial::{Testimonial, TestimonialFields, TestimonialPatch};
pub use timestamp::{format_timestamp, now, parse_timestamp};
