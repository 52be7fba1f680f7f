use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vitrine_types::{EntityKind, PartnerCategory};

#[derive(Parser)]
#[command(
    name = "vitrine",
    about = "Vitrine: content back office for clients, experts, projects, and testimonials",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML config file (defaults to ./vitrine.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a record with its image
    Add(AddArgs),
    /// List records, newest first
    List(ListArgs),
    /// Show one record
    Show(TargetArgs),
    /// Change a record's fields and optionally its image
    Update(UpdateArgs),
    /// Delete a record (its image stays in storage)
    Delete(TargetArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct AddArgs {
    #[command(subcommand)]
    pub entity: EntityArgs,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Id of the record to update
    pub id: String,
    #[command(subcommand)]
    pub entity: EntityArgs,
}

#[derive(Args)]
pub struct ListArgs {
    /// client, expert, project, or testimonial
    pub kind: EntityKind,
    /// Only records in this category (clients and projects)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct TargetArgs {
    pub kind: EntityKind,
    pub id: String,
}

/// Field values for one entity kind. On `add` the kind's required fields
/// must be present; on `update` every flag is optional.
#[derive(Subcommand)]
pub enum EntityArgs {
    Client(ClientArgs),
    Expert(ExpertArgs),
    Project(ProjectArgs),
    Testimonial(TestimonialArgs),
}

#[derive(Args)]
pub struct ClientArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long)]
    pub category: Option<PartnerCategory>,
    /// Logo image
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExpertArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    /// Portrait image
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProjectArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Technology used, in display order (repeatable)
    #[arg(long = "tech")]
    pub technologies: Vec<String>,
    #[arg(long)]
    pub link: Option<String>,
    #[arg(long)]
    pub github: Option<String>,
    /// Screenshot image
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct TestimonialArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    /// Author photo
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_client() {
        let cli = Cli::try_parse_from([
            "vitrine", "add", "client", "--name", "Acme", "--website", "https://acme.example",
            "--category", "partner", "--file", "logo.png",
        ])
        .unwrap();
        match cli.command {
            Command::Add(AddArgs {
                entity: EntityArgs::Client(args),
            }) => {
                assert_eq!(args.name.as_deref(), Some("Acme"));
                assert_eq!(args.category, Some(PartnerCategory::Partner));
                assert_eq!(args.file, Some(PathBuf::from("logo.png")));
            }
            _ => panic!("expected add client"),
        }
    }

    #[test]
    fn parses_repeated_technologies_in_order() {
        let cli = Cli::try_parse_from([
            "vitrine", "update", "abc123", "project", "--tech", "Rust", "--tech", "Wasm",
        ])
        .unwrap();
        match cli.command {
            Command::Update(UpdateArgs {
                id,
                entity: EntityArgs::Project(args),
            }) => {
                assert_eq!(id, "abc123");
                assert_eq!(args.technologies, vec!["Rust", "Wasm"]);
            }
            _ => panic!("expected update project"),
        }
    }

    #[test]
    fn parses_list_with_kind_and_global_flags() {
        let cli = Cli::try_parse_from([
            "vitrine", "list", "clients", "--category", "partner", "--format", "json", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.kind, EntityKind::Client);
                assert_eq!(args.category.as_deref(), Some("partner"));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["vitrine", "list", "widgets"]).is_err());
    }
}
