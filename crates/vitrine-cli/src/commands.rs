use std::path::Path;

use anyhow::{anyhow, bail, Context};
use colored::Colorize;
use vitrine_assets::{content_type_for_path, AssetUpload};
use vitrine_repo::{ContentCatalog, EntityRepository};
use vitrine_types::{
    ClientFields, ClientPatch, DocumentId, EntityFields, EntityKind, ExpertFields, ExpertPatch,
    PartnerCategory, ProjectFields, ProjectPatch, Record, TestimonialFields, TestimonialPatch,
};

use crate::cli::*;
use crate::config::AppConfig;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    if let Command::Config = cli.command {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let catalog = config.open_catalog().await?;
    run_with_catalog(&catalog, cli.command, cli.format).await
}

pub async fn run_with_catalog(
    catalog: &ContentCatalog,
    command: Command,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        Command::Add(args) => cmd_add(catalog, args.entity, format).await,
        Command::List(args) => cmd_list(catalog, args, format).await,
        Command::Show(args) => cmd_show(catalog, args, format).await,
        Command::Update(args) => cmd_update(catalog, args, format).await,
        Command::Delete(args) => cmd_delete(catalog, args).await,
        Command::Config => Ok(()),
    }
}

// ---- add ----

async fn cmd_add(
    catalog: &ContentCatalog,
    entity: EntityArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match entity {
        EntityArgs::Client(args) => {
            let fields = ClientFields {
                name: required(args.name, "name")?,
                website: required(args.website, "website")?,
                category: args.category.unwrap_or(PartnerCategory::Client),
            };
            let upload = required_upload(args.file.as_deref()).await?;
            let record = catalog.clients.create(fields, upload).await?;
            report_saved(&record, "Created", format)
        }
        EntityArgs::Expert(args) => {
            let fields = ExpertFields {
                name: required(args.name, "name")?,
                role: required(args.role, "role")?,
                bio: args.bio.unwrap_or_default(),
            };
            let upload = required_upload(args.file.as_deref()).await?;
            let record = catalog.experts.create(fields, upload).await?;
            report_saved(&record, "Created", format)
        }
        EntityArgs::Project(args) => {
            let fields = ProjectFields {
                title: required(args.title, "title")?,
                description: required(args.description, "description")?,
                category: required(args.category, "category")?,
                technologies: args.technologies,
                link: args.link,
                github: args.github,
            };
            let upload = required_upload(args.file.as_deref()).await?;
            let record = catalog.projects.create(fields, upload).await?;
            report_saved(&record, "Created", format)
        }
        EntityArgs::Testimonial(args) => {
            let fields = TestimonialFields {
                name: required(args.name, "name")?,
                role: required(args.role, "role")?,
                company: required(args.company, "company")?,
                content: required(args.content, "content")?,
            };
            let upload = required_upload(args.file.as_deref()).await?;
            let record = catalog.testimonials.create(fields, upload).await?;
            report_saved(&record, "Created", format)
        }
    }
}

// ---- update ----

async fn cmd_update(
    catalog: &ContentCatalog,
    args: UpdateArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let id = DocumentId::new(args.id);
    match args.entity {
        EntityArgs::Client(a) => {
            let patch = ClientPatch {
                name: a.name,
                website: a.website,
                category: a.category,
            };
            let upload = optional_upload(a.file.as_deref()).await?;
            let record = catalog.clients.update(&id, patch, upload).await?;
            report_update(&id, &record, format)
        }
        EntityArgs::Expert(a) => {
            let patch = ExpertPatch {
                name: a.name,
                role: a.role,
                bio: a.bio,
            };
            let upload = optional_upload(a.file.as_deref()).await?;
            let record = catalog.experts.update(&id, patch, upload).await?;
            report_update(&id, &record, format)
        }
        EntityArgs::Project(a) => {
            let patch = ProjectPatch {
                title: a.title,
                description: a.description,
                category: a.category,
                technologies: (!a.technologies.is_empty()).then_some(a.technologies),
                link: a.link.map(Some),
                github: a.github.map(Some),
            };
            let upload = optional_upload(a.file.as_deref()).await?;
            let record = catalog.projects.update(&id, patch, upload).await?;
            report_update(&id, &record, format)
        }
        EntityArgs::Testimonial(a) => {
            let patch = TestimonialPatch {
                name: a.name,
                role: a.role,
                company: a.company,
                content: a.content,
            };
            let upload = optional_upload(a.file.as_deref()).await?;
            let record = catalog.testimonials.update(&id, patch, upload).await?;
            report_update(&id, &record, format)
        }
    }
}

// ---- list / show / delete ----

async fn cmd_list(
    catalog: &ContentCatalog,
    args: ListArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match args.kind {
        EntityKind::Client => {
            let filter = args
                .category
                .as_deref()
                .map(str::parse::<PartnerCategory>)
                .transpose()?;
            print_list(&catalog.clients.list(filter).await?, format)
        }
        EntityKind::Project => print_list(&catalog.projects.list(args.category).await?, format),
        EntityKind::Expert => {
            reject_category(&args)?;
            print_list(&catalog.experts.list(None).await?, format)
        }
        EntityKind::Testimonial => {
            reject_category(&args)?;
            print_list(&catalog.testimonials.list(None).await?, format)
        }
    }
}

async fn cmd_show(
    catalog: &ContentCatalog,
    args: TargetArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let id = DocumentId::new(args.id);
    match args.kind {
        EntityKind::Client => show_one(&catalog.clients, &id, format).await,
        EntityKind::Expert => show_one(&catalog.experts, &id, format).await,
        EntityKind::Project => show_one(&catalog.projects, &id, format).await,
        EntityKind::Testimonial => show_one(&catalog.testimonials, &id, format).await,
    }
}

async fn cmd_delete(catalog: &ContentCatalog, args: TargetArgs) -> anyhow::Result<()> {
    let id = DocumentId::new(args.id);
    match args.kind {
        EntityKind::Client => catalog.clients.delete(&id).await?,
        EntityKind::Expert => catalog.experts.delete(&id).await?,
        EntityKind::Project => catalog.projects.delete(&id).await?,
        EntityKind::Testimonial => catalog.testimonials.delete(&id).await?,
    }
    println!("{} Deleted {} {}", "✓".green().bold(), args.kind, id.to_string().yellow());
    Ok(())
}

async fn show_one<F: EntityFields>(
    repo: &EntityRepository<F>,
    id: &DocumentId,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let record = repo
        .get(id)
        .await?
        .ok_or_else(|| anyhow!("no {} with id {id}", F::KIND))?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Text => {
            println!("{} {}", F::KIND.to_string().bold(), record.id.to_string().yellow());
            for (key, value) in record.to_document()? {
                println!("  {}: {}", key.cyan(), display_value(&value));
            }
        }
    }
    Ok(())
}

// ---- helpers ----

fn required(value: Option<String>, flag: &str) -> anyhow::Result<String> {
    value.ok_or_else(|| anyhow!("missing required --{flag}"))
}

fn reject_category(args: &ListArgs) -> anyhow::Result<()> {
    if args.category.is_some() {
        bail!("{} records have no category", args.kind);
    }
    Ok(())
}

async fn required_upload(path: Option<&Path>) -> anyhow::Result<AssetUpload> {
    match path {
        Some(path) => read_upload(path).await,
        None => bail!("an image file is required (--file)"),
    }
}

async fn optional_upload(path: Option<&Path>) -> anyhow::Result<Option<AssetUpload>> {
    match path {
        Some(path) => Ok(Some(read_upload(path).await?)),
        None => Ok(None),
    }
}

/// Read a local file as an upload, declaring its type from the extension.
async fn read_upload(path: &Path) -> anyhow::Result<AssetUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(AssetUpload::new(
        file_name,
        content_type_for_path(path),
        bytes,
    ))
}

fn report_saved<F: EntityFields>(
    record: &Record<F>,
    verb: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => {
            println!(
                "{} {verb} {} {}",
                "✓".green().bold(),
                F::KIND,
                record.id.to_string().yellow()
            );
            println!("  Asset: {}", record.asset_url.blue());
        }
    }
    Ok(())
}

fn report_update<F: EntityFields>(
    previous: &DocumentId,
    record: &Record<F>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    report_saved(record, "Updated", format)?;
    if format == OutputFormat::Text && &record.id != previous {
        println!(
            "  {} id changed from {}",
            "note:".yellow(),
            previous.to_string().dimmed()
        );
    }
    Ok(())
}

fn print_list<F: EntityFields>(records: &[Record<F>], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No {} records.", F::KIND);
            }
            for record in records {
                println!(
                    "{}  {}  {}",
                    record.id.to_string().yellow(),
                    vitrine_types::format_timestamp(&record.created_at).dimmed(),
                    headline(record)
                );
            }
        }
    }
    Ok(())
}

/// The record's `name` or `title`, whichever the kind has.
fn headline<F: EntityFields>(record: &Record<F>) -> String {
    let document = match record.to_document() {
        Ok(document) => document,
        Err(_) => return String::new(),
    };
    document
        .get("name")
        .or_else(|| document.get("title"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_repo::RepositoryConfig;

    fn write_png(dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        path
    }

    fn add_expert(file: Option<std::path::PathBuf>) -> Command {
        Command::Add(AddArgs {
            entity: EntityArgs::Expert(ExpertArgs {
                name: Some("Ada".into()),
                role: Some("Engineer".into()),
                bio: None,
                file,
            }),
        })
    }

    #[tokio::test]
    async fn add_requires_file() {
        let catalog = ContentCatalog::in_memory(RepositoryConfig::default());
        let err = run_with_catalog(&catalog, add_expert(None), OutputFormat::Text)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--file"));
    }

    #[tokio::test]
    async fn add_then_list_expert() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = ContentCatalog::in_memory(RepositoryConfig::default());
        let file = write_png(dir.path(), "ada.png");

        run_with_catalog(&catalog, add_expert(Some(file)), OutputFormat::Json)
            .await
            .unwrap();

        let experts = catalog.experts.list(None).await.unwrap();
        assert_eq!(experts.len(), 1);
        assert_eq!(experts[0].fields.name, "Ada");
        assert!(experts[0].asset_url.ends_with(".png"));
    }

    #[tokio::test]
    async fn text_upload_surfaces_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bio.txt");
        std::fs::write(&file, b"hello").unwrap();
        let catalog = ContentCatalog::in_memory(RepositoryConfig::default());

        let err = run_with_catalog(&catalog, add_expert(Some(file)), OutputFormat::Text)
            .await
            .unwrap_err();
        let repo_err = err.downcast_ref::<vitrine_repo::RepoError>().unwrap();
        assert!(repo_err.is_validation());
    }

    #[tokio::test]
    async fn category_rejected_for_experts() {
        let catalog = ContentCatalog::in_memory(RepositoryConfig::default());
        let command = Command::List(ListArgs {
            kind: EntityKind::Expert,
            category: Some("x".into()),
        });
        assert!(run_with_catalog(&catalog, command, OutputFormat::Text)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn update_project_technologies() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = ContentCatalog::in_memory(RepositoryConfig::default());
        let file = write_png(dir.path(), "shot.png");
        let created = catalog
            .projects
            .create(
                ProjectFields {
                    title: "Site".into(),
                    description: "Marketing site".into(),
                    category: "web".into(),
                    technologies: vec!["Rust".into()],
                    link: None,
                    github: None,
                },
                read_upload(&file).await.unwrap(),
            )
            .await
            .unwrap();

        let command = Command::Update(UpdateArgs {
            id: created.id.to_string(),
            entity: EntityArgs::Project(ProjectArgs {
                title: None,
                description: None,
                category: None,
                technologies: vec!["Rust".into(), "Axum".into()],
                link: None,
                github: None,
                file: None,
            }),
        });
        run_with_catalog(&catalog, command, OutputFormat::Text)
            .await
            .unwrap();

        let projects = catalog.projects.list(None).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].fields.technologies, vec!["Rust", "Axum"]);
        assert_eq!(projects[0].fields.title, "Site");
    }

    #[test]
    fn headline_prefers_name_then_title() {
        let record = Record {
            id: DocumentId::new("p"),
            created_at: vitrine_types::now(),
            asset_url: "u".into(),
            fields: ProjectFields {
                title: "Portal".into(),
                description: "d".into(),
                category: "web".into(),
                technologies: vec![],
                link: None,
                github: None,
            },
        };
        assert_eq!(headline(&record), "Portal");
    }
}
