use anyhow::Result;
use clap::{Parser, Subcommand};
use fiberwork::commands::{catalog, entry};
use fiberwork::validation::{clap_id_validator, clap_reason_validator};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "
  ┌─┐┬┌┐ ┌─┐┬─┐┬ ┬┌─┐┬─┐┬┌─
  ├┤ │├┴┐├┤ ├┬┘││││ │├┬┘├┴┐
  └  ┴└─┘└─┘┴└─└┴┘└─┘┴└─┴ ┴

{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

#[derive(Parser)]
#[command(name = "fiberwork")]
#[command(about = "Fiber construction work-stage tracking and approval CLI", long_about = None)]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
#[command(subcommand_help_heading = "Commands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the construction stage catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },

    /// Submit and review work entries
    Entry {
        #[command(subcommand)]
        command: EntryCommands,
    },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// List all stages in progression order
    List {
        /// Display language (en, de, ru, uz, tr)
        #[arg(short, long, default_value = "en")]
        lang: String,

        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one stage with its full requirements
    Show {
        /// Stage code, e.g. stage_1_marking
        #[arg(value_parser = clap_id_validator)]
        code: String,

        /// Display language (en, de, ru, uz, tr)
        #[arg(short, long, default_value = "en")]
        lang: String,

        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the stages available for a new entry
    ///
    /// Without a stage code this lists the catalog's entry points; with
    /// one it lists the active successors of that stage.
    Next {
        /// Current stage code (omit for entry points)
        #[arg(value_parser = clap_id_validator)]
        code: Option<String>,

        /// Project the entry belongs to (reserved for per-project
        /// stage exclusions)
        #[arg(short, long, default_value = "default", value_parser = clap_id_validator)]
        project: String,

        /// Display language (en, de, ru, uz, tr)
        #[arg(short, long, default_value = "en")]
        lang: String,
    },

    /// Run the catalog structural self-check
    Check,
}

#[derive(Subcommand)]
enum EntryCommands {
    /// Validate a draft and persist it as a pending work entry
    Submit {
        /// Path to the draft JSON file
        draft_path: PathBuf,

        /// Emit the stored entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dry-run a draft against its stage's requirements
    Validate {
        /// Path to the draft JSON file
        draft_path: PathBuf,

        /// Emit the validation result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a stored work entry
    Show {
        /// Entry id (alphanumeric, dash, underscore only; max 128 characters)
        #[arg(value_parser = clap_id_validator)]
        entry_id: String,

        /// Emit the entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored work entries
    List {
        /// Filter by status (pending, approved, rejected)
        #[arg(short, long)]
        status: Option<String>,

        /// Emit the entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Approve a pending entry
    Approve {
        /// Entry id (alphanumeric, dash, underscore only; max 128 characters)
        #[arg(value_parser = clap_id_validator)]
        entry_id: String,

        /// Approver identifier
        #[arg(long = "by", value_parser = clap_id_validator)]
        approver: String,
    },

    /// Reject a pending entry with a reason
    Reject {
        /// Entry id (alphanumeric, dash, underscore only; max 128 characters)
        #[arg(value_parser = clap_id_validator)]
        entry_id: String,

        /// Approver identifier
        #[arg(long = "by", value_parser = clap_id_validator)]
        approver: String,

        /// Reason for the rejection (max 500 characters)
        #[arg(short, long, value_parser = clap_reason_validator)]
        reason: String,

        /// Evidence photo to attach (can be repeated)
        #[arg(long = "photo", value_name = "PATH")]
        photos: Vec<PathBuf>,
    },

    /// Return a rejected entry to pending for another review round
    Resubmit {
        /// Entry id (alphanumeric, dash, underscore only; max 128 characters)
        #[arg(value_parser = clap_id_validator)]
        entry_id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog { command } => match command {
            CatalogCommands::List { lang, json } => catalog::list(&lang, json),
            CatalogCommands::Show { code, lang, json } => catalog::show(&code, &lang, json),
            CatalogCommands::Next {
                code,
                project,
                lang,
            } => catalog::next(code.as_deref(), &project, &lang),
            CatalogCommands::Check => catalog::check(),
        },
        Commands::Entry { command } => match command {
            EntryCommands::Submit { draft_path, json } => entry::submit(&draft_path, json),
            EntryCommands::Validate { draft_path, json } => entry::validate(&draft_path, json),
            EntryCommands::Show { entry_id, json } => entry::show(&entry_id, json),
            EntryCommands::List { status, json } => entry::list(status.as_deref(), json),
            EntryCommands::Approve { entry_id, approver } => entry::approve(&entry_id, &approver),
            EntryCommands::Reject {
                entry_id,
                approver,
                reason,
                photos,
            } => entry::reject(&entry_id, &approver, &reason, photos),
            EntryCommands::Resubmit { entry_id } => entry::resubmit(&entry_id),
        },
    }
}
