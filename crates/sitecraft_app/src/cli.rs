use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "sitecraft",
    version,
    about = "Generate and refine single-page websites with a generative model"
)]
pub(crate) struct Cli {
    /// RON config file (default: ./sitecraft.ron)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Where log output goes; overrides the config file
    #[arg(long, value_enum, global = true)]
    pub log: Option<LogDestination>,
    /// Log at debug level
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Generate a new single-page site for a business
    Create(CreateArgs),
    /// Apply a natural-language change to an HTML document
    Refine(RefineArgs),
    /// List outstanding improvement tasks for an HTML document as JSON
    Suggest(SuggestArgs),
    /// Apply tasks picked from the output of `suggest` in one refinement
    #[command(name = "apply-tasks")]
    ApplyTasks(ApplyTasksArgs),
    /// Write copy for one section of a site
    Section(SectionArgs),
    /// Review page content for search engines
    Seo(SeoArgs),
    /// Advice on what to build next
    Guidance(GuidanceArgs),
}

#[derive(Debug, Args)]
pub(crate) struct OutputArgs {
    /// Write the result to this file
    #[arg(long, conflicts_with = "out_dir")]
    pub output: Option<PathBuf>,
    /// Write the result into this directory under a name derived from its title
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct CreateArgs {
    /// What the business does
    #[arg(long)]
    pub business_type: String,
    /// URL of a library image the site should use; repeat for several
    #[arg(long = "media")]
    pub media: Vec<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub(crate) struct RefineArgs {
    /// HTML document to refine
    #[arg(long)]
    pub input: PathBuf,
    /// The change to make, in plain language
    #[arg(long)]
    pub request: String,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub(crate) struct SuggestArgs {
    /// HTML document to review
    #[arg(long)]
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub(crate) struct ApplyTasksArgs {
    /// HTML document to refine
    #[arg(long)]
    pub input: PathBuf,
    /// JSON written by `suggest` for this document
    #[arg(long)]
    pub tasks_file: PathBuf,
    /// Id of a suggested task to apply; repeat for several
    #[arg(long = "task", required = true)]
    pub tasks: Vec<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub(crate) struct SectionArgs {
    /// Kind of section, for example "About Us"
    #[arg(long)]
    pub section_type: String,
    /// Short description of the business or site
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub keywords: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct SeoArgs {
    /// HTML or text file with the page content
    #[arg(long)]
    pub input: PathBuf,
    #[arg(long)]
    pub focus_keyword: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct GuidanceArgs {
    /// What the site is for
    #[arg(long)]
    pub description: String,
    /// What the site has so far
    #[arg(long)]
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refine_with_global_flags_parses() {
        let cli = Cli::try_parse_from([
            "sitecraft",
            "refine",
            "--input",
            "site.html",
            "--request",
            "make it blue",
            "--out-dir",
            "out",
            "--log",
            "both",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log, Some(LogDestination::Both));
        match cli.command {
            Command::Refine(args) => {
                assert_eq!(args.request, "make it blue");
                assert_eq!(args.output.out_dir, Some(PathBuf::from("out")));
                assert!(args.output.output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn output_and_out_dir_conflict() {
        let result = Cli::try_parse_from([
            "sitecraft",
            "refine",
            "--input",
            "a.html",
            "--request",
            "x",
            "--output",
            "b.html",
            "--out-dir",
            "out",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn apply_tasks_collects_repeated_ids() {
        let cli = Cli::try_parse_from([
            "sitecraft",
            "apply-tasks",
            "--input",
            "a.html",
            "--tasks-file",
            "tasks.json",
            "--task",
            "task-1",
            "--task",
            "task-3",
        ])
        .unwrap();
        match cli.command {
            Command::ApplyTasks(args) => {
                assert_eq!(args.tasks_file, PathBuf::from("tasks.json"));
                assert_eq!(args.tasks, vec!["task-1", "task-3"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn apply_tasks_needs_a_task() {
        assert!(Cli::try_parse_from([
            "sitecraft",
            "apply-tasks",
            "--input",
            "a.html",
            "--tasks-file",
            "tasks.json",
        ])
        .is_err());
    }

    #[test]
    fn create_collects_media_urls() {
        let cli = Cli::try_parse_from([
            "sitecraft",
            "create",
            "--business-type",
            "bakery",
            "--media",
            "https://cdn.example/a.jpg",
            "--media",
            "https://cdn.example/b.jpg",
        ])
        .unwrap();
        match cli.command {
            Command::Create(args) => {
                assert_eq!(args.business_type, "bakery");
                assert_eq!(args.media.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
