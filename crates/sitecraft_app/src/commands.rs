use std::fs;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sitecraft_engine::{
    apply_selected_tasks, decode_site_source, generate_section_content, generate_site,
    optimize_for_seo, refine_website, site_creation_guidance, site_output_filename, site_title,
    suggest_improvements, write_site_file, FailureKind, FlowError, GuidanceRequest, ModelClient,
    ModelError, RefinementRequest, SectionContentRequest, SeoRequest, SiteTemplateRequest,
    SiteWriter, SuggestionResult,
};
use sitecraft_logging::{site_info, site_warn};

use crate::cli::{
    ApplyTasksArgs, Command, CreateArgs, GuidanceArgs, OutputArgs, RefineArgs, SectionArgs, SeoArgs,
    SuggestArgs,
};

/// Run one subcommand against `client`, bounded by `budget`.
pub(crate) async fn run(command: Command, client: &dyn ModelClient, budget: Duration) -> Result<()> {
    match command {
        Command::Create(args) => create(args, client, budget).await,
        Command::Refine(args) => refine(args, client, budget).await,
        Command::Suggest(args) => suggest(args, client, budget).await,
        Command::ApplyTasks(args) => apply_tasks(args, client, budget).await,
        Command::Section(args) => section(args, client, budget).await,
        Command::Seo(args) => seo(args, client, budget).await,
        Command::Guidance(args) => guidance(args, client, budget).await,
    }
}

/// Refuse blank requests before anything reaches the model.
pub(crate) fn check_request(request: &str) -> Result<()> {
    if request.trim().is_empty() {
        bail!("the refinement request is empty");
    }
    Ok(())
}

async fn create(args: CreateArgs, client: &dyn ModelClient, budget: Duration) -> Result<()> {
    let request = SiteTemplateRequest {
        business_type: args.business_type,
        media_library_urls: args.media,
    };
    if request.business_type.trim().is_empty() {
        bail!("the business type is empty");
    }
    let site = within_budget(budget, generate_site(client, &request))
        .await
        .context("site generation failed")?;
    deliver(&site.html_content, &args.output)
}

async fn refine(args: RefineArgs, client: &dyn ModelClient, budget: Duration) -> Result<()> {
    check_request(&args.request)?;
    let html = read_site(&args.input)?;

    let result = within_budget(
        budget,
        refine_website(
            client,
            RefinementRequest {
                html_content: html,
                request: args.request,
            },
        ),
    )
    .await
    .context("refinement failed")?;

    deliver(&result.refined_html_content, &args.output)
}

async fn suggest(args: SuggestArgs, client: &dyn ModelClient, budget: Duration) -> Result<()> {
    let html = read_site(&args.input)?;
    let result = within_budget(budget, suggest_improvements(client, &html))
        .await
        .context("suggestion failed")?;
    print_json(&result)
}

async fn apply_tasks(
    args: ApplyTasksArgs,
    client: &dyn ModelClient,
    budget: Duration,
) -> Result<()> {
    let html = read_site(&args.input)?;
    let suggested = read_tasks(&args.tasks_file)?;

    let applied = within_budget(
        budget,
        apply_selected_tasks(client, &html, &suggested.tasks, &args.tasks),
    )
    .await
    .context("applying tasks failed")?;

    match applied {
        Some(result) => deliver(&result.refined_html_content, &args.output),
        None => bail!(
            "none of the selected tasks ({}) are in {}",
            args.tasks.join(", "),
            args.tasks_file.display()
        ),
    }
}

async fn section(args: SectionArgs, client: &dyn ModelClient, budget: Duration) -> Result<()> {
    let request = SectionContentRequest {
        section_type: args.section_type,
        short_description: args.description,
        keywords: args.keywords,
    };
    let content = within_budget(budget, generate_section_content(client, &request))
        .await
        .context("section generation failed")?;
    print_json(&content)
}

async fn seo(args: SeoArgs, client: &dyn ModelClient, budget: Duration) -> Result<()> {
    let request = SeoRequest {
        content: read_site(&args.input)?,
        focus_keyword: args.focus_keyword,
    };
    let report = within_budget(budget, optimize_for_seo(client, &request))
        .await
        .context("seo review failed")?;
    print_json(&report)
}

async fn guidance(args: GuidanceArgs, client: &dyn ModelClient, budget: Duration) -> Result<()> {
    let request = GuidanceRequest {
        website_description: args.description,
        current_website_state: args.state,
    };
    let guidance = within_budget(budget, site_creation_guidance(client, &request))
        .await
        .context("guidance failed")?;
    println!("{}", guidance.guidance);
    Ok(())
}

/// Expiry of the whole-command budget counts as a failed generation.
pub(crate) async fn within_budget<T, F>(budget: Duration, flow: F) -> Result<T, FlowError>
where
    F: Future<Output = Result<T, FlowError>>,
{
    match tokio::time::timeout(budget, flow).await {
        Ok(result) => result,
        Err(_) => {
            site_warn!("gave up after {:?}", budget);
            Err(FlowError::Generation(ModelError::new(
                FailureKind::Timeout,
                format!("no result within {}s", budget.as_secs()),
            )))
        }
    }
}

fn read_site(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let decoded =
        decode_site_source(&bytes).with_context(|| format!("decoding {}", path.display()))?;
    site_info!(
        "read {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        decoded.encoding_label
    );
    Ok(decoded.html)
}

/// Tasks as printed by `suggest`.
pub(crate) fn read_tasks(path: &Path) -> Result<SuggestionResult> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing tasks in {}", path.display()))
}

/// Write the document where the user asked, or print it.
fn deliver(html: &str, output: &OutputArgs) -> Result<()> {
    let written = match (&output.output, &output.out_dir) {
        (Some(path), _) => write_site_file(path, html)
            .with_context(|| format!("writing {}", path.display()))?,
        (None, Some(dir)) => {
            let filename = site_output_filename(site_title(html).as_deref(), html);
            SiteWriter::new(dir.clone())
                .write(&filename, html)
                .with_context(|| format!("writing into {}", dir.display()))?
        }
        (None, None) => {
            println!("{html}");
            return Ok(());
        }
    };
    println!("{}", written.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("rendering JSON")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_requests_are_refused() {
        assert!(check_request("").is_err());
        assert!(check_request(" \n\t").is_err());
        assert!(check_request("add a footer").is_ok());
    }

    #[test]
    fn tasks_file_round_trips_suggest_output() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(
            &path,
            r#"{ "tasks": [ { "id": "task-1", "description": "Add a contact form", "isCompleted": false } ] }"#,
        )
        .unwrap();

        let suggested = read_tasks(&path).unwrap();

        assert_eq!(suggested.tasks.len(), 1);
        assert_eq!(suggested.tasks[0].description, "Add a contact form");
    }

    #[test]
    fn malformed_tasks_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(read_tasks(&path).is_err());
    }

    #[tokio::test]
    async fn expired_budget_is_a_timeout_failure() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, FlowError>(())
        };
        let err = within_budget(Duration::from_millis(10), slow)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), &FailureKind::Timeout);
    }

    #[tokio::test]
    async fn finished_flow_passes_through() {
        let value = within_budget(Duration::from_secs(1), async { Ok::<_, FlowError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}
