use sitecraft_core::{outstanding_tasks, strip_images};
use sitecraft_logging::site_info;

use crate::model::{generate_structured, ModelClient};
use crate::prompts;
use crate::{FlowError, SuggestionResult};

/// Ask the model for improvement tasks and keep the ones not yet done.
///
/// Inline images are replaced with a generic marker first; the model does
/// not need the pixels to judge structure and content.
pub async fn suggest_improvements(
    client: &dyn ModelClient,
    html: &str,
) -> Result<SuggestionResult, FlowError> {
    let stripped = strip_images(html);
    site_info!(
        "suggest: analysing {} bytes ({} before stripping images)",
        stripped.len(),
        html.len()
    );

    let output: SuggestionResult = generate_structured(
        client,
        &prompts::suggest_prompt(&stripped),
        &prompts::suggest_schema(),
    )
    .await?;

    let proposed = output.tasks.len();
    let tasks = outstanding_tasks(output.tasks);
    site_info!(
        "suggest: {} tasks proposed, {} outstanding",
        proposed,
        tasks.len()
    );
    Ok(SuggestionResult { tasks })
}
