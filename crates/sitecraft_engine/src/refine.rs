use std::collections::VecDeque;

use futures_util::future::join_all;
use serde::Deserialize;
use sitecraft_core::{
    collect_image_prompts, combine_task_requests, count_inline_images, splice_generated_images,
    update, Effect, Msg, RefineState, Task,
};
use sitecraft_logging::{site_debug, site_info, site_warn, truncate_for_log};

use crate::model::{generate_structured, ModelClient};
use crate::prompts;
use crate::{FailureKind, FlowError, ModelError, RefinementRequest, RefinementResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewriteOutput {
    refined_html_content: String,
}

/// Apply a natural-language change to a document.
///
/// Inline images are swapped for placeholders before the model sees the
/// document and restored afterwards; images the model asks for are generated
/// concurrently. Only a failed rewrite is reported as an error: image
/// problems resolve to the fallback image.
pub async fn refine_website(
    client: &dyn ModelClient,
    request: RefinementRequest,
) -> Result<RefinementResult, FlowError> {
    site_info!(
        "refine: {} bytes, {} inline images, request {:?}",
        request.html_content.len(),
        count_inline_images(&request.html_content),
        truncate_for_log(&request.request, 120)
    );

    let mut state = RefineState::new();
    let mut inbox = VecDeque::from([Msg::Start {
        html: request.html_content,
        request: request.request,
    }]);
    let mut rewrite_error: Option<ModelError> = None;

    while let Some(msg) = inbox.pop_front() {
        let (next, effects) = update(state, msg);
        state = next;
        for effect in effects {
            match effect {
                Effect::RequestRewrite { html, request } => {
                    match rewrite_html(client, &html, &request).await {
                        Ok(rewritten) => inbox.push_back(Msg::RewriteSucceeded(rewritten)),
                        Err(err) => {
                            inbox.push_back(Msg::RewriteFailed {
                                reason: err.to_string(),
                            });
                            rewrite_error = Some(err);
                        }
                    }
                }
                Effect::GenerateImages { prompts } => {
                    let images = materialize_images(client, &prompts).await;
                    inbox.push_back(Msg::ImagesGenerated(images));
                }
                Effect::Deliver { html } => {
                    let (done, _) = update(state, Msg::Delivered);
                    site_info!(
                        "refine: delivered {} bytes at stage {:?}",
                        html.len(),
                        done.stage()
                    );
                    return Ok(RefinementResult {
                        refined_html_content: html,
                    });
                }
                Effect::Abort { reason } => {
                    let err = rewrite_error
                        .take()
                        .unwrap_or_else(|| ModelError::new(FailureKind::EmptyResponse, reason));
                    return Err(FlowError::Generation(err));
                }
            }
        }
    }

    // Every path through `update` ends in Deliver or Abort, so the inbox only
    // drains here if the machine gains a stage that does neither.
    Err(FlowError::Generation(ModelError::new(
        FailureKind::EmptyResponse,
        format!("refinement stalled at stage {:?}", state.stage()),
    )))
}

/// Apply the selected tasks from a list the user has already seen.
///
/// The descriptions are combined in list order into one request; the model
/// is not asked for tasks again. `Ok(None)` means no selected id names a task
/// in `tasks`, and nothing was sent.
pub async fn apply_selected_tasks(
    client: &dyn ModelClient,
    html: &str,
    tasks: &[Task],
    selected_ids: &[String],
) -> Result<Option<RefinementResult>, FlowError> {
    let request = combine_task_requests(tasks, selected_ids);
    if request.trim().is_empty() {
        site_warn!(
            "none of {} selected ids match the {} known tasks",
            selected_ids.len(),
            tasks.len()
        );
        return Ok(None);
    }
    refine_website(
        client,
        RefinementRequest {
            html_content: html.to_string(),
            request,
        },
    )
    .await
    .map(Some)
}

/// One rewrite call: the placeholder-encoded document plus the change, in;
/// the complete replacement document, out. No retries.
pub async fn rewrite_html(
    client: &dyn ModelClient,
    html: &str,
    request: &str,
) -> Result<String, ModelError> {
    let prompt = prompts::refine_prompt(html, request);
    let output: RewriteOutput =
        generate_structured(client, &prompt, &prompts::refine_schema()).await?;
    if output.refined_html_content.trim().is_empty() {
        return Err(ModelError::new(
            FailureKind::EmptyResponse,
            "model returned an empty document",
        ));
    }
    site_debug!(
        "rewrite returned {} bytes",
        output.refined_html_content.len()
    );
    Ok(output.refined_html_content)
}

/// Resolve every `image-prompt:` token in `html`. Tokens that could not be
/// generated get the fallback image; a document without tokens comes back
/// unchanged with no calls made.
pub async fn materialize_html(client: &dyn ModelClient, html: &str) -> String {
    let prompts = collect_image_prompts(html);
    if prompts.is_empty() {
        return html.to_string();
    }
    let images = materialize_images(client, &prompts).await;
    splice_generated_images(html, &images)
}

/// Generate one image per prompt, all at once, and wait for every call.
///
/// The result has one entry per prompt in prompt order, whatever order the
/// calls finish in; `None` marks a failed generation.
pub async fn materialize_images(
    client: &dyn ModelClient,
    prompts: &[String],
) -> Vec<Option<String>> {
    if prompts.is_empty() {
        return Vec::new();
    }
    site_info!("generating {} images", prompts.len());

    let calls = prompts.iter().enumerate().map(|(position, prompt)| async move {
        match client.generate_image(prompt).await {
            Ok(reference) => Some(reference),
            Err(err) => {
                site_warn!(
                    "image {} ({:?}) failed, using fallback: {}",
                    position,
                    truncate_for_log(prompt, 80),
                    err
                );
                None
            }
        }
    });
    join_all(calls).await
}
