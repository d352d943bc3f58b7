use sitecraft_logging::{site_debug, site_warn};

use crate::codec::{encode_images, restore_images};
use crate::tokens::{collect_image_prompts, splice_generated_images};
use crate::{Effect, Msg, RefineState, Stage};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not belong to the current stage are ignored.
pub fn update(mut state: RefineState, msg: Msg) -> (RefineState, Vec<Effect>) {
    let effects = match msg {
        Msg::Start { html, request } => {
            if state.stage != Stage::Idle {
                return (state, Vec::new());
            }
            let encoded = encode_images(&html);
            site_debug!(
                "encoded document: {} bytes in, {} bytes out, {} inline images",
                html.len(),
                encoded.html.len(),
                encoded.original_images.len()
            );
            state.original_images = encoded.original_images;
            state.html = encoded.html;
            state.stage = Stage::Encoded;
            vec![Effect::RequestRewrite {
                html: state.html.clone(),
                request,
            }]
        }
        Msg::RewriteSucceeded(rewritten) => {
            if state.stage != Stage::Encoded {
                return (state, Vec::new());
            }
            state.stage = Stage::Rewritten;
            let prompts = collect_image_prompts(&rewritten);
            state.html = rewritten;
            if prompts.is_empty() {
                state.stage = Stage::Materialized;
                vec![reconcile(&mut state)]
            } else {
                state.pending_prompts = prompts.len();
                vec![Effect::GenerateImages { prompts }]
            }
        }
        Msg::RewriteFailed { reason } => {
            if state.stage != Stage::Encoded {
                return (state, Vec::new());
            }
            site_warn!("rewrite failed: {}", reason);
            state.stage = Stage::Failed;
            state.failure = Some(reason.clone());
            vec![Effect::Abort { reason }]
        }
        Msg::ImagesGenerated(images) => {
            if state.stage != Stage::Rewritten {
                return (state, Vec::new());
            }
            if images.len() != state.pending_prompts {
                site_warn!(
                    "expected {} generated images, got {}; missing ones use the fallback",
                    state.pending_prompts,
                    images.len()
                );
            }
            state.html = splice_generated_images(&state.html, &images);
            state.pending_prompts = 0;
            state.stage = Stage::Materialized;
            vec![reconcile(&mut state)]
        }
        Msg::Delivered => {
            if state.stage == Stage::Reconciled {
                state.stage = Stage::Done;
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn reconcile(state: &mut RefineState) -> Effect {
    state.html = restore_images(&state.html, &state.original_images);
    state.stage = Stage::Reconciled;
    Effect::Deliver {
        html: state.html.clone(),
    }
}
