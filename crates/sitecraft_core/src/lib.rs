//! Sitecraft core: placeholder codec, image-token splicing, task helpers and
//! the pure refinement state machine. No IO happens here.
mod codec;
mod effect;
mod msg;
mod state;
mod tasks;
mod tokens;
mod update;

pub use codec::{
    count_inline_images, encode_images, placeholder_src, restore_images, strip_images,
    EncodedHtml, FALLBACK_IMAGE_URL, STRIPPED_IMAGE_SRC,
};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{RefineState, Stage};
pub use tasks::{combine_task_requests, outstanding_tasks, Task, TASK_REQUEST_SEPARATOR};
pub use tokens::{collect_image_prompts, splice_generated_images};
pub use update::update;
