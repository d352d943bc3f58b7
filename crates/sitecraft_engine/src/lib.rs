//! Sitecraft engine: model client and the async flows built on it.
mod assist;
mod decode;
mod extract;
mod filename;
mod gemini;
mod model;
mod persist;
mod prompts;
mod refine;
mod settings;
mod suggest;
mod types;

pub use assist::{
    generate_section_content, generate_site, optimize_for_seo, site_creation_guidance, Guidance,
    GuidanceRequest, SectionContent, SectionContentRequest, SeoReport, SeoRequest, SiteTemplate,
    SiteTemplateRequest,
};
pub use decode::{decode_site_source, DecodeError, DecodedSite};
pub use extract::site_title;
pub use filename::{site_output_filename, site_slug};
pub use gemini::GeminiClient;
pub use model::{generate_structured, ModelClient};
pub use persist::{ensure_site_dir, write_site_file, SiteWriter, WriteError};
pub use refine::{
    apply_selected_tasks, materialize_html, materialize_images, refine_website, rewrite_html,
};
pub use settings::{ModelSettings, DEFAULT_API_BASE, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
pub use suggest::suggest_improvements;
pub use types::{
    FailureKind, FlowError, ModelError, RefinementRequest, RefinementResult, SuggestionResult,
};
