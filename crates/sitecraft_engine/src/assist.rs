//! Site generation from a business description, plus single-call writing
//! aids: section copy, SEO review and build guidance.

use serde::{Deserialize, Serialize};
use sitecraft_logging::site_info;

use crate::model::{generate_structured, ModelClient};
use crate::prompts;
use crate::refine::materialize_html;
use crate::{FailureKind, FlowError, ModelError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteTemplateRequest {
    /// What the business does, for example "artisan bakery in Lund".
    pub business_type: String,
    /// Images the site should use where they fit.
    #[serde(default)]
    pub media_library_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteTemplate {
    pub html_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionContentRequest {
    /// For example "About Us" or "Services".
    pub section_type: String,
    pub short_description: String,
    pub keywords: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionContent {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoRequest {
    pub content: String,
    pub focus_keyword: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport {
    pub title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub content_suggestions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceRequest {
    pub website_description: String,
    pub current_website_state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    pub guidance: String,
}

/// Generate a complete single-page site for a business.
///
/// Images the model asks for through `image-prompt:` tokens are generated
/// before returning, so the document never carries a token.
pub async fn generate_site(
    client: &dyn ModelClient,
    request: &SiteTemplateRequest,
) -> Result<SiteTemplate, FlowError> {
    site_info!(
        "create: {:?} with {} library images",
        request.business_type,
        request.media_library_urls.len()
    );
    let prompt = prompts::site_prompt(&request.business_type, &request.media_library_urls);
    let generated: SiteTemplate =
        generate_structured(client, &prompt, &prompts::site_schema()).await?;
    if generated.html_content.trim().is_empty() {
        return Err(ModelError::new(
            FailureKind::EmptyResponse,
            "model returned an empty document",
        )
        .into());
    }
    Ok(SiteTemplate {
        html_content: materialize_html(client, &generated.html_content).await,
    })
}

pub async fn generate_section_content(
    client: &dyn ModelClient,
    request: &SectionContentRequest,
) -> Result<SectionContent, FlowError> {
    site_info!("section: generating {:?}", request.section_type);
    let prompt = prompts::section_prompt(
        &request.section_type,
        &request.short_description,
        request.keywords.as_deref().unwrap_or(""),
    );
    Ok(generate_structured(client, &prompt, &prompts::section_schema()).await?)
}

pub async fn optimize_for_seo(
    client: &dyn ModelClient,
    request: &SeoRequest,
) -> Result<SeoReport, FlowError> {
    site_info!("seo: analysing {} bytes", request.content.len());
    let prompt = prompts::seo_prompt(
        &request.content,
        request.focus_keyword.as_deref().unwrap_or(""),
    );
    Ok(generate_structured(client, &prompt, &prompts::seo_schema()).await?)
}

pub async fn site_creation_guidance(
    client: &dyn ModelClient,
    request: &GuidanceRequest,
) -> Result<Guidance, FlowError> {
    let prompt = prompts::guidance_prompt(
        &request.website_description,
        &request.current_website_state,
    );
    Ok(generate_structured(client, &prompt, &prompts::guidance_schema()).await?)
}
