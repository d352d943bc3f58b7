//! Instruction texts and response schemas for each flow.
//!
//! The placeholder and image-prompt conventions spelled out in
//! [`refine_prompt`] are the wire format between the core codec and the
//! model; change them together with `sitecraft_core` or not at all.

use serde_json::{json, Value};
use sitecraft_core::placeholder_src;

pub fn refine_prompt(html: &str, request: &str) -> String {
    let example_placeholder = placeholder_src(0);
    format!(
        r#"You are a senior web developer and designer. Modify the HTML document below according to the user's request.

The request may be a single instruction or several instructions joined together. Apply every one of them.
Return the whole, self-contained HTML document with all changes applied. Never return a fragment, a diff or an explanation.

Image rules:
1. Existing images appear as placeholders such as {example_placeholder}. Keep every placeholder exactly as written. Do not renumber, reword or remove one unless the element that holds it is deliberately removed.
2. When a new image is needed, write its source as src="image-prompt:<a descriptive prompt for the image>", for example src="image-prompt:a fluffy ginger cat asleep in a patch of sunlight". Do not use any other placeholder service or made-up URL.

User request: "{request}"

Current HTML:
```html
{html}
```
"#
    )
}

pub fn refine_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "refinedHtmlContent": {
                "type": "STRING",
                "description": "The complete updated HTML document."
            }
        },
        "required": ["refinedHtmlContent"]
    })
}

pub fn site_prompt(business_type: &str, media_library_urls: &[String]) -> String {
    let media = if media_library_urls.is_empty() {
        "None. Every image must be requested with an image-prompt source.".to_string()
    } else {
        media_library_urls
            .iter()
            .map(|url| format!("- {url}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        r#"You are an expert web designer. Build a complete, modern, responsive single-page website for the business described below.

Return one self-contained HTML document with inline CSS in a <style> element. Include a header with navigation, a hero section, sections describing what the business offers, an about section, a contact section and a footer. Navigation links must point at sections that exist on the page.

Images:
1. Use the library images listed below where they fit, with their URLs exactly as given.
2. For any other image, write its source as src="image-prompt:<a descriptive prompt for the image>". Do not use any other placeholder service or made-up URL.

Business: "{business_type}"

Library images:
{media}
"#
    )
}

pub fn site_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "htmlContent": {
                "type": "STRING",
                "description": "The complete HTML document."
            }
        },
        "required": ["htmlContent"]
    })
}

pub fn suggest_prompt(html: &str) -> String {
    format!(
        r#"You are an experienced web developer and project manager. Review the single-page website below and work out what is missing or unfinished.

Look for:
- sections linked from the navigation that are empty or thin;
- missing functionality, such as a contact section without a form or calls to action that lead nowhere;
- generic copy that should carry details specific to this business;
- places where visual elements like a gallery or testimonials would help.

Turn each finding into one clear, actionable task, for example "Add a contact form with Name, Email and Message fields to the Contact section".
Give every task a unique id such as "task-1". Set isCompleted to true only when the HTML already fully addresses the task; otherwise set it to false.

Current HTML:
```html
{html}
```
"#
    )
}

pub fn suggest_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "tasks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "isCompleted": { "type": "BOOLEAN" }
                    },
                    "required": ["id", "description", "isCompleted"]
                }
            }
        },
        "required": ["tasks"]
    })
}

pub fn section_prompt(section_type: &str, short_description: &str, keywords: &str) -> String {
    format!(
        r#"You write website copy. Using the business description and section type below, write engaging, well-structured content for that section of a professional website.

Business description: {short_description}
Section type: {section_type}
Keywords: {keywords}

Return a title for the section and its content.
"#
    )
}

pub fn section_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": { "type": "STRING" }
        },
        "required": ["title", "content"]
    })
}

pub fn seo_prompt(content: &str, focus_keyword: &str) -> String {
    format!(
        r#"You are a search engine optimisation specialist. Analyse the page content below.

Content: {content}
Focus keyword: {focus_keyword}

Return an optimised page title, an optimised meta description, a list of suggested keywords and concrete suggestions for improving the content.
"#
    )
}

pub fn seo_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "metaDescription": { "type": "STRING" },
            "keywords": { "type": "ARRAY", "items": { "type": "STRING" } },
            "contentSuggestions": { "type": "STRING" }
        },
        "required": ["title", "metaDescription", "keywords", "contentSuggestions"]
    })
}

pub fn guidance_prompt(website_description: &str, current_website_state: &str) -> String {
    format!(
        r#"You advise people building websites. Given what the site is for and where it stands now, give specific, actionable suggestions covering layout, image optimisation, content strategy and SEO.

Website description: {website_description}
Current state: {current_website_state}
"#
    )
}

pub fn guidance_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "guidance": { "type": "STRING" }
        },
        "required": ["guidance"]
    })
}
