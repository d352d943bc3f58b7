#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the placeholder document and request to the text model.
    RequestRewrite { html: String, request: String },
    /// Generate one image per prompt, concurrently, and report all results together.
    GenerateImages { prompts: Vec<String> },
    /// Hand the finished document back to the caller.
    Deliver { html: String },
    /// Stop the invocation; nothing is returned to the caller but the reason.
    Abort { reason: String },
}
