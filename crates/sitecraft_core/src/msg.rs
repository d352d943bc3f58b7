#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Caller handed over a document and a change request.
    Start { html: String, request: String },
    /// The model returned a full replacement document.
    RewriteSucceeded(String),
    /// The rewrite call produced nothing usable.
    RewriteFailed { reason: String },
    /// Every image generation settled; entries follow prompt order and `None`
    /// marks a failed generation.
    ImagesGenerated(Vec<Option<String>>),
    /// The caller received the finished document.
    Delivered,
}
