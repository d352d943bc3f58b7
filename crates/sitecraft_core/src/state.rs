/// Where a refinement invocation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    Encoded,
    Rewritten,
    Materialized,
    Reconciled,
    Done,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

/// State owned by a single refinement invocation. Nothing here is shared
/// between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RefineState {
    pub(crate) stage: Stage,
    pub(crate) original_images: Vec<String>,
    pub(crate) html: String,
    pub(crate) pending_prompts: usize,
    pub(crate) failure: Option<String>,
}

impl RefineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Images pulled out of the input document, indexed by placeholder number.
    pub fn original_images(&self) -> &[String] {
        &self.original_images
    }

    /// The working document for the current stage.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Image prompts awaiting generation while in [`Stage::Rewritten`].
    pub fn pending_prompts(&self) -> usize {
        self.pending_prompts
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}
