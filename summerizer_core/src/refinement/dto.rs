use crate::summary::dto::Summary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefineOutcome {
    /// Empty prompt: the generate action is disabled, no call was issued.
    Blocked,
    Refined(Summary),
    /// The capability failed; `current` is unchanged.
    Failed(String),
    /// A reset or abandon happened while the call was pending.
    Superseded,
}
