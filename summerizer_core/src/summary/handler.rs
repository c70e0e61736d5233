use super::dto::Summary;

/// Displayed summary, the first one ever produced, and the prompt behind `current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryState {
    current: Summary,
    original: Summary,
    prompt: Option<String>,
}

impl SummaryState {
    pub fn new(original: Summary) -> Self {
        Self {
            current: original.clone(),
            original,
            prompt: None,
        }
    }

    pub fn current(&self) -> &Summary {
        &self.current
    }

    pub fn original(&self) -> &Summary {
        &self.original
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn apply(&mut self, summary: Summary, prompt: &str) {
        self.current = summary;
        self.prompt = Some(prompt.to_string());
    }

    pub fn reset(&mut self) -> &Summary {
        self.current = self.original.clone();
        self.prompt = None;
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str, point: &str) -> Summary {
        Summary::new(title, vec![point.to_string()], vec![point.to_string()]).unwrap()
    }

    #[test]
    fn test_apply_keeps_original() {
        let original = summary("report", "first");
        let mut state = SummaryState::new(original.clone());
        assert_eq!(state.current(), &original);
        assert_eq!(state.prompt(), None);

        state.apply(summary("report", "second"), "focus on risk");
        state.apply(summary("report", "third"), "focus on cost");

        assert_eq!(state.original(), &original);
        assert_eq!(state.current().quick_summary()[0], "third");
        assert_eq!(state.prompt(), Some("focus on cost"));
    }

    #[test]
    fn test_reset_restores_original_and_clears_prompt() {
        let original = summary("report", "first");
        let mut state = SummaryState::new(original.clone());
        state.apply(summary("report", "second"), "focus");

        assert_eq!(state.reset(), &original);
        assert_eq!(state.prompt(), None);
        assert_eq!(state.reset(), &original);
    }
}
