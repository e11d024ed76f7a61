//! Confirmation prompts for row actions.

use std::sync::Arc;

use lending_business::{AutoConfirm, Confirm};

/// Asks on the terminal; an interrupted or failed prompt counts as "no".
pub struct InquireConfirm;

impl Confirm for InquireConfirm {
    fn confirm(&self, message: &str) -> bool {
        inquire::Confirm::new(message)
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }
}

/// `--yes` skips the prompt, otherwise the operator is asked.
pub fn confirmer(yes: bool) -> Arc<dyn Confirm> {
    if yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(InquireConfirm)
    }
}
