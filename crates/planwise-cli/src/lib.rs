//! Terminal front end for PlanWise

mod advisor;
mod ui;


pub use advisor::{EventAdvisor, FALLBACK_RESPONSE};
pub use ui::{
    display_banner, display_footer, display_plan, display_step, display_suggestion,
    parse_yes_no, progress_bar, PlanReport, Prompter, SuggestionOverrides,
};

// Re-export core types
pub use planwise_core::{Error, Result};
