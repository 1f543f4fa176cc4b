//! Terminal output helpers
//!
//! Styled output on a terminal, plain `[OK]`/`[WARN]` prefixes when piped or
//! running in CI.
//!
//! ```rust,ignore
//! use fileicons::ui::{self, UiContext};
//!
//! let ctx = UiContext::detect();
//! ui::section(&ctx, "Icon cache");
//! ui::key_value(&ctx, "Entries", "42");
//! ui::step_ok(&ctx, "Cache cleared");
//! ```

mod context;
mod output;

pub use context::UiContext;
pub use output::{key_value, section, step_info, step_ok, step_ok_detail, step_warn_hint};
