//! AXS Engine
//!
//! Retrofits accessibility metadata onto existing HTML documents by
//! rewriting DOM attributes: table header cells gain `scope` and `id`,
//! data cells gain `headers` references to the header cells that describe
//! them.
//!
//! # Example
//! ```rust,ignore
//! use axs_dom::Document;
//! use axs_engine::{Remediator, RemediationConfig};
//!
//! let mut document = Document::new("about:blank");
//! let mut remediator = Remediator::new(RemediationConfig::default());
//! let report = remediator.remediate_document(&mut document);
//! println!("fixed {} tables", report.tables);
//! ```

mod config;
mod remediate;

pub use config::RemediationConfig;
pub use remediate::{RemediationReport, Remediator};

// Re-export sub-crates for advanced usage
pub use axs_a11y as a11y;
pub use axs_dom as dom;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Accessibility error: {0}")]
    A11y(#[from] axs_a11y::A11yError),
}
