//! Module-embedding transform for the nook fixture explorer.
//!
//! Rewrites the placeholder tokens of the user-modules entry template into
//! executable module-loading expressions (`require(...)`,
//! `require.context(...)`) based on a discovered fixture-to-component
//! mapping.
//!
//! The transform is split in two (instead of one string-splicing pass):
//! [`ModuleEmbeds::build`] computes each placeholder's expression text as a
//! structured value, and [`embed_modules`] substitutes them into a template.
//! Whitespace in the emitted expressions is insignificant.

mod embeds;
mod template;

pub use embeds::{DependencyTracker, ModuleEmbeds};
pub use template::{embed_modules, placeholders, USER_MODULES_TEMPLATE};
