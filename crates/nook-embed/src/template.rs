//! Placeholder substitution into the entry-module template.

use crate::embeds::ModuleEmbeds;

/// The entry-module template shipped with nook.
///
/// Carries all five placeholders; callers may supply their own template
/// with any subset of them.
pub const USER_MODULES_TEMPLATE: &str = include_str!("../assets/user-modules.js");

/// Placeholder tokens recognized by [`embed_modules`].
pub mod placeholders {
    pub const FIXTURE_MODULES: &str = "FIXTURE_MODULES";
    pub const FIXTURE_FILES: &str = "FIXTURE_FILES";
    pub const DEPRECATED_COMPONENT_MODULES: &str = "DEPRECATED_COMPONENT_MODULES";
    pub const PROXIES: &str = "PROXIES";
    pub const CONTEXTS: &str = "CONTEXTS";
}

/// Rewrite a template's placeholder tokens into the embed expressions.
///
/// Each token is substituted at most once. A token absent from the template
/// is silently skipped; no error is raised.
pub fn embed_modules(template: &str, embeds: &ModuleEmbeds) -> String {
    let mut out = template.to_string();
    for (token, value) in [
        (
            placeholders::DEPRECATED_COMPONENT_MODULES,
            &embeds.deprecated_component_modules,
        ),
        (placeholders::FIXTURE_MODULES, &embeds.fixture_modules),
        (placeholders::FIXTURE_FILES, &embeds.fixture_files),
        (placeholders::PROXIES, &embeds.proxies),
        (placeholders::CONTEXTS, &embeds.contexts),
    ] {
        out = out.replacen(token, value, 1);
    }
    out
}
