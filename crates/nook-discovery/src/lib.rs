//! Component and fixture discovery for the nook fixture explorer.
//!
//! A *fixture* is a sample input (props/state) used to render a single
//! component in isolation. This crate defines the data model shared by the
//! rest of the workspace and the [`FixtureDiscovery`] boundary behind which
//! discovery implementations live.
//!
//! The built-in [`FsFixtureDiscovery`] scans configured component paths on
//! disk. Alternative implementations (test doubles, editor integrations)
//! only need to implement the trait.

mod error;
mod fs;
mod model;

pub use error::{DiscoveryError, Result};
pub use fs::FsFixtureDiscovery;
pub use model::{
    ComponentMapping, ComponentRef, DiscoveryOutput, FixtureFile, FixtureMapping,
};

/// Capability for discovering components and their fixture files.
///
/// Implementations produce a read-only [`DiscoveryOutput`]; consumers never
/// mutate the mapping.
pub trait FixtureDiscovery: Send + Sync {
    /// Discover components and fixtures.
    fn discover(&self) -> Result<DiscoveryOutput>;
}
