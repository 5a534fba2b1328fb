pub mod assets;
pub mod changelog;
pub mod publisher;
pub mod signer;
pub mod version;

pub use publisher::{Outcome, ReleaseHost, ReleasePublisher, ReleaseRequest};
pub use signer::ExternalSigner;
pub use version::Version;
