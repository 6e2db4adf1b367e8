//! Data types shared by the serializers, the asset resolver and delivery.

mod artifact;
mod snapshot;

pub use artifact::*;
pub use snapshot::*;
