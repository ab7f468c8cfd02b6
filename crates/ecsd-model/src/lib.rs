//! Data model shared by the ecsd crates.
//!
//! Wire-facing types follow the camelCase field naming of the ECS JSON protocol.
//! Fields the deployment logic never reads are optional, and unknown fields are ignored on decode.

mod domain;
pub use domain::*;

mod kind;
pub use kind::*;

mod spec;
pub use spec::*;

mod api;
pub use api::*;
