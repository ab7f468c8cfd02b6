mod deploy;
pub use deploy::{DeployKind, ParseKindError};
