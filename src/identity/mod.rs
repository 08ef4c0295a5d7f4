//! Request identity: token codec, credential verification, and the
//! per-request authentication context.
//! Keep the public surface thin and split implementation across sub-modules.

mod token;
mod credentials;
mod request_context;

pub use token::{Claims, TokenCodec};
pub use credentials::{CredentialCheck, SharedSecretCredentials};
pub use request_context::{context_for_headers, RequestContext};
