//! Identity verification seam.
//!
//! The server does not implement an identity provider; it verifies bearer
//! credentials against one. `Ok(Some(user_id))` is a valid credential,
//! `Ok(None)` an invalid or expired one (the caller's fault, 401), and
//! `Err` a failure of the identity service itself (not the caller's fault).

use std::future::Future;
use std::pin::Pin;

use synthik_types::error::IdentityError;

/// Trait for credential verification backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The
/// implementation lives in synthik-infra (`HttpIdentityVerifier`).
pub trait IdentityVerifier: Send + Sync {
    /// Resolve a bearer credential to a user id.
    fn verify(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<String>, IdentityError>> + Send;
}

/// Object-safe version of [`IdentityVerifier`] with boxed futures.
pub trait IdentityVerifierDyn: Send + Sync {
    fn verify_boxed<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, IdentityError>> + Send + 'a>>;
}

/// Blanket implementation: any `IdentityVerifier` automatically implements
/// `IdentityVerifierDyn`.
impl<T: IdentityVerifier> IdentityVerifierDyn for T {
    fn verify_boxed<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, IdentityError>> + Send + 'a>> {
        Box::pin(self.verify(token))
    }
}

/// Type-erased identity verifier for application state and test doubles.
pub struct BoxIdentityVerifier {
    inner: Box<dyn IdentityVerifierDyn + Send + Sync>,
}

impl BoxIdentityVerifier {
    /// Wrap a concrete `IdentityVerifier` in a type-erased box.
    pub fn new<T: IdentityVerifier + 'static>(verifier: T) -> Self {
        Self {
            inner: Box::new(verifier),
        }
    }

    /// Resolve a bearer credential to a user id.
    pub async fn verify(&self, token: &str) -> Result<Option<String>, IdentityError> {
        self.inner.verify_boxed(token).await
    }
}
