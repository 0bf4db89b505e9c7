//! Request context for form service operations.
//!
//! Every service call carries the acting user, a request id for log
//! correlation and an optional tenant. Authentication happens upstream; the
//! context is trusted as given.

use uuid::Uuid;

/// Request context for form service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Unique identifier for this request
    pub request_id: String,
    /// Authenticated user performing the operation
    pub user_id: String,
    /// Tenant scope; the service default applies when absent
    pub tenant_id: Option<String>,
}

impl RequestContext {
    /// Create a context with a specific request id.
    pub fn new(request_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            user_id: user_id.into(),
            tenant_id: None,
        }
    }

    /// Create a context for `user_id` with a generated request id.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), user_id)
    }

    /// Scope the context to a tenant.
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Whether the context names `user_id` as the acting user.
    pub fn is_user(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
