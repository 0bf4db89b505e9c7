//! Builder pattern for configuring form service instances.

use super::core::FormService;
use crate::error::{FormError, FormResult};
use crate::repository::FormRepository;

/// Tenant used when a request context carries none.
pub const DEFAULT_TENANT: &str = "default";

/// Configuration for a [`FormService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormServiceConfig {
    /// Tenant applied to requests that do not name one.
    pub default_tenant: String,

    /// Upper bound on the number of fields in one template. Unlimited when
    /// `None`.
    pub max_fields_per_template: Option<usize>,

    /// Whether a template must be created with at least one field.
    pub require_initial_fields: bool,
}

impl Default for FormServiceConfig {
    fn default() -> Self {
        Self {
            default_tenant: DEFAULT_TENANT.to_string(),
            max_fields_per_template: None,
            require_initial_fields: true,
        }
    }
}

impl FormServiceConfig {
    pub fn with_default_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.default_tenant = tenant_id.into();
        self
    }

    pub fn with_max_fields(mut self, limit: usize) -> Self {
        self.max_fields_per_template = Some(limit);
        self
    }

    pub fn with_require_initial_fields(mut self, required: bool) -> Self {
        self.require_initial_fields = required;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> FormResult<()> {
        if self.default_tenant.trim().is_empty() {
            return Err(FormError::invalid_request("Default tenant cannot be empty"));
        }

        if self.max_fields_per_template == Some(0) {
            return Err(FormError::invalid_request(
                "Field limit must allow at least one field",
            ));
        }

        Ok(())
    }
}

/// Builder for configuring and creating [`FormService`] instances.
///
/// # Examples
///
/// ```rust
/// use form_records::repository::StandardFormRepository;
/// use form_records::service::FormService;
/// use form_records::storage::InMemoryStorage;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repository = StandardFormRepository::new(InMemoryStorage::new());
///
/// let service = FormService::builder(repository)
///     .with_default_tenant("acme")
///     .with_max_fields(50)
///     .build()?;
/// assert_eq!(service.config().default_tenant, "acme");
/// # Ok(())
/// # }
/// ```
pub struct FormServiceBuilder<R> {
    repository: R,
    config: FormServiceConfig,
}

impl<R: FormRepository> FormServiceBuilder<R> {
    /// Start from the default configuration.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            config: FormServiceConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: FormServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_default_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.config.default_tenant = tenant_id.into();
        self
    }

    pub fn with_max_fields(mut self, limit: usize) -> Self {
        self.config.max_fields_per_template = Some(limit);
        self
    }

    pub fn with_require_initial_fields(mut self, required: bool) -> Self {
        self.config.require_initial_fields = required;
        self
    }

    /// Build the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidRequest`] if the configuration is invalid.
    pub fn build(self) -> FormResult<FormService<R>> {
        self.config.validate()?;
        Ok(FormService::with_config(self.repository, self.config))
    }
}
