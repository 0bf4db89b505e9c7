//! Core form service structure and shared guards.
//!
//! Holds the [`FormService`] struct, its constructors, and the lookups and
//! checks that template and record operations have in common.

use super::builder::{FormServiceBuilder, FormServiceConfig};
use crate::context::RequestContext;
use crate::error::{FormError, FormResult, SchemaError};
use crate::repository::{FormRepository, TEMPLATE_COLLECTION};
use crate::schema::Template;
use log::debug;

/// Form template and record operations over an injected repository.
///
/// Applies schema normalization, mutation guards, ownership scoping and
/// record validation before anything is written. Every operation resolves
/// its tenant from the [`RequestContext`], falling back to the configured
/// default tenant.
///
/// # Examples
///
/// ```rust
/// use form_records::context::RequestContext;
/// use form_records::repository::StandardFormRepository;
/// use form_records::schema::{FieldDraft, TemplateDraft};
/// use form_records::service::FormService;
/// use form_records::storage::InMemoryStorage;
/// use serde_json::{Map, Value};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = FormService::new(StandardFormRepository::new(InMemoryStorage::new()));
/// let context = RequestContext::for_user("alice");
///
/// let template = service
///     .create_template(
///         &context,
///         TemplateDraft::new("Onboarding").with_field(FieldDraft::new("TEXT", "Name").required()),
///     )
///     .await?;
///
/// let mut data = Map::new();
/// data.insert(template.fields()[0].id.clone(), Value::from("Ann"));
///
/// let record = service
///     .create_record(&context, &template.id, Value::Object(data))
///     .await?;
/// assert_eq!(record.display_name, "Ann");
/// # Ok(())
/// # }
/// ```
pub struct FormService<R> {
    pub(super) repository: R,
    pub(super) config: FormServiceConfig,
}

impl<R: FormRepository> FormService<R> {
    /// Create a service with the default configuration.
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, FormServiceConfig::default())
    }

    /// Create a service with an explicit configuration.
    ///
    /// The configuration is taken as given; use [`FormService::builder`] to
    /// have it validated.
    pub fn with_config(repository: R, config: FormServiceConfig) -> Self {
        Self { repository, config }
    }

    pub fn builder(repository: R) -> FormServiceBuilder<R> {
        FormServiceBuilder::new(repository)
    }

    pub fn config(&self) -> &FormServiceConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Tenant the request operates in.
    pub(super) fn tenant<'a>(&'a self, context: &'a RequestContext) -> &'a str {
        context
            .tenant_id()
            .unwrap_or(self.config.default_tenant.as_str())
    }

    /// A template owned by the acting user, or `NotFound`.
    pub(super) async fn owned_template(
        &self,
        context: &RequestContext,
        template_id: &str,
    ) -> FormResult<Template> {
        match self
            .repository
            .get_template(self.tenant(context), template_id)
            .await?
        {
            Some(template) if context.is_user(&template.owner) => Ok(template),
            Some(_) => {
                debug!(
                    "Template {} hidden from user '{}' [{}]",
                    template_id, context.user_id, context.request_id
                );
                Err(FormError::not_found(TEMPLATE_COLLECTION, template_id))
            }
            None => Err(FormError::not_found(TEMPLATE_COLLECTION, template_id)),
        }
    }

    /// A template whose fields the acting user wants to change.
    ///
    /// Missing templates are `NotFound`; templates of other users are an
    /// authorization failure naming the attempted `action`.
    pub(super) async fn template_for_field_change(
        &self,
        context: &RequestContext,
        template_id: &str,
        action: &str,
    ) -> FormResult<Template> {
        let template = self
            .repository
            .get_template(self.tenant(context), template_id)
            .await?
            .ok_or_else(|| FormError::not_found(TEMPLATE_COLLECTION, template_id))?;

        if !context.is_user(&template.owner) {
            return Err(FormError::authorization(format!(
                "You do not have permission to {} this form template.",
                action
            )));
        }

        Ok(template)
    }

    /// Fail with `Conflict` if another active template of the same owner
    /// already uses `name`, compared case-insensitively.
    pub(super) async fn ensure_unique_name(
        &self,
        context: &RequestContext,
        name: &str,
        exclude_id: Option<&str>,
    ) -> FormResult<()> {
        let wanted = name.to_lowercase();
        let taken = self
            .repository
            .find_templates_by_owner(self.tenant(context), &context.user_id)
            .await?
            .into_iter()
            .any(|template| {
                template.is_active
                    && Some(template.id.as_str()) != exclude_id
                    && template.name.trim().to_lowercase() == wanted
            });

        if taken {
            return Err(FormError::conflict(name));
        }
        Ok(())
    }

    /// Fail if a template would hold more than the configured field limit.
    pub(super) fn ensure_field_capacity(&self, field_count: usize) -> FormResult<()> {
        match self.config.max_fields_per_template {
            Some(limit) if field_count > limit => {
                Err(SchemaError::TooManyFields { limit }.into())
            }
            _ => Ok(()),
        }
    }
}
