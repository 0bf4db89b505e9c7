//! Template and field operations.
//!
//! Templates are visible only to their owner. Field changes on a template
//! owned by someone else are rejected as unauthorized rather than hidden,
//! since templates are shared for record entry within a tenant.

use super::core::FormService;
use crate::context::RequestContext;
use crate::error::{FormError, FormResult, SchemaError};
use crate::repository::FormRepository;
use crate::schema::{
    FieldDefinition, FieldDraft, Template, TemplateDraft, TemplatePatch, normalize_template_name,
    validate_field_definition,
};
use log::{debug, info};

/// Criteria for listing templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    /// Only templates with this active flag
    pub is_active: Option<bool>,
}

impl TemplateFilter {
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
        }
    }

    fn matches(&self, template: &Template) -> bool {
        self.is_active.is_none_or(|active| template.is_active == active)
    }
}

impl<R: FormRepository> FormService<R> {
    /// Create a template together with its initial fields.
    ///
    /// The whole draft is checked before anything is stored: the name, the
    /// field count, every field definition (errors carry the 1-based field
    /// position) and the owner-scoped name uniqueness. Initial fields take
    /// their 0-based position in the draft as order; a draft order is ignored.
    pub async fn create_template(
        &self,
        context: &RequestContext,
        draft: TemplateDraft,
    ) -> FormResult<Template> {
        let name = normalize_template_name(&draft.name)?;

        if draft.fields.is_empty() && self.config.require_initial_fields {
            return Err(SchemaError::NoFields.into());
        }
        self.ensure_field_capacity(draft.fields.len())?;

        let normalized = draft
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                validate_field_definition(field).map_err(|e| e.at_position(index + 1))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.ensure_unique_name(context, &name, None).await?;

        let mut template =
            Template::new(name, context.user_id.as_str()).with_description(draft.description);
        for (index, field) in normalized.into_iter().enumerate() {
            let order = index as u32;
            let definition =
                FieldDefinition::from_normalized(uuid::Uuid::new_v4().to_string(), field, order)
                    .with_order(order);
            template
                .push_field(definition)
                .map_err(|e| e.at_position(index + 1))?;
        }

        let stored = self
            .repository
            .save_template(self.tenant(context), &template)
            .await?;
        info!(
            "Created template '{}' ({}) with {} fields for user '{}' in tenant '{}' [{}]",
            stored.name,
            stored.id,
            stored.field_count(),
            context.user_id,
            self.tenant(context),
            context.request_id
        );
        Ok(stored)
    }

    /// A template owned by the acting user.
    pub async fn get_template(
        &self,
        context: &RequestContext,
        template_id: &str,
    ) -> FormResult<Option<Template>> {
        match self.owned_template(context, template_id).await {
            Ok(template) => Ok(Some(template)),
            Err(FormError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Templates owned by the acting user, newest first.
    pub async fn list_templates(
        &self,
        context: &RequestContext,
        filter: TemplateFilter,
    ) -> FormResult<Vec<Template>> {
        let mut templates: Vec<Template> = self
            .repository
            .find_templates_by_owner(self.tenant(context), &context.user_id)
            .await?
            .into_iter()
            .filter(|template| filter.matches(template))
            .collect();

        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(
            "Listed {} templates for user '{}' [{}]",
            templates.len(),
            context.user_id,
            context.request_id
        );
        Ok(templates)
    }

    /// Update a template's name, description or active flag.
    pub async fn update_template(
        &self,
        context: &RequestContext,
        template_id: &str,
        patch: TemplatePatch,
    ) -> FormResult<Template> {
        let mut template = self.owned_template(context, template_id).await?;

        if let Some(name) = patch.name {
            let name = normalize_template_name(&name)?;
            self.ensure_unique_name(context, &name, Some(template_id))
                .await?;
            template.name = name;
        }
        if let Some(description) = patch.description {
            template.description = Some(description);
        }
        if let Some(is_active) = patch.is_active {
            template.is_active = is_active;
        }
        template.touch();

        let stored = self
            .repository
            .save_template(self.tenant(context), &template)
            .await?;
        info!(
            "Updated template {} in tenant '{}' [{}]",
            stored.id,
            self.tenant(context),
            context.request_id
        );
        Ok(stored)
    }

    /// Delete a template with its fields and bound records.
    ///
    /// Returns the number of records removed along with it.
    pub async fn delete_template(
        &self,
        context: &RequestContext,
        template_id: &str,
    ) -> FormResult<usize> {
        let template = self.owned_template(context, template_id).await?;
        let outcome = self
            .repository
            .delete_template_cascade(self.tenant(context), &template.id)
            .await?;

        info!(
            "Deleted template {} and {} records in tenant '{}' [{}]",
            template.id,
            outcome.records_deleted,
            self.tenant(context),
            context.request_id
        );
        Ok(outcome.records_deleted)
    }

    /// Append a field to a template owned by the acting user.
    ///
    /// The order defaults to one past the current maximum.
    pub async fn add_field(
        &self,
        context: &RequestContext,
        template_id: &str,
        draft: FieldDraft,
    ) -> FormResult<FieldDefinition> {
        let mut template = self
            .template_for_field_change(context, template_id, "add fields to")
            .await?;
        let normalized = validate_field_definition(&draft)?;
        self.ensure_field_capacity(template.field_count() + 1)?;

        let field = template.add_field(normalized)?.clone();
        template.touch();
        self.repository
            .save_template(self.tenant(context), &template)
            .await?;

        info!(
            "Added {} field '{}' to template {} [{}]",
            field.field_type, field.label, template.id, context.request_id
        );
        Ok(field)
    }

    /// Replace a field's definition, keeping its id.
    pub async fn update_field(
        &self,
        context: &RequestContext,
        template_id: &str,
        field_id: &str,
        draft: FieldDraft,
    ) -> FormResult<FieldDefinition> {
        let mut template = self
            .template_for_field_change(context, template_id, "update fields in")
            .await?;
        let normalized = validate_field_definition(&draft)?;

        let field = template
            .replace_field(field_id, normalized)?
            .cloned()
            .ok_or_else(|| FormError::not_found("FormField", field_id))?;
        template.touch();
        self.repository
            .save_template(self.tenant(context), &template)
            .await?;

        info!(
            "Updated field {} of template {} [{}]",
            field.id, template.id, context.request_id
        );
        Ok(field)
    }

    /// Remove a field from a template; `false` if the template has no such
    /// field. Stored record values for the field are left in place.
    pub async fn remove_field(
        &self,
        context: &RequestContext,
        template_id: &str,
        field_id: &str,
    ) -> FormResult<bool> {
        let mut template = self
            .template_for_field_change(context, template_id, "remove fields from")
            .await?;

        if template.remove_field(field_id).is_none() {
            debug!(
                "Field {} not present on template {} [{}]",
                field_id, template_id, context.request_id
            );
            return Ok(false);
        }

        template.touch();
        self.repository
            .save_template(self.tenant(context), &template)
            .await?;
        info!(
            "Removed field {} from template {} [{}]",
            field_id, template.id, context.request_id
        );
        Ok(true)
    }
}
