//! Record operations.
//!
//! Records are private to the user who created them, while the template a
//! record is written against may belong to anyone in the tenant. Every write
//! validates the full payload first and stores nothing unless the payload
//! produces no validation messages.

use super::core::FormService;
use crate::context::RequestContext;
use crate::error::{FormError, FormResult, ValidationError};
use crate::record::{Record, RecordPatch, RecordView};
use crate::repository::{FormRepository, RECORD_COLLECTION, TEMPLATE_COLLECTION};
use crate::schema::{RecordData, Template, validate_record_data};
use log::{debug, info, trace, warn};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Criteria for listing records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Only records bound to this template
    pub template_id: Option<String>,
    /// Only records with this active flag
    pub is_active: Option<bool>,
}

impl RecordFilter {
    pub fn for_template(template_id: impl Into<String>) -> Self {
        Self {
            template_id: Some(template_id.into()),
            is_active: None,
        }
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    fn matches(&self, record: &Record) -> bool {
        self.template_id
            .as_deref()
            .is_none_or(|template_id| record.template_id == template_id)
            && self.is_active.is_none_or(|active| record.is_active == active)
    }
}

fn into_record_data(data: Value) -> FormResult<RecordData> {
    match data {
        Value::Object(map) => Ok(map),
        _ => Err(FormError::invalid_request("Data must be a dictionary")),
    }
}

fn newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

impl<R: FormRepository> FormService<R> {
    /// Create a record bound to `template_id`.
    ///
    /// `data` must be a JSON object. Any template in the tenant may be used.
    /// Fails with [`FormError::Validation`] carrying every message when the
    /// payload does not conform.
    pub async fn create_record(
        &self,
        context: &RequestContext,
        template_id: &str,
        data: Value,
    ) -> FormResult<RecordView> {
        let data = into_record_data(data)?;
        let template = self.shared_template(context, template_id).await?;
        Self::ensure_valid(&template, &data, context)?;

        let record = Record::new(template.id.as_str(), context.user_id.as_str(), data);
        trace!("Creating record {:?}", record);
        let stored = self
            .repository
            .save_record(self.tenant(context), &record)
            .await?;

        info!(
            "Created record {} on template {} for user '{}' in tenant '{}' [{}]",
            stored.id,
            template.id,
            context.user_id,
            self.tenant(context),
            context.request_id
        );
        Ok(RecordView::new(stored, &template))
    }

    /// A record owned by the acting user.
    pub async fn get_record(
        &self,
        context: &RequestContext,
        record_id: &str,
    ) -> FormResult<Option<RecordView>> {
        let Some(record) = self.owned_record(context, record_id).await? else {
            return Ok(None);
        };
        let mut views = self.views(context, vec![record]).await?;
        Ok(views.pop())
    }

    /// Records owned by the acting user, newest first.
    pub async fn list_records(
        &self,
        context: &RequestContext,
        filter: RecordFilter,
    ) -> FormResult<Vec<RecordView>> {
        let mut records: Vec<Record> = self
            .repository
            .find_records_by_owner(self.tenant(context), &context.user_id)
            .await?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        newest_first(&mut records);

        debug!(
            "Listed {} records for user '{}' [{}]",
            records.len(),
            context.user_id,
            context.request_id
        );
        self.views(context, records).await
    }

    /// The acting user's records on one of their own templates.
    pub async fn list_records_by_template(
        &self,
        context: &RequestContext,
        template_id: &str,
    ) -> FormResult<Vec<RecordView>> {
        let template = self.owned_template(context, template_id).await?;

        let mut records: Vec<Record> = self
            .repository
            .find_records_by_template(self.tenant(context), &template.id)
            .await?
            .into_iter()
            .filter(|record| context.is_user(&record.owner))
            .collect();
        newest_first(&mut records);

        Ok(records
            .into_iter()
            .map(|record| RecordView::new(record, &template))
            .collect())
    }

    /// Update a record's data or active flag.
    ///
    /// The record keeps the template it was created with; a requested
    /// template change is ignored. The resulting data, whether newly
    /// supplied or already stored, is validated against that template.
    pub async fn update_record(
        &self,
        context: &RequestContext,
        record_id: &str,
        patch: RecordPatch,
    ) -> FormResult<RecordView> {
        let mut record = self
            .owned_record(context, record_id)
            .await?
            .ok_or_else(|| FormError::not_found(RECORD_COLLECTION, record_id))?;

        if let Some(requested) = patch.template_id.as_deref() {
            if requested != record.template_id {
                debug!(
                    "Ignoring template change of record {} from {} to {} [{}]",
                    record.id, record.template_id, requested, context.request_id
                );
            }
        }

        let template = self.shared_template(context, &record.template_id).await?;
        let data = match patch.data {
            Some(data) => into_record_data(data)?,
            None => record.data.clone(),
        };
        Self::ensure_valid(&template, &data, context)?;

        record.data = data;
        if let Some(is_active) = patch.is_active {
            record.is_active = is_active;
        }
        record.touch();

        let stored = self
            .repository
            .save_record(self.tenant(context), &record)
            .await?;
        info!(
            "Updated record {} in tenant '{}' [{}]",
            stored.id,
            self.tenant(context),
            context.request_id
        );
        Ok(RecordView::new(stored, &template))
    }

    /// Check a stored record against the current state of its template.
    ///
    /// Templates can change after a record was written; an empty result
    /// means the record still conforms.
    pub async fn revalidate_record(
        &self,
        context: &RequestContext,
        record_id: &str,
    ) -> FormResult<Vec<String>> {
        let record = self
            .owned_record(context, record_id)
            .await?
            .ok_or_else(|| FormError::not_found(RECORD_COLLECTION, record_id))?;
        let template = self.shared_template(context, &record.template_id).await?;

        Ok(record.validate_against(&template))
    }

    /// Delete a record owned by the acting user; `false` if there was none.
    pub async fn delete_record(
        &self,
        context: &RequestContext,
        record_id: &str,
    ) -> FormResult<bool> {
        if self.owned_record(context, record_id).await?.is_none() {
            return Ok(false);
        }

        let deleted = self
            .repository
            .delete_record(self.tenant(context), record_id)
            .await?;
        if deleted {
            info!(
                "Deleted record {} in tenant '{}' [{}]",
                record_id,
                self.tenant(context),
                context.request_id
            );
        }
        Ok(deleted)
    }

    /// Delete several records at once, returning how many were removed.
    ///
    /// Ids that do not name a record of the acting user are skipped.
    pub async fn bulk_delete_records(
        &self,
        context: &RequestContext,
        record_ids: &[String],
    ) -> FormResult<usize> {
        if record_ids.is_empty() {
            return Err(FormError::invalid_request("employee_ids is required"));
        }

        let mut seen = HashSet::new();
        let mut deleted = 0;
        for record_id in record_ids {
            if !seen.insert(record_id.as_str()) {
                continue;
            }
            if self.owned_record(context, record_id).await?.is_some()
                && self
                    .repository
                    .delete_record(self.tenant(context), record_id)
                    .await?
            {
                deleted += 1;
            }
        }

        info!(
            "Bulk deleted {} of {} records in tenant '{}' [{}]",
            deleted,
            record_ids.len(),
            self.tenant(context),
            context.request_id
        );
        Ok(deleted)
    }

    /// Any template of the tenant, regardless of owner.
    async fn shared_template(
        &self,
        context: &RequestContext,
        template_id: &str,
    ) -> FormResult<Template> {
        self.repository
            .get_template(self.tenant(context), template_id)
            .await?
            .ok_or_else(|| FormError::not_found(TEMPLATE_COLLECTION, template_id))
    }

    async fn owned_record(
        &self,
        context: &RequestContext,
        record_id: &str,
    ) -> FormResult<Option<Record>> {
        Ok(self
            .repository
            .get_record(self.tenant(context), record_id)
            .await?
            .filter(|record| context.is_user(&record.owner)))
    }

    fn ensure_valid(
        template: &Template,
        data: &RecordData,
        context: &RequestContext,
    ) -> FormResult<()> {
        let messages = validate_record_data(template, data);
        if messages.is_empty() {
            return Ok(());
        }

        debug!(
            "Rejected payload for template {} with {} errors [{}]",
            template.id,
            messages.len(),
            context.request_id
        );
        Err(ValidationError::new(messages).into())
    }

    /// Attach template name and display name to each record, loading every
    /// template once. Records whose template is gone are skipped.
    async fn views(
        &self,
        context: &RequestContext,
        records: Vec<Record>,
    ) -> FormResult<Vec<RecordView>> {
        let mut templates: HashMap<String, Option<Template>> = HashMap::new();
        let mut views = Vec::with_capacity(records.len());

        for record in records {
            if !templates.contains_key(&record.template_id) {
                let template = self
                    .repository
                    .get_template(self.tenant(context), &record.template_id)
                    .await?;
                templates.insert(record.template_id.clone(), template);
            }

            match templates.get(&record.template_id).and_then(Option::as_ref) {
                Some(template) => views.push(RecordView::new(record, template)),
                None => warn!(
                    "Record {} references missing template {} [{}]",
                    record.id, record.template_id, context.request_id
                ),
            }
        }

        Ok(views)
    }
}
