use async_trait::async_trait;
use aws_sdk_dynamodb::{
    error::DisplayErrorContext,
    operation::update_item::UpdateItemError,
    types::{AttributeValue, ReturnValue, ReturnValuesOnConditionCheckFailure},
    Client,
};
use log::{debug, error, info, warn};
use serde_dynamo::{from_item, to_item};
use std::collections::HashMap;

use super::{EventStore, InvitationStore, StoreError};
use crate::models::{EventRecord, Invitation};

/// Builds a DynamoDB client from the default AWS configuration chain.
/// `endpoint` points the client at a non-AWS endpoint such as DynamoDB Local.
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    match endpoint {
        Some(url) => {
            info!("Using DynamoDB endpoint override: {}", url);
            let dynamo_config = aws_sdk_dynamodb::config::Builder::from(&config)
                .endpoint_url(url)
                .build();
            Client::from_conf(dynamo_config)
        }
        None => Client::new(&config),
    }
}

/// Condition for `mark_used`. Records written without a `used` attribute count as unused.
pub(crate) const MARK_USED_CONDITION: &str =
    "attribute_exists(#token) AND (attribute_not_exists(#used) OR #used = :unused)";

fn describe_error<E>(operation: &str, err: &E) -> String
where
    E: std::error::Error,
{
    format!("{} failed: {}", operation, DisplayErrorContext(err))
}

fn backend_error<E>(operation: &str, err: &E) -> String
where
    E: std::error::Error,
{
    let message = describe_error(operation, err);
    error!("{}", message);
    message
}

/// Decodes scanned items one at a time, skipping (and logging) any that do not
/// fit `EventRecord` so one foreign item cannot fail the whole listing.
pub(crate) fn decode_events(items: Vec<HashMap<String, AttributeValue>>) -> Vec<EventRecord> {
    items
        .into_iter()
        .filter_map(|item| {
            let event_id = match item.get("event_id") {
                Some(AttributeValue::S(id)) => id.clone(),
                _ => "<missing>".to_string(),
            };
            match from_item::<_, EventRecord>(item) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!("Skipping undecodable event item event_id={}: {}", event_id, e);
                    None
                }
            }
        })
        .collect()
}

/// DynamoDB-backed invitation (token) store
pub struct DynamoInvitationStore {
    client: Client,
    table_name: String,
}

impl DynamoInvitationStore {
    pub async fn new(table_name: String, endpoint: Option<&str>) -> Self {
        info!("Creating DynamoInvitationStore for table '{}'", table_name);
        Self::with_client_and_table(create_client(endpoint).await, table_name)
    }

    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl InvitationStore for DynamoInvitationStore {
    async fn get_invitation(&self, token: &str) -> Result<Option<Invitation>, StoreError> {
        debug!("Getting invitation from table '{}'", self.table_name);

        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("token", AttributeValue::S(token.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| StoreError::Backend(backend_error("GetItem", &e)))?;

        match output.item {
            Some(item) => Ok(Some(from_item(item)?)),
            None => Ok(None),
        }
    }

    async fn create_invitation(&self, invitation: Invitation) -> Result<Invitation, StoreError> {
        let item: HashMap<String, AttributeValue> = to_item(&invitation)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#token)")
            .expression_attribute_names("#token", "token")
            .send()
            .await
            .map_err(|e| {
                let message = describe_error("PutItem", &e);
                if e.into_service_error().is_conditional_check_failed_exception() {
                    StoreError::AlreadyExists
                } else {
                    error!("{}", message);
                    StoreError::Backend(message)
                }
            })?;

        debug!(
            "Stored invitation expiring at {} in table '{}'",
            invitation.expires_at, self.table_name
        );
        Ok(invitation)
    }

    async fn mark_used(&self, token: &str) -> Result<(), StoreError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("token", AttributeValue::S(token.to_string()))
            .update_expression("SET #used = :used")
            .condition_expression(MARK_USED_CONDITION)
            .expression_attribute_names("#token", "token")
            .expression_attribute_names("#used", "used")
            .expression_attribute_values(":used", AttributeValue::Bool(true))
            .expression_attribute_values(":unused", AttributeValue::Bool(false))
            .return_values_on_condition_check_failure(ReturnValuesOnConditionCheckFailure::AllOld)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let message = describe_error("UpdateItem", &e);
                match e.into_service_error() {
                    // The old item only comes back when the record exists, i.e. it was already used.
                    UpdateItemError::ConditionalCheckFailedException(ex) => {
                        if ex.item().is_some() {
                            Err(StoreError::Conflict)
                        } else {
                            Err(StoreError::NotFound)
                        }
                    }
                    _ => {
                        error!("{}", message);
                        Err(StoreError::Backend(message))
                    }
                }
            }
        }
    }
}

/// DynamoDB-backed event store
pub struct DynamoEventStore {
    client: Client,
    table_name: String,
}

impl DynamoEventStore {
    pub async fn new(table_name: String, endpoint: Option<&str>) -> Self {
        info!("Creating DynamoEventStore for table '{}'", table_name);
        Self::with_client_and_table(create_client(endpoint).await, table_name)
    }

    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl EventStore for DynamoEventStore {
    async fn create_event(&self, event: EventRecord) -> Result<EventRecord, StoreError> {
        let item: HashMap<String, AttributeValue> = to_item(&event)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(event_id)")
            .send()
            .await
            .map_err(|e| {
                let message = describe_error("PutItem", &e);
                if e.into_service_error().is_conditional_check_failed_exception() {
                    StoreError::AlreadyExists
                } else {
                    error!("{}", message);
                    StoreError::Backend(message)
                }
            })?;

        info!("Successfully stored event: {}", event.event_id);
        Ok(event)
    }

    async fn list_events(&self, limit: usize) -> Result<Vec<EventRecord>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let page_size = i32::try_from(limit).unwrap_or(i32::MAX);
        let mut items: Vec<HashMap<String, AttributeValue>> = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .limit(page_size)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| StoreError::Backend(backend_error("Scan", &e)))?;

            if let Some(page) = output.items {
                debug!("Scan page returned {} items", page.len());
                items.extend(page);
            }

            start_key = output.last_evaluated_key;
            if start_key.is_none() || items.len() >= limit {
                break;
            }
        }

        items.truncate(limit);
        Ok(decode_events(items))
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), StoreError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("event_id", AttributeValue::S(event_id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| StoreError::Backend(backend_error("DeleteItem", &e)))?;

        match output.attributes {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}
