use aws_sdk_dynamodb::{
    error::DisplayErrorContext,
    types::{
        AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
        ScalarAttributeType,
    },
    Client,
};
use log::debug;
use std::collections::HashMap;
use std::env;

use crate::store::dynamo::create_client;

const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:8000";

/// True when tests should run against DynamoDB Local instead of the in-memory mocks.
pub fn use_dynamodb() -> bool {
    env::var("USE_DYNAMODB")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Client for DynamoDB Local (`DYNAMODB_ENDPOINT`, default `http://localhost:8000`).
pub async fn create_dynamo_client() -> Client {
    let endpoint =
        env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| DEFAULT_LOCAL_ENDPOINT.to_string());
    create_client(Some(&endpoint)).await
}

async fn create_table_with_hash_key(
    client: &Client,
    table_name: &str,
    key: &str,
) -> Result<(), String> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name(key)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| e.to_string())?;
    let attribute = AttributeDefinition::builder()
        .attribute_name(key)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| e.to_string())?;

    client
        .create_table()
        .table_name(table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map_err(|e| DisplayErrorContext(&e).to_string())?;

    debug!("Created table '{}' keyed by '{}'", table_name, key);
    Ok(())
}

pub async fn create_invitation_table(client: &Client, table_name: &str) -> Result<(), String> {
    create_table_with_hash_key(client, table_name, "token").await
}

pub async fn create_event_table(client: &Client, table_name: &str) -> Result<(), String> {
    create_table_with_hash_key(client, table_name, "event_id").await
}

/// Deletes every item in `table_name`, addressing items by their `key` attribute.
pub async fn clear_dynamo_table(client: &Client, table_name: &str, key: &str) -> Result<(), String> {
    let mut start_key = None;
    loop {
        let output = client
            .scan()
            .table_name(table_name)
            .set_exclusive_start_key(start_key.take())
            .send()
            .await
            .map_err(|e| DisplayErrorContext(&e).to_string())?;

        for item in output.items.unwrap_or_default() {
            if let Some(value) = item.get(key) {
                client
                    .delete_item()
                    .table_name(table_name)
                    .key(key, value.clone())
                    .send()
                    .await
                    .map_err(|e| DisplayErrorContext(&e).to_string())?;
            }
        }

        start_key = output.last_evaluated_key;
        if start_key.is_none() {
            break;
        }
    }
    Ok(())
}

async fn put_raw_item(
    client: &Client,
    table_name: &str,
    fields: &[(&str, &str)],
) -> Result<(), String> {
    let item: HashMap<String, AttributeValue> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), AttributeValue::S(v.to_string())))
        .collect();

    client
        .put_item()
        .table_name(table_name)
        .set_item(Some(item))
        .send()
        .await
        .map_err(|e| DisplayErrorContext(&e).to_string())?;
    Ok(())
}

/// Writes an invitation item that predates the `used` attribute.
pub async fn put_invitation_without_used(
    client: &Client,
    table_name: &str,
    token: &str,
    inviter_identity: &str,
    created_at: &str,
    expires_at: &str,
) -> Result<(), String> {
    put_raw_item(
        client,
        table_name,
        &[
            ("token", token),
            ("inviter_identity", inviter_identity),
            ("created_at", created_at),
            ("expires_at", expires_at),
        ],
    )
    .await
}

/// Writes an event item with no `date` attribute.
pub async fn put_event_without_date(
    client: &Client,
    table_name: &str,
    event_id: &str,
    title: &str,
) -> Result<(), String> {
    put_raw_item(
        client,
        table_name,
        &[
            ("event_id", event_id),
            ("title", title),
            ("description", "No date yet"),
            ("created_at", "2025-01-01T00:00:00Z"),
        ],
    )
    .await
}
