use serde_json::Value;

use crate::views::{ViewContext, ViewError};

/// Submit the login form. The service's answer becomes the payload.
pub async fn submit_login(
    ctx: ViewContext<'_>,
    username: &str,
    password: &str,
) -> Result<Value, ViewError> {
    let response = ctx.client.login(username, password).await?;
    tracing::info!(username, "login accepted");
    ctx.store.set_payload(response.clone());
    Ok(response)
}
