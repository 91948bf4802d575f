use crate::api::MapPoint;
use crate::views::{ViewContext, ViewError};

/// Fetch every map point and store them as the payload.
pub async fn load_map(ctx: ViewContext<'_>) -> Result<Vec<MapPoint>, ViewError> {
    let points = ctx.client.map_points().await?.collect_all()?;
    tracing::info!(count = points.len(), "map points loaded");
    ctx.store.set_payload_from(&points)?;
    Ok(points)
}

/// Like [`load_map`], asking the service to thin the listing by `filter`.
pub async fn load_map_filtered(
    ctx: ViewContext<'_>,
    filter: f32,
) -> Result<Vec<MapPoint>, ViewError> {
    let points = ctx.client.map_points_filtered(filter).await?.collect_all()?;
    tracing::info!(count = points.len(), filter, "map points loaded");
    ctx.store.set_payload_from(&points)?;
    Ok(points)
}
