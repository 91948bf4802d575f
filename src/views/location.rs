use serde_json::{Map, Value};

use crate::api::Coordinates;
use crate::router::Resolved;
use crate::views::{required_param, ViewContext, ViewError, ViewId};

/// Fetch the location named by the route's `id` and its detail bundle,
/// storing both as `{"location": .., "aggregate": ..}`. The location
/// document is kept exactly as the service returned it.
pub async fn load_location(ctx: ViewContext<'_>, route: &Resolved) -> Result<Value, ViewError> {
    let id = required_param(route, "id")?;
    let location = ctx.client.retrieve_point(id).await?;
    let aggregate = ctx.client.aggregate(id).await?;

    let mut payload = Map::new();
    payload.insert("location".to_string(), location);
    payload.insert("aggregate".to_string(), aggregate);
    let payload = Value::Object(payload);
    ctx.store.set_payload(payload.clone());
    Ok(payload)
}

/// Fetch the location and the data for the active tab, storing both as
/// `{"location": .., "<tab>": ..}`.
pub async fn load_tab(ctx: ViewContext<'_>, route: &Resolved) -> Result<Value, ViewError> {
    let id = required_param(route, "id")?;
    let location = ctx.client.retrieve_point(id).await?;
    let at = coordinates_of(&location).ok_or_else(|| ViewError::MissingCoordinates {
        id: id.to_string(),
    })?;

    let data = match route.view {
        ViewId::Restaurants => ctx.client.restaurants(at).await?,
        ViewId::Events => ctx.client.events(at).await?,
        other => return Err(ViewError::NotATab { view: other }),
    };

    let mut payload = Map::new();
    payload.insert("location".to_string(), location);
    payload.insert(route.view.as_str().to_string(), data);
    let payload = Value::Object(payload);
    ctx.store.set_payload(payload.clone());
    Ok(payload)
}

/// Read coordinates from a location document.
///
/// Accepts the service's `latlong: [lat, lng]` pair or separate
/// `lat`/`lng` (or `latitude`/`longitude`) numbers.
pub fn coordinates_of(location: &Value) -> Option<Coordinates> {
    if let Some(pair) = location.get("latlong").and_then(Value::as_array) {
        if let [lat, lng] = pair.as_slice() {
            return Some(Coordinates::new(lat.as_f64()?, lng.as_f64()?));
        }
        return None;
    }

    let number = |keys: [&str; 2]| {
        keys.iter()
            .find_map(|k| location.get(*k).and_then(Value::as_f64))
    };
    Some(Coordinates::new(
        number(["lat", "latitude"])?,
        number(["lng", "longitude"])?,
    ))
}
