use axum::{
    body::Bytes,
    extract::{FromRequestParts, Query, State},
    http::{request::Parts, StatusCode},
    response::IntoResponse,
    Json,
};
use utoipa::IntoParams;

use crate::entities::{Funder, NewFunder};
use crate::error::AppError;
use crate::store::{StoreError, TOP_UP_INCREMENT};
use crate::AppState;

/// `id` query parameter. When it repeats, the first value wins.
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Funder ID
    #[param(value_type = u64)]
    id: Option<String>,
}

impl IdQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let id = pairs
            .into_iter()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value);
        Self { id }
    }

    /// Plain decimal digits only: no sign, no surrounding whitespace.
    fn parse(&self) -> Result<u64, AppError> {
        let raw = self.id.as_deref().ok_or(AppError::MissingId)?;
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::InvalidId(raw.to_string()));
        }
        raw.parse::<u64>()
            .map_err(|_| AppError::InvalidId(raw.to_string()))
    }
}

impl<S> FromRequestParts<S> for IdQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|_| AppError::InvalidId(parts.uri.query().unwrap_or_default().to_string()))?;
        Ok(Self::from_pairs(pairs))
    }
}

fn rejected(err: StoreError) -> AppError {
    match &err {
        StoreError::NotFound(_) => tracing::warn!("lookup failed: {}", err),
        StoreError::IndexMismatch(_) => tracing::warn!("index mismatch: {}", err),
        StoreError::AmountOverflow(_) => tracing::warn!("top-up rejected: {}", err),
    }
    err.into()
}

/// Create a single funder
#[utoipa::path(
    post,
    path = "/add-funder",
    request_body = NewFunder,
    responses(
        (status = 201, description = "Funder created", body = Funder),
        (status = 400, description = "Malformed request body")
    ),
    description = "Assigns the next ID, marks the funder as funded and stamps the current UTC time. Any id, funded or date in the body is ignored."
)]
#[tracing::instrument(skip(state, body))]
pub async fn add_funder(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let new_funder: NewFunder = serde_json::from_slice(&body)?;

    let funder = state.store.write().await.insert(new_funder, state.clock.now());
    tracing::info!(id = funder.id, address = %funder.address, "funder created");

    Ok((StatusCode::CREATED, Json(funder)))
}

/// Create several funders at once
#[utoipa::path(
    post,
    path = "/add-funders",
    request_body = Vec<NewFunder>,
    responses(
        (status = 201, description = "Funders created, in request order", body = Vec<Funder>),
        (status = 400, description = "Malformed request body")
    )
)]
#[tracing::instrument(skip(state, body))]
pub async fn add_funders(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let new_funders: Vec<NewFunder> = serde_json::from_slice(&body)?;

    let funders = state
        .store
        .write()
        .await
        .insert_many(new_funders, state.clock.as_ref());
    tracing::info!(count = funders.len(), "funders created");

    Ok((StatusCode::CREATED, Json(funders)))
}

/// List every funder in insertion order
#[utoipa::path(
    get,
    path = "/fetch-funders",
    responses(
        (status = 200, description = "All stored funders", body = Vec<Funder>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn fetch_funders(State(state): State<AppState>) -> impl IntoResponse {
    let funders = state.store.read().await.list().to_vec();
    (StatusCode::OK, Json(funders))
}

/// Fetch one funder by ID
#[utoipa::path(
    get,
    path = "/fetch-funder",
    params(IdQuery),
    responses(
        (status = 200, description = "Funder found", body = Funder),
        (status = 400, description = "Missing, unparseable or unknown id")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn fetch_funder(
    State(state): State<AppState>,
    query: IdQuery,
) -> Result<impl IntoResponse, AppError> {
    let id = query.parse()?;

    let store = state.store.read().await;
    let (funder, _) = store.lookup(id).map_err(rejected)?;

    Ok((StatusCode::OK, Json(funder.clone())))
}

/// Top up a funder's amount by 0.0716 units
#[utoipa::path(
    patch,
    path = "/update-funder",
    params(IdQuery),
    responses(
        (status = 200, description = "Funder updated", body = Funder),
        (status = 400, description = "Missing, unparseable or unknown id")
    ),
    description = "Adds 71600000000000 to the funder's amount. No other field changes."
)]
#[tracing::instrument(skip(state))]
pub async fn update_funder(
    State(state): State<AppState>,
    query: IdQuery,
) -> Result<impl IntoResponse, AppError> {
    let id = query.parse()?;

    let funder = state
        .store
        .write()
        .await
        .top_up(id, TOP_UP_INCREMENT)
        .map_err(rejected)?;
    tracing::info!(id, amount = funder.amount, "funder topped up");

    Ok((StatusCode::OK, Json(funder)))
}

/// Delete a funder by ID
#[utoipa::path(
    delete,
    path = "/delete-funder",
    params(IdQuery),
    responses(
        (status = 200, description = "Confirmation message", body = String),
        (status = 400, description = "Missing, unparseable or unknown id")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_funder(
    State(state): State<AppState>,
    query: IdQuery,
) -> Result<impl IntoResponse, AppError> {
    let id = query.parse()?;

    state.store.write().await.remove(id).map_err(rejected)?;
    tracing::info!(id, "funder deleted");

    Ok((StatusCode::OK, Json(format!("ID {}: deleted.", id))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(id: &str) -> IdQuery {
        IdQuery { id: Some(id.to_string()) }
    }

    #[test]
    fn first_id_wins() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("id".to_string(), "2".to_string()),
            ("id".to_string(), "9".to_string()),
        ];
        assert_eq!(IdQuery::from_pairs(pairs).parse().unwrap(), 2);
    }

    #[test]
    fn missing_id() {
        assert!(matches!(IdQuery::from_pairs(vec![]).parse(), Err(AppError::MissingId)));
    }

    #[test]
    fn rejects_signs_and_whitespace() {
        for raw in ["+1", " 1", "1 ", "-1", "", "1.0", "18446744073709551616"] {
            assert!(matches!(query(raw).parse(), Err(AppError::InvalidId(_))), "{:?}", raw);
        }
        assert_eq!(query("007").parse().unwrap(), 7);
    }
}
