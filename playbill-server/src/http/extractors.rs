//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use playbill_core::pagination::PageParams;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body whose rejections render as [`ApiError`]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Numeric id from the path; anything else is a missing resource
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<i64> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;
        Ok(Self(id))
    }
}

/// `?page=N` query; never rejects.
///
/// Repeated `page` keys resolve to the first one, and a query string that
/// does not decode is treated as absent, so the page defaults to 1.
pub struct PageQuery(pub PageParams);

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        let page = pairs
            .into_iter()
            .find(|(key, _)| key == "page")
            .map(|(_, value)| value);
        Ok(Self(PageParams { page }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    async fn page_of(uri: &str) -> i64 {
        let (mut parts, _) = HttpRequest::get(uri).body(()).unwrap().into_parts();
        let PageQuery(params) = PageQuery::from_request_parts(&mut parts, &()).await.unwrap();
        params.page_number()
    }

    #[tokio::test]
    async fn first_page_key_wins() {
        assert_eq!(page_of("/questions?page=2&page=3").await, 2);
        assert_eq!(page_of("/questions?page=abc&page=3").await, 1);
    }

    #[tokio::test]
    async fn defaults_to_first_page() {
        assert_eq!(page_of("/questions").await, 1);
        assert_eq!(page_of("/questions?sort=asc").await, 1);
        assert_eq!(page_of("/questions?page=%FF").await, 1);
    }
}
