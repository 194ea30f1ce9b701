// ABOUTME: HTTP route for the query/mutation document endpoint
// ABOUTME: Parses the JSON document, resolves credentials once, and runs the executor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::api::{Document, DocumentResponse, Executor};
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;

/// Document endpoint routes
pub struct GraphRoutes;

impl GraphRoutes {
    /// Create the `POST /graphql` route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/graphql", post(Self::handle_document))
            .with_state(resources)
    }

    #[tracing::instrument(skip_all, fields(request_id = tracing::field::Empty))]
    async fn handle_document(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<Document>, JsonRejection>,
    ) -> AppResult<Json<DocumentResponse>> {
        let request_id = headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        if let Some(id) = &request_id {
            tracing::Span::current().record("request_id", id.as_str());
        }
        let tag = |e: AppError| match &request_id {
            Some(id) => e.with_request_id(id.clone()),
            None => e,
        };

        let Json(document) = body.map_err(|rejection| {
            tracing::debug!(status = %rejection.status(), "Rejected document body");
            tag(AppError::invalid_input(rejection.body_text()))
        })?;

        let auth_header = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let auth = resources
            .auth_middleware
            .resolve(auth_header)
            .await
            .map_err(|e| tag(AppError::from(e)))?;

        let response = Executor::new(&resources, &auth)
            .execute(&document)
            .await
            .map_err(tag)?;

        Ok(Json(response))
    }
}
