// ABOUTME: Executes a document field by field against the store and token manager
// ABOUTME: Applies the auth gate and selection checks before dispatching to a handler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::arguments::Arguments;
use super::document::{Document, DocumentResponse, FieldRequest, GraphError, OperationType};
use super::failure::{FieldFailure, FieldResult};
use super::schema::{Field, MutationField};
use super::{auth_fields, mutations, queries};
use crate::errors::{AppError, ErrorCode};
use crate::logging::AppLogger;
use crate::middleware::AuthState;
use crate::resources::ServerResources;
use serde_json::Value;
use std::time::Instant;

/// Runs documents for one request
pub struct Executor<'a> {
    resources: &'a ServerResources,
    auth: &'a AuthState,
}

impl<'a> Executor<'a> {
    /// Create an executor for a request authenticated as `auth`
    #[must_use]
    pub const fn new(resources: &'a ServerResources, auth: &'a AuthState) -> Self {
        Self { resources, auth }
    }

    /// Execute every field of `document` in order
    ///
    /// # Errors
    ///
    /// Returns an error if the document is structurally invalid or the store
    /// fails; per-field problems are reported in the response instead
    #[tracing::instrument(skip_all, fields(operation = %document.operation, fields = document.fields.len()))]
    pub async fn execute(&self, document: &Document) -> Result<DocumentResponse, AppError> {
        document.check()?;
        let started = Instant::now();
        let mut response = DocumentResponse::default();

        for request in &document.fields {
            let key = request.response_key().to_owned();
            match self.execute_field(document.operation, request).await {
                Ok(value) => {
                    response.data.insert(key, value);
                }
                Err(FieldFailure::Reported { code, message }) => {
                    response.data.insert(key.clone(), Value::Null);
                    response.errors.push(GraphError {
                        message,
                        code,
                        path: vec![key],
                    });
                }
                Err(FieldFailure::Fatal(e)) => {
                    tracing::error!(field = %request.name, error = %e, "Document aborted");
                    return Err(e);
                }
            }
        }

        AppLogger::log_api_request(
            &document.operation.to_string(),
            document.fields.len(),
            response.errors.len(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(response)
    }

    async fn execute_field(
        &self,
        operation: OperationType,
        request: &FieldRequest,
    ) -> FieldResult<Value> {
        let Some(field) = Field::lookup(operation, &request.name) else {
            return Err(FieldFailure::reported(
                ErrorCode::UnknownField,
                format!(
                    "Cannot query field '{}' on type '{}'",
                    request.name,
                    operation.type_name()
                ),
            ));
        };

        let user = self.auth.user();
        if field.requires_auth() && user.is_none() {
            tracing::debug!(field = field.name(), "Gated field refused");
            return Err(FieldFailure::reported(
                ErrorCode::AuthRequired,
                self.auth.denial_message(),
            ));
        }

        let shape = field.shape();
        if let Some(selection) = &request.selection {
            if let Some(unknown) = shape.unknown_key(selection) {
                return Err(FieldFailure::reported(
                    ErrorCode::InvalidSelection,
                    format!("Cannot select '{unknown}' on field '{}'", field.name()),
                ));
            }
        }

        let args = Arguments::new(field.name(), &request.arguments);
        args.check_known(field.arguments())?;

        let db = &self.resources.database;
        let value = match (field, user) {
            (Field::Query(query), _) => queries::resolve(query, args, db).await?,
            (
                Field::Mutation(
                    token_field @ (MutationField::TokenAuth
                    | MutationField::VerifyToken
                    | MutationField::RefreshToken),
                ),
                _,
            ) => {
                auth_fields::resolve(token_field, args, db, &self.resources.auth_manager).await?
            }
            (Field::Mutation(write), Some(user)) => mutations::resolve(write, args, db, user).await?,
            (Field::Mutation(write), None) => {
                return Err(FieldFailure::internal(format!(
                    "{} reached dispatch without a user",
                    write.name()
                )));
            }
        };

        Ok(match &request.selection {
            Some(selection) => shape.project(value, selection),
            None => value,
        })
    }
}
