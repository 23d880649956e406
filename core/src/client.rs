//! Stateless HTTP request builder and response parser for the reqres API.
//!
//! # Design
//! `ReqresClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`
//! together with the status code the caller expects. The entity operations in
//! `entities` drive both halves through a `Session`.

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{fields_to_json, DataEnvelope, Employee, EmployeeField, EmployeeObject, Resource, UserPage};

/// Synchronous, stateless client for the reqres API.
#[derive(Debug, Clone)]
pub struct ReqresClient {
    base_url: String,
}

impl ReqresClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_create_employee(&self, payload: &EmployeeObject) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(json_request(HttpMethod::Post, format!("{}/users", self.base_url), body))
    }

    pub fn build_update_employee(&self, id: &str, employee: &Employee) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(employee).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(json_request(HttpMethod::Put, self.employee_url(id), body))
    }

    pub fn build_patch_employee(&self, id: &str, fields: &[EmployeeField]) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(&fields_to_json(fields)).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(json_request(HttpMethod::Patch, self.employee_url(id), body))
    }

    pub fn build_delete_employee(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.employee_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_users(&self, page: u32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users?page={page}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_resource(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/unknown/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_create_employee(&self, response: HttpResponse, expected: u16) -> Result<Employee, ApiError> {
        check_status(&response, expected)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Parse a PUT or PATCH response into the object to merge.
    pub fn parse_employee_changes(
        &self,
        response: HttpResponse,
        expected: u16,
    ) -> Result<Map<String, Value>, ApiError> {
        check_status(&response, expected)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Returns the observed status code on a match.
    pub fn parse_delete_employee(&self, response: HttpResponse, expected: u16) -> Result<u16, ApiError> {
        check_status(&response, expected)?;
        Ok(response.status)
    }

    pub fn parse_list_users(&self, response: HttpResponse, expected: u16) -> Result<UserPage, ApiError> {
        check_status(&response, expected)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_resource(&self, response: HttpResponse, expected: u16) -> Result<Resource, ApiError> {
        check_status(&response, expected)?;
        let envelope: DataEnvelope<Resource> =
            serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(envelope.data)
    }

    fn employee_url(&self, id: &str) -> String {
        format!("{}/users/{id}", self.base_url)
    }
}

fn json_request(method: HttpMethod, path: String, body: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    }
}

/// Any status other than `expected` is an error, whatever its class.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::UnexpectedStatus {
        expected,
        actual: response.status,
        body: response.body.clone(),
    })
}
