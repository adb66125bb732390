//! Stateless HTTP request builder and response parser for the inventory API.
//!
//! # Design
//! `ProductClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The blocking helpers at the bottom glue
//! the two halves around a `Transport` for hosts that do not need to
//! interleave anything between them.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{CreateProduct, Product, ProductId, UpdateProduct};

/// Synchronous, stateless client for the inventory API.
#[derive(Debug, Clone)]
pub struct ProductClient {
    base_url: String,
}

impl ProductClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/inventory/products", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_product(&self, id: &ProductId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.product_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_product(&self, input: &CreateProduct) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/inventory/product", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_product(
        &self,
        id: &ProductId,
        input: &UpdateProduct,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.product_path(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_product(&self, id: &ProductId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.product_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The returned sequence keeps the server's order.
    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    /// Both 200 and 201 are accepted; the inventory service answers creation
    /// with a plain 200.
    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response, &[200, 201])?;
        decode(&response.body)
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    /// Any 2xx counts as acknowledged. The body is ignored.
    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), ApiError> {
        if (200..300).contains(&response.status) {
            return Ok(());
        }
        Err(bad_status(response))
    }

    // -----------------------------------------------------------------------
    // Blocking round-trips
    // -----------------------------------------------------------------------

    pub fn list_products(&self, transport: &mut impl Transport) -> Result<Vec<Product>, ApiError> {
        let response = transport.execute(&self.build_list_products())?;
        self.parse_list_products(response)
    }

    pub fn delete_product(
        &self,
        transport: &mut impl Transport,
        id: &ProductId,
    ) -> Result<(), ApiError> {
        let response = transport.execute(&self.build_delete_product(id))?;
        self.parse_delete_product(response)
    }

    pub fn create_product(
        &self,
        transport: &mut impl Transport,
        input: &CreateProduct,
    ) -> Result<Product, ApiError> {
        let response = transport.execute(&self.build_create_product(input)?)?;
        self.parse_create_product(response)
    }

    fn product_path(&self, id: &ProductId) -> String {
        format!("{}/inventory/product/{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn check_status(response: &HttpResponse, accepted: &[u16]) -> Result<(), ApiError> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    Err(bad_status(response.clone()))
}

fn bad_status(response: HttpResponse) -> ApiError {
    ApiError::BadStatus {
        status: response.status,
        body: response.body,
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}
