use std::{fmt, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header::InvalidHeaderValue, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{n}"),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub creation_time: String,
}

#[derive(Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

/// Products in insertion order; list responses keep that order.
pub type Db = Arc<RwLock<Vec<Product>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-seeded with `products`.
pub fn app_with(products: Vec<Product>) -> Router {
    router(Arc::new(RwLock::new(products)))
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/inventory/products", get(list_products))
        .route("/inventory/product", post(create_product))
        .route(
            "/inventory/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(db)
}

/// Browser-facing CORS and request tracing around `router`.
///
/// Fails when `origin` is not a valid header value.
pub fn layered(router: Router, origin: &str) -> Result<Router, InvalidHeaderValue> {
    let origin = origin.parse::<HeaderValue>()?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);
    Ok(router.layer(cors).layer(TraceLayer::new_for_http()))
}

pub async fn run_with(listener: TcpListener, products: Vec<Product>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(products)).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let products = db.read().await;
    Json(products.clone())
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<CreateProduct>,
) -> (StatusCode, Json<Product>) {
    let product = Product {
        id: ProductId::Text(Uuid::new_v4().simple().to_string()),
        name: input.name,
        price: input.price,
        quantity: input.quantity,
        creation_time: chrono::Utc::now().to_rfc3339(),
    };
    info!(id = %product.id, name = %product.name, "product created");
    db.write().await.push(product.clone());
    (StatusCode::OK, Json(product))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Product>, StatusCode> {
    let products = db.read().await;
    products
        .iter()
        .find(|p| p.id.to_string() == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, StatusCode> {
    let mut products = db.write().await;
    let product = products
        .iter_mut()
        .find(|p| p.id.to_string() == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        product.name = name;
    }
    if let Some(price) = input.price {
        product.price = price;
    }
    if let Some(quantity) = input.quantity {
        product.quantity = quantity;
    }
    info!(%id, "product updated");
    Ok(Json(product.clone()))
}

/// Responds with the removed record, as the inventory service does.
async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Product>, StatusCode> {
    let mut products = db.write().await;
    let pos = products
        .iter()
        .position(|p| p.id.to_string() == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let removed = products.remove(pos);
    info!(%id, "product deleted");
    Ok(Json(removed))
}
