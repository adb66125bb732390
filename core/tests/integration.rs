//! End-to-end product screen flow against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `ProductListView`
//! and `ProductClient` over real HTTP using ureq. A recording wrapper keeps
//! every request so tests can assert which calls did (or did not) happen.

use chrono::Utc;
use inventory_core::{
    ApiError, Confirm, CreateProduct, DeleteOutcome, HttpMethod, HttpRequest, HttpResponse,
    LoadState, ProductClient, ProductId, ProductListView, Transport,
};

/// Executes requests with ureq and records what was sent.
///
/// ureq's status-as-error behavior is disabled so 4xx/5xx responses are
/// returned as data and the core interprets them.
struct Recording {
    agent: ureq::Agent,
    sent: Vec<HttpRequest>,
}

impl Recording {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            sent: Vec::new(),
        }
    }
}

impl Transport for Recording {
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.push(req.clone());

        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&req.path), req).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&req.path), req).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&req.path), req).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&req.path), req).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&req.path), req).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&req.path), req).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::NetworkUnreachable(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::NetworkUnreachable(e.to_string()))?;
        let body = String::from_utf8(bytes).map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, req: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

struct Always(bool);

impl Confirm for Always {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

fn widget() -> mock_server::Product {
    mock_server::Product {
        id: mock_server::ProductId::Number(1),
        name: "Widget".to_string(),
        price: 9.99,
        quantity: 5,
        creation_time: "2024-01-01T00:00:00Z".to_string(),
    }
}

/// Start the mock server seeded with `products` and return its base URL.
fn serve(products: Vec<mock_server::Product>) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, products).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn load_then_confirmed_delete() {
    let base = serve(vec![widget()]);
    let mut transport = Recording::new();
    let mut view = ProductListView::new(ProductClient::new(&base));

    // Step 1: mount loads one row.
    view.load_with(&mut transport).unwrap();
    assert_eq!(view.load_state(), &LoadState::Loaded);
    let rows = view.rows(&Utc);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, ProductId::Number(1));
    assert_eq!(rows[0].name, "Widget");
    assert_eq!(rows[0].price, 9.99);
    assert_eq!(rows[0].quantity, 5);
    assert!(rows[0].creation_time.starts_with("Jan 01 2024"));

    // Step 2: confirmed delete removes it locally and server-side.
    let outcome = view
        .delete_with(&ProductId::Number(1), &mut transport, &mut Always(true))
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(view.rows(&Utc).is_empty());

    let last = transport.sent.last().unwrap();
    assert_eq!(last.method, HttpMethod::Delete);
    assert_eq!(last.path, format!("{base}/inventory/product/1"));

    // Step 3: a fresh mount agrees with the server.
    view.load_with(&mut transport).unwrap();
    assert!(view.products().is_empty());
}

#[test]
fn declined_delete_issues_no_request() {
    let base = serve(vec![widget()]);
    let mut transport = Recording::new();
    let mut view = ProductListView::new(ProductClient::new(&base));
    view.load_with(&mut transport).unwrap();
    let sent_before = transport.sent.len();

    let outcome = view
        .delete_with(&ProductId::Number(1), &mut transport, &mut Always(false))
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(transport.sent.len(), sent_before);
    assert_eq!(view.products().len(), 1);
}

#[test]
fn delete_rejected_by_server_keeps_row() {
    let base = serve(vec![widget()]);
    let mut transport = Recording::new();
    let mut view = ProductListView::new(ProductClient::new(&base));
    view.load_with(&mut transport).unwrap();

    // Remove the record behind the view's back so the view's delete 404s.
    let client = ProductClient::new(&base);
    client.delete_product(&mut transport, &ProductId::Number(1)).unwrap();

    let err = view
        .delete_with(&ProductId::Number(1), &mut transport, &mut Always(true))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(view.products().len(), 1);
    assert!(view.notice().is_some());
}

#[test]
fn created_product_appears_after_remount() {
    let base = serve(Vec::new());
    let mut transport = Recording::new();
    let client = ProductClient::new(&base);
    let mut view = ProductListView::new(client.clone());

    view.load_with(&mut transport).unwrap();
    assert!(view.products().is_empty());

    let created = client
        .create_product(
            &mut transport,
            &CreateProduct {
                name: "Gadget".to_string(),
                price: 34.99,
                quantity: 30,
            },
        )
        .unwrap();
    assert!(view.products().is_empty(), "no local synthesis before remount");

    view.load_with(&mut transport).unwrap();
    assert_eq!(view.products().len(), 1);
    assert_eq!(view.products()[0].id, created.id);
    assert_eq!(view.products()[0].name, "Gadget");
}

#[test]
fn unreachable_server_fails_the_load() {
    // Bind and drop to obtain a port with nothing listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut transport = Recording::new();
    let mut view = ProductListView::new(ProductClient::new(&format!("http://{addr}")));

    let err = view.load_with(&mut transport).unwrap_err();
    assert!(matches!(err, ApiError::NetworkUnreachable(_)));
    assert!(matches!(view.load_state(), LoadState::LoadFailed(_)));
    assert!(view.products().is_empty());
}
