//! New-product form. Always hands control back to the list, which re-fetches.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use inventory_core::{CreateProduct, ProductClient, Route, Transport};
use tracing::{info, warn};

use crate::console::Console;

/// Collect the new product's fields and submit them. `None` at end of input.
pub fn run<T, R, W>(
    client: &ProductClient,
    transport: &mut T,
    console: &mut Console<R, W>,
) -> io::Result<Option<Route>>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    console.say("New product")?;
    let Some(name) = console.read_line("Name: ")? else {
        return Ok(None);
    };
    let Some(price) = read_parsed::<f64, _, _>(console, "Price: ")? else {
        return Ok(None);
    };
    let Some(quantity) = read_parsed::<u32, _, _>(console, "Quantity: ")? else {
        return Ok(None);
    };

    let input = CreateProduct {
        name,
        price,
        quantity,
    };
    match client.create_product(transport, &input) {
        Ok(product) => {
            info!(id = %product.id, "product created");
            console.say(format!("Created product {}.", product.id))?;
        }
        Err(error) => {
            warn!(%error, "product create failed");
            console.say(format!("error: could not create product: {error}"))?;
        }
    }
    Ok(Some(Route::List))
}

/// Re-prompt until the line parses.
fn read_parsed<V, R, W>(console: &mut Console<R, W>, prompt: &str) -> io::Result<Option<V>>
where
    V: FromStr,
    R: BufRead,
    W: Write,
{
    loop {
        let Some(line) = console.read_line(prompt)? else {
            return Ok(None);
        };
        match line.parse() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => console.say(format!("`{line}` is not a valid value"))?,
        }
    }
}

#[cfg(test)]
mod tests {
    use inventory_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

    use super::*;

    #[derive(Default)]
    struct Capture {
        sent: Vec<HttpRequest>,
        status: u16,
    }

    impl Transport for Capture {
        fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.push(request.clone());
            Ok(HttpResponse::new(
                self.status,
                r#"{"id":"abc","name":"Gadget","price":34.99,"quantity":30,"creation_time":"2024-01-01T00:00:00Z"}"#,
            ))
        }
    }

    fn client() -> ProductClient {
        ProductClient::new("http://localhost:8000")
    }

    #[test]
    fn submits_form_and_returns_to_list() {
        let mut transport = Capture {
            status: 200,
            ..Capture::default()
        };
        let mut console = Console::new("Gadget\nabc\n34.99\n30\n".as_bytes(), Vec::new());

        let next = run(&client(), &mut transport, &mut console).unwrap();

        assert_eq!(next, Some(Route::List));
        assert_eq!(transport.sent.len(), 1);
        assert_eq!(transport.sent[0].method, HttpMethod::Post);
        let body: serde_json::Value =
            serde_json::from_str(transport.sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Gadget");
        assert_eq!(body["quantity"], 30);

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("`abc` is not a valid value"));
        assert!(out.contains("Created product abc."));
    }

    #[test]
    fn server_failure_is_reported_and_returns_to_list() {
        let mut transport = Capture {
            status: 500,
            ..Capture::default()
        };
        let mut console = Console::new("Gadget\n1\n1\n".as_bytes(), Vec::new());

        let next = run(&client(), &mut transport, &mut console).unwrap();

        assert_eq!(next, Some(Route::List));
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("error: could not create product: HTTP 500"));
    }

    #[test]
    fn end_of_input_abandons_the_form() {
        let mut transport = Capture::default();
        let mut console = Console::new("Gadget\n".as_bytes(), Vec::new());

        let next = run(&client(), &mut transport, &mut console).unwrap();

        assert_eq!(next, None);
        assert!(transport.sent.is_empty());
    }
}
