//! Shared networking constants used by client and server.

/// Port the quote service listens on by default.
pub const SERVICE_PORT: u16 = 8080;
/// The single route served by the quote service.
pub const QUOTE_ROUTE: &str = "/cotacao";
/// Base URL of the pricing API; the pair segment (`USD-BRL`) is appended to it.
pub const UPSTREAM_BASE_URL: &str = "https://economia.awesomeapi.com.br/json/last/";

/// Default bind address of the quote service.
pub fn bind_addr() -> String {
    format!("0.0.0.0:{}", SERVICE_PORT)
}

/// Default URL the requester calls.
pub fn service_url() -> String {
    format!("http://localhost:{}{}", SERVICE_PORT, QUOTE_ROUTE)
}
