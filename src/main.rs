//! Runs the catalog service.
//!
//! ```text
//! RUST_LOG=info cargo run
//! curl -H 'x-api-key: your-secret-api-key' http://localhost:3000/api/products
//! ```

use catalog::{app, telemetry, Config, Error, Server, Store};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    let config = Config::from_env();
    let router = app(&config, Store::new());

    Server::bind(&config.addr)?.serve(router).await
}
