use tokio::net::TcpListener;

/// Serves the reqres stand-in on `127.0.0.1:$PORT`; point `BASE_URL` at it.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr} (BASE_URL=http://{addr})");
    mock_server::run(listener).await
}
