#[tokio::main]
async fn main() {
    if let Err(err) = ax_api::run().await {
        eprintln!("ax-api failed: {err}");
        std::process::exit(1);
    }
}
