#[tokio::main]
async fn main() {
    if let Err(e) = ledger_analytics::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
