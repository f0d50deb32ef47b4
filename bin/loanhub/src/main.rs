#[tokio::main]
async fn main() -> Result<(), eyre::Report> {
    loanhub::run().await
}
