#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slidemix_server::start().await
}
