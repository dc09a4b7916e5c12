#[tokio::main]
async fn main() -> anyhow::Result<()> {
    filmqa_server::start().await
}
