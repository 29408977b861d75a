#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_study_backend::run().await
}
