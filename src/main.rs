use packtrack::app;

#[tokio::main]
async fn main() {
    app::startup::startup().await;
}
