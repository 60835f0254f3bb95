#[actix_web::main]
async fn main() -> std::io::Result<()> {
    datalab::app::run().await
}
