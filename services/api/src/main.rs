use kodex_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("kodex error: {err}");
        std::process::exit(1);
    }
}
