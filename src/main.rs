use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let data_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("books.json"));
    let log_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("logs"));

    // ログ初期化の失敗でセッションは止めない。
    if let Err(e) = bookshelf::logging::init(&log_dir) {
        eprintln!("warning: {e}");
    }

    bookshelf::interface::tty::run(data_path).await
}
