use super::model::book::Book;

/// 永続化の抽象。Infra層が実装する。
/// 書籍列は常に1つの値として丸ごと読み書きされ、部分更新はない。
pub trait LibraryRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 保存済みの書籍列を読み込む。一度も保存されていなければNone。
    fn load(&self) -> Result<Option<Vec<Book>>, Self::Error>;

    /// 書籍列全体を書き込む。
    fn save(&self, books: &[Book]) -> Result<(), Self::Error>;
}
