use log::info;

use crate::domain::model::book::Book;
use crate::domain::repository::LibraryRepository;

use super::error::AppError;

/// 書籍列に対するユースケース。
/// load → mutate → save のパターンで、保存値全体を読み替えて書き戻す。
/// タブ間・プロセス間のロックはなく、最後の書き込みが勝つ。
pub struct LibraryService<R: LibraryRepository> {
    repo: R,
}

impl<R: LibraryRepository> LibraryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// 保存済みの書籍をすべて返す。未保存なら空列。
    pub fn list(&self) -> Result<Vec<Book>, AppError> {
        self.load_books()
    }

    /// 書籍を末尾に追加して全体を保存する。一意性チェックはしない。
    pub fn add(&self, book: Book) -> Result<(), AppError> {
        let mut books = self.load_books()?;
        info!("event=book_add isbn={} total={}", book.isbn(), books.len() + 1);
        books.push(book);
        self.persist(&books)
    }

    /// 指定ISBNに一致する書籍をすべて取り除いて保存する。削除件数を返す。
    /// 一致なしは0件削除の成功であり、エラーではない。
    pub fn remove(&self, isbn: &str) -> Result<usize, AppError> {
        let mut books = self.load_books()?;
        let before = books.len();
        books.retain(|b| b.isbn() != isbn);
        let removed = before - books.len();
        info!("event=book_remove isbn={isbn} removed={removed}");
        self.persist(&books)?;
        Ok(removed)
    }

    // --- private ---

    fn load_books(&self) -> Result<Vec<Book>, AppError> {
        Ok(self
            .repo
            .load()
            .map_err(|e| AppError::Storage(Box::new(e)))?
            .unwrap_or_default())
    }

    fn persist(&self, books: &[Book]) -> Result<(), AppError> {
        self.repo
            .save(books)
            .map_err(|e| AppError::Storage(Box::new(e)))
    }
}
