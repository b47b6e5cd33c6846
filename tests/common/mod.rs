//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use bookshelf::application::service::LibraryService;
use bookshelf::domain::model::book::Book;
use bookshelf::domain::repository::LibraryRepository;

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("in-memory store error")]
pub struct InMemoryError;

/// ファイルI/O不要のインメモリリポジトリ。
/// 1キー（"books"）に書籍列全体のシリアライズ値を保持する。
pub struct InMemoryRepo {
    store: RefCell<HashMap<String, String>>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            store: RefCell::new(HashMap::new()),
        }
    }
}

impl LibraryRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Option<Vec<Book>>, Self::Error> {
        let store = self.store.borrow();
        match store.get("books") {
            Some(json) => {
                let books: Vec<Book> = serde_json::from_str(json).unwrap();
                Ok(Some(books))
            }
            None => Ok(None),
        }
    }

    fn save(&self, books: &[Book]) -> Result<(), Self::Error> {
        let json = serde_json::to_string(books).unwrap();
        self.store.borrow_mut().insert("books".to_string(), json);
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// 標準的なテスト用書籍列: Dune / Hobbit。
pub fn standard_books() -> Vec<Book> {
    vec![
        Book::new("Dune", "Herbert", "123").unwrap(),
        Book::new("Hobbit", "Tolkien", "456").unwrap(),
    ]
}

/// InMemoryRepoに書籍列を保存してLibraryServiceを返す。
pub fn service_with_books(books: &[Book]) -> LibraryService<InMemoryRepo> {
    let repo = InMemoryRepo::new();
    repo.save(books).unwrap();
    LibraryService::new(repo)
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
