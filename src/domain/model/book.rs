use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// 書籍レコード。3フィールドすべて必須。
///
/// ISBNは削除時の事実上の識別子だが、一意性は強制しない。
/// 重複ISBNはそのまま並存する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    isbn: String,
}

impl Book {
    /// 書籍を作成する。いずれかのフィールドが空文字ならエラー。
    /// 空チェック以外の検証（形式・長さ）は行わない。
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let author = author.into();
        let isbn = isbn.into();

        if title.is_empty() {
            return Err(DomainError::EmptyField("title"));
        }
        if author.is_empty() {
            return Err(DomainError::EmptyField("author"));
        }
        if isbn.is_empty() {
            return Err(DomainError::EmptyField("isbn"));
        }

        Ok(Self {
            title,
            author,
            isbn,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }
}
