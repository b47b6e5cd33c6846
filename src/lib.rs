//! bookshelf — interactive terminal book-list manager.
//!
//! 書籍リスト（title / author / isbn）を1つのJSONファイルに永続化し、
//! 対話セッションでテーブル表示・追加・削除を行う。

pub mod application;
pub mod domain;
pub mod infra;
pub mod interface;
pub mod logging;
