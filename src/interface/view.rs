//! View state for the terminal session.
//!
//! テーブル行・通知バナー・入力フォームを保持し、画面全体を文字列に
//! レンダリングする。行は永続化された書籍列の写しだが、同期は
//! イベント配線側が行う（Viewはストアを知らない）。

use std::fmt;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::domain::model::book::Book;

/// 通知バナーの表示時間。
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// 通知バナーの個別ハンドル。バナーごとに独立して失効を管理する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(Uuid);

impl Default for NoticeId {
    fn default() -> Self {
        Self(Uuid::new_v4())
    }
}

impl NoticeId {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 通知の種別。表示タグに変換される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Success,
    Danger,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Success => "success",
            Kind::Danger => "danger",
        }
    }
}

/// 通知バナー。期限は生成時に固定され、延長も再スケジュールもされない。
#[derive(Debug, Clone)]
pub struct Notice {
    id: NoticeId,
    message: String,
    kind: Kind,
    expires_at: Instant,
}

impl Notice {
    pub fn id(&self) -> NoticeId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}

/// テーブル1行。4セル目は削除アクション。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    title: String,
    author: String,
    isbn: String,
}

impl Row {
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

/// 行内セル。削除マーカーを持つのはDeleteのみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Title,
    Author,
    Isbn,
    Delete,
}

/// 入力フォーム。送信成功時のみクリアされ、検証失敗時は入力値が残る。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub title: String,
    pub author: String,
    pub isbn: String,
}

/// ターミナルUIの状態。
#[derive(Debug, Default)]
pub struct View {
    rows: Vec<Row>,
    notices: Vec<Notice>,
    form: Form,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// 与えられた書籍列からテーブルを組み直す。既存行は破棄する。
    pub fn display_all(&mut self, books: &[Book]) {
        self.rows.clear();
        for book in books {
            self.push_row(book);
        }
    }

    /// 1行追加する。
    pub fn push_row(&mut self, book: &Book) {
        self.rows.push(Row {
            title: book.title().to_string(),
            author: book.author().to_string(),
            isbn: book.isbn().to_string(),
        });
    }

    /// クリック位置が削除セルのときだけ行を取り除き、その行を返す。
    /// 行番号は表示と同じ1始まり。範囲外・削除セル以外はNone。
    pub fn remove_row(&mut self, row: usize, cell: Cell) -> Option<Row> {
        if cell != Cell::Delete {
            return None;
        }
        if row == 0 || row > self.rows.len() {
            return None;
        }
        Some(self.rows.remove(row - 1))
    }

    /// フォームの上に通知を挿入し、そのハンドルを返す。
    /// 失効は`now + NOTICE_TTL`で、バナーごとに独立。
    pub fn notify(&mut self, message: impl Into<String>, kind: Kind, now: Instant) -> NoticeId {
        let notice = Notice {
            id: NoticeId::new(),
            message: message.into(),
            kind,
            expires_at: now + NOTICE_TTL,
        };
        let id = notice.id;
        self.notices.push(notice);
        id
    }

    /// 指定ハンドルの通知を取り除く。見つかればtrue。
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() < before
    }

    /// 期限切れの通知をすべて取り除き、そのハンドルを返す。
    pub fn prune_notices(&mut self, now: Instant) -> Vec<NoticeId> {
        let expired: Vec<NoticeId> = self
            .notices
            .iter()
            .filter(|n| n.expires_at <= now)
            .map(|n| n.id)
            .collect();
        for id in &expired {
            self.dismiss(*id);
        }
        expired
    }

    /// 最も近い通知の失効時刻。通知がなければNone。
    pub fn next_expiry(&self) -> Option<Instant> {
        self.notices.iter().map(|n| n.expires_at).min()
    }

    /// フォームに3フィールドの値を入れる。
    pub fn set_form(&mut self, title: &str, author: &str, isbn: &str) {
        self.form.title = title.to_string();
        self.form.author = author.to_string();
        self.form.isbn = isbn.to_string();
    }

    /// フォームを空にする。
    pub fn clear_form(&mut self) {
        self.form = Form::default();
    }

    /// 画面全体を文字列にする。バナー → フォーム → テーブルの順。
    pub fn render(&self) -> String {
        let mut buf = String::new();

        for notice in &self.notices {
            buf.push_str(&format!(
                "[{}] {}\n",
                notice.kind.as_str(),
                notice.message
            ));
        }
        if !self.notices.is_empty() {
            buf.push('\n');
        }

        buf.push_str(&format!(
            "  title:  \"{}\"\n  author: \"{}\"\n  isbn:   \"{}\"\n\n",
            self.form.title, self.form.author, self.form.isbn
        ));

        if self.rows.is_empty() {
            buf.push_str("Book list is empty. Use `add <title> | <author> | <isbn>` to add one.\n");
        } else {
            buf.push_str(&format!("# Books ({})\n\n", self.rows.len()));
            for (i, row) in self.rows.iter().enumerate() {
                buf.push_str(&format!(
                    "{}. {} | {} | {} | X\n",
                    i + 1,
                    row.title,
                    row.author,
                    row.isbn
                ));
            }
        }

        buf
    }
}
