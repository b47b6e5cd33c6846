//! Terminal session for bookshelf.
//!
//! stdin line commands <-> application::LibraryService / interface::View
//!
//! 3 events: Ready（起動時表示）, Submit（追加）, Click（行の削除アクション）

use std::path::PathBuf;
use std::time::Instant;

use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::application::error::AppError;
use crate::application::service::LibraryService;
use crate::domain::model::book::Book;
use crate::domain::repository::LibraryRepository;
use crate::infra::json_store::JsonLibraryRepository;
use crate::interface::view::{Cell, Kind, NoticeId, View};

// =============================================================================
// Public entry point
// =============================================================================

/// 対話セッションを起動する。data_pathは書籍列のJSONファイル。
/// 起動時のストア読み込み失敗のみ致命エラーとして中断する。
pub async fn run(data_path: PathBuf) -> anyhow::Result<()> {
    info!("event=session_start data={}", data_path.display());

    let repo = JsonLibraryRepository::new(data_path);
    let mut session = Session::new(LibraryService::new(repo));
    session.dispatch(Event::Ready, Instant::now())?;

    let mut stdout = tokio::io::stdout();
    draw(&mut stdout, &session.render()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let now = Instant::now();
                match parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::Help) | None => {
                        draw(&mut stdout, HELP).await?;
                        continue;
                    }
                    Some(Command::List) => {
                        if let Err(e) = session.dispatch(Event::Ready, now) {
                            error!("event=reload_failed error={e}");
                        }
                    }
                    Some(Command::Add { title, author, isbn }) => {
                        // Submit/Clickの障害はdispatch内で処理済み
                        let _ = session.dispatch(Event::Submit { title, author, isbn }, now);
                    }
                    Some(Command::Delete { row }) => {
                        let _ = session.dispatch(Event::Click { row, cell: Cell::Delete }, now);
                    }
                }
                session.tick(now);
                draw(&mut stdout, &session.render()).await?;
            }
            _ = wait_for(session.next_expiry()) => {
                session.tick(Instant::now());
                draw(&mut stdout, &session.render()).await?;
            }
        }
    }

    info!("event=session_end");
    Ok(())
}

/// 次の通知失効まで待つ。通知がなければ待ち続ける。
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending::<()>().await,
    }
}

async fn draw(stdout: &mut tokio::io::Stdout, text: &str) -> std::io::Result<()> {
    stdout.write_all(b"\n").await?;
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"> ").await?;
    stdout.flush().await
}

const HELP: &str = "\
Commands:
  add <title> | <author> | <isbn>   Add a book
  del <row>                         Remove the numbered row
  list                              Reload and redraw the book list
  help                              Show this help
  quit                              Exit
";

// =============================================================================
// Events & commands
// =============================================================================

/// セッションが処理するイベント。状態機械は持たず、3つの独立した
/// ハンドラがServiceとViewを合成する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// 起動時・再描画時: 永続化済みの書籍をすべて表示する。
    Ready,
    /// フォーム送信: 3フィールドを検証して追加する。
    Submit {
        title: String,
        author: String,
        isbn: String,
    },
    /// リスト内クリック: 削除セルのときだけ行と保存値を取り除く。
    Click { row: usize, cell: Cell },
}

/// 入力行コマンド。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        title: String,
        author: String,
        isbn: String,
    },
    Delete {
        row: usize,
    },
    List,
    Help,
    Quit,
}

/// 入力行をコマンドに解釈する。解釈できなければNone（ヘルプ表示）。
///
/// `add`の引数は`|`区切りの3フィールド。欠けた・空のフィールドも
/// そのまま送信し、検証は追加境界に任せる。
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match head {
        "add" => {
            let mut parts = rest.splitn(3, '|').map(|s| s.trim().to_string());
            let title = parts.next().unwrap_or_default();
            let author = parts.next().unwrap_or_default();
            let isbn = parts.next().unwrap_or_default();
            Some(Command::Add {
                title,
                author,
                isbn,
            })
        }
        "del" | "rm" => rest
            .trim()
            .parse::<usize>()
            .ok()
            .map(|row| Command::Delete { row }),
        "list" | "ls" => Some(Command::List),
        "help" | "?" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

// =============================================================================
// Session
// =============================================================================

/// 1つの対話セッション。イベントは到着順に最後まで処理され、
/// 通知の失効タイマーだけが独立してスケジュールされる。
pub struct Session<R: LibraryRepository> {
    service: LibraryService<R>,
    view: View,
}

impl<R: LibraryRepository> Session<R> {
    pub fn new(service: LibraryService<R>) -> Self {
        Self {
            service,
            view: View::new(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn service(&self) -> &LibraryService<R> {
        &self.service
    }

    /// イベントを1つ処理する。Readyの失敗のみ呼び出し元へ伝播し、
    /// Submit/Clickのストア障害はログに残してセッションを継続する。
    pub fn dispatch(&mut self, event: Event, now: Instant) -> Result<(), AppError> {
        match event {
            Event::Ready => self.on_ready(),
            Event::Submit {
                title,
                author,
                isbn,
            } => {
                match self.on_submit(title, author, isbn, now) {
                    Err(AppError::Domain(_)) => {
                        self.view
                            .notify("Please fill in all fields", Kind::Danger, now);
                    }
                    Err(e) => error!("event=submit_failed error={e}"),
                    Ok(()) => {}
                }
                Ok(())
            }
            Event::Click { row, cell } => {
                if let Err(e) = self.on_click(row, cell, now) {
                    error!("event=delete_failed error={e}");
                }
                Ok(())
            }
        }
    }

    /// 期限切れ通知を処分する。
    pub fn tick(&mut self, now: Instant) -> Vec<NoticeId> {
        self.view.prune_notices(now)
    }

    pub fn next_expiry(&self) -> Option<Instant> {
        self.view.next_expiry()
    }

    pub fn render(&self) -> String {
        self.view.render()
    }

    // --- handlers ---

    fn on_ready(&mut self) -> Result<(), AppError> {
        let books = self.service.list()?;
        info!("event=display count={}", books.len());
        self.view.display_all(&books);
        Ok(())
    }

    fn on_submit(
        &mut self,
        title: String,
        author: String,
        isbn: String,
        now: Instant,
    ) -> Result<(), AppError> {
        self.view.set_form(&title, &author, &isbn);
        let book = Book::new(title, author, isbn)?;

        // 行追加 → 保存の順。保存に失敗した行はlist再表示まで画面に残る。
        self.view.push_row(&book);
        self.service.add(book)?;

        self.view.notify("Book Added", Kind::Success, now);
        self.view.clear_form();
        Ok(())
    }

    fn on_click(&mut self, row: usize, cell: Cell, now: Instant) -> Result<(), AppError> {
        match self.view.remove_row(row, cell) {
            Some(removed) => {
                self.service.remove(removed.isbn())?;
                self.view.notify("Book Removed", Kind::Success, now);
                Ok(())
            }
            None => {
                // 削除セル以外・範囲外のクリックは何もしない（通知も出さない）
                warn!("event=click_ignored row={row}");
                Ok(())
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
