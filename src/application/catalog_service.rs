use crate::domain::{
    self, RegisterBookError,
    book::Book,
    commands::AddBook,
    value_objects::{BookId, SearchField},
};

use super::errors::{LibraryError, Result};
use super::library::Library;

impl From<RegisterBookError> for LibraryError {
    fn from(err: RegisterBookError) -> Self {
        let message = match err {
            RegisterBookError::BlankField(field) => format!("{} is required", field),
            RegisterBookError::NoCopies => "quantity must be at least 1".to_string(),
            RegisterBookError::AvailableExceedsTotal { available, total } => format!(
                "available copies ({}) must not exceed quantity ({})",
                available, total
            ),
        };
        LibraryError::ValidationError(message)
    }
}

/// 書籍を登録する
///
/// ビジネスルール：
/// - IDが目録内で一意であること（重複時は目録を変更しない）
/// - 入力値の検証と状態の導出はドメイン層の `register_book` に従う
///
/// # 戻り値
/// 登録された書籍
pub fn add_book(library: &mut Library, cmd: AddBook) -> Result<Book> {
    // 1. ID重複の確認
    if library.catalog.get(&cmd.book_id).is_some() {
        tracing::warn!(book_id = %cmd.book_id, "duplicate book id rejected");
        return Err(LibraryError::DuplicateId(cmd.book_id));
    }

    let requested_status = cmd.status;

    // 2. ドメイン層の純粋関数を呼び出し
    let (book, event) = domain::book::register_book(cmd)?;

    if requested_status.is_some_and(|status| status != book.status) {
        tracing::warn!(
            book_id = %book.book_id,
            requested = ?requested_status,
            derived = ?book.status,
            "requested status ignored; status follows available copies"
        );
    }

    // 3. 目録に保存
    library.catalog.save(book.clone());
    tracing::info!(?event, "book added");

    Ok(book)
}

/// IDで書籍を取得する
pub fn find_book<'a>(library: &'a Library, book_id: &BookId) -> Result<&'a Book> {
    library
        .catalog
        .get(book_id)
        .ok_or_else(|| LibraryError::NotFound(book_id.clone()))
}

/// 登録順に全書籍を返す
pub fn list_books(library: &Library) -> impl Iterator<Item = &Book> + '_ {
    library.catalog.books()
}

/// 貸出可能（在庫1冊以上）な書籍を返す
pub fn list_available_books(library: &Library) -> impl Iterator<Item = &Book> + '_ {
    library.catalog.books().filter(|book| book.is_available())
}

/// 書籍を検索する
///
/// 指定項目に `query` を含む書籍を登録順に遅延評価で返す。
/// 大文字小文字は区別しない。該当なしはエラーではない。
pub fn search_books<'a>(
    library: &'a Library,
    field: SearchField,
    query: &str,
) -> impl Iterator<Item = &'a Book> + 'a {
    let query = query.to_lowercase();
    library
        .catalog
        .books()
        .filter(move |book| domain::book::matches(book, field, &query))
}
