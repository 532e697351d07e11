use serde::{Deserialize, Serialize};

use crate::domain::book::Book;

use super::errors::{LibraryError, Result};
use super::library::Library;

/// ダッシュボードに表示する最近の書籍の件数
const RECENT_BOOKS_LIMIT: usize = 5;

/// CSV出力のヘッダー行
pub const CSV_HEADER: [&str; 8] = [
    "Book ID",
    "Title",
    "Author",
    "ISBN",
    "Category",
    "Quantity",
    "Available",
    "Status",
];

/// 分類ごとの登録タイトル数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// ダッシュボードの集計
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_titles: usize,
    pub total_copies: u64,
    pub available_copies: u64,
    pub borrowed_copies: u64,
    pub recent_books: Vec<Book>,
    pub books_by_category: Vec<CategoryCount>,
}

/// ダッシュボードの集計を作る
///
/// 分類別の件数は多い順。同数の場合は目録に先に現れた分類が先。
pub fn dashboard(library: &Library) -> DashboardSummary {
    let mut total_copies: u64 = 0;
    let mut available_copies: u64 = 0;
    let mut books_by_category: Vec<CategoryCount> = Vec::new();

    for book in library.catalog.books() {
        total_copies += u64::from(book.total_copies);
        available_copies += u64::from(book.available_copies);

        match books_by_category
            .iter_mut()
            .find(|c| c.category == book.category)
        {
            Some(entry) => entry.count += 1,
            None => books_by_category.push(CategoryCount {
                category: book.category.clone(),
                count: 1,
            }),
        }
    }

    // 安定ソートなので同数は出現順のまま
    books_by_category.sort_by(|a, b| b.count.cmp(&a.count));

    DashboardSummary {
        total_titles: library.catalog.len(),
        total_copies,
        available_copies,
        borrowed_copies: total_copies - available_copies,
        recent_books: library
            .catalog
            .books()
            .take(RECENT_BOOKS_LIMIT)
            .cloned()
            .collect(),
        books_by_category,
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    book_id: &'a str,
    title: &'a str,
    author: &'a str,
    isbn: &'a str,
    category: &'a str,
    quantity: u32,
    available: u32,
    status: &'static str,
}

impl<'a> From<&'a Book> for CsvRow<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            book_id: book.book_id.value(),
            title: &book.title,
            author: &book.author,
            isbn: &book.isbn,
            category: &book.category,
            quantity: book.total_copies,
            available: book.available_copies,
            status: book.status.label(),
        }
    }
}

/// 目録をCSVに出力する
///
/// ヘッダー行は書籍が0件でも必ず出力する。
pub fn export_catalog_csv(library: &Library) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| LibraryError::ExportError(Box::new(e)))?;
    for book in library.catalog.books() {
        writer
            .serialize(CsvRow::from(book))
            .map_err(|e| LibraryError::ExportError(Box::new(e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LibraryError::ExportError(Box::new(e.into_error())))?;
    String::from_utf8(bytes).map_err(|e| LibraryError::ExportError(Box::new(e)))
}
