use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{CategoryCount, DashboardSummary, LibraryError};
use crate::domain::{
    book::Book,
    commands::{AddBook, BorrowBook, ReturnBook},
    loan::{Loan, was_returned_late},
    value_objects::{BookId, BookStatus, BorrowerId, LoanStatus, SearchField},
};

fn book_id(value: String) -> Result<BookId, LibraryError> {
    BookId::new(value).map_err(|_| LibraryError::ValidationError("book_id is required".into()))
}

fn borrower_id(value: String) -> Result<BorrowerId, LibraryError> {
    BorrowerId::new(value)
        .map_err(|_| LibraryError::ValidationError("borrower_id is required".into()))
}

// ============================================================================
// Requests
// ============================================================================

/// 書籍登録リクエスト（POST /books）
#[derive(Debug, Serialize, Deserialize)]
pub struct AddBookRequest {
    pub book_id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    pub category: String,
    pub total_copies: u32,
    #[serde(default)]
    pub available_copies: Option<u32>,
    #[serde(default)]
    pub status: Option<BookStatus>,
}

impl AddBookRequest {
    pub fn try_into_command(self) -> Result<AddBook, LibraryError> {
        Ok(AddBook {
            book_id: book_id(self.book_id)?,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            category: self.category,
            total_copies: self.total_copies,
            available_copies: self.available_copies,
            status: self.status,
        })
    }
}

/// 貸出リクエスト（POST /loans）
///
/// 貸出日の省略時は当日。返却期限の省略時は貸出期間から求める。
#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowBookRequest {
    pub book_id: String,
    pub borrower_name: String,
    pub borrower_id: String,
    #[serde(default)]
    pub borrow_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl BorrowBookRequest {
    pub fn try_into_command(self, today: NaiveDate) -> Result<BorrowBook, LibraryError> {
        Ok(BorrowBook {
            book_id: book_id(self.book_id)?,
            borrower_name: self.borrower_name,
            borrower_id: borrower_id(self.borrower_id)?,
            borrow_date: self.borrow_date.unwrap_or(today),
            due_date: self.due_date,
        })
    }
}

/// 返却リクエスト（POST /loans/return）
#[derive(Debug, Serialize, Deserialize)]
pub struct ReturnBookRequest {
    pub book_id: String,
    pub borrower_id: String,
    #[serde(default)]
    pub returned_on: Option<NaiveDate>,
}

impl ReturnBookRequest {
    pub fn try_into_command(self, today: NaiveDate) -> Result<ReturnBook, LibraryError> {
        Ok(ReturnBook {
            book_id: book_id(self.book_id)?,
            borrower_id: borrower_id(self.borrower_id)?,
            returned_on: self.returned_on.unwrap_or(today),
        })
    }
}

/// 書籍検索のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// 検索項目（title, author, category, id）
    pub by: Option<String>,
    /// 検索語
    pub q: Option<String>,
}

/// 貸出一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListLoansQuery {
    /// ステータスでフィルタリング（borrowed, returned）
    pub status: Option<String>,
}

/// 延滞一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct OverdueQuery {
    /// 基準日（省略時は当日）
    pub as_of: Option<NaiveDate>,
}

// ============================================================================
// Responses
// ============================================================================

/// 書籍レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResponse {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,
    pub total_copies: u32,
    pub available_copies: u32,
    pub status: BookStatus,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            book_id: book.book_id.value().to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            category: book.category.clone(),
            total_copies: book.total_copies,
            available_copies: book.available_copies,
            status: book.status,
        }
    }
}

/// 貸出レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResponse {
    pub loan_id: Uuid,
    pub book_id: String,
    pub title: String,
    pub borrower_name: String,
    pub borrower_id: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    pub returned_on: Option<NaiveDate>,
}

impl From<&Loan> for LoanResponse {
    fn from(loan: &Loan) -> Self {
        Self {
            loan_id: loan.loan_id.value(),
            book_id: loan.book_id.value().to_string(),
            title: loan.title.clone(),
            borrower_name: loan.borrower_name.clone(),
            borrower_id: loan.borrower_id.value().to_string(),
            borrow_date: loan.borrow_date,
            due_date: loan.due_date,
            status: loan.status.as_str().to_string(),
            returned_on: loan.returned_on,
        }
    }
}

/// 返却レスポンス（POST /loans/return）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturnedResponse {
    pub loan: LoanResponse,
    pub was_overdue: bool,
}

impl From<&Loan> for BookReturnedResponse {
    fn from(loan: &Loan) -> Self {
        Self {
            loan: LoanResponse::from(loan),
            was_overdue: was_returned_late(loan),
        }
    }
}

/// ダッシュボードレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub total_titles: usize,
    pub total_copies: u64,
    pub available_copies: u64,
    pub borrowed_copies: u64,
    pub recent_books: Vec<BookResponse>,
    pub books_by_category: Vec<CategoryCount>,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_titles: summary.total_titles,
            total_copies: summary.total_copies,
            available_copies: summary.available_copies,
            borrowed_copies: summary.borrowed_copies,
            recent_books: summary.recent_books.iter().map(BookResponse::from).collect(),
            books_by_category: summary.books_by_category,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// 検索項目クエリパラメータのパースとバリデーション
pub fn parse_search_field(field: &str) -> Result<SearchField, String> {
    field.parse::<SearchField>()
}

/// ステータスクエリパラメータのパースとバリデーション
pub fn parse_status_filter(status: &str) -> Result<LoanStatus, String> {
    status.parse::<LoanStatus>()
}
