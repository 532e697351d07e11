use crate::domain::value_objects::{BookId, BorrowerId};
use thiserror::Error;

/// 蔵書・貸出アプリケーション層のエラー
///
/// どのエラーでも目録と台帳は操作前の状態のまま。
#[derive(Debug, Error)]
pub enum LibraryError {
    /// 同じIDの書籍が既に登録されている
    #[error("Book ID {0} already exists")]
    DuplicateId(BookId),

    /// 書籍が見つからない
    #[error("Book {0} not found")]
    NotFound(BookId),

    /// 在庫0から減らそうとした
    #[error("No copies of book {0} left to take")]
    Exhausted(BookId),

    /// 全冊が書架にあるのに戻そうとした
    #[error("All copies of book {0} are already on the shelf")]
    CopyCountOverflow(BookId),

    /// 貸出可能な在庫がない
    #[error("Book {0} is not available for borrowing")]
    BookUnavailable(BookId),

    /// 入力値が不正
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 該当する貸出中の記録がない
    #[error("No active loan of book {book_id} for borrower {borrower_id}")]
    NoActiveLoan {
        book_id: BookId,
        borrower_id: BorrowerId,
    },

    /// CSV出力のエラー
    #[error("Export error")]
    ExportError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryError>;
