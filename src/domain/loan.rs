use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    BookBorrowed, BookId, BookReturned, BorrowBookError, BorrowerId, LoanId, LoanPeriod,
    LoanStatus, ReturnLoanError,
    book::{self, Book},
};

/// Loan - 貸出台帳の1行（1冊の1回の貸出）
///
/// 台帳は追記のみ。行の変更は `Borrowed → Returned` の1回だけ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    // 識別子
    pub loan_id: LoanId,

    // 書籍への参照（IDのみ。タイトルは貸出時点の写し）
    pub book_id: BookId,
    pub title: String,

    // 利用者
    pub borrower_name: String,
    pub borrower_id: BorrowerId,

    // 貸出管理の責務
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: LoanStatus,
    pub returned_on: Option<NaiveDate>,
}

impl Loan {
    pub fn is_active(&self) -> bool {
        self.status.is_borrowed()
    }
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 利用者名は必須（利用者IDは型で非空を保証）
/// - 在庫が1冊以上あること
/// - 返却期限は省略時 `貸出日 + 貸出期間`、指定時も貸出日より前は不可
///
/// 副作用なし。在庫を1冊減らした書籍、新しいLoan、イベントを返す。
/// 呼び出し側は書籍とLoanの両方を保存するか、どちらも保存しない。
pub fn borrow_book(
    book: &Book,
    borrower_name: String,
    borrower_id: BorrowerId,
    borrow_date: NaiveDate,
    due_date: Option<NaiveDate>,
    loan_period: LoanPeriod,
) -> Result<(Book, Loan, BookBorrowed), BorrowBookError> {
    // バリデーション：利用者名
    if borrower_name.trim().is_empty() {
        return Err(BorrowBookError::BlankField("borrower_name"));
    }

    // バリデーション：返却期限
    let due_date = match due_date {
        Some(due_date) => due_date,
        None => loan_period
            .due_date_from(borrow_date)
            .ok_or(BorrowBookError::DueDateOutOfRange)?,
    };
    if due_date < borrow_date {
        return Err(BorrowBookError::DueBeforeBorrow);
    }

    // バリデーション：在庫
    if !book.is_available() {
        return Err(BorrowBookError::Unavailable);
    }

    let updated_book = book::decrement_available(book)?;

    let loan = Loan {
        loan_id: LoanId::new(),
        book_id: book.book_id.clone(),
        title: book.title.clone(),
        borrower_name,
        borrower_id,
        borrow_date,
        due_date,
        status: LoanStatus::Borrowed,
        returned_on: None,
    };

    let event = BookBorrowed {
        loan_id: loan.loan_id,
        book_id: loan.book_id.clone(),
        borrower_id: loan.borrower_id.clone(),
        borrow_date,
        due_date,
        available_copies: updated_book.available_copies,
    };

    Ok((updated_book, loan, event))
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - 延滞していても返却は受け付ける
/// - 返却済みの行は再度返却できない
///
/// 副作用なし。在庫を1冊戻した書籍、返却済みLoan、イベントを返す。
pub fn return_loan(
    loan: &Loan,
    book: &Book,
    returned_on: NaiveDate,
) -> Result<(Book, Loan, BookReturned), ReturnLoanError> {
    if loan.status.is_returned() {
        return Err(ReturnLoanError::AlreadyReturned);
    }

    let updated_book = book::increment_available(book)?;

    let returned = Loan {
        status: LoanStatus::Returned,
        returned_on: Some(returned_on),
        ..loan.clone()
    };
    let was_overdue = was_returned_late(&returned);

    let event = BookReturned {
        loan_id: loan.loan_id,
        book_id: loan.book_id.clone(),
        borrower_id: loan.borrower_id.clone(),
        returned_on,
        was_overdue,
        available_copies: updated_book.available_copies,
    };

    Ok((updated_book, returned, event))
}

/// 純粋関数：延滞判定
///
/// 返却期限が基準日より厳密に前の貸出中の行のみ延滞。日付のみで比較する。
pub fn is_overdue(loan: &Loan, as_of: NaiveDate) -> bool {
    loan.is_active() && is_past_due(loan, as_of)
}

/// 純粋関数：返却期限を過ぎてから返却されたか
///
/// 返却日を基準日とした延滞判定と同じ規則。貸出中の行は常に `false`。
pub fn was_returned_late(loan: &Loan) -> bool {
    loan.returned_on.is_some_and(|returned_on| is_past_due(loan, returned_on))
}

fn is_past_due(loan: &Loan, as_of: NaiveDate) -> bool {
    loan.due_date < as_of
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookStatus, CopyAccountingError};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book(total: u32, available: u32) -> Book {
        Book {
            book_id: BookId::new("B001").unwrap(),
            title: "Python Programming".to_string(),
            author: "John Smith".to_string(),
            isbn: "978-1234567890".to_string(),
            category: "Programming".to_string(),
            total_copies: total,
            available_copies: available,
            status: BookStatus::derive(available),
        }
    }

    fn borrower() -> BorrowerId {
        BorrowerId::new("STU001").unwrap()
    }

    // TDD: borrow_book() のテスト
    #[test]
    fn test_borrow_book_defaults_due_date_to_loan_period() {
        let borrowed_on = date(2024, 3, 1);

        let (updated, loan, event) = borrow_book(
            &book(5, 5),
            "Alice".to_string(),
            borrower(),
            borrowed_on,
            None,
            LoanPeriod::default(),
        )
        .unwrap();

        assert_eq!(loan.due_date, date(2024, 3, 15));
        assert_eq!(loan.status, LoanStatus::Borrowed);
        assert_eq!(loan.title, "Python Programming");
        assert_eq!(loan.returned_on, None);
        assert_eq!(updated.available_copies, 4);
        assert_eq!(updated.status, BookStatus::Available);

        // イベントの検証
        assert_eq!(event.loan_id, loan.loan_id);
        assert_eq!(event.book_id, loan.book_id);
        assert_eq!(event.available_copies, 4);
    }

    #[test]
    fn test_borrow_book_accepts_due_date_override() {
        let (_, loan, _) = borrow_book(
            &book(1, 1),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 1),
            Some(date(2024, 3, 3)),
            LoanPeriod::default(),
        )
        .unwrap();

        assert_eq!(loan.due_date, date(2024, 3, 3));
    }

    #[test]
    fn test_borrow_last_copy_marks_out_of_stock() {
        let (updated, _, _) = borrow_book(
            &book(3, 1),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 1),
            None,
            LoanPeriod::default(),
        )
        .unwrap();

        assert_eq!(updated.available_copies, 0);
        assert_eq!(updated.status, BookStatus::OutOfStock);
    }

    #[test]
    fn test_borrow_book_fails_when_unavailable() {
        let result = borrow_book(
            &book(3, 0),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 1),
            None,
            LoanPeriod::default(),
        );

        assert_eq!(result.unwrap_err(), BorrowBookError::Unavailable);
    }

    #[test]
    fn test_borrow_book_fails_with_blank_name() {
        let result = borrow_book(
            &book(3, 3),
            " ".to_string(),
            borrower(),
            date(2024, 3, 1),
            None,
            LoanPeriod::default(),
        );

        assert_eq!(
            result.unwrap_err(),
            BorrowBookError::BlankField("borrower_name")
        );
    }

    #[test]
    fn test_borrow_book_fails_when_due_before_borrow() {
        let result = borrow_book(
            &book(3, 3),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 10),
            Some(date(2024, 3, 9)),
            LoanPeriod::default(),
        );

        assert_eq!(result.unwrap_err(), BorrowBookError::DueBeforeBorrow);
    }

    #[test]
    fn test_borrow_book_fails_when_default_due_date_overflows() {
        let result = borrow_book(
            &book(3, 3),
            "Alice".to_string(),
            borrower(),
            NaiveDate::MAX,
            None,
            LoanPeriod::default(),
        );

        assert_eq!(result.unwrap_err(), BorrowBookError::DueDateOutOfRange);
    }

    // TDD: return_loan() のテスト
    #[test]
    fn test_return_loan_success() {
        let (on_loan, loan, _) = borrow_book(
            &book(2, 2),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 1),
            None,
            LoanPeriod::default(),
        )
        .unwrap();

        let (restored, returned, event) = return_loan(&loan, &on_loan, date(2024, 3, 8)).unwrap();

        assert_eq!(restored.available_copies, 2);
        assert_eq!(returned.status, LoanStatus::Returned);
        assert_eq!(returned.returned_on, Some(date(2024, 3, 8)));
        assert_eq!(returned.loan_id, loan.loan_id);
        assert!(!event.was_overdue);
    }

    #[test]
    fn test_return_loan_detects_overdue() {
        let (on_loan, loan, _) = borrow_book(
            &book(1, 1),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 1),
            None,
            LoanPeriod::default(),
        )
        .unwrap();

        let (restored, _, event) = return_loan(&loan, &on_loan, date(2024, 3, 20)).unwrap();

        assert!(event.was_overdue);
        assert_eq!(restored.status, BookStatus::Available);
    }

    #[test]
    fn test_return_loan_fails_when_already_returned() {
        let (on_loan, loan, _) = borrow_book(
            &book(1, 1),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 1),
            None,
            LoanPeriod::default(),
        )
        .unwrap();
        let (restored, returned, _) = return_loan(&loan, &on_loan, date(2024, 3, 2)).unwrap();

        let result = return_loan(&returned, &restored, date(2024, 3, 3));
        assert_eq!(result.unwrap_err(), ReturnLoanError::AlreadyReturned);
    }

    #[test]
    fn test_return_loan_guards_copy_overflow() {
        let (_, loan, _) = borrow_book(
            &book(1, 1),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 1),
            None,
            LoanPeriod::default(),
        )
        .unwrap();

        // 書架に全冊ある状態の書籍で返却しようとする
        let result = return_loan(&loan, &book(1, 1), date(2024, 3, 2));
        assert_eq!(
            result.unwrap_err(),
            ReturnLoanError::Copy(CopyAccountingError::AllCopiesOnShelf)
        );
    }

    // TDD: is_overdue() のテスト
    #[test]
    fn test_is_overdue_is_strict() {
        let (_, loan, _) = borrow_book(
            &book(1, 1),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 1),
            Some(date(2024, 3, 15)),
            LoanPeriod::default(),
        )
        .unwrap();

        assert!(!is_overdue(&loan, date(2024, 3, 14)));
        assert!(!is_overdue(&loan, date(2024, 3, 15)));
        assert!(is_overdue(&loan, date(2024, 3, 16)));
    }

    #[test]
    fn test_is_overdue_false_when_returned() {
        let (on_loan, loan, _) = borrow_book(
            &book(1, 1),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 1),
            None,
            LoanPeriod::default(),
        )
        .unwrap();
        let (_, returned, _) = return_loan(&loan, &on_loan, date(2024, 3, 2)).unwrap();

        assert!(!is_overdue(&returned, date(2024, 4, 1)));
    }

    // TDD: was_returned_late() のテスト
    #[test]
    fn test_was_returned_late_matches_overdue_boundary() {
        let (on_loan, loan, _) = borrow_book(
            &book(1, 1),
            "Alice".to_string(),
            borrower(),
            date(2024, 3, 1),
            Some(date(2024, 3, 15)),
            LoanPeriod::default(),
        )
        .unwrap();
        assert!(!was_returned_late(&loan));

        let (_, on_due, event) = return_loan(&loan, &on_loan, date(2024, 3, 15)).unwrap();
        assert!(!was_returned_late(&on_due));
        assert_eq!(event.was_overdue, was_returned_late(&on_due));

        let (_, late, event) = return_loan(&loan, &on_loan, date(2024, 3, 16)).unwrap();
        assert!(was_returned_late(&late));
        assert_eq!(event.was_overdue, was_returned_late(&late));
    }
}
