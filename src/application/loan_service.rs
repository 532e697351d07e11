use crate::domain::{
    self, BorrowBookError, CopyAccountingError, ReturnLoanError,
    commands::{BorrowBook, ReturnBook},
    loan::Loan,
    value_objects::{BookId, BorrowerId, LoanStatus},
};

use super::errors::{LibraryError, Result};
use super::library::Library;

fn copy_error(book_id: BookId, err: CopyAccountingError) -> LibraryError {
    match err {
        CopyAccountingError::Exhausted => LibraryError::Exhausted(book_id),
        CopyAccountingError::AllCopiesOnShelf => LibraryError::CopyCountOverflow(book_id),
    }
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍が目録に存在すること
/// - 在庫が1冊以上あること
/// - 利用者名・利用者IDが空でないこと
///
/// # 一貫性保証
///
/// 在庫の減算と台帳への追記は、新しい状態をすべて計算してから
/// まとめて書き込む。途中で失敗した場合はどちらも反映されない。
///
/// # 戻り値
/// 追加された貸出
pub fn borrow_book(library: &mut Library, cmd: BorrowBook) -> Result<Loan> {
    // 1. 書籍の存在確認
    let book = library
        .catalog
        .get(&cmd.book_id)
        .ok_or_else(|| LibraryError::NotFound(cmd.book_id.clone()))?;

    // 2. ドメイン層の純粋関数を呼び出し
    let (updated_book, loan, event) = domain::loan::borrow_book(
        book,
        cmd.borrower_name,
        cmd.borrower_id,
        cmd.borrow_date,
        cmd.due_date,
        library.loan_period,
    )
    .map_err(|e| match e {
        BorrowBookError::BlankField(field) => {
            LibraryError::ValidationError(format!("{} is required", field))
        }
        BorrowBookError::DueBeforeBorrow => {
            LibraryError::ValidationError("due date must not precede borrow date".to_string())
        }
        BorrowBookError::DueDateOutOfRange => LibraryError::ValidationError(
            "borrow date is too late to compute a due date".to_string(),
        ),
        BorrowBookError::Unavailable => LibraryError::BookUnavailable(cmd.book_id.clone()),
        BorrowBookError::Copy(err) => copy_error(cmd.book_id.clone(), err),
    })?;

    // 3. 目録と台帳にまとめて反映
    library.catalog.save(updated_book);
    library.ledger.append(loan.clone());
    tracing::info!(?event, "book borrowed");

    Ok(loan)
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 書籍IDと利用者IDが一致する貸出中の記録があること
/// - 該当が複数ある場合は台帳順で最初（最も古い貸出）を返却する
/// - 延滞していても返却は受け付ける
///
/// # 一貫性保証
///
/// 台帳の更新が成功した場合にのみ在庫を戻す。
///
/// # 戻り値
/// 返却済みになった貸出
pub fn return_book(library: &mut Library, cmd: ReturnBook) -> Result<Loan> {
    let no_active_loan = || LibraryError::NoActiveLoan {
        book_id: cmd.book_id.clone(),
        borrower_id: cmd.borrower_id.clone(),
    };

    // 1. 最も古い貸出中の記録を探す
    let loan = library
        .ledger
        .loans()
        .find(|l| l.is_active() && l.book_id == cmd.book_id && l.borrower_id == cmd.borrower_id)
        .cloned()
        .ok_or_else(no_active_loan)?;

    // 2. 書籍の存在確認
    let book = library
        .catalog
        .get(&cmd.book_id)
        .ok_or_else(|| LibraryError::NotFound(cmd.book_id.clone()))?;

    // 3. ドメイン層の純粋関数を呼び出し
    let (updated_book, returned, event) = domain::loan::return_loan(&loan, book, cmd.returned_on)
        .map_err(|e| match e {
            ReturnLoanError::AlreadyReturned => no_active_loan(),
            ReturnLoanError::Copy(err) => copy_error(cmd.book_id.clone(), err),
        })?;

    // 4. 台帳と目録にまとめて反映
    if !library.ledger.save(returned.clone()) {
        return Err(no_active_loan());
    }
    library.catalog.save(updated_book);
    tracing::info!(?event, "book returned");

    Ok(returned)
}

/// 台帳の全行を台帳順に返す
pub fn list_loans(library: &Library) -> impl Iterator<Item = &Loan> + '_ {
    library.ledger.loans()
}

/// ステータスで絞り込んだ行を台帳順に返す
pub fn list_loans_by_status(
    library: &Library,
    status: LoanStatus,
) -> impl Iterator<Item = &Loan> + '_ {
    library.ledger.loans().filter(move |l| l.status == status)
}

/// 貸出中の行を台帳順に返す
pub fn list_active_loans(library: &Library) -> impl Iterator<Item = &Loan> + '_ {
    list_loans_by_status(library, LoanStatus::Borrowed)
}

/// 貸出中の利用者IDを重複なく、台帳に現れた順で返す
///
/// 返却画面の1段目（利用者の選択）に使われる。
pub fn list_borrower_ids(library: &Library) -> Vec<BorrowerId> {
    let mut ids: Vec<BorrowerId> = Vec::new();
    for loan in list_active_loans(library) {
        if !ids.contains(&loan.borrower_id) {
            ids.push(loan.borrower_id.clone());
        }
    }
    ids
}

/// 利用者の貸出中の行を台帳順に返す
///
/// 返却画面の2段目（返却する書籍の選択）に使われる。
pub fn list_active_loans_for_borrower<'a>(
    library: &'a Library,
    borrower_id: &'a BorrowerId,
) -> impl Iterator<Item = &'a Loan> + 'a {
    list_active_loans(library).filter(move |l| &l.borrower_id == borrower_id)
}
