use chrono::{Duration, NaiveDate};
use library_inventory::application::{
    Library, LibraryError, borrow_book, list_active_loans, list_books, list_overdue_loans,
    return_book, search_books,
};
use library_inventory::domain::book::Book;
use library_inventory::domain::commands::*;
use library_inventory::domain::value_objects::*;
use proptest::prelude::*;

// ============================================================================
// テスト用ヘルパー
// ============================================================================

fn seeded() -> Library {
    Library::seeded(LoanPeriod::default()).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn book<'a>(library: &'a Library, id: &str) -> &'a Book {
    library.catalog.get(&BookId::new(id).unwrap()).unwrap()
}

fn borrow_cmd(id: &str, borrower: &str) -> BorrowBook {
    BorrowBook {
        book_id: BookId::new(id).unwrap(),
        borrower_name: format!("Borrower {}", borrower),
        borrower_id: BorrowerId::new(borrower).unwrap(),
        borrow_date: today(),
        due_date: None,
    }
}

fn return_cmd(id: &str, borrower: &str) -> ReturnBook {
    ReturnBook {
        book_id: BookId::new(id).unwrap(),
        borrower_id: BorrowerId::new(borrower).unwrap(),
        returned_on: today() + Duration::days(3),
    }
}

// ============================================================================
// 統合テスト（貸出ライフサイクル）
// ============================================================================

#[test]
fn test_borrow_until_out_of_stock_and_return_one() {
    let mut library = seeded();
    assert_eq!(book(&library, "B001").available_copies, 5);

    // 1冊目: 14日後が期限
    let loan = borrow_book(&mut library, borrow_cmd("B001", "STU001")).unwrap();
    assert_eq!(loan.due_date, today() + Duration::days(14));
    assert_eq!(loan.status, LoanStatus::Borrowed);
    assert_eq!(book(&library, "B001").available_copies, 4);
    assert_eq!(book(&library, "B001").status, BookStatus::Available);

    // 残り4冊を別の利用者へ
    for borrower in ["STU002", "STU003", "STU004", "STU005"] {
        borrow_book(&mut library, borrow_cmd("B001", borrower)).unwrap();
    }
    assert_eq!(book(&library, "B001").available_copies, 0);
    assert_eq!(book(&library, "B001").status, BookStatus::OutOfStock);

    // 在庫切れ
    let result = borrow_book(&mut library, borrow_cmd("B001", "STU006"));
    assert!(matches!(result, Err(LibraryError::BookUnavailable(_))));
    assert_eq!(list_active_loans(&library).count(), 5);

    // 1冊返却
    let returned = return_book(&mut library, return_cmd("B001", "STU003")).unwrap();
    assert_eq!(returned.status, LoanStatus::Returned);
    assert_eq!(book(&library, "B001").available_copies, 1);
    assert_eq!(book(&library, "B001").status, BookStatus::Available);
}

#[test]
fn test_copy_accounting_invariant_after_mixed_operations() {
    let mut library = seeded();
    borrow_book(&mut library, borrow_cmd("B002", "STU001")).unwrap();
    borrow_book(&mut library, borrow_cmd("B003", "STU001")).unwrap();
    borrow_book(&mut library, borrow_cmd("B003", "STU002")).unwrap();
    return_book(&mut library, return_cmd("B003", "STU001")).unwrap();

    for b in list_books(&library) {
        let active = list_active_loans(&library)
            .filter(|l| l.book_id == b.book_id)
            .count() as u32;
        assert_eq!(b.available_copies + active, b.total_copies);
        assert_eq!(b.status, BookStatus::derive(b.available_copies));
    }
}

#[test]
fn test_overdue_excludes_due_today() {
    let mut library = seeded();
    let mut on_time = borrow_cmd("B002", "STU001");
    on_time.due_date = Some(today());
    let mut late = borrow_cmd("B002", "STU002");
    late.borrow_date = today() - Duration::days(20);
    late.due_date = Some(today() - Duration::days(1));

    borrow_book(&mut library, on_time).unwrap();
    let late_loan = borrow_book(&mut library, late).unwrap();

    let overdue: Vec<_> = list_overdue_loans(&library, today()).collect();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].loan_id, late_loan.loan_id);
}

#[test]
fn test_search_title_python() {
    let library = seeded();

    let found: Vec<&str> = search_books(&library, SearchField::Title, "PYTHON")
        .map(|b| b.book_id.value())
        .collect();

    assert_eq!(found, vec!["B001"]);
}

// ============================================================================
// プロパティテスト
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Borrow(usize),
    Return(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(0usize..4).prop_map(Op::Borrow), (0usize..4).prop_map(Op::Return)]
}

proptest! {
    #[test]
    fn prop_available_copies_stay_in_bounds(ops in prop::collection::vec(op(), 0..60)) {
        let mut library = seeded();
        let borrowers = ["STU001", "STU002", "STU003", "STU004"];

        for op in ops {
            let before = book(&library, "B002").available_copies;
            match op {
                Op::Borrow(i) => {
                    match borrow_book(&mut library, borrow_cmd("B002", borrowers[i])) {
                        Ok(_) => {
                            prop_assert_eq!(book(&library, "B002").available_copies, before - 1);
                        }
                        Err(LibraryError::BookUnavailable(_)) => {
                            prop_assert_eq!(before, 0);
                        }
                        Err(e) => {
                            prop_assert!(false, "unexpected error: {}", e);
                        }
                    }
                }
                Op::Return(i) => {
                    match return_book(&mut library, return_cmd("B002", borrowers[i])) {
                        Ok(_) => {
                            prop_assert_eq!(book(&library, "B002").available_copies, before + 1);
                        }
                        Err(LibraryError::NoActiveLoan { .. }) => {
                            prop_assert_eq!(book(&library, "B002").available_copies, before);
                        }
                        Err(e) => {
                            prop_assert!(false, "unexpected error: {}", e);
                        }
                    }
                }
            }

            let current = book(&library, "B002");
            prop_assert!(current.available_copies <= current.total_copies);
            let active = list_active_loans(&library).count() as u32;
            prop_assert_eq!(current.available_copies + active, current.total_copies);
        }
    }
}
