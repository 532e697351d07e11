use crate::application::{self, Library};
use crate::domain::value_objects::BorrowerId;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{
    error::{ApiError, QueryError},
    types::{
        AddBookRequest, BookResponse, BookReturnedResponse, BorrowBookRequest, DashboardResponse,
        ListLoansQuery, LoanResponse, OverdueQuery, ReturnBookRequest, SearchQuery,
        parse_search_field, parse_status_filter,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
///
/// 1セッション分の蔵書目録と貸出台帳。1リクエストにつき1回だけロックし、
/// 1つの操作を最後まで実行する。
pub struct AppState {
    pub library: Mutex<Library>,
}

impl AppState {
    pub fn new(library: Library) -> Self {
        Self {
            library: Mutex::new(library),
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /books - 書籍を登録
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    req: Result<Json<AddBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let Json(req) = req?;
    let cmd = req.try_into_command()?;

    let mut library = state.library.lock().await;
    let book = application::add_book(&mut library, cmd)?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(&book))))
}

/// POST /loans - 書籍を貸出
///
/// 強制されるビジネスルール:
/// - 書籍が存在すること
/// - 在庫が1冊以上あること
/// - 利用者名・利用者IDが空でないこと
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    req: Result<Json<BorrowBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LoanResponse>), ApiError> {
    let Json(req) = req?;
    let cmd = req.try_into_command(today())?;

    let mut library = state.library.lock().await;
    let loan = application::borrow_book(&mut library, cmd)?;

    Ok((StatusCode::CREATED, Json(LoanResponse::from(&loan))))
}

/// POST /loans/return - 書籍を返却
///
/// 利用者が同じ書籍を複数冊借りている場合は最も古い貸出を返却する。
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    req: Result<Json<ReturnBookRequest>, JsonRejection>,
) -> Result<Json<BookReturnedResponse>, ApiError> {
    let Json(req) = req?;
    let cmd = req.try_into_command(today())?;

    let mut library = state.library.lock().await;
    let loan = application::return_book(&mut library, cmd)?;

    Ok(Json(BookReturnedResponse::from(&loan)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /dashboard - 集計
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let library = state.library.lock().await;
    Json(DashboardResponse::from(application::dashboard(&library)))
}

/// GET /books - 全書籍（登録順）
pub async fn list_books(State(state): State<Arc<AppState>>) -> Json<Vec<BookResponse>> {
    let library = state.library.lock().await;
    let books: Vec<BookResponse> = application::list_books(&library)
        .map(BookResponse::from)
        .collect();
    Json(books)
}

/// GET /books/available - 貸出可能な書籍
pub async fn list_available_books(State(state): State<Arc<AppState>>) -> Json<Vec<BookResponse>> {
    let library = state.library.lock().await;
    let books: Vec<BookResponse> = application::list_available_books(&library)
        .map(BookResponse::from)
        .collect();
    Json(books)
}

/// GET /books/search - 書籍検索
///
/// クエリパラメータ:
/// - by: 検索項目（title, author, category, id）（必須）
/// - q: 検索語（必須、空白のみ不可）
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<BookResponse>>, QueryError> {
    let Query(query) = query?;
    let field = query
        .by
        .as_deref()
        .ok_or_else(|| QueryError::BadRequest("by query parameter is required".to_string()))
        .and_then(|by| parse_search_field(by).map_err(QueryError::BadRequest))?;

    let q = query
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| QueryError::BadRequest("q query parameter is required".to_string()))?;

    let library = state.library.lock().await;
    let results: Vec<BookResponse> = application::search_books(&library, field, &q)
        .map(BookResponse::from)
        .collect();

    tracing::debug!(?field, query = %q, found = results.len(), "search books");
    Ok(Json(results))
}

/// GET /books/export.csv - 目録のCSVダウンロード
pub async fn export_books(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let library = state.library.lock().await;
    let csv = application::export_catalog_csv(&library)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"library_inventory.csv\"",
            ),
        ],
        csv,
    ))
}

/// GET /loans - 台帳の一覧
///
/// クエリパラメータ:
/// - status: ステータスでフィルタリング（borrowed, returned）（オプション）
pub async fn list_loans(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListLoansQuery>, QueryRejection>,
) -> Result<Json<Vec<LoanResponse>>, QueryError> {
    let Query(query) = query?;
    let status = query
        .status
        .as_deref()
        .map(parse_status_filter)
        .transpose()
        .map_err(QueryError::BadRequest)?;

    let library = state.library.lock().await;
    let loans: Vec<LoanResponse> = match status {
        Some(status) => application::list_loans_by_status(&library, status)
            .map(LoanResponse::from)
            .collect(),
        None => application::list_loans(&library)
            .map(LoanResponse::from)
            .collect(),
    };

    Ok(Json(loans))
}

/// GET /loans/active - 貸出中の一覧
pub async fn list_active_loans(State(state): State<Arc<AppState>>) -> Json<Vec<LoanResponse>> {
    let library = state.library.lock().await;
    let loans: Vec<LoanResponse> = application::list_active_loans(&library)
        .map(LoanResponse::from)
        .collect();
    Json(loans)
}

/// GET /loans/overdue - 延滞の一覧
///
/// クエリパラメータ:
/// - as_of: 基準日 YYYY-MM-DD（オプション、省略時は当日）
pub async fn list_overdue_loans(
    State(state): State<Arc<AppState>>,
    query: Result<Query<OverdueQuery>, QueryRejection>,
) -> Result<Json<Vec<LoanResponse>>, QueryError> {
    let Query(query) = query?;
    let as_of = query.as_of.unwrap_or_else(today);

    let library = state.library.lock().await;
    let loans: Vec<LoanResponse> = application::list_overdue_loans(&library, as_of)
        .map(LoanResponse::from)
        .collect();
    Ok(Json(loans))
}

/// GET /borrowers - 貸出中の利用者ID
pub async fn list_borrowers(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let library = state.library.lock().await;
    let ids: Vec<String> = application::list_borrower_ids(&library)
        .into_iter()
        .map(String::from)
        .collect();
    Json(ids)
}

/// GET /borrowers/:borrower_id/loans - 利用者の貸出中の一覧
pub async fn list_borrower_loans(
    State(state): State<Arc<AppState>>,
    Path(borrower_id): Path<String>,
) -> Result<Json<Vec<LoanResponse>>, QueryError> {
    let borrower_id = BorrowerId::new(borrower_id)
        .map_err(|e| QueryError::BadRequest(format!("borrower_id: {}", e)))?;

    let library = state.library.lock().await;
    let loans: Vec<LoanResponse> =
        application::list_active_loans_for_borrower(&library, &borrower_id)
            .map(LoanResponse::from)
            .collect();
    Ok(Json(loans))
}
