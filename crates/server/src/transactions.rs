//! Transactions API endpoints

use api_types::{
    installment::InstallmentPlanNew,
    transaction::{
        Frequency as ApiFrequency, TransactionInput, TransactionKind as ApiKind, TransactionView,
    },
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

pub(crate) fn map_api_kind(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::Income => engine::TransactionKind::Income,
        ApiKind::Expense => engine::TransactionKind::Expense,
    }
}

pub(crate) fn map_frequency(frequency: engine::Frequency) -> ApiFrequency {
    match frequency {
        engine::Frequency::Fixed => ApiFrequency::Fixed,
        engine::Frequency::Variable => ApiFrequency::Variable,
        engine::Frequency::Installment => ApiFrequency::Installment,
    }
}

pub(crate) fn map_api_frequency(frequency: ApiFrequency) -> engine::Frequency {
    match frequency {
        ApiFrequency::Fixed => engine::Frequency::Fixed,
        ApiFrequency::Variable => engine::Frequency::Variable,
        ApiFrequency::Installment => engine::Frequency::Installment,
    }
}

pub(crate) fn view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: map_kind(tx.kind),
        frequency: map_frequency(tx.frequency),
        description: tx.description,
        amount: tx.amount,
        installment_amount: tx.installment_amount,
        category: tx.category,
        date: tx.date,
        installment_count: tx.installment_count,
        installment_index: tx.installment_index,
        series_id: tx.series_id,
    }
}

fn engine_input(payload: TransactionInput) -> engine::TransactionInput {
    engine::TransactionInput {
        kind: payload.kind,
        frequency: payload.frequency,
        description: payload.description,
        amount: payload.amount,
        category: payload.category,
        date: payload.date,
        installment_count: payload.installment_count,
        installment_index: payload.installment_index,
        installment_amount: payload.installment_amount,
        series_id: payload.series_id,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state.engine.list_transactions().await?;
    Ok(Json(transactions.into_iter().map(view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TransactionView>, ServerError> {
    let Path(id) = id?;
    let tx = state.engine.transaction(id).await?;
    Ok(Json(view(tx)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let Json(payload) = payload?;
    let tx = state
        .engine
        .create_transaction(&engine_input(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(view(tx))))
}

pub async fn replace(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<Json<TransactionView>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let tx = state
        .engine
        .replace_transaction(id, &engine_input(payload))
        .await?;

    Ok(Json(view(tx)))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.engine.delete_transaction(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn installment_plan_new(
    State(state): State<ServerState>,
    payload: Result<Json<InstallmentPlanNew>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<TransactionView>>), ServerError> {
    let Json(payload) = payload?;
    let start_date = payload.start_date.unwrap_or_else(|| state.today());

    let cmd = engine::InstallmentPlanCmd::new(
        payload.description,
        payload.total_amount,
        payload.category,
        map_api_kind(payload.kind),
        start_date,
        payload.count,
    );
    let rows = state.engine.create_installment_plan(&cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(rows.into_iter().map(view).collect()),
    ))
}
