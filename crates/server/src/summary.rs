//! Dashboard and history read endpoints

use api_types::{
    summary::{
        CategoryTotal, InstallmentBill, MonthInstallments, MonthTotal, PendingInstallments,
        Summary, SummaryQuery,
    },
    transaction::{CollapsedView, HistoryQuery, SeriesProgress, TransactionView},
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    ServerError,
    server::ServerState,
    transactions::{map_api_frequency, map_api_kind, view},
};

fn summary_view(figures: engine::Figures) -> Summary {
    Summary {
        as_of: figures.as_of,
        total_balance: figures.total_balance,
        monthly_income: figures.monthly_income,
        monthly_expenses: figures.monthly_expenses,
        category_totals: figures
            .category_totals
            .into_iter()
            .map(|c| CategoryTotal {
                category: c.category,
                total: c.total,
            })
            .collect(),
        pending_installments: PendingInstallments {
            count: figures.pending_installments.count,
            total: figures.pending_installments.total,
        },
        month_installments: MonthInstallments {
            bills: figures
                .month_installments
                .bills
                .into_iter()
                .map(|b| InstallmentBill {
                    description: b.description,
                    value: b.value,
                    index: b.index,
                    count: b.count,
                })
                .collect(),
            total: figures.month_installments.total,
        },
        monthly_expense_series: figures
            .monthly_expense_series
            .into_iter()
            .map(|m| MonthTotal {
                year: m.year,
                month: m.month,
                total: m.total,
            })
            .collect(),
    }
}

pub async fn get_summary(
    State(state): State<ServerState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<Summary>, ServerError> {
    let Query(query) = query?;
    let as_of = query.as_of.unwrap_or_else(|| state.today());

    let figures = state.engine.summary(as_of).await?;
    Ok(Json(summary_view(figures)))
}

pub async fn history(
    State(state): State<ServerState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let Query(query) = query?;
    let as_of = query.as_of.unwrap_or_else(|| state.today());

    let filter = engine::HistoryFilter {
        search: query.search,
        kind: query.kind.map(map_api_kind),
        frequency: query.frequency.map(map_api_frequency),
        category: query.category.filter(|c| !c.is_empty()),
        from: query.from,
        to: query.to,
    };
    let transactions = state.engine.history(&filter, as_of).await?;

    Ok(Json(transactions.into_iter().map(view).collect()))
}

pub async fn collapsed(
    State(state): State<ServerState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<Vec<CollapsedView>>, ServerError> {
    let Query(query) = query?;
    let as_of = query.as_of.unwrap_or_else(|| state.today());

    let entries = state.engine.collapsed(as_of).await?;
    Ok(Json(
        entries
            .into_iter()
            .map(|entry| CollapsedView {
                transaction: view(entry.transaction),
                progress: entry.progress.map(|p| SeriesProgress {
                    paid: p.paid,
                    total: p.total,
                    installment_value: p.installment_value,
                    total_value: p.total_value,
                }),
            })
            .collect(),
    ))
}
