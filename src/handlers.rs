use crate::errors::AppError;
use crate::format;
use crate::models::{LegacyRecord, Metric, MetricSample};
use crate::overview::{OverviewCard, build_overview};
use crate::state::AppState;
use crate::trend::{TrendData, build_trend};
use crate::ui;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct MaterialsQuery {
    pub status: Option<String>,
    pub id: Option<String>,
}

/// One list-table row: the material's id and status plus its latest sample's
/// eleven metric cells, already formatted for display.
#[derive(Debug, Serialize)]
pub struct MaterialRow {
    pub id: String,
    pub status: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MaterialsResponse {
    pub rows: Vec<MaterialRow>,
}

#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub date: String,
    pub status: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub id: String,
    pub current_status: String,
    pub overview: Vec<OverviewCard>,
    pub table: Vec<HistoryRow>,
    pub chart: TrendData,
}

pub async fn index_page() -> Html<String> {
    Html(ui::render_index())
}

pub async fn detail_page() -> Html<String> {
    Html(ui::render_detail())
}

pub async fn legacy_page() -> Html<String> {
    Html(ui::render_legacy())
}

/// Summary rows, either for every material in a status or for a single id.
///
/// The status path fetches the index, keeps exact-label matches, then issues
/// one detail request per material, sequentially; a failed row is logged and
/// skipped, never fatal. The id path answers any failure with 404 so the
/// page can clear its table.
pub async fn get_materials(
    State(state): State<AppState>,
    Query(query): Query<MaterialsQuery>,
) -> Result<Json<MaterialsResponse>, AppError> {
    if let Some(id) = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        let detail = state.source.fetch_detail(id).await.map_err(|err| {
            warn!("id search for {id} failed: {err}");
            AppError::not_found(format!("material {id} not found"))
        })?;
        let rows = detail
            .data
            .first()
            .map(|latest| vec![material_row(&detail.id, &detail.current_status, latest)])
            .unwrap_or_default();
        return Ok(Json(MaterialsResponse { rows }));
    }

    let Some(status) = query.status else {
        return Err(AppError::bad_request("status or id parameter required"));
    };

    let index = state.source.fetch_index().await?;

    let mut rows = Vec::new();
    for material in index
        .materials
        .into_iter()
        .filter(|material| material.current_status == status)
    {
        match state.source.fetch_detail(&material.id).await {
            Ok(detail) => {
                if let Some(latest) = detail.data.first() {
                    rows.push(material_row(&material.id, &material.current_status, latest));
                }
            }
            Err(err) => warn!("skipping material {}: {err}", material.id),
        }
    }

    Ok(Json(MaterialsResponse { rows }))
}

/// Everything the detail page renders, in one payload: overview cards,
/// newest-first history rows and the chronological chart series.
pub async fn get_material_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DetailResponse>, AppError> {
    let detail = state.source.fetch_detail(&id).await?;

    let Some(current) = detail.data.first() else {
        return Err(AppError::not_found(format!("material {id} has no samples")));
    };
    let previous = detail.data.get(1);

    Ok(Json(DetailResponse {
        overview: build_overview(current, previous),
        table: detail.data.iter().map(history_row).collect(),
        chart: build_trend(&detail.data),
        id: detail.id,
        current_status: detail.current_status,
    }))
}

pub async fn get_legacy(
    State(state): State<AppState>,
) -> Result<Json<Vec<LegacyRecord>>, AppError> {
    let records = state.source.fetch_legacy().await?;
    Ok(Json(records))
}

fn material_row(id: &str, status: &str, latest: &MetricSample) -> MaterialRow {
    MaterialRow {
        id: id.to_string(),
        status: status.to_string(),
        cells: metric_cells(latest),
    }
}

fn history_row(sample: &MetricSample) -> HistoryRow {
    HistoryRow {
        date: format::format_record_date(&sample.record_date),
        status: sample.status.clone(),
        cells: metric_cells(sample),
    }
}

fn metric_cells(sample: &MetricSample) -> Vec<String> {
    Metric::ALL
        .iter()
        .map(|&metric| format::format_metric(metric.value_of(sample), metric))
        .collect()
}
