//! End-to-end entry points.
//!
//! One call runs join, aggregate and emit for a query against already
//! loaded inputs. Everything the dashboard shell used to keep in session
//! state (the uploaded tables, the selected page, year, disease and color
//! scale) is passed in explicitly.

use disease_map_cases::CaseTable;
use disease_map_choropleth_models::{ColorScale, ComparisonQuery, MapQuery, RenderPayload};
use disease_map_geography::reconcile::reconcile;
use disease_map_geography_models::RegionGeometry;

use crate::ChoroplethError;
use crate::aggregate::aggregate;
use crate::batch;
use crate::join::join;
use crate::payload::emit;

/// Renders one map for a single year and disease.
///
/// # Errors
///
/// Returns [`ChoroplethError`] if the disease is not in the table, there
/// is no geometry, the join is ambiguous, or the total overflows.
pub fn render_map(
    table: &CaseTable,
    geometries: &[RegionGeometry],
    query: &MapQuery,
    scale: &ColorScale,
) -> Result<RenderPayload, ChoroplethError> {
    log_reconciliation(table, geometries);

    let joined = join(geometries, table.records(), query.year, &query.disease)?;
    let result = aggregate(&joined, query.year, &query.disease, query.mode)?;
    let payload = emit(&result, geometries, scale)?;

    log::info!("Rendered '{}'", payload.title);
    Ok(payload)
}

/// Renders one map per requested year, in request order.
///
/// # Errors
///
/// Returns [`ChoroplethError`] if the years repeat, the disease is not in
/// the table, or any single year fails (wrapped in
/// [`ChoroplethError::Batch`]).
pub fn compare_years(
    table: &CaseTable,
    geometries: &[RegionGeometry],
    query: &ComparisonQuery,
    scale: &ColorScale,
) -> Result<Vec<RenderPayload>, ChoroplethError> {
    log_reconciliation(table, geometries);

    #[cfg(feature = "parallel")]
    let results = batch::build_parallel(
        geometries,
        table.records(),
        &query.years,
        &query.disease,
        query.mode,
    )?;
    #[cfg(not(feature = "parallel"))]
    let results = batch::build(
        geometries,
        table.records(),
        &query.years,
        &query.disease,
        query.mode,
    )?;

    results
        .iter()
        .map(|result| emit(result, geometries, scale))
        .collect()
}

fn log_reconciliation(table: &CaseTable, geometries: &[RegionGeometry]) {
    reconcile(geometries.iter().map(RegionGeometry::key), table.region_keys()).log_summary();
}
