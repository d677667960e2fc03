//! Column vocabulary for the unified table.
//!
//! The two port authorities publish overlapping reports under disjoint
//! column names. The working (pre-projection) vocabulary is the primary
//! source's; the alternates are the second source's sibling columns that the
//! field resolver folds in and drops. The canonical names are what
//! downstream consumers see after projection.

/// Injected at merge time, never renamed or overwritten.
pub const ORIGIN_LOCATION: &str = "origin_location";

// Canonical output columns, in projection order.
pub const ARRIVAL_DATE: &str = "arrival_date";
pub const DIRECTION: &str = "direction";
pub const COMMODITY: &str = "commodity";
pub const WEIGHT: &str = "weight";

// Aggregate output columns.
pub const TOTAL_WEIGHT: &str = "total_weight";
pub const COUNT: &str = "count";

// Working columns (primary source vocabulary).
pub const ARRIVAL: &str = "Chegada";
pub const SENTIDO: &str = "Sentido";
pub const MERCADORIA: &str = "Mercadoria";
pub const FORECAST_WEIGHT: &str = "Previsto";

// Alternate/legacy columns (second source vocabulary), dropped by the
// field resolver after their values are folded in.
pub const ARRIVAL_ALT: &str = "Cheg/Arrival d/m/y";
pub const OPERATION_LEGACY: &str = "Operaç Operat";
pub const MERCADORIA_ALT: &str = "Mercadoria Goods";
pub const WEIGHT_TEXT: &str = "Peso Weight";
