//! Class names shared across components. Definitions live in `assets/main.css`.

// ============================================
// BUTTON STYLES
// ============================================

pub const BTN_PRIMARY: &str = "btn-primary";
pub const BTN_SUCCESS: &str = "btn-success";
pub const BTN_DELETE: &str = "btn-delete";

// ============================================
// INPUT STYLES
// ============================================

pub const INPUT: &str = "input";
pub const LABEL: &str = "label";
pub const FIELD: &str = "field";
pub const FORM_ROW: &str = "form-row";
pub const CHECKBOX_ROW: &str = "checkbox-row";

// ============================================
// PANEL / CONTAINER STYLES
// ============================================

pub const PANEL: &str = "panel";
pub const KPI_GRID: &str = "kpi-grid";

// ============================================
// TABLE STYLES
// ============================================

pub const TABLE_CONTAINER: &str = "table-container";
pub const TABLE: &str = "table";
