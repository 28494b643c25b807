pub mod kpi_card;
pub mod line_item_table;
pub mod toast;
