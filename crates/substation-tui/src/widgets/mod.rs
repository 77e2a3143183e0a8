pub mod metric_tile;
pub mod sub_tabs;
