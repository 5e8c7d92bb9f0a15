//! casf-io — CASF table loading, prediction export and regression plots.

pub mod table;
pub mod export;
pub mod plot;

pub use export::{save_predictions, write_predictions, write_target_outcomes};
pub use plot::{plot_linear_reg, PlotOptions};
pub use table::{load_pose_table, parse_labelled_values, parse_paired_values, parse_pose_table, TableFormat};
