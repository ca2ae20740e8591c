//! Query functions, organized by table.

pub mod matches;
pub mod records;
pub mod scan_history;
pub mod terms;
pub mod views;
