//! Small cli for summarizing weekly tool activity written down by hand as dot strings.
//! A log looks like
//!
//! ```text
//! # 2024/11/25-29
//! * GitHub: 月.....火...水.木...金........
//! * slack: Mon...Tue....Wed.....Thu.Fri...
//! ```
//!
//! [activity] turns such text (or JSON) into flat records, [cli] prints them as tables and
//! heatmaps.

pub mod activity;
pub mod cli;
pub mod utils;
