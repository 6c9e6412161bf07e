//! Paginated bar and swarm charts of a statistics table.
//!
//! Every numeric column becomes one panel. A panel shows, per group, one bar
//! per label at the mean with a ±SD error bar, and the individual values as
//! a swarm of dots in the label's colour. Panels are laid out four to a page
//! in a 2 × 2 grid by default.
//!
//! # Example
//!
//! ```rust,no_run
//! use fjstatplot::chart::{ChartOptions, render_document};
//! use fjstatplot::sheet::text::load_table;
//!
//! let table = load_table("stats.txt")?;
//! let pages = render_document(&table, "stats.pdf", &ChartOptions::default())?;
//! println!("{} pages", pages);
//! # Ok::<(), fjstatplot::common::Error>(())
//! ```

pub mod config;
pub mod layout;
pub mod palette;
pub mod render;
pub mod stats;
pub mod swarm;

pub use config::ChartOptions;
pub use layout::{page_count, pages};
pub use render::{build_document, render_chart, render_document};
pub use stats::{CategoryLayout, Summary, summarize};
pub use swarm::swarm_offsets;
