//! # PDF Organizer
//!
//! Sorts a directory of PDF documents into topic folders by keyword evidence.
//!
//! Each document's evidence blob (file name, metadata keywords, title and
//! first-page text) is scored against a keyword list per category. The
//! category with the most whole-word matches wins, ties going to the category
//! listed first. Documents with no matches land in `Other`. Documents are
//! classified and moved concurrently, and a percentage report is written once
//! every worker has finished.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────────────┐   ┌───────────┐   ┌────────┐
//! │ discover │──▶│ workers (bounded)    │──▶│ aggregate │──▶│ report │
//! │ *.pdf    │   │ extract→score→move   │   │ tallies   │   │ .txt   │
//! └──────────┘   └──────────────────────┘   └───────────┘   └────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! pdforganizer ./inbox ./reports
//! pdforganizer ./inbox ./reports --correctness --ground-truth labels.json
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`category`] | The fixed category enumeration |
//! | [`config`] | TOML configuration parsing |
//! | [`keywords`] | Keyword map and ground-truth loading |
//! | [`discover`] | Finding input documents |
//! | [`extract`] | Evidence extraction from PDFs |
//! | [`scorer`] | Keyword scoring and tie-breaking |
//! | [`relocate`] | Moving documents into category folders |
//! | [`organize`] | Concurrent workers and dispatch |
//! | [`aggregate`] | Folding outcomes into tallies |
//! | [`report`] | Percentage and correctness report |
//! | [`pipeline`] | One complete run |
//! | [`progress`] | Progress reporting on stderr |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`error`] | Typed error conditions |
//! | [`models`] | Core data types |

pub mod aggregate;
pub mod category;
pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod logging;
pub mod models;
pub mod organize;
pub mod pipeline;
pub mod progress;
pub mod relocate;
pub mod report;
pub mod scorer;
