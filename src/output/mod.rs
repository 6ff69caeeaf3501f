//! Final report generation
//!
//! The run always concludes with `final_report.json` at the output root and
//! a console summary, whether it completed, failed, or was interrupted.

mod report;

pub use report::{
    build_report, print_report, write_report, FinalReport, ReportConfig, ReportSummary,
};
