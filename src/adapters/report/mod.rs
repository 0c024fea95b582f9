//! Report Adapters
//!
//! Implementations of the ReportGenerator port.

mod in_memory_report_queue;

pub use in_memory_report_queue::InMemoryReportQueue;
