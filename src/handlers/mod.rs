pub mod analysis_handler;
pub mod ingestion;

pub use analysis_handler::AnalysisHandler;
