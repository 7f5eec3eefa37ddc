//! Run-level state machine

use std::fmt;

/// Stage reached by an ETL run
///
/// Stages advance strictly in declaration order; any failure moves the run to
/// [`RunStage::Terminated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Init,
    ConfigLoaded,
    StoreConnected,
    FeedConnected,
    CollectionLocated,
    DataFetched,
    DataLoaded,
    SummaryPrinted,
    Done,
    Terminated { exit_code: i32 },
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStage::Init => write!(f, "init"),
            RunStage::ConfigLoaded => write!(f, "config_loaded"),
            RunStage::StoreConnected => write!(f, "store_connected"),
            RunStage::FeedConnected => write!(f, "feed_connected"),
            RunStage::CollectionLocated => write!(f, "collection_located"),
            RunStage::DataFetched => write!(f, "data_fetched"),
            RunStage::DataLoaded => write!(f, "data_loaded"),
            RunStage::SummaryPrinted => write!(f, "summary_printed"),
            RunStage::Done => write!(f, "done"),
            RunStage::Terminated { exit_code } => write!(f, "terminated({exit_code})"),
        }
    }
}
