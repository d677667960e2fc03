pub mod aggregate;
pub mod columns;
pub mod dedup;
pub mod etl;
pub mod merge;
pub mod pipeline;
pub mod project;
pub mod resolve;
pub mod weight;

pub use crate::domain::model::{ExtractGroup, PipelineOutput, RawExtract, Record, Table};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RawRecordSource, Storage};
pub use crate::utils::error::Result;
