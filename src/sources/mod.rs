// Adapters for the raw-record boundary: the HTTP fetcher that stages the
// bronze layer, and the staged-CSV reader the pipeline consumes.

pub mod bronze;
pub mod fetch;
