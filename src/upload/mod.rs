mod pipeline;

pub use pipeline::{CheckinOutcome, UploadPipeline};
