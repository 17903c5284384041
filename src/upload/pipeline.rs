use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::remote::{
    AnalysisClient, AnalysisResult, MetadataStore, NewUploadRecord, ObjectStore, RecordStatus,
    UploadRecord,
};
use crate::session::AudioAsset;

/// Everything a finished check-in produced: the durable record and the
/// analysis the service returned for it.
#[derive(Debug, Clone)]
pub struct CheckinOutcome {
    pub record: UploadRecord,
    pub result: AnalysisResult,
}

/// Uploads a finalized audio asset and requests its analysis
///
/// The three collaborators are injected; the pipeline owns no transport of
/// its own. Exactly one upload may be in flight at a time.
pub struct UploadPipeline {
    store: Arc<dyn ObjectStore>,
    metadata: Arc<dyn MetadataStore>,
    analysis: Arc<dyn AnalysisClient>,
    in_flight: AtomicBool,
}

impl UploadPipeline {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        metadata: Arc<dyn MetadataStore>,
        analysis: Arc<dyn AnalysisClient>,
    ) -> Self {
        Self {
            store,
            metadata,
            analysis,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Upload an asset for `user_id` and run it through analysis.
    ///
    /// The asset is only borrowed: on any failure the caller still holds it
    /// and can retry. Steps are awaited sequentially; there is no
    /// cancellation of an upload once it has begun.
    pub async fn upload(&self, asset: &AudioAsset, user_id: &str) -> Result<CheckinOutcome> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(Error::UploadInFlight);
        }

        let outcome = self.run(asset, user_id).await;
        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run(&self, asset: &AudioAsset, user_id: &str) -> Result<CheckinOutcome> {
        // Key collisions are treated as negligible; no dedup or versioning.
        let key = format!(
            "{}_{}.{}",
            user_id,
            Utc::now().timestamp_millis(),
            asset.extension()
        );

        info!(
            "Uploading check-in audio: {} bytes as {}",
            asset.bytes.len(),
            key
        );

        // 1. Durable object write. Failure leaves the asset with the caller.
        let file_path = self
            .store
            .put(&key, asset.bytes.clone(), &asset.mime_type)
            .await?;

        // 2. Publicly resolvable URL for the stored object.
        let file_url = self.store.public_url(&key);

        // 3. Record insert. On failure the object stays in storage without
        //    a record; there is no compensating rollback.
        let mut record = self
            .metadata
            .insert(NewUploadRecord {
                user_id: user_id.to_string(),
                file_path,
                file_url: file_url.clone(),
                status: RecordStatus::Pending,
                duration_seconds: asset.duration_seconds,
            })
            .await?;

        // 4. Analysis. On failure the record stays pending indefinitely.
        let result = self.analysis.analyze(record.id, &file_url).await?;

        // 5. The results are in hand, so a failed status write only costs a
        //    remote row that stays pending; it does not fail the check-in.
        record.status = RecordStatus::Processed;
        if let Err(e) = self
            .metadata
            .update_status(record.id, RecordStatus::Processed)
            .await
        {
            warn!("Record {} left pending remotely: {}", record.id, e);
        }

        Ok(CheckinOutcome { record, result })
    }
}
