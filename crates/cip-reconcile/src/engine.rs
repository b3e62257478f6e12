use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use cip_decode::{classify, decode, decode_city_work, fingerprint, DecodeOutcome};
use cip_geodesy::GeodeticProjector;
use cip_schemas::{DisruptionFeature, DisruptionResponse, DomainEntity, FeatureCollection, RawFeature};
use cip_sink::{EntitySink, NgsiEntity, SinkError};

use crate::{DeletionWindowCache, EngineConfig, PassReport, SeenFeatureCache};

/// Drives one source's features into the sink.
///
/// Upsert order is fixed: merge first, create only when the sink reports
/// the entity as not found, never create after any other merge failure.
pub struct ReconciliationEngine {
    sink: Arc<dyn EntitySink>,
    deletions: Arc<DeletionWindowCache>,
    seen: Arc<SeenFeatureCache>,
    projector: GeodeticProjector,
    config: EngineConfig,
}

impl ReconciliationEngine {
    pub fn new(
        sink: Arc<dyn EntitySink>,
        deletions: Arc<DeletionWindowCache>,
        seen: Arc<SeenFeatureCache>,
        config: EngineConfig,
    ) -> Self {
        Self {
            sink,
            deletions,
            seen,
            projector: GeodeticProjector::default(),
            config,
        }
    }

    pub fn deletions(&self) -> &DeletionWindowCache {
        &self.deletions
    }

    pub fn seen(&self) -> &SeenFeatureCache {
        &self.seen
    }

    // -----------------------------------------------------------------------
    // Facilities
    // -----------------------------------------------------------------------

    /// One pass over the facility catalog. Features are processed strictly
    /// in order; a failing feature never aborts the pass.
    pub async fn reconcile_facilities(
        &self,
        source_url: &str,
        collection: &FeatureCollection,
    ) -> PassReport {
        let mut report = PassReport::default();

        for feature in &collection.features {
            if classify(feature.type_tag()).is_none() {
                continue;
            }
            self.reconcile_feature(source_url, feature, &mut report).await;
        }

        tracing::info!(
            source = source_url,
            merged = report.merged,
            created = report.created,
            deleted = report.deleted,
            delete_skipped = report.delete_skipped,
            ignored = report.ignored,
            failures = report.failures.len(),
            "facility pass complete"
        );
        report
    }

    async fn reconcile_feature(
        &self,
        source_url: &str,
        feature: &RawFeature,
        report: &mut PassReport,
    ) {
        let mut entity = match decode(feature) {
            DecodeOutcome::Entity(e) => e,
            DecodeOutcome::Ignored(reason) => {
                tracing::debug!(feature_id = feature.id, reason, "feature ignored");
                report.ignored += 1;
                return;
            }
            DecodeOutcome::Failed(err) => {
                tracing::warn!(feature_id = feature.id, err = %err, "failed to decode feature");
                report.fail(feature.id.to_string(), err.to_string());
                return;
            }
        };

        let decision = self.deletions.should_delete(feature);
        if decision.ok_to_delete {
            if decision.already_handled {
                report.delete_skipped += 1;
            } else {
                self.delete(feature, entity.id(), report).await;
            }
            return;
        }

        entity.set_source(format!("{source_url}/get/{}", feature.id));
        self.upsert(&entity, &feature.id.to_string(), report).await;
    }

    async fn delete(&self, feature: &RawFeature, entity_id: &str, report: &mut PassReport) {
        match self.sink.delete_entity(entity_id).await {
            Ok(()) => {
                tracing::info!(feature_id = feature.id, entity_id, "deleted retired entity");
                report.deleted += 1;
            }
            Err(err) => {
                // not retried: the window cache already counts it as handled
                tracing::info!(feature_id = feature.id, entity_id, err = %err, "delete failed");
                report.fail(feature.id.to_string(), err.to_string());
            }
        }
    }

    async fn upsert(&self, entity: &DomainEntity, feature: &str, report: &mut PassReport) {
        let ngsi = NgsiEntity::from(entity);

        match self.sink.merge_entity(&ngsi.id, &ngsi.attributes).await {
            Ok(()) => report.merged += 1,
            Err(SinkError::NotFound) => match self.sink.create_entity(&ngsi).await {
                Ok(()) => {
                    tracing::info!(entity_id = %ngsi.id, "created entity");
                    report.created += 1;
                }
                Err(err) => {
                    tracing::error!(entity_id = %ngsi.id, err = %err, "create failed");
                    report.fail(feature, err.to_string());
                }
            },
            Err(err) => {
                tracing::error!(entity_id = %ngsi.id, err = %err, "merge failed");
                report.fail(feature, err.to_string());
                pause(self.config.backoff).await;
                return;
            }
        }

        pause(self.config.throttle).await;
    }

    // -----------------------------------------------------------------------
    // City work
    // -----------------------------------------------------------------------

    /// One pass over the disruption feed. Disruptions carry no stable id, so
    /// each fingerprint is created once per process and never merged.
    pub async fn reconcile_city_work(&self, response: &DisruptionResponse) -> PassReport {
        let mut report = PassReport::default();

        for feature in &response.features {
            self.reconcile_disruption(feature, &mut report).await;
        }

        tracing::info!(
            created = report.created,
            skipped_seen = report.skipped_seen,
            failures = report.failures.len(),
            "city work pass complete"
        );
        report
    }

    async fn reconcile_disruption(&self, feature: &DisruptionFeature, report: &mut PassReport) {
        let title = &feature.properties.title;

        let fp = match fingerprint(feature) {
            Ok(fp) => fp,
            Err(err) => {
                tracing::warn!(title = %title, err = %err, "failed to fingerprint disruption");
                report.fail(title.as_str(), err.to_string());
                return;
            }
        };

        if self.seen.seen(&fp) {
            report.skipped_seen += 1;
            return;
        }

        let entity = match decode_city_work(feature, &self.projector, Utc::now()) {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(fingerprint = %fp, err = %err, "failed to decode disruption");
                report.fail(fp, err.to_string());
                return;
            }
        };

        match self.sink.create_entity(&NgsiEntity::from(&entity)).await {
            Ok(()) => {
                tracing::info!(entity_id = entity.id(), "created city work");
                self.seen.mark_seen(fp);
                report.created += 1;
            }
            Err(err) => {
                // not marked seen: retried next pass
                tracing::error!(entity_id = entity.id(), err = %err, "create failed");
                report.fail(fp, err.to_string());
            }
        }
    }
}

async fn pause(d: Duration) {
    if !d.is_zero() {
        tokio::time::sleep(d).await;
    }
}
