mod helpers;

use std::sync::Arc;

use mapsmith::application::ports::MapJobRepository;
use mapsmith::application::services::{JobStatusTable, MapJobError, MapJobService};
use mapsmith::domain::{JobId, JobStatus, MapJob};

use helpers::{EngineCall, FailingStatusRepository, FakeEngine, FakeResolver, TestHarness};

fn harness() -> TestHarness {
    TestHarness::new(FakeResolver::ok(), FakeEngine::succeeding(), false)
}

async fn force_status(harness: &TestHarness, id: JobId, status: JobStatus, error: Option<&str>) {
    harness
        .repository
        .update_status(id, status, error)
        .await
        .unwrap();
}

#[tokio::test]
async fn given_valid_request_when_creating_then_record_is_pending_immediately() {
    let (engine, gate) = FakeEngine::gated();
    let h = TestHarness::new(FakeResolver::ok(), engine, false);

    let accepted = h.service.create("city-a", "10,10,11,11").await.unwrap();

    assert_eq!(accepted.status, JobStatus::Pending);
    let record = h.repository.get_by_id(accepted.id).await.unwrap().unwrap();
    assert_eq!(record.name, "city-a");
    assert_eq!(record.bbox, "10,10,11,11");
    assert!(!record.status.is_terminal());
    assert!(record.error.is_none());

    gate.notify_one();
    accepted.worker.wait().await;
}

#[tokio::test]
async fn given_running_worker_when_querying_status_then_reports_transient_state() {
    let (engine, gate) = FakeEngine::gated();
    let h = TestHarness::new(FakeResolver::ok(), engine, false);

    let accepted = h.service.create("city-a", "10,10,11,11").await.unwrap();
    let view = h.service.status(accepted.id).await.unwrap();

    assert!(matches!(
        view.status,
        JobStatus::Pending | JobStatus::Processing
    ));
    assert!(view.duration.is_none());

    gate.notify_one();
    accepted.worker.wait().await;
}

#[tokio::test]
async fn given_successful_extraction_when_worker_finishes_then_completed_with_duration_and_file() {
    let h = harness();

    let accepted = h.service.create("city-a", "10,10,11,11").await.unwrap();
    let id = accepted.id;
    accepted.worker.wait().await;

    let view = h.service.status(id).await.unwrap();
    assert_eq!(view.status, JobStatus::Completed);
    assert!(view.error.is_none());
    assert!(view.duration.is_some_and(|d| !d.is_zero()));
    assert!(h.output_exists("city-a"));

    let record = h.repository.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(record.status, JobStatus::Completed);

    match h.engine.calls().as_slice() {
        [EngineCall::Extract { bbox, destination, .. }] => {
            assert_eq!(bbox, "10,10,11,11");
            assert!(destination.ends_with("city-a.pmtiles"));
        }
        other => panic!("unexpected engine calls: {:?}", other),
    }
}

#[tokio::test]
async fn given_missing_name_or_bbox_when_creating_then_invalid_request() {
    let h = harness();

    let missing_bbox = h.service.create("city-b", "").await;
    let missing_name = h.service.create("", "10,10,11,11").await;

    assert!(matches!(missing_bbox, Err(MapJobError::InvalidRequest(_))));
    assert!(matches!(missing_name, Err(MapJobError::InvalidRequest(_))));
    assert!(h.repository.list().await.unwrap().is_empty());
    assert!(h.engine.calls().is_empty());
}

#[tokio::test]
async fn given_existing_output_file_when_creating_then_conflict_regardless_of_bbox() {
    let h = harness();
    h.write_output("city-a", b"old");

    for bbox in ["10,10,11,11", "0,0,1,1"] {
        let result = h.service.create("city-a", bbox).await;
        assert!(matches!(result, Err(MapJobError::Conflict(_))));
    }
    assert!(h.repository.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_resolver_failure_when_worker_runs_then_failed_with_resolver_text() {
    let h = TestHarness::new(FakeResolver::empty_catalog(), FakeEngine::succeeding(), false);

    let accepted = h.service.create("city-a", "10,10,11,11").await.unwrap();
    let id = accepted.id;
    accepted.worker.wait().await;

    let view = h.service.status(id).await.unwrap();
    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.error.as_deref(), Some("no builds found"));

    let record = h.repository.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(record.status, JobStatus::Failed);
    assert_eq!(record.error.as_deref(), Some("no builds found"));
    assert!(h.engine.calls().is_empty());
    assert!(!h.output_exists("city-a"));
}

#[tokio::test]
async fn given_engine_failure_when_worker_runs_then_failed_and_no_output() {
    let h = TestHarness::new(FakeResolver::ok(), FakeEngine::failing("tile fetch timed out"), false);

    let accepted = h.service.create("city-a", "10,10,11,11").await.unwrap();
    let id = accepted.id;
    accepted.worker.wait().await;

    let view = h.service.status(id).await.unwrap();
    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.error.as_deref(), Some("tile fetch timed out"));
    assert!(view.duration.is_some());
    assert!(!h.output_exists("city-a"));

    let record = h.repository.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(record.error.as_deref(), Some("tile fetch timed out"));
}

#[tokio::test]
async fn given_unknown_id_when_querying_status_then_not_found() {
    let h = harness();

    let result = h.service.status(JobId::new()).await;

    assert!(matches!(result, Err(MapJobError::NotFound(_))));
}

#[tokio::test]
async fn given_record_from_previous_process_when_querying_status_then_persisted_fields_are_used() {
    let h = harness();
    let mut job = MapJob::new("city-a".to_string(), "10,10,11,11".to_string());
    job.status = JobStatus::Failed;
    job.error = Some("disk full".to_string());
    h.repository.create(&job).await.unwrap();

    let view = h.service.status(job.id).await.unwrap();

    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.error.as_deref(), Some("disk full"));
    assert_eq!(view.name.as_deref(), Some("city-a"));
    assert!(view.duration.is_none());
}

#[tokio::test]
async fn given_job_run_by_this_process_when_restarted_then_status_comes_from_record() {
    let h = harness();
    let accepted = h.service.create("city-a", "10,10,11,11").await.unwrap();
    let id = accepted.id;
    accepted.worker.wait().await;

    let restarted = MapJobService::new(
        Arc::clone(&h.repository),
        h.store.clone(),
        Arc::new(FakeResolver::ok()),
        h.engine.clone(),
        Arc::new(JobStatusTable::new()),
        false,
    );
    let view = restarted.status(id).await.unwrap();

    assert_eq!(view.status, JobStatus::Completed);
    assert_eq!(view.name.as_deref(), Some("city-a"));
    assert!(view.duration.is_none());
}

#[tokio::test]
async fn given_in_flight_job_when_recreating_then_invalid_state_and_nothing_changes() {
    let h = harness();
    for status in [JobStatus::Pending, JobStatus::Processing] {
        let job = MapJob::new(format!("city-{}", status), "10,10,11,11".to_string());
        h.repository.create(&job).await.unwrap();
        force_status(&h, job.id, status, None).await;
        h.write_output(&job.name, b"partial");

        let result = h.service.recreate(job.id).await;

        assert!(matches!(result, Err(MapJobError::InvalidState(_))));
        assert!(h.output_exists(&job.name));
        let record = h.repository.get_by_id(job.id).await.unwrap().unwrap();
        assert_eq!(record.status, status);
        assert!(h.status_table.get(job.id).is_none());
    }
    assert!(h.engine.calls().is_empty());
}

#[tokio::test]
async fn given_unknown_id_when_recreating_then_not_found() {
    let h = harness();

    let result = h.service.recreate(JobId::new()).await;

    assert!(matches!(result, Err(MapJobError::NotFound(_))));
}

#[tokio::test]
async fn given_failed_job_when_recreating_then_output_removed_and_full_extraction_completes() {
    let h = harness();
    let job = MapJob::new("city-a".to_string(), "10,10,11,11".to_string());
    h.repository.create(&job).await.unwrap();
    force_status(&h, job.id, JobStatus::Failed, Some("old error")).await;
    h.write_output("city-a", b"stale");

    let accepted = h.service.recreate(job.id).await.unwrap();
    assert_eq!(accepted.id, job.id);
    assert_eq!(accepted.status, JobStatus::Pending);
    accepted.worker.wait().await;

    let view = h.service.status(job.id).await.unwrap();
    assert_eq!(view.status, JobStatus::Completed);
    let record = h.repository.get_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(record.status, JobStatus::Completed);
    assert!(record.error.is_none());
    assert_eq!(
        std::fs::read(h.store.base_path().join("city-a.pmtiles")).unwrap(),
        b"PMTiles"
    );
    assert!(matches!(
        h.engine.calls().as_slice(),
        [EngineCall::Extract { .. }]
    ));
}

#[tokio::test]
async fn given_failed_job_when_recreate_is_accepted_then_record_error_is_cleared() {
    let (engine, gate) = FakeEngine::gated();
    let h = TestHarness::new(FakeResolver::ok(), engine, false);
    let job = MapJob::new("city-a".to_string(), "10,10,11,11".to_string());
    h.repository.create(&job).await.unwrap();
    force_status(&h, job.id, JobStatus::Failed, Some("old error")).await;

    let accepted = h.service.recreate(job.id).await.unwrap();

    let record = h.repository.get_by_id(job.id).await.unwrap().unwrap();
    assert!(!record.status.is_terminal());
    assert!(record.error.is_none());

    gate.notify_one();
    accepted.worker.wait().await;
}

#[tokio::test]
async fn given_completed_job_and_sync_enabled_when_recreating_then_archive_is_synced_in_place() {
    let h = TestHarness::new(FakeResolver::ok(), FakeEngine::succeeding(), true);
    let job = MapJob::new("city-a".to_string(), "10,10,11,11".to_string());
    h.repository.create(&job).await.unwrap();
    force_status(&h, job.id, JobStatus::Completed, None).await;
    h.write_output("city-a", b"previous build");

    let accepted = h.service.recreate(job.id).await.unwrap();
    accepted.worker.wait().await;

    let view = h.service.status(job.id).await.unwrap();
    assert_eq!(view.status, JobStatus::Completed);
    assert!(h.output_exists("city-a"));
    match h.engine.calls().as_slice() {
        [EngineCall::Sync { destination, source }] => {
            assert!(destination.ends_with("city-a.pmtiles"));
            assert!(!source.is_empty());
        }
        other => panic!("unexpected engine calls: {:?}", other),
    }
}

#[tokio::test]
async fn given_completed_job_and_sync_disabled_when_recreating_then_full_extraction_runs() {
    let h = harness();
    let job = MapJob::new("city-a".to_string(), "10,10,11,11".to_string());
    h.repository.create(&job).await.unwrap();
    force_status(&h, job.id, JobStatus::Completed, None).await;
    h.write_output("city-a", b"previous build");

    let accepted = h.service.recreate(job.id).await.unwrap();
    accepted.worker.wait().await;

    assert_eq!(
        h.service.status(job.id).await.unwrap().status,
        JobStatus::Completed
    );
    assert_eq!(
        std::fs::read(h.store.base_path().join("city-a.pmtiles")).unwrap(),
        b"PMTiles"
    );
    assert!(matches!(
        h.engine.calls().as_slice(),
        [EngineCall::Extract { .. }]
    ));
}

#[tokio::test]
async fn given_unwritable_record_store_when_worker_runs_then_live_status_still_completes() {
    let h = TestHarness::with_repository(
        FakeResolver::ok(),
        FakeEngine::succeeding(),
        false,
        Arc::new(FailingStatusRepository::default()),
    );

    let accepted = h.service.create("city-a", "10,10,11,11").await.unwrap();
    let id = accepted.id;
    accepted.worker.wait().await;

    assert_eq!(h.service.status(id).await.unwrap().status, JobStatus::Completed);
    let record = h.repository.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(record.status, JobStatus::Pending);
}

#[tokio::test]
async fn given_existing_job_when_deleting_then_record_and_output_are_removed() {
    let h = harness();
    let accepted = h.service.create("city-a", "10,10,11,11").await.unwrap();
    let id = accepted.id;
    accepted.worker.wait().await;
    assert!(h.output_exists("city-a"));

    let deleted = h.service.delete(id).await.unwrap();

    assert_eq!(deleted.name, "city-a");
    assert!(!h.output_exists("city-a"));
    assert!(h.repository.get_by_id(id).await.unwrap().is_none());
    // The live entry outlives the record.
    assert!(h.status_table.get(id).is_some());
}

#[tokio::test]
async fn given_unknown_id_when_deleting_then_not_found() {
    let h = harness();

    let result = h.service.delete(JobId::new()).await;

    assert!(matches!(result, Err(MapJobError::NotFound(_))));
}

#[tokio::test]
async fn given_finished_maps_when_listing_and_sizing_then_files_are_reported() {
    let h = harness();
    h.write_output("city-a", b"12345");
    h.write_output("city-b", b"1");
    std::fs::create_dir(h.store.base_path().join("nested")).unwrap();

    let maps = h.service.list_maps().await.unwrap();
    let size = h.service.map_size("city-a").await.unwrap();
    let missing = h.service.map_size("city-z").await;

    assert_eq!(maps, vec!["city-a.pmtiles", "city-b.pmtiles"]);
    assert_eq!(size.size_bytes, 5);
    assert_eq!(size.name, "city-a");
    assert!(matches!(missing, Err(MapJobError::NotFound(_))));
}

#[tokio::test]
async fn given_existing_map_when_requesting_info_then_engine_header_is_returned() {
    let h = harness();
    h.write_output("city-a", b"PMTiles");

    let info = h.service.map_info("city-a").await.unwrap();
    let missing = h.service.map_info("city-z").await;

    assert!(info.contains("tile_type"));
    assert!(matches!(missing, Err(MapJobError::NotFound(_))));
}

#[tokio::test]
async fn given_job_without_output_when_resolving_output_path_then_not_found() {
    let h = TestHarness::new(FakeResolver::ok(), FakeEngine::failing("nope"), false);
    let accepted = h.service.create("city-a", "10,10,11,11").await.unwrap();
    let id = accepted.id;
    accepted.worker.wait().await;

    let result = h.service.output_path(id).await;

    assert!(matches!(result, Err(MapJobError::NotFound(_))));
}

#[tokio::test]
async fn given_created_and_deleted_jobs_when_listing_jobs_then_only_remaining_records_newest_first() {
    let h = harness();
    let first = h.service.create("city-a", "1,1,2,2").await.unwrap();
    first.worker.wait().await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = h.service.create("city-b", "3,3,4,4").await.unwrap();
    second.worker.wait().await;
    let third = h.service.create("city-c", "5,5,6,6").await.unwrap();
    third.worker.wait().await;
    h.service.delete(third.id).await.unwrap();

    let jobs = h.service.list_jobs().await.unwrap();

    let ids: Vec<JobId> = jobs.iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert!(jobs.iter().all(|j| j.status == JobStatus::Completed));
}
