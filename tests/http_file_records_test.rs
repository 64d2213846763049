use binder_engine::adapters::HttpFileRecords;
use binder_engine::domain::ports::{FileQuery, FileRecordsProvider, TranscriptProvider};
use binder_engine::domain::snapshot::CompletedTranscript;
use binder_engine::BinderError;
use httpmock::prelude::*;
use std::time::Duration;

fn query(file_id: &str) -> FileQuery {
    FileQuery {
        agency_id: "AG1".to_string(),
        participant_id: "P-JUDGE".to_string(),
        application_code: "BINDER".to_string(),
        physical_file_id: file_id.to_string(),
    }
}

fn client(server: &MockServer) -> HttpFileRecords {
    HttpFileRecords::new(&server.base_url(), &server.url("/scv"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_file_snapshot_request() {
    let server = MockServer::start();
    let snapshot_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/files/F100")
            .query_param("agencyId", "AG1")
            .query_param("participantId", "P-JUDGE")
            .query_param("applicationCode", "BINDER");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "courtClass": "F",
                "appearances": ["A1"],
                "documents": ["D1", "D2"],
                "referenceDocuments": ["R1"]
            }));
    });

    let snapshot = client(&server).file_snapshot(&query("F100")).await.unwrap();

    snapshot_mock.assert();
    assert_eq!(snapshot.court_class, "F");
    assert_eq!(snapshot.documents, vec!["D1".to_string(), "D2".to_string()]);
    assert_eq!(snapshot.reference_documents, vec!["R1".to_string()]);
}

#[tokio::test]
async fn test_file_content_request() {
    let server = MockServer::start();
    let content_mock = server.mock(|when, then| {
        when.method(GET).path("/files/F200/content").query_param("agencyId", "AG1");
        then.status(200).json_body(serde_json::json!({
            "accusedFiles": [{
                "physicalFileId": "F200",
                "participantId": "ACC1",
                "profSeqNo": "1",
                "documents": [
                    {"documentId": "9", "category": "ROP", "documentTypeDescription": "Record of Proceedings"}
                ]
            }]
        }));
    });

    let content = client(&server).file_content(&query("F200")).await.unwrap();

    content_mock.assert();
    let accused = content.find_accused("F200", "ACC1").unwrap();
    assert_eq!(accused.prof_seq_no.as_deref(), Some("1"));
    assert_eq!(accused.documents[0].category.as_deref(), Some("ROP"));
}

#[tokio::test]
async fn test_completed_transcripts_request() {
    let server = MockServer::start();
    let transcripts_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/scv/transcripts/completed")
            .query_param("physicalFileId", "F100")
            .query_param("includeChildren", "true")
            .query_param("justinNumber", "J-77");
        then.status(200)
            .json_body(serde_json::json!([{"orderId": 7, "documentId": 42}]));
    });

    let transcripts = client(&server)
        .completed_transcripts("F100", Some("J-77"), true)
        .await
        .unwrap();

    transcripts_mock.assert();
    assert_eq!(
        transcripts,
        vec![CompletedTranscript {
            order_id: 7,
            document_id: 42
        }]
    );
}

#[tokio::test]
async fn test_server_error_maps_to_upstream() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/files/F100");
        then.status(503);
    });

    let error = client(&server).file_snapshot(&query("F100")).await.unwrap_err();

    match &error {
        BinderError::Upstream { service, status } => {
            assert_eq!(service, "file-records");
            assert_eq!(*status, 503);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_not_found_is_not_retryable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/scv/transcripts/completed");
        then.status(404);
    });

    let error = client(&server)
        .completed_transcripts("F404", None, true)
        .await
        .unwrap_err();

    assert!(matches!(error, BinderError::Upstream { status: 404, .. }));
    assert!(!error.is_retryable());
}
