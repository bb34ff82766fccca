//! Integration tests for the paginated fetch client and dataset assembly
//!
//! All HTTP behavior is exercised against a wiremock server:
//! - pagination via Link headers
//! - retry of transient server errors with a bounded budget
//! - immediate failure on non-retryable statuses
//! - end-to-end harvest with filtering and accession collisions

use spd_harvest::client::{RetryPolicy, UniProtClient};
use spd_harvest::dataset::harvest;
use spd_harvest::error::HarvestError;
use spd_harvest::extract::{NegativeExtractor, PositiveExtractor};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client with near-zero backoff so retry tests stay fast
fn fast_client() -> UniProtClient {
    UniProtClient::new(RetryPolicy {
        backoff_base: Duration::from_millis(1),
        ..Default::default()
    })
    .expect("client")
}

/// Minimal entry body accepted by the record model
fn entry(accession: &str, sequence: &str) -> serde_json::Value {
    serde_json::json!({
        "primaryAccession": accession,
        "organism": {
            "scientificName": "Homo sapiens",
            "lineage": ["Eukaryota", "Metazoa"]
        },
        "sequence": { "value": sequence, "length": sequence.len() }
    })
}

fn page_body(entries: &[serde_json::Value]) -> serde_json::Value {
    serde_json::json!({ "results": entries })
}

#[tokio::test]
async fn test_pagination_follows_next_links_until_absent() {
    let server = MockServer::start().await;

    let next = |p: &str| format!(r#"<{}/{}>; rel="next""#, server.uri(), p);

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next("page2").as_str())
                .insert_header("x-total-results", "5")
                .set_body_json(page_body(&[entry("P00001", "MKT"), entry("P00002", "MAL")])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next("page3").as_str())
                .insert_header("x-total-results", "5")
                .set_body_json(page_body(&[entry("P00003", "MSS"), entry("P00004", "MVL")])),
        )
        .mount(&server)
        .await;

    // Final page carries no Link header
    Mock::given(method("GET"))
        .and(path("/page3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-results", "5")
                .set_body_json(page_body(&[entry("P00005", "MGG")])),
        )
        .mount(&server)
        .await;

    let client = fast_client();
    let mut pager = client.fetch_pages(format!("{}/page1", server.uri()));

    let mut accessions = Vec::new();
    let mut pages = 0;
    while let Some(page) = pager.next_page().await.expect("page fetch") {
        pages += 1;
        assert_eq!(page.total, 5);
        accessions.extend(page.results.iter().map(|e| e.primary_accession.clone()));
    }

    assert_eq!(pages, 3);
    assert_eq!(
        accessions,
        vec!["P00001", "P00002", "P00003", "P00004", "P00005"]
    );

    // The pager is exhausted, not restartable
    assert!(pager.next_page().await.expect("exhausted").is_none());
}

#[tokio::test]
async fn test_page_stream_adapter_collects_all_pages() {
    use futures::TryStreamExt;

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(r#"<{}/page2>; rel="next""#, server.uri()).as_str(),
                )
                .set_body_json(page_body(&[entry("P00001", "MKT")])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[entry("P00002", "MAL")])))
        .mount(&server)
        .await;

    let client = fast_client();
    let pages: Vec<_> = client
        .fetch_pages(format!("{}/page1", server.uri()))
        .into_stream()
        .try_collect()
        .await
        .expect("stream");

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].results[0].primary_accession, "P00001");
    assert_eq!(pages[1].results[0].primary_accession, "P00002");
}

#[tokio::test]
async fn test_total_header_missing_or_unparseable_defaults_to_zero() {
    let server = MockServer::start().await;

    // No x-total-results header at all
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[entry("P00001", "MKT")])))
        .mount(&server)
        .await;

    // Header present but not a number
    Mock::given(method("GET"))
        .and(path("/garbled"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-results", "plenty")
                .set_body_json(page_body(&[entry("P00002", "MAL")])),
        )
        .mount(&server)
        .await;

    let client = fast_client();

    let mut pager = client.fetch_pages(format!("{}/missing", server.uri()));
    let page = pager.next_page().await.expect("page").expect("one page");
    assert_eq!(page.total, 0);

    let mut pager = client.fetch_pages(format!("{}/garbled", server.uri()));
    let page = pager.next_page().await.expect("page").expect("one page");
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_malformed_link_header_ends_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", "this is not a link header")
                .set_body_json(page_body(&[entry("P00001", "MKT")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client();
    let mut pager = client.fetch_pages(format!("{}/search", server.uri()));

    assert!(pager.next_page().await.expect("first page").is_some());
    assert!(pager.next_page().await.expect("no more pages").is_none());
}

#[tokio::test]
async fn test_retry_succeeds_after_transient_errors() {
    let server = MockServer::start().await;

    // Four transient failures, then success on the fifth attempt
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(4)
        .expect(4)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[entry("P1", "M")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client();
    let mut pager = client.fetch_pages(format!("{}/search", server.uri()));

    let page = pager.next_page().await.expect("retry should recover");
    assert_eq!(page.expect("one page").results.len(), 1);
}

#[tokio::test]
async fn test_retry_budget_exhausted_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        // Initial attempt plus five retries
        .expect(6)
        .mount(&server)
        .await;

    let client = fast_client();
    let mut pager = client.fetch_pages(format!("{}/search", server.uri()));

    match pager.next_page().await {
        Err(HarvestError::RetriesExhausted {
            status, attempts, ..
        }) => {
            assert_eq!(status, 503);
            assert_eq!(attempts, 6);
        },
        other => panic!("expected RetriesExhausted, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_non_retryable_status_fails_immediately() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client();
    let mut pager = client.fetch_pages(format!("{}/search", server.uri()));

    match pager.next_page().await {
        Err(HarvestError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected Status error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_harvest_applies_filters_across_pages() {
    let server = MockServer::start().await;

    // Page 1: one clean signal record, one excluded (annotated signal)
    let mut clean = entry("P00001", "MKWVTFISLLFLFSSAYSRG");
    clean["features"] = serde_json::json!([{
        "type": "Signal",
        "description": "",
        "location": { "start": { "value": 1 }, "end": { "value": 20 } }
    }]);

    let mut annotated = entry("P00002", "MKT");
    annotated["features"] = serde_json::json!([{
        "type": "Signal",
        "description": "Not cleaved",
        "location": { "start": { "value": 1 }, "end": { "value": 20 } }
    }]);

    // Page 2: a record without any Signal feature stays with site 0
    let plain = entry("P00003", "MALWMRLLPL");

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(r#"<{}/page2>; rel="next""#, server.uri()).as_str(),
                )
                .insert_header("x-total-results", "3")
                .set_body_json(page_body(&[clean, annotated])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-results", "3")
                .set_body_json(page_body(&[plain])),
        )
        .mount(&server)
        .await;

    let client = fast_client();
    let result = harvest(
        &client,
        &format!("{}/page1", server.uri()),
        &PositiveExtractor,
    )
    .await
    .expect("harvest");

    assert_eq!(result.seen, 3);
    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.rows[0].accession, "P00001");
    assert_eq!(result.rows[0].cleavage_site, 20);
    assert_eq!(result.rows[1].accession, "P00003");
    assert_eq!(result.rows[1].cleavage_site, 0);

    // Tabular rows and sequence map line up one-to-one here
    assert_eq!(result.sequences.len(), 2);
    assert_eq!(result.sequences.get("P00001"), Some("MKWVTFISLLFLFSSAYSRG"));
    assert_eq!(result.sequences.get("P00002"), None);
}

#[tokio::test]
async fn test_harvest_duplicate_accession_last_write_wins() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[
            entry("P00001", "FIRSTSEQ"),
            entry("P00002", "MAL"),
            entry("P00001", "SECONDSEQ"),
        ])))
        .mount(&server)
        .await;

    let client = fast_client();
    let result = harvest(
        &client,
        &format!("{}/search", server.uri()),
        &NegativeExtractor,
    )
    .await
    .expect("harvest");

    // Tabular rows keep every occurrence; the sequence map deduplicates
    assert_eq!(result.rows.len(), 3);
    assert_eq!(result.sequences.len(), 2);
    assert_eq!(result.sequences.get("P00001"), Some("SECONDSEQ"));
}

#[tokio::test]
async fn test_harvest_empty_result_set() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-results", "0")
                .set_body_json(page_body(&[])),
        )
        .mount(&server)
        .await;

    let client = fast_client();
    let result = harvest(
        &client,
        &format!("{}/search", server.uri()),
        &NegativeExtractor,
    )
    .await
    .expect("harvest");

    assert_eq!(result.seen, 0);
    assert!(result.rows.is_empty());
    assert!(result.sequences.is_empty());
}
