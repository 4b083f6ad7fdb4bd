use crate::common::{article_html, mount_image, mount_page, test_pipeline, test_settings};
use broken_image_checker::output::FailureReason;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_single_404_image_yields_one_record() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/hc/article/123/reset-password",
        article_html("Reset your password", &["/images/step-1.png"]),
    )
    .await;
    mount_image(&mock_server, "/images/step-1.png", 404).await;

    let dir = TempDir::new().unwrap();
    let pipeline = test_pipeline(&test_settings(dir.path()));

    let page_url = format!("{}/hc/article/123/reset-password", base_url);
    let records = pipeline.process_page(&page_url).await;

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.article_id, "123");
    assert_eq!(record.title, "Reset your password");
    assert_eq!(record.page_url, page_url);
    assert_eq!(record.broken_image_url, format!("{}/images/step-1.png", base_url));
    assert_eq!(record.failure_reason, FailureReason::HttpStatus(404));
    assert_eq!(record.storage_location, "Other");
}

#[tokio::test]
async fn test_passing_images_yield_no_records() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/hc/article/5/ok",
        article_html("All good", &["/images/a.png", "/images/b.png"]),
    )
    .await;
    mount_image(&mock_server, "/images/a.png", 200).await;
    mount_image(&mock_server, "/images/b.png", 204).await;

    let dir = TempDir::new().unwrap();
    let pipeline = test_pipeline(&test_settings(dir.path()));

    let records = pipeline
        .process_page(&format!("{}/hc/article/5/ok", mock_server.uri()))
        .await;

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_disallowed_host_is_csp_violation_and_classified() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/hc/article/77/legacy",
        article_html(
            "Legacy article",
            &["https://blog.unrelated.test/wp-content/uploads/diagram.png"],
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let pipeline = test_pipeline(&test_settings(dir.path()));

    let records = pipeline
        .process_page(&format!("{}/hc/article/77/legacy", mock_server.uri()))
        .await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].failure_reason, FailureReason::CspViolation);
    assert_eq!(records[0].failure_reason.to_string(), "CSP Violation");
    assert_eq!(records[0].storage_location, "WordPress");
}

#[tokio::test]
async fn test_data_uri_is_truncated_before_check_and_classification() {
    let mock_server = MockServer::start().await;

    let payload = format!("{}{}{}", "Q".repeat(20), "x".repeat(60), "W".repeat(20));
    let src = format!("data:image/png;base64,{}", payload);
    mount_page(
        &mock_server,
        "/hc/article/8/inline",
        article_html("Inline image", &[src.as_str()]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let pipeline = test_pipeline(&test_settings(dir.path()));

    let records = pipeline
        .process_page(&format!("{}/hc/article/8/inline", mock_server.uri()))
        .await;

    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].broken_image_url,
        format!("data:image/png;base64,{}...{}", "Q".repeat(20), "W".repeat(20))
    );
    assert_eq!(records[0].failure_reason, FailureReason::CspViolation);
    assert_eq!(records[0].storage_location, "Base64 Encoded Image");
}

#[tokio::test]
async fn test_storage_location_matches_stored_url() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/hc/article/9/mixed",
        article_html(
            "Mixed",
            &[
                "/zendesk/attachments/missing.png",
                "https://i.imgur.com/abc.png",
                "/images/fine.png",
            ],
        ),
    )
    .await;
    mount_image(&mock_server, "/zendesk/attachments/missing.png", 410).await;
    mount_image(&mock_server, "/images/fine.png", 200).await;

    let dir = TempDir::new().unwrap();
    let pipeline = test_pipeline(&test_settings(dir.path()));

    let records = pipeline
        .process_page(&format!("{}/hc/article/9/mixed", mock_server.uri()))
        .await;

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(
            record.storage_location,
            pipeline.classifier().classify(&record.broken_image_url)
        );
    }
    assert_eq!(records[0].storage_location, "Zendesk");
    assert_eq!(records[0].failure_reason, FailureReason::HttpStatus(410));
    assert_eq!(records[1].storage_location, "Imgur");
    assert_eq!(records[1].failure_reason, FailureReason::CspViolation);
}

#[tokio::test]
async fn test_missing_container_yields_no_records() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/hc/article/10/no-content",
        r#"<html><head><title>Empty</title></head><body>
            <img src="/images/outside.png">
        </body></html>"#
            .to_string(),
    )
    .await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let pipeline = test_pipeline(&test_settings(dir.path()));

    let records = pipeline
        .process_page(&format!("{}/hc/article/10/no-content", mock_server.uri()))
        .await;

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_unreachable_page_yields_no_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hc/article/11/broken-page"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let pipeline = test_pipeline(&test_settings(dir.path()));

    let records = pipeline
        .process_page(&format!("{}/hc/article/11/broken-page", mock_server.uri()))
        .await;

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/hc/article/12/stable",
        article_html("Stable", &["/images/gone.png", "/images/ok.png"]),
    )
    .await;
    mount_image(&mock_server, "/images/gone.png", 404).await;
    mount_image(&mock_server, "/images/ok.png", 200).await;

    let dir = TempDir::new().unwrap();
    let pipeline = test_pipeline(&test_settings(dir.path()));
    let page_url = format!("{}/hc/article/12/stable", mock_server.uri());

    let first = pipeline.process_page(&page_url).await;
    let second = pipeline.process_page(&page_url).await;

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_title_decoded_from_meta_charset() {
    let mock_server = MockServer::start().await;

    let mut html = b"<html><head><meta charset=\"iso-8859-1\"><title>Caf\xe9 setup</title></head><body>".to_vec();
    html.extend_from_slice(
        br#"<div class="article-detail-card-content"><img src="/images/gone.png"></div></body></html>"#,
    );

    Mock::given(method("GET"))
        .and(path("/hc/article/12/latin"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(&mock_server)
        .await;
    mount_image(&mock_server, "/images/gone.png", 404).await;

    let dir = TempDir::new().unwrap();
    let pipeline = test_pipeline(&test_settings(dir.path()));

    let records = pipeline
        .process_page(&format!("{}/hc/article/12/latin", mock_server.uri()))
        .await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Café setup");
}
