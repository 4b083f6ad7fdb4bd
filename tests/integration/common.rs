use broken_image_checker::config::{apply_defaults, Config};
use broken_image_checker::crawler::{build_http_client, PagePipeline};
use std::path::{Path, PathBuf};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Settings tuned for tests: mock server host allowed, no pacing delays
pub fn test_settings(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.checker.allowed_domains = vec!["127.0.0.1".to_string()];
    config.checker.request_timeout = 5;
    config.checker.page_delay = 0;
    config.checker.batch_pause = 0;
    config.output.directory = output_dir.to_string_lossy().into_owned();
    apply_defaults(config)
}

pub fn test_pipeline(settings: &Config) -> PagePipeline {
    let client = build_http_client(&settings.user_agent).expect("Failed to build client");
    PagePipeline::new(client, settings).expect("Failed to build pipeline")
}

/// An article page with the given image sources inside the content container
pub fn article_html(title: &str, image_srcs: &[&str]) -> String {
    let images: String = image_srcs
        .iter()
        .map(|src| format!(r#"<p><img src="{}" alt="step"></p>"#, src))
        .collect();

    format!(
        r#"<html><head><title>{}</title></head><body>
        <nav><img src="/nav-logo.png"></nav>
        <div class="article-detail-card-content">{}</div>
        </body></html>"#,
        title, images
    )
}

pub async fn mount_page(server: &MockServer, page_path: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

pub async fn mount_xml(server: &MockServer, xml_path: &str, xml: String) {
    Mock::given(method("GET"))
        .and(path(xml_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(xml)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

pub async fn mount_image(server: &MockServer, image_path: &str, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(image_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn sitemap_index(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<sitemap><loc>{}</loc></sitemap>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}

pub fn urlset(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<url><loc>{}</loc></url>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

/// Every CSV file in a directory
pub fn report_files(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|ext| ext == "csv").unwrap_or(false))
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Data rows of a report, header excluded
pub fn read_report_rows(report: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(report).expect("Failed to open report");
    reader
        .records()
        .map(|r| {
            r.expect("Malformed report row")
                .iter()
                .map(|f| f.to_string())
                .collect()
        })
        .collect()
}
