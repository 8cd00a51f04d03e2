//! Tests for the WPScan client

#![allow(clippy::unwrap_used)]

use mockito::{Matcher, Server};

use crate::directory::wpscan::{extract_slugs, max_page, WpscanClient};

fn client_for(server: &Server) -> WpscanClient {
    WpscanClient::with_urls("test-token", server.url(), server.url()).unwrap()
}

#[tokio::test]
async fn test_fetch_version_parses_keyed_response() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/wordpresses/6.5.0")
        .match_header("authorization", "Token token=test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "6.5.0": {
                    "release_date": "2024-01-01",
                    "changelog_url": "https://codex.wordpress.org/Version_6.5",
                    "status": "latest",
                    "vulnerabilities": [
                        {"id": "v1", "title": "X", "cvss": {"score": 7.5, "severity": "high"}}
                    ]
                }
            }"#,
        )
        .create_async()
        .await;

    let details = client_for(&server)
        .fetch_version("6.5.0")
        .await
        .unwrap()
        .unwrap();

    mock.assert_async().await;
    assert_eq!(details.release_date.as_deref(), Some("2024-01-01"));
    assert_eq!(details.status.as_deref(), Some("latest"));
    assert_eq!(details.vulnerabilities.len(), 1);
    assert_eq!(details.vulnerabilities[0].id.as_deref(), Some("v1"));
    assert_eq!(
        details.vulnerabilities[0].cvss.as_ref().unwrap().score,
        Some(7.5)
    );
}

#[tokio::test]
async fn test_fetch_version_not_found_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/wordpresses/0.1.0")
        .with_status(404)
        .create_async()
        .await;

    let result = client_for(&server).fetch_version("0.1.0").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_fetch_version_server_error_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/wordpresses/6.5.0")
        .with_status(500)
        .create_async()
        .await;

    let result = client_for(&server).fetch_version("6.5.0").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_fetch_plugin_missing_slug_key_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/plugins/some-plugin")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"other-plugin": {"latest_version": "1.0"}}"#)
        .create_async()
        .await;

    let result = client_for(&server).fetch_plugin("some-plugin").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_fetch_plugin_parses_details() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/plugins/some-plugin")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "some-plugin": {
                    "latest_version": "2.1.0",
                    "last_updated": "2024-02-02",
                    "popular": true,
                    "vulnerabilities": [{"id": "v9"}]
                }
            }"#,
        )
        .create_async()
        .await;

    let details = client_for(&server)
        .fetch_plugin("some-plugin")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(details.latest_version.as_deref(), Some("2.1.0"));
    assert_eq!(details.popular, Some(true));
    assert_eq!(details.vulnerabilities.len(), 1);
}

const TABLE_PAGE: &str = r#"
<div class="vulnerabilities__table--body">
  <div class="vulnerabilities__table--row">
    <div class="vulnerabilities__table--slug"><a href="/plugins/akismet">akismet</a></div>
  </div>
  <div class="vulnerabilities__table--row">
    <div class="vulnerabilities__table--slug"><a href="/plugins/jetpack"> jetpack </a></div>
  </div>
</div>
<ul class="vulnerabilities__pagination">
  <li><a href="?page=1">1</a></li>
  <li><a href="?page=2">2</a></li>
  <li><a href="?page=3">3</a></li>
</ul>
"#;

#[test]
fn test_extract_slugs_from_table_html() {
    let slugs = extract_slugs(TABLE_PAGE);
    assert_eq!(slugs, vec!["akismet".to_string(), "jetpack".to_string()]);
}

#[test]
fn test_max_page_from_pagination() {
    assert_eq!(max_page(TABLE_PAGE), 3);
}

#[test]
fn test_max_page_defaults_to_one_without_pagination() {
    assert_eq!(max_page("<div>no pagination here</div>"), 1);
}

#[tokio::test]
async fn test_list_vulnerable_slugs_walks_pages_and_dedupes() {
    let mut server = Server::new_async().await;

    let page = |slug: &str, pages: &str| {
        format!(
            r#"<div class="vulnerabilities__table--row">
                 <div class="vulnerabilities__table--slug"><a>{slug}</a></div>
               </div>
               <ul class="vulnerabilities__pagination">{pages}</ul>"#
        )
    };

    server
        .mock("GET", "/plugins")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("get".into(), "a".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(page("akismet", "<li><a>1</a></li><li><a>2</a></li>"))
        .create_async()
        .await;
    server
        .mock("GET", "/plugins")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("get".into(), "a".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(page("akismet", ""))
        .create_async()
        .await;

    // Every other filter 501s and is skipped
    let slugs = client_for(&server).list_vulnerable_slugs().await.unwrap();
    assert_eq!(slugs.len(), 1);
    assert!(slugs.contains("akismet"));
}
