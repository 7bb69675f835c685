use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use table_insight_rust::{router, AppConfig, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "----table-insight-test-boundary";

fn app(dir: &TempDir) -> Router {
    let mut config = AppConfig::default();
    config.upload.dir = dir.path().to_path_buf();
    router(AppState::from_config(&config))
}

fn app_with_body_limit(dir: &TempDir, max_body_bytes: usize) -> Router {
    let mut config = AppConfig::default();
    config.upload.dir = dir.path().to_path_buf();
    config.upload.max_body_bytes = max_body_bytes;
    router(AppState::from_config(&config))
}

fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/uploads")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, filename, content)))
        .unwrap()
}

fn chart_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chart")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_and_index() {
    let dir = tempfile::tempdir().unwrap();

    let resp = app(&dir)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app(&dir)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8_lossy(&bytes);
    assert!(page.contains("<form id=\"upload\">"));
    // 文件内容只经 textContent 写入页面
    assert!(!page.contains("innerHTML"));
}

#[tokio::test]
async fn test_csv_upload_round_trips_columns_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut csv = String::from("Region,Units,Notes\n");
    for i in 0..60 {
        csv.push_str(&format!("r{},{},note {}\n", i, i * 2, i));
    }

    let (status, body) = send(app(&dir), upload_request("file", "sales.csv", csv.as_bytes())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["columns"], json!(["Region", "Units", "Notes"]));

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 50);
    for (i, row) in data.iter().enumerate() {
        assert_eq!(row["Region"], json!(format!("r{}", i)));
        assert_eq!(row["Units"], json!(i * 2));
    }
    let keys: Vec<_> = data[0].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["Region", "Units", "Notes"]);

    // 汇总覆盖全部 60 行, 不只是预览部分
    assert_eq!(body["summary"]["Units"]["max"], json!(118.0));
    assert_eq!(body["summary"]["Units"]["min"], json!(0.0));
    assert_eq!(body["summary"]["Units"]["mean"], json!(59.0));
    assert!(body["summary"].get("Region").is_none());
    assert!(body["summary"].get("Notes").is_none());

    assert!(dir.path().join("sales.csv").exists());
}

#[tokio::test]
async fn test_text_log_upload() {
    let dir = tempfile::tempdir().unwrap();
    let text = "Date: 2024-01-01, Category: Food, Amount: $12.50\nnot a match\nDate: 2024-01-02, Category: Gas, Amount: $40.00";

    let (status, body) = send(app(&dir), upload_request("file", "expenses.txt", text.as_bytes())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["columns"], json!(["Date", "Category", "Amount"]));
    assert_eq!(
        body["data"],
        json!([
            {"Date": "2024-01-01", "Category": "Food", "Amount": 12.5},
            {"Date": "2024-01-02", "Category": "Gas", "Amount": 40.0},
        ])
    );
    assert_eq!(
        body["summary"],
        json!({"Amount": {"mean": 26.25, "max": 40.0, "min": 12.5}})
    );
}

#[tokio::test]
async fn test_unsupported_extension_rejected_before_parsing() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = send(app(&dir), upload_request("file", "report.pdf", b"%PDF-1.4")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unsupported file format"));
    assert_eq!(body["code"], "unsupported_format");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_missing_file_field() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = send(app(&dir), upload_request("other", "data.csv", b"a\n1\n")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");

    let req = Request::builder()
        .method("POST")
        .uri("/uploads")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&dir), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "missing_file");
}

#[tokio::test]
async fn test_traversal_filename_stays_in_upload_dir() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().join("uploads");
    std::fs::create_dir(&uploads).unwrap();

    let mut config = AppConfig::default();
    config.upload.dir = uploads.clone();
    let app = router(AppState::from_config(&config));

    let (status, _) = send(app, upload_request("file", "../escape.csv", b"a\n1\n")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(uploads.join("escape.csv").exists());
    assert!(!dir.path().join("escape.csv").exists());
}

#[tokio::test]
async fn test_malformed_csv_is_parse_failure() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = send(app(&dir), upload_request("file", "bad.csv", b"a,b\n1,2\n3,4,5\n")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "parse_failure");
    assert_eq!(body["error"], "Expected 2 fields in line 3, saw 3");
}

#[tokio::test]
async fn test_chart_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let req = chart_request(json!({
        "data": [{"a": 1, "b": 2}, {"a": 2, "b": 3}],
        "x": "a",
        "y": "b",
    }));

    let (status, fig) = send(app(&dir), req).await;

    assert_eq!(status, StatusCode::OK);
    let trace = &fig["data"][0];
    assert_eq!(trace["type"], "bar");
    assert_eq!(trace["x"], json!([1, 2]));
    assert_eq!(trace["y"], json!([2, 3]));
    assert_eq!(fig["layout"]["title"]["text"], "AI Chart");
    assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "a");
    assert_eq!(fig["layout"]["yaxis"]["title"]["text"], "b");
}

#[tokio::test]
async fn test_chart_unknown_column() {
    let dir = tempfile::tempdir().unwrap();
    let req = chart_request(json!({
        "data": [{"a": 1, "b": 2}],
        "x": "a",
        "y": "missing",
    }));

    let (status, body) = send(app(&dir), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_chart");
    assert!(body["error"].as_str().unwrap().contains("'missing'"));
}

#[tokio::test]
async fn test_text_log_without_matches_keeps_text_columns_out_of_summary() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = send(app(&dir), upload_request("file", "n.txt", b"nothing\n")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["columns"], json!(["Date", "Category", "Amount"]));
    assert_eq!(body["data"], json!([]));
    let keys: Vec<_> = body["summary"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["Amount"]);
    assert_eq!(
        body["summary"]["Amount"],
        json!({"mean": null, "max": null, "min": null})
    );
}

#[tokio::test]
async fn test_header_only_csv_has_empty_summary() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = send(app(&dir), upload_request("file", "h.csv", b"name,city\n")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["columns"], json!(["name", "city"]));
    assert_eq!(body["summary"], json!({}));
}

#[tokio::test]
async fn test_oversized_upload_is_413() {
    let dir = tempfile::tempdir().unwrap();
    let content = vec![b'a'; 1000];

    let (status, body) = send(
        app_with_body_limit(&dir, 256),
        upload_request("file", "big.csv", &content),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "payload_too_large");
    assert!(!dir.path().join("big.csv").exists());
}

#[tokio::test]
async fn test_xlsx_upload() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = include_bytes!("fixtures/sales.xlsx");

    let (status, body) = send(app(&dir), upload_request("file", "sales.xlsx", workbook)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["columns"], json!(["item", "qty", "price", "paid"]));

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["item"], "pen");
    assert_eq!(data[0]["qty"].as_f64(), Some(3.0));
    assert_eq!(data[0]["price"], json!(1.25));
    assert_eq!(data[1]["paid"], json!(false));

    let keys: Vec<_> = body["summary"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&"qty".to_string()) && keys.contains(&"price".to_string()));
    assert_eq!(body["summary"]["price"]["min"], json!(1.25));
    assert!(dir.path().join("sales.xlsx").exists());
}
