use axum::{
    Json, Router,
    extract::{Path, RawQuery},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::{SocketAddr, TcpListener};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct MaterialsResponse {
    rows: Vec<MaterialRow>,
}

#[derive(Debug, Deserialize)]
struct MaterialRow {
    id: String,
    status: String,
    cells: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    id: String,
    current_status: String,
    overview: Vec<OverviewCard>,
    table: Vec<HistoryRow>,
    chart: TrendData,
}

#[derive(Debug, Deserialize)]
struct OverviewCard {
    key: String,
    value: String,
    direction: String,
    change: String,
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    date: String,
    cells: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TrendData {
    labels: Vec<String>,
    series: Vec<TrendSeries>,
}

#[derive(Debug, Deserialize)]
struct TrendSeries {
    key: String,
    kind: String,
    values: Vec<f64>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));
static LEGACY_QUERY: Lazy<std::sync::Mutex<Option<String>>> =
    Lazy::new(|| std::sync::Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn sample_json(record_date: &str, impressions: f64) -> Value {
    json!({
        "overall_impressions": impressions,
        "overall_clicks": 40,
        "overall_ctr": 0.015,
        "overall_conversion_rate": 0.02,
        "overall_orders": 5,
        "overall_sales": 1234.5,
        "overall_spend": 321.0,
        "spend_percentage": 0.004,
        "basic_spend": 100.0,
        "roi": 3.5,
        "cost_per_order": 64.2,
        "record_date": record_date,
        "status": "投放中"
    })
}

async fn index_fixture() -> Json<Value> {
    Json(json!({
        "materials": [
            { "id": "m-1001", "current_status": "投放中" },
            { "id": "m-1002", "current_status": "投放中" },
            { "id": "m-broken", "current_status": "投放中" },
            { "id": "m-2001", "current_status": "跑量素材" }
        ]
    }))
}

async fn detail_fixture(Path(file): Path<String>) -> Response {
    match file.as_str() {
        "m-1001.json" => Json(json!({
            "id": "m-1001",
            "current_status": "投放中",
            "data": [
                sample_json("2026-08-02 10:00:00", 120.0),
                sample_json("2026-08-01 09:00:00", 100.0),
            ]
        }))
        .into_response(),
        "m-1002.json" => Json(json!({
            "id": "m-1002",
            "current_status": "投放中",
            "data": [sample_json("2026-08-02 10:00:00", 1234567.0)]
        }))
        .into_response(),
        "m-2001.json" => Json(json!({
            "id": "m-2001",
            "current_status": "跑量素材",
            "data": [sample_json("2026-08-02 10:00:00", 50.0)]
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn legacy_fixture(RawQuery(query): RawQuery) -> Json<Value> {
    *LEGACY_QUERY.lock().unwrap() = query;
    Json(json!([
        {
            "ID": "m-1001",
            "roi": 3.5,
            "overall_clicks": 40,
            "overall_impressions": 120,
            "record_date": "2026-08-02 10:00:00"
        },
        {
            "ID": "m-1001",
            "roi": 3.1,
            "overall_clicks": 30,
            "overall_impressions": 100,
            "record_date": "2026-08-01 09:00:00"
        }
    ]))
}

fn stub_router() -> Router {
    Router::new()
        .route("/data/index.json", get(index_fixture))
        .route("/data/ids/:file", get(detail_fixture))
        .route("/data.json", get(legacy_fixture))
}

/// The stub upstream runs on its own thread and runtime so it outlives any
/// single test's runtime.
fn spawn_stub() -> SocketAddr {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("stub runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind stub upstream");
            tx.send(listener.local_addr().expect("stub addr"))
                .expect("report stub addr");
            axum::serve(listener, stub_router()).await.expect("serve stub");
        });
    });
    rx.recv().expect("stub upstream did not start")
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let stub = spawn_stub();
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_material-dashboard"))
        .env("PORT", port.to_string())
        .env("DATA_BASE_URL", format!("http://{stub}"))
        .env("LEGACY_DATA_URL", format!("http://{stub}/data.json"))
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_pages_render() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let list = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(list.status().is_success());
    let body = list.text().await.unwrap();
    assert!(body.contains("素材数据总览"));
    assert!(body.contains("跑量素材"));
    assert!(body.contains("二阶段刺激"));

    for page in ["/data/detail.html", "/legacy.html"] {
        let resp = client
            .get(format!("{}{page}", server.base_url))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success(), "{page} did not render");
    }
}

#[tokio::test]
async fn http_status_filter_returns_matching_rows_minus_failures() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response: MaterialsResponse = client
        .get(format!("{}/api/materials", server.base_url))
        .query(&[("status", "投放中")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // m-broken has no detail document and is skipped, not fatal
    let ids: Vec<&str> = response.rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["m-1001", "m-1002"]);
    assert!(response.rows.iter().all(|row| row.status == "投放中"));

    let first = &response.rows[0];
    assert_eq!(first.cells.len(), 11);
    assert_eq!(first.cells[0], "120"); // impressions
    assert_eq!(first.cells[2], "2%"); // ctr 0.015
    assert_eq!(first.cells[5], "¥1234.50"); // sales
    assert_eq!(first.cells[7], "0%"); // spend percentage 0.004

    let second = &response.rows[1];
    assert_eq!(second.cells[0], "1,234,567");
}

#[tokio::test]
async fn http_status_filter_is_exact_match() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response: MaterialsResponse = client
        .get(format!("{}/api/materials", server.base_url))
        .query(&[("status", "跑量素材")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let ids: Vec<&str> = response.rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["m-2001"]);
}

#[tokio::test]
async fn http_id_search_returns_single_row() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response: MaterialsResponse = client
        .get(format!("{}/api/materials", server.base_url))
        .query(&[("id", "m-2001")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(response.rows.len(), 1);
    assert_eq!(response.rows[0].id, "m-2001");
    assert_eq!(response.rows[0].status, "跑量素材");
}

#[tokio::test]
async fn http_id_search_unknown_id_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/materials", server.base_url))
        .query(&[("id", "m-9999")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_detail_payload_has_overview_table_and_chart() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let detail: DetailResponse = client
        .get(format!("{}/api/materials/m-1001", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(detail.id, "m-1001");
    assert_eq!(detail.current_status, "投放中");

    // impressions grew 100 -> 120
    let impressions = detail
        .overview
        .iter()
        .find(|card| card.key == "overall_impressions")
        .unwrap();
    assert_eq!(impressions.value, "120");
    assert_eq!(impressions.direction, "up");
    assert_eq!(impressions.change, "20.00%");

    // roi is unchanged between the samples
    let roi = detail.overview.iter().find(|card| card.key == "roi").unwrap();
    assert_eq!(roi.direction, "flat");
    assert_eq!(roi.change, "-");

    // history table stays newest-first
    assert_eq!(detail.table.len(), 2);
    assert_eq!(detail.table[0].date, "2026-08-02 10:00");
    assert_eq!(detail.table[1].date, "2026-08-01 09:00");
    assert_eq!(detail.table[0].cells[4], "5"); // orders

    // chart series are chronological
    assert_eq!(detail.chart.labels, vec!["09:00", "10:00"]);
    let series = detail
        .chart
        .series
        .iter()
        .find(|series| series.key == "overall_impressions")
        .unwrap();
    assert_eq!(series.values, vec![100.0, 120.0]);
    assert_eq!(series.kind, "count");
    let ctr = detail
        .chart
        .series
        .iter()
        .find(|series| series.key == "overall_ctr")
        .unwrap();
    assert_eq!(ctr.kind, "rate");
}

#[tokio::test]
async fn http_detail_unknown_material_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/materials/m-9999", server.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_legacy_feed_is_proxied_with_cache_buster() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let records: Vec<Value> = client
        .get(format!("{}/api/legacy", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["ID"], "m-1001");
    assert_eq!(records[0]["roi"], 3.5);

    let query = LEGACY_QUERY
        .lock()
        .unwrap()
        .clone()
        .expect("legacy upstream saw no query string");
    assert!(
        query.parse::<u64>().is_ok(),
        "cache buster should be a millisecond timestamp, got {query}"
    );
}
