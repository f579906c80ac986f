use std::net::SocketAddr;

use actix_web::{web, App, HttpResponse, HttpServer};
use chrono::NaiveDate;
use trendr_data::{PriceProvider, PriceRequest, ProviderError, YahooChartProvider};
use trendr_net::{build_http_client, NetProfile};

// Two sessions of AAPL, three of MSFT (MSFT trades on the 4th, AAPL has no bar).
const AAPL: &str = r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","gmtoffset":-18000},
    "timestamp":[1704205800,1704292200],
    "indicators":{"quote":[{"close":[185.64,184.25]}],"adjclose":[{"adjclose":[185.64,184.25]}]}}],"error":null}}"#;
const MSFT: &str = r#"{"chart":{"result":[{"meta":{"symbol":"MSFT","gmtoffset":-18000},
    "timestamp":[1704205800,1704292200,1704378600],
    "indicators":{"quote":[{"close":[370.87,370.6,367.94]}],"adjclose":[{"adjclose":[370.87,370.6,367.94]}]}}],"error":null}}"#;
const NOT_FOUND: &str = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

async fn chart(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "AAPL" => HttpResponse::Ok()
            .content_type("application/json")
            .body(AAPL),
        "MSFT" => HttpResponse::Ok()
            .content_type("application/json")
            .body(MSFT),
        "BROKEN" => HttpResponse::BadGateway().body("upstream unavailable"),
        _ => HttpResponse::NotFound()
            .content_type("application/json")
            .body(NOT_FOUND),
    }
}

fn spawn_fixture_server() -> SocketAddr {
    let server = HttpServer::new(|| App::new().route("/chart/{symbol}", web::get().to(chart)))
        .workers(1)
        .bind("127.0.0.1:0")
        .expect("bind fixture server");
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    addr
}

fn provider(addr: SocketAddr) -> YahooChartProvider {
    let client = build_http_client(&NetProfile::default()).expect("client builds");
    YahooChartProvider::new(client, format!("http://{addr}/chart/"))
}

#[actix_rt::test]
async fn merges_tickers_into_one_table() {
    let addr = spawn_fixture_server();
    let request = PriceRequest::new(["AAPL", "MSFT"], "1mo", "1d");

    let table = provider(addr).fetch_closes(&request).await.unwrap();

    let dates: Vec<_> = table.dates().copied().collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        ]
    );
    assert_eq!(table.column(0), vec![Some(185.64), Some(184.25), None]);
    assert_eq!(table.column(1), vec![Some(370.87), Some(370.6), Some(367.94)]);
}

#[actix_rt::test]
async fn unknown_symbol_surfaces_upstream_error() {
    let addr = spawn_fixture_server();
    let request = PriceRequest::new(["AAPL", "NOPE"], "1mo", "1d");

    let err = provider(addr).fetch_closes(&request).await.unwrap_err();
    assert!(matches!(err, ProviderError::Upstream { ref symbol, .. } if symbol == "NOPE"));
}

#[actix_rt::test]
async fn non_json_error_status_is_reported() {
    let addr = spawn_fixture_server();
    let request = PriceRequest::new(["BROKEN"], "1mo", "1d");

    let err = provider(addr).fetch_closes(&request).await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 502, .. }));
}

#[actix_rt::test]
async fn connection_refused_is_a_request_error() {
    let client = build_http_client(&NetProfile::default()).unwrap();
    let provider = YahooChartProvider::new(client, "http://127.0.0.1:9/chart");
    let request = PriceRequest::new(["AAPL"], "1mo", "1d");

    let err = provider.fetch_closes(&request).await.unwrap_err();
    assert!(matches!(err, ProviderError::Request { .. }));
}
