use std::fs;
use std::sync::Arc;
use stocks::core::DateRange;
use stocks::core::config::AppConfig;
use stocks::service::{ProviderStockService, StockService};
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server() -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/finnhub/search"))
            .and(query_param("q", "apple"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"count": 1, "result": [{"symbol": "AAPL", "description": "APPLE INC"}]}"#,
            ))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/finnhub/stock/profile2"))
            .and(query_param("symbol", "AAPL"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"name": "Apple Inc", "currency": "USD"}"#),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/iex/stock/AAPL/quote/latestPrice"))
            .respond_with(ResponseTemplate::new(200).set_body_string("121.03"))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/iex/stock/AAPL/chart/5d"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"date": "2021-03-01", "close": 127.79},
                    {"date": "2021-03-02", "close": 125.12},
                    {"date": "2021-03-03", "close": 122.06}
                ]"#,
            ))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn config_content(uri: &str) -> String {
        format!(
            r#"
            providers:
              finnhub:
                base_url: {uri}/finnhub
                token: test-finnhub
              iex:
                base_url: {uri}/iex
                token: test-iex
              timeout_secs: 5
            "#
        )
    }
}

fn write_config(uri: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), test_utils::config_content(uri))
        .expect("Failed to write config file");
    config_file
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = test_utils::create_mock_server().await;
    let config_file = write_config(&mock_server.uri());
    let config_path = config_file.path().to_str().unwrap();

    for (command, format) in [
        (
            stocks::AppCommand::Search {
                query: "apple".to_string(),
            },
            stocks::OutputFormat::Json,
        ),
        (
            stocks::AppCommand::Detail {
                symbol: "AAPL".to_string(),
            },
            stocks::OutputFormat::Table,
        ),
        (
            stocks::AppCommand::History {
                symbol: "AAPL".to_string(),
                range: DateRange::FiveDay,
            },
            stocks::OutputFormat::Json,
        ),
    ] {
        info!(?command, "Running command against mock providers");
        let result = stocks::run_command(command, Some(config_path), format).await;
        assert!(
            result.is_ok(),
            "Command failed with: {:?}",
            result.err()
        );
    }
}

#[test_log::test(tokio::test)]
async fn test_app_flow_reports_failure() {
    let mock_server = test_utils::create_mock_server().await;
    let config_file = write_config(&mock_server.uri());

    // No chart is mounted for one year, so the provider answers 404.
    let result = stocks::run_command(
        stocks::AppCommand::History {
            symbol: "AAPL".to_string(),
            range: DateRange::OneYear,
        },
        Some(config_file.path().to_str().unwrap()),
        stocks::OutputFormat::Json,
    )
    .await;

    let err = result.expect_err("History without chart data should fail");
    assert_eq!(
        err.to_string(),
        "Request failed with status 500 Internal Server Error"
    );
}

#[test_log::test(tokio::test)]
async fn test_service_shared_across_tasks() {
    let mock_server = test_utils::create_mock_server().await;
    let config_file = write_config(&mock_server.uri());
    let config = AppConfig::load_from_path(config_file.path()).unwrap();
    let service = Arc::new(ProviderStockService::from_config(&config.providers).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.get_stock_history("AAPL", DateRange::FiveDay).await })
        })
        .collect();

    let mut bodies = Vec::new();
    for handle in handles {
        let history = handle.await.unwrap().unwrap();
        assert_eq!(history.stock.name, "Apple Inc");
        assert_eq!(history.price_history.len(), 3);
        assert_eq!(history.price_history[2].price.to_string(), "122.06");
        bodies.push(serde_json::to_string(&history).unwrap());
    }
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}
