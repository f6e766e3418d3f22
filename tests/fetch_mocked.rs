/// Integration tests with a mocked spreadsheet export endpoint
/// Exercises fetch → parse → view without hitting the real spreadsheet host
use bank_clients::{
    fetch_csv, load_detail, Config, HttpSheetSource, ListView, LoadError, LoadStatus,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHEET_ID: &str = "test-sheet";

const CUSTOMERS: &str = "\"id\",\"cpfCnpj\",\"rg\",\"dataNascimento\",\"nome\",\"nomeSocial\",\"email\",\"endereco\",\"rendaAnual\",\"patrimonio\",\"estadoCivil\",\"codigoAgencia\"
\"1\",\"111.111.111-11\",\"\",\"1980-01-15\",\"Ana Souza\",\"\",\"ana@example.com\",\"Rua A, 1\",\"85000\",\"120000\",\"Casado\",\"10\"
\"2\",\"222.222.222-22\",\"\",\"1992-07-02\",\"Bruno Lima\",\"\",\"bruno@example.com\",\"Rua B\",\"42000\",\"5000\",\"Solteiro\",\"12\"
";

const ACCOUNTS: &str = "\"id\",\"cpfCnpjCliente\",\"tipo\",\"saldo\",\"limiteCredito\",\"creditoDisponivel\"
\"100\",\"111.111.111-11\",\"corrente\",\"1500.25\",\"2000\",\"1800\"
\"101\",\"222.222.222-22\",\"poupanca\",\"300\",\"0\",\"0\"
";

const BRANCHES: &str = "\"id\",\"codigo\",\"nome\",\"endereco\"
\"b1\",\"10\",\"Agência Centro\",\"Praça Sete, 100\"
";

/// Helper function to create a config pointing at the mock server
fn create_test_config(base_url: String) -> Config {
    Config {
        sheets_base_url: base_url,
        spreadsheet_id: SHEET_ID.to_string(),
        timeout_secs: 5,
        ..Config::default()
    }
}

async fn mount_sheet(server: &MockServer, sheet: &str, body: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/gviz/tq", SHEET_ID)))
        .and(query_param("tqx", "out:csv"))
        .and(query_param("sheet", sheet))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_csv_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n1,2\n"))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let text = fetch_csv(&client, &format!("{}/export.csv", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(text, "a,b\n1,2\n");
}

#[tokio::test]
async fn test_fetch_csv_fails_on_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.csv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/missing.csv", mock_server.uri());
    let err = fetch_csv(&client, &url).await.unwrap_err();

    assert_eq!(err, LoadError::Http { url, status: 404 });
}

#[tokio::test]
async fn test_fetch_csv_network_failure() {
    // Nothing listens on port 9 (discard) in the test environment
    let client = reqwest::Client::new();
    let err = fetch_csv(&client, "http://127.0.0.1:9/x.csv").await.unwrap_err();

    assert_eq!(err.kind(), "network");
}

#[tokio::test]
async fn test_list_view_loads_quoted_export() {
    let mock_server = MockServer::start().await;
    mount_sheet(&mock_server, "clientes", CUSTOMERS, 1).await;

    let source = HttpSheetSource::new(create_test_config(mock_server.uri())).unwrap();
    let mut view = ListView::new(10);
    view.load(&source).await;

    assert_eq!(view.status(), &LoadStatus::Ready);
    assert_eq!(view.customers().len(), 2);
    // Quoted cell with an embedded comma stays whole
    assert_eq!(view.customers()[0].address, "Rua A, 1");

    view.search("lima");
    let visible = view.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].tax_id, "222.222.222-22");
}

#[tokio::test]
async fn test_list_view_reports_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let source = HttpSheetSource::new(create_test_config(mock_server.uri())).unwrap();
    let mut view = ListView::new(10);
    view.load(&source).await;

    assert!(matches!(view.status(), LoadStatus::Failed(message) if message.contains("500")));
    assert!(view.visible().is_empty());
}

#[tokio::test]
async fn test_detail_flow_over_http() {
    let mock_server = MockServer::start().await;
    mount_sheet(&mock_server, "clientes", CUSTOMERS, 1).await;
    mount_sheet(&mock_server, "contas", ACCOUNTS, 1).await;
    mount_sheet(&mock_server, "agencias", BRANCHES, 1).await;

    let source = HttpSheetSource::new(create_test_config(mock_server.uri())).unwrap();
    let detail = load_detail(&source, "1").await.unwrap().unwrap();

    assert_eq!(detail.customer.name, "Ana Souza");
    assert_eq!(detail.accounts.len(), 1);
    assert_eq!(detail.accounts[0].balance, 1500.25);
    let branch = detail.branch.unwrap();
    assert_eq!(branch.name, "Agência Centro");
    assert_eq!(branch.address, "Praça Sete, 100");
}

#[tokio::test]
async fn test_unknown_customer_skips_accounts_and_branches() {
    let mock_server = MockServer::start().await;
    mount_sheet(&mock_server, "clientes", CUSTOMERS, 1).await;
    mount_sheet(&mock_server, "contas", ACCOUNTS, 0).await;
    mount_sheet(&mock_server, "agencias", BRANCHES, 0).await;

    let source = HttpSheetSource::new(create_test_config(mock_server.uri())).unwrap();
    let detail = load_detail(&source, "999").await.unwrap();

    assert!(detail.is_none());
    // expectations (0 calls for contas/agencias) are verified when the server drops
}

#[tokio::test]
async fn test_detail_keeps_customer_when_accounts_export_fails() {
    let mock_server = MockServer::start().await;
    mount_sheet(&mock_server, "clientes", CUSTOMERS, 1).await;
    mount_sheet(&mock_server, "agencias", BRANCHES, 1).await;

    Mock::given(method("GET"))
        .and(path(format!("/{}/gviz/tq", SHEET_ID)))
        .and(query_param("sheet", "contas"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = HttpSheetSource::new(create_test_config(mock_server.uri())).unwrap();
    let detail = load_detail(&source, "1").await.unwrap().unwrap();

    assert_eq!(detail.customer.name, "Ana Souza");
    assert!(detail.accounts.is_empty());
    assert!(detail.accounts_error.unwrap().contains("500"));
    assert_eq!(detail.branch.unwrap().name, "Agência Centro");
}
