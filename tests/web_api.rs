use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};
use startup_navigator::core::ConfigManager;
use startup_navigator::web::build_rocket;
use startup_navigator::work24::projection::UTF8_BOM;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = r#"<wantedRoot>
  <wanted>
    <wantedInfo>
      <corpInfo><corpNm>한빛소프트</corpNm></corpInfo>
      <wantedTitle>프론트엔드 개발자</wantedTitle>
      <salTpNm>연봉</salTpNm>
      <workRegion>서울</workRegion>
      <empTpNm>정규직</empTpNm>
      <enterTpNm>경력</enterTpNm>
      <eduNm>대졸</eduNm>
    </wantedInfo>
    <wantedInfo>
      <corpInfo><corpNm>바다물류</corpNm></corpInfo>
      <wantedTitle>물류 관리자</wantedTitle>
      <salTpNm>월급</salTpNm>
      <workRegion>서울</workRegion>
      <empTpNm>계약직</empTpNm>
      <enterTpNm>신입</enterTpNm>
      <eduNm>고졸</eduNm>
    </wantedInfo>
  </wanted>
</wantedRoot>"#;

async fn work24_mock() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("authKey", "web-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .mount(&server)
        .await;
    server
}

async fn client_for(work24: &MockServer) -> Client {
    let work24_url = format!("{}/list.do", work24.uri());
    let config = ConfigManager::from_sources(None, |key| match key {
        "WORK24_API_URL" => Some(work24_url.clone()),
        "ANTHROPIC_API_URL" => Some("http://127.0.0.1:9/v1/messages".to_string()),
        _ => None,
    })
    .unwrap();

    Client::tracked(build_rocket(&config).unwrap()).await.unwrap()
}

async fn save_keys(client: &Client, body: Value) -> Value {
    let response = client
        .post("/api/session/credentials")
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    response.into_json::<Value>().await.unwrap()
}

#[rocket::async_test]
async fn test_health() {
    let work24 = work24_mock().await;
    let client = client_for(&work24).await;

    let response = client.get("/api/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_json::<Value>().await.unwrap(), json!("OK"));
}

#[rocket::async_test]
async fn test_search_without_key_is_unauthorized() {
    let work24 = work24_mock().await;
    let client = client_for(&work24).await;

    let response = client.get("/api/jobs").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);

    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error_code"], json!("MISSING_CREDENTIAL"));
    assert!(work24.received_requests().await.unwrap().is_empty());
}

#[rocket::async_test]
async fn test_saved_key_drives_search() {
    let work24 = work24_mock().await;
    let client = client_for(&work24).await;

    let saved = save_keys(&client, json!({ "work24_auth_key": "  web-key " })).await;
    assert_eq!(saved["data"]["work24_key_length"], json!(7));
    assert_eq!(saved["data"]["anthropic_key_length"], Value::Null);
    assert!(!saved.to_string().contains("web-key"));

    let response = client
        .get("/api/jobs?start_page=1&display=20")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body = response.into_json::<Value>().await.unwrap();
    let data = &body["data"];
    assert_eq!(data["status"], json!("success"));
    assert_eq!(data["display"], json!(20));
    assert_eq!(data["total"], json!(2));
    assert_eq!(data["table"]["rows"][1][0], json!("바다물류"));
    assert_eq!(
        data["region_counts"],
        json!([{ "category": "서울", "count": 2 }])
    );
}

#[rocket::async_test]
async fn test_out_of_range_display_is_rejected() {
    let work24 = work24_mock().await;
    let client = client_for(&work24).await;
    save_keys(&client, json!({ "work24_auth_key": "web-key" })).await;

    let response = client.get("/api/jobs?display=500").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["error_code"], json!("INVALID_QUERY"));
}

#[rocket::async_test]
async fn test_unparseable_query_is_rejected_without_upstream_call() {
    let work24 = work24_mock().await;
    let client = client_for(&work24).await;
    save_keys(&client, json!({ "work24_auth_key": "web-key" })).await;

    for uri in [
        "/api/jobs?display=-5",
        "/api/jobs?display=abc",
        "/api/jobs?start_page=-1",
        "/api/jobs/export?display=abc",
    ] {
        let response = client.get(uri).dispatch().await;
        assert_eq!(response.status(), Status::BadRequest, "{}", uri);
        let body = response.into_json::<Value>().await.unwrap();
        assert_eq!(body["error_code"], json!("INVALID_QUERY"), "{}", uri);
    }

    assert!(work24.received_requests().await.unwrap().is_empty());
}

#[rocket::async_test]
async fn test_cors_headers_do_not_allow_credentials() {
    let work24 = work24_mock().await;
    let client = client_for(&work24).await;

    let response = client.get("/api/health").dispatch().await;
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
    assert!(response
        .headers()
        .get_one("Access-Control-Allow-Credentials")
        .is_none());
}

#[rocket::async_test]
async fn test_csv_export_has_bom_and_headers() {
    let work24 = work24_mock().await;
    let client = client_for(&work24).await;
    save_keys(&client, json!({ "work24_auth_key": "web-key" })).await;

    let response = client.get("/api/jobs/export").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::CSV));
    assert!(response
        .headers()
        .get_one("Content-Disposition")
        .unwrap()
        .contains("job_listings.csv"));

    let bytes = response.into_bytes().await.unwrap();
    assert!(bytes.starts_with(UTF8_BOM));
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("회사,제목,급여,지역,고용형태,경력,학력"));
    assert_eq!(lines.count(), 2);
}

#[rocket::async_test]
async fn test_cleared_session_forgets_keys() {
    let work24 = work24_mock().await;
    let client = client_for(&work24).await;
    save_keys(&client, json!({ "work24_auth_key": "web-key" })).await;

    let response = client.delete("/api/session").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let response = client.get("/api/jobs").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[rocket::async_test]
async fn test_saving_nothing_is_rejected() {
    let work24 = work24_mock().await;
    let client = client_for(&work24).await;

    let response = client
        .post("/api/session/credentials")
        .header(ContentType::JSON)
        .body(json!({ "anthropic_api_key": "   " }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["error_code"], json!("EMPTY_CREDENTIAL"));
}

#[rocket::async_test]
async fn test_blank_idea_is_rejected_before_any_request() {
    let work24 = work24_mock().await;
    let client = client_for(&work24).await;

    let response = client
        .post("/api/ideas/analyze")
        .header(ContentType::JSON)
        .body(json!({ "idea_text": "  " }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);

    save_keys(&client, json!({ "anthropic_api_key": "sk-web" })).await;
    let response = client
        .post("/api/ideas/analyze")
        .header(ContentType::JSON)
        .body(json!({ "idea_text": "  " }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["error_code"], json!("EMPTY_IDEA"));
    assert_eq!(body["severity"], json!("warning"));
}
