use std::time::Duration;

use jokes_core::ApiError;
use jokes_engine::{GatewayError, GatewaySettings, JokeGateway, ReqwestGateway};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> ReqwestGateway {
    ReqwestGateway::new(GatewaySettings {
        base_url: format!("{}/", server.uri()),
        ..GatewaySettings::default()
    })
    .expect("gateway")
}

fn joke(text: &str, id: u64) -> serde_json::Value {
    json!({
        "category": "Programming",
        "type": "single",
        "joke": text,
        "flags": {
            "nsfw": false, "religious": false, "political": false,
            "racist": false, "sexist": false, "explicit": false
        },
        "id": id,
        "safe": true,
        "lang": "en"
    })
}

#[tokio::test]
async fn lists_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "categories": ["Any", "Misc", "Programming", "Dark", "Pun", "Spooky", "Christmas"],
            "categoryAliases": [{"alias": "Miscellaneous", "resolved": "Misc"}],
            "timestamp": 1700000000000u64
        })))
        .mount(&server)
        .await;

    let categories = gateway_for(&server).list_categories().await.expect("ok");
    assert_eq!(
        categories,
        vec!["Any", "Misc", "Programming", "Dark", "Pun", "Spooky", "Christmas"]
    );
}

#[tokio::test]
async fn fetches_a_burst_of_single_type_jokes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/joke/Programming"))
        .and(query_param("type", "single"))
        .and(query_param("amount", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "amount": 2,
            "jokes": [joke("first", 1), joke("second", 2)]
        })))
        .mount(&server)
        .await;

    let jokes = gateway_for(&server)
        .fetch_jokes("Programming", 2)
        .await
        .expect("ok");
    let texts: Vec<_> = jokes.iter().map(|j| j.joke.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(jokes[1].id, 2);
    assert!(jokes[0].safe);
}

#[tokio::test]
async fn burst_of_one_accepts_bare_joke_object() {
    let server = MockServer::start().await;
    let mut body = joke("lonely", 5);
    body["error"] = json!(false);
    Mock::given(method("GET"))
        .and(path("/joke/Programming"))
        .and(query_param("amount", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let jokes = gateway.fetch_jokes("Programming", 1).await.expect("ok");
    assert_eq!(jokes.len(), 1);
    assert_eq!(jokes[0].joke, "lonely");

    let single = gateway.fetch_single_joke("Programming").await.expect("ok");
    assert_eq!(single.joke, "lonely");
    assert_eq!(single.category, "Programming");
}

#[tokio::test]
async fn server_error_uses_body_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/joke/Nope"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": true,
            "code": 106,
            "message": "No matching joke found"
        })))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .fetch_jokes("Nope", 2)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::Server {
            status: 400,
            message: Some("No matching joke found".into())
        }
    );
    assert_eq!(err.normalize(), ApiError::new(400, "No matching joke found"));
}

#[tokio::test]
async fn server_error_without_body_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = gateway_for(&server).list_categories().await.unwrap_err();
    assert_eq!(
        err.normalize(),
        ApiError::new(500, "Request failed with status 500.")
    );
}

#[tokio::test]
async fn unexpected_success_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = gateway_for(&server).list_categories().await.unwrap_err();
    assert_eq!(err, GatewayError::UnexpectedStatus(204));
    assert_eq!(err.normalize().message, "Unexpected response status");
}

#[tokio::test]
async fn slow_response_times_out_as_no_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"error": false, "categories": []})),
        )
        .mount(&server)
        .await;

    let gateway = ReqwestGateway::new(GatewaySettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..GatewaySettings::default()
    })
    .expect("gateway");

    let err = gateway.list_categories().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)), "{err:?}");
    assert_eq!(err.normalize().status, 503);
}

#[tokio::test]
async fn unreachable_server_is_no_response() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let gateway = ReqwestGateway::new(GatewaySettings {
        base_url: uri,
        ..GatewaySettings::default()
    })
    .expect("gateway");
    let err = gateway.fetch_jokes("Pun", 2).await.unwrap_err();
    assert_eq!(err.normalize(), ApiError::no_response());
}

#[tokio::test]
async fn error_envelope_on_ok_status_is_client_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/joke/Dark"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": true,
            "message": "Too many requests"
        })))
        .mount(&server)
        .await;

    let err = gateway_for(&server).fetch_jokes("Dark", 2).await.unwrap_err();
    assert_eq!(err.normalize(), ApiError::new(500, "Too many requests"));
}

#[test]
fn rejects_unusable_base_url() {
    let err = ReqwestGateway::new(GatewaySettings {
        base_url: "not a url".into(),
        ..GatewaySettings::default()
    })
    .unwrap_err();
    assert!(matches!(err, GatewayError::ClientFault(_)));
}
