use super::*;

#[test]
fn methods_map_one_to_one() {
    assert_eq!(reqwest_method(Method::Get), reqwest::Method::GET);
    assert_eq!(reqwest_method(Method::Patch), reqwest::Method::PATCH);
    assert_eq!(reqwest_method(Method::Delete), reqwest::Method::DELETE);
}

#[tokio::test]
async fn malformed_url_is_rejected_before_sending() {
    let backend = ReqwestBackend::new().expect("client");
    let err = backend
        .execute(HttpRequest {
            method: Method::Get,
            url: "not a url".to_owned(),
            headers: Vec::new(),
            body: None,
            timeout: Duration::from_secs(1),
        })
        .await
        .expect_err("invalid url");
    assert!(matches!(err, TransportError::InvalidRequest(_)));
}
