//! CORS integration tests.

#[cfg(test)]
mod tests {
    use crate::{client, endpoint_url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_answer_preflight_with_no_content() {
        let resp = client()
            .request(
                reqwest::Method::OPTIONS,
                format!("{}/sign_auth", endpoint_url()),
            )
            .header("Origin", "https://app.example.com")
            .header("Access-Control-Request-Method", "GET")
            .send()
            .await
            .expect("send preflight");

        assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        assert!(resp.bytes().await.expect("read body").is_empty());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_allow_any_origin_on_errors() {
        let resp = client()
            .get(format!("{}/sign_auth", endpoint_url()))
            .header("Origin", "https://app.example.com")
            .send()
            .await
            .expect("send request");

        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        assert!(resp.headers().contains_key("access-control-allow-origin"));
    }
}
