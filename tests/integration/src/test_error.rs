//! Error response integration tests.

#[cfg(test)]
mod tests {
    use crate::{client, sign_url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_missing_region() {
        let resp = client()
            .get(sign_url(&[
                ("date", Some("20150830")),
                ("region", None),
                ("service", Some("iam")),
                ("scope", Some("20150830/us-east-1/iam/aws4_request")),
                ("tosign", Some("x")),
            ]))
            .send()
            .await
            .expect("send sign request");

        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = resp.json().await.expect("json body");
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|msg| msg.contains("region"))
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_malformed_date() {
        let resp = client()
            .get(sign_url(&[
                ("date", Some("2020-99-99")),
                ("region", Some("us-east-1")),
                ("service", Some("iam")),
                ("scope", Some("x")),
                ("tosign", Some("x")),
            ]))
            .send()
            .await
            .expect("send sign request");

        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = resp.json().await.expect("json body");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_oversized_string_to_sign() {
        let tosign = "a".repeat(70_000);
        let resp = client()
            .get(sign_url(&[
                ("date", Some("20150830")),
                ("region", Some("us-east-1")),
                ("service", Some("iam")),
                ("scope", Some("20150830/us-east-1/iam/aws4_request")),
                ("tosign", Some(tosign.as_str())),
            ]))
            .send()
            .await
            .expect("send sign request");

        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }
}
