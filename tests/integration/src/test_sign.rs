//! Signing endpoint integration tests.

#[cfg(test)]
mod tests {
    use crate::{client, expected_signature, sign_url};

    const S3_STRING_TO_SIGN: &str = "AWS4-HMAC-SHA256\n\
        20130524T000000Z\n\
        20130524/us-east-1/s3/aws4_request\n\
        7344ae5b7ee6c3e7e6b0fe0640412a37625d1fbfff95c48bbb2dc43964946972";

    const IAM_STRING_TO_SIGN: &str = "AWS4-HMAC-SHA256\n\
        20150830T123600Z\n\
        20150830/us-east-1/iam/aws4_request\n\
        f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59";

    async fn sign_text(date: &str, region: &str, service: &str, tosign: &str) -> String {
        let scope = format!("{date}/{region}/{service}/aws4_request");
        let resp = client()
            .get(sign_url(&[
                ("date", Some(date)),
                ("region", Some(region)),
                ("service", Some(service)),
                ("scope", Some(scope.as_str())),
                ("tosign", Some(tosign)),
            ]))
            .send()
            .await
            .expect("send sign request");

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        resp.text().await.expect("read body")
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_sign_s3_documentation_example() {
        assert_eq!(
            sign_text("20130524", "us-east-1", "s3", S3_STRING_TO_SIGN).await,
            "f0e8bdb87c964420e857bd35b5d6ed310bd44f0170aba48dd91039c6036bdb41"
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_sign_iam_string_to_sign_under_server_secret() {
        assert_eq!(
            sign_text("20150830", "us-east-1", "iam", IAM_STRING_TO_SIGN).await,
            "33f5dad2191de0cb4b7ab912f876876c2c4f72e2991a458f9499233c7b992438"
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_sign_concurrent_requests_with_own_scope() {
        let client = client();

        let requests = (0..100_u32).map(|i| {
            let client = client.clone();
            async move {
                let date = format!("2022{:02}{:02}", i % 12 + 1, i % 28 + 1);
                let region = format!("region-{i}");
                let tosign = format!("request-{i}");
                let scope = format!("{date}/{region}/s3/aws4_request");

                let body = client
                    .get(sign_url(&[
                        ("date", Some(date.as_str())),
                        ("region", Some(region.as_str())),
                        ("service", Some("s3")),
                        ("scope", Some(scope.as_str())),
                        ("tosign", Some(tosign.as_str())),
                    ]))
                    .send()
                    .await
                    .expect("send sign request")
                    .text()
                    .await
                    .expect("read body");

                (expected_signature(&date, &region, "s3", &tosign), body)
            }
        });

        for (expected, actual) in futures::future::join_all(requests).await {
            assert_eq!(actual, expected);
        }
    }
}
