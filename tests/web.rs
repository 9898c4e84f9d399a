//! HTTP tests against the router

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sentiment_dashboard::{
    utils::{AppConfig, TeamMember},
    web::{create_router, Animations, AppState},
    SentimentService,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "----dashboard-test-boundary";

fn router() -> Router {
    router_with(AppConfig::default())
}

fn router_with(config: AppConfig) -> Router {
    let state = AppState::new(SentimentService::default(), config, Animations::none());
    create_router(Arc::new(state))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, value: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(value.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Multipart request with (name, optional file name, content) parts
fn post_multipart(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, file_name, content) in parts {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        match file_name {
            Some(file_name) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: text/plain\r\n\r\n",
                name, file_name
            )),
            None => body.push_str(&format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

mod pages {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let response = router().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let value: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn test_every_tab_renders() {
        for uri in ["/", "/analyzer", "/dashboard", "/team", "/info", "/feedback"] {
            let response = router().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
            let html = body_text(response).await;
            assert!(html.contains("<nav class=\"tabs\">"), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_manual_entry() {
        let response = router()
            .oneshot(post_form("/analyzer/text", "text=I+love+the+Olympics%21+This+is+amazing%21"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Sentiment: POSITIVE"));
        assert!(html.contains("😄"));
    }

    #[tokio::test]
    async fn test_empty_manual_entry_warns() {
        let response = router().oneshot(post_form("/analyzer/text", "text=")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Please enter a tweet before analyzing."));
    }

    #[tokio::test]
    async fn test_feedback() {
        let html = body_text(router().oneshot(post_form("/feedback", "feedback=")).await.unwrap()).await;
        assert!(html.contains("Please enter your feedback before submitting."));

        let html = body_text(
            router()
                .oneshot(post_form("/feedback", "feedback=Great+charts"))
                .await
                .unwrap(),
        )
        .await;
        assert!(html.contains("Thank you for your feedback!"));
    }

    #[tokio::test]
    async fn test_rating() {
        let response = router().oneshot(post_form("/feedback/rating", "rating=4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Thank you for rating us 4 star(s)!"));

        let response = router().oneshot(post_form("/feedback/rating", "rating=9")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod uploads {
    use super::*;

    #[tokio::test]
    async fn test_text_upload() {
        let request = post_multipart(
            "/analyzer/file",
            &[("file", Some("tweets.txt"), "I love it\nI hate it")],
        );
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("<td>I love it</td><td>POSITIVE</td>"));
        assert!(html.contains("<td>I hate it</td><td>NEGATIVE</td>"));
        assert!(html.contains("const LABEL_CHARTS"));
    }

    #[tokio::test]
    async fn test_csv_without_known_column_offers_picker() {
        let csv = "id,body\n1,I love it\n";
        let request = post_multipart("/analyzer/file", &[("file", Some("tweets.csv"), csv)]);
        let html = body_text(router().oneshot(request).await.unwrap()).await;

        assert!(html.contains("Select the column containing the text to analyze."));
        assert!(html.contains(r#"<option value="body">body</option>"#));

        // Second round trip with the picked column and the carried content
        let request = post_multipart(
            "/analyzer/file",
            &[("column", None, "body"), ("content", None, csv)],
        );
        let html = body_text(router().oneshot(request).await.unwrap()).await;
        assert!(html.contains("<td>I love it</td><td>POSITIVE</td>"));
    }

    #[tokio::test]
    async fn test_unsupported_upload() {
        let request = post_multipart("/analyzer/file", &[("file", Some("sheet.xlsx"), "x")]);
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("unsupported upload"));
    }

    #[tokio::test]
    async fn test_dashboard_upload() {
        let csv = "Tweet_Content,Tweet_Timestamp\n\
            Loved the opening ceremony! #Paris2024,2024-07-26 20:15:00\n\
            Terrible organization #Paris2024,2024-07-27 09:00:00\n\
            The bus arrives at noon,2024-07-27 10:30:00\n";
        let request = post_multipart("/dashboard", &[("file", Some("tweets.csv"), csv)]);
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("3 tweets analyzed: 1 positive, 1 neutral, 1 negative."));
        assert!(html.contains("const REPORT"));
        assert!(html.contains("#paris2024"));
    }

    #[tokio::test]
    async fn test_dashboard_without_known_column_offers_picker() {
        let csv = "text,when\nI love it,2024-07-26\nI hate it,2024-07-27\n";
        let request = post_multipart("/dashboard", &[("file", Some("tweets.csv"), csv)]);
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Select the column containing the text to analyze."));
        assert!(html.contains(r#"<select id="column" name="column">"#));
        assert!(html.contains(r#"<select id="timestamp_column" name="timestamp_column">"#));
        assert!(html.contains(r#"<option value="when">when</option>"#));
        assert!(!html.contains("const REPORT"));

        // Picked text and timestamp columns with the carried content
        let request = post_multipart(
            "/dashboard",
            &[("column", None, "text"), ("timestamp_column", None, "when"), ("content", None, csv)],
        );
        let html = body_text(router().oneshot(request).await.unwrap()).await;
        assert!(html.contains("2 tweets analyzed: 1 positive, 0 neutral, 1 negative."));
        assert!(html.contains(r#""date":"2024-07-27""#));
        assert!(!html.contains("without a timestamp"));
    }

    #[tokio::test]
    async fn test_dashboard_picker_without_timestamp() {
        let csv = "text,when\nI love it,2024-07-26\n";
        let request = post_multipart(
            "/dashboard",
            &[("column", None, "text"), ("timestamp_column", None, ""), ("content", None, csv)],
        );
        let html = body_text(router().oneshot(request).await.unwrap()).await;
        assert!(html.contains("1 tweets analyzed: 1 positive, 0 neutral, 0 negative."));
        assert!(html.contains("1 tweets without a timestamp are left out of the time series."));
    }

    #[tokio::test]
    async fn test_empty_uploads_have_their_own_message() {
        let request = post_multipart("/analyzer/file", &[("file", Some("tweets.txt"), "")]);
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("The uploaded file has no rows to analyze."));
        assert!(!html.contains("Please enter a tweet before analyzing."));

        let request = post_multipart("/dashboard", &[("file", Some("tweets.csv"), "Tweet_Content,Tweet_Timestamp\n")]);
        let html = body_text(router().oneshot(request).await.unwrap()).await;
        assert!(html.contains("The uploaded file has no rows to analyze."));
    }

    #[tokio::test]
    async fn test_dashboard_without_file() {
        let request = post_multipart("/dashboard", &[("column", None, "text")]);
        let html = body_text(router().oneshot(request).await.unwrap()).await;
        assert!(html.contains("Please upload a CSV file with tweets."));
    }
}

mod team {
    use super::*;

    fn config_with_member(photo: Option<std::path::PathBuf>) -> AppConfig {
        let mut config = AppConfig::default();
        config.team.push(TeamMember {
            name: "Ada".to_string(),
            title: "Analyst".to_string(),
            bio: String::new(),
            photo,
            github: None,
            linkedin: None,
            email: None,
        });
        config
    }

    #[tokio::test]
    async fn test_missing_photo_redirects_to_placeholder() {
        let config = config_with_member(Some("/nonexistent/ada.jpg".into()));
        let placeholder = config.server.placeholder_photo_url.clone();

        let response = router_with(config).oneshot(get("/team/0/photo")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], placeholder.as_str());
    }

    #[tokio::test]
    async fn test_photo_served() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ada.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let response = router_with(config_with_member(Some(path)))
            .oneshot(get("/team/0/photo"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    }

    #[tokio::test]
    async fn test_unknown_member() {
        let response = router().oneshot(get("/team/7/photo")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod api {
    use super::*;

    #[tokio::test]
    async fn test_analyze() {
        let request = post_json("/api/analyze", json!({ "text": "This is terrible, I hate how it was organized" }));
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let value: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["label"], "NEGATIVE");
        assert_eq!(value["glyph"], "😞");
        assert!(value["compound_score"].as_f64().unwrap() < -0.05);
    }

    #[tokio::test]
    async fn test_analyze_empty_is_unprocessable() {
        let response = router()
            .oneshot(post_json("/api/analyze", json!({ "text": "   " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let value: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["error"], "no text to analyze");
    }

    #[tokio::test]
    async fn test_batch() {
        let request = post_json(
            "/api/batch",
            json!({ "texts": ["I love the Olympics! This is amazing!", "The closing ceremony starts at eight tonight"] }),
        );
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let value: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["records"][0]["label"], "POSITIVE");
        assert_eq!(value["records"][1]["label"], "NEUTRAL");
        assert_eq!(value["label_counts"]["positive"], 1);
        assert_eq!(value["label_counts"]["neutral"], 1);
    }

    #[tokio::test]
    async fn test_dashboard() {
        let request = post_json(
            "/api/dashboard",
            json!({
                "records": [
                    { "text": "Great final #Swimming", "timestamp": "2024-07-28T18:00:00" },
                    { "text": "Awful judging #Swimming", "timestamp": "2024-07-28 19:00:00" },
                    { "text": "No time on this one" }
                ]
            }),
        );
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let value: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["total_records"], 3);
        assert_eq!(value["untimed_records"], 1);
        assert_eq!(value["volume_over_time"][0]["date"], "2024-07-28");
        assert_eq!(value["volume_over_time"][0]["count"], 2);
        assert_eq!(value["top_hashtags"][0]["term"], "#swimming");
    }
}
