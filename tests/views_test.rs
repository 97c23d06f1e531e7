//! Integration tests for the view-state containers
//!
//! Drives the page containers against a mocked backend and checks the
//! loading/ready/empty/error lifecycle, pagination rules, and the
//! optimistic upvote protocol.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roundtable_client::api::{ApiClient, SortOption, TopicTag};
use roundtable_client::config::ApiConfig;
use roundtable_client::views::{
    AgentDirectoryView, IdeaDetailView, IdeaFeedView, StatsView, ViewPhase,
};

fn create_test_client(base_url: &str) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        api_key: None,
        timeout_ms: 5000,
    };
    ApiClient::new(&config).expect("Failed to create client")
}

fn idea_json(id: &str, upvotes: u64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Idea {id}"),
        "body": "body",
        "topic_tag": null,
        "upvote_count": upvotes,
        "critique_count": 0,
        "agent": {"name": "poster"},
        "created_at": "2026-08-01T10:00:00Z",
        "updated_at": "2026-08-01T10:00:00Z"
    })
}

fn idea_page_json(ids: &[&str], total: u64, offset: u32) -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "ideas": ids.iter().map(|id| idea_json(id, 4)).collect::<Vec<_>>(),
            "total": total,
            "limit": 10,
            "offset": offset
        }
    })
}

mod idea_feed_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_refresh_lands_in_ready_with_pagination() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .and(query_param("offset", "0"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(idea_page_json(&["a", "b"], 25, 0)),
            )
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        assert_eq!(feed.phase(), ViewPhase::Loading);

        feed.refresh().await;

        assert_eq!(feed.phase(), ViewPhase::Ready);
        assert_eq!(feed.ideas().len(), 2);
        assert_eq!(feed.pager().total(), 25);
        assert_eq!(feed.pager().total_pages(), 3);
        assert!(!feed.pager().has_prev());
        assert!(feed.pager().has_next());
    }

    #[tokio::test]
    async fn test_page_navigation_fetches_matching_offset() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .and(query_param("offset", "0"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(idea_page_json(&["a"], 25, 0)),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .and(query_param("offset", "20"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(idea_page_json(&["z"], 25, 20)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        feed.refresh().await;
        feed.set_page(3).await;

        assert_eq!(feed.pager().page(), 3);
        assert_eq!(feed.ideas()[0].id, "z");
        assert!(feed.pager().has_prev());
        assert!(!feed.pager().has_next());
    }

    #[tokio::test]
    async fn test_open_page_fetches_the_requested_page_directly() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .and(query_param("offset", "20"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(idea_page_json(&["z"], 25, 20)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        feed.open_page(3).await;

        assert_eq!(feed.pager().page(), 3);
        assert_eq!(feed.ideas()[0].id, "z");
        // Exactly one request: no throwaway page-1 fetch first.
        assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_open_page_clamps_once_the_total_is_known() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .and(query_param("offset", "980"))
            .respond_with(ResponseTemplate::new(200).set_body_json(idea_page_json(&[], 25, 980)))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .and(query_param("offset", "20"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(idea_page_json(&["z"], 25, 20)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        feed.open_page(99).await;

        // The out-of-range request comes back empty with the total, after
        // which the feed settles on the last real page.
        assert_eq!(feed.pager().page(), 3);
        assert_eq!(feed.phase(), ViewPhase::Ready);
        assert_eq!(feed.ideas()[0].id, "z");
    }

    #[tokio::test]
    async fn test_topic_filter_change_resets_to_page_one() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(idea_page_json(&["a"], 25, 0)),
            )
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        feed.refresh().await;
        feed.set_page(2).await;
        assert_eq!(feed.pager().offset(), 10);

        feed.set_topic(Some(TopicTag::Research)).await;

        assert_eq!(feed.pager().page(), 1);
        let requests = mock_server.received_requests().await.unwrap();
        let last = requests.last().unwrap();
        let query = last.url.query().unwrap();
        assert!(query.contains("topic=research"), "query was {query}");
        assert!(query.contains("offset=0"), "query was {query}");
    }

    #[tokio::test]
    async fn test_sort_change_resets_to_page_one() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(idea_page_json(&["a"], 40, 0)),
            )
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        feed.refresh().await;
        feed.set_page(4).await;

        feed.set_sort(SortOption::Popular).await;

        assert_eq!(feed.pager().page(), 1);
        assert_eq!(feed.sort(), SortOption::Popular);
    }

    #[tokio::test]
    async fn test_empty_result_is_a_distinct_phase() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(idea_page_json(&[], 0, 0)))
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        feed.refresh().await;

        assert_eq!(feed.phase(), ViewPhase::Empty);
        assert!(feed.ideas().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_without_retry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": "database unavailable"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        feed.refresh().await;

        assert_eq!(feed.phase(), ViewPhase::Error);
        assert!(feed.ideas().is_empty());
        // expect(1) on the mock verifies no automatic retry happened.
    }

    #[tokio::test]
    async fn test_card_upvote_shows_server_count_and_pins_control() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(idea_page_json(&["a"], 1, 0)),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ideas/a/upvote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"upvote_count": 7}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        feed.refresh().await;

        feed.upvote("a", Some("rt_secret")).await;

        let idea = &feed.ideas()[0];
        // Server count replaces the display even though the fetched count was 4.
        assert_eq!(feed.displayed_count(idea), 7);
        let control = feed.vote_control("a").unwrap();
        assert!(control.upvoted());
        assert!(!control.is_enabled(true));

        // A second click is a no-op for the session.
        feed.upvote("a", Some("rt_secret")).await;
    }

    #[tokio::test]
    async fn test_card_upvote_failure_is_silent_and_retryable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(idea_page_json(&["a"], 1, 0)),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ideas/a/upvote"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "error": "invalid api key"
            })))
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        feed.refresh().await;

        feed.upvote("a", Some("bad_key")).await;

        let idea = &feed.ideas()[0];
        assert_eq!(feed.displayed_count(idea), 4);
        let control = feed.vote_control("a").unwrap();
        assert!(!control.upvoted());
        assert!(control.is_enabled(true));
    }

    #[tokio::test]
    async fn test_upvote_without_credential_issues_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(idea_page_json(&["a"], 1, 0)),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ideas/a/upvote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"upvote_count": 99}
            })))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut feed = IdeaFeedView::new(create_test_client(&mock_server.uri()));
        feed.refresh().await;
        feed.upvote("a", None).await;

        assert_eq!(feed.displayed_count(&feed.ideas()[0]), 4);
    }
}

mod idea_detail_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roundtable_client::api::AngleTag;
    use roundtable_client::error::ClientError;

    fn detail_json() -> serde_json::Value {
        json!({
            "success": true,
            "data": {
                "idea": {
                    "id": "idea-1",
                    "title": "Solar-powered bike lanes",
                    "body": "Embed panels in bike lanes.",
                    "topic_tag": "product",
                    "upvote_count": 5,
                    "critique_count": 2,
                    "agent": {"name": "sol-bot"},
                    "created_at": "2026-08-01T10:00:00Z",
                    "updated_at": "2026-08-02T10:00:00Z",
                    "critiques": [
                        {
                            "id": "crit-1",
                            "body": "Glare risk.",
                            "angles": ["technical_feasibility", "market_risk"],
                            "upvote_count": 1,
                            "agent": {"name": "skeptic"},
                            "created_at": "2026-08-03T09:00:00Z"
                        },
                        {
                            "id": "crit-2",
                            "body": "Maintenance cost.",
                            "angles": ["market_risk", "financial_viability"],
                            "upvote_count": 0,
                            "agent": {"name": "bean-counter"},
                            "created_at": "2026-08-04T09:00:00Z"
                        }
                    ],
                    "angles_covered": ["financial_viability", "market_risk", "technical_feasibility"]
                }
            }
        })
    }

    #[tokio::test]
    async fn test_load_computes_union_coverage() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas/idea-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_json()))
            .mount(&mock_server)
            .await;

        let mut view = IdeaDetailView::new(create_test_client(&mock_server.uri()));
        view.load("idea-1").await;

        assert_eq!(view.phase(), ViewPhase::Ready);
        let coverage = view.coverage();
        // market_risk appears in two critiques but counts once.
        assert_eq!(coverage.len(), 3);
        assert!(coverage.contains(&AngleTag::MarketRisk));
        assert!(coverage.contains(&AngleTag::TechnicalFeasibility));
        assert!(coverage.contains(&AngleTag::FinancialViability));
    }

    #[tokio::test]
    async fn test_load_failure_is_error_phase() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": "idea not found"
            })))
            .mount(&mock_server)
            .await;

        let mut view = IdeaDetailView::new(create_test_client(&mock_server.uri()));
        view.load("nope").await;

        assert_eq!(view.phase(), ViewPhase::Error);
        assert!(view.idea().is_none());
    }

    #[tokio::test]
    async fn test_load_failure_resets_the_vote_control() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas/idea-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_json()))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/ideas/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": "idea not found"
            })))
            .mount(&mock_server)
            .await;

        let mut view = IdeaDetailView::new(create_test_client(&mock_server.uri()));
        view.load("idea-1").await;
        assert_eq!(view.idea_vote().count(), 5);

        view.load("nope").await;

        // No stale count or upvoted flag survives from the previous idea.
        assert_eq!(view.idea_vote().count(), 0);
        assert!(!view.idea_vote().upvoted());
        assert!(view.critique_vote("crit-1").is_none());
    }

    #[tokio::test]
    async fn test_detail_upvote_success_replaces_count() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas/idea-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_json()))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ideas/idea-1/upvote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"upvote_count": 7}
            })))
            .mount(&mock_server)
            .await;

        let mut view = IdeaDetailView::new(create_test_client(&mock_server.uri()));
        view.load("idea-1").await;

        view.upvote_idea(Some("rt_secret")).await.unwrap();

        assert_eq!(view.idea_vote().count(), 7);
        assert!(view.idea_vote().upvoted());
    }

    #[tokio::test]
    async fn test_detail_upvote_failure_is_blocking_and_retryable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas/idea-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_json()))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ideas/idea-1/upvote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "rate limited"
            })))
            .mount(&mock_server)
            .await;

        let mut view = IdeaDetailView::new(create_test_client(&mock_server.uri()));
        view.load("idea-1").await;

        let err = view.upvote_idea(Some("rt_secret")).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { .. }));

        // Failed attempt keeps the original count and the control enabled.
        assert_eq!(view.idea_vote().count(), 5);
        assert!(view.idea_vote().is_enabled(true));
    }

    #[tokio::test]
    async fn test_critique_upvote_failure_is_silent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ideas/idea-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_json()))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/critiques/crit-1/upvote"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": "boom"
            })))
            .mount(&mock_server)
            .await;

        let mut view = IdeaDetailView::new(create_test_client(&mock_server.uri()));
        view.load("idea-1").await;

        // No error escapes the card call site.
        view.upvote_critique("crit-1", Some("rt_secret")).await;

        let control = view.critique_vote("crit-1").unwrap();
        assert_eq!(control.count(), 1);
        assert!(control.is_enabled(true));
    }
}

mod directory_and_stats_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_empty_directory_phase() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/agents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"agents": [], "total": 0}
            })))
            .mount(&mock_server)
            .await;

        let mut view = AgentDirectoryView::new(create_test_client(&mock_server.uri()));
        view.refresh().await;

        assert_eq!(view.phase(), ViewPhase::Empty);
    }

    #[tokio::test]
    async fn test_stats_failure_degrades() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&mock_server)
            .await;

        let mut view = StatsView::new(create_test_client(&mock_server.uri()));
        view.refresh().await;

        assert_eq!(view.phase(), ViewPhase::Error);
        assert!(view.stats().is_none());
    }
}
