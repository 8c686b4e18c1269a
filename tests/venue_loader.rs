//! Venue loading over HTTP (wiremock) and from disk.

use std::path::PathBuf;
use std::time::Duration;

use seating_chart::services::venue_loader::{LoadFailure, VenueLoader, VenueSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VENUE: &str = include_str!("fixtures/venue_small.json");

fn http_loader(server: &MockServer) -> VenueLoader {
    VenueLoader::new(
        VenueSource::Http(format!("{}/venue.json", server.uri())),
        Duration::from_secs(2),
    )
}

#[tokio::test]
async fn loads_venue_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/venue.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VENUE))
        .expect(1)
        .mount(&server)
        .await;

    let venue = http_loader(&server).load().await.unwrap();

    assert_eq!(venue.venue_id, "hall-small");
    assert_eq!(venue.sections.len(), 2);
    assert_eq!(venue.seat_count(), 24);
}

#[tokio::test]
async fn non_success_status_is_a_load_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/venue.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = http_loader(&server).load().await.unwrap_err();

    assert!(matches!(err, LoadFailure::Status(status) if status.as_u16() == 404));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn malformed_body_is_a_load_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/venue.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = http_loader(&server).load().await.unwrap_err();
    assert!(matches!(err, LoadFailure::Parse(_)));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(VENUE)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let loader = VenueLoader::new(
        VenueSource::Http(format!("{}/venue.json", server.uri())),
        Duration::from_millis(200),
    );
    assert!(matches!(loader.load().await, Err(LoadFailure::Transport(_))));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_failure() {
    // порт 9 (discard) на localhost почти всегда закрыт
    let loader = VenueLoader::new(
        VenueSource::Http("http://127.0.0.1:9/venue.json".to_string()),
        Duration::from_secs(1),
    );
    assert!(matches!(loader.load().await, Err(LoadFailure::Transport(_))));
}

#[tokio::test]
async fn loads_venue_from_file() {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/venue_small.json");
    let loader = VenueLoader::new(VenueSource::File(fixture), Duration::from_secs(1));

    let venue = loader.load().await.unwrap();
    let seat = venue.find_seat("B-3-01").unwrap();
    assert_eq!(seat.section, "B");
    assert_eq!(seat.row, 3);
}
