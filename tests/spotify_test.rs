use playlistd::error::Error;
use playlistd::spotify::Spotify;
use playlistd::types::TrackUri;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Helper to create a playlist item wrapping a minimal track
fn item(id: &str) -> Value {
    json!({
        "added_at": "2024-01-01T00:00:00Z",
        "track": {
            "id": id,
            "name": format!("Track {}", id),
            "uri": format!("spotify:track:{}", id),
            "duration_ms": 200_000,
            "artists": [{ "id": "a1", "name": "Artist" }],
            "album": { "id": "al1", "name": "Album", "release_date": "2024-01-01", "images": [] },
        },
    })
}

fn tracks_page(items: Vec<Value>, next: Option<String>, offset: u32, total: u64) -> Value {
    json!({
        "href": null,
        "items": items,
        "limit": 2,
        "next": next,
        "offset": offset,
        "total": total,
    })
}

#[tokio::test]
async fn playlist_tracks_are_drained_across_all_pages() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/playlists/p1"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "name": "Mix",
            "description": "test mix",
            "public": true,
            "collaborative": false,
            "snapshot_id": "snap-1",
            "images": [],
            "owner": { "id": "alice", "display_name": "Alice" },
            "tracks": tracks_page(
                vec![item("t1"), item("t2")],
                Some(format!("{}/playlists/p1/tracks?offset=2", uri)),
                0,
                5,
            ),
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlists/p1/tracks"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tracks_page(
            vec![item("t3"), item("t4")],
            Some(format!("{}/playlists/p1/tracks?offset=4", uri)),
            2,
            5,
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlists/p1/tracks"))
        .and(query_param("offset", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tracks_page(
            vec![item("t5")],
            None,
            4,
            5,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let spotify = Spotify::new(server.uri());
    let playlist = spotify.playlist_with_tracks("p1", "tok").await.unwrap();

    assert_eq!(playlist.id, "p1");
    assert_eq!(playlist.tracks.items.len(), 5);
    assert_eq!(playlist.tracks.total, Some(5));
    assert!(playlist.tracks.next.is_none());

    // page order is preserved
    let uris: Vec<&str> = playlist
        .tracks
        .items
        .iter()
        .map(|i| i.track.as_ref().unwrap().uri.as_str())
        .collect();
    assert_eq!(
        uris,
        vec![
            "spotify:track:t1",
            "spotify:track:t2",
            "spotify:track:t3",
            "spotify:track:t4",
            "spotify:track:t5",
        ]
    );
}

#[tokio::test]
async fn user_playlists_follow_next_links() {
    let server = MockServer::start().await;
    let uri = server.uri();

    let playlist = |id: &str| {
        json!({
            "id": id,
            "name": format!("List {}", id),
            "description": null,
            "public": true,
            "collaborative": false,
            "snapshot_id": "snap",
            "images": [],
            "owner": { "id": "alice", "display_name": null },
        })
    };

    // the first request carries limit=50, the followup only offset=2; the
    // matchers keep the two mocks from shadowing each other
    Mock::given(method("GET"))
        .and(path("/users/alice/playlists"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": null,
            "items": [playlist("p1"), playlist("p2")],
            "limit": 50,
            "next": format!("{}/users/alice/playlists?offset=2", uri),
            "offset": 0,
            "total": 3,
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/alice/playlists"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": null,
            "items": [playlist("p3")],
            "limit": 50,
            "next": null,
            "offset": 2,
            "total": 3,
        })))
        .mount(&server)
        .await;

    let spotify = Spotify::new(server.uri());
    let page = spotify.user_playlists("alice", "tok").await.unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total, Some(3));
    assert!(page.next.is_none());
}

#[tokio::test]
async fn search_sends_an_encoded_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "daft punk"))
        .and(query_param("type", "track"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": tracks_page(vec![item("t1")], None, 0, 1)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let spotify = Spotify::new(server.uri());
    let results = spotify.search_tracks("daft punk", "tok").await.unwrap();

    assert_eq!(results.items.len(), 1);
    assert_eq!(results.items[0].name, "Track t1");
}

#[tokio::test]
async fn add_tracks_posts_uris_and_returns_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/playlists/p1/tracks"))
        .and(body_partial_json(json!({ "uris": ["spotify:track:x"] })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap-2" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let spotify = Spotify::new(server.uri());
    let snapshot = spotify
        .add_tracks("p1", vec!["spotify:track:x".to_string()], "tok")
        .await
        .unwrap();

    assert_eq!(snapshot.snapshot_id, "snap-2");
}

#[tokio::test]
async fn upstream_failure_surfaces_status_and_body_unretried() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/playlists/p1/tracks"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let spotify = Spotify::new(server.uri());
    let err = spotify
        .remove_tracks(
            "p1",
            vec![TrackUri {
                uri: "spotify:track:x".to_string(),
            }],
            "tok",
        )
        .await
        .unwrap_err();

    match err {
        Error::Upstream { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "Forbidden");
        }
        other => panic!("expected Upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn profile_decodes_the_current_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "alice",
            "display_name": "Alice",
            "email": "alice@example.com",
        })))
        .mount(&server)
        .await;

    let spotify = Spotify::new(server.uri());
    let profile = spotify.profile("tok").await.unwrap();

    assert_eq!(profile.id, "alice");
    assert_eq!(profile.display_name.as_deref(), Some("Alice"));
}
