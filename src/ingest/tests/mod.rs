use super::*;
use crate::sink::MemorySink;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};


fn api_config(server: &MockServer, chunk_size: usize) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/", server.uri()),
        chunk_size,
        placeholder_on_not_found: false,
    }
}

/// Ingestor pointed at the mock server, persisting into a fresh memory sink
fn test_ingestor(server: &MockServer, chunk_size: usize) -> (Ingestor, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let ingestor = Ingestor::new(&api_config(server, chunk_size), sink.clone()).unwrap();
    (ingestor, sink)
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

async fn mount_count(server: &MockServer, count: i64) {
    mount_json(
        server,
        "/people/",
        json!({ "count": count, "next": null, "previous": null, "results": [] }),
    )
    .await;
}

/// Person without any relations
fn plain_person(name: &str) -> Value {
    json!({
        "name": name,
        "height": "180",
        "mass": "80",
        "hair_color": "brown",
        "skin_color": "light",
        "eye_color": "brown",
        "birth_year": "unknown",
        "gender": "male",
        "homeworld": "https://swapi.dev/api/planets/1/",
        "films": [],
        "species": [],
        "vehicles": [],
        "starships": []
    })
}

/// Mount people `1..=count` with bodies from `plain_person`
async fn mount_plain_people(server: &MockServer, count: i64) {
    for id in 1..=count {
        mount_json(server, &format!("/people/{}", id), plain_person(&format!("Person {}", id))).await;
    }
}

fn sub_url(server: &MockServer, kind: &str, n: u32) -> String {
    format!("{}/{}/{}/", server.uri(), kind, n)
}

/// Mount Luke Skywalker (person 1) and every sub-resource he links to
async fn mount_luke(server: &MockServer) {
    let films = [(1, "A New Hope"), (2, "The Empire Strikes Back"), (3, "Return of the Jedi")];
    for (n, title) in films {
        mount_json(server, &format!("/films/{}/", n), json!({ "title": title, "episode_id": n + 3 })).await;
    }
    mount_json(server, "/starships/12/", json!({ "name": "X-wing", "model": "T-65 X-wing" })).await;
    mount_json(server, "/starships/22/", json!({ "name": "Imperial shuttle" })).await;
    mount_json(server, "/vehicles/14/", json!({ "name": "Snowspeeder" })).await;
    mount_json(server, "/vehicles/30/", json!({ "name": "Imperial Speeder Bike" })).await;

    mount_json(
        server,
        "/people/1",
        json!({
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "hair_color": "blond",
            "skin_color": "fair",
            "eye_color": "blue",
            "birth_year": "19BBY",
            "gender": "male",
            "homeworld": "https://swapi.dev/api/planets/1/",
            "films": [
                sub_url(server, "films", 1),
                sub_url(server, "films", 2),
                sub_url(server, "films", 3)
            ],
            "species": [],
            "vehicles": [sub_url(server, "vehicles", 14), sub_url(server, "vehicles", 30)],
            "starships": [sub_url(server, "starships", 12), sub_url(server, "starships", 22)],
            "created": "2014-12-09T13:50:51.644000Z",
            "url": "https://swapi.dev/api/people/1/"
        }),
    )
    .await;
}

#[tokio::test]
async fn test_zero_chunk_size_rejected() {
    let server = MockServer::start().await;
    let result = Ingestor::new(&api_config(&server, 0), Arc::new(MemorySink::new()));
    assert!(matches!(result, Err(Error::Config { .. })));
}
