//! End-to-end tests for the book endpoints.

use serde_json::Value;

mod common;

use common::TestService;

async fn json(res: reqwest::Response) -> (u16, Value) {
    let status = res.status().as_u16();
    (status, res.json().await.unwrap())
}

fn titles(body: &Value) -> Vec<&str> {
    body["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let svc = TestService::start().await;
    let res = svc.client.get(svc.url("/books/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_create_validation() {
    let svc = TestService::start().await;
    assert_eq!(svc.create_book("Dune", 1965, 40, &["SCI_FI"]).await, 1);

    for (title, year, price, expected) in [
        (
            "dune",
            1990,
            10,
            "Error: Book with the title [dune] already exists in the system",
        ),
        (
            "Early",
            1939,
            10,
            "Error: Can't create new Book that its year [1939] is not in the accepted range [1940 -> 2100]",
        ),
        (
            "Late",
            2101,
            10,
            "Error: Can't create new Book that its year [2101] is not in the accepted range [1940 -> 2100]",
        ),
        ("Cheap", 2000, -1, "Error: Can't create new Book with negative price"),
    ] {
        let res = svc
            .client
            .post(svc.url("/book"))
            .json(&serde_json::json!({
                "title": title, "author": "A", "year": year, "price": price, "genres": []
            }))
            .send()
            .await
            .unwrap();
        let (status, body) = json(res).await;
        assert_eq!(status, 409, "{title}");
        assert_eq!(body["errorMessage"], expected);
    }

    assert_eq!(svc.create_book("Edge Low", 1940, 0, &[]).await, 2);
    assert_eq!(svc.create_book("Edge High", 2100, 0, &[]).await, 3);
}

#[tokio::test]
async fn test_list_sorted_and_filtered() {
    let svc = TestService::start().await;
    svc.create_book("Zorba", 1950, 10, &["NOVEL"]).await;
    svc.create_book("Alpha", 2000, 30, &["SCI_FI"]).await;

    let res = svc
        .client
        .get(svc.url("/books?price-less-than=20"))
        .send()
        .await
        .unwrap();
    let (status, body) = json(res).await;
    assert_eq!(status, 200);
    assert_eq!(titles(&body), vec!["Zorba"]);

    let res = svc.client.get(svc.url("/books")).send().await.unwrap();
    let (_, body) = json(res).await;
    assert_eq!(titles(&body), vec!["Alpha", "Zorba"]);

    let res = svc.client.get(svc.url("/books/total")).send().await.unwrap();
    let (_, body) = json(res).await;
    assert_eq!(body["result"], 2);
}

#[tokio::test]
async fn test_book_fields_keep_order() {
    let svc = TestService::start().await;
    svc.create_book("Dune", 1965, 40, &["SCI_FI", "NOVEL"]).await;

    let res = svc.client.get(svc.url("/book?id=1")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"result":{"id":1,"title":"Dune","author":"Test Author","year":1965,"price":40,"genres":["SCI_FI","NOVEL"]}}"#
    );
}

#[tokio::test]
async fn test_consecutive_non_matching_books_are_all_filtered() {
    let svc = TestService::start().await;
    svc.create_book("A", 2000, 50, &[]).await;
    svc.create_book("B", 2000, 60, &[]).await;
    svc.create_book("C", 2000, 5, &[]).await;
    svc.create_book("D", 2000, 70, &[]).await;
    svc.create_book("E", 2000, 80, &[]).await;

    let res = svc
        .client
        .get(svc.url("/books/total?price-less-than=20"))
        .send()
        .await
        .unwrap();
    let (_, body) = json(res).await;
    assert_eq!(body["result"], 1);
}

#[tokio::test]
async fn test_genre_filter() {
    let svc = TestService::start().await;
    svc.create_book("Manga Only", 2000, 5, &["MANGA"]).await;
    svc.create_book("SciFi Only", 2000, 5, &["SCI_FI"]).await;

    let res = svc
        .client
        .get(svc.url("/books?genres=NOVEL,MANGA"))
        .send()
        .await
        .unwrap();
    let (_, body) = json(res).await;
    assert_eq!(titles(&body), vec!["Manga Only"]);

    let res = svc
        .client
        .get(svc.url("/books?genres=NOVEL,FANTASY"))
        .send()
        .await
        .unwrap();
    let (status, body) = json(res).await;
    assert_eq!(status, 400);
    assert_eq!(body["errorMessage"], "Invalid genre value: FANTASY");
}

#[tokio::test]
async fn test_update_price() {
    let svc = TestService::start().await;
    svc.create_book("Dune", 1965, 40, &[]).await;

    let res = svc
        .client
        .put(svc.url("/book?id=1&price=0"))
        .send()
        .await
        .unwrap();
    let (status, body) = json(res).await;
    assert_eq!(status, 409);
    assert_eq!(
        body["errorMessage"],
        "Error: price update for book 1 must be a positive integer"
    );

    let res = svc
        .client
        .put(svc.url("/book?id=1&price=5"))
        .send()
        .await
        .unwrap();
    let (status, body) = json(res).await;
    assert_eq!(status, 200);
    assert_eq!(body["result"], 40);

    let res = svc
        .client
        .put(svc.url("/book?id=2&price=5"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let books_log = svc.read_log("books.log");
    assert!(books_log.contains("INFO: Update Book id [1] price to 5"));
}

#[tokio::test]
async fn test_delete_never_reuses_ids() {
    let svc = TestService::start().await;
    svc.create_book("One", 2000, 1, &[]).await;
    svc.create_book("Two", 2000, 1, &[]).await;

    let res = svc.client.delete(svc.url("/book?id=42")).send().await.unwrap();
    let (status, body) = json(res).await;
    assert_eq!(status, 404);
    assert_eq!(body["errorMessage"], "Error: no such Book with id 42");

    let res = svc.client.delete(svc.url("/book?id=2")).send().await.unwrap();
    let (status, body) = json(res).await;
    assert_eq!(status, 200);
    assert_eq!(body["result"], 1);

    assert_eq!(svc.create_book("Three", 2000, 1, &[]).await, 3);

    let res = svc.client.get(svc.url("/book?id=2")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    let books_log = svc.read_log("books.log");
    assert!(books_log.contains("INFO: Removing book [Two]"));
}
