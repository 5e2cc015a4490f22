//! API integration tests
//!
//! Run against a live server with a migrated database:
//! `cargo test --test api_tests -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Suffix keeping catalog names unique across runs
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{} {}", prefix, nanos % 1_000_000_000)
}

async fn create_floor(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/floors", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No floor id")
}

async fn create_equipment(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/equipment-types", BASE_URL))
        .json(&json!({ "name": name, "category": "WOUND_CARE", "owned_quantity": 2 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No equipment type id")
}

async fn create_record(client: &Client, record: Value) -> Value {
    let response = client
        .post(format!("{}/add", BASE_URL))
        .json(&record)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_floor_conflicts() {
    let client = Client::new();
    let name = unique("Dup Floor");
    create_floor(&client, &name).await;

    let response = client
        .post(format!("{}/floors", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_create_record_computes_metrics() {
    let client = Client::new();
    let floor_id = create_floor(&client, &unique("Metrics Floor")).await;
    let equipment_id = create_equipment(&client, &unique("Metrics Vac")).await;

    let body = create_record(
        &client,
        json!({
            "equipment_type_id": equipment_id,
            "floor_id": floor_id,
            "ownership_type": "RENTAL",
            "start_date": "2024-01-01",
            "end_date": "2024-01-10",
            "daily_cost": "45.00"
        }),
    )
    .await;

    assert_eq!(body["status"], "Inactive");
    assert_eq!(body["total_days"], 10);
    assert_eq!(body["total_cost"], "450.00");
}

#[tokio::test]
#[ignore]
async fn test_create_record_rejects_reversed_dates() {
    let client = Client::new();
    let floor_id = create_floor(&client, &unique("Reversed Floor")).await;
    let equipment_id = create_equipment(&client, &unique("Reversed Vac")).await;

    let response = client
        .post(format!("{}/add", BASE_URL))
        .json(&json!({
            "equipment_type_id": equipment_id,
            "floor_id": floor_id,
            "ownership_type": "OWNED",
            "start_date": "2024-02-01",
            "end_date": "2024-01-01",
            "daily_cost": "10.00"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["details"][0]["field"], "end_date");
}

#[tokio::test]
#[ignore]
async fn test_update_rejects_overlapping_segments() {
    let client = Client::new();
    let floor_id = create_floor(&client, &unique("Overlap Floor")).await;
    let equipment_id = create_equipment(&client, &unique("Overlap Bed")).await;

    let record = create_record(
        &client,
        json!({
            "equipment_type_id": equipment_id,
            "floor_id": floor_id,
            "ownership_type": "RENTAL",
            "start_date": "2024-01-01",
            "end_date": "2024-01-31",
            "daily_cost": "20.00"
        }),
    )
    .await;
    let id = record["id"].as_i64().expect("No record id");

    let response = client
        .post(format!("{}/update/{}", BASE_URL, id))
        .json(&json!({
            "segments": [
                { "floor_id": floor_id, "start_date": "2024-01-01", "end_date": "2024-01-15" },
                { "floor_id": floor_id, "start_date": "2024-01-10", "end_date": "2024-01-20" }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    let details = body["details"].as_array().expect("No details");
    assert_eq!(details.len(), 2);
    assert!(details.iter().any(|d| d["segment"] == 0));
    assert!(details.iter().any(|d| d["segment"] == 1));

    // Nothing was written
    let detail: Value = client
        .get(format!("{}/update/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(detail["segments"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore]
async fn test_update_saves_segments_and_closes_record() {
    let client = Client::new();
    let icu = create_floor(&client, &unique("Seg ICU")).await;
    let west = create_floor(&client, &unique("Seg West")).await;
    let equipment_id = create_equipment(&client, &unique("Seg Vac")).await;

    let record = create_record(
        &client,
        json!({
            "equipment_type_id": equipment_id,
            "floor_id": icu,
            "ownership_type": "OWNED",
            "start_date": "2024-03-01",
            "daily_cost": "5.00"
        }),
    )
    .await;
    let id = record["id"].as_i64().expect("No record id");

    let response = client
        .post(format!("{}/update/{}", BASE_URL, id))
        .json(&json!({
            "end_date": "2024-03-31",
            "segments": [
                { "floor_id": icu, "start_date": "2024-03-01", "end_date": "2024-03-10" },
                { "floor_id": west, "start_date": "2024-03-11", "end_date": "2024-03-31" }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["record"]["status"], "Inactive");
    assert_eq!(body["record"]["total_days"], 31);
    assert_eq!(body["segments"].as_array().map(Vec::len), Some(2));

    // Drop the second movement
    let first = &body["segments"][0];
    let response = client
        .post(format!("{}/update/{}", BASE_URL, id))
        .json(&json!({
            "segments": [
                { "id": first["id"], "floor_id": icu, "start_date": "2024-03-01", "end_date": "2024-03-10" }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["segments"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_dashboard_filters_by_floor() {
    let client = Client::new();
    let floor_name = unique("Dash Floor");
    let floor_id = create_floor(&client, &floor_name).await;
    let equipment_id = create_equipment(&client, &unique("Dash Vac")).await;

    for (ownership, cost) in [("RENTAL", "30.00"), ("OWNED", "10.00")] {
        create_record(
            &client,
            json!({
                "equipment_type_id": equipment_id,
                "floor_id": floor_id,
                "ownership_type": ownership,
                "start_date": "2024-01-01",
                "daily_cost": cost
            }),
        )
        .await;
    }

    let response = client
        .get(format!("{}/dashboard", BASE_URL))
        .query(&[("floor", floor_name.as_str()), ("equipment", "")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total_items"], 2);
    assert_eq!(body["owned_items"], 1);
    assert_eq!(body["total_daily_cost"], "40.00");
    assert_eq!(body["rental_daily_cost"], "30.00");
    assert_eq!(body["efficiency_score"], 50.0);
    assert_eq!(
        body["chart_title"],
        format!("Cost Breakdown by Floor - {} Only", floor_name)
    );
}

#[tokio::test]
#[ignore]
async fn test_history_rejects_unknown_sort() {
    let client = Client::new();

    let response = client
        .get(format!("{}/history?sort=daily_cost", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
#[ignore]
async fn test_create_record_rejects_unknown_ownership() {
    let client = Client::new();

    let response = client
        .post(format!("{}/add", BASE_URL))
        .json(&json!({
            "equipment_type_id": 1,
            "floor_id": 1,
            "ownership_type": "LEASED",
            "start_date": "2024-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], 18);
}

#[tokio::test]
#[ignore]
async fn test_export_csv() {
    let client = Client::new();
    let floor_name = unique("Csv Floor");
    let floor_id = create_floor(&client, &floor_name).await;
    let equipment_id = create_equipment(&client, &unique("Csv Vac")).await;

    create_record(
        &client,
        json!({
            "equipment_type_id": equipment_id,
            "floor_id": floor_id,
            "ownership_type": "RENTAL",
            "start_date": "2024-01-01",
            "daily_cost": "45"
        }),
    )
    .await;

    let response = client
        .get(format!("{}/export_csv", BASE_URL))
        .query(&[("floor", floor_name.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.contains("attachment"));

    let body = response.text().await.expect("Failed to read body");
    let lines: Vec<&str> = body.trim_end().split("\r\n").collect();
    assert_eq!(
        lines[0],
        "Equipment Name,Floor,Ownership,Status,Daily Cost,Total Days,Total Cost"
    );
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains(",RENTAL,Active,45.00,"));
}

#[tokio::test]
#[ignore]
async fn test_floor_delete_cascades_records() {
    let client = Client::new();
    let floor_id = create_floor(&client, &unique("Cascade Floor")).await;
    let equipment_id = create_equipment(&client, &unique("Cascade Bed")).await;

    let record = create_record(
        &client,
        json!({
            "equipment_type_id": equipment_id,
            "floor_id": floor_id,
            "ownership_type": "OWNED",
            "start_date": "2024-01-01",
            "daily_cost": "1.00"
        }),
    )
    .await;
    let id = record["id"].as_i64().expect("No record id");

    let response = client
        .delete(format!("{}/floors/{}", BASE_URL, floor_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["records_removed"], 1);

    let response = client
        .get(format!("{}/update/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_delete_record() {
    let client = Client::new();
    let floor_id = create_floor(&client, &unique("Delete Floor")).await;
    let equipment_id = create_equipment(&client, &unique("Delete Vac")).await;

    let record = create_record(
        &client,
        json!({
            "equipment_type_id": equipment_id,
            "floor_id": floor_id,
            "ownership_type": "RENTAL",
            "start_date": "2024-01-01",
            "daily_cost": "3.00"
        }),
    )
    .await;
    let id = record["id"].as_i64().expect("No record id");

    let response = client
        .get(format!("{}/delete/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .post(format!("{}/delete/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .post(format!("{}/delete/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

async fn record_on(
    client: &Client,
    equipment_id: i64,
    floor_id: i64,
    ownership: &str,
    cost: &str,
    start: &str,
    end: Option<&str>,
) -> i64 {
    let body = create_record(
        client,
        json!({
            "equipment_type_id": equipment_id,
            "floor_id": floor_id,
            "ownership_type": ownership,
            "start_date": start,
            "end_date": end,
            "daily_cost": cost
        }),
    )
    .await;
    body["id"].as_i64().expect("No record id")
}

async fn get_json(client: &Client, path: &str, query: &[(&str, &str)]) -> Value {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .query(query)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore]
async fn test_dashboard_and_csv_filters_are_conjunctive() {
    let client = Client::new();
    let floor_a = unique("Conj A");
    let floor_b = unique("Conj B");
    let equip_x = unique("Conj X");
    let equip_y = unique("Conj Y");
    let a = create_floor(&client, &floor_a).await;
    let b = create_floor(&client, &floor_b).await;
    let x = create_equipment(&client, &equip_x).await;
    let y = create_equipment(&client, &equip_y).await;

    record_on(&client, x, a, "RENTAL", "10.00", "2024-01-01", None).await;
    record_on(&client, y, a, "OWNED", "20.00", "2024-01-01", None).await;
    record_on(&client, x, b, "RENTAL", "40.00", "2024-01-01", None).await;
    // Ended records never show on the dashboard
    record_on(&client, x, a, "RENTAL", "99.00", "2024-01-01", Some("2024-01-05")).await;

    let both = get_json(&client, "/dashboard", &[("floor", floor_a.as_str()), ("equipment", equip_x.as_str())]).await;
    assert_eq!(both["total_items"], 1);
    assert_eq!(both["total_daily_cost"], "10.00");
    assert_eq!(
        both["chart_title"],
        format!("Cost Breakdown by Floor - {} on {}", equip_x, floor_a)
    );

    let floor_only = get_json(&client, "/dashboard", &[("floor", floor_a.as_str())]).await;
    assert_eq!(floor_only["total_items"], 2);
    assert_eq!(floor_only["total_daily_cost"], "30.00");
    assert_eq!(floor_only["owned_daily_cost"], "20.00");

    let equipment_only = get_json(&client, "/dashboard", &[("equipment", equip_x.as_str())]).await;
    assert_eq!(equipment_only["total_items"], 2);
    assert_eq!(equipment_only["total_daily_cost"], "50.00");
    assert_eq!(equipment_only["chart"].as_array().map(Vec::len), Some(2));

    let response = client
        .get(format!("{}/export_csv", BASE_URL))
        .query(&[("floor", &floor_a), ("equipment", &equip_x)])
        .send()
        .await
        .expect("Failed to send request");
    let body = response.text().await.expect("Failed to read body");
    let lines: Vec<&str> = body.trim_end().split("\r\n").collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains(",10.00,"));
}

#[tokio::test]
#[ignore]
async fn test_history_filters_by_dates_and_ownership() {
    let client = Client::new();
    let floor = unique("Hist Floor");
    let equipment = unique("Hist Vac");
    let f = create_floor(&client, &floor).await;
    let e = create_equipment(&client, &equipment).await;

    // 10 days x 10.00, 10 days x 5.00, 10 days x 20.00
    let jan = record_on(&client, e, f, "RENTAL", "10.00", "2024-01-01", Some("2024-01-10")).await;
    let feb = record_on(&client, e, f, "OWNED", "5.00", "2024-02-01", Some("2024-02-10")).await;
    let mar = record_on(&client, e, f, "RENTAL", "20.00", "2024-03-01", Some("2024-03-10")).await;
    record_on(&client, e, f, "RENTAL", "1.00", "2024-03-01", None).await;

    let all = get_json(&client, "/history", &[("floor", floor.as_str()), ("equipment", equipment.as_str())]).await;
    assert_eq!(all["total_records"], 3);
    assert_eq!(all["total_history_cost"], "350.00");
    let ids: Vec<i64> = all["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![mar, feb, jan]);

    let rental_window = get_json(
        &client,
        "/history",
        &[
            ("floor", floor.as_str()),
            ("from_date", "2024-02-01"),
            ("to_date", "2024-03-31"),
            ("ownership", "RENTAL"),
        ],
    )
    .await;
    assert_eq!(rental_window["total_records"], 1);
    assert_eq!(rental_window["records"][0]["id"], mar);
    assert_eq!(rental_window["total_history_cost"], "200.00");

    // Both date bounds are inclusive
    let by_cost = get_json(
        &client,
        "/history",
        &[
            ("floor", floor.as_str()),
            ("from_date", "2024-01-10"),
            ("to_date", "2024-02-10"),
            ("sort", "total_cost"),
        ],
    )
    .await;
    assert_eq!(by_cost["total_records"], 2);
    assert_eq!(by_cost["records"][0]["id"], feb);
    assert_eq!(by_cost["records"][1]["id"], jan);
    assert_eq!(by_cost["total_history_cost"], "150.00");
}

#[tokio::test]
#[ignore]
async fn test_floor_delete_removes_segments_on_other_records() {
    let client = Client::new();
    let home = create_floor(&client, &unique("Home Floor")).await;
    let visited = create_floor(&client, &unique("Visited Floor")).await;
    let equipment_id = create_equipment(&client, &unique("Moving Bed")).await;

    let id = record_on(&client, equipment_id, home, "OWNED", "2.00", "2024-04-01", Some("2024-04-30")).await;

    let response = client
        .post(format!("{}/update/{}", BASE_URL, id))
        .json(&json!({
            "segments": [
                { "floor_id": home, "start_date": "2024-04-01", "end_date": "2024-04-10" },
                { "floor_id": visited, "start_date": "2024-04-11", "end_date": "2024-04-30" }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .delete(format!("{}/floors/{}", BASE_URL, visited))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["records_removed"], 0);

    let detail = get_json(&client, &format!("/update/{}", id), &[]).await;
    let segments = detail["segments"].as_array().expect("No segments");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0]["floor_id"], home);
}

#[tokio::test]
#[ignore]
async fn test_records_search_and_filters() {
    let client = Client::new();
    let token = unique("Srch");
    let floor = create_floor(&client, &unique("Plain Floor")).await;
    let pump = create_equipment(&client, &format!("{} Pump", token)).await;
    let decoy = create_equipment(&client, &unique("Decoy Vac")).await;

    let owned = record_on(&client, pump, floor, "OWNED", "1.00", "2024-01-01", None).await;
    let rental = record_on(&client, pump, floor, "RENTAL", "1.00", "2024-01-01", Some("2024-01-02")).await;
    record_on(&client, decoy, floor, "OWNED", "1.00", "2024-01-01", None).await;

    let needle = token.to_lowercase();
    let found = get_json(&client, "/records", &[("search", needle.as_str())]).await;
    let ids: Vec<i64> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![rental, owned]);

    let owned_only = get_json(
        &client,
        "/records",
        &[("search", needle.as_str()), ("ownership", "OWNED")],
    )
    .await;
    assert_eq!(owned_only.as_array().map(Vec::len), Some(1));
    assert_eq!(owned_only[0]["id"], owned);

    // `_` matches only a literal underscore, not the space in the name
    let literal = needle.replace(' ', "_");
    let none = get_json(&client, "/records", &[("search", literal.as_str())]).await;
    assert_eq!(none.as_array().map(Vec::len), Some(0));
}
