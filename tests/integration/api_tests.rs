//! API integration tests
//!
//! Need a running server and database: `cargo test -- --ignored`

use booking_server::models::user::ServiceClaims;
use chrono::{Days, NaiveTime, TimeZone, Utc};
use chrono_tz::Europe::Berlin;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Service token signed with the server's secret
fn auth_token() -> String {
    let secret = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "change-this-secret-in-production".to_string());
    let now = Utc::now().timestamp();
    ServiceClaims {
        sub: "integration-tests".to_string(),
        iat: now,
        exp: now + 600,
    }
    .create_token(&secret)
    .expect("Failed to sign token")
}

fn unique_chat_id() -> i64 {
    (uuid::Uuid::new_v4().as_u128() as i64 & i64::MAX) | 1
}

async fn create_professional(client: &Client, token: &str) -> Value {
    let username = format!("pro-{}", uuid::Uuid::new_v4().simple());
    let response = client
        .post(format!("{}/admin/professionals", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "username": username,
            "first_name": "Maria",
            "last_name": "Keller",
            "phone_number": "+49301234567",
            "password": "long-enough-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn register_client(client: &Client, token: &str) -> Value {
    let response = client
        .post(format!("{}/clients/register", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "first_name": "Anna",
            "last_name": "Schmidt",
            "chat_id": unique_chat_id()
        }))
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
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/professionals", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_sign_in_with_wrong_password() {
    let client = Client::new();
    let token = auth_token();
    let professional = create_professional(&client, &token).await;

    let response = client
        .post(format!("{}/professionals/sign_in", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "username": professional["username"],
            "password": "not-the-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_booking_lifecycle() {
    let client = Client::new();
    let token = auth_token();

    let professional = create_professional(&client, &token).await;
    let professional_id = professional["id"].as_str().expect("No professional id");
    let customer = register_client(&client, &token).await;
    let client_id = customer["id"].as_str().expect("No client id");

    // Tomorrow 10:00-11:00 in the application zone
    let day = Utc::now()
        .with_timezone(&Berlin)
        .date_naive()
        .checked_add_days(Days::new(1))
        .expect("date overflow");
    let start = Berlin
        .from_local_datetime(&day.and_time(NaiveTime::from_hms_opt(10, 0, 0).expect("time")))
        .single()
        .expect("unambiguous local time");
    let end = start + chrono::Duration::hours(1);

    let booking = json!({
        "client_id": client_id,
        "professional_id": professional_id,
        "start_time": start.to_rfc3339(),
        "end_time": end.to_rfc3339(),
        "description": "Haircut"
    });

    // Book
    let response = client
        .post(format!("{}/appointments", BASE_URL))
        .bearer_auth(&token)
        .json(&booking)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let appointment: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(appointment["status"], "pending");
    let appointment_id = appointment["id"].as_str().expect("No appointment id");

    // Same slot again
    let response = client
        .post(format!("{}/appointments", BASE_URL))
        .bearer_auth(&token)
        .json(&booking)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Availability shows the slot as taken
    let response = client
        .get(format!(
            "{}/professionals/{}/availability?date={}",
            BASE_URL, professional_id, day
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let availability: Value = response.json().await.expect("Failed to parse response");
    let slots = availability["slots"].as_array().expect("No slots");
    assert_eq!(slots.len(), 18);
    let taken: Vec<&Value> = slots.iter().filter(|s| s["available"] == false).collect();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0]["type"], "appointment");
    assert_eq!(taken[0]["description"], "Anna Schmidt - Haircut");

    // Confirm, then confirm again
    let confirm_url = format!(
        "{}/professionals/{}/appointments/{}/confirm",
        BASE_URL, professional_id, appointment_id
    );
    let response = client
        .patch(&confirm_url)
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let confirmed: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(confirmed["status"], "confirmed");

    let response = client
        .patch(&confirm_url)
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Client cancels
    let response = client
        .patch(format!(
            "{}/clients/{}/appointments/{}/cancel",
            BASE_URL, client_id, appointment_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "cancellation_reason": "Feeling unwell" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let cancelled: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["cancelled_by"], "client");

    // Slot is free again
    let response = client
        .get(format!(
            "{}/professionals/{}/availability?date={}",
            BASE_URL, professional_id, day
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let availability: Value = response.json().await.expect("Failed to parse response");
    let slots = availability["slots"].as_array().expect("No slots");
    assert!(slots.iter().all(|s| s["available"] == true));

    // Cancelled bookings still appear in the client's history
    let response = client
        .get(format!(
            "{}/clients/{}/appointments?status=cancelled",
            BASE_URL, client_id
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let history: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(history.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_unavailable_block_and_dates() {
    let client = Client::new();
    let token = auth_token();

    let professional = create_professional(&client, &token).await;
    let professional_id = professional["id"].as_str().expect("No professional id");

    let day = Utc::now()
        .with_timezone(&Berlin)
        .date_naive()
        .checked_add_days(Days::new(2))
        .expect("date overflow");
    let start = Berlin
        .from_local_datetime(&day.and_time(NaiveTime::from_hms_opt(14, 0, 0).expect("time")))
        .single()
        .expect("unambiguous local time");

    let response = client
        .post(format!(
            "{}/professionals/{}/unavailable_appointments",
            BASE_URL, professional_id
        ))
        .bearer_auth(&token)
        .json(&json!({
            "start_time": start.to_rfc3339(),
            "end_time": (start + chrono::Duration::hours(1)).to_rfc3339(),
            "description": "Lunch"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .get(format!(
            "{}/professionals/{}/appointment_dates?month={}",
            BASE_URL,
            professional_id,
            day.format("%Y-%m")
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["dates"], json!([day.to_string()]));

    let response = client
        .get(format!(
            "{}/professionals/{}/timetable?date={}",
            BASE_URL, professional_id, day
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let timetable: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(timetable[0]["appointment"]["type"], "unavailable");
}
