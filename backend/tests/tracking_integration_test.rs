//! End-to-end tracking flows against a real database

mod common;

use axum::http::StatusCode;
use serde_json::json;

const DAY: &str = "2024-03-15";

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_update_and_energy() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, response) = app
        .put_auth(
            "/api/v1/profile",
            user.token(),
            &json!({
                "birth_date": "1990-01-01",
                "sex": "male",
                "height_cm": 180.0,
                "current_weight_kg": 80.0,
                "goal_weight_kg": 75.0,
                "activity_level": "Very Active"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", response);
    let profile = common::json_body(&response);
    assert_eq!(profile["activity_level"], "very_active");
    assert_eq!(profile["display"]["current_weight"], "80.0 kg");

    let (status, response) = app.get_auth("/api/v1/profile/energy", user.token()).await;
    assert_eq!(status, StatusCode::OK);
    let energy = common::json_body(&response);
    assert!(energy["bmr"].as_f64().unwrap() > 1500.0);
    assert_eq!(energy["activity_multiplier"], 1.725);
    assert!(energy["calorie_goal"].as_i64().unwrap() < energy["tdee"].as_f64().unwrap() as i64);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_food_diary_day() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let entry = |meal: &str, calories: f64, servings: f64| {
        json!({
            "date": DAY,
            "meal_type": meal,
            "name": "Oatmeal",
            "serving_count": servings,
            "nutrition": {
                "calories": calories, "protein_g": 5.0, "carbs_g": 27.0, "fat_g": 3.0,
                "fiber_g": 4.0, "sugar_g": 1.0, "sodium_mg": 2.0
            }
        })
    };

    let (status, _) = app.post_auth("/api/v1/diary", user.token(), &entry("breakfast", 150.0, 2.0)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, response) = app.post_auth("/api/v1/diary", user.token(), &entry("dinner", 400.0, 1.0)).await;
    assert_eq!(status, StatusCode::CREATED);
    let dinner_id = common::json_body(&response)["id"].as_str().unwrap().to_string();

    let (status, response) = app.get_auth(&format!("/api/v1/diary/{}", DAY), user.token()).await;
    assert_eq!(status, StatusCode::OK);
    let diary = common::json_body(&response);
    assert_eq!(diary["entry_count"], 2);
    assert_eq!(diary["totals"]["calories"], 700.0);
    assert_eq!(diary["meals"].as_array().unwrap().len(), 4);

    let (status, _) = app
        .delete_auth(&format!("/api/v1/diary/entries/{}", dinner_id), user.token())
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .delete_auth(&format!("/api/v1/diary/entries/{}", dinner_id), user.token())
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_water_cups() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let cup = format!("/api/v1/water/cup?date={}", DAY);

    for _ in 0..3 {
        let (status, _) = app.post_empty_auth(&cup, user.token()).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = app
        .post_auth(
            "/api/v1/water",
            user.token(),
            &json!({ "date": DAY, "amount": 500.0, "unit": "ml" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.delete_auth(&cup, user.token()).await;
    assert_eq!(status, StatusCode::OK);

    let (_, response) = app.get_auth(&format!("/api/v1/water/{}", DAY), user.token()).await;
    let water = common::json_body(&response);
    assert_eq!(water["cups"], 3);
    assert_eq!(water["goal_cups"], 8);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_weight_log_updates_profile() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, _) = app
        .post_auth("/api/v1/weight", user.token(), &json!({ "weight": 176.37, "unit": "lbs" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, response) = app.get_auth("/api/v1/profile", user.token()).await;
    let weight = common::json_body(&response)["current_weight_kg"].as_f64().unwrap();
    assert!((weight - 80.0).abs() < 0.01);

    let (status, _) = app
        .post_auth("/api/v1/weight", user.token(), &json!({ "weight": 5.0, "unit": "kg" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, response) = app.get_auth("/api/v1/weight/summary", user.token()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(common::json_body(&response)["latest"].is_object());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_week() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    app.post_auth(
        "/api/v1/exercise",
        user.token(),
        &json!({ "date": DAY, "name": "Run", "duration_minutes": 30, "calories_burned": 300.0 }),
    )
    .await;

    let (status, response) = app
        .get_auth(&format!("/api/v1/dashboard?date={}&period=week", DAY), user.token())
        .await;
    assert_eq!(status, StatusCode::OK, "{}", response);
    let dashboard = common::json_body(&response);
    assert_eq!(dashboard["summary"]["days"], 7);
    assert_eq!(dashboard["summary"]["start_date"], "2024-03-09");
    assert_eq!(dashboard["summary"]["totals"]["exercise_minutes"], 30);

    let (status, _) = app
        .get_auth("/api/v1/dashboard?date=15-03-2024", user.token())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_goal_progress_completes_goal() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, response) = app
        .post_auth(
            "/api/v1/goals",
            user.token(),
            &json!({
                "goal_type": "exercise",
                "title": "Run 100 km",
                "target_value": 100.0,
                "unit": "km"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", response);
    let id = common::json_body(&response)["id"].as_str().unwrap().to_string();

    let (status, response) = app
        .put_auth(
            &format!("/api/v1/goals/{}/progress", id),
            user.token(),
            &json!({ "current_value": 100.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json_body(&response)["is_completed"], true);

    let (_, response) = app.get_auth("/api/v1/goals/statistics", user.token()).await;
    assert_eq!(common::json_body(&response)["completed"], 1);

    let (status, response) = app
        .post_empty_auth(&format!("/api/v1/goals/{}/reactivate", id), user.token())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json_body(&response)["is_completed"], false);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_regime_logging() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, response) = app
        .post_auth(
            "/api/v1/supplements/regimes",
            user.token(),
            &json!({
                "name": "Morning",
                "supplements": [
                    { "name": "Vitamin D3", "serving_size": "1", "serving_unit": "softgel" },
                    { "name": "Magnesium", "serving_size": "1", "serving_unit": "capsule", "serving_count": 2.0 }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", response);
    let id = common::json_body(&response)["id"].as_str().unwrap().to_string();

    let (status, response) = app
        .post_empty_auth(
            &format!("/api/v1/supplements/regimes/{}/log?date={}", id, DAY),
            user.token(),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(common::json_body(&response).as_array().unwrap().len(), 2);

    let (_, response) = app
        .get_auth(&format!("/api/v1/supplements/entries?date={}", DAY), user.token())
        .await;
    assert_eq!(common::json_body(&response).as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_unknown_barcode_falls_back_to_mock() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, response) = app
        .get_auth("/api/v1/foods/barcode/012345678901", user.token())
        .await;
    assert_eq!(status, StatusCode::OK);
    let lookup = common::json_body(&response);
    assert_eq!(lookup["origin"], "mock");
    assert_eq!(lookup["food"]["name"], "Organic Granola Bar");
}
