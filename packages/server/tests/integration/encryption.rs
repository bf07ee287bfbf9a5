use crate::common::*;
use serde_json::json;

#[tokio::test]
async fn encrypt_returns_handle_and_proof() {
    let app = TestApp::spawn().await;
    let input = app.encrypt(200, "u8", ALICE).await;

    let handle = input["handle"].as_str().unwrap();
    assert!(handle.starts_with("0x"));
    assert_eq!(handle.len(), 2 + 64);
    assert!(input["proof"].as_str().unwrap().starts_with("0x"));
}

#[tokio::test]
async fn encrypt_rejects_values_wider_than_width() {
    let app = TestApp::spawn().await;
    let res = app
        .post_as(routes::ENCRYPT, &json!({ "value": 256, "width": "u8" }), ALICE)
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn public_decrypt_requires_published_handles() {
    let app = TestApp::spawn().await;
    let input = app.encrypt(5, "u8", ALICE).await;

    let res = app
        .post_anonymous(routes::PUBLIC_DECRYPT, &json!({ "handles": [input["handle"]] }))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn user_decrypt_follows_access_list() {
    let app = TestApp::spawn().await;
    let id = app.create_hackathon(&[JUDGE_1]).await;
    app.register(id, ALICE).await;
    app.submit(id, ALICE, 99).await;
    app.set_time(SUBMISSION_DEADLINE);
    app.post_as(&routes::judge_access(id), &json!({}), ORGANIZER)
        .await;

    let handle = app.get_as(&routes::reference(id, 0), JUDGE_1).await.body["handle"].clone();

    let res = app
        .post_as(routes::USER_DECRYPT, &json!({ "handle": handle }), BOB)
        .await;
    assert_eq!(res.status, 403);

    let res = app
        .post_as(routes::USER_DECRYPT, &json!({ "handle": handle }), ALICE)
        .await;
    assert_eq!(res.body["value"], 99);
}

#[tokio::test]
async fn contract_address_cannot_user_decrypt_scores() {
    let app = TestApp::spawn().await;
    let id = app.create_hackathon(&[JUDGE_1]).await;
    app.register(id, ALICE).await;
    app.submit(id, ALICE, 7).await;

    app.set_time(SUBMISSION_DEADLINE);
    app.post_as(&routes::judge_access(id), &json!({}), ORGANIZER)
        .await;

    let input = app.encrypt(42, "u8", JUDGE_1).await;
    let res = app.post_as(&routes::scores(id, 0), &input, JUDGE_1).await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app
        .post_as(
            routes::USER_DECRYPT,
            &json!({ "handle": input["handle"] }),
            CONTRACT,
        )
        .await;
    assert_eq!(res.status, 403);
    assert_eq!(res.code(), "PERMISSION_DENIED");
    assert!(res.body.get("value").is_none());

    let res = app
        .post_as(
            routes::USER_DECRYPT,
            &json!({ "handle": input["handle"] }),
            JUDGE_1,
        )
        .await;
    assert_eq!(res.body["value"], 42);
}

#[tokio::test]
async fn contract_address_cannot_user_decrypt_references() {
    let app = TestApp::spawn().await;
    let id = app.create_hackathon(&[JUDGE_1]).await;
    app.register(id, ALICE).await;
    let input = app.encrypt(0xbeef, "u128", ALICE).await;
    let res = app.post_as(&routes::submissions(id), &input, ALICE).await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app
        .post_as(
            routes::USER_DECRYPT,
            &json!({ "handle": input["handle"] }),
            CONTRACT,
        )
        .await;
    assert_eq!(res.status, 403);
}
