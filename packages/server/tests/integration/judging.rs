use crate::common::*;
use serde_json::json;

mod access {
    use super::*;

    #[tokio::test]
    async fn grant_requires_organizer_deadline_and_submissions() {
        let app = TestApp::spawn().await;
        let id = app.create_hackathon(&[JUDGE_1]).await;
        app.register(id, ALICE).await;

        let res = app
            .post_as(&routes::judge_access(id), &json!({}), ORGANIZER)
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "SUBMISSION_DEADLINE_NOT_REACHED");

        app.set_time(SUBMISSION_DEADLINE);
        let res = app.post_as(&routes::judge_access(id), &json!({}), ALICE).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.code(), "NOT_ORGANIZER");

        let res = app
            .post_as(&routes::judge_access(id), &json!({}), ORGANIZER)
            .await;
        assert_eq!(res.code(), "NO_SUBMISSIONS");
    }

    #[tokio::test]
    async fn second_grant_fails() {
        let app = TestApp::spawn().await;
        let id = app.create_hackathon(&[JUDGE_1]).await;
        app.register(id, ALICE).await;
        app.submit(id, ALICE, 7).await;
        app.set_time(SUBMISSION_DEADLINE);

        let first = app
            .post_as(&routes::judge_access(id), &json!({}), ORGANIZER)
            .await;
        assert_eq!(first.status, 200);
        let second = app
            .post_as(&routes::judge_access(id), &json!({}), ORGANIZER)
            .await;
        assert_eq!(second.status, 409);
        assert_eq!(second.code(), "ACCESS_ALREADY_GRANTED");
    }
}

mod scoring {
    use super::*;

    #[tokio::test]
    async fn scoring_before_access_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_hackathon(&[JUDGE_1]).await;
        app.register(id, ALICE).await;
        app.submit(id, ALICE, 7).await;
        app.set_time(SUBMISSION_DEADLINE);

        let res = app.score(id, JUDGE_1, 0, 45).await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "ACCESS_NOT_GRANTED");
        assert_eq!(app.get(&routes::submission(id, 0)).await.body["judge_count"], 0);
    }

    #[tokio::test]
    async fn score_marks_submission_judged_once_per_judge() {
        let app = TestApp::spawn().await;
        let id = app.create_hackathon(&[JUDGE_1, JUDGE_2]).await;
        app.register(id, ALICE).await;
        app.submit(id, ALICE, 7).await;
        app.set_time(SUBMISSION_DEADLINE);
        app.post_as(&routes::judge_access(id), &json!({}), ORGANIZER)
            .await;

        let res = app.score(id, JUDGE_1, 0, 45).await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["status"], "Judged");
        assert_eq!(res.body["judge_count"], 1);

        let res = app.score(id, JUDGE_1, 0, 50).await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "ALREADY_SCORED");

        let res = app.score(id, ALICE, 0, 50).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.code(), "NOT_JUDGE");

        app.set_time(JUDGING_DEADLINE);
        let res = app.score(id, JUDGE_2, 0, 50).await;
        assert_eq!(res.code(), "OUT_OF_WINDOW");
    }

    #[tokio::test]
    async fn calculate_requires_every_score() {
        let app = TestApp::spawn().await;
        let id = app.create_hackathon(&[JUDGE_1, JUDGE_2]).await;
        app.register(id, ALICE).await;
        app.submit(id, ALICE, 7).await;
        app.set_time(SUBMISSION_DEADLINE);
        app.post_as(&routes::judge_access(id), &json!({}), ORGANIZER)
            .await;
        app.score(id, JUDGE_1, 0, 45).await;

        app.set_time(JUDGING_DEADLINE);
        let res = app
            .post_as(&routes::calculate(id), &json!({}), ORGANIZER)
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "INCOMPLETE_SCORING");
        assert_eq!(app.get(&routes::hackathon(id)).await.body["phase"], "Judging");

        let res = app.get(&routes::aggregates(id)).await;
        assert_eq!(res.code(), "WINNERS_NOT_CALCULATED");
    }
}

mod results {
    use super::*;

    #[tokio::test]
    async fn organizer_publishes_decrypted_scores() {
        let app = TestApp::spawn().await;
        let id = app.calculated_hackathon(&[JUDGE_1, JUDGE_2], &[20, 30]).await;

        let aggregates = app.get(&routes::aggregates(id)).await;
        assert_eq!(aggregates.status, 200);
        let handles = aggregates.body["handles"].clone();
        assert_eq!(handles.as_array().unwrap().len(), 2);

        let decryption = app
            .post_anonymous(routes::PUBLIC_DECRYPT, &json!({ "handles": handles }))
            .await;
        assert_eq!(decryption.status, 200, "{}", decryption.text);
        let proof = decryption.body["proof"].clone();

        let forged = app
            .post_as(
                &routes::decrypted_scores(id),
                &json!({ "clear_scores": [60, 40], "proof": proof }),
                ORGANIZER,
            )
            .await;
        assert_eq!(forged.status, 422);
        assert_eq!(forged.code(), "INVALID_DECRYPTION_PROOF");

        let res = app
            .post_as(
                &routes::decrypted_scores(id),
                &json!({ "clear_scores": [40, 60], "proof": proof }),
                ORGANIZER,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let winners = res.body["winners"].as_array().unwrap();
        assert_eq!(winners.len(), 2);
        assert_eq!(winners[0]["participant"], BOB);
        assert_eq!(winners[0]["ranking"], 1);
        assert_eq!(winners[0]["final_score"], 60);
        assert_eq!(winners[1]["participant"], ALICE);

        let score = app.get(&routes::decrypted_score(id, 0)).await;
        assert_eq!(score.body, json!({ "score": 40, "is_decrypted": true }));

        let replay = app
            .post_as(
                &routes::decrypted_scores(id),
                &json!({ "clear_scores": [40, 60], "proof": proof }),
                ORGANIZER,
            )
            .await;
        assert_eq!(replay.status, 409);
        assert_eq!(replay.code(), "WINNERS_ALREADY_FINALIZED");
    }

    #[tokio::test]
    async fn finalize_decrypts_and_announces() {
        let app = TestApp::spawn().await;
        let id = app.calculated_hackathon(&[JUDGE_1], &[45]).await;

        let res = app.post_as(&routes::finalize(id), &json!({}), ORGANIZER).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(
            res.body["winners"],
            json!([{
                "participant": ALICE,
                "ranking": 1,
                "final_score": 45,
                "submission_id": 0,
            }])
        );

        let winners = app.get(&routes::winners(id)).await;
        assert_eq!(winners.body["winners"].as_array().unwrap().len(), 1);
        let details = app.get(&routes::hackathon(id)).await;
        assert_eq!(details.body["phase"], "Completed");
        assert_eq!(details.body["winners_finalized"], true);
    }

    #[tokio::test]
    async fn finalize_retries_until_decryption_is_ready() {
        let app = TestApp::spawn().await;
        let id = app.calculated_hackathon(&[JUDGE_1], &[10, 30, 20]).await;
        app.state
            .contract
            .lock()
            .await
            .service()
            .fail_next_public_decrypts(2);

        let res = app.post_as(&routes::finalize(id), &json!({}), ORGANIZER).await;
        assert_eq!(res.status, 200, "{}", res.text);
        let order: Vec<&str> = res.body["winners"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["participant"].as_str().unwrap())
            .collect();
        assert_eq!(order, vec![BOB, CAROL, ALICE]);
    }

    #[tokio::test]
    async fn finalize_gives_up_after_max_attempts() {
        let app = TestApp::spawn().await;
        let id = app.calculated_hackathon(&[JUDGE_1], &[10]).await;
        app.state
            .contract
            .lock()
            .await
            .service()
            .fail_next_public_decrypts(3);

        let res = app.post_as(&routes::finalize(id), &json!({}), ORGANIZER).await;
        assert_eq!(res.status, 503);
        assert_eq!(res.code(), "DECRYPTION_UNAVAILABLE");
        assert_eq!(
            app.get(&routes::winners(id)).await.body["winners"],
            json!([])
        );
    }

    #[tokio::test]
    async fn finalize_before_calculation_fails() {
        let app = TestApp::spawn().await;
        let id = app.create_hackathon(&[JUDGE_1]).await;

        let res = app.post_as(&routes::finalize(id), &json!({}), ORGANIZER).await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "WINNERS_NOT_CALCULATED");
    }
}
