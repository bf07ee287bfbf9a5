use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{Value, json};

use ::common::clock::ManualClock;
use ::common::config::{FheConfig, RelayConfig};
use server::config::{AppConfig, ContractConfig, CorsConfig, ServerConfig};
use server::state::AppState;

pub const START: i64 = 1_700_000_000;
pub const SUBMISSION_DEADLINE: i64 = START + 100;
pub const JUDGING_DEADLINE: i64 = START + 200;

pub const CONTRACT: &str = "0x00000000000000000000000000000000000000c0";
pub const ORGANIZER: &str = "0x00000000000000000000000000000000000000a0";
pub const JUDGE_1: &str = "0x00000000000000000000000000000000000000b1";
pub const JUDGE_2: &str = "0x00000000000000000000000000000000000000b2";
pub const ALICE: &str = "0x0000000000000000000000000000000000000011";
pub const BOB: &str = "0x0000000000000000000000000000000000000012";
pub const CAROL: &str = "0x0000000000000000000000000000000000000013";

pub mod routes {
    pub const HACKATHONS: &str = "/api/v1/hackathons";
    pub const ENCRYPT: &str = "/api/v1/fhe/encrypt";
    pub const PUBLIC_DECRYPT: &str = "/api/v1/fhe/public-decrypt";
    pub const USER_DECRYPT: &str = "/api/v1/fhe/user-decrypt";

    pub fn hackathon(id: u64) -> String {
        format!("/api/v1/hackathons/{id}")
    }

    pub fn register(id: u64) -> String {
        format!("/api/v1/hackathons/{id}/register")
    }

    pub fn participants(id: u64) -> String {
        format!("/api/v1/hackathons/{id}/participants")
    }

    pub fn participant(id: u64, address: &str) -> String {
        format!("/api/v1/hackathons/{id}/participants/{address}")
    }

    pub fn judge(id: u64, address: &str) -> String {
        format!("/api/v1/hackathons/{id}/judges/{address}")
    }

    pub fn submissions(id: u64) -> String {
        format!("/api/v1/hackathons/{id}/submissions")
    }

    pub fn submission(id: u64, idx: u32) -> String {
        format!("/api/v1/hackathons/{id}/submissions/{idx}")
    }

    pub fn reference(id: u64, idx: u32) -> String {
        format!("/api/v1/hackathons/{id}/submissions/{idx}/reference")
    }

    pub fn scores(id: u64, idx: u32) -> String {
        format!("/api/v1/hackathons/{id}/submissions/{idx}/scores")
    }

    pub fn judge_access(id: u64) -> String {
        format!("/api/v1/hackathons/{id}/judge-access")
    }

    pub fn calculate(id: u64) -> String {
        format!("/api/v1/hackathons/{id}/calculate")
    }

    pub fn aggregates(id: u64) -> String {
        format!("/api/v1/hackathons/{id}/aggregates")
    }

    pub fn decrypted_scores(id: u64) -> String {
        format!("/api/v1/hackathons/{id}/decrypted-scores")
    }

    pub fn decrypted_score(id: u64, idx: u32) -> String {
        format!("/api/v1/hackathons/{id}/decrypted-scores/{idx}")
    }

    pub fn finalize(id: u64) -> String {
        format!("/api/v1/hackathons/{id}/finalize")
    }

    pub fn winners(id: u64) -> String {
        format!("/api/v1/hackathons/{id}/winners")
    }
}

pub fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("timestamp in range")
}

/// A running test server with a clock the test controls.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub clock: Arc<ManualClock>,
    pub state: AppState,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> u64 {
        self.body["id"]
            .as_u64()
            .expect("response body should contain 'id'")
    }

    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_relay(RelayConfig {
            max_attempts: 3,
            delay_ms: 10,
            attempt_timeout_ms: 1000,
        })
        .await
    }

    pub async fn spawn_with_relay(relay: RelayConfig) -> Self {
        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            contract: ContractConfig {
                address: CONTRACT.parse().unwrap(),
                max_judges: 16,
            },
            fhe: FheConfig {
                signer_key: "integration-test-signer".to_string(),
            },
            relay,
        };

        let clock = Arc::new(ManualClock::new(ts(START)));
        let state = AppState::new(app_config, clock.clone());
        let app = server::build_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            clock,
            state,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn set_time(&self, secs: i64) {
        self.clock.set(ts(secs));
    }

    pub async fn post_as(&self, path: &str, body: &Value, caller: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("X-Wallet-Address", caller)
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_anonymous(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_as(&self, path: &str, caller: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("X-Wallet-Address", caller)
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// Create a hackathon organized by [`ORGANIZER`] and return its `id`.
    pub async fn create_hackathon(&self, judges: &[&str]) -> u64 {
        let res = self
            .post_as(routes::HACKATHONS, &hackathon_body(judges), ORGANIZER)
            .await;
        assert_eq!(res.status, 201, "create_hackathon failed: {}", res.text);
        res.id()
    }

    pub async fn register(&self, id: u64, who: &str) {
        let body = json!({
            "email": format!("{who}@example.com"),
            "handle": "@builder",
            "team_name": "Builders",
        });
        let res = self.post_as(&routes::register(id), &body, who).await;
        assert_eq!(res.status, 201, "register failed: {}", res.text);
    }

    /// Encrypt `value` for `caller` through the development endpoint.
    pub async fn encrypt(&self, value: u128, width: &str, caller: &str) -> Value {
        let res = self
            .post_as(
                routes::ENCRYPT,
                &json!({ "value": value, "width": width }),
                caller,
            )
            .await;
        assert_eq!(res.status, 200, "encrypt failed: {}", res.text);
        res.body
    }

    /// Submit a project and return its submission index.
    pub async fn submit(&self, id: u64, who: &str, reference: u128) -> u32 {
        let input = self.encrypt(reference, "u128", who).await;
        let res = self.post_as(&routes::submissions(id), &input, who).await;
        assert_eq!(res.status, 201, "submit failed: {}", res.text);
        res.id() as u32
    }

    pub async fn score(&self, id: u64, judge: &str, idx: u32, value: u8) -> TestResponse {
        let input = self.encrypt(u128::from(value), "u8", judge).await;
        self.post_as(&routes::scores(id, idx), &input, judge).await
    }

    /// Drive a hackathon through judging up to calculated aggregates.
    ///
    /// One submission per entry in `scores`, each scored by every judge in `judges`.
    pub async fn calculated_hackathon(&self, judges: &[&str], scores: &[u8]) -> u64 {
        self.set_time(START);
        let id = self.create_hackathon(judges).await;
        let people = [ALICE, BOB, CAROL];
        for who in &people[..scores.len()] {
            self.register(id, who).await;
            self.submit(id, who, 0xc1d).await;
        }

        self.set_time(SUBMISSION_DEADLINE);
        let res = self
            .post_as(&routes::judge_access(id), &json!({}), ORGANIZER)
            .await;
        assert_eq!(res.status, 200, "judge access failed: {}", res.text);

        for (idx, &value) in scores.iter().enumerate() {
            for judge in judges {
                let res = self.score(id, judge, idx as u32, value).await;
                assert_eq!(res.status, 201, "score failed: {}", res.text);
            }
        }

        self.set_time(JUDGING_DEADLINE);
        let res = self
            .post_as(&routes::calculate(id), &json!({}), ORGANIZER)
            .await;
        assert_eq!(res.status, 200, "calculate failed: {}", res.text);
        id
    }
}

pub fn hackathon_body(judges: &[&str]) -> Value {
    json!({
        "name": "Private Builders",
        "description": "Encrypted judging",
        "prize": "1 ETH",
        "submission_deadline": ts(SUBMISSION_DEADLINE),
        "judging_deadline": ts(JUDGING_DEADLINE),
        "judges": judges,
    })
}
