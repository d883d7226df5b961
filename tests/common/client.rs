#![allow(dead_code)]
use reqwest::Url;
use serde_json::Value;

pub struct TestAppClient {
    url: Url,
    client: reqwest::Client,
}

impl TestAppClient {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn health(&self) -> reqwest::Response {
        self.client
            .get(self.url.join("test/").unwrap())
            .send()
            .await
            .unwrap()
    }

    pub async fn submit(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url.join("surveys/submit/").unwrap())
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn submit_raw(&self, body: &'static str) -> reqwest::Response {
        self.client
            .post(self.url.join("surveys/submit/").unwrap())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn submit_form(&self, body: &'static str) -> reqwest::Response {
        self.client
            .post(self.url.join("surveys/submit/").unwrap())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn submit_empty(&self) -> reqwest::Response {
        self.client
            .post(self.url.join("surveys/submit/").unwrap())
            .send()
            .await
            .unwrap()
    }

    pub async fn submit_survey(&self, question: &str, answer: &str) -> reqwest::Response {
        self.submit(&serde_json::json!({
            "question": question,
            "answer": answer,
        }))
        .await
    }

    pub async fn list(&self) -> reqwest::Response {
        self.client
            .get(self.url.join("surveys/").unwrap())
            .send()
            .await
            .unwrap()
    }
}
