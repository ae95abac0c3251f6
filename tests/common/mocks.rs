use async_trait::async_trait;
use qa_server::{
    Error, Result,
    qa::{QaAnswer, QaInput, QaModel},
};
use std::sync::{Arc, Mutex};

/// Mock QA model for testing
#[derive(Debug)]
pub struct MockQaModel {
    pub answers: Arc<Mutex<Vec<QaAnswer>>>,
    pub requests: Arc<Mutex<Vec<QaInput>>>,
    pub error: Option<String>,
}

impl MockQaModel {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_answers(self, answers: Vec<QaAnswer>) -> Self {
        *self.answers.lock().unwrap() = answers;
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_requests(&self) -> Vec<QaInput> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QaModel for MockQaModel {
    async fn answer(&self, input: &QaInput) -> Result<QaAnswer> {
        self.requests.lock().unwrap().push(input.clone());

        if let Some(ref error) = self.error {
            return Err(Error::inference(error.clone()));
        }

        let mut answers = self.answers.lock().unwrap();
        if answers.is_empty() {
            return Err(Error::inference("No more mock answers available"));
        }

        Ok(answers.remove(0))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

impl Default for MockQaModel {
    fn default() -> Self {
        Self::new()
    }
}
