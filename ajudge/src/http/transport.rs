//! Judge transport over reqwest, including the hint event stream.

use std::time::Duration;

use async_stream::try_stream;
use futures_util::StreamExt;
use reqwest::{Client, RequestBuilder, Response};

use acommon::ProblemId;

use crate::{
    BoxedFragmentStream, CodeRequest, ExecutionResult, JudgeConfig, JudgeError, JudgeFuture,
    JudgeTransport, Problem, SseDecoder, TestCase,
};

use super::serde_api::{
    ApiCodeRequest, ApiExecuteResponse, ApiProblem, ApiSimilarityResponse, ApiTestCase,
    extract_error_message, parse_json,
};

#[derive(Debug, Clone)]
pub struct JudgeHttpTransport {
    client: Client,
    config: JudgeConfig,
}

impl JudgeHttpTransport {
    pub fn new(client: Client, config: JudgeConfig) -> Self {
        Self { client, config }
    }

    pub fn from_config(config: JudgeConfig) -> Result<Self, JudgeError> {
        config.validate()?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|err| JudgeError::transport(err.to_string()))?;

        Ok(Self::new(client, config))
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    async fn send(builder: RequestBuilder, timeout: Duration) -> Result<Response, JudgeError> {
        let response = builder
            .timeout(timeout)
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        Ok(response)
    }

    async fn read_body(response: Response) -> Result<Vec<u8>, JudgeError> {
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(map_request_error)
    }

    async fn parse_error(response: Response) -> JudgeError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("judge request failed with status {status}"));

        JudgeError::from_status(status.as_u16(), message)
    }
}

fn map_request_error(err: reqwest::Error) -> JudgeError {
    if err.is_timeout() {
        JudgeError::timeout(err.to_string())
    } else {
        JudgeError::transport(err.to_string())
    }
}

impl JudgeTransport for JudgeHttpTransport {
    fn list_problems<'a>(&'a self) -> JudgeFuture<'a, Result<Vec<Problem>, JudgeError>> {
        Box::pin(async move {
            let builder = self.client.get(self.config.endpoint("problems"));
            let response = Self::send(builder, self.config.request_timeout).await?;
            let body = Self::read_body(response).await?;
            let problems: Vec<ApiProblem> = parse_json(&body)?;

            Ok(problems.into_iter().map(Problem::from).collect())
        })
    }

    fn fetch_test_cases<'a>(
        &'a self,
        problem_id: ProblemId,
    ) -> JudgeFuture<'a, Result<Vec<TestCase>, JudgeError>> {
        Box::pin(async move {
            let path = format!("problems/{problem_id}/test_cases");
            let builder = self.client.get(self.config.endpoint(&path));
            let response = Self::send(builder, self.config.request_timeout).await?;
            let body = Self::read_body(response).await?;
            let test_cases: Vec<ApiTestCase> = parse_json(&body)?;

            Ok(test_cases.into_iter().map(TestCase::from).collect())
        })
    }

    fn execute<'a>(
        &'a self,
        request: CodeRequest,
    ) -> JudgeFuture<'a, Result<Vec<ExecutionResult>, JudgeError>> {
        Box::pin(async move {
            let builder = self
                .client
                .post(self.config.endpoint("execute/"))
                .json(&ApiCodeRequest::from(&request));
            let response = Self::send(builder, self.config.submission_timeout).await?;
            let body = Self::read_body(response).await?;
            let parsed: ApiExecuteResponse = parse_json(&body)?;

            Ok(parsed
                .test_cases
                .into_iter()
                .map(ExecutionResult::from)
                .collect())
        })
    }

    fn find_similar<'a>(&'a self, request: CodeRequest) -> JudgeFuture<'a, Result<f64, JudgeError>> {
        Box::pin(async move {
            let builder = self
                .client
                .post(self.config.endpoint("find_similar/"))
                .json(&ApiCodeRequest::from(&request));
            let response = Self::send(builder, self.config.request_timeout).await?;
            let body = Self::read_body(response).await?;
            let parsed: ApiSimilarityResponse = parse_json(&body)?;

            parsed.into_score()
        })
    }

    fn open_hint_stream<'a>(
        &'a self,
        request: CodeRequest,
    ) -> JudgeFuture<'a, Result<BoxedFragmentStream<'a>, JudgeError>> {
        Box::pin(async move {
            let url = self.config.endpoint("generate_hint/");
            let open_timeout = self.config.request_timeout;
            let idle_timeout = self.config.stream_idle_timeout;

            // The body is long-lived, so only the open is bounded by a deadline.
            let pending = self
                .client
                .post(url)
                .header(reqwest::header::ACCEPT, "text/event-stream")
                .json(&ApiCodeRequest::from(&request))
                .send();
            let response = tokio::time::timeout(open_timeout, pending)
                .await
                .map_err(|_| {
                    JudgeError::timeout(format!(
                        "hint stream did not open within {}s",
                        open_timeout.as_secs()
                    ))
                })?
                .map_err(map_request_error)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let stream = try_stream! {
                let mut chunks = response.bytes_stream();
                let mut decoder = SseDecoder::new();

                loop {
                    let next = tokio::time::timeout(idle_timeout, chunks.next())
                        .await
                        .map_err(|_| {
                            JudgeError::timeout(format!(
                                "hint stream idle for more than {}s",
                                idle_timeout.as_secs()
                            ))
                        })?;

                    let Some(item) = next else {
                        break;
                    };

                    let bytes = item.map_err(|err| JudgeError::transport(err.to_string()))?;
                    for event in decoder.push(&bytes)? {
                        let fragment = event.into_fragment()?;
                        if !fragment.is_empty() {
                            yield fragment;
                        }
                    }
                }

                if let Some(event) = decoder.finish()? {
                    let fragment = event.into_fragment()?;
                    if !fragment.is_empty() {
                        yield fragment;
                    }
                }
            };

            Ok(Box::pin(stream) as BoxedFragmentStream<'a>)
        })
    }
}
