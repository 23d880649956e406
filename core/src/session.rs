//! The context a test session hands to every entity operation.
//!
//! A `Session` bundles the stateless `ReqresClient`, the `HttpTransport` that
//! executes its requests, and the logger. `send` is the one place a request
//! goes over the wire: it logs the outgoing request, executes it, and logs the
//! response before the caller looks at the status.

use crate::client::ReqresClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::logging::{ApiLogger, LoggingContext};
use crate::transport::HttpTransport;

#[derive(Debug)]
pub struct Session {
    client: ReqresClient,
    transport: HttpTransport,
    logger: ApiLogger,
    logging: Option<LoggingContext>,
}

impl Session {
    /// Install logging under `config.log_dir` and bind to `config.base_url`.
    pub fn start(config: &Config) -> Result<Self, ApiError> {
        let logging = LoggingContext::install(&config.log_dir)?;
        Ok(Self {
            client: ReqresClient::new(&config.base_url),
            transport: HttpTransport::new(),
            logger: ApiLogger,
            logging: Some(logging),
        })
    }

    /// A session whose log lines go to whatever subscriber is already active.
    pub fn without_logging(base_url: &str) -> Self {
        Self {
            client: ReqresClient::new(base_url),
            transport: HttpTransport::new(),
            logger: ApiLogger,
            logging: None,
        }
    }

    pub fn client(&self) -> &ReqresClient {
        &self.client
    }

    pub fn logging(&self) -> Option<&LoggingContext> {
        self.logging.as_ref()
    }

    /// Log a `Starting <name>` marker for the scenario about to run.
    pub fn step(&self, name: &str) {
        self.logger.log_step(name);
    }

    pub fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.logger.log_request(req.method, &req.path, req.body.as_deref());
        let response = self.transport.execute(&req)?;
        self.logger.log_response(&req.path, &response);
        Ok(response)
    }

    /// Tear down logging, flushing the log file.
    pub fn finish(mut self) {
        if let Some(logging) = self.logging.take() {
            logging.shutdown();
        }
    }
}
