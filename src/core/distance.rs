// src/core/distance.rs
// Client side of the travelled-distance service (`std_srvs/srv/Trigger`).

use std::fmt;
use std::time::Duration;

use log::{info, warn};

/// Text shown in place of a reading when the call did not complete.
pub const FAILURE_SENTINEL: &str = "Service call failed";

/// Result of one distance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistanceOutcome {
    /// The service answered with this message.
    Success(String),
    /// No answer within the timeout.
    Timeout,
    /// The request could not be sent or the transport failed.
    TransportError(String),
}

impl fmt::Display for DistanceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DistanceOutcome::Success(msg) => write!(f, "success: {}", msg),
            DistanceOutcome::Timeout => write!(f, "timed out"),
            DistanceOutcome::TransportError(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

/// Request/response seam for the distance service.
#[cfg_attr(test, mockall::automock)]
pub trait DistanceService {
    /// Sends an empty request and waits at most `timeout` for the answer.
    fn request(&self, timeout: Duration) -> DistanceOutcome;
}

/// Holds the last distance reading and issues new requests on demand.
pub struct DistanceQuery {
    reading: String,
    timeout: Duration,
}

impl DistanceQuery {
    /// Client with an empty reading.
    pub fn new(timeout: Duration) -> Self {
        DistanceQuery {
            reading: String::new(),
            timeout,
        }
    }

    /// Calls the service once.
    ///
    /// Stores the response text on success and [`FAILURE_SENTINEL`] otherwise;
    /// returns whether the call succeeded.
    pub fn fetch(&mut self, service: &dyn DistanceService) -> bool {
        match service.request(self.timeout) {
            DistanceOutcome::Success(message) => {
                info!("Distance service answered: {}", message);
                self.reading = message;
                true
            }
            failure => {
                warn!("Distance service call failed: {}", failure);
                self.reading = FAILURE_SENTINEL.to_string();
                false
            }
        }
    }

    /// Last stored reading.
    pub fn reading(&self) -> &str {
        &self.reading
    }
}
