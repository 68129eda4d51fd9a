// src/ros_interface/client.rs
// Distance service client: the render thread asks, the ROS thread calls, a
// one-shot channel carries the answer back under a timeout.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender};
use futures::task::{LocalSpawn, LocalSpawnExt};
use futures::StreamExt;
use log::{debug, warn};
use r2r::std_srvs::srv::Trigger;

use crate::core::{DistanceOutcome, DistanceService};

/// Where the ROS thread sends one request's outcome.
pub(crate) type ReplyTo = mpsc::Sender<DistanceOutcome>;

/// Render-thread end of the `/get_distance` client.
#[derive(Clone)]
pub struct RosDistanceClient {
    requests: UnboundedSender<ReplyTo>,
}

impl RosDistanceClient {
    pub(crate) fn new(requests: UnboundedSender<ReplyTo>) -> Self {
        RosDistanceClient { requests }
    }
}

impl DistanceService for RosDistanceClient {
    fn request(&self, timeout: Duration) -> DistanceOutcome {
        let (reply_to, reply) = mpsc::channel();
        if self.requests.unbounded_send(reply_to).is_err() {
            return DistanceOutcome::TransportError("ROS thread is not running".to_string());
        }
        match reply.recv_timeout(timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => DistanceOutcome::Timeout,
            Err(RecvTimeoutError::Disconnected) => {
                DistanceOutcome::TransportError("request dropped by the ROS thread".to_string())
            }
        }
    }
}

/// Hands an outcome back; the caller may have timed out already.
/// Returns whether the caller was still waiting.
fn reply(reply_to: &ReplyTo, outcome: DistanceOutcome) -> bool {
    match reply_to.send(outcome) {
        Ok(()) => true,
        Err(mpsc::SendError(late)) => {
            debug!("Distance reply arrived after the caller gave up: {}", late);
            false
        }
    }
}

/// Issues one Trigger call per queued request. Each call runs as its own task
/// so a service that never answers does not hold up later requests.
pub(crate) async fn serve_requests<Sp>(
    client: r2r::Client<Trigger::Service>,
    mut requests: UnboundedReceiver<ReplyTo>,
    spawner: Sp,
) where
    Sp: LocalSpawn,
{
    while let Some(reply_to) = requests.next().await {
        let pending = match client.request(&Trigger::Request {}) {
            Ok(pending) => pending,
            Err(e) => {
                warn!("Could not send distance request: {}", e);
                reply(&reply_to, DistanceOutcome::TransportError(e.to_string()));
                continue;
            }
        };
        let call = async move {
            let outcome = match pending.await {
                Ok(response) => {
                    if !response.success {
                        warn!("Distance service reported failure: {}", response.message);
                    }
                    DistanceOutcome::Success(response.message)
                }
                Err(e) => DistanceOutcome::TransportError(e.to_string()),
            };
            reply(&reply_to, outcome);
        };
        if let Err(e) = spawner.spawn_local(call) {
            warn!("Could not schedule distance request: {}", e);
        }
    }
}
