//! ROS 2 interface for the teleop panel
//!
//! All r2r objects live on one background thread that owns the node:
//! - inbound odometry and robot info are forwarded to the render loop as [`Inbound`]
//! - velocity commands from the render loop are published on `cmd_vel`
//! - distance requests are issued on a local futures pool and answered over a channel

mod client;
mod publisher;
mod subscriber;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use log::{error, info};
use r2r::QosProfile;
use r2r::geometry_msgs::msg::Twist;
use r2r::nav_msgs::msg::Odometry;
use r2r::std_srvs::srv::Trigger;

use crate::core::{Inbound, VelocityCommand};
use crate::{PanelError, RosConfig};

pub use client::RosDistanceClient;
pub use publisher::{CmdVelPublisher, to_twist};
pub use subscriber::{pose_from_odometry, robot_info_from_json};

const SPIN_PERIOD: Duration = Duration::from_millis(10);

/// Render-thread handles onto the ROS thread.
pub struct RosLinks {
    /// Velocity command publisher
    pub publisher: CmdVelPublisher,
    /// Distance service client
    pub distance: RosDistanceClient,
    /// Inbound odometry and robot info
    pub inbound: Receiver<Inbound>,
}

/// ROS 2 interface manager
pub struct RosInterface {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl RosInterface {
    /// Creates the node on a background thread and starts spinning it.
    ///
    /// Returns once the node, its publisher, subscriptions and client exist,
    /// or with the error that prevented it.
    pub fn start(config: &RosConfig) -> Result<(Self, RosLinks), PanelError> {
        let (inbound_tx, inbound_rx) = mpsc::channel();
        let (command_tx, command_rx) = mpsc::channel();
        let (request_tx, request_rx) = futures::channel::mpsc::unbounded();
        let (ready_tx, ready_rx) = mpsc::channel();

        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = stop.clone();
        let config = config.clone();

        let thread = std::thread::Builder::new()
            .name("ros_spin".to_string())
            .spawn(move || match RosWorker::new(&config, inbound_tx, command_rx, request_rx) {
                Ok(worker) => {
                    let _ = ready_tx.send(Ok(()));
                    worker.run(&thread_stop);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            })?;

        ready_rx
            .recv()
            .map_err(|_| PanelError::RosError("ROS thread exited during setup".to_string()))??;
        info!("ROS interface initialized successfully");

        let links = RosLinks {
            publisher: CmdVelPublisher::new(command_tx),
            distance: RosDistanceClient::new(request_tx),
            inbound: inbound_rx,
        };
        Ok((
            RosInterface {
                stop,
                thread: Some(thread),
            },
            links,
        ))
    }

    /// Stops spinning and joins the ROS thread.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            info!("Shutting down ROS interface...");
            if thread.join().is_err() {
                error!("ROS thread panicked");
            }
            info!("ROS interface shutdown complete");
        }
    }
}

impl Drop for RosInterface {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// State owned by the ROS thread.
struct RosWorker {
    node: r2r::Node,
    pool: LocalPool,
    cmd_vel: r2r::Publisher<Twist>,
    commands: Receiver<VelocityCommand>,
}

impl RosWorker {
    fn new(
        config: &RosConfig,
        inbound: Sender<Inbound>,
        commands: Receiver<VelocityCommand>,
        requests: futures::channel::mpsc::UnboundedReceiver<client::ReplyTo>,
    ) -> Result<Self, PanelError> {
        let ctx = r2r::Context::create()?;
        let mut node = r2r::Node::create(ctx, &config.node_name, &config.namespace)?;
        let qos = QosProfile::default().keep_last(config.qos_depth);

        let cmd_vel = node.create_publisher::<Twist>(&config.cmd_vel_topic, qos.clone())?;
        info!("Publishing to {}", config.cmd_vel_topic);

        let odom = node.subscribe::<Odometry>(&config.odom_topic, qos.clone())?;
        info!("Subscribed to {}", config.odom_topic);

        let robot_info =
            node.subscribe_untyped(&config.robot_info_topic, &config.robot_info_type, qos)?;
        info!("Subscribed to {} ({})", config.robot_info_topic, config.robot_info_type);

        let distance = node.create_client::<Trigger::Service>(
            &config.distance_service,
            QosProfile::services_default(),
        )?;
        info!("Client for {}", config.distance_service);

        let pool = LocalPool::new();
        let spawner = pool.spawner();
        let spawn_err = |e: futures::task::SpawnError| PanelError::RosError(e.to_string());
        spawner
            .spawn_local(subscriber::forward_odometry(odom, inbound.clone()))
            .map_err(spawn_err)?;
        spawner
            .spawn_local(subscriber::forward_robot_info(robot_info, inbound))
            .map_err(spawn_err)?;
        spawner
            .spawn_local(client::serve_requests(distance, requests, spawner.clone()))
            .map_err(spawn_err)?;

        Ok(RosWorker {
            node,
            pool,
            cmd_vel,
            commands,
        })
    }

    fn run(mut self, stop: &AtomicBool) {
        while !stop.load(Ordering::Relaxed) {
            self.node.spin_once(SPIN_PERIOD);
            self.pool.run_until_stalled();

            for command in self.commands.try_iter() {
                if let Err(e) = self.cmd_vel.publish(&to_twist(&command)) {
                    error!("Failed to publish command: {}", e);
                }
            }
        }
    }
}
