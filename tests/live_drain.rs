//! Drain behaviour over a real socket.

use std::sync::Arc;
use std::time::Duration;

use drain_gate::{AdmissionGate, DrainOutcome, ShutdownCoordinator, ShutdownPolicy};
use tokio::sync::oneshot;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn in_flight_request_finishes_while_new_ones_are_rejected() {
    let gate = Arc::new(AdmissionGate::new());
    let coordinator = Arc::new(ShutdownCoordinator::new(
        gate.clone(),
        ShutdownPolicy {
            grace_period: Duration::from_millis(100),
            drain_timeout: None,
        },
    ));

    let (trigger_tx, trigger_rx) = oneshot::channel::<()>();
    let (addr, server) = {
        let coordinator = coordinator.clone();
        common::spawn_server(gate.clone(), async move {
            let _ = trigger_rx.await;
            coordinator.begin_shutdown().await;
        })
        .await
    };

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let slow = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .get(format!("http://{}/work/500", addr))
                .send()
                .await
                .expect("server unreachable")
        })
    };

    common::wait_until(|| gate.in_flight() == 1).await;
    trigger_tx.send(()).unwrap();
    common::wait_until(|| gate.is_shutting_down()).await;

    let rejected = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .expect("listener should stay open during drain");
    assert_eq!(rejected.status(), 500);

    let slow = slow.await.unwrap();
    assert_eq!(slow.status(), 200);
    assert_eq!(slow.text().await.unwrap(), "done after 500ms");

    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop after the drain")
        .unwrap()
        .unwrap();

    let report = coordinator.report().expect("shutdown ran");
    assert_eq!(report.outcome, DrainOutcome::Drained);
    assert_eq!(report.in_flight_at_seal, 1);
    assert_eq!(gate.in_flight(), 0);
}
