//! Remote sync background task

use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::{
    engine::Command,
    state::TimerHandle,
    store::{ConfigSnapshot, JsonFileStore},
};

/// Background task that polls a linked peer's configuration and forwards
/// changes to the engine
///
/// It never touches the timer state directly; changes go through the
/// command channel like any other client.
pub async fn remote_sync_task(peer: JsonFileStore, timer: TimerHandle, period: Duration) {
    info!("Starting remote sync task for {}", peer.path().display());

    let mut interval = interval(period);
    let mut last_seen: Option<ConfigSnapshot> = None;

    loop {
        interval.tick().await;

        match peer.load_existing() {
            Ok(Some(snapshot)) => {
                if last_seen.as_ref() == Some(&snapshot) {
                    continue;
                }
                debug!("Peer configuration changed, forwarding to engine");
                if timer.notify(Command::ApplyRemote(snapshot.clone())).await.is_err() {
                    info!("Timer engine stopped, ending remote sync task");
                    break;
                }
                last_seen = Some(snapshot);
            }
            Ok(None) => {
                // Peer has not written anything yet
            }
            Err(e) => {
                warn!("Failed to read peer configuration: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::SilentCue,
        engine::{CountdownConfig, IntervalConfig, TimerEngine, TimerMode},
        store::{ConfigPatch, ConfigStore, MemoryStore, MirroredStore},
        tasks::spawn_timer_task,
    };
    use tokio::time::sleep;

    const POLL: Duration = Duration::from_millis(10);

    fn linked_engine(local: &MemoryStore, peer: &JsonFileStore) -> TimerEngine {
        let store = MirroredStore::new(local.clone(), Some(peer.clone()));
        TimerEngine::new(Box::new(store), Box::new(SilentCue))
    }

    #[tokio::test]
    async fn test_peer_changes_reach_engine() {
        let dir = tempfile::tempdir().unwrap();
        let peer = JsonFileStore::new(dir.path().join("peer.json"));
        let local = MemoryStore::new();

        let engine = TimerEngine::new(Box::new(local.clone()), Box::new(SilentCue));
        let handle = spawn_timer_task(engine, Duration::from_secs(3600));
        let mut updates = handle.subscribe();
        tokio::spawn(remote_sync_task(peer.clone(), handle.clone(), Duration::from_millis(10)));

        peer.save(&ConfigPatch {
            mode: Some(TimerMode::Countdown),
            countdown_config: Some(CountdownConfig::new(7, 0)),
            ..ConfigPatch::default()
        })
        .unwrap();

        loop {
            updates.changed().await.unwrap();
            if updates.borrow().mode == TimerMode::Countdown {
                break;
            }
        }
        assert_eq!(handle.current().state.remaining_seconds(), Some(420));
        assert_eq!(local.snapshot().countdown_config, CountdownConfig::new(7, 0));
    }

    #[tokio::test]
    async fn test_own_saves_echo_back_without_disturbing_engine() {
        let dir = tempfile::tempdir().unwrap();
        let peer = JsonFileStore::new(dir.path().join("peer.json"));
        let snapshot = ConfigSnapshot {
            mode: TimerMode::Interval,
            sequence: vec![IntervalConfig::new(1, 0, 1, 1, 0)],
            sequence_mode_enabled: true,
            ..ConfigSnapshot::default()
        };
        let local = MemoryStore::with_snapshot(snapshot.clone());
        peer.save(&ConfigPatch::from(snapshot)).unwrap();

        let handle = spawn_timer_task(linked_engine(&local, &peer), POLL);
        let mut updates = handle.subscribe();
        tokio::spawn(remote_sync_task(peer.clone(), handle.clone(), POLL));

        handle.send(Command::Start).await.unwrap();
        loop {
            updates.changed().await.unwrap();
            if updates.borrow().state.completed {
                break;
            }
        }

        let after = handle
            .send(Command::AddToSequence(IntervalConfig::new(30, 10, 1, 1, 0)))
            .await
            .unwrap();
        assert!(after.state.completed);

        // Give the poller several rounds to read back the mirrored save
        sleep(POLL * 10).await;
        let mirrored = peer.load_existing().unwrap().unwrap();
        assert_eq!(mirrored.sequence.len(), 2);

        let current = handle.current();
        assert!(current.state.completed);
        assert!(!current.state.running);
        assert_eq!(current.state.remaining_seconds(), Some(0));
        assert_eq!(local.saves().len(), 1);
    }

    #[tokio::test]
    async fn test_existing_peer_file_is_read_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let peer = JsonFileStore::new(dir.path().join("peer.json"));
        let remote = ConfigSnapshot {
            mode: TimerMode::Countdown,
            countdown_config: CountdownConfig::new(3, 0),
            ..ConfigSnapshot::default()
        };
        peer.save(&ConfigPatch::from(remote.clone())).unwrap();

        let local = MemoryStore::new();
        let handle = spawn_timer_task(linked_engine(&local, &peer), Duration::from_secs(3600));
        let mut updates = handle.subscribe();
        tokio::spawn(remote_sync_task(peer.clone(), handle.clone(), POLL));

        loop {
            updates.changed().await.unwrap();
            if updates.borrow().mode == TimerMode::Countdown {
                break;
            }
        }
        assert_eq!(handle.current().state.remaining_seconds(), Some(180));
        assert_eq!(local.snapshot(), remote);

        // The mirrored write of the applied snapshot is not forwarded again
        sleep(POLL * 10).await;
        assert_eq!(local.saves().len(), 1);
        assert_eq!(peer.load_existing().unwrap(), Some(remote));
    }
}
