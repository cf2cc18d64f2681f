use super::tree::TRACKER_TO_REFERENCE;
use log::debug;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Raw tracker stream of the stylus
pub const TRACKER_TO_STYLUS: &str = "TrackerToStylus";

/// Raw tracker stream of the needle
pub const TRACKER_TO_NEEDLE: &str = "TrackerToNeedle";

/// Maximum time between updates before a tool counts as out of view
pub const UPDATE_TOLERANCE: Duration = Duration::from_millis(200);

/// Transform watched for tracking dropouts
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedNode {
    pub transform: String,
    pub message: String,
    pub tolerance: Duration,
    pub play_sound: bool,
}

/// Reports tracked tools whose transforms stopped updating
#[derive(Debug, Clone, Default)]
pub struct Watchdog {
    nodes: Vec<WatchedNode>,
}

impl Watchdog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch list for the stylus, reference and needle
    pub fn with_default_tools() -> Self {
        let mut watchdog = Self::new();
        watchdog.add(TRACKER_TO_STYLUS, "Stylus is out of view", true);
        watchdog.add(TRACKER_TO_REFERENCE, "Reference is out of view", true);
        watchdog.add(TRACKER_TO_NEEDLE, "Needle is out of view", true);
        watchdog
    }

    /// Adds a watched transform, returning its index
    pub fn add(&mut self, transform: &str, message: &str, play_sound: bool) -> usize {
        self.nodes.push(WatchedNode {
            transform: transform.to_string(),
            message: message.to_string(),
            tolerance: UPDATE_TOLERANCE,
            play_sound,
        });
        self.nodes.len() - 1
    }

    pub fn remove_all(&mut self) {
        self.nodes.clear();
    }

    pub fn nodes(&self) -> &[WatchedNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Watched nodes not updated within their tolerance at `now`
    ///
    /// A node that never reported an update is stale.
    pub fn stale(
        &self,
        now: Instant,
        last_updates: &HashMap<String, Instant>,
    ) -> Vec<&WatchedNode> {
        self.nodes
            .iter()
            .filter(|node| match last_updates.get(&node.transform) {
                Some(last) => now.saturating_duration_since(*last) > node.tolerance,
                None => true,
            })
            .inspect(|node| debug!("{} ({})", node.message, node.transform))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tools() {
        let watchdog = Watchdog::with_default_tools();
        let messages: Vec<&str> = watchdog.nodes().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Stylus is out of view",
                "Reference is out of view",
                "Needle is out of view"
            ]
        );
        assert!(watchdog
            .nodes()
            .iter()
            .all(|n| n.tolerance == Duration::from_millis(200) && n.play_sound));
    }

    #[test]
    fn test_stale_nodes() {
        let watchdog = Watchdog::with_default_tools();
        let start = Instant::now();
        let now = start + Duration::from_secs(1);

        let mut updates = HashMap::new();
        updates.insert(TRACKER_TO_STYLUS.to_string(), now - Duration::from_millis(100));
        updates.insert(TRACKER_TO_REFERENCE.to_string(), now - Duration::from_millis(500));

        let stale: Vec<&str> = watchdog
            .stale(now, &updates)
            .into_iter()
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(stale, vec!["Reference is out of view", "Needle is out of view"]);
    }

    #[test]
    fn test_update_after_now_is_fresh() {
        let mut watchdog = Watchdog::new();
        watchdog.add("T", "T is out of view", true);
        let now = Instant::now();
        let mut updates = HashMap::new();
        updates.insert("T".to_string(), now + Duration::from_millis(50));
        assert!(watchdog.stale(now, &updates).is_empty());
    }

    #[test]
    fn test_add_and_remove_all() {
        let mut watchdog = Watchdog::new();
        assert_eq!(watchdog.add("A", "a", false), 0);
        assert_eq!(watchdog.add("B", "b", true), 1);
        assert_eq!(watchdog.len(), 2);
        watchdog.remove_all();
        assert!(watchdog.is_empty());
    }
}
