use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::store::Table;

/// Short-lived cache of worksheet reads, keyed by worksheet
pub trait TableCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Table>;
    fn insert(&mut self, key: &str, table: Table);
    fn invalidate(&mut self, key: &str);
}

pub struct TtlCache {
    ttl: Duration,
    entries: HashMap<String, (Instant, Table)>,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }
}

impl TableCache for TtlCache {
    fn get(&self, key: &str) -> Option<Table> {
        self.entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, table)| table.clone())
    }

    fn insert(&mut self, key: &str, table: Table) {
        let ttl = self.ttl;
        self.entries.retain(|_, (stored_at, _)| stored_at.elapsed() < ttl);
        self.entries.insert(key.to_string(), (Instant::now(), table));
    }

    fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Always misses
#[derive(Debug, Default)]
pub struct NoCache;

impl TableCache for NoCache {
    fn get(&self, _key: &str) -> Option<Table> {
        None
    }

    fn insert(&mut self, _key: &str, _table: Table) {}

    fn invalidate(&mut self, _key: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(title: &str) -> Table {
        Table {
            header: vec!["title".into()],
            rows: vec![vec![title.into()]],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(5));
        cache.insert("Sheet1", table("Berserk"));

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(cache.get("Sheet1"), Some(table("Berserk")));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("Sheet1"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn keys_are_separate() {
        let mut cache = TtlCache::new(Duration::from_secs(5));
        cache.insert("Sheet1", table("Berserk"));
        cache.insert("Sheet2", table("Monster"));

        cache.invalidate("Sheet1");
        assert_eq!(cache.get("Sheet1"), None);
        assert_eq!(cache.get("Sheet2"), Some(table("Monster")));
    }

    #[test]
    fn no_cache_never_hits() {
        let mut cache = NoCache;
        cache.insert("Sheet1", table("Berserk"));
        assert_eq!(cache.get("Sheet1"), None);
    }
}
