// ==========================================
// 海上物流作业排程系统 - TTL 缓存
// ==========================================
// 职责: 事件日志等外部输入的解析结果缓存
// 说明: 存储与时钟均由调用方注入,核心不引用环境全局状态
// ==========================================

use chrono::NaiveDateTime;
use std::collections::HashMap;

// ==========================================
// CacheEntry - 缓存条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub value: String,            // 缓存值 (序列化后的负载)
    pub stored_at: NaiveDateTime, // 写入时刻
}

// ==========================================
// CacheStorage - 可注入存储接口
// ==========================================
pub trait CacheStorage {
    fn get(&self, key: &str) -> Option<CacheEntry>;
    fn put(&mut self, key: &str, entry: CacheEntry);
    fn remove(&mut self, key: &str);
}

// ==========================================
// InMemoryCacheStorage - 内存存储实现
// ==========================================
#[derive(Debug, Default)]
pub struct InMemoryCacheStorage {
    entries: HashMap<String, CacheEntry>,
}

impl InMemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStorage for InMemoryCacheStorage {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, entry: CacheEntry) {
        self.entries.insert(key.to_string(), entry);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

// ==========================================
// TtlCache - 带存活时间的缓存
// ==========================================
pub struct TtlCache<S: CacheStorage> {
    storage: S,
    ttl_seconds: i64,
}

impl<S: CacheStorage> TtlCache<S> {
    pub fn new(storage: S, ttl_seconds: i64) -> Self {
        Self {
            storage,
            ttl_seconds,
        }
    }

    /// 读取缓存 (过期条目驱逐并返回 None)
    ///
    /// `now` 由调用方传入,保证可测试
    pub fn get(&mut self, key: &str, now: NaiveDateTime) -> Option<String> {
        let entry = self.storage.get(key)?;
        let age_seconds = (now - entry.stored_at).num_seconds();
        if age_seconds >= self.ttl_seconds {
            self.storage.remove(key);
            tracing::debug!(key = %key, age_seconds, "缓存条目已过期,驱逐");
            return None;
        }
        Some(entry.value)
    }

    /// 写入缓存
    pub fn put(&mut self, key: &str, value: String, now: NaiveDateTime) {
        self.storage.put(
            key,
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    /// 显式失效
    pub fn invalidate(&mut self, key: &str) {
        self.storage.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_ts(hour: u32, minute: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 2, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_hit_within_ttl() {
        let mut cache = TtlCache::new(InMemoryCacheStorage::new(), 300);
        cache.put("events", "payload".to_string(), make_ts(10, 0));

        assert_eq!(
            cache.get("events", make_ts(10, 4)),
            Some("payload".to_string())
        );
    }

    #[test]
    fn test_expiry_evicts() {
        let mut cache = TtlCache::new(InMemoryCacheStorage::new(), 300);
        cache.put("events", "payload".to_string(), make_ts(10, 0));

        // 到期后读取为 None,且条目被驱逐
        assert_eq!(cache.get("events", make_ts(10, 5)), None);
        assert_eq!(cache.get("events", make_ts(10, 0)), None);
    }

    #[test]
    fn test_invalidate() {
        let mut cache = TtlCache::new(InMemoryCacheStorage::new(), 300);
        cache.put("events", "payload".to_string(), make_ts(10, 0));
        cache.invalidate("events");

        assert_eq!(cache.get("events", make_ts(10, 1)), None);
    }
}
