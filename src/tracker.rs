use crate::utils;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Impression and click counters for one generated link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPerformanceRecord {
    pub link_id: String,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
}

impl LinkPerformanceRecord {
    fn new(link_id: &str) -> Self {
        Self {
            link_id: link_id.to_string(),
            impressions: 0,
            clicks: 0,
        }
    }

    /// Clicks per impression as a percentage, 0 before the first impression.
    /// Clicks without impressions are legal, so this may exceed 100.
    pub fn ctr(&self) -> f64 {
        utils::ctr(self.clicks, self.impressions)
    }
}

/// Summed counters over every tracked link
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerformanceTotals {
    pub links: usize,
    pub impressions: u64,
    pub clicks: u64,
}

impl PerformanceTotals {
    pub fn ctr(&self) -> f64 {
        utils::ctr(self.clicks, self.impressions)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    record: LinkPerformanceRecord,
    last_touched: u64,
}

/// Records impressions and clicks per link id.
///
/// Records are created on the first event for an id. With a retention limit
/// set, recording a new id beyond the limit evicts the least recently
/// updated record.
#[derive(Debug, Default, Clone)]
pub struct LinkPerformanceTracker {
    entries: HashMap<String, Entry>,
    max_records: Option<usize>,
    clock: u64,
}

impl LinkPerformanceTracker {
    /// Create a tracker that keeps every record
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max_records` records. A limit of 0 is raised to 1.
    pub fn with_retention(max_records: usize) -> Self {
        if max_records == 0 {
            ::log::warn!("Retention limit of 0 would drop every record, keeping 1 instead");
        }
        Self {
            max_records: Some(max_records.max(1)),
            ..Self::default()
        }
    }

    pub fn record_impression(&mut self, link_id: &str) {
        self.touch(link_id, |record| record.impressions += 1);
    }

    pub fn record_click(&mut self, link_id: &str) {
        self.touch(link_id, |record| record.clicks += 1);
    }

    /// Counters for `link_id`, if any event was recorded for it
    pub fn get(&self, link_id: &str) -> Option<&LinkPerformanceRecord> {
        self.entries.get(link_id).map(|entry| &entry.record)
    }

    /// Every record, most recently updated first
    pub fn all(&self) -> Vec<&LinkPerformanceRecord> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by(|a, b| b.last_touched.cmp(&a.last_touched));
        entries.into_iter().map(|entry| &entry.record).collect()
    }

    pub fn totals(&self) -> PerformanceTotals {
        self.entries
            .values()
            .fold(PerformanceTotals::default(), |mut totals, entry| {
                totals.links += 1;
                totals.impressions += entry.record.impressions;
                totals.clicks += entry.record.clicks;
                totals
            })
    }

    /// Put back a previously persisted record, replacing any existing one
    pub fn restore(&mut self, record: LinkPerformanceRecord) {
        self.clock += 1;
        let link_id = record.link_id.clone();
        self.entries.insert(
            link_id,
            Entry {
                record,
                last_touched: self.clock,
            },
        );
        self.enforce_retention();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, link_id: &str, update: impl FnOnce(&mut LinkPerformanceRecord)) {
        self.clock += 1;
        let clock = self.clock;
        let entry = self
            .entries
            .entry(link_id.to_string())
            .or_insert_with(|| Entry {
                record: LinkPerformanceRecord::new(link_id),
                last_touched: clock,
            });
        entry.last_touched = clock;
        update(&mut entry.record);

        // The limit is at least 1 and this entry is the newest, so it survives
        self.enforce_retention();
    }

    fn enforce_retention(&mut self) {
        let Some(max_records) = self.max_records else {
            return;
        };

        while self.entries.len() > max_records {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_touched)
                .map(|(id, _)| id.clone());

            match oldest {
                Some(id) => {
                    ::log::debug!("Evicting performance record for link {}", id);
                    self.entries.remove(&id);
                }
                None => break,
            }
        }
    }
}
