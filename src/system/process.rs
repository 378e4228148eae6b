use serde::Serialize;

/// A provider row before validation. Providers leave a field `None` when
/// they could not read or parse it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawProcess {
    pub pid: Option<u32>,
    pub name: Option<String>,
    /// Percent of one logical core.
    pub cpu_percent: Option<f64>,
    pub mem_percent: Option<f64>,
    pub rss_kb: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessRow {
    pub pid: u32,
    pub name: String,
    /// Percent of total machine capacity.
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub rss_kb: u64,
}

impl ProcessRow {
    pub fn from_raw(raw: RawProcess, logical_cores: usize) -> Option<Self> {
        let pid = raw.pid.filter(|&pid| pid > 0)?;
        let name = raw.name.filter(|name| !name.is_empty())?;
        let cores = logical_cores.max(1) as f64;
        Some(ProcessRow {
            pid,
            name,
            cpu_percent: raw.cpu_percent? / cores,
            mem_percent: raw.mem_percent?,
            rss_kb: raw.rss_kb?,
        })
    }
}

/// Lists processes, at most `limit` of them, ordered by CPU descending.
pub trait ProcessSource {
    fn list(&mut self, limit: usize) -> Vec<RawProcess>;
}

impl<S: ProcessSource + ?Sized> ProcessSource for Box<S> {
    fn list(&mut self, limit: usize) -> Vec<RawProcess> {
        (**self).list(limit)
    }
}

pub const DEFAULT_MIN_CANDIDATES: usize = 50;

pub struct ProcessSampler<S> {
    source: S,
    logical_cores: usize,
    min_candidates: usize,
}

impl<S: ProcessSource> ProcessSampler<S> {
    pub fn new(source: S, logical_cores: usize, min_candidates: usize) -> Self {
        Self {
            source,
            logical_cores: logical_cores.max(1),
            min_candidates,
        }
    }

    pub fn logical_cores(&self) -> usize {
        self.logical_cores
    }

    /// Requests a candidate pool of at least `min_candidates` rows so a local
    /// re-sort by memory still sees the heavy processes.
    pub fn sample(&mut self, requested: usize) -> Vec<ProcessRow> {
        let limit = requested.max(self.min_candidates);
        let raw = self.source.list(limit);
        let offered = raw.len();
        let rows: Vec<ProcessRow> = raw
            .into_iter()
            .filter_map(|r| ProcessRow::from_raw(r, self.logical_cores))
            .collect();
        if rows.len() < offered {
            tracing::debug!(dropped = offered - rows.len(), "dropped malformed process rows");
        }
        rows
    }
}
