//! Dispatch 指标收集模块
//!
//! 基于各 sink 的写入/丢弃计数发布指标并生成摘要。

use metrics::gauge;
use std::fmt;

/// 发布单个 sink 的累计计数
pub fn record_sink_totals(sink: &str, written: u64, dropped: u64) {
    gauge!("plogs_lines_written", "sink" => sink.to_string()).set(written as f64);
    gauge!("plogs_lines_dropped", "sink" => sink.to_string()).set(dropped as f64);
}

/// 单个 sink 的累计计数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkTotals {
    pub sink: String,
    pub written: u64,
    pub dropped: u64,
}

/// 分发摘要
///
/// 按注册顺序保存每个 sink 的计数。
#[derive(Debug, Clone, Default)]
pub struct DispatchSummary {
    /// 输入行数
    pub lines_in: u64,
    /// 各 sink 计数
    pub sinks: Vec<SinkTotals>,
}

impl DispatchSummary {
    /// 创建新的摘要
    pub fn new(lines_in: u64) -> Self {
        Self {
            lines_in,
            sinks: Vec::new(),
        }
    }

    /// 添加一个 sink 的计数
    pub fn push(&mut self, sink: impl Into<String>, written: u64, dropped: u64) {
        self.sinks.push(SinkTotals {
            sink: sink.into(),
            written,
            dropped,
        });
    }

    /// 所有 sink 写入总数
    pub fn total_written(&self) -> u64 {
        self.sinks.iter().map(|s| s.written).sum()
    }

    /// 所有 sink 丢弃总数
    pub fn total_dropped(&self) -> u64 {
        self.sinks.iter().map(|s| s.dropped).sum()
    }

    /// 发布所有计数到 metrics recorder
    pub fn record(&self) {
        for totals in &self.sinks {
            record_sink_totals(&totals.sink, totals.written, totals.dropped);
        }
    }
}

impl fmt::Display for DispatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Dispatch Summary ===")?;
        writeln!(f, "Lines in: {}", self.lines_in)?;
        writeln!(
            f,
            "Lines written: {} (dropped: {})",
            self.total_written(),
            self.total_dropped()
        )?;

        for totals in &self.sinks {
            writeln!(
                f,
                "  {}: written={}, dropped={}",
                totals.sink, totals.written, totals.dropped
            )?;
        }

        Ok(())
    }
}
