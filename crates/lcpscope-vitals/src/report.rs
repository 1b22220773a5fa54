//! The structured result handed to downstream reporters.
//!
//! Field names and nesting (`subParts`, `optimizations.blockingResources`)
//! are stable: text/JSON reporters and external consumers key off this
//! shape.

use serde::Serialize;

use crate::attribution::RenderAttribution;
use crate::blocking::BlockingResource;
use crate::entries::ElementRect;
use crate::requests::NetworkRequest;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsReport {
    pub ttfb: TtfbReport,
    pub lcp: LcpReport,
    /// Raw main-frame request list, navigation request excluded.
    pub requests: Vec<NetworkRequest>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TtfbReport {
    pub time: f64,
    pub start_time: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LcpReport {
    pub time: f64,
    pub start_time: f64,
    pub render_time: Option<f64>,
    pub load_time: Option<f64>,
    pub url: Option<String>,
    pub name: Option<String>,
    pub fetch_priority: Option<String>,
    pub preloaded: Option<bool>,
    pub rect: Option<ElementRect>,
    pub sub_parts: SubParts,
    pub optimizations: Optimizations,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubParts {
    pub ttfb: f64,
    pub load_delay: Option<f64>,
    pub load_time: Option<f64>,
    pub render_delay: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimizations {
    pub blocking_resources: Vec<BlockingResource>,
}

impl VitalsReport {
    /// Assemble the report from the pieces of one attribution run.
    pub fn new(
        attribution: RenderAttribution,
        blocking_resources: Vec<BlockingResource>,
        requests: Vec<NetworkRequest>,
    ) -> Self {
        let candidate = attribution.candidate;
        Self {
            ttfb: TtfbReport {
                time: attribution.ttfb,
                start_time: attribution.ttfb,
            },
            lcp: LcpReport {
                time: candidate.start_time,
                start_time: candidate.start_time,
                render_time: candidate.render_time,
                load_time: candidate.load_time,
                url: candidate.url,
                name: candidate.name,
                fetch_priority: candidate.fetch_priority,
                preloaded: candidate.preloaded,
                rect: candidate.rect,
                sub_parts: SubParts {
                    ttfb: attribution.ttfb,
                    load_delay: attribution.load_delay,
                    load_time: attribution.load_time,
                    render_delay: attribution.render_delay,
                },
                optimizations: Optimizations { blocking_resources },
            },
            requests,
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
