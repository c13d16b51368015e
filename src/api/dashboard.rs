use tracing::debug;

use crate::charts::{ChartSelection, events, gauges};
use crate::core::{
    StageCounts, compute_funnel, conversion_pcts, derive_kpis, drop_counts, drop_shares,
};
use crate::error::FunnelResult;
use crate::ingest::{resolve_counts, stages_to_counts};
use crate::render::{RenderFrame, Renderer};

use super::{DashboardConfig, DashboardInput, DashboardSnapshot, StageDrop, largest_drops};

/// Every chart frame for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFrames {
    pub counts: RenderFrame,
    pub conversion: RenderFrame,
    pub distribution: RenderFrame,
    pub kpis: RenderFrame,
    pub events: RenderFrame,
}

impl DashboardFrames {
    /// Frames in dashboard reading order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderFrame> {
        [
            &self.counts,
            &self.conversion,
            &self.distribution,
            &self.kpis,
            &self.events,
        ]
        .into_iter()
    }
}

/// Facade running resolve → compute → render for hosts.
///
/// `compute` is pure; only `render`/`refresh` touch the owned renderer.
pub struct Dashboard<R: Renderer> {
    renderer: R,
    config: DashboardConfig,
    defaults: StageCounts,
}

impl<R: Renderer> Dashboard<R> {
    pub fn new(renderer: R, config: DashboardConfig) -> FunnelResult<Self> {
        config.validate()?;
        let defaults = stages_to_counts(&config.default_stages);
        Ok(Self {
            renderer,
            config,
            defaults,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Fixed stage list used by manual mode and as the upload fallback.
    #[must_use]
    pub fn default_counts(&self) -> &StageCounts {
        &self.defaults
    }

    /// Recomputes every derived value from one input snapshot.
    #[must_use]
    pub fn compute(&self, input: &DashboardInput) -> DashboardSnapshot {
        let resolution = resolve_counts(&input.source, &self.defaults, input.event_overrides);
        if let Some(warning) = &resolution.warning {
            debug!(warning = %warning, "using default stages after rejected upload");
        }

        let rows = compute_funnel(&resolution.counts);
        let drops = drop_counts(&rows)
            .into_iter()
            .zip(drop_shares(&rows))
            .zip(&rows)
            .map(|((drop_count, drop_share), row)| StageDrop {
                stage: row.stage.clone(),
                drop_count,
                drop_share,
            })
            .collect();
        let conversions = conversion_pcts(&rows);
        let kpis = derive_kpis(&resolution.raw_events);
        let insights = largest_drops(&rows, self.config.insight_limit);
        debug!(
            origin = ?resolution.origin,
            stages = rows.len(),
            "computed dashboard snapshot"
        );

        DashboardSnapshot {
            title: self.config.title.clone(),
            origin: resolution.origin,
            warning: resolution.warning,
            rows,
            drops,
            conversions,
            raw_events: resolution.raw_events,
            kpis,
            insights,
            charts: input.charts.unwrap_or(self.config.charts),
        }
    }

    /// Builds every chart frame for `snapshot` using its chart selection.
    pub fn build_frames(&self, snapshot: &DashboardSnapshot) -> FunnelResult<DashboardFrames> {
        let style = &self.config.style;
        let viewport = self.config.chart_viewport;
        let ChartSelection {
            counts,
            conversion,
            distribution,
        } = snapshot.charts;

        Ok(DashboardFrames {
            counts: counts.build_frame(&snapshot.rows, style, viewport)?,
            conversion: conversion.build_frame(&snapshot.rows, style, viewport)?,
            distribution: distribution.build_frame(&snapshot.rows, style, viewport)?,
            kpis: gauges::build_kpi_gauges(&snapshot.kpis, style, self.config.kpi_viewport)?,
            events: events::build_event_bars(&snapshot.raw_events, style, viewport)?,
        })
    }

    /// Builds and renders every frame of `snapshot`.
    pub fn render(&mut self, snapshot: &DashboardSnapshot) -> FunnelResult<DashboardFrames> {
        let frames = self.build_frames(snapshot)?;
        for frame in frames.iter() {
            self.renderer.render(frame)?;
        }
        Ok(frames)
    }

    /// Full recomputation plus render for one input change.
    pub fn refresh(&mut self, input: &DashboardInput) -> FunnelResult<DashboardSnapshot> {
        let snapshot = self.compute(input);
        self.render(&snapshot)?;
        Ok(snapshot)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
