//! Destinations for saved regions

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::io::Write;

use crate::selection::NormalizedRegion;

/// Receives the normalized region when the user saves a selection
pub trait RegionSink {
    fn save(&mut self, page: Option<usize>, region: &NormalizedRegion) -> Result<()>;
}

/// Logs saved regions and keeps nothing
#[derive(Debug, Default)]
pub struct LogSink;

impl RegionSink for LogSink {
    fn save(&mut self, page: Option<usize>, region: &NormalizedRegion) -> Result<()> {
        match page {
            Some(page) => info!("Saving region on page {page}: {region}"),
            None => info!("Saving region: {region}"),
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SavedRegion<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<usize>,
    region: &'a NormalizedRegion,
}

/// Writes one JSON object per saved region
pub struct JsonSink<W> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RegionSink for JsonSink<W> {
    fn save(&mut self, page: Option<usize>, region: &NormalizedRegion) -> Result<()> {
        serde_json::to_writer(&mut self.out, &SavedRegion { page, region })
            .context("serializing saved region")?;
        writeln!(self.out).context("writing saved region")?;
        Ok(())
    }
}

impl RegionSink for Vec<NormalizedRegion> {
    fn save(&mut self, _page: Option<usize>, region: &NormalizedRegion) -> Result<()> {
        self.push(*region);
        Ok(())
    }
}
