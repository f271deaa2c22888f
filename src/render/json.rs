use std::io::Write;

use anyhow::{Context, Result};

use super::Renderer;
use crate::game::Snapshot;
use crate::metrics::GameMetrics;

/// Writes every snapshot as one JSON object per line
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn present(&mut self, snapshot: &Snapshot, _metrics: &GameMetrics) -> Result<()> {
        serde_json::to_writer(&mut self.out, snapshot).context("Failed to encode snapshot")?;
        writeln!(self.out).context("Failed to write snapshot")?;
        Ok(())
    }
}
