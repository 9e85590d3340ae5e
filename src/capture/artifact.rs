use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use super::backend::AudioFrame;

/// A finalized audio recording, addressable by path
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// Artifact identifier
    pub id: Uuid,
    /// Path to the finalized WAV file
    pub path: PathBuf,
    /// Recorded duration in whole seconds (rounded down)
    pub duration_secs: u64,
    /// Total number of samples written
    pub sample_count: usize,
}

/// Writes captured frames to a single WAV file and finalizes them into an
/// [`AudioArtifact`]
pub struct ArtifactWriter {
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    id: Uuid,
    path: PathBuf,
    sample_rate: u32,
    channels: u16,
    sample_count: usize,
}

impl ArtifactWriter {
    /// Create a writer for a fresh artifact under `output_dir`
    pub fn create(output_dir: &Path, sample_rate: u32, channels: u16) -> Result<Self> {
        fs::create_dir_all(output_dir).context("Failed to create artifact directory")?;

        let id = Uuid::new_v4();
        let path = output_dir.join(format!("answer-{}.wav", id));

        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let writer = hound::WavWriter::create(&path, spec)
            .with_context(|| format!("Failed to create WAV file: {:?}", path))?;

        Ok(Self {
            writer: Some(writer),
            id,
            path,
            sample_rate,
            channels,
            sample_count: 0,
        })
    }

    /// Append one captured frame
    pub fn write_frame(&mut self, frame: &AudioFrame) -> Result<()> {
        if let Some(writer) = &mut self.writer {
            for &sample in &frame.samples {
                writer
                    .write_sample(sample)
                    .context("Failed to write sample to WAV")?;
            }
            self.sample_count += frame.samples.len();
        }
        Ok(())
    }

    /// Drain a frame receiver until the capture stream closes it, then
    /// finalize. This is the body of the recorder's writer task.
    pub async fn drain(mut self, mut rx: mpsc::Receiver<AudioFrame>) -> Result<AudioArtifact> {
        while let Some(frame) = rx.recv().await {
            self.write_frame(&frame)?;
        }
        self.finish()
    }

    /// Finalize the WAV file and return the artifact
    pub fn finish(mut self) -> Result<AudioArtifact> {
        if let Some(writer) = self.writer.take() {
            writer.finalize().context("Failed to finalize WAV file")?;
        }

        let samples_per_sec = self.sample_rate as usize * self.channels as usize;
        let duration_secs = if samples_per_sec > 0 {
            (self.sample_count / samples_per_sec) as u64
        } else {
            0
        };

        let artifact = AudioArtifact {
            id: self.id,
            path: self.path.clone(),
            duration_secs,
            sample_count: self.sample_count,
        };

        info!(
            "Artifact finalized: {:?} ({} samples, {}s)",
            artifact.path, artifact.sample_count, artifact.duration_secs
        );

        Ok(artifact)
    }
}

impl Drop for ArtifactWriter {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.finalize() {
                warn!("Failed to finalize WAV writer on drop: {}", e);
            }
        }
    }
}
