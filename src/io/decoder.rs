//! Audio decoding using Symphonia

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::signal::AudioSignal;
use crate::error::AnalysisError;
use crate::preprocessing::channel_mixer::downmix;

/// Sample rate assumed when the container does not declare one
const FALLBACK_SAMPLE_RATE: u32 = 44100;

/// Decode an audio file to mono `f32` samples
///
/// The format is probed from the file contents, using the extension as a
/// hint. The first decodable track is read to the end; multichannel audio is
/// averaged down to mono. Corrupt packets are skipped.
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` if the file cannot be opened, has
/// no supported audio track, or decodes to no samples.
pub fn decode_audio<P: AsRef<Path>>(path: P) -> Result<AudioSignal, AnalysisError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path).map_err(|e| {
        AnalysisError::DecodingError(format!("Cannot open {}: {}", path.display(), e))
    })?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AnalysisError::DecodingError(format!("Unsupported format: {}", e)))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::DecodingError("No supported audio tracks found".to_string()))?;

    let track_id = track.id;
    let sample_rate = match track.codec_params.sample_rate {
        Some(rate) => rate,
        None => {
            log::warn!(
                "No sample rate declared, assuming {} Hz",
                FALLBACK_SAMPLE_RATE
            );
            FALLBACK_SAMPLE_RATE
        }
    };

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AnalysisError::DecodingError(format!("Unsupported codec: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(AnalysisError::DecodingError(format!(
                    "Failed to read packet: {}",
                    e
                )))
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let channels = spec.channels.count();
                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                samples.extend(downmix(buffer.samples(), channels)?);
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                // Corrupted packets happen; keep going
                skipped_packets += 1;
                log::warn!("Skipping undecodable packet: {}", msg);
            }
            Err(e) => {
                return Err(AnalysisError::DecodingError(format!(
                    "Decoder failure: {}",
                    e
                )))
            }
        }
    }

    if samples.is_empty() {
        return Err(AnalysisError::DecodingError(format!(
            "No audio samples decoded from {}",
            path.display()
        )));
    }

    log::debug!(
        "Decoded {} samples at {} Hz ({} packets skipped)",
        samples.len(),
        sample_rate,
        skipped_packets
    );

    AudioSignal::new(samples, sample_rate)
}
