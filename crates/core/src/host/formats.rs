//! Track kinds, timeline export formats and timeline import options.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use super::api::FolderRef;
use crate::error::Error;

/// Track categories of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Subtitle,
}

impl TrackKind {
    pub const ALL: [TrackKind; 3] = [TrackKind::Video, TrackKind::Audio, TrackKind::Subtitle];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
            TrackKind::Subtitle => "subtitle",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackKind {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "video" => Ok(TrackKind::Video),
            "audio" => Ok(TrackKind::Audio),
            "subtitle" => Ok(TrackKind::Subtitle),
            other => Err(Error::invalid(format!(
                "Track type '{other}' is not valid. Choose between: 'video', 'audio', 'subtitle'."
            ))),
        }
    }
}

/// Timeline export formats the host understands.
///
/// Each format expects a specific file suffix; export operators enforce it
/// before handing the path to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimelineExportFormat {
    Fcp7Xml,
    EdlCmx3600,
    FcpXml1_3,
    FcpXml1_4,
    FcpXml1_5,
    FcpXml1_6,
    FcpXml1_7,
    FcpXml1_8,
    Aaf,
    NativeTimeline,
    EdlCdl,
    EdlSdl,
    EdlMissingClips,
    Hdr10ProfileA,
    Hdr10ProfileB,
    DolbyVision2_9,
    DolbyVision4_0,
    Csv,
    TabbedText,
}

impl TimelineExportFormat {
    pub const ALL: [TimelineExportFormat; 19] = [
        TimelineExportFormat::Fcp7Xml,
        TimelineExportFormat::EdlCmx3600,
        TimelineExportFormat::FcpXml1_3,
        TimelineExportFormat::FcpXml1_4,
        TimelineExportFormat::FcpXml1_5,
        TimelineExportFormat::FcpXml1_6,
        TimelineExportFormat::FcpXml1_7,
        TimelineExportFormat::FcpXml1_8,
        TimelineExportFormat::Aaf,
        TimelineExportFormat::NativeTimeline,
        TimelineExportFormat::EdlCdl,
        TimelineExportFormat::EdlSdl,
        TimelineExportFormat::EdlMissingClips,
        TimelineExportFormat::Hdr10ProfileA,
        TimelineExportFormat::Hdr10ProfileB,
        TimelineExportFormat::DolbyVision2_9,
        TimelineExportFormat::DolbyVision4_0,
        TimelineExportFormat::Csv,
        TimelineExportFormat::TabbedText,
    ];

    /// Display label, as shown in format choice plugs.
    pub fn label(&self) -> &'static str {
        match self {
            TimelineExportFormat::Fcp7Xml => "FCP7 XML",
            TimelineExportFormat::EdlCmx3600 => "EDL - CMX 3600",
            TimelineExportFormat::FcpXml1_3 => "FCPXML 1.3",
            TimelineExportFormat::FcpXml1_4 => "FCPXML 1.4",
            TimelineExportFormat::FcpXml1_5 => "FCPXML 1.5",
            TimelineExportFormat::FcpXml1_6 => "FCPXML 1.6",
            TimelineExportFormat::FcpXml1_7 => "FCPXML 1.7",
            TimelineExportFormat::FcpXml1_8 => "FCPXML 1.8",
            TimelineExportFormat::Aaf => "AAF",
            TimelineExportFormat::NativeTimeline => "Native Timeline",
            TimelineExportFormat::EdlCdl => "EDL - CDL",
            TimelineExportFormat::EdlSdl => "EDL - SDL",
            TimelineExportFormat::EdlMissingClips => "EDL - Missing Clips",
            TimelineExportFormat::Hdr10ProfileA => "HDR10 Profile A",
            TimelineExportFormat::Hdr10ProfileB => "HDR10 Profile B",
            TimelineExportFormat::DolbyVision2_9 => "Dolby Vision 2.9",
            TimelineExportFormat::DolbyVision4_0 => "Dolby Vision 4.0",
            TimelineExportFormat::Csv => "CSV",
            TimelineExportFormat::TabbedText => "Tabbed Text",
        }
    }

    /// File suffix the format expects, including the dot.
    pub fn suffix(&self) -> &'static str {
        match self {
            TimelineExportFormat::Fcp7Xml
            | TimelineExportFormat::Hdr10ProfileA
            | TimelineExportFormat::Hdr10ProfileB
            | TimelineExportFormat::DolbyVision2_9
            | TimelineExportFormat::DolbyVision4_0 => ".xml",
            TimelineExportFormat::EdlCmx3600
            | TimelineExportFormat::EdlCdl
            | TimelineExportFormat::EdlSdl
            | TimelineExportFormat::EdlMissingClips => ".edl",
            TimelineExportFormat::FcpXml1_3
            | TimelineExportFormat::FcpXml1_4
            | TimelineExportFormat::FcpXml1_5
            | TimelineExportFormat::FcpXml1_6
            | TimelineExportFormat::FcpXml1_7
            | TimelineExportFormat::FcpXml1_8 => ".fcpxml",
            TimelineExportFormat::Aaf => ".aaf",
            TimelineExportFormat::NativeTimeline => ".drt",
            TimelineExportFormat::Csv => ".csv",
            TimelineExportFormat::TabbedText => ".txt",
        }
    }
}

impl fmt::Display for TimelineExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimelineExportFormat {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|format| format.label() == raw)
            .copied()
            .ok_or_else(|| Error::invalid(format!("The timeline format '{raw}' is not recognized.")))
    }
}

/// Options for importing a timeline file through the media pool.
///
/// The host's native timeline format ignores all of these; the import
/// operator renames the timeline after the fact instead.
#[derive(Clone)]
pub struct TimelineImportOptions {
    pub timeline_name: Option<String>,
    pub import_source_clips: bool,
    pub source_clips_path: Option<PathBuf>,
    pub source_clips_folders: Vec<FolderRef>,
}

impl Default for TimelineImportOptions {
    fn default() -> Self {
        Self {
            timeline_name: None,
            import_source_clips: true,
            source_clips_path: None,
            source_clips_folders: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_round_trips_through_label() {
        for format in TimelineExportFormat::ALL {
            assert_eq!(format.label().parse::<TimelineExportFormat>().unwrap(), format);
        }
    }

    #[test]
    fn unknown_format_is_invalid_argument() {
        let err = "OTIO".parse::<TimelineExportFormat>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn suffixes_carry_the_dot() {
        for format in TimelineExportFormat::ALL {
            assert!(format.suffix().starts_with('.'));
        }
    }
}
